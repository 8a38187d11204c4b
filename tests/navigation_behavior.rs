//! Behaviour tests for window navigation
//!
//! These tests verify how a query filter moves between windows and where
//! navigation stops, as a UI enabling back/forward controls would see it.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Europe::London;
use tariff_lens::{PresentationStyle, QueryFilter};

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn far_past() -> DateTime<Utc> {
    utc(2000, 1, 1, 0, 0)
}

fn far_future() -> DateTime<Utc> {
    utc(2100, 1, 1, 0, 0)
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn forward_then_backward_returns_to_the_same_window() {
    let references = [
        utc(2024, 1, 31, 12, 0),
        utc(2024, 2, 29, 23, 30),
        utc(2024, 3, 30, 12, 0),
        utc(2024, 10, 26, 23, 45),
        utc(2024, 12, 31, 18, 0),
    ];

    for style in PresentationStyle::ALL {
        for reference in references {
            // Given: a filter well inside the navigable range
            let filter = QueryFilter::new(style, reference, London).unwrap();

            // When: stepping forward and back again
            let next = filter.step_forward(far_future()).expect("forward allowed");
            let back = next.step_backward(far_past()).expect("backward allowed");

            // Then: the same window is shown
            assert_eq!(back.window(), filter.window(), "{style} from {reference}");
            assert_eq!(back.presentation_style(), style);
        }
    }
}

#[test]
fn backward_then_forward_returns_to_the_same_window() {
    let references = [utc(2024, 3, 31, 12, 0), utc(2024, 5, 31, 8, 0), utc(2025, 2, 28, 12, 0)];

    for style in PresentationStyle::ALL {
        for reference in references {
            let filter = QueryFilter::new(style, reference, London).unwrap();

            let previous = filter.step_backward(far_past()).expect("backward allowed");
            let again = previous.step_forward(far_future()).expect("forward allowed");

            assert_eq!(again.window(), filter.window(), "{style} from {reference}");
        }
    }
}

#[test]
fn consecutive_windows_do_not_overlap_or_leave_gaps() {
    for style in PresentationStyle::ALL {
        let filter = QueryFilter::new(style, utc(2024, 6, 12, 12, 0), London).unwrap();
        let next = filter.step_forward(far_future()).unwrap();

        if style == PresentationStyle::WeeksInMonth {
            // Month grids share their edge weeks
            assert!(next.requested_start() <= filter.requested_end() + TimeDelta::nanoseconds(1));
        } else {
            assert_eq!(next.requested_start(), filter.requested_end() + TimeDelta::nanoseconds(1), "{style}");
        }
    }
}

// =============================================================================
// Bounds
// =============================================================================

#[test]
fn forward_is_blocked_when_next_reference_would_pass_now() {
    // Given: today is 20 May 2024 at noon and the user is looking at today
    let now = utc(2024, 5, 20, 12, 0);
    let filter = QueryFilter::new(PresentationStyle::HalfHourlyDay, now, London).unwrap();

    // Then: tomorrow is not reachable
    assert!(!filter.can_step_forward(now));
    assert!(filter.step_forward(now).is_none());

    // But yesterday's view can move forward to today
    let yesterday = filter.step_backward(far_past()).unwrap();
    assert!(yesterday.can_step_forward(now));
    assert_eq!(yesterday.step_forward(now).unwrap().window(), filter.window());
}

#[test]
fn forward_is_blocked_by_a_single_nanosecond() {
    let filter = QueryFilter::new(PresentationStyle::SevenDayWeek, utc(2024, 5, 13, 12, 0), Utc).unwrap();
    let exactly = utc(2024, 5, 20, 12, 0);

    assert!(filter.can_step_forward(exactly));
    assert!(!filter.can_step_forward(exactly - TimeDelta::nanoseconds(1)));
}

#[test]
fn backward_stops_at_account_start() {
    // Given: the account's first reading is on 10 March 2024 at noon
    let account_start = utc(2024, 3, 10, 12, 0);
    let filter = QueryFilter::new(PresentationStyle::ThirtyDayMonth, utc(2024, 4, 10, 12, 0), Utc).unwrap();

    // When / Then: landing exactly on the account start is allowed
    let march = filter.step_backward(account_start).expect("equal instant is allowed");
    assert_eq!(march.requested_start(), utc(2024, 3, 1, 0, 0));

    // And one more month back is not
    assert!(!march.can_step_backward(account_start));
    assert!(march.step_backward(account_start).is_none());
}

#[test]
fn disallowed_steps_leave_the_filter_untouched() {
    let filter = QueryFilter::new(PresentationStyle::TwelveMonthYear, utc(2024, 6, 1, 0, 0), London).unwrap();
    let snapshot = filter.clone();

    assert!(filter.step_backward(far_future()).is_none());
    assert!(filter.step_forward(far_past()).is_none());
    assert_eq!(filter, snapshot);
}

#[test]
fn live_clock_blocks_windows_in_the_future() {
    let filter = QueryFilter::new(PresentationStyle::HalfHourlyDay, far_future(), Utc).unwrap();

    assert!(!filter.can_step_forward_live());
    assert!(filter.step_forward_live().is_none());
}

// =============================================================================
// Calendar-unit steps
// =============================================================================

#[test]
fn month_steps_clamp_to_shorter_months() {
    let filter = QueryFilter::new(PresentationStyle::ThirtyDayMonth, utc(2024, 3, 31, 12, 0), Utc).unwrap();

    let february = filter.step_backward(far_past()).unwrap();
    assert_eq!(february.point_of_reference(), utc(2024, 2, 29, 12, 0));
    assert_eq!(february.requested_start(), utc(2024, 2, 1, 0, 0));
    assert_eq!(february.requested_end(), utc(2024, 3, 1, 0, 0) - TimeDelta::nanoseconds(1));
}

#[test]
fn day_steps_follow_local_days_over_dst() {
    // Noon on Saturday 26 October 2024, BST
    let filter = QueryFilter::new(PresentationStyle::HalfHourlyDay, utc(2024, 10, 26, 11, 0), London).unwrap();

    let sunday = filter.step_forward(far_future()).unwrap();

    // Noon on Sunday is GMT, and the day is 25 hours long
    assert_eq!(sunday.point_of_reference(), utc(2024, 10, 27, 12, 0));
    assert_eq!(sunday.requested_start(), utc(2024, 10, 26, 23, 0));
    assert_eq!(sunday.requested_end(), utc(2024, 10, 28, 0, 0) - TimeDelta::nanoseconds(1));
}
