//! Navigable consumption query windows

use crate::error::Result;
use crate::types::{Direction, PresentationStyle, TimeWindow};
use crate::utils::time::{compute_window, shift_reference};
use chrono::{DateTime, TimeZone, Utc};
use std::fmt;

/// A display window together with the reference instant and style it was
/// derived from. Navigation returns new filters and never changes this one.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFilter<Z: TimeZone> {
    presentation_style: PresentationStyle,
    point_of_reference: DateTime<Utc>,
    window: TimeWindow,
    zone: Z,
}

impl<Z: TimeZone> QueryFilter<Z> {
    pub fn new(presentation_style: PresentationStyle, point_of_reference: DateTime<Utc>, zone: Z) -> Result<Self> {
        let window = compute_window(point_of_reference, presentation_style, &zone)?;
        Ok(Self {
            presentation_style,
            point_of_reference,
            window,
            zone,
        })
    }

    pub fn presentation_style(&self) -> PresentationStyle {
        self.presentation_style
    }

    pub fn point_of_reference(&self) -> DateTime<Utc> {
        self.point_of_reference
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn requested_start(&self) -> DateTime<Utc> {
        self.window.start
    }

    pub fn requested_end(&self) -> DateTime<Utc> {
        self.window.end
    }

    pub fn zone(&self) -> &Z {
        &self.zone
    }

    /// Label for the window as shown above a chart
    pub fn period_label(&self) -> String
    where
        Z::Offset: fmt::Display,
    {
        let start = self.window.start.with_timezone(&self.zone);
        let end = self.window.end.with_timezone(&self.zone);
        let reference = self.point_of_reference.with_timezone(&self.zone);

        match self.presentation_style {
            PresentationStyle::HalfHourlyDay => start.format("%Y-%m-%d").to_string(),
            PresentationStyle::SevenDayWeek => {
                format!("{} - {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
            }
            // The grid may start in the previous month, so label by the reference
            PresentationStyle::WeeksInMonth | PresentationStyle::ThirtyDayMonth => {
                reference.format("%B %Y").to_string()
            }
            PresentationStyle::TwelveMonthYear => start.format("%Y").to_string(),
        }
    }

    /// Whether stepping back one unit stays on or after `earliest_allowed`,
    /// typically the first instant the account has data for.
    pub fn can_step_backward(&self, earliest_allowed: DateTime<Utc>) -> bool {
        self.backward_point_of_reference()
            .is_some_and(|point| point >= earliest_allowed)
    }

    /// Whether stepping forward one unit stays at or before `now`.
    pub fn can_step_forward(&self, now: DateTime<Utc>) -> bool {
        self.forward_point_of_reference()
            .is_some_and(|point| point <= now)
    }

    /// Same as [`can_step_forward`](Self::can_step_forward) against the system clock.
    pub fn can_step_forward_live(&self) -> bool {
        self.can_step_forward(Utc::now())
    }

    /// Filter for the previous window, or `None` when that would go before
    /// `earliest_allowed`.
    pub fn step_backward(&self, earliest_allowed: DateTime<Utc>) -> Option<Self> {
        if !self.can_step_backward(earliest_allowed) {
            tracing::debug!(
                style = %self.presentation_style,
                reference = %self.point_of_reference,
                %earliest_allowed,
                "backward navigation disallowed"
            );
            return None;
        }

        self.backward_point_of_reference()
            .and_then(|point| self.rebuilt_at(point))
    }

    /// Filter for the next window, or `None` when its point of reference
    /// would be after `now`.
    pub fn step_forward(&self, now: DateTime<Utc>) -> Option<Self> {
        if !self.can_step_forward(now) {
            tracing::debug!(
                style = %self.presentation_style,
                reference = %self.point_of_reference,
                %now,
                "forward navigation disallowed"
            );
            return None;
        }

        self.forward_point_of_reference()
            .and_then(|point| self.rebuilt_at(point))
    }

    /// Same as [`step_forward`](Self::step_forward) against the system clock.
    pub fn step_forward_live(&self) -> Option<Self> {
        self.step_forward(Utc::now())
    }

    fn backward_point_of_reference(&self) -> Option<DateTime<Utc>> {
        shift_reference(
            self.point_of_reference,
            self.presentation_style,
            Direction::Backward,
            &self.zone,
        )
    }

    fn forward_point_of_reference(&self) -> Option<DateTime<Utc>> {
        shift_reference(
            self.point_of_reference,
            self.presentation_style,
            Direction::Forward,
            &self.zone,
        )
    }

    // Only fails at the edge of chrono's calendar, which is reported as a
    // disallowed step.
    fn rebuilt_at(&self, point_of_reference: DateTime<Utc>) -> Option<Self> {
        Self::new(self.presentation_style, point_of_reference, self.zone.clone()).ok()
    }
}
