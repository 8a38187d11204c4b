//! Tariff rate validity and price trend

pub mod dto;

use crate::error::{Error, Result};
use crate::types::{PaymentMethod, Trend};
use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// How far past the end of the active rate to look for its successor, so the
/// probe never lands on the shared boundary instant.
pub const TREND_PROBE_OFFSET: TimeDelta = TimeDelta::minutes(5);

/// A unit price and the period it applies to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateInterval {
    vat_exclusive_price: Decimal,
    vat_inclusive_price: Decimal,
    valid_from: DateTime<Utc>,
    /// `None` means the rate stays valid indefinitely
    valid_to: Option<DateTime<Utc>>,
    payment_method: PaymentMethod,
}

impl RateInterval {
    pub fn new(
        vat_exclusive_price: Decimal,
        vat_inclusive_price: Decimal,
        valid_from: DateTime<Utc>,
        valid_to: Option<DateTime<Utc>>,
        payment_method: PaymentMethod,
    ) -> Result<Self> {
        if let Some(valid_to) = valid_to {
            if valid_to < valid_from {
                return Err(Error::InvalidValidity { valid_from, valid_to });
            }
        }

        Ok(Self {
            vat_exclusive_price,
            vat_inclusive_price,
            valid_from,
            valid_to,
            payment_method,
        })
    }

    pub fn vat_exclusive_price(&self) -> Decimal {
        self.vat_exclusive_price
    }

    pub fn vat_inclusive_price(&self) -> Decimal {
        self.vat_inclusive_price
    }

    pub fn valid_from(&self) -> DateTime<Utc> {
        self.valid_from
    }

    pub fn valid_to(&self) -> Option<DateTime<Utc>> {
        self.valid_to
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn is_open_ended(&self) -> bool {
        self.valid_to.is_none()
    }

    /// Both ends of the validity period count as active
    pub fn is_active(&self, at: DateTime<Utc>) -> bool {
        let after_start = at >= self.valid_from;
        let before_end = self.valid_to.map_or(true, |valid_to| at <= valid_to);
        after_start && before_end
    }
}

/// Rates shown together under one heading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateGroup {
    pub title: String,
    pub rates: Vec<RateInterval>,
}

impl RateGroup {
    pub fn new(title: impl Into<String>, rates: Vec<RateInterval>) -> Self {
        Self {
            title: title.into(),
            rates,
        }
    }
}

/// First rate, in group order and then rate order, that is active at `at`.
/// Groups and rates are scanned as given, so the caller's ordering decides
/// which of several overlapping rates wins.
pub fn find_active_rate(groups: &[RateGroup], at: DateTime<Utc>) -> Option<&RateInterval> {
    groups
        .iter()
        .flat_map(|group| group.rates.iter())
        .find(|rate| rate.is_active(at))
}

/// Compare the active rate with the one that follows it.
///
/// An open-ended rate has no scheduled change and is `Steady`. Returns `None`
/// when there is no active rate or no rate covers the period after it.
pub fn classify_trend(groups: &[RateGroup], active_rate: Option<&RateInterval>) -> Option<Trend> {
    let active = active_rate?;

    let Some(valid_to) = active.valid_to else {
        return Some(Trend::Steady);
    };

    let probe = valid_to.checked_add_signed(TREND_PROBE_OFFSET)?;
    let Some(next) = find_active_rate(groups, probe) else {
        tracing::debug!(%probe, "no rate follows the active rate");
        return None;
    };

    let trend = match next.vat_inclusive_price.cmp(&active.vat_inclusive_price) {
        std::cmp::Ordering::Less => Trend::Down,
        std::cmp::Ordering::Equal => Trend::Steady,
        std::cmp::Ordering::Greater => Trend::Up,
    };

    tracing::trace!(
        current = %active.vat_inclusive_price,
        next = %next.vat_inclusive_price,
        %trend,
        "classified rate trend"
    );

    Some(trend)
}
