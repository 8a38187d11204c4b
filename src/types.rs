//! Core types for tariff-lens

use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display granularity selecting how a window's boundaries are computed
/// and how far one navigation step moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PresentationStyle {
    /// One local day, shown as half-hourly readings
    HalfHourlyDay,
    /// Sunday to Saturday
    SevenDayWeek,
    /// Whole Sunday-to-Saturday weeks covering a calendar month
    WeeksInMonth,
    /// One calendar month, shown day by day
    ThirtyDayMonth,
    /// January to December
    TwelveMonthYear,
}

impl PresentationStyle {
    pub const ALL: [PresentationStyle; 5] = [
        PresentationStyle::HalfHourlyDay,
        PresentationStyle::SevenDayWeek,
        PresentationStyle::WeeksInMonth,
        PresentationStyle::ThirtyDayMonth,
        PresentationStyle::TwelveMonthYear,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PresentationStyle::HalfHourlyDay => "half-hourly-day",
            PresentationStyle::SevenDayWeek => "seven-day-week",
            PresentationStyle::WeeksInMonth => "weeks-in-month",
            PresentationStyle::ThirtyDayMonth => "thirty-day-month",
            PresentationStyle::TwelveMonthYear => "twelve-month-year",
        }
    }

    /// The consumption API groups readings differently from how they are
    /// displayed. This maps to the grouping the API expects.
    pub fn data_grouping(&self) -> DataGrouping {
        match self {
            PresentationStyle::HalfHourlyDay => DataGrouping::HalfHourly,
            PresentationStyle::SevenDayWeek => DataGrouping::Day,
            PresentationStyle::WeeksInMonth => DataGrouping::Week,
            PresentationStyle::ThirtyDayMonth => DataGrouping::Day,
            PresentationStyle::TwelveMonthYear => DataGrouping::Month,
        }
    }
}

impl fmt::Display for PresentationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PresentationStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        PresentationStyle::ALL
            .into_iter()
            .find(|style| style.name() == wanted)
            .ok_or_else(|| Error::UnknownPresentationStyle(s.to_string()))
    }
}

/// Aggregation level requested from the consumption API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataGrouping {
    HalfHourly,
    Day,
    Week,
    Month,
}

impl fmt::Display for DataGrouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataGrouping::HalfHourly => write!(f, "Half-hourly"),
            DataGrouping::Day => write!(f, "Day"),
            DataGrouping::Week => write!(f, "Week"),
            DataGrouping::Month => write!(f, "Month"),
        }
    }
}

/// Inclusive time range of a display window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        time >= self.start && time <= self.end
    }
}

/// Direction of a navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

/// Price movement from the active rate to the one that follows it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Steady,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "Up"),
            Trend::Down => write!(f, "Down"),
            Trend::Steady => write!(f, "Steady"),
        }
    }
}

/// Payment method a rate applies to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    DirectDebit,
    NonDirectDebit,
    /// The tariff API sends `null` when a rate applies to every method
    #[default]
    Unspecified,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::DirectDebit => write!(f, "Direct Debit"),
            PaymentMethod::NonDirectDebit => write!(f, "Non Direct Debit"),
            PaymentMethod::Unspecified => write!(f, "-"),
        }
    }
}

/// CLI output format
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}
