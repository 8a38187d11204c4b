//! Error type shared by the calendar, navigation and rate modules

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown presentation style: {0}")]
    UnknownPresentationStyle(String),

    /// A rate interval whose end precedes its start
    #[error("rate validity ends at {valid_to} before it starts at {valid_from}")]
    InvalidValidity {
        valid_from: DateTime<Utc>,
        valid_to: DateTime<Utc>,
    },

    #[error("local time {0} cannot be resolved in the requested time zone")]
    UnresolvableLocalTime(NaiveDateTime),

    #[error("date arithmetic left the supported calendar range")]
    OutOfRange,

    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("failed to read rate file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode rate payload: {0}")]
    Decode(#[from] serde_json::Error),
}
