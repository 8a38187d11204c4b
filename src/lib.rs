//! tariff-lens - display windows, navigation bounds, active tariff rates and
//! billing rounding for household energy usage

pub mod error;
pub mod query;
pub mod rates;
pub mod types;
pub mod utils;

pub use error::{Error, Result};
pub use query::QueryFilter;
pub use rates::{classify_trend, find_active_rate, RateGroup, RateInterval};
pub use types::{DataGrouping, Direction, PaymentMethod, PresentationStyle, TimeWindow, Trend};
pub use utils::rounding::{billable_cost, round_to_nearest_even_hundredth, round_to_two_decimal_places};
pub use utils::time::{compute_window, parse_zone, resolve_local, shift_reference};
