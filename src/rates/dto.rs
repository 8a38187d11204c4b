//! Wire format of the tariff API's unit-rate listings

use super::{RateGroup, RateInterval};
use crate::error::Result;
use crate::types::PaymentMethod;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One page of a unit-rate listing
#[derive(Debug, Deserialize)]
pub struct StandardUnitRatesApiResponse {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<RateDto>,
}

#[derive(Debug, Deserialize)]
pub struct RateDto {
    #[serde(with = "rust_decimal::serde::float")]
    pub value_exc_vat: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub value_inc_vat: Decimal,
    pub valid_from: DateTime<Utc>,
    /// Absent or `null` when the rate has no scheduled end
    #[serde(default)]
    pub valid_to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

impl RateDto {
    pub fn to_rate(&self) -> Result<RateInterval> {
        RateInterval::new(
            self.value_exc_vat,
            self.value_inc_vat,
            self.valid_from,
            self.valid_to,
            self.payment_method.unwrap_or_default(),
        )
    }
}

impl StandardUnitRatesApiResponse {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert every result, keeping the API's order
    pub fn to_rate_group(&self, title: impl Into<String>) -> Result<RateGroup> {
        let rates = self
            .results
            .iter()
            .map(RateDto::to_rate)
            .collect::<Result<Vec<_>>>()?;
        Ok(RateGroup::new(title, rates))
    }
}

/// Read a saved rate listing. The group is titled with the file name
/// without its extension.
pub fn load_rate_group(path: &Path) -> Result<RateGroup> {
    let content = fs::read_to_string(path)?;
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    StandardUnitRatesApiResponse::from_json(&content)?.to_rate_group(title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"{
        "count": 2,
        "next": null,
        "previous": null,
        "results": [
            {
                "value_exc_vat": 23.4,
                "value_inc_vat": 24.57,
                "valid_from": "2024-05-01T00:00:00Z",
                "valid_to": null,
                "payment_method": "DIRECT_DEBIT"
            },
            {
                "value_exc_vat": 25.0,
                "value_inc_vat": 26.25,
                "valid_from": "2024-04-01T00:00:00+01:00",
                "valid_to": "2024-05-01T00:00:00Z",
                "payment_method": null
            }
        ]
    }"#;

    #[test]
    fn decodes_rates_in_api_order() {
        let group = StandardUnitRatesApiResponse::from_json(SAMPLE)
            .unwrap()
            .to_rate_group("Electricity")
            .unwrap();

        assert_eq!(group.title, "Electricity");
        assert_eq!(group.rates.len(), 2);

        let first = &group.rates[0];
        assert_eq!(first.vat_exclusive_price(), dec!(23.4));
        assert_eq!(first.vat_inclusive_price(), dec!(24.57));
        assert_eq!(first.valid_to(), None);
        assert_eq!(first.payment_method(), PaymentMethod::DirectDebit);

        let second = &group.rates[1];
        assert_eq!(second.valid_from(), Utc.with_ymd_and_hms(2024, 3, 31, 23, 0, 0).unwrap());
        assert_eq!(second.payment_method(), PaymentMethod::Unspecified);
    }

    #[test]
    fn missing_valid_to_means_open_ended() {
        let json = r#"{"count":1,"next":null,"previous":null,"results":[
            {"value_exc_vat":1.0,"value_inc_vat":1.05,"valid_from":"2024-01-01T00:00:00Z"}
        ]}"#;
        let group = StandardUnitRatesApiResponse::from_json(json)
            .unwrap()
            .to_rate_group("Gas")
            .unwrap();

        assert!(group.rates[0].is_open_ended());
    }

    #[test]
    fn inverted_validity_is_rejected() {
        let json = r#"{"count":1,"next":null,"previous":null,"results":[
            {"value_exc_vat":1.0,"value_inc_vat":1.05,
             "valid_from":"2024-02-01T00:00:00Z","valid_to":"2024-01-01T00:00:00Z"}
        ]}"#;
        let err = StandardUnitRatesApiResponse::from_json(json)
            .unwrap()
            .to_rate_group("Gas")
            .unwrap_err();

        assert!(matches!(err, Error::InvalidValidity { .. }));
    }

    #[test]
    fn prices_keep_their_listed_digits() {
        let json = r#"{"count":1,"next":null,"previous":null,"results":[
            {"value_exc_vat":16.4955,"value_inc_vat":17.320275,"valid_from":"2024-01-01T00:00:00Z"}
        ]}"#;
        let response = StandardUnitRatesApiResponse::from_json(json).unwrap();

        assert_eq!(response.results[0].value_exc_vat, dec!(16.4955));
        assert_eq!(response.results[0].value_inc_vat, dec!(17.320275));
    }

    #[test]
    fn string_price_is_a_decode_error() {
        let json = r#"{"count":1,"next":null,"previous":null,"results":[
            {"value_exc_vat":"cheap","value_inc_vat":1.05,"valid_from":"2024-01-01T00:00:00Z"}
        ]}"#;
        assert!(matches!(StandardUnitRatesApiResponse::from_json(json), Err(Error::Decode(_))));
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        let err = StandardUnitRatesApiResponse::from_json("{\"results\": 3}").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
