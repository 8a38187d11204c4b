//! Output formatting utilities

use crate::query::QueryFilter;
use crate::rates::RateInterval;
use crate::types::{OutputFormat, PresentationStyle, Trend};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

/// Rows that can be written as CSV
pub trait CsvRow {
    const HEADER: &'static str;

    fn csv_fields(&self) -> Vec<String>;
}

/// Format an instant in the given zone, keeping sub-second precision
pub fn format_local<Z: TimeZone>(instant: DateTime<Utc>, zone: &Z) -> String
where
    Z::Offset: fmt::Display,
{
    instant
        .with_timezone(zone)
        .to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// A display window with boundaries in local time
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct WindowReport {
    #[tabled(rename = "Style")]
    pub style: PresentationStyle,
    #[tabled(rename = "Period")]
    pub period: String,
    #[tabled(rename = "Reference")]
    pub point_of_reference: String,
    #[tabled(rename = "Start")]
    pub start: String,
    #[tabled(rename = "End")]
    pub end: String,
}

impl WindowReport {
    pub fn from_filter<Z: TimeZone>(filter: &QueryFilter<Z>) -> Self
    where
        Z::Offset: fmt::Display,
    {
        Self {
            style: filter.presentation_style(),
            period: filter.period_label(),
            point_of_reference: format_local(filter.point_of_reference(), filter.zone()),
            start: format_local(filter.requested_start(), filter.zone()),
            end: format_local(filter.requested_end(), filter.zone()),
        }
    }
}

impl CsvRow for WindowReport {
    const HEADER: &'static str = "Style,Period,Reference,Start,End";

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.style.to_string(),
            self.period.clone(),
            self.point_of_reference.clone(),
            self.start.clone(),
            self.end.clone(),
        ]
    }
}

/// The active rate and where its price is heading
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct RateReport {
    #[tabled(rename = "Inc VAT")]
    pub vat_inclusive_price: Decimal,
    #[tabled(rename = "Exc VAT")]
    pub vat_exclusive_price: Decimal,
    #[tabled(rename = "Valid From")]
    pub valid_from: String,
    #[tabled(rename = "Valid To", display_with = "display_valid_to")]
    pub valid_to: Option<String>,
    #[tabled(rename = "Payment")]
    pub payment_method: String,
    #[tabled(rename = "Trend", display_with = "display_trend")]
    pub trend: Option<Trend>,
}

impl RateReport {
    pub fn new<Z: TimeZone>(rate: &RateInterval, trend: Option<Trend>, zone: &Z) -> Self
    where
        Z::Offset: fmt::Display,
    {
        Self {
            vat_inclusive_price: rate.vat_inclusive_price(),
            vat_exclusive_price: rate.vat_exclusive_price(),
            valid_from: format_local(rate.valid_from(), zone),
            valid_to: rate.valid_to().map(|to| format_local(to, zone)),
            payment_method: rate.payment_method().to_string(),
            trend,
        }
    }
}

impl CsvRow for RateReport {
    const HEADER: &'static str = "Inc VAT,Exc VAT,Valid From,Valid To,Payment,Trend";

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.vat_inclusive_price.to_string(),
            self.vat_exclusive_price.to_string(),
            self.valid_from.clone(),
            self.valid_to.clone().unwrap_or_default(),
            self.payment_method.clone(),
            self.trend.map(|t| t.to_string()).unwrap_or_default(),
        ]
    }
}

/// Both roundings of one value
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct RoundingReport {
    #[tabled(rename = "Value")]
    pub value: Decimal,
    #[tabled(rename = "Billing (half to even)")]
    pub nearest_even_hundredth: Decimal,
    #[tabled(rename = "Display (half up)")]
    pub two_decimal_places: Decimal,
}

impl CsvRow for RoundingReport {
    const HEADER: &'static str = "Value,Billing,Display";

    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.value.to_string(),
            self.nearest_even_hundredth.to_string(),
            self.two_decimal_places.to_string(),
        ]
    }
}

/// A presentation style and how it maps onto the API
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct StyleReport {
    #[tabled(rename = "Style")]
    pub style: PresentationStyle,
    #[tabled(rename = "Step")]
    pub step: &'static str,
    #[tabled(rename = "API Grouping")]
    pub grouping: String,
}

impl StyleReport {
    pub fn new(style: PresentationStyle) -> Self {
        let step = match style {
            PresentationStyle::HalfHourlyDay => "1 day",
            PresentationStyle::SevenDayWeek => "1 week",
            PresentationStyle::WeeksInMonth | PresentationStyle::ThirtyDayMonth => "1 month",
            PresentationStyle::TwelveMonthYear => "1 year",
        };
        Self {
            style,
            step,
            grouping: style.data_grouping().to_string(),
        }
    }
}

impl CsvRow for StyleReport {
    const HEADER: &'static str = "Style,Step,API Grouping";

    fn csv_fields(&self) -> Vec<String> {
        vec![self.style.to_string(), self.step.to_string(), self.grouping.clone()]
    }
}

fn display_valid_to(valid_to: &Option<String>) -> String {
    match valid_to {
        Some(to) => to.clone(),
        None => "open-ended".dimmed().to_string(),
    }
}

/// Trend with color: rising prices in red, falling in green
pub fn display_trend(trend: &Option<Trend>) -> String {
    match trend {
        Some(Trend::Up) => "▲ Up".red().to_string(),
        Some(Trend::Down) => "▼ Down".green().to_string(),
        Some(Trend::Steady) => "► Steady".blue().to_string(),
        None => "-".dimmed().to_string(),
    }
}

/// Format rows as a table
pub fn format_table<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::single(0)).with(Alignment::left()))
        .to_string()
}

/// Format rows as JSON
pub fn format_json<T: Serialize>(rows: &[T]) -> String {
    serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string())
}

/// Format rows as CSV
pub fn format_csv<T: CsvRow>(rows: &[T]) -> String {
    let mut output = String::from(T::HEADER);
    output.push('\n');

    for row in rows {
        let fields: Vec<String> = row.csv_fields().iter().map(|f| escape_csv(f)).collect();
        output.push_str(&fields.join(","));
        output.push('\n');
    }

    output
}

/// Format rows in the requested output format
pub fn render<T: Tabled + Serialize + CsvRow>(rows: Vec<T>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => format_table(rows),
        OutputFormat::Json => format_json(&rows),
        OutputFormat::Csv => format_csv(&rows),
    }
}

fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Print banner
pub fn print_banner() {
    println!();
    println!("{}", "  tariff-lens - Energy Usage Windows & Tariff Rates".cyan().bold());
    println!();
}
