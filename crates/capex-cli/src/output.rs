//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints rows based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
    }
}

/// Prints data as a formatted table.
pub fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints rows as CSV.
pub fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Formats a currency amount with two decimals.
pub fn money(value: &f64) -> String {
    format!("{:.2}", value)
}

/// Formats a percentage value (already in percent).
pub fn percent(value: &f64) -> String {
    format!("{:.2}%", value)
}

/// Formats a score.
pub fn score(value: &f64) -> String {
    format!("{:.2}", value)
}

/// Formats a payback period; 99 means never.
pub fn years(value: &f64) -> String {
    if *value >= capex_analytics::NEVER_PAYS_BACK {
        "never".to_string()
    } else {
        format!("{:.2}", value)
    }
}

/// Formats a boolean as yes/no.
pub fn yes_no(value: &bool) -> String {
    if *value { "yes" } else { "no" }.to_string()
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair from an amount.
    pub fn money(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, money(&value))
    }

    /// Creates a key-value pair formatted as percentage.
    pub fn percent(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, percent(&value))
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
