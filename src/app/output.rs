use chrono::{DateTime, Utc};
use console::style;
use dialoguer::Confirm;
use tabled::{Table, Tabled, settings::Style};

use crate::app::dashboard::Confirmation;
use crate::view::alerts::{Alert, AlertLevel};
use crate::view::chart::MemoryChart;
use crate::view::details::AnalysisDetails;
use crate::view::map::MemoryMap;
use crate::view::pages::SelectOption;
use crate::view::table::ResultsTable;

#[derive(Tabled)]
struct ResultLine<'a> {
    #[tabled(rename = "ID")]
    id: &'a str,
    #[tabled(rename = "Name")]
    name: &'a str,
    #[tabled(rename = "Uploaded")]
    uploaded: &'a str,
    #[tabled(rename = "Format")]
    format_type: &'a str,
    #[tabled(rename = "RMSE (H)")]
    horizontal_rmse: &'a str,
    #[tabled(rename = "RMSE (V)")]
    vertical_rmse: &'a str,
    #[tabled(rename = "Points")]
    num_points: &'a str,
}

#[derive(Tabled)]
struct StationLine<'a> {
    #[tabled(rename = "ID")]
    id: &'a str,
    #[tabled(rename = "Station")]
    label: &'a str,
}

pub fn results_table(table: &ResultsTable) -> String {
    if table.rows.is_empty() {
        return "(no datasets)".to_string();
    }

    let lines = table.rows.iter().map(|row| ResultLine {
        id: row.dataset_id.as_str(),
        name: &row.name,
        uploaded: &row.uploaded,
        format_type: &row.format_type,
        horizontal_rmse: &row.horizontal_rmse,
        vertical_rmse: &row.vertical_rmse,
        num_points: &row.num_points,
    });
    Table::new(lines).with(Style::rounded()).to_string()
}

pub fn stations_table(options: &[SelectOption]) -> String {
    if options.is_empty() {
        return "(no base stations)".to_string();
    }

    let lines = options.iter().map(|option| StationLine {
        id: &option.value,
        label: &option.label,
    });
    Table::new(lines).with(Style::rounded()).to_string()
}

pub fn map_summary(map: &MemoryMap) -> String {
    let mut lines = vec![format!(
        "Map centred on ({}, {}) at zoom {}",
        map.view.center.latitude, map.view.center.longitude, map.view.zoom
    )];
    for marker in &map.markers {
        lines.push(format!(
            "  {} @ ({}, {}): {}",
            marker.title,
            marker.position.latitude,
            marker.position.longitude,
            marker.popup.join(", ")
        ));
    }
    lines.join("\n")
}

pub fn chart_summary(chart: &MemoryChart) -> String {
    let mut lines = vec!["Horizontal RMSE over time".to_string()];
    for series in &chart.series {
        for point in &series.points {
            let when = point
                .x
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "unknown time".to_string());
            lines.push(format!(
                "  {} {}: {when} -> {:.3} m",
                series.color, series.label, point.y
            ));
        }
    }
    lines.join("\n")
}

pub fn details_panel(details: &AnalysisDetails) -> String {
    [
        format!("Dataset {} ({})", details.dataset_name, details.dataset_id),
        "Horizontal".to_string(),
        format!("  RMSE: {}", details.horizontal.rmse),
        format!("  Std:  {}", details.horizontal.std),
        format!("  Mean: {}", details.horizontal.mean),
        format!("  Max:  {}", details.horizontal.max),
        format!("  Min:  {}", details.horizontal.min),
        "Vertical".to_string(),
        format!("  RMSE: {}", details.vertical.rmse),
        format!("  Std:  {}", details.vertical.std),
        format!("  Mean: {}", details.vertical.mean),
        format!("  Max:  {}", details.vertical.max),
        format!("  Min:  {}", details.vertical.min),
        "Reference position".to_string(),
        format!("  Latitude:  {}", details.latitude),
        format!("  Longitude: {}", details.longitude),
        format!("  Altitude:  {}", details.altitude),
        format!("  Mode:      {}", details.reference_mode),
    ]
    .join("\n")
}

pub fn print_alerts(alerts: &[Alert]) {
    for alert in alerts {
        match alert.level {
            AlertLevel::Success => println!("{} {}", style("✓").green().bold(), alert.message),
            AlertLevel::Info => println!("{} {}", style("ℹ").blue().bold(), alert.message),
            AlertLevel::Warning => eprintln!("{} {}", style("⚠").yellow().bold(), alert.message),
            AlertLevel::Danger => eprintln!("{} {}", style("✗").red().bold(), alert.message),
        }
    }
}

/// Asks on the terminal unless `assume_yes` is set. A prompt that cannot be shown
/// counts as a refusal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirmation {
    pub assume_yes: bool,
}

impl Confirmation for TerminalConfirmation {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or_else(|error| {
                tracing::warn!(error = %error, "confirmation prompt unavailable");
                false
            })
    }
}
