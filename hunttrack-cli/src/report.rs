//! Console rendering for ledger views.
use chrono::NaiveDate;
use colored::Colorize;

use hunttrack_core::{
    BossDropRecord, DaySummary, GoalConfig, GoalProgress, HuntRecord, format_duration,
};

const BAR_WIDTH: usize = 40;

pub fn print_hunts_table(records: &[HuntRecord], caption: &str) {
    println!("{}", caption.cyan());
    if records.is_empty() {
        println!("No hunts recorded for this view.");
        return;
    }

    let loc_width = column_width("Location", records.iter().map(|r| r.location.len()));
    println!(
        "{:<10}  {:<loc_width$}  {:>9}  {:>12}  {:>6}  Notes",
        "Date", "Location", "Duration", "Profit", "Levels"
    );
    for record in records {
        println!(
            "{:<10}  {:<loc_width$}  {:>9}  {:>12}  {:>6}  {}",
            record.date.to_string(),
            record.location,
            format_duration(record.duration_minutes),
            format_gp(record.profit),
            record.levels_gained,
            record.notes
        );
    }
    println!("{} hunt(s)", records.len());
}

pub fn print_drops_table(records: &[BossDropRecord], caption: &str) {
    println!("{}", caption.cyan());
    if records.is_empty() {
        println!("No drops recorded for this view.");
        return;
    }

    let boss_width = column_width("Boss", records.iter().map(|r| r.boss.len()));
    let item_width = column_width("Item", records.iter().map(|r| r.item.len()));
    println!(
        "{:<10}  {:<boss_width$}  {:<item_width$}  {:>12}  Notes",
        "Date", "Boss", "Item", "Value"
    );
    for record in records {
        println!(
            "{:<10}  {:<boss_width$}  {:<item_width$}  {:>12}  {}",
            record.date.to_string(),
            record.boss,
            record.item,
            format_gp(record.value),
            record.notes
        );
    }
    println!("{} drop(s)", records.len());
}

pub fn print_day_summary(summary: &DaySummary) {
    println!(
        "On {} you played for {} across {} session(s) and accumulated {} GP.",
        summary.date.to_string().bold(),
        format_duration(summary.total_minutes),
        summary.sessions,
        format_gp(summary.total_profit).green()
    );
}

pub fn print_level(current: i64, timeline: &[(NaiveDate, i64)]) {
    println!(
        "{} {}",
        "Current level:".bold(),
        current.to_string().bright_yellow()
    );
    for (date, level) in timeline {
        println!("  {date}  level {level}");
    }
}

pub fn print_progress(progress: &GoalProgress, cfg: &GoalConfig) {
    println!("{}", "💸 Investment Progress".bright_cyan().bold());
    println!("{}", "======================".cyan());
    println!("Initial investment: {}", format_money(cfg.initial_investment));
    println!("Final goal:         {}", format_money(cfg.final_goal));
    println!(
        "Hunt profit:        {} GP",
        format_gp(progress.totals.hunt_total)
    );
    println!(
        "Boss drops:         {} GP",
        format_gp(progress.totals.drop_total)
    );
    println!(
        "Grand total:        {} GP",
        format_gp(progress.totals.grand_total)
    );
    println!(
        "Estimated value:    {}",
        format_money(progress.estimated_value).green()
    );
    println!("Goal progress:      {:.2}%", progress.percent);
    println!("{}", render_bar(progress.percent_clamped));
}

fn column_width(header: &str, values: impl Iterator<Item = usize>) -> usize {
    values.fold(header.len(), usize::max)
}

fn format_money(value: f64) -> String {
    format!("R$ {value:.2}")
}

/// Group an amount with thousands separators, the way the history table
/// shows GP values.
pub fn format_gp(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Fixed-width text progress bar driven by the clamped percentage.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn render_bar(percent_clamped: f64) -> String {
    let filled = ((percent_clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_gp_groups_thousands() {
        assert_eq!(format_gp(0), "0");
        assert_eq!(format_gp(999), "999");
        assert_eq!(format_gp(1_234), "1,234");
        assert_eq!(format_gp(40_000), "40,000");
        assert_eq!(format_gp(1_000_000), "1,000,000");
        assert_eq!(format_gp(-36_500), "-36,500");
    }

    #[test]
    fn render_bar_scales_with_the_clamped_percentage() {
        assert_eq!(render_bar(0.0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(render_bar(100.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(render_bar(50.0).matches('#').count(), BAR_WIDTH / 2);
    }
}
