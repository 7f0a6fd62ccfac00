mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use hunttrack_core::{
    BossDropRecord, BossFilter, CsvStore, DropLedger, GoalConfig, HuntLedger, HuntRecord,
    WeekStart, boss_names, constants, current_level, day_summary, filter_by_boss, filter_by_day,
    filter_by_week, goal_progress, level_timeline, parse_input_date, sorted_by_date, top_by_value,
    week_bounds,
};

type FileHuntLedger = HuntLedger<CsvStore<HuntRecord>>;
type FileDropLedger = DropLedger<CsvStore<BossDropRecord>>;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WeekStartArg {
    /// Sunday-to-Saturday weeks
    Sunday,
    /// Monday-to-Sunday weeks
    Monday,
}

impl From<WeekStartArg> for WeekStart {
    fn from(value: WeekStartArg) -> Self {
        match value {
            WeekStartArg::Sunday => WeekStart::Sunday,
            WeekStartArg::Monday => WeekStart::Monday,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "hunttrack", version)]
#[command(about = "Hunt and boss-drop tracker - session ledger, weekly views, and goal progress")]
struct Args {
    /// Directory holding the hunt and drop stores
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// First day of the calendar week for weekly views
    #[arg(long, value_enum, default_value_t = WeekStartArg::Sunday)]
    week_start: WeekStartArg,

    /// Emit machine-readable JSON instead of tables
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Record a new hunt session
    AddHunt {
        /// Session date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Where the session took place
        #[arg(long)]
        location: String,
        /// Session length in minutes
        #[arg(long)]
        minutes: i64,
        /// Profit in GP gained during the session
        #[arg(long)]
        profit: i64,
        /// Levels gained during the session (0 when none)
        #[arg(long, default_value_t = 0)]
        levels: i64,
        /// Free-text notes
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Record a new boss drop
    AddDrop {
        /// Drop date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Boss that dropped the item
        #[arg(long)]
        boss: String,
        /// Item that dropped
        #[arg(long)]
        item: String,
        /// Item value in GP
        #[arg(long)]
        value: i64,
        /// Free-text notes
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Show the hunt history (current week by default)
    Hunts {
        /// Show every recorded hunt instead of the current week
        #[arg(long)]
        all: bool,
        /// Restrict the table to a single day (YYYY-MM-DD)
        #[arg(long)]
        day: Option<String>,
    },
    /// Show recorded boss drops
    Drops {
        /// Exact boss name to filter on
        #[arg(long)]
        boss: Option<String>,
        /// Rank the N most valuable drops instead of listing chronologically
        #[arg(long)]
        top: Option<usize>,
    },
    /// Summarize one day's play time and profit
    Day {
        /// Day to summarize (YYYY-MM-DD)
        date: String,
    },
    /// Show the character level and its timeline
    Level,
    /// Show goal progress derived from both ledgers
    Progress,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let hunt_ledger =
        HuntLedger::new(CsvStore::new(args.data_dir.join(constants::HUNT_STORE_FILE)));
    let drop_ledger =
        DropLedger::new(CsvStore::new(args.data_dir.join(constants::DROP_STORE_FILE)));
    let week_start = WeekStart::from(args.week_start);

    match args.command {
        Command::AddHunt {
            date,
            location,
            minutes,
            profit,
            levels,
            notes,
        } => add_hunt(&hunt_ledger, &date, location, minutes, profit, levels, notes),
        Command::AddDrop {
            date,
            boss,
            item,
            value,
            notes,
        } => add_drop(&drop_ledger, &date, boss, item, value, notes),
        Command::Hunts { all, day } => {
            show_hunts(&hunt_ledger, all, day.as_deref(), week_start, args.json)
        }
        Command::Drops { boss, top } => show_drops(&drop_ledger, boss, top, args.json),
        Command::Day { date } => show_day(&hunt_ledger, &date, args.json),
        Command::Level => show_level(&hunt_ledger, args.json),
        Command::Progress => show_progress(&hunt_ledger, &drop_ledger, args.json),
    }
}

fn add_hunt(
    ledger: &FileHuntLedger,
    date: &str,
    location: String,
    minutes: i64,
    profit: i64,
    levels: i64,
    notes: String,
) -> Result<()> {
    let record = HuntRecord {
        date: parse_input_date(date)?,
        location,
        duration_minutes: minutes,
        profit,
        levels_gained: levels,
        notes,
    };
    let updated = ledger.append(record).context("recording hunt")?;
    log::info!("hunt store now holds {} records", updated.len());
    println!("{} Hunt recorded ({} total).", "✅".green(), updated.len());
    Ok(())
}

fn add_drop(
    ledger: &FileDropLedger,
    date: &str,
    boss: String,
    item: String,
    value: i64,
    notes: String,
) -> Result<()> {
    let record = BossDropRecord {
        date: parse_input_date(date)?,
        boss,
        item,
        value,
        notes,
    };
    let updated = ledger.append(record).context("recording boss drop")?;
    log::info!("drop store now holds {} records", updated.len());
    println!("{} Boss drop recorded ({} total).", "✅".green(), updated.len());
    Ok(())
}

fn show_hunts(
    ledger: &FileHuntLedger,
    all: bool,
    day: Option<&str>,
    week_start: WeekStart,
    json: bool,
) -> Result<()> {
    let records = ledger.load().context("loading hunt store")?;
    let (view, caption) = if let Some(day) = day {
        let day = parse_input_date(day)?;
        (filter_by_day(&records, day), format!("Hunts on {day}"))
    } else if all {
        (records, "All recorded hunts".to_string())
    } else {
        let today = Local::now().date_naive();
        let (start, end) = week_bounds(today, week_start);
        (
            filter_by_week(&records, today, week_start),
            format!("Hunts from {start} to {end}"),
        )
    };

    let view = sorted_by_date(&view);
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        report::print_hunts_table(&view, &caption);
    }
    Ok(())
}

fn show_drops(
    ledger: &FileDropLedger,
    boss: Option<String>,
    top: Option<usize>,
    json: bool,
) -> Result<()> {
    let records = ledger.load().context("loading drop store")?;
    let filter = BossFilter::from_option(boss);
    let mut view = filter_by_boss(&records, &filter);
    let caption = match (&filter, top) {
        (BossFilter::All, None) => "All recorded boss drops".to_string(),
        (BossFilter::All, Some(n)) => format!("Top {n} boss drops by value"),
        (BossFilter::Name(name), None) => format!("Drops from {name}"),
        (BossFilter::Name(name), Some(n)) => format!("Top {n} drops from {name}"),
    };
    if let Some(n) = top {
        view = top_by_value(&view, n);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }
    report::print_drops_table(&view, &caption);
    if matches!(filter, BossFilter::All) {
        let names = boss_names(&records);
        if !names.is_empty() {
            println!("Known bosses: {}", names.join(", "));
        }
    }
    Ok(())
}

fn show_day(ledger: &FileHuntLedger, date: &str, json: bool) -> Result<()> {
    let day = parse_input_date(date)?;
    let records = ledger.load().context("loading hunt store")?;
    let summary = day_summary(&records, day);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    match summary {
        Some(summary) => report::print_day_summary(&summary),
        None => println!("No hunts recorded on {day}."),
    }
    Ok(())
}

fn show_level(ledger: &FileHuntLedger, json: bool) -> Result<()> {
    let records = ledger.load().context("loading hunt store")?;
    let level = current_level(&records, constants::DEFAULT_INITIAL_LEVEL);
    let timeline = level_timeline(&records, constants::DEFAULT_INITIAL_LEVEL);

    if json {
        let payload = serde_json::json!({
            "current_level": level,
            "timeline": timeline,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        report::print_level(level, &timeline);
    }
    Ok(())
}

fn show_progress(hunts: &FileHuntLedger, drops: &FileDropLedger, json: bool) -> Result<()> {
    let hunt_records = hunts.load().context("loading hunt store")?;
    let drop_records = drops.load().context("loading drop store")?;
    let cfg = GoalConfig::default();
    let progress = goal_progress(&hunt_records, &drop_records, &cfg)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&progress)?);
    } else {
        report::print_progress(&progress, &cfg);
    }
    Ok(())
}
