use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Args;

use daypulse_core::{Config, DateRange, JsonStore, ScoreEngine, Snapshot};

#[derive(Args)]
pub struct ScoreArgs {
    /// Path to the snapshot store (JSON)
    #[arg(long)]
    pub store: PathBuf,
    /// User id to score
    #[arg(long)]
    pub user: u64,
    /// Start date (YYYY-MM-DD); defaults to the configured window before end
    #[arg(long)]
    pub start: Option<NaiveDate>,
    /// End date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub end: Option<NaiveDate>,
    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = JsonStore::open(&args.store)?;
    let snapshot = Snapshot::load(&store, args.user)?;
    for reason in snapshot.degradation_reasons() {
        eprintln!("warning: {reason}; scoring without goal factors");
    }

    let today = Local::now().date_naive();
    let range = DateRange::resolve_with_window(args.start, args.end, today, config.score.window_days);
    let series = ScoreEngine::new().calculate_scores(&snapshot, range);

    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&series)?);
    } else {
        println!("{}", serde_json::to_string(&series)?);
    }
    Ok(())
}
