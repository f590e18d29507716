use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Args;

use daypulse_core::stats;
use daypulse_core::{Config, DateRange, JsonStore, ScoreEngine, Snapshot, Summarizer};

#[derive(Args)]
pub struct SummaryArgs {
    /// Path to the snapshot store (JSON)
    #[arg(long)]
    pub store: PathBuf,
    /// User id to summarize
    #[arg(long)]
    pub user: u64,
    /// Start date (YYYY-MM-DD); defaults to the configured window before end
    #[arg(long)]
    pub start: Option<NaiveDate>,
    /// End date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub end: Option<NaiveDate>,
    /// Skip the external model and print the rule-based report only
    #[arg(long)]
    pub local: bool,
}

pub fn run(args: SummaryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = JsonStore::open(&args.store)?;
    let snapshot = Snapshot::load(&store, args.user)?;
    for reason in snapshot.degradation_reasons() {
        eprintln!("warning: {reason}; scoring without goal factors");
    }

    let today = Local::now().date_naive();
    let range = DateRange::resolve_with_window(args.start, args.end, today, config.score.window_days);
    let series = ScoreEngine::new().calculate_scores(&snapshot, range);

    if args.local {
        println!("{}", stats::local_report(&range, &series));
        return Ok(());
    }

    let summarizer = Summarizer::new(config.summary.clone());
    let runtime = tokio::runtime::Runtime::new()?;
    let summary = runtime.block_on(summarizer.summarize(&range, &series));
    println!("{summary}");
    Ok(())
}
