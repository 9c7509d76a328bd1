//! Command-line interface for the stock research pipeline

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;
use tracing::info;

use stock_research::api::yahoo::range_bounds;
use stock_research::{ResearchConfig, ResearchPipeline, report};

#[derive(Parser, Debug)]
#[command(name = "stock-research")]
#[command(about = "Generate a technical, fundamental and news research report for a stock", long_about = None)]
struct Args {
    /// Ticker symbol, e.g. RELIANCE.NS
    symbol: String,

    /// History range (1mo, 3mo, 6mo, 1y, 2y, 5y, ytd, max)
    #[arg(short, long)]
    range: Option<String>,

    /// Explicit history start date (YYYY-MM-DD), overrides --range
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Explicit history end date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    end: Option<NaiveDate>,

    /// File to write the report to
    #[arg(short, long, default_value = "final_report.md")]
    output: String,
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .unwrap_or_else(|| unreachable!())
        .and_utc()
}

fn history_bounds(args: &Args, config: &ResearchConfig) -> anyhow::Result<(DateTime<Utc>, DateTime<Utc>)> {
    if let Some(start) = args.start {
        let end = args.end.map_or_else(Utc::now, start_of_day);
        anyhow::ensure!(start_of_day(start) < end, "start date must precede end date");
        return Ok((start_of_day(start), end));
    }

    let range = args.range.as_deref().unwrap_or(&config.default_range);
    Ok(range_bounds(range)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stock_research::init_tracing();

    let args = Args::parse();

    let config = ResearchConfig::default();
    config.validate()?;

    let (start, end) = history_bounds(&args, &config)?;
    info!(symbol = %args.symbol, %start, %end, "starting research run");

    let pipeline = ResearchPipeline::with_default_clients(config);
    let bundle = pipeline.run(&args.symbol, start, end).await;

    let text = report::compile(&bundle);
    std::fs::write(&args.output, &text)
        .with_context(|| format!("failed to write report to {}", args.output))?;

    println!("{text}");
    info!(path = %args.output, "report written");

    Ok(())
}
