//! Command-line front end for options-quote
//!
//! Plays the part of the form: resolves settings from a saved file, the
//! command line, and defaults, runs one quote cycle, logs the filtered table
//! and writes the chart.

use chrono::NaiveDate;
use clap::Parser;
use options_quote::api::RestClient;
use options_quote::config::Config;
use options_quote::cycle::{run_cycle, QuoteReport};
use options_quote::error::Result;
use options_quote::models::{EnrichedContract, FilterRange};
use options_quote::settings::Settings;
use options_quote::utils::plot_option_quotes;
use std::path::PathBuf;
use tracing::{error, info};

/// Plot option premium/strike ratios for the nearest Friday expiration
#[derive(Parser, Debug)]
#[command(name = "options-quote", version, about)]
struct Cli {
    /// Stock ticker
    #[arg(long, short = 't')]
    ticker: Option<String>,

    /// As-of date (YYYY-MM-DD); the next Friday on or after it is used
    #[arg(long, short = 'd')]
    date: Option<NaiveDate>,

    /// Put range as % of stock price, MIN:MAX (bounds -50:10)
    #[arg(long, allow_hyphen_values = true)]
    put_range: Option<FilterRange>,

    /// Call range as % of stock price, MIN:MAX (bounds -10:50)
    #[arg(long, allow_hyphen_values = true)]
    call_range: Option<FilterRange>,

    /// Plot puts
    #[arg(long, overrides_with = "no_puts")]
    puts: bool,

    /// Do not plot puts
    #[arg(long, overrides_with = "puts")]
    no_puts: bool,

    /// Plot calls
    #[arg(long, overrides_with = "no_calls")]
    calls: bool,

    /// Do not plot calls
    #[arg(long, overrides_with = "calls")]
    no_calls: bool,

    /// Where form settings are loaded from and saved to
    #[arg(long, default_value = "options-quote.json")]
    settings: PathBuf,

    /// Start from the default settings instead of the saved ones
    #[arg(long)]
    reset: bool,

    /// Output chart path
    #[arg(long, short = 'o', default_value = "output/option_quotes.png")]
    output: PathBuf,

    /// Also print the filtered sides as tables
    #[cfg(feature = "dataframe")]
    #[arg(long)]
    table: bool,
}

impl Cli {
    fn apply(&self, mut settings: Settings) -> Settings {
        if self.reset {
            settings.reset();
        }
        if let Some(ticker) = &self.ticker {
            settings.ticker = ticker.clone();
        }
        if let Some(date) = self.date {
            settings.as_of = date;
        }
        if let Some(range) = self.put_range {
            settings.put_range = range;
        }
        if let Some(range) = self.call_range {
            settings.call_range = range;
        }
        if self.puts {
            settings.plot_puts = true;
        }
        if self.no_puts {
            settings.plot_puts = false;
        }
        if self.calls {
            settings.plot_calls = true;
        }
        if self.no_calls {
            settings.plot_calls = false;
        }
        settings
    }
}

fn log_side(side: &str, rows: &[EnrichedContract]) {
    info!("{} ({} rows)", side, rows.len());
    for row in rows {
        info!(
            "  {:<22} strike {:>9.2}  offset {:>7.2}%  bid {:>7.3}%  ask {:>7.3}%",
            row.contract.contract_symbol,
            row.strike(),
            row.incremental_percentage,
            row.bid_ratio,
            row.ask_ratio
        );
    }
}

fn log_report(report: &QuoteReport, settings: &Settings) {
    info!(
        "{} {} spot {:.2}",
        report.symbol, report.expiration, report.spot_price
    );
    if settings.plot_puts {
        log_side("Puts", &report.puts);
    }
    if settings.plot_calls {
        log_side("Calls", &report.calls);
    }
}

#[cfg(feature = "dataframe")]
fn print_tables(report: &QuoteReport, settings: &Settings) -> Result<()> {
    use options_quote::utils::polars_utils::report_tables;

    for (side, df) in report_tables(report, settings.plot_puts, settings.plot_calls)? {
        println!("{} {} {}\n{}", report.symbol, report.expiration, side, df);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;
    config.init_logging()?;

    let settings = cli.apply(Settings::load(&cli.settings)?).clamped()?;
    settings.save(&cli.settings)?;
    info!(
        "Ticker {} as of {}, puts {} calls {}",
        settings.ticker, settings.as_of, settings.put_range, settings.call_range
    );

    let provider = RestClient::new(config.alpaca.clone());
    let report = run_cycle(&provider, &settings).await?;
    log_report(&report, &settings);
    #[cfg(feature = "dataframe")]
    {
        if cli.table {
            print_tables(&report, &settings)?;
        }
    }

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    plot_option_quotes(&report, settings.plot_puts, settings.plot_calls, &cli.output)?;
    info!("Chart saved to {:?}", cli.output);

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{}", e);
        eprintln!("An error occurred: {}", e);
        std::process::exit(1);
    }
}
