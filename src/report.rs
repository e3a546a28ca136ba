//! The analysis pipeline: read, extract, chart, export.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::chart::{self, ChartData};
use crate::config::{Config, DisplayMode};
use crate::error::AnalyzerError;
use crate::export::write_csv;
use crate::extract::TradeExtractor;
use crate::reader::read_lines;
use crate::table::TradeTable;
use crate::ui;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing in the log matched; no charts, no CSV.
    NoTrades,
    Exported { count: usize, output: PathBuf },
}

pub fn run(config: &Config) -> Result<Outcome, AnalyzerError> {
    info!(input = %config.input.display(), "reading trade log");
    let lines = read_lines(&config.input)?;

    let table = TradeTable::from_lines(&TradeExtractor::new(), &lines)?;

    if table.is_empty() {
        warn!(lines = lines.len(), "no trades recognised");
        println!("warning: no recognised trades in {}", config.input.display());
        return Ok(Outcome::NoTrades);
    }

    let summary = table.summary();
    debug!(skipped = summary.skipped_lines, "lines without a trade");
    info!(
        trades = summary.count,
        total_quantity = %summary.total_quantity,
        min_price = ?summary.min_price,
        max_price = ?summary.max_price,
        vwap = ?summary.vwap,
        first = ?summary.first_time,
        last = ?summary.last_time,
        "trade summary"
    );

    let data = ChartData::from_table(&table);
    show_charts(config, &data)?;

    write_csv(&config.output, table.records())?;
    info!(output = %config.output.display(), rows = table.len(), "csv written");

    println!(
        "processed {} trades, data saved to {}",
        table.len(),
        config.output.display()
    );

    Ok(Outcome::Exported {
        count: table.len(),
        output: config.output.clone(),
    })
}

fn show_charts(config: &Config, data: &ChartData) -> Result<(), AnalyzerError> {
    if let Some(path) = &config.plot_file {
        chart::render_svg(path, data)?;
        info!(path = %path.display(), "chart written");
    }

    match config.display.resolve() {
        DisplayMode::Tui => ui::show(data),
        DisplayMode::Text => {
            chart::print_text(data);
            Ok(())
        }
        DisplayMode::None | DisplayMode::Auto => Ok(()),
    }
}
