pub mod chart;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod logging;
pub mod reader;
pub mod report;
pub mod table;
pub mod trade;
pub mod ui;

pub use chart::ChartData;
pub use config::{Config, DisplayMode};
pub use error::{AnalyzerError, ExtractError};
pub use export::{read_csv, write_csv};
pub use extract::TradeExtractor;
pub use reader::read_lines;
pub use report::{run, Outcome};
pub use table::{TradeSummary, TradeTable};
pub use trade::TradeRecord;
