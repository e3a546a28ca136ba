use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

pub const DEFAULT_INPUT: &str = "../logs/trades.log";
pub const DEFAULT_OUTPUT: &str = "trades_parsed.csv";

/// Where the price and volume charts go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DisplayMode {
    /// Interactive viewer on a terminal, text plots otherwise
    #[default]
    Auto,
    /// Interactive full-screen viewer, closed with q or Esc
    Tui,
    /// Braille text plots printed to stdout
    Text,
    /// No charts
    None,
}

impl DisplayMode {
    /// Settles `Auto` against the current stdout.
    pub fn resolve(self) -> DisplayMode {
        match self {
            DisplayMode::Auto if io::stdout().is_terminal() => DisplayMode::Tui,
            DisplayMode::Auto => DisplayMode::Text,
            other => other,
        }
    }
}

/// Parse a matching-engine trade log, chart it and export it as CSV.
#[derive(Debug, Clone, Parser)]
#[command(name = "trade-log-analyzer", version)]
pub struct Config {
    /// Trade log to read
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// CSV file to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// How to show the charts
    #[arg(short, long, value_enum, default_value_t = DisplayMode::Auto)]
    pub display: DisplayMode,

    /// Also write the charts to this SVG file
    #[arg(long)]
    pub plot_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            display: DisplayMode::Auto,
            plot_file: None,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_paths() {
        let config = Config::parse_from(["trade-log-analyzer"]);
        assert_eq!(config.input, PathBuf::from("../logs/trades.log"));
        assert_eq!(config.output, PathBuf::from("trades_parsed.csv"));
        assert_eq!(config.display, DisplayMode::Auto);
        assert_eq!(config.plot_file, None);
        assert_eq!(config.log_level, "info");

        let default = Config::default();
        assert_eq!(default.input, config.input);
        assert_eq!(default.output, config.output);
    }

    #[test]
    fn test_flags() {
        let config = Config::parse_from([
            "trade-log-analyzer",
            "-i",
            "engine/trades.log",
            "--output",
            "out.csv",
            "--display",
            "none",
            "--plot-file",
            "trades.svg",
        ]);

        assert_eq!(config.input, PathBuf::from("engine/trades.log"));
        assert_eq!(config.output, PathBuf::from("out.csv"));
        assert_eq!(config.display, DisplayMode::None);
        assert_eq!(config.plot_file, Some(PathBuf::from("trades.svg")));
    }

    #[test]
    fn test_explicit_modes_resolve_to_themselves() {
        assert_eq!(DisplayMode::Text.resolve(), DisplayMode::Text);
        assert_eq!(DisplayMode::None.resolve(), DisplayMode::None);
        assert_ne!(DisplayMode::Auto.resolve(), DisplayMode::Auto);
    }

    #[test]
    fn test_cli_is_consistent() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
