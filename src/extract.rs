//! Pulls trade records out of matching-engine log lines.
//!
//! The engine writes executions as
//! `[<time>] TRADE <buy_id>-><sell_id> qty=<quantity> price=<price>`.
//! Anything else in the log is noise and is skipped.

use std::str::FromStr;

use regex::{Captures, Regex};

use crate::error::ExtractError;
use crate::trade::TradeRecord;

const TRADE_PATTERN: &str =
    r"\[(.*?)\]\s+TRADE\s+([0-9]+)->([0-9]+)\s+qty=([0-9]+)\s+price=([0-9.]+)";

/// Compiled trade-line matcher. Build once, reuse for every line.
///
/// Numbers are ASCII only: a line whose ids, quantity or price use other
/// Unicode digits does not match and is skipped as noise. Ids and
/// quantities must fit in `u64`; a matching line that overflows is an
/// [`ExtractError::InvalidNumber`], not a skip.
#[derive(Debug, Clone)]
pub struct TradeExtractor {
    pattern: Regex,
}

impl TradeExtractor {
    pub fn new() -> Self {
        Self {
            // Constant pattern, covered by the tests below.
            pattern: Regex::new(TRADE_PATTERN).expect("trade pattern compiles"),
        }
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    /// Searches `line` for a trade. `Ok(None)` means the line is not a trade.
    ///
    /// The search is unanchored, so surrounding text is tolerated. A match
    /// whose numbers do not convert (`price=1.2.3`, ids past `u64::MAX`)
    /// is an error rather than a skip.
    pub fn extract(&self, line: &str) -> Result<Option<TradeRecord>, ExtractError> {
        let Some(caps) = self.pattern.captures(line) else {
            return Ok(None);
        };

        Ok(Some(TradeRecord {
            time: caps[1].to_string(),
            buy_id: parse_group(&caps, 2, "buy_id")?,
            sell_id: parse_group(&caps, 3, "sell_id")?,
            quantity: parse_group(&caps, 4, "quantity")?,
            price: parse_group(&caps, 5, "price")?,
        }))
    }
}

impl Default for TradeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_group<T: FromStr>(caps: &Captures<'_>, index: usize, field: &'static str) -> Result<T, ExtractError> {
    let value = &caps[index];
    value.parse().map_err(|_| ExtractError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
