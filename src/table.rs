use tracing::debug;

use crate::error::AnalyzerError;
use crate::extract::TradeExtractor;
use crate::trade::TradeRecord;

/// Trades parsed from one log, in log order.
#[derive(Debug, Clone, Default)]
pub struct TradeTable {
    records: Vec<TradeRecord>,
    skipped_lines: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeSummary {
    pub count: usize,
    pub skipped_lines: usize,
    /// Summed wide so a log of `u64::MAX`-sized fills cannot overflow.
    pub total_quantity: u128,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// `None` when nothing traded any quantity.
    pub vwap: Option<f64>,
    pub first_time: Option<String>,
    pub last_time: Option<String>,
}

impl TradeTable {
    /// Runs `extractor` over every line and keeps each trade it finds.
    ///
    /// Lines without a trade are dropped silently. A trade line with an
    /// unconvertible number stops the pass.
    pub fn from_lines<I, S>(extractor: &TradeExtractor, lines: I) -> Result<Self, AnalyzerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = TradeTable::default();

        for (index, line) in lines.into_iter().enumerate() {
            let parsed = extractor
                .extract(line.as_ref())
                .map_err(|source| AnalyzerError::Extract {
                    line_number: index + 1,
                    source,
                })?;

            match parsed {
                Some(record) => table.records.push(record),
                None => table.skipped_lines += 1,
            }
        }

        debug!(
            trades = table.records.len(),
            skipped = table.skipped_lines,
            "trade log scanned"
        );
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TradeRecord> {
        self.records.iter()
    }

    /// `(trade index, price)` pairs.
    pub fn prices(&self) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, t)| (i as f64, t.price))
            .collect()
    }

    pub fn quantities(&self) -> Vec<u64> {
        self.records.iter().map(|t| t.quantity).collect()
    }

    pub fn summary(&self) -> TradeSummary {
        let total_quantity: u128 = self.records.iter().map(|t| u128::from(t.quantity)).sum();
        let notional: f64 = self.records.iter().map(TradeRecord::notional).sum();

        let min_price = self.records.iter().map(|t| t.price).reduce(f64::min);
        let max_price = self.records.iter().map(|t| t.price).reduce(f64::max);

        TradeSummary {
            count: self.records.len(),
            skipped_lines: self.skipped_lines,
            total_quantity,
            min_price,
            max_price,
            vwap: (total_quantity > 0).then(|| notional / total_quantity as f64),
            first_time: self.records.first().map(|t| t.time.clone()),
            last_time: self.records.last().map(|t| t.time.clone()),
        }
    }
}

impl<'a> IntoIterator for &'a TradeTable {
    type Item = &'a TradeRecord;
    type IntoIter = std::slice::Iter<'a, TradeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
