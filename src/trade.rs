use serde::{Deserialize, Serialize};

/// One execution parsed out of a `TRADE` log line.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub time: String,
    pub buy_id: u64,
    pub sell_id: u64,
    pub quantity: u64,
    pub price: f64,
}

impl TradeRecord {
    pub fn new(time: impl Into<String>, buy_id: u64, sell_id: u64, quantity: u64, price: f64) -> Self {
        Self {
            time: time.into(),
            buy_id,
            sell_id,
            quantity,
            price,
        }
    }

    pub fn notional(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notional() {
        let trade = TradeRecord::new("t", 1, 2, 4, 2.5);
        assert_eq!(trade.notional(), 10.0);
    }
}
