use serde::{Deserialize, Serialize};

/// One row of the TWSE STOCK_DAY_ALL feed.
///
/// The upstream payload carries more columns (open, high, low, volume and so
/// on); only the fields this tracker stores are deserialized, everything else
/// is ignored. `ClosingPrice` arrives as a numeric-looking string and is kept
/// as-is, no numeric validation happens at write time.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailyQuote {
    pub code: String,
    pub name: String,
    pub closing_price: String,
}

/// One stored observation: the closing price of a ticker on a calendar date.
///
/// Records are immutable once written. The wire names (`Date`, `StockNo`,
/// `Price`) are part of the shard file format the dashboard reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuoteRecord {
    /// Calendar date in `YYYY-MM-DD`, stamped in the market timezone
    pub date: String,
    /// Ticker identifier
    pub stock_no: String,
    /// Closing price, kept as the upstream string
    pub price: String,
}

impl QuoteRecord {
    /// Build a record from an upstream quote and an observation date.
    pub fn from_quote(quote: &DailyQuote, date: String) -> Self {
        Self {
            date,
            stock_no: quote.code.clone(),
            price: quote.closing_price.clone(),
        }
    }
}
