mod quote;

pub use quote::{DailyQuote, QuoteRecord};
