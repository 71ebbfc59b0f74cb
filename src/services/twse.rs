use crate::constants::{FETCH_TIMEOUT_SECS, TWSE_STOCK_DAY_ALL_URL};
use crate::error::{Error, Result};
use crate::models::DailyQuote;
use tracing::debug;

/// Client for the TWSE open API daily quote feed.
pub struct TwseClient {
    url: String,
    client: reqwest::Client,
}

impl TwseClient {
    pub fn new() -> Result<Self> {
        Self::with_url(TWSE_STOCK_DAY_ALL_URL.to_string())
    }

    pub fn with_url(url: String) -> Result<Self> {
        let url = url.trim().to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::Config(format!(
                "Invalid upstream URL: must start with http:// or https://, got: '{}'",
                url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
            .user_agent(concat!("twsetrack/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { url, client })
    }

    /// Fetch today's quote row for every listed stock.
    ///
    /// One GET per invocation, no retries; a failed fetch fails the run and
    /// the next scheduled run tries again.
    pub async fn fetch_daily_quotes(&self) -> Result<Vec<DailyQuote>> {
        debug!("fetching daily quotes from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {} failed: {}", self.url, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            return Err(Error::Network(format!(
                "Upstream returned error status {}: {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response body: {}", e)))?;

        parse_daily_quotes(&body)
    }
}

/// Parse the STOCK_DAY_ALL payload: a JSON array of quote objects.
pub fn parse_daily_quotes(body: &str) -> Result<Vec<DailyQuote>> {
    serde_json::from_str::<Vec<DailyQuote>>(body)
        .map_err(|e| Error::Parse(format!("Unexpected STOCK_DAY_ALL payload: {}", e)))
}

/// Select the quote whose code matches `stock_no` exactly.
pub fn find_quote<'a>(quotes: &'a [DailyQuote], stock_no: &str) -> Option<&'a DailyQuote> {
    quotes.iter().find(|quote| quote.code == stock_no)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"Code":"0050","Name":"元大台灣50","TradeVolume":"12345","ClosingPrice":"180.10"},
        {"Code":"2330","Name":"台積電","TradeVolume":"67890","ClosingPrice":"1015.0000"}
    ]"#;

    #[test]
    fn test_parse_daily_quotes_ignores_extra_fields() {
        let quotes = parse_daily_quotes(SAMPLE).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[1].code, "2330");
        assert_eq!(quotes[1].name, "台積電");
        assert_eq!(quotes[1].closing_price, "1015.0000");
    }

    #[test]
    fn test_parse_daily_quotes_rejects_non_array() {
        assert!(parse_daily_quotes("{\"Code\":\"2330\"}").is_err());
        assert!(parse_daily_quotes("not json").is_err());
    }

    #[test]
    fn test_find_quote_exact_match() {
        let quotes = parse_daily_quotes(SAMPLE).unwrap();
        assert_eq!(find_quote(&quotes, "2330").unwrap().closing_price, "1015.0000");
        assert!(find_quote(&quotes, "233").is_none());
        assert!(find_quote(&quotes, "9999").is_none());
    }

    #[test]
    fn test_with_url_rejects_bad_scheme() {
        assert!(TwseClient::with_url("ftp://example.com".to_string()).is_err());
        assert!(TwseClient::with_url("https://example.com".to_string()).is_ok());
    }
}
