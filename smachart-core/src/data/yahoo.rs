//! Yahoo Finance data provider.
//!
//! Fetches daily OHLCV bars from Yahoo's v8 chart API. One request per fetch,
//! no retries: any failure is reported to the caller as a [`ProviderError`].
//!
//! Yahoo Finance has no official API and is subject to unannounced format changes.
//! The CSV source is the fallback when Yahoo is unavailable.

use super::provider::{FetchRequest, HistoricalPriceSource, ProviderError};
use crate::domain::Bar;
use chrono::NaiveDate;
use reqwest::header::RETRY_AFTER;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

const CHART_ENDPOINT: &str = "https://query2.finance.yahoo.com/v8/finance/chart";
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    adjclose: Vec<Option<f64>>,
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
}

impl YahooProvider {
    pub fn new() -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| ProviderError::ClientSetup(e.to_string()))?;

        Ok(Self { client })
    }

    /// Build the chart API URL for a request. `period2` is exclusive.
    ///
    /// The symbol is pushed as a single path segment, so characters such as
    /// `/` or `?` are percent-encoded.
    fn chart_url(request: &FetchRequest) -> Result<Url, ProviderError> {
        let mut url = Url::parse(CHART_ENDPOINT)
            .map_err(|e| ProviderError::InvalidRequest(format!("bad chart endpoint: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ProviderError::InvalidRequest("chart endpoint has no path".into()))?
            .push(&request.symbol);
        url.query_pairs_mut()
            .append_pair("period1", &midnight_utc(request.start).to_string())
            .append_pair("period2", &midnight_utc(request.end).to_string())
            .append_pair("interval", request.interval.as_str())
            .append_pair("includeAdjustedClose", "true");
        Ok(url)
    }

    /// Parse the chart API response into bars.
    ///
    /// A `Not Found` chart error means the symbol has no data and yields an
    /// empty vector; other chart errors are reported as format changes.
    fn parse_response(resp: ChartResponse) -> Result<Vec<Bar>, ProviderError> {
        let result = match (resp.chart.result, resp.chart.error) {
            (Some(result), _) => result,
            (None, Some(err)) if err.code == "Not Found" => return Ok(Vec::new()),
            (None, Some(err)) => {
                return Err(ProviderError::ResponseFormatChanged(format!(
                    "{}: {}",
                    err.code, err.description
                )))
            }
            (None, None) => {
                return Err(ProviderError::ResponseFormatChanged(
                    "empty result with no error".into(),
                ))
            }
        };

        let Some(data) = result.into_iter().next() else {
            return Ok(Vec::new());
        };

        // A valid symbol with no trading days in range has no timestamps.
        let Some(timestamps) = data.timestamp else {
            return Ok(Vec::new());
        };

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ResponseFormatChanged("no quote data".into()))?;

        let adj_closes = data
            .indicators
            .adjclose
            .and_then(|v| v.into_iter().next())
            .map(|a| a.adjclose);

        let mut bars = Vec::with_capacity(timestamps.len());

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    ProviderError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();
            let volume = quote.volume.get(i).copied().flatten();
            let adj_close = adj_closes
                .as_ref()
                .and_then(|v| v.get(i).copied().flatten());

            // Skip bars where all OHLCV are None (holidays/non-trading days)
            if open.is_none()
                && high.is_none()
                && low.is_none()
                && close.is_none()
                && volume.is_none()
            {
                continue;
            }

            bars.push(Bar {
                date,
                open: open.unwrap_or(f64::NAN),
                high: high.unwrap_or(f64::NAN),
                low: low.unwrap_or(f64::NAN),
                close: close.unwrap_or(f64::NAN),
                volume: volume.unwrap_or(0),
                adj_close: adj_close.unwrap_or(f64::NAN),
            });
        }

        Ok(bars)
    }

    fn parse_body(symbol: &str, body: &str) -> Result<Vec<Bar>, ProviderError> {
        let chart: ChartResponse = serde_json::from_str(body).map_err(|e| {
            ProviderError::ResponseFormatChanged(format!(
                "failed to parse response for {symbol}: {e}"
            ))
        })?;
        Self::parse_response(chart)
    }
}

/// What a response status says about the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusOutcome {
    /// Parse the body.
    Body,
    /// Unknown symbol; there is nothing to parse.
    NoData,
}

/// Map an HTTP status (plus any `Retry-After` header) to an outcome.
///
/// Unknown symbols come back as 404 with a `Not Found` chart error, which
/// is "no data" rather than a failure.
fn classify(status: StatusCode, retry_after: Option<&str>) -> Result<StatusOutcome, ProviderError> {
    match status {
        StatusCode::TOO_MANY_REQUESTS => Err(ProviderError::RateLimited {
            retry_after_secs: retry_after
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        }),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(ProviderError::AuthenticationRequired(format!(
                "Yahoo Finance refused the request (HTTP {})",
                status.as_u16()
            )))
        }
        StatusCode::NOT_FOUND => Ok(StatusOutcome::NoData),
        s if s.is_success() => Ok(StatusOutcome::Body),
        s => Err(ProviderError::Http { status: s.as_u16() }),
    }
}

fn midnight_utc(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}

impl HistoricalPriceSource for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch_daily(&self, request: &FetchRequest) -> Result<Vec<Bar>, ProviderError> {
        let url = Self::chart_url(request)?;
        let symbol = request.symbol.as_str();
        tracing::debug!(%url, "requesting chart data");

        let resp = self.client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                ProviderError::NetworkUnreachable(format!("request timed out: {e}"))
            } else {
                ProviderError::NetworkUnreachable(e.to_string())
            }
        })?;

        let retry_after = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok());
        if classify(resp.status(), retry_after)? == StatusOutcome::NoData {
            tracing::debug!(symbol, "provider reported symbol not found");
            return Ok(Vec::new());
        }

        let body = resp
            .text()
            .map_err(|e| ProviderError::NetworkUnreachable(e.to_string()))?;

        Self::parse_body(symbol, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "chart": {
            "result": [{
                "timestamp": [1672756200, 1672842600, 1672929000],
                "indicators": {
                    "quote": [{
                        "open":   [130.28, null, 126.89],
                        "high":   [130.90, null, 128.66],
                        "low":    [124.17, null, 125.08],
                        "close":  [125.07, null, 126.36],
                        "volume": [112117500, null, 89113600]
                    }],
                    "adjclose": [{ "adjclose": [124.22, null, 125.50] }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn chart_url_encodes_range_and_interval() {
        let req = FetchRequest::daily(
            "AAPL",
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
        );
        let url = YahooProvider::chart_url(&req).unwrap().to_string();
        assert!(url.starts_with("https://query2.finance.yahoo.com/v8/finance/chart/AAPL?"));
        assert!(url.contains("period1=1672531200"));
        assert!(url.contains("period2=1672617600"));
        assert!(url.contains("interval=1d"));
    }

    #[test]
    fn chart_url_escapes_symbol() {
        let day = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let req = FetchRequest::daily("BRK/B?x=1", day, day.succ_opt().unwrap());
        let url = YahooProvider::chart_url(&req).unwrap();
        assert_eq!(url.path(), "/v8/finance/chart/BRK%2FB%3Fx=1");
        assert_eq!(url.query_pairs().count(), 4);
    }

    #[test]
    fn rate_limit_reads_retry_after() {
        let err = classify(StatusCode::TOO_MANY_REQUESTS, Some("120")).unwrap_err();
        assert!(matches!(err, ProviderError::RateLimited { retry_after_secs: 120 }));
    }

    #[test]
    fn rate_limit_defaults_to_sixty_seconds() {
        for header in [None, Some("soon")] {
            let err = classify(StatusCode::TOO_MANY_REQUESTS, header).unwrap_err();
            assert!(matches!(err, ProviderError::RateLimited { retry_after_secs: 60 }));
        }
    }

    #[test]
    fn unauthorized_and_forbidden_need_auth() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let err = classify(status, None).unwrap_err();
            assert!(matches!(err, ProviderError::AuthenticationRequired(_)));
        }
    }

    #[test]
    fn not_found_status_means_no_data() {
        assert_eq!(
            classify(StatusCode::NOT_FOUND, None).unwrap(),
            StatusOutcome::NoData
        );
    }

    #[test]
    fn success_status_parses_body() {
        assert_eq!(classify(StatusCode::OK, None).unwrap(), StatusOutcome::Body);
    }

    #[test]
    fn other_failures_keep_status_code() {
        for code in [400u16, 500, 503] {
            let status = StatusCode::from_u16(code).unwrap();
            let err = classify(status, None).unwrap_err();
            assert!(matches!(err, ProviderError::Http { status } if status == code));
        }
    }

    #[test]
    fn parses_bars_and_skips_empty_rows() {
        let bars = YahooProvider::parse_body("AAPL", SAMPLE).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
        assert_eq!(bars[0].close, 125.07);
        assert_eq!(bars[0].volume, 112_117_500);
        assert_eq!(bars[1].adj_close, 125.50);
    }

    #[test]
    fn not_found_is_empty_not_error() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let bars = YahooProvider::parse_body("ZZZZ_INVALID", body).unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn other_chart_error_is_format_change() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Bad Request","description":"Invalid input"}}}"#;
        let err = YahooProvider::parse_body("AAPL", body).unwrap_err();
        assert!(matches!(err, ProviderError::ResponseFormatChanged(_)));
    }

    #[test]
    fn missing_timestamps_means_no_trading_days() {
        let body = r#"{"chart":{"result":[{"indicators":{"quote":[{}]}}],"error":null}}"#;
        let bars = YahooProvider::parse_body("AAPL", body).unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn garbage_body_is_format_change() {
        let err = YahooProvider::parse_body("AAPL", "<html>").unwrap_err();
        assert!(matches!(err, ProviderError::ResponseFormatChanged(_)));
    }

    #[test]
    #[ignore = "hits the live Yahoo Finance API"]
    fn live_fetch_aapl() {
        let provider = YahooProvider::new().unwrap();
        let req = FetchRequest::daily(
            "AAPL",
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
        );
        let bars = provider.fetch_daily(&req).unwrap();
        assert!(bars.len() > 30);
    }
}
