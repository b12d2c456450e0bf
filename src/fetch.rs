//! Per-ticker workbook downloader.
//!
//! fintables.com serves one xlsx per company at a stable URL. Each download
//! runs under the shared retry policy: HTTP 429/408/5xx and transport errors
//! back off and retry, anything else fails that ticker immediately. One
//! ticker exhausting its retries never aborts the rest of a fetch run.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::retry::{RetryDecision, RetryPolicy};

pub const DEFAULT_BASE_URL: &str = "https://fintables.com/sirketler";

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response for {ticker}: status {status}, content-type '{content_type}'")]
    UnexpectedResponse {
        ticker: String,
        status: u16,
        content_type: String,
    },

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    fn decision(&self) -> RetryDecision {
        match self {
            FetchError::Http(e) if e.is_timeout() || e.is_connect() => RetryDecision::Retryable,
            FetchError::UnexpectedResponse { status, .. } => decision_for_status(*status),
            _ => RetryDecision::Fatal,
        }
    }
}

fn decision_for_status(status: u16) -> RetryDecision {
    if status == 429 || status == 408 || (500..600).contains(&status) {
        RetryDecision::Retryable
    } else {
        RetryDecision::Fatal
    }
}

/// Outcome of a multi-ticker fetch run.
#[derive(Debug, Default)]
pub struct FetchSummary {
    pub downloaded: Vec<PathBuf>,
    pub failed: Vec<String>,
}

pub struct StatementDownloader {
    client: reqwest::Client,
    base_url: String,
    output_dir: PathBuf,
    policy: RetryPolicy,
}

impl StatementDownloader {
    pub fn new(output_dir: &Path, policy: RetryPolicy) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: output_dir.to_path_buf(),
            policy,
        })
    }

    /// Point at a different host (tests, mirrors).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn workbook_url(&self, ticker: &str) -> String {
        format!(
            "{}/{}/finansal-tablolar/excel?currency=",
            self.base_url, ticker
        )
    }

    /// Download one ticker's workbook to `<output_dir>/<TICKER>.xlsx`.
    pub async fn fetch(&self, ticker: &str) -> Result<PathBuf, FetchError> {
        let attempts = self.policy.max_attempts.max(1);
        let mut last_err: Option<FetchError> = None;

        for attempt in 1..=attempts {
            match self.fetch_once(ticker).await {
                Ok(bytes) => {
                    tokio::fs::create_dir_all(&self.output_dir).await?;
                    let path = self.output_dir.join(format!("{}.xlsx", ticker));
                    tokio::fs::write(&path, &bytes).await?;
                    log::info!("downloaded {} ({} bytes)", path.display(), bytes.len());
                    return Ok(path);
                }
                Err(err) => {
                    if err.decision() == RetryDecision::Fatal || attempt == attempts {
                        return Err(err);
                    }
                    let delay = self.policy.delay_for(attempt);
                    log::warn!(
                        "fetch {} retry {}/{} after error: {} (sleep {:?})",
                        ticker,
                        attempt,
                        attempts,
                        err,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    last_err = Some(err);
                }
            }
        }

        Err(last_err.expect("loop either returns or records an error"))
    }

    async fn fetch_once(&self, ticker: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(self.workbook_url(ticker)).send().await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !status.is_success() || !content_type.starts_with(XLSX_CONTENT_TYPE) {
            return Err(FetchError::UnexpectedResponse {
                ticker: ticker.to_string(),
                status: status.as_u16(),
                content_type,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Fetch every ticker, keeping going past per-ticker failures.
    pub async fn fetch_all(&self, tickers: &[String]) -> FetchSummary {
        let mut summary = FetchSummary::default();
        for ticker in tickers {
            match self.fetch(ticker).await {
                Ok(path) => summary.downloaded.push(path),
                Err(e) => {
                    log::error!("giving up on {}: {}", ticker, e);
                    summary.failed.push(ticker.clone());
                }
            }
        }
        summary
    }
}
