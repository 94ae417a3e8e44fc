pub use anyhow::anyhow;
use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OdohClientError>;

/// Describes things that can go wrong in a single ODoH resolution
#[derive(Debug, Error)]
pub enum OdohClientError {
  /* ---- config fetch ---- */
  #[error("Failed to fetch ODoH configs: {0}")]
  ODoHConfigFetchError(#[source] reqwest::Error),
  #[error("Failed to fetch ODoH configs: unexpected status {0}")]
  ODoHConfigFetchStatus(StatusCode),
  #[error("Invalid ODoH configs: {0}")]
  InvalidODoHConfigs(#[source] odoh_rs::Error),
  #[error("ODoH No Client Config")]
  ODoHNoClientConfig,

  /* ---- url construction ---- */
  #[error("Failed to build ODoH url: {0}")]
  FailedToBuildUrl(String),

  /* ---- query encryption ---- */
  #[error("Invalid DNS query")]
  InvalidDnsQuery,
  #[error("ODoH query encryption error: {0}")]
  ODoHEncryptionError(#[source] odoh_rs::Error),

  /* ---- transport ---- */
  #[error("HttpClient error: {0}")]
  HttpClientError(#[from] reqwest::Error),
  #[error("Did not obtain the correct content-type from {from} ({content_type:?}) with response {body}")]
  ContentTypeMismatch {
    from: String,
    content_type: Option<String>,
    body: String,
  },
  #[error("ODoH query error from {from}: {status}")]
  UnexpectedStatusCode { from: String, status: StatusCode },

  /* ---- response decryption ---- */
  #[error("Invalid ODoH response message: {0}")]
  ODoHInvalidResponse(#[source] odoh_rs::Error),
  // No inner error here. Every failure to open a response looks the same from outside.
  #[error("ODoH decryption failed")]
  ODoHDecryptionFailed,
  #[error("Invalid DNS response: {0}")]
  InvalidDnsResponse(anyhow::Error),
}
