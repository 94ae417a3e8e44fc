pub use tracing::{debug, error, info, warn};

use crate::constants::QUERY_LOG_EVENT_NAME;
use hickory_proto::op::Message;
use std::time::Duration;

#[derive(Debug)]
/// Logging base for a resolved ODoH query
pub(crate) struct QueryLoggingBase<'a> {
  /// Decrypted DNS response
  message: &'a Message,
  /// Destination url, i.e., target or proxy
  dst_url: &'a url::Url,
  /// Resolving time
  elapsed: Duration,
}

impl<'a> From<(&'a Message, &'a url::Url, Duration)> for QueryLoggingBase<'a> {
  fn from((message, dst_url, elapsed): (&'a Message, &'a url::Url, Duration)) -> Self {
    Self {
      message,
      dst_url,
      elapsed,
    }
  }
}

impl QueryLoggingBase<'_> {
  /// Log the query-response through tracing
  pub fn log(&self) {
    let span = tracing::info_span!(QUERY_LOG_EVENT_NAME);
    let _guard = span.enter();

    let id = self.message.id();
    let (qname, qtype, qclass) = self
      .message
      .query()
      .map(|q| (q.name().to_string(), q.query_type().to_string(), q.query_class().to_string()))
      .unwrap_or_default();
    let rcode = self.message.response_code().to_string();
    let dst = self.dst_url.to_string();
    let elapsed_micros = self.elapsed.as_micros();

    tracing::event!(
      name: QUERY_LOG_EVENT_NAME,
      tracing::Level::INFO,
      qname,
      qtype,
      qclass,
      rcode,
      id,
      dst,
      elapsed_micros
    );
  }
}
