use super::{dns_message, odoh::ODoHConfigs, request_target::RequestTarget};
use crate::{
  constants::{ODOH_CACHE_CONTROL, ODOH_CONTENT_TYPE},
  error::*,
  globals::{ClientConfig, OdohRoute},
  http_client::HttpClient,
  log::*,
};
use bytes::Bytes;
use hickory_proto::op::Message;
use reqwest::header::{self, HeaderMap, HeaderValue};

#[derive(Debug, Clone)]
/// ODoH client. Holds no per-query state, and can be shared by concurrent resolutions.
pub struct OdohClient {
  /// http client to make odoh query and fetch configs
  pub(super) http_client: HttpClient,
  /// base headers of odoh query
  headers: HeaderMap,
}

impl OdohClient {
  /// Create a new ODoH client
  pub fn new(config: &ClientConfig) -> Result<Self> {
    let http_client = HttpClient::new(config)?;

    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ODOH_CONTENT_TYPE));
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(ODOH_CONTENT_TYPE));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(ODOH_CACHE_CONTROL));

    Ok(Self { http_client, headers })
  }

  /// Resolve a DNS query in one pass: fetch target configs, encrypt, send, decrypt.
  pub async fn resolve(&self, packet_buf: &[u8], route: &OdohRoute) -> Result<Message> {
    let request_target = RequestTarget::try_from(route)?;
    let odoh_configs = self.fetch_odoh_configs(&route.target).await?;
    self.resolve_inner(packet_buf, &odoh_configs, route, &request_target).await
  }

  /// Resolve a DNS query with configs the caller already has
  pub async fn resolve_with_configs(&self, packet_buf: &[u8], odoh_configs: &ODoHConfigs, route: &OdohRoute) -> Result<Message> {
    let request_target = RequestTarget::try_from(route)?;
    self.resolve_inner(packet_buf, odoh_configs, route, &request_target).await
  }

  async fn resolve_inner(
    &self,
    packet_buf: &[u8],
    odoh_configs: &ODoHConfigs,
    route: &OdohRoute,
    request_target: &RequestTarget,
  ) -> Result<Message> {
    let start = std::time::Instant::now();

    // encrypt query, the context lives only until the response is opened
    let (encrypted_query, query_context) = odoh_configs.first().encrypt_query(packet_buf)?;

    let proxy_host = route.proxy.as_ref().and_then(|p| p.proxy_host.as_deref());
    let encrypted_response = self.send_odoh_query(encrypted_query, request_target, proxy_host).await?;

    let decrypted = query_context.decrypt_response(&encrypted_response)?;
    let response_message = dns_message::decode(&decrypted).map_err(|e| {
      error!("[ODoH] {e}");
      OdohClientError::InvalidDnsResponse(e)
    })?;

    QueryLoggingBase::from((&response_message, request_target.as_url(), start.elapsed())).log();
    Ok(response_message)
  }

  /// Send an encrypted query and return the encrypted response body.
  /// Redirects are not followed, and the response must be of the ODoH content type.
  pub async fn send_odoh_query(
    &self,
    encrypted_query: Bytes,
    request_target: &RequestTarget,
    proxy_host: Option<&str>,
  ) -> Result<Bytes> {
    let url = request_target.as_url();
    debug!("[ODoH] request url: {}", url.as_str());

    let mut request = self
      .http_client
      .post(url.clone())
      .headers(self.headers.clone())
      .body(encrypted_query);
    if let Some(proxy_host) = proxy_host.filter(|_| request_target.is_proxied()) {
      request = request.header(header::HOST, proxy_host);
    }
    let response = request.send().await?;

    let from = response.url().to_string();
    let status = response.status();
    let content_type = response
      .headers()
      .get(header::CONTENT_TYPE)
      .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
    let body = response.bytes().await?;

    if content_type.as_deref() != Some(ODOH_CONTENT_TYPE) {
      error!("[ODoH] Invalid content-type from {from}: {:?} ({status})", content_type);
      return Err(OdohClientError::ContentTypeMismatch {
        from,
        content_type,
        body: String::from_utf8_lossy(&body).into_owned(),
      });
    }
    if !status.is_success() {
      error!("[ODoH] ODoH query error!: {:?}", status);
      return Err(OdohClientError::UnexpectedStatusCode { from, status });
    }

    Ok(body)
  }
}
