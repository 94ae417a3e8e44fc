use crate::{error::*, globals::ClientConfig};
use reqwest::{redirect::Policy, Client, IntoUrl, RequestBuilder};

#[derive(Debug, Clone)]
/// Simple wrapper of reqwest::Client.
/// Redirects are never followed: a 3xx response is handed back as the final response.
pub struct HttpClient {
  client: Client,
}

impl HttpClient {
  /// Build HttpClient
  pub fn new(config: &ClientConfig) -> Result<Self> {
    let mut client = Client::builder()
      .user_agent(config.http_user_agent.as_str())
      .timeout(config.http_timeout_sec)
      .redirect(Policy::none())
      .hickory_dns(true);

    // Override pre-resolved ip addresses
    client = config
      .resolve_overrides
      .iter()
      .fold(client, |client, (hostname, addresses)| client.resolve_to_addrs(hostname, addresses));

    Ok(Self {
      client: client.build().map_err(OdohClientError::HttpClientError)?,
    })
  }

  /// Post wrapper
  pub fn post(&self, url: impl IntoUrl) -> RequestBuilder {
    self.client.post(url)
  }

  /// Get wrapper
  pub fn get(&self, url: impl IntoUrl) -> RequestBuilder {
    self.client.get(url)
  }
}
