use crate::constants::*;
use std::net::SocketAddr;
use tokio::time::Duration;

#[derive(PartialEq, Eq, Debug, Clone)]
/// Client configuration shared by every resolution made through one client
pub struct ClientConfig {
  /// timeout for HTTP requests (config fetch and ODoH query)
  pub http_timeout_sec: Duration,

  /// http user agent
  pub http_user_agent: String,

  /// pre-resolved addresses of endpoints (hostname, socket addresses),
  /// bypassing the system resolver for those hostnames
  pub resolve_overrides: Vec<(String, Vec<SocketAddr>)>,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      http_timeout_sec: Duration::from_secs(HTTP_TIMEOUT_SEC),
      http_user_agent: format!("{}/{}", HTTP_USER_AGENT, env!("CARGO_PKG_VERSION")),
      resolve_overrides: vec![],
    }
  }
}

#[derive(PartialEq, Eq, Debug, Clone)]
/// Where an ODoH query is delivered: directly to the target, or through a proxy
pub struct OdohRoute {
  /// target resolver like "odoh.cloudflare-dns.com" or "odoh.example:8443/dns-query"
  pub target: String,
  /// proxy (relay) settings, none for direct delivery
  pub proxy: Option<ProxyRoute>,
}

#[derive(PartialEq, Eq, Debug, Clone)]
/// ODoH proxy (relay) settings
pub struct ProxyRoute {
  /// proxy like "odoh-relay.example" or "odoh-relay.example/proxy"
  pub proxy: String,
  /// virtual host put in the Host header, distinct from the proxy's network address
  pub proxy_host: Option<String>,
}

impl OdohRoute {
  /// Direct delivery to the target
  pub fn direct(target: &str) -> Self {
    Self {
      target: target.to_owned(),
      proxy: None,
    }
  }

  /// Delivery through a proxy
  pub fn proxied(target: &str, proxy: &str, proxy_host: Option<&str>) -> Self {
    Self {
      target: target.to_owned(),
      proxy: Some(ProxyRoute {
        proxy: proxy.to_owned(),
        proxy_host: proxy_host.map(|v| v.to_owned()),
      }),
    }
  }
}
