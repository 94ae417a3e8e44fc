use crate::{
  constants::{DEFAULT_SCHEME, ODOH_DEFAULT_PATH, ODOH_PROXY_DEFAULT_PATH, TARGET_HOST_PARAM, TARGET_PATH_PARAM},
  error::*,
  globals::OdohRoute,
};
use url::Url;

#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
/// scheme
enum Scheme {
  Http,
  Https,
}
impl TryFrom<&str> for Scheme {
  type Error = OdohClientError;
  fn try_from(s: &str) -> Result<Self> {
    match s {
      "http" => Ok(Self::Http),
      "https" => Ok(Self::Https),
      _ => Err(OdohClientError::FailedToBuildUrl(format!("unsupported scheme: {s}"))),
    }
  }
}

/// Build url from an endpoint like "host[:port][/path][?query]".
/// `https` is assumed unless an explicit scheme is given, and an empty or root path is replaced with `default_path`.
pub(super) fn build_url(endpoint: &str, default_path: &str) -> Result<Url> {
  let endpoint = endpoint.trim();
  if endpoint.is_empty() {
    return Err(OdohClientError::FailedToBuildUrl("empty endpoint".to_string()));
  }
  let has_scheme = endpoint
    .split_once("://")
    .is_some_and(|(s, _)| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c)));
  let url_str = if has_scheme {
    endpoint.to_owned()
  } else {
    format!("{DEFAULT_SCHEME}://{endpoint}")
  };

  let mut url = Url::parse(&url_str).map_err(|e| OdohClientError::FailedToBuildUrl(format!("{endpoint}: {e}")))?;
  Scheme::try_from(url.scheme())?;
  if url.host_str().map_or(true, |h| h.is_empty()) {
    return Err(OdohClientError::FailedToBuildUrl(format!("{endpoint}: no host")));
  }
  if url.path().is_empty() || url.path() == "/" {
    url.set_path(default_path);
  }
  Ok(url)
}

/// "host[:port]" of an endpoint, without userinfo.
/// A port written in the endpoint is kept even if it is the scheme default, which `Url` normalizes away.
pub(super) fn host_port(endpoint: &str, url: &Url) -> String {
  let host = url.host_str().unwrap_or_default();
  match url.port().or_else(|| written_port(endpoint)) {
    Some(port) => format!("{host}:{port}"),
    None => host.to_owned(),
  }
}

fn written_port(endpoint: &str) -> Option<u16> {
  let rest = endpoint.trim().split_once("://").map_or(endpoint.trim(), |(_, r)| r);
  let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
  let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
  let (host, port) = host_port.rsplit_once(':')?;
  if host.contains(':') && !host.ends_with(']') {
    return None;
  }
  port.parse().ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// How the query reaches the target
pub enum Delivery {
  /// POST straight to the target
  Direct,
  /// POST to a proxy that relays to the embedded target
  Proxied {
    /// host of the target like "odoh.example" or "odoh.example:8443"
    target_host: String,
    /// path at the target like "/dns-query"
    target_path: String,
  },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request url for one ODoH query
pub struct RequestTarget {
  url: Url,
  delivery: Delivery,
}

impl RequestTarget {
  /// Target url for direct delivery
  pub fn direct(target: &str) -> Result<Self> {
    Ok(Self {
      url: build_url(target, ODOH_DEFAULT_PATH)?,
      delivery: Delivery::Direct,
    })
  }

  /// Proxy url carrying the target as `targethost` and `targetpath`.
  /// Values already given in the proxy's query string are kept as they are.
  pub fn proxied(proxy: &str, target: &str) -> Result<Self> {
    let target_url = build_url(target, ODOH_DEFAULT_PATH)?;
    let mut url = build_url(proxy, ODOH_PROXY_DEFAULT_PATH)?;

    // only the first value of a key counts, later duplicates are dropped
    let mut pairs = url.query_pairs().into_owned().collect::<Vec<_>>();
    for (key, value) in [
      (TARGET_HOST_PARAM, host_port(target, &target_url)),
      (TARGET_PATH_PARAM, target_url.path().to_owned()),
    ] {
      let given = pairs.iter().find(|(k, _)| k == key).is_some_and(|(_, v)| !v.is_empty());
      if given {
        let mut seen = false;
        pairs.retain(|(k, _)| k != key || !std::mem::replace(&mut seen, true));
      } else {
        pairs.retain(|(k, _)| k != key);
        pairs.push((key.to_owned(), value));
      }
    }
    url.set_query(None);
    url.query_pairs_mut().extend_pairs(pairs.iter());

    let param = |key: &str| {
      pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.to_owned())
        .unwrap_or_default()
    };
    let delivery = Delivery::Proxied {
      target_host: param(TARGET_HOST_PARAM),
      target_path: param(TARGET_PATH_PARAM),
    };
    Ok(Self { url, delivery })
  }

  /// Get url
  pub fn as_url(&self) -> &Url {
    &self.url
  }

  /// Get delivery mode
  pub fn delivery(&self) -> &Delivery {
    &self.delivery
  }

  /// Check if delivered through a proxy
  pub fn is_proxied(&self) -> bool {
    matches!(self.delivery, Delivery::Proxied { .. })
  }
}

impl TryFrom<&OdohRoute> for RequestTarget {
  type Error = OdohClientError;
  fn try_from(route: &OdohRoute) -> Result<Self> {
    match &route.proxy {
      None => Self::direct(&route.target),
      Some(proxy) => Self::proxied(&proxy.proxy, &route.target),
    }
  }
}
