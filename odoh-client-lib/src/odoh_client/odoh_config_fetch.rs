use super::{
  odoh::ODoHConfigs,
  request_target::{build_url, host_port},
  OdohClient,
};
use crate::{
  constants::{ODOH_CONFIG_ACCEPT, ODOH_CONFIG_PATH, ODOH_DEFAULT_PATH},
  error::*,
  log::*,
};
use reqwest::header;

impl OdohClient {
  /// Fetch ODoH configs of the target from its well-known endpoint.
  /// Fetched configs are not kept by the client, the caller may keep them for subsequent queries.
  pub async fn fetch_odoh_configs(&self, target: &str) -> Result<ODoHConfigs> {
    let mut destination = build_url(target, ODOH_DEFAULT_PATH)?;
    destination.set_path(ODOH_CONFIG_PATH);
    destination.set_query(None);
    debug!("[ODoH] Fetching ODoH configs from {}", destination);

    let response = self
      .http_client
      .get(destination.clone())
      .header(header::ACCEPT, ODOH_CONFIG_ACCEPT)
      .send()
      .await
      .map_err(OdohClientError::ODoHConfigFetchError)?;
    if response.status() != reqwest::StatusCode::OK {
      error!("[ODoH] Failed to fetch ODoH configs: {:?}", response.status());
      return Err(OdohClientError::ODoHConfigFetchStatus(response.status()));
    }
    let body = response.bytes().await.map_err(OdohClientError::ODoHConfigFetchError)?;

    ODoHConfigs::new(&host_port(target, &destination), &body)
  }
}
