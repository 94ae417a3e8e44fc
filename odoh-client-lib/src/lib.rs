mod constants;
mod error;
mod globals;
mod http_client;
mod log;
mod odoh_client;

pub use crate::{
  constants::{ODOH_CONFIG_PATH, ODOH_CONTENT_TYPE, ODOH_DEFAULT_PATH, ODOH_PROXY_DEFAULT_PATH, QUERY_LOG_EVENT_NAME},
  error::{OdohClientError, Result},
  globals::{ClientConfig, OdohRoute, ProxyRoute},
  odoh_client::{build_query, decode, encode, Delivery, ODoHConfig, ODoHConfigs, OdohClient, QueryContext, RequestTarget},
};
pub use hickory_proto::op::Message;

use crate::log::*;

/// Resolve a DNS query through ODoH in one pass with a freshly built client.
/// - Fetch ODoH configs of the target from its well-known endpoint
/// - Encrypt the query with the first config
/// - Send it to the target directly or through the proxy
/// - Decrypt and unpack the response
pub async fn resolve(packet_buf: &[u8], route: &OdohRoute, config: &ClientConfig) -> Result<Message> {
  debug!("Start ODoH resolution for target {}", route.target);
  let client = OdohClient::new(config)?;
  client.resolve(packet_buf, route).await
}
