mod dns_message;
mod odoh;
mod odoh_client_main;
mod odoh_config_fetch;
mod request_target;
#[cfg(test)]
mod test_responder;

pub use dns_message::{build_query, decode, encode};
pub use odoh::{ODoHConfig, ODoHConfigs, QueryContext};
pub use odoh_client_main::OdohClient;
pub use request_target::{Delivery, RequestTarget};
