////////////////////////////////
// Default Values for Config  //
////////////////////////////////
// Can override by specifying values in ClientConfig

/// Time out secs for HTTP requests
pub const HTTP_TIMEOUT_SEC: u64 = 10;

/// HTTP User-Agent
pub const HTTP_USER_AGENT: &str = "odoh-client";

////////////////////////////////
// Constant Values for ODoH   //
////////////////////////////////
// Cannot override below

/// Media type of ODoH query and response messages
pub const ODOH_CONTENT_TYPE: &str = "application/oblivious-dns-message";
/// Accept header sent when fetching ODoH configs
pub const ODOH_CONFIG_ACCEPT: &str = "application/binary";
/// Cache-Control header for ODoH queries
pub const ODOH_CACHE_CONTROL: &str = "no-cache, no-store";

/// ODoH config path
pub const ODOH_CONFIG_PATH: &str = "/.well-known/odohconfigs";
/// Default path of ODoH target when not given
pub const ODOH_DEFAULT_PATH: &str = "/dns-query";
/// Default path of ODoH proxy (relay) when not given
pub const ODOH_PROXY_DEFAULT_PATH: &str = "/proxy";

/// Scheme used when the given endpoint has no explicit scheme
pub const DEFAULT_SCHEME: &str = "https";

/// Query parameter naming the target host at the proxy
pub const TARGET_HOST_PARAM: &str = "targethost";
/// Query parameter naming the target path at the proxy
pub const TARGET_PATH_PARAM: &str = "targetpath";

// Logging

/// Event and span name of query logs
pub const QUERY_LOG_EVENT_NAME: &str = "query_log";
