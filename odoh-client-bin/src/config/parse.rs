use crate::constants::*;
use clap::{Arg, ArgAction};
use odoh_client_lib::{ClientConfig, OdohRoute};
use std::time::Duration;

/// Parsed options
pub struct Opts {
  /// Target resolver and optional proxy
  pub route: OdohRoute,
  /// Query name
  pub name: String,
  /// Query type like "A"
  pub qtype: String,
  /// Timeout of HTTP requests in secs
  pub timeout_sec: Option<u64>,
  /// Query log in json format
  pub json_query_log: bool,
}

impl Opts {
  /// Client config derived from options
  pub fn client_config(&self) -> ClientConfig {
    let mut config = ClientConfig::default();
    if let Some(timeout_sec) = self.timeout_sec {
      config.http_timeout_sec = Duration::from_secs(timeout_sec);
    }
    config
  }
}

/// Parse arg values passed from cli
pub fn parse_opts() -> Result<Opts, anyhow::Error> {
  let _ = include_str!("../../Cargo.toml");
  let options = clap::command!()
    .arg(
      Arg::new("target")
        .long("target")
        .short('t')
        .value_name("HOST")
        .required(true)
        .help("ODoH target resolver like odoh.cloudflare-dns.com or odoh.example/dns-query"),
    )
    .arg(
      Arg::new("proxy")
        .long("proxy")
        .short('p')
        .value_name("HOST")
        .help("ODoH proxy (relay) like odoh-relay.example or odoh-relay.example/proxy. Unless specified, the query is sent directly to the target."),
    )
    .arg(
      Arg::new("proxy_host")
        .long("proxy-host")
        .value_name("HOST")
        .requires("proxy")
        .help("Virtual host set in the Host header of requests to the proxy"),
    )
    .arg(
      Arg::new("name")
        .long("name")
        .short('n')
        .value_name("NAME")
        .required(true)
        .help("Domain name to query"),
    )
    .arg(
      Arg::new("type")
        .long("type")
        .value_name("TYPE")
        .default_value(DEFAULT_QUERY_TYPE)
        .help("Record type to query"),
    )
    .arg(
      Arg::new("timeout")
        .long("timeout")
        .value_name("SECS")
        .value_parser(clap::value_parser!(u64))
        .help("Timeout of HTTP requests in seconds"),
    )
    .arg(
      Arg::new("json_query_log")
        .long("json")
        .short('j')
        .action(ArgAction::SetTrue)
        .help("Emit the query log in json format"),
    );
  let matches = options.get_matches();

  ///////////////////////////////////
  let target = matches.get_one::<String>("target").unwrap().to_owned();
  let route = match matches.get_one::<String>("proxy") {
    Some(proxy) => OdohRoute::proxied(&target, proxy, matches.get_one::<String>("proxy_host").map(|s| s.as_str())),
    None => OdohRoute::direct(&target),
  };
  let mut name = matches.get_one::<String>("name").unwrap().to_owned();
  if !name.ends_with('.') {
    name.push('.');
  }
  let qtype = matches.get_one::<String>("type").unwrap().to_owned();
  let timeout_sec = matches.get_one::<u64>("timeout").copied();
  let json_query_log = *matches.get_one::<bool>("json_query_log").unwrap_or(&false);

  Ok(Opts {
    route,
    name,
    qtype,
    timeout_sec,
    json_query_log,
  })
}
