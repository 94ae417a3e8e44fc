#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod config;
mod constants;
mod log;

use crate::{config::parse_opts, constants::THREAD_NAME, log::*};
use anyhow::Context;
use odoh_client_lib::{build_query, encode, OdohClient};

fn main() {
  let parsed_opts = match parse_opts() {
    Ok(v) => v,
    Err(e) => {
      eprintln!("Invalid options: {e}");
      std::process::exit(1);
    }
  };
  init_logger(&parsed_opts);

  let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
  runtime_builder.enable_all();
  runtime_builder.thread_name(THREAD_NAME);
  let runtime = match runtime_builder.build() {
    Ok(v) => v,
    Err(e) => {
      error!("Failed to build tokio runtime: {e}");
      std::process::exit(1);
    }
  };

  runtime.block_on(async {
    if let Err(e) = query(&parsed_opts).await {
      error!("ODoH query failed: {e:#}");
      std::process::exit(1);
    }
  });
}

/// Make a single ODoH query and print the answer
async fn query(parsed_opts: &config::Opts) -> anyhow::Result<()> {
  let query_msg = build_query(&parsed_opts.name, &parsed_opts.qtype)?;
  let packet_buf = encode(&query_msg)?;

  let client = OdohClient::new(&parsed_opts.client_config()).context("Failed to build ODoH client")?;
  match &parsed_opts.route.proxy {
    Some(proxy) => info!("Query {} {} to {} via {}", parsed_opts.name, parsed_opts.qtype, parsed_opts.route.target, proxy.proxy),
    None => info!("Query {} {} to {}", parsed_opts.name, parsed_opts.qtype, parsed_opts.route.target),
  }
  let response = client
    .resolve(&packet_buf, &parsed_opts.route)
    .await
    .with_context(|| format!("Failed to resolve {}", parsed_opts.name))?;

  info!("Response code: {}", response.response_code());
  for record in response.answers() {
    println!("{record}");
  }
  Ok(())
}
