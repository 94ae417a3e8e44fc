// Local ODoH target and proxy for tests
use crate::constants::{ODOH_CONFIG_PATH, ODOH_CONTENT_TYPE, TARGET_HOST_PARAM, TARGET_PATH_PARAM};
use axum::{
  extract::{Query, State},
  http::{header, HeaderMap, StatusCode},
  response::{IntoResponse, Response},
  routing::{get, post},
  Router,
};
use bytes::Bytes;
use odoh_rs::{
  compose, decrypt_query, encrypt_response, parse, ObliviousDoHConfig, ObliviousDoHConfigs, ObliviousDoHKeyPair,
  ObliviousDoHMessage, ObliviousDoHMessagePlaintext, ResponseNonce,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{
  collections::HashMap,
  net::SocketAddr,
  sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
  },
};

/// Key pair generated from a fixed seed
pub(crate) fn test_key_pair() -> ObliviousDoHKeyPair {
  let mut rng = StdRng::from_seed([7; 32]);
  ObliviousDoHKeyPair::new(&mut rng)
}

/// Serialized configs publishing the public key of the key pair
pub(crate) fn test_configs_bytes(key_pair: &ObliviousDoHKeyPair) -> Bytes {
  let configs: ObliviousDoHConfigs = vec![ObliviousDoHConfig::from(key_pair.public().clone())].into();
  compose(&configs).unwrap().freeze()
}

/// Open an encrypted query as the target does, and answer with the same DNS message encrypted under its context
pub(crate) fn echo_odoh_query(key_pair: &ObliviousDoHKeyPair, encrypted_query: &Bytes) -> Option<Bytes> {
  answer_odoh_query(key_pair, encrypted_query, None)
}

/// Open an encrypted query, and answer with `answer` (or the query itself if none) encrypted under its context
fn answer_odoh_query(key_pair: &ObliviousDoHKeyPair, encrypted_query: &Bytes, answer: Option<&[u8]>) -> Option<Bytes> {
  let query_enc: ObliviousDoHMessage = parse(&mut (encrypted_query.clone())).ok()?;
  let (query_dec, srv_secret) = decrypt_query(&query_enc, key_pair).ok()?;
  let response = match answer {
    Some(answer) => ObliviousDoHMessagePlaintext::new(answer, 0),
    None => ObliviousDoHMessagePlaintext::new(query_dec.clone().into_msg(), 0),
  };

  let mut nonce = ResponseNonce::default();
  rand::thread_rng().fill(&mut nonce[..]);
  let response_enc = encrypt_response(&query_dec, &response, srv_secret, nonce).ok()?;
  Some(compose(&response_enc).ok()?.freeze())
}

/// What the proxy endpoint saw
#[derive(Debug, Clone, Default)]
pub(crate) struct ProxiedRequest {
  pub host: Option<String>,
  pub params: HashMap<String, String>,
}

/// What the well-known endpoint serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PublishedConfigs {
  KeyPair,
  Empty,
  NotFound,
}

pub(crate) struct ResponderState {
  key_pair: ObliviousDoHKeyPair,
  published: PublishedConfigs,
  /// number of queries answered at /dns-query
  pub dns_query_hits: AtomicUsize,
  /// last request received at /proxy
  pub last_proxied: Mutex<Option<ProxiedRequest>>,
}

/// Running responder bound to a local port
pub(crate) struct TestResponder {
  pub addr: SocketAddr,
  pub state: Arc<ResponderState>,
}

impl TestResponder {
  /// Start a responder publishing the test key pair
  pub(crate) async fn start() -> Self {
    Self::start_inner(PublishedConfigs::KeyPair).await
  }

  /// Start a responder publishing an empty config set
  pub(crate) async fn start_with_empty_configs() -> Self {
    Self::start_inner(PublishedConfigs::Empty).await
  }

  /// Start a responder whose well-known endpoint answers 404
  pub(crate) async fn start_without_configs() -> Self {
    Self::start_inner(PublishedConfigs::NotFound).await
  }

  async fn start_inner(published: PublishedConfigs) -> Self {
    let state = Arc::new(ResponderState {
      key_pair: test_key_pair(),
      published,
      dns_query_hits: AtomicUsize::new(0),
      last_proxied: Mutex::new(None),
    });
    let app = Router::new()
      .route(ODOH_CONFIG_PATH, get(odoh_configs))
      .route("/dns-query", post(dns_query))
      .route("/proxy", post(proxy))
      .route("/not-dns", post(not_dns))
      .route("/plain", post(plain))
      .route("/redirect", post(redirect))
      .route("/error", post(server_error))
      .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, app).await.unwrap();
    });

    Self { addr, state }
  }

  /// Endpoint string like "http://127.0.0.1:port/path"
  pub(crate) fn endpoint(&self, path: &str) -> String {
    format!("http://{}{}", self.addr, path)
  }
}

fn odoh_response(body: Bytes) -> Response {
  ([(header::CONTENT_TYPE, ODOH_CONTENT_TYPE)], body).into_response()
}

async fn odoh_configs(State(state): State<Arc<ResponderState>>) -> Response {
  let body = match state.published {
    PublishedConfigs::KeyPair => test_configs_bytes(&state.key_pair),
    PublishedConfigs::Empty => {
      let empty: ObliviousDoHConfigs = Vec::<ObliviousDoHConfig>::new().into();
      compose(&empty).unwrap().freeze()
    }
    PublishedConfigs::NotFound => return StatusCode::NOT_FOUND.into_response(),
  };
  ([(header::CONTENT_TYPE, "application/binary")], body).into_response()
}

async fn dns_query(State(state): State<Arc<ResponderState>>, body: Bytes) -> Response {
  state.dns_query_hits.fetch_add(1, Ordering::SeqCst);
  match echo_odoh_query(&state.key_pair, &body) {
    Some(response) => odoh_response(response),
    None => StatusCode::BAD_REQUEST.into_response(),
  }
}

async fn proxy(
  State(state): State<Arc<ResponderState>>,
  Query(params): Query<HashMap<String, String>>,
  headers: HeaderMap,
  body: Bytes,
) -> Response {
  let host = headers
    .get(header::HOST)
    .and_then(|v| v.to_str().ok())
    .map(|v| v.to_owned());
  *state.last_proxied.lock().unwrap() = Some(ProxiedRequest { host, params: params.clone() });

  if !params.contains_key(TARGET_HOST_PARAM) || !params.contains_key(TARGET_PATH_PARAM) {
    return StatusCode::BAD_REQUEST.into_response();
  }
  // relaying is skipped, this responder also plays the target
  match echo_odoh_query(&state.key_pair, &body) {
    Some(response) => odoh_response(response),
    None => StatusCode::BAD_REQUEST.into_response(),
  }
}

/// Properly encrypted, but the plaintext is not a DNS message
async fn not_dns(State(state): State<Arc<ResponderState>>, body: Bytes) -> Response {
  match answer_odoh_query(&state.key_pair, &body, Some(&[0x00, 0x01, 0x02][..])) {
    Some(response) => odoh_response(response),
    None => StatusCode::BAD_REQUEST.into_response(),
  }
}

async fn plain() -> Response {
  ([(header::CONTENT_TYPE, "text/plain")], "not an odoh message").into_response()
}

async fn redirect() -> Response {
  (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, "/dns-query")]).into_response()
}

async fn server_error() -> Response {
  (StatusCode::INTERNAL_SERVER_ERROR, [(header::CONTENT_TYPE, ODOH_CONTENT_TYPE)], Bytes::new()).into_response()
}
