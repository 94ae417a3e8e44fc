use crate::{error::*, log::*};
use bytes::Bytes;
use odoh_rs::{
  parse, ObliviousDoHConfigContents, ObliviousDoHConfigs, ObliviousDoHMessage, ObliviousDoHMessagePlaintext, OdohSecret,
};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Debug, Clone)]
/// ODoH configs published by a target at its well-known endpoint.
/// Never empty, and the first entry is the one used to encrypt queries.
pub struct ODoHConfigs {
  authority: String,
  inner: Vec<ODoHConfig>,
}

impl ODoHConfigs {
  /// Parse ODoH configs retrieved from `authority`
  pub fn new(authority: &str, configs_vec: &[u8]) -> Result<Self> {
    let odoh_configs: ObliviousDoHConfigs =
      parse(&mut (<&[u8]>::clone(&configs_vec))).map_err(OdohClientError::InvalidODoHConfigs)?;
    let inner = odoh_configs
      .into_iter()
      .map(|c| ODoHConfig::from(ObliviousDoHConfigContents::from(c)))
      .collect::<Vec<_>>();
    if inner.is_empty() {
      return Err(OdohClientError::ODoHNoClientConfig);
    }
    info!("[ODoH] Fetched {} ODoH config(s): {authority}", inner.len());

    Ok(Self {
      authority: authority.to_owned(),
      inner,
    })
  }

  /// Config used for queries. No preference negotiation, simply the first one.
  pub fn first(&self) -> &ODoHConfig {
    &self.inner[0]
  }

  /// Authority the configs were retrieved from
  pub fn authority(&self) -> &str {
    &self.authority
  }

  /// Number of configs
  pub fn len(&self) -> usize {
    self.inner.len()
  }

  /// Check if no config is held
  pub fn is_empty(&self) -> bool {
    self.inner.is_empty()
  }
}

#[derive(Debug, Clone)]
/// ODoH config, i.e., HPKE suite and public key of a target
pub struct ODoHConfig {
  inner: ObliviousDoHConfigContents,
}

impl From<ObliviousDoHConfigContents> for ODoHConfig {
  fn from(inner: ObliviousDoHConfigContents) -> Self {
    Self { inner }
  }
}

impl ODoHConfig {
  /// Encrypt query. The returned context is the only way to open the corresponding response.
  pub fn encrypt_query(&self, plaintext_query: &[u8]) -> Result<(Bytes, QueryContext)> {
    if plaintext_query.is_empty() {
      return Err(OdohClientError::InvalidDnsQuery);
    }
    debug!("[ODoH] Encrypt query");
    let mut rng = StdRng::from_entropy();

    let query = ObliviousDoHMessagePlaintext::new(plaintext_query, 0);
    let (query_enc, secret) =
      odoh_rs::encrypt_query(&query, &self.inner, &mut rng).map_err(OdohClientError::ODoHEncryptionError)?;
    let query_body = odoh_rs::compose(&query_enc)
      .map_err(OdohClientError::ODoHEncryptionError)?
      .freeze();
    Ok((query_body, QueryContext { query, secret }))
  }
}

/// Single-use secret binding one encrypted query to its response.
///
/// Opening a response consumes the context, so it cannot be used twice:
///
/// ```compile_fail,E0382
/// fn reuse(ctx: odoh_client_lib::QueryContext, a: bytes::Bytes, b: bytes::Bytes) {
///   let _ = ctx.decrypt_response(&a);
///   // error[E0382]: use of moved value: `ctx`
///   let _ = ctx.decrypt_response(&b);
/// }
/// ```
pub struct QueryContext {
  query: ObliviousDoHMessagePlaintext,
  secret: OdohSecret,
}

impl std::fmt::Debug for QueryContext {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("QueryContext").finish_non_exhaustive()
  }
}

impl QueryContext {
  /// Decrypt response, returning the raw DNS message
  pub fn decrypt_response(self, encrypted_response: &Bytes) -> Result<Bytes> {
    debug!("[ODoH] Decrypt response");
    let response_enc: ObliviousDoHMessage =
      parse(&mut (encrypted_response.clone())).map_err(OdohClientError::ODoHInvalidResponse)?;
    let response_dec = odoh_rs::decrypt_response(&self.query, &response_enc, self.secret)
      .map_err(|_| OdohClientError::ODoHDecryptionFailed)?;
    debug!("[ODoH] Successfully decrypted");

    Ok(response_dec.into_msg())
  }
}
