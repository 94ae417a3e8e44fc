// Handle packet buffer of DNS message (encode/decode)
use crate::error::*;
use hickory_proto::{
  op::{update_message::MAX_PAYLOAD_LEN, Edns, Message, MessageType, OpCode, Query},
  rr::{domain::Name, DNSClass, RecordType},
  serialize::binary::{BinDecodable, BinEncodable},
};
use std::str::FromStr;

pub fn decode(packet_buf: &[u8]) -> anyhow::Result<Message> {
  Message::from_bytes(packet_buf).map_err(|e| anyhow!("Undecodable packet buffer as DNS message: {}", e))
}

pub fn encode(msg: &Message) -> anyhow::Result<Vec<u8>> {
  msg
    .to_bytes()
    .map_err(|e| anyhow!("Failed to encode DNS message: {}", e))
}

/// Build a recursive query message for the given name and record type like "A", "AAAA", "HTTPS"
pub fn build_query(fqdn: &str, qtype: &str) -> anyhow::Result<Message> {
  let qname = Name::from_ascii(fqdn).map_err(|e| anyhow!("Invalid query name {fqdn}: {e}"))?;
  let qtype = RecordType::from_str(&qtype.to_ascii_uppercase()).map_err(|e| anyhow!("Invalid query type {qtype}: {e}"))?;
  let mut query = Query::query(qname, qtype);
  query.set_query_class(DNSClass::IN);

  let id: u16 = rand::random();

  let mut msg = Message::new();
  msg
    .add_query(query)
    .set_id(id)
    .set_message_type(MessageType::Query)
    .set_op_code(OpCode::Query)
    .set_recursion_desired(true);
  msg
    .extensions_mut()
    .get_or_insert_with(Edns::new)
    .set_max_payload(MAX_PAYLOAD_LEN)
    .set_version(0);
  Ok(msg)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn build_query_works() {
    let msg = build_query("dns.google.", "aaaa").unwrap();
    let buf = encode(&msg).unwrap();
    let decoded = decode(&buf).unwrap();

    assert_eq!(decoded.id(), msg.id());
    assert_eq!(decoded.message_type(), MessageType::Query);
    assert!(decoded.recursion_desired());
    let query = decoded.query().unwrap();
    assert_eq!(query.name().to_string(), "dns.google.");
    assert_eq!(query.query_type(), RecordType::AAAA);
  }

  #[test]
  fn build_query_rejects_unknown_type() {
    assert!(build_query("dns.google.", "NOT-A-TYPE").is_err());
  }

  #[test]
  fn decode_rejects_garbage() {
    assert!(decode(&[0x00, 0x01, 0x02]).is_err());
  }
}
