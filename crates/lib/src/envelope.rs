//! Text envelope for carrying documents through text-only transports.
//!
//! Writing is strict: [`encode`] always produces base64 of the canonical JSON. Reading is
//! lenient: [`decode`] tries base64 first and falls back to treating the input as raw JSON
//! text when it is not valid base64 or does not decode to UTF-8.

use base64ct::{Base64, Encoding};
use tracing::debug;

use crate::{Doc, ParseOptions, Result};

/// Encodes a document as base64 of its canonical JSON.
pub fn encode(doc: &Doc) -> String {
    Base64::encode_string(doc.to_json_string().as_bytes())
}

/// Decodes an envelope with default parse options.
pub fn decode(payload: &str) -> Result<Doc> {
    decode_with(payload, ParseOptions::default())
}

/// Decodes an envelope, accepting either base64 or raw JSON text.
pub fn decode_with(payload: &str, options: ParseOptions) -> Result<Doc> {
    let payload = payload.trim();
    let text = match Base64::decode_vec(payload) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                debug!(error = %e, "envelope is not UTF-8 after base64, reading as raw text");
                payload.to_string()
            }
        },
        Err(e) => {
            debug!(error = %e, "envelope is not base64, reading as raw text");
            payload.to_string()
        }
    };
    Doc::parse_with(&text, options)
}
