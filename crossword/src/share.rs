//! Packing a whole puzzle into a string that fits in a link.
//!
//! The puzzle is serialized to JSON, gzipped, and written as URL-safe base64.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::io::{Read, Write};

use crate::{Error, Puzzle, Result};

const LINK_SAFE: GeneralPurpose = GeneralPurpose::new(
  &alphabet::URL_SAFE,
  GeneralPurposeConfig::new()
    .with_encode_padding(false)
    .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encodes `puzzle` as a share string.
pub fn encode(puzzle: &Puzzle) -> Result<String> {
  let json = serde_json::to_vec(puzzle)?;
  let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
  encoder.write_all(&json)?;
  let compressed = encoder.finish()?;
  Ok(LINK_SAFE.encode(compressed))
}

/// Decodes a share string produced by [encode]. Anything malformed or truncated
/// fails with [Error::Decode].
pub fn decode(encoded: &str) -> Result<Puzzle> {
  let compressed = LINK_SAFE
    .decode(encoded.trim())
    .map_err(|e| Error::Decode(format!("bad base64: {e}")))?;

  let mut json = Vec::new();
  GzDecoder::new(compressed.as_slice())
    .read_to_end(&mut json)
    .map_err(|e| Error::Decode(format!("bad gzip data: {e}")))?;

  serde_json::from_slice(&json).map_err(|e| Error::Decode(format!("bad puzzle data: {e}")))
}
