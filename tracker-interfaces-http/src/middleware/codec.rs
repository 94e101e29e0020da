use std::io::Read;

use anyhow::{bail, Result};
use axum::http::{header, HeaderMap};
use flate2::read::GzDecoder;

use tracker_domain::AnomalyPayload;

/// Decodes an anomaly-shaped JSON body, gunzipping it first when the client
/// sent `Content-Encoding: gzip`. Decompressed output is held to `limit` bytes.
pub fn decode_payload(headers: &HeaderMap, body: &[u8], limit: u64) -> Result<AnomalyPayload> {
    let content = maybe_gunzip(headers, body, limit)?;
    Ok(serde_json::from_str(&content)?)
}

fn maybe_gunzip(headers: &HeaderMap, body: &[u8], limit: u64) -> Result<String> {
    let gzipped = headers
        .get(header::CONTENT_ENCODING)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().eq_ignore_ascii_case("gzip"))
        .unwrap_or(false);
    if gzipped {
        let mut out = Vec::new();
        GzDecoder::new(body)
            .take(limit.saturating_add(1))
            .read_to_end(&mut out)?;
        if out.len() as u64 > limit {
            bail!("gzip body inflates past {} bytes", limit);
        }
        return Ok(String::from_utf8(out)?);
    }
    Ok(String::from_utf8(body.to_vec())?)
}
