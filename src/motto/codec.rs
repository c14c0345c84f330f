//! Storage encoding for mottos.
//!
//! This is plain base64, not encryption: anyone with database access can read
//! the stored value.

use anyhow::Context;
use base64ct::{Base64, Encoding};

pub fn encode_motto(text: &str) -> String {
    Base64::encode_string(text.as_bytes())
}

pub fn decode_motto(stored: &str) -> anyhow::Result<String> {
    let bytes = Base64::decode_vec(stored)
        .map_err(|e| anyhow::anyhow!(e.to_string()))
        .context("decode stored motto")?;
    String::from_utf8(bytes).context("stored motto is not utf-8")
}
