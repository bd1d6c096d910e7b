use serde::Serialize;
use serde_json;

use super::encoder::{Encodable, Encoder};
use crate::error::Result;

#[derive(Serialize)]
struct InsightRepr<'a> {
    insight: &'a str,
}

pub struct JsonEncoder {}

impl JsonEncoder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, value: &Encodable) -> Result<Vec<u8>> {
        let buf = match value {
            Encodable::Collection(c) => serde_json::to_vec(&c.info()),
            Encodable::Insight(text) => serde_json::to_vec(&InsightRepr { insight: text }),
        };
        buf.map_err(|e| ("JSON serialization failed", e).into())
    }
}
