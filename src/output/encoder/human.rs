use super::encoder::{Encodable, Encoder};
use crate::error::Result;
use crate::model::Collection;

pub struct HumanReadableEncoder {}

impl HumanReadableEncoder {
    pub fn new() -> Self {
        Self {}
    }

    fn encode_collection(&self, collection: &Collection) -> Result<Vec<u8>> {
        let line = [
            collection.id.clone(),
            collection.title.clone().unwrap_or_else(|| "-".to_owned()),
            collection.spatial_extent()?.to_string(),
            collection.temporal_extent()?.to_string(),
        ];
        Ok(String::into_bytes(line.join("\t")))
    }
}

impl Encoder for HumanReadableEncoder {
    fn encode(&self, value: &Encodable) -> Result<Vec<u8>> {
        match value {
            Encodable::Collection(c) => self.encode_collection(c),
            Encodable::Insight(text) => Ok(format!("\n{}", text).into_bytes()),
        }
    }
}
