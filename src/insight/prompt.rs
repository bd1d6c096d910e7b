use crate::error::Result;
use crate::model::CollectionInfo;

pub const SYSTEM_PROMPT: &str = "You are a geospatial data expert and good at ESG research.";

const INSTRUCTION: &str = "Generate insights on how the following geospatial data \
                           could help with the ESG estimate of the target region:";

pub fn insight_prompt(collections: &[CollectionInfo]) -> Result<String> {
    let listing = serde_json::to_string_pretty(collections)
        .map_err(|e| ("collection info serialization failed", e))?;
    Ok(format!("{}\n\n{}", INSTRUCTION, listing))
}
