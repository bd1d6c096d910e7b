mod chat;
mod prompt;

pub use chat::{ApiKey, ChatCompletionRequester, ChatConfig, DEFAULT_API_URL, DEFAULT_MODEL};
pub use prompt::{insight_prompt, SYSTEM_PROMPT};

use crate::error::Result;
use crate::model::CollectionInfo;

/// Turns matched collections into free-form text. The text is opaque to the
/// caller, it's only displayed.
pub trait InsightRequester {
    fn request_insight(&self, collections: &[CollectionInfo]) -> Result<String>;
}
