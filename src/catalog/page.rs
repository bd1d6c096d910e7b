use serde::Deserialize;

use crate::model::Collection;

/// Body of a STAC API `/collections` response.
#[derive(Debug, Deserialize)]
pub struct CollectionsPage {
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

impl CollectionsPage {
    pub fn next_href(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.rel == "next")
            .map(|l| l.href.as_str())
    }
}
