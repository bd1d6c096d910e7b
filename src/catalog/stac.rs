use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use super::page::CollectionsPage;
use super::{Catalog, Collections};
use crate::error::{Error, ErrorKind, Result};
use crate::model::Collection;

/// STAC API client. Collections are fetched page by page as they are consumed.
pub struct StacApiCatalog {
    client: Client,
    root: String,
}

impl StacApiCatalog {
    pub fn new(root: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Configuration, "couldn't build HTTP client", e))?;

        Ok(Self {
            client,
            root: root.trim_end_matches('/').to_owned(),
        })
    }

    pub fn collections_url(&self) -> String {
        format!("{}/collections", self.root)
    }

    fn fetch_page(&self, url: &str) -> Result<CollectionsPage> {
        debug!("fetching collections page {}", url);

        self.client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<CollectionsPage>())
            .map_err(|e| Error::external(format!("catalog request to {} failed", url), e))
    }
}

impl Catalog for StacApiCatalog {
    fn collections(&self) -> Result<Collections<'_>> {
        Ok(Box::new(Pages {
            catalog: self,
            next: Some(self.collections_url()),
            seen: HashSet::new(),
            buffer: VecDeque::new(),
        }))
    }
}

struct Pages<'a> {
    catalog: &'a StacApiCatalog,
    next: Option<String>,
    seen: HashSet<String>,
    buffer: VecDeque<Collection>,
}

impl<'a> Iterator for Pages<'a> {
    type Item = Result<Collection>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(collection) = self.buffer.pop_front() {
                return Some(Ok(collection));
            }

            let url = self.next.take()?;
            // A catalog linking back to an earlier page would never end.
            if !self.seen.insert(url.clone()) {
                debug!("page {} already fetched, stopping", url);
                return None;
            }

            match self.catalog.fetch_page(&url) {
                Ok(page) => {
                    self.next = page.next_href().map(String::from);
                    self.buffer.extend(page.collections);
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collections_url() -> Result<()> {
        let timeout = Duration::from_secs(1);
        let catalog = StacApiCatalog::new("https://example.com/api/stac/v1/", timeout)?;
        assert_eq!(
            catalog.collections_url(),
            "https://example.com/api/stac/v1/collections"
        );
        Ok(())
    }
}
