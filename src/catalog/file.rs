use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{Catalog, Collections};
use crate::error::{Error, Result};
use crate::model::Collection;

/// Catalog backed by a local JSON document: either a saved `/collections`
/// response or a bare array of collections.
pub struct FileCatalog {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Page { collections: Vec<Collection> },
    List(Vec<Collection>),
}

impl FileCatalog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

pub(super) fn parse_document(text: &str) -> std::result::Result<Vec<Collection>, serde_json::Error> {
    Ok(match serde_json::from_str(text)? {
        Document::Page { collections } => collections,
        Document::List(collections) => collections,
    })
}

impl Catalog for FileCatalog {
    fn collections(&self) -> Result<Collections<'_>> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            Error::external(format!("couldn't read catalog {}", self.path.display()), e)
        })?;

        let collections = parse_document(&text).map_err(|e| {
            Error::external(format!("couldn't parse catalog {}", self.path.display()), e)
        })?;

        Ok(Box::new(collections.into_iter().map(Ok::<_, Error>)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_document_forms() -> std::result::Result<(), serde_json::Error> {
        let page = parse_document(r#"{"collections": [{"id": "a"}, {"id": "b"}], "links": []}"#)?;
        let list = parse_document(r#"[{"id": "a"}, {"id": "b"}]"#)?;

        assert_eq!(page, list);
        assert_eq!(page[1].id, "b");
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let catalog = FileCatalog::new("/nonexistent/catalog.json");
        let err = match catalog.collections() {
            Ok(_) => panic!("expected error for a missing catalog file"),
            Err(e) => e,
        };
        assert_eq!(err.kind(), ErrorKind::ExternalService);
    }
}
