use tracing::{trace, warn};

use super::query::Query;
use crate::error::{ErrorKind, Result};
use crate::model::Collection;

/// What to do with a collection whose extent can't be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtentPolicy {
    /// Fail the search action.
    Fail,
    /// Log and leave the collection out.
    Skip,
}

impl Default for ExtentPolicy {
    fn default() -> Self {
        ExtentPolicy::Fail
    }
}

pub struct CollectionFilter {
    query: Query,
    limit: usize,
    policy: ExtentPolicy,
}

impl CollectionFilter {
    pub fn new(query: Query, limit: usize, policy: ExtentPolicy) -> Self {
        Self {
            query,
            limit,
            policy,
        }
    }

    /// True iff both the first bbox and the first interval of the collection
    /// overlap the query.
    /// Both extents are read before either is tested, so an incomplete
    /// collection is reported no matter where its box lies.
    pub fn matches(&self, collection: &Collection) -> Result<bool> {
        let bbox = collection.spatial_extent()?;
        let interval = collection.temporal_extent()?;

        if !bbox.intersects(self.query.bbox()) {
            trace!("{}: outside of {}", collection.id, self.query.bbox());
            return Ok(false);
        }
        if !interval.intersects(self.query.interval()) {
            trace!("{}: outside of {}", collection.id, self.query.interval());
            return Ok(false);
        }
        Ok(true)
    }

    /// Lazily keeps the first `limit` matching collections, in source order.
    pub fn apply<I>(&self, collections: I) -> Filtered<'_, I::IntoIter>
    where
        I: IntoIterator<Item = Result<Collection>>,
    {
        Filtered {
            filter: self,
            inner: collections.into_iter(),
            emitted: 0,
            done: false,
        }
    }
}

pub struct Filtered<'a, I> {
    filter: &'a CollectionFilter,
    inner: I,
    emitted: usize,
    done: bool,
}

impl<'a, I> Iterator for Filtered<'a, I>
where
    I: Iterator<Item = Result<Collection>>,
{
    type Item = Result<Collection>;

    fn next(&mut self) -> Option<Self::Item> {
        // Don't pull anything past the limit, every pull may be a page fetch.
        if self.done || self.emitted >= self.filter.limit {
            return None;
        }

        loop {
            let collection = match self.inner.next() {
                Some(Ok(collection)) => collection,
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    return None;
                }
            };

            match self.filter.matches(&collection) {
                Ok(true) => {
                    self.emitted += 1;
                    return Some(Ok(collection));
                }
                Ok(false) => continue,
                Err(e)
                    if e.kind() == ErrorKind::MissingExtentData
                        && self.filter.policy == ExtentPolicy::Skip =>
                {
                    warn!("skipping collection: {}", e.message());
                    continue;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Eager form of [`CollectionFilter::apply`].
pub fn filter_collections<I>(
    collections: I,
    query: Query,
    limit: usize,
    policy: ExtentPolicy,
) -> Result<Vec<Collection>>
where
    I: IntoIterator<Item = Result<Collection>>,
{
    let filter = CollectionFilter::new(query, limit, policy);
    let matches = filter.apply(collections).collect();
    matches
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::Error;
    use crate::model::{Extent, Rectangle, SpatialExtent, TemporalExtent};

    fn collection(id: &str, bbox: [f64; 4], start: Option<&str>, end: Option<&str>) -> Collection {
        Collection {
            id: id.to_owned(),
            title: None,
            description: format!("{} description", id),
            extent: Extent {
                spatial: SpatialExtent {
                    bbox: vec![bbox.to_vec()],
                },
                temporal: TemporalExtent {
                    interval: vec![vec![start.map(String::from), end.map(String::from)]],
                },
            },
        }
    }

    fn matching(id: &str) -> Collection {
        collection(id, [0.0, 0.0, 10.0, 10.0], Some("2021-01-01T00:00:00Z"), None)
    }

    fn elsewhere(id: &str) -> Collection {
        collection(id, [50.0, 50.0, 60.0, 60.0], Some("2021-01-01T00:00:00Z"), None)
    }

    fn too_early(id: &str) -> Collection {
        collection(
            id,
            [0.0, 0.0, 10.0, 10.0],
            Some("2010-01-01T00:00:00Z"),
            Some("2011-01-01T00:00:00Z"),
        )
    }

    fn incomplete(id: &str) -> Collection {
        Collection {
            id: id.to_owned(),
            title: None,
            description: String::new(),
            extent: Extent::default(),
        }
    }

    fn query() -> Query {
        Query::parse("5, 5, 20, 20", "2020-01-01, 2023-01-01").unwrap()
    }

    fn ids(collections: &[Collection]) -> Vec<&str> {
        collections.iter().map(|c| c.id.as_str()).collect()
    }

    fn ok(collections: Vec<Collection>) -> Vec<Result<Collection>> {
        collections.into_iter().map(Ok).collect()
    }

    #[test]
    fn test_limit_truncates_in_order() -> Result<()> {
        let source: Vec<_> = (0..8).map(|i| matching(&format!("c{}", i))).collect();

        let matches = filter_collections(ok(source), query(), 5, ExtentPolicy::Fail)?;
        assert_eq!(ids(&matches), vec!["c0", "c1", "c2", "c3", "c4"]);
        Ok(())
    }

    #[test]
    fn test_fewer_matches_than_limit() -> Result<()> {
        let source = vec![matching("a"), elsewhere("x"), matching("b"), matching("c")];

        let matches = filter_collections(ok(source), query(), 5, ExtentPolicy::Fail)?;
        assert_eq!(ids(&matches), vec!["a", "b", "c"]);
        Ok(())
    }

    #[test]
    fn test_excludes_without_reordering() -> Result<()> {
        let source = vec![
            too_early("early"),
            matching("m1"),
            elsewhere("far"),
            matching("m2"),
            too_early("early2"),
            matching("m3"),
        ];

        let matches = filter_collections(ok(source), query(), 10, ExtentPolicy::Fail)?;
        assert_eq!(ids(&matches), vec!["m1", "m2", "m3"]);
        Ok(())
    }

    #[test]
    fn test_zero_limit() -> Result<()> {
        let matches = filter_collections(ok(vec![matching("a")]), query(), 0, ExtentPolicy::Fail)?;
        assert!(matches.is_empty());
        Ok(())
    }

    #[test]
    fn test_idempotent() -> Result<()> {
        let source = vec![matching("a"), elsewhere("x"), too_early("y"), matching("b")];

        let first = filter_collections(ok(source.clone()), query(), 5, ExtentPolicy::Fail)?;
        let second = filter_collections(ok(source), query(), 5, ExtentPolicy::Fail)?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_does_not_pull_past_limit() -> Result<()> {
        let pulled = Cell::new(0);
        let source = (0..100).map(|i| {
            pulled.set(pulled.get() + 1);
            Ok(matching(&format!("c{}", i)))
        });

        let filter = CollectionFilter::new(query(), 3, ExtentPolicy::Fail);
        let matches = filter.apply(source).collect::<Result<Vec<_>>>()?;
        assert_eq!(matches.len(), 3);
        assert_eq!(pulled.get(), 3);
        Ok(())
    }

    #[test]
    fn test_missing_extent_fails_by_default() {
        let source = vec![matching("a"), incomplete("broken"), matching("b")];

        let err = filter_collections(ok(source), query(), 5, ExtentPolicy::Fail).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingExtentData);
    }

    #[test]
    fn test_missing_extent_skipped_on_request() -> Result<()> {
        let source = vec![matching("a"), incomplete("broken"), matching("b")];

        let matches = filter_collections(ok(source), query(), 5, ExtentPolicy::Skip)?;
        assert_eq!(ids(&matches), vec!["a", "b"]);
        Ok(())
    }

    #[test]
    fn test_missing_interval_fails_outside_bbox() {
        let mut outside = elsewhere("no-interval");
        outside.extent.temporal.interval.clear();

        let filter = CollectionFilter::new(query(), 5, ExtentPolicy::Fail);
        assert_eq!(
            filter.matches(&outside).unwrap_err().kind(),
            ErrorKind::MissingExtentData
        );

        let err = filter_collections(ok(vec![outside]), query(), 5, ExtentPolicy::Fail).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingExtentData);
    }

    #[test]
    fn test_catalog_error_ends_iteration() {
        let source = vec![
            Ok(matching("a")),
            Err(Error::new(ErrorKind::ExternalService, "page 2 failed")),
            Ok(matching("b")),
        ];

        let filter = CollectionFilter::new(query(), 5, ExtentPolicy::Skip);
        let results: Vec<_> = filter.apply(source).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert_eq!(
            results[1].as_ref().unwrap_err().kind(),
            ErrorKind::ExternalService
        );
    }

    #[test]
    fn test_matches_uses_closed_bounds() -> Result<()> {
        let filter = CollectionFilter::new(query(), 5, ExtentPolicy::Fail);
        let corner = collection(
            "corner",
            [20.0, 20.0, 30.0, 30.0],
            Some("2015-01-01T00:00:00Z"),
            Some("2020-01-01T00:00:00Z"),
        );
        assert!(filter.matches(&corner)?);
        assert_eq!(corner.spatial_extent()?, Rectangle::new(20.0, 20.0, 30.0, 30.0));
        Ok(())
    }
}
