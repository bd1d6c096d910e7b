use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::filter::{CollectionFilter, ExtentPolicy, Query};
use crate::insight::InsightRequester;
use crate::model::{Collection, CollectionInfo};
use crate::output::{Encodable, Encoder, Writer};

// Catalog -> CollectionFilter -> [InsightRequester] -> (Encoder -> Writer)
//
// Catalog          == STAC API or file  ->  Iterator<Result<Collection>>
// CollectionFilter == bbox && interval  ->  first `limit` matches
// InsightRequester == matches' infos    ->  String
// Encoder          == Collection | text ->  Vec<u8>
// Writer           == Vec<u8>           ->  stdout

pub struct Runner {
    catalog: Box<dyn Catalog>,
    requester: Option<Box<dyn InsightRequester>>,
    consumer: Consumer,
    limit: usize,
    policy: ExtentPolicy,
}

impl Runner {
    pub fn new(
        catalog: Box<dyn Catalog>,
        requester: Option<Box<dyn InsightRequester>>,
        encoder: Box<dyn Encoder>,
        writer: Box<dyn Writer>,
        limit: usize,
        policy: ExtentPolicy,
    ) -> Self {
        Self {
            catalog,
            requester,
            consumer: Consumer::new(writer, encoder),
            limit,
            policy,
        }
    }

    /// Runs one search action. Any error aborts this action only.
    pub fn run(&mut self, query: Query) -> Result<Vec<Collection>> {
        info!("searching collections, {}", query);

        let filter = CollectionFilter::new(query, self.limit, self.policy);
        let matches = filter
            .apply(self.catalog.collections()?)
            .collect::<Result<Vec<_>>>()?;
        info!("{} matching collections", matches.len());

        for collection in &matches {
            self.consumer.write(&Encodable::Collection(collection))?;
        }

        if let Some(requester) = &self.requester {
            if matches.is_empty() {
                warn!("no matching collections, skipping insight request");
            } else {
                let infos: Vec<CollectionInfo> = matches.iter().map(Collection::info).collect();
                let insight = requester.request_insight(&infos)?;
                self.consumer.write(&Encodable::Insight(&insight))?;
            }
        }

        Ok(matches)
    }
}

struct Consumer {
    writer: Box<dyn Writer>,
    encoder: Box<dyn Encoder>,
}

impl Consumer {
    fn new(writer: Box<dyn Writer>, encoder: Box<dyn Encoder>) -> Self {
        Self { writer, encoder }
    }

    pub fn write(&mut self, value: &Encodable) -> Result<()> {
        let buf = self.encoder.encode(value)?;

        self.writer
            .write(&buf)
            .map_err(|e| ("writer failed", e))?;

        Ok(())
    }
}
