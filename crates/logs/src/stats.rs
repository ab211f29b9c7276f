//! Aggregation queries over the access-log collection.
//!
//! Three query shapes, all delegated to the aggregation engine:
//!
//! - count-all
//! - group by field, sum
//! - group by field, sum, sort descending, limit
//!
//! Group ordering is whatever the engine returns (first-seen for plain
//! grouping, count-descending for the top query); results are kept as
//! ordered rows rather than re-sorted client-side.

use futures::TryStreamExt;
use mongodb::bson::{Document, doc, from_document};
use mongodb::{Client, Collection};
use serde::Deserialize;

use webstash_core::Error;

/// One aggregation result row: a grouped key and its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupCount {
    #[serde(rename = "_id")]
    pub key: String,
    pub count: u64,
}

/// Handle over one access-log collection.
pub struct LogStats {
    collection: Collection<Document>,
}

impl LogStats {
    /// Connect to the database and bind to the named collection.
    ///
    /// # Errors
    ///
    /// Returns `Error::Query` if the URI is invalid or the client cannot
    /// be constructed. Connectivity failures beyond that surface on the
    /// first query, per the driver's lazy connection model.
    pub async fn connect(uri: &str, db: &str, collection: &str) -> Result<Self, Error> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| Error::Query(format!("failed to connect: {}", e)))?;
        tracing::debug!(uri, db, collection, "bound log collection");
        Ok(Self::new(client.database(db).collection(collection)))
    }

    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    /// Total number of log records. 0 on an empty collection.
    pub async fn count_documents(&self) -> Result<u64, Error> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(|e| Error::Query(e.to_string()))
    }

    /// Occurrence count per HTTP method, in first-seen group order.
    pub async fn count_by_method(&self) -> Result<Vec<GroupCount>, Error> {
        self.aggregate(vec![group_count("method")]).await
    }

    /// The `limit` most frequent client IPs, highest first. Ties break by
    /// the engine's natural order.
    pub async fn top_ips(&self, limit: u32) -> Result<Vec<GroupCount>, Error> {
        self.aggregate(top_pipeline("ip", limit)).await
    }

    async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<GroupCount>, Error> {
        let mut cursor = self
            .collection
            .aggregate(pipeline)
            .await
            .map_err(|e| Error::Query(e.to_string()))?;

        let mut rows = Vec::new();
        while let Some(doc) = cursor.try_next().await.map_err(|e| Error::Query(e.to_string()))? {
            rows.push(parse_row(doc)?);
        }
        Ok(rows)
    }
}

/// `$group` stage summing occurrences of each distinct value of `field`.
fn group_count(field: &str) -> Document {
    doc! {"$group": {"_id": format!("${field}"), "count": {"$sum": 1}}}
}

/// Group by `field`, sort by count descending, keep the first `limit`.
fn top_pipeline(field: &str, limit: u32) -> Vec<Document> {
    vec![
        group_count(field),
        doc! {"$sort": {"count": -1}},
        doc! {"$limit": i64::from(limit)},
    ]
}

fn parse_row(doc: Document) -> Result<GroupCount, Error> {
    from_document(doc).map_err(|e| Error::MalformedRow(e.to_string()))
}
