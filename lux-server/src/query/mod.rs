//! Collection search pipeline
//!
//! filter objects -> resolve producers and classifiers per object -> assemble
//! [`SearchResult`]s in store order.

pub mod classifiers;
pub mod filters;
pub mod nationalities;
pub mod producers;
pub mod timespan;

use lux_common::{Result, SearchRequest, SearchResult};
use sqlx::SqliteConnection;
use tracing::debug;

pub use filters::{ObjectFilter, RESULT_LIMIT};
pub use timespan::format_timespan;

use classifiers::fetch_classifications;
use filters::fetch_matching_objects;
use nationalities::NationalityCache;
use producers::fetch_producers;

/// Run one search on a connection owned by the caller
///
/// Results keep the object query's `(label, date)` order; the response
/// layer applies the final label sort.
pub async fn search(conn: &mut SqliteConnection, request: &SearchRequest) -> Result<Vec<SearchResult>> {
    let filter = ObjectFilter::from_request(request);
    let objects = fetch_matching_objects(conn, &filter).await?;
    debug!(
        "{} predicate(s) matched {} object(s)",
        filter.predicates().len(),
        objects.len()
    );

    let mut nationalities = NationalityCache::default();
    let mut results = Vec::with_capacity(objects.len());

    for object in objects {
        let produced_by = fetch_producers(conn, object.id, &mut nationalities).await?;
        let classified_as = fetch_classifications(conn, object.id).await?;

        results.push(SearchResult {
            id: object.id,
            label: object.label.unwrap_or_default(),
            date: object.date,
            produced_by: produced_by.into_iter().map(|p| p.into_record()).collect(),
            classified_as,
        });
    }

    debug!("Resolved nationalities for {} agent(s)", nationalities.len());
    Ok(results)
}
