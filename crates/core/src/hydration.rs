//! Batch association resolution.
//!
//! Many-to-one references (transaction -> account, transaction -> linked
//! counterpart, summary -> category) are hydrated in bulk: the distinct set
//! of referenced ids is resolved concurrently, one fetch per unique id, and
//! the results are attached back onto every referencing entity.

use futures::future::try_join_all;
use std::collections::{HashMap, HashSet};
use std::future::Future;

use crate::errors::Result;

/// Resolves each distinct id through `fetch` and returns an id -> value map.
///
/// Duplicate ids are fetched once. A fetch that fails with a not-found
/// error is omitted from the map - the referencing entity ends up with an
/// unresolved (`None`) association instead of failing the batch. Any other
/// failure propagates and fails the whole operation. All fetches for the
/// batch run concurrently.
pub async fn fetch_associated<T, F, Fut, I>(ids: I, fetch: F) -> Result<HashMap<String, T>>
where
    I: IntoIterator<Item = String>,
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let distinct: HashSet<String> = ids.into_iter().filter(|id| !id.is_empty()).collect();

    let lookups = distinct.into_iter().map(|id| {
        let fut = fetch(id.clone());
        async move {
            match fut.await {
                Ok(value) => Ok(Some((id, value))),
                Err(err) if err.is_not_found() => Ok(None),
                Err(err) => Err(err),
            }
        }
    });

    let resolved = try_join_all(lookups).await?;
    Ok(resolved.into_iter().flatten().collect())
}
