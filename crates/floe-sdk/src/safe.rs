//! Drop and show wrappers that resolve ambiguous hierarchy errors.
//!
//! The warehouse answers "does not exist or not authorized" both when the
//! object is missing and when one of its parents is. These wrappers probe the
//! parents on that error: a missing parent makes a drop a no-op and a show a
//! plain [`Error::ObjectNotFound`].

use std::future::Future;

use tracing::debug;

use crate::client::{Client, Connection};
use crate::error::{Error, Result};
use crate::identifiers::ParentHierarchy;

enum Probe {
    ParentMissing,
    Failed(Vec<Error>),
    Found,
}

async fn probe_parents<C, I>(client: &Client<C>, id: &I) -> Probe
where
    C: Connection,
    I: ParentHierarchy + ?Sized,
{
    let mut failures = Vec::new();

    if let Some(schema) = id.parent_schema() {
        match client.schemas().show_by_id(&schema).await {
            Err(err) if err.is_object_not_found() => {
                debug!(schema = %schema, "parent schema is missing");
                return Probe::ParentMissing;
            }
            Err(err) => failures.push(err),
            Ok(_) => {}
        }
    }

    if let Some(database) = id.parent_database() {
        match client.databases().show_by_id(&database).await {
            Err(err) if err.is_object_not_found() => {
                debug!(database = %database, "parent database is missing");
                return Probe::ParentMissing;
            }
            Err(err) => failures.push(err),
            Ok(_) => {}
        }
    }

    if failures.is_empty() {
        Probe::Found
    } else {
        Probe::Failed(failures)
    }
}

/// Runs `drop` and treats a missing parent as success.
///
/// `drop` should render `IF EXISTS`, so only the ambiguous hierarchy error
/// needs resolving here.
pub async fn safe_drop<C, I, F, Fut>(client: &Client<C>, id: &I, drop: F) -> Result<()>
where
    C: Connection,
    I: ParentHierarchy + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let err = match drop().await {
        Ok(()) => return Ok(()),
        Err(err) if !err.is_ambiguous_hierarchy() => return Err(err),
        Err(err) => err,
    };

    match probe_parents(client, id).await {
        Probe::ParentMissing => {
            debug!("drop target's parent is gone, treating drop as done");
            Ok(())
        }
        Probe::Failed(_) | Probe::Found => Err(err),
    }
}

/// Runs `show` and turns a missing parent into [`Error::ObjectNotFound`].
///
/// When the parents exist, the original error is returned joined with any
/// probe failures.
pub async fn safe_show_by_id<C, I, T, F, Fut>(client: &Client<C>, id: &I, show: F) -> Result<T>
where
    C: Connection,
    I: ParentHierarchy + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let err = match show().await {
        Ok(value) => return Ok(value),
        Err(err) if !err.is_ambiguous_hierarchy() => return Err(err),
        Err(err) => err,
    };

    match probe_parents(client, id).await {
        Probe::ParentMissing => {
            debug!("show target's parent is gone, reporting not found");
            Err(Error::ObjectNotFound)
        }
        Probe::Failed(failures) => {
            let mut errors = vec![err];
            errors.extend(failures);
            Err(Error::join(errors))
        }
        Probe::Found => Err(err),
    }
}
