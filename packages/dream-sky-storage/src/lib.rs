pub mod db;
pub mod memory;
pub mod models;
pub mod schema;

mod error;

pub use error::Error;

use std::{future::Future, pin::Pin};

use dream_sky_domain::Dream;

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Append-only dream storage shared by ingestion, listing and sky aggregation.
///
/// `append` must be atomic with respect to concurrent `append`, `list_all` and `count`.
/// `list_all` makes no ordering promise.
pub trait DreamStore
where
	Self: Send + Sync,
{
	fn append<'a>(&'a self, dream: &'a Dream) -> BoxFuture<'a, Result<()>>;

	fn list_all(&self) -> BoxFuture<'_, Result<Vec<Dream>>>;

	fn count(&self) -> BoxFuture<'_, Result<u64>>;
}
