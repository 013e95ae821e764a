use tokio::sync::RwLock;

use crate::{BoxFuture, DreamStore, Result};
use dream_sky_domain::Dream;

/// Process-local store used when no database is configured. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
	dreams: RwLock<Vec<Dream>>,
}
impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

impl DreamStore for MemoryStore {
	fn append<'a>(&'a self, dream: &'a Dream) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			self.dreams.write().await.push(dream.clone());

			Ok(())
		})
	}

	fn list_all(&self) -> BoxFuture<'_, Result<Vec<Dream>>> {
		Box::pin(async move { Ok(self.dreams.read().await.clone()) })
	}

	fn count(&self) -> BoxFuture<'_, Result<u64>> {
		Box::pin(async move { Ok(self.dreams.read().await.len() as u64) })
	}
}
