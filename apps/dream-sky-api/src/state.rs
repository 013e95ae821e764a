use std::sync::Arc;

use dream_sky_service::DreamService;
use dream_sky_storage::{DreamStore, db::Db, memory::MemoryStore};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<DreamService>,
}
impl AppState {
	/// Uses Postgres when configured and process memory otherwise. Both ingestion and the sky
	/// read from the same store.
	pub async fn new(config: dream_sky_config::Config) -> color_eyre::Result<Self> {
		let store: Arc<dyn DreamStore> = match &config.storage.postgres {
			Some(postgres) => {
				let db = Db::connect(postgres).await?;

				db.ensure_schema().await?;

				tracing::info!("Using Postgres dream store.");

				Arc::new(db)
			},
			None => {
				tracing::info!("No database configured. Dreams are kept in memory.");

				Arc::new(MemoryStore::new())
			},
		};

		Ok(Self::from_service(DreamService::new(config, store)))
	}

	pub fn from_service(service: DreamService) -> Self {
		Self { service: Arc::new(service) }
	}
}
