use serde::{Deserialize, Serialize};

use crate::{DreamService, Result};
use dream_sky_domain::IngestMode;

/// Which analysis the next submission will receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeStatus {
	pub mode: IngestMode,
	pub stored_count: u64,
	pub threshold: u64,
	pub ai_configured: bool,
}

impl DreamService {
	pub async fn mode_status(&self) -> Result<ModeStatus> {
		let stored_count = self.store.count().await?;
		let threshold = self.cfg.ingest.ai_threshold;

		Ok(ModeStatus {
			mode: IngestMode::for_count(stored_count, threshold),
			stored_count,
			threshold,
			ai_configured: self.providers.is_configured(),
		})
	}
}
