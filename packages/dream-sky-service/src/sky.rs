use crate::{DreamService, Result};
use dream_sky_domain::{SkyMood, sky};

impl DreamService {
	/// Ambient mood over every stored dream. A quiet sky is neutral.
	pub async fn sky_mood(&self) -> Result<SkyMood> {
		let dreams = self.store.list_all().await?;
		let sky_mood = sky::compute_sky_mood(&dreams);

		tracing::debug!(dreams = dreams.len(), label = sky_mood.label.as_str(), "Sky mood computed.");

		Ok(sky_mood)
	}
}
