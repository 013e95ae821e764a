use serde::{Deserialize, Serialize};

use crate::{DreamService, Result};
use dream_sky_domain::Dream;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
	pub dreams: Vec<Dream>,
}

impl DreamService {
	/// All stored dreams, newest first.
	pub async fn list(&self) -> Result<ListResponse> {
		let mut dreams = self.store.list_all().await?;

		sort_newest_first(&mut dreams);

		Ok(ListResponse { dreams })
	}
}

fn sort_newest_first(dreams: &mut [Dream]) {
	dreams.sort_by(|left, right| {
		right.created_at.cmp(&left.created_at).then_with(|| right.id.cmp(&left.id))
	});
}
