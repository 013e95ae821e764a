use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::mood::MoodLabel;

/// One submitted dream, rendered as a star. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dream {
	pub id: Uuid,
	pub description: String,
	pub image_reference: String,
	pub mood: String,
	pub mood_score: f64,
	pub position: Position,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkyMood {
	pub label: MoodLabel,
	pub color: String,
}

/// How a submission is analyzed, derived from the number of dreams already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestMode {
	Manual,
	Ai,
}
impl IngestMode {
	pub fn for_count(stored_count: u64, threshold: u64) -> Self {
		if stored_count < threshold { Self::Manual } else { Self::Ai }
	}
}
