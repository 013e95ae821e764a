use time::OffsetDateTime;
use uuid::Uuid;

use crate::Error;
use dream_sky_domain::{Dream, Position};

#[derive(Debug, sqlx::FromRow)]
pub struct DreamRow {
	pub dream_id: Uuid,
	pub description: String,
	pub image_reference: String,
	pub mood: String,
	pub mood_score: f64,
	pub pos_x: f64,
	pub pos_y: f64,
	pub pos_z: f64,
	pub created_at: OffsetDateTime,
}

impl From<&Dream> for DreamRow {
	fn from(dream: &Dream) -> Self {
		Self {
			dream_id: dream.id,
			description: dream.description.clone(),
			image_reference: dream.image_reference.clone(),
			mood: dream.mood.clone(),
			mood_score: dream.mood_score,
			pos_x: dream.position.x,
			pos_y: dream.position.y,
			pos_z: dream.position.z,
			created_at: dream.created_at,
		}
	}
}

impl TryFrom<DreamRow> for Dream {
	type Error = Error;

	fn try_from(row: DreamRow) -> Result<Self, Self::Error> {
		if row.image_reference.is_empty() {
			return Err(Error::InvalidRecord(format!(
				"Dream {} has an empty image reference.",
				row.dream_id
			)));
		}

		Ok(Self {
			id: row.dream_id,
			description: row.description,
			image_reference: row.image_reference,
			mood: row.mood,
			mood_score: row.mood_score,
			position: Position { x: row.pos_x, y: row.pos_y, z: row.pos_z },
			created_at: row.created_at,
		})
	}
}
