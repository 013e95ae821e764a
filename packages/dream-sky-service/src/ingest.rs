use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{DreamService, Error, ImageProvider, Result, SentimentProvider};
use dream_sky_domain::{Dream, IngestMode, mood};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitDreamRequest {
	pub description: String,
	pub mood: Option<String>,
	pub image_reference: Option<String>,
}

/// One submission together with the number of dreams stored when it arrived.
#[derive(Clone, Debug)]
pub struct IngestInput {
	pub description: String,
	pub mood: Option<String>,
	pub image_reference: Option<String>,
	pub stored_count: u64,
}

struct Analysis {
	mood: String,
	mood_score: f64,
	image_reference: String,
}

impl DreamService {
	/// Reads the current count, ingests the submission and appends the resulting dream.
	///
	/// Concurrent submissions around the threshold may observe the same count and resolve to the
	/// same mode.
	pub async fn submit(&self, req: SubmitDreamRequest) -> Result<Dream> {
		let stored_count = self.store.count().await?;
		let SubmitDreamRequest { description, mood, image_reference } = req;
		let dream = self
			.ingest(IngestInput { description, mood, image_reference, stored_count })
			.await?;

		self.store.append(&dream).await?;

		tracing::info!(dream_id = %dream.id, mood = %dream.mood, "Dream stored.");

		Ok(dream)
	}

	/// Turns one submission into a finalized dream without persisting it.
	pub async fn ingest(&self, input: IngestInput) -> Result<Dream> {
		let threshold = self.cfg.ingest.ai_threshold;
		let mode = IngestMode::for_count(input.stored_count, threshold);
		let description = input.description.trim().to_string();
		let analysis = match mode {
			IngestMode::Manual => {
				tracing::info!(
					stored_count = input.stored_count,
					threshold,
					"Manual mode: dream {}/{threshold}.",
					input.stored_count + 1
				);

				self.analyze_manual(&description, input.mood.as_deref(), input.image_reference)?
			},
			IngestMode::Ai => {
				tracing::info!(stored_count = input.stored_count, threshold, "AI mode.");

				self.analyze_ai(&description).await?
			},
		};

		Ok(Dream {
			id: Uuid::new_v4(),
			description,
			image_reference: analysis.image_reference,
			mood: analysis.mood,
			mood_score: analysis.mood_score,
			position: self.place_star(),
			created_at: OffsetDateTime::now_utc(),
		})
	}

	fn analyze_manual(
		&self,
		description: &str,
		mood: Option<&str>,
		image_reference: Option<String>,
	) -> Result<Analysis> {
		let mood = mood.map(str::trim).filter(|value| !value.is_empty());
		let mut missing = Vec::new();

		if description.is_empty() {
			missing.push("description".to_string());
		}
		if mood.is_none() {
			missing.push("mood".to_string());
		}

		let Some(mood) = mood.filter(|_| missing.is_empty()) else {
			return Err(Error::Validation {
				fields: missing,
				message: "Dream description and mood are required in manual mode.".to_string(),
			});
		};
		let image_reference = image_reference
			.map(|value| value.trim().to_string())
			.filter(|value| !value.is_empty())
			.unwrap_or_else(|| self.cfg.ingest.placeholder_image.clone());

		Ok(Analysis {
			mood: mood.to_string(),
			mood_score: mood::score_manual_mood(mood),
			image_reference,
		})
	}

	async fn analyze_ai(&self, description: &str) -> Result<Analysis> {
		if description.is_empty() {
			return Err(Error::Validation {
				fields: vec!["description".to_string()],
				message: "Dream description is required.".to_string(),
			});
		}

		let (Some(sentiment), Some(image)) =
			(self.providers.sentiment.as_ref(), self.providers.image.as_ref())
		else {
			return Err(Error::ServiceUnavailable {
				message: "AI providers are not configured. Add [providers.sentiment] and [providers.image] to the config."
					.to_string(),
			});
		};
		let (label, image_reference) =
			tokio::try_join!(classify(sentiment, description), generate(image, description))?;
		let (mood, mood_score) = mood::score_ai_label(&label);

		tracing::info!(%label, mood, "Mood determined.");

		Ok(Analysis { mood: mood.to_string(), mood_score, image_reference })
	}
}

async fn classify(provider: &Arc<dyn SentimentProvider>, description: &str) -> Result<String> {
	provider.classify(description).await.map_err(|err| {
		tracing::warn!(error = %err, "Sentiment classification failed.");

		Error::Capability { capability: "sentiment".to_string(), message: err.to_string() }
	})
}

async fn generate(provider: &Arc<dyn ImageProvider>, description: &str) -> Result<String> {
	let image_reference = provider.generate(description).await.map_err(|err| {
		tracing::warn!(error = %err, "Image generation failed.");

		Error::Capability { capability: "image".to_string(), message: err.to_string() }
	})?;

	if image_reference.trim().is_empty() {
		return Err(Error::Capability {
			capability: "image".to_string(),
			message: "Image provider returned an empty reference.".to_string(),
		});
	}

	tracing::info!("Image generated.");

	Ok(image_reference)
}
