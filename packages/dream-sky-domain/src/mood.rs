use serde::{Deserialize, Serialize};

/// Averages strictly above this classify as positive; strictly below its negation, negative.
pub const MOOD_THRESHOLD: f64 = 0.3;

pub const POSITIVE_SCORE: f64 = 0.8;
pub const NEGATIVE_SCORE: f64 = -0.8;
pub const DEFAULT_SCORE: f64 = 0.1;

pub const AI_POSITIVE_MOOD: &str = "Joyful";
pub const AI_NEGATIVE_MOOD: &str = "Anxious";
pub const AI_DEFAULT_MOOD: &str = "Mysterious";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
	Positive,
	Negative,
	Neutral,
}
impl MoodLabel {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Positive => "positive",
			Self::Negative => "negative",
			Self::Neutral => "neutral",
		}
	}
}

/// Scores a user-chosen mood. Unknown labels are accepted and get the default score.
pub fn score_manual_mood(label: &str) -> f64 {
	match label.trim().to_lowercase().as_str() {
		"joyful" | "peaceful" => POSITIVE_SCORE,
		"anxious" | "frightening" => NEGATIVE_SCORE,
		_ => DEFAULT_SCORE,
	}
}

/// Maps a sentiment classifier label to the mood shown to the user and its score.
pub fn score_ai_label(label: &str) -> (&'static str, f64) {
	match label.trim().to_lowercase().as_str() {
		"positive" => (AI_POSITIVE_MOOD, POSITIVE_SCORE),
		"negative" => (AI_NEGATIVE_MOOD, NEGATIVE_SCORE),
		_ => (AI_DEFAULT_MOOD, DEFAULT_SCORE),
	}
}

pub fn classify_average(avg_score: f64) -> MoodLabel {
	if avg_score > MOOD_THRESHOLD {
		MoodLabel::Positive
	} else if avg_score < -MOOD_THRESHOLD {
		MoodLabel::Negative
	} else {
		MoodLabel::Neutral
	}
}
