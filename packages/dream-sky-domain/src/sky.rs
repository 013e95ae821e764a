use crate::{
	dream::{Dream, SkyMood},
	mood::{self, MoodLabel},
};

pub const POSITIVE_COLOR: &str = "#1a1a4e";
pub const NEGATIVE_COLOR: &str = "#2e1a1a";
pub const NEUTRAL_COLOR: &str = "#1a1a2e";

pub fn color_for(label: MoodLabel) -> &'static str {
	match label {
		MoodLabel::Positive => POSITIVE_COLOR,
		MoodLabel::Negative => NEGATIVE_COLOR,
		MoodLabel::Neutral => NEUTRAL_COLOR,
	}
}

pub fn average_score(dreams: &[Dream]) -> Option<f64> {
	if dreams.is_empty() {
		return None;
	}

	let sum: f64 = dreams.iter().map(|dream| dream.mood_score).sum();

	Some(sum / dreams.len() as f64)
}

/// Ambient sky for the full dream set. The color is derived from the label so the two agree.
pub fn compute_sky_mood(dreams: &[Dream]) -> SkyMood {
	let label = average_score(dreams).map(mood::classify_average).unwrap_or(MoodLabel::Neutral);

	SkyMood { label, color: color_for(label).to_string() }
}
