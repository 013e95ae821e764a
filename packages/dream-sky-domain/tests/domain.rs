use rand::{SeedableRng, rngs::StdRng};
use time::macros::datetime;
use uuid::Uuid;

use dream_sky_domain::{
	Dream, IngestMode, MoodLabel, Position,
	mood::{self, DEFAULT_SCORE, NEGATIVE_SCORE, POSITIVE_SCORE},
	placement::{self, SKY_EXTENT},
	sky::{self, NEGATIVE_COLOR, NEUTRAL_COLOR, POSITIVE_COLOR},
};

fn dream_with_score(mood_score: f64) -> Dream {
	Dream {
		id: Uuid::new_v4(),
		description: "Flying over mountains".to_string(),
		image_reference: "img://test".to_string(),
		mood: "Joyful".to_string(),
		mood_score,
		position: Position { x: 0.0, y: 0.0, z: 0.0 },
		created_at: datetime!(2024-03-01 08:30:00 UTC),
	}
}

fn dreams_with_scores(scores: &[f64]) -> Vec<Dream> {
	scores.iter().copied().map(dream_with_score).collect()
}

#[test]
fn manual_mood_table() {
	for label in ["Joyful", "Peaceful", "joyful", "JOYFUL", "pEaCeFuL"] {
		assert_eq!(mood::score_manual_mood(label), POSITIVE_SCORE, "label {label}");
	}
	for label in ["Anxious", "Frightening", "ANXIOUS", "frightening"] {
		assert_eq!(mood::score_manual_mood(label), NEGATIVE_SCORE, "label {label}");
	}
	for label in ["Neutral", "Mysterious", "Bittersweet", "x"] {
		assert_eq!(mood::score_manual_mood(label), DEFAULT_SCORE, "label {label}");
	}
}

#[test]
fn ai_label_table() {
	assert_eq!(mood::score_ai_label("positive"), ("Joyful", 0.8));
	assert_eq!(mood::score_ai_label("POSITIVE"), ("Joyful", 0.8));
	assert_eq!(mood::score_ai_label("negative"), ("Anxious", -0.8));
	assert_eq!(mood::score_ai_label("Negative"), ("Anxious", -0.8));
	assert_eq!(mood::score_ai_label("LABEL_1"), ("Mysterious", 0.1));
	assert_eq!(mood::score_ai_label(""), ("Mysterious", 0.1));
}

#[test]
fn classify_average_thresholds() {
	assert_eq!(mood::classify_average(0.31), MoodLabel::Positive);
	assert_eq!(mood::classify_average(1.0), MoodLabel::Positive);
	assert_eq!(mood::classify_average(-0.31), MoodLabel::Negative);
	assert_eq!(mood::classify_average(-1.0), MoodLabel::Negative);
	assert_eq!(mood::classify_average(0.3), MoodLabel::Neutral);
	assert_eq!(mood::classify_average(-0.3), MoodLabel::Neutral);
	assert_eq!(mood::classify_average(0.0), MoodLabel::Neutral);
	assert_eq!(mood::classify_average(0.2), MoodLabel::Neutral);
}

#[test]
fn empty_sky_is_neutral_every_time() {
	let first = sky::compute_sky_mood(&[]);

	let _ = sky::compute_sky_mood(&dreams_with_scores(&[0.8, 0.8]));

	let second = sky::compute_sky_mood(&[]);

	assert_eq!(first.label, MoodLabel::Neutral);
	assert_eq!(first.color, NEUTRAL_COLOR);
	assert_eq!(first, second);
}

#[test]
fn mixed_scores_average_to_neutral_sky() {
	let dreams = dreams_with_scores(&[0.8, 0.8, -0.8, 0.1, 0.1]);
	let avg = sky::average_score(&dreams).expect("Average must exist for non-empty input.");

	assert!((avg - 0.2).abs() < 1e-9, "unexpected average {avg}");

	let sky_mood = sky::compute_sky_mood(&dreams);

	assert_eq!(sky_mood.label, MoodLabel::Neutral);
	assert_eq!(sky_mood.color, NEUTRAL_COLOR);
}

#[test]
fn sky_label_and_color_agree() {
	let positive = sky::compute_sky_mood(&dreams_with_scores(&[0.8, 0.8, 0.1]));
	let negative = sky::compute_sky_mood(&dreams_with_scores(&[-0.8, -0.8, 0.1]));
	// Average 0.1 is above zero but inside the neutral band.
	let faint = sky::compute_sky_mood(&dreams_with_scores(&[0.1]));

	assert_eq!((positive.label, positive.color.as_str()), (MoodLabel::Positive, POSITIVE_COLOR));
	assert_eq!((negative.label, negative.color.as_str()), (MoodLabel::Negative, NEGATIVE_COLOR));
	assert_eq!((faint.label, faint.color.as_str()), (MoodLabel::Neutral, NEUTRAL_COLOR));
}

#[test]
fn placements_stay_inside_the_sky() {
	let mut rng = StdRng::seed_from_u64(7);

	for _ in 0..10_000 {
		let position = placement::place(&mut rng);

		for value in [position.x, position.y, position.z] {
			assert!((-SKY_EXTENT..=SKY_EXTENT).contains(&value), "out of range: {value}");
		}
	}
}

#[test]
fn placement_is_reproducible_from_seed() {
	let mut left = StdRng::seed_from_u64(42);
	let mut right = StdRng::seed_from_u64(42);

	for _ in 0..16 {
		assert_eq!(placement::place(&mut left), placement::place(&mut right));
	}
}

#[test]
fn ingest_mode_switches_at_threshold() {
	assert_eq!(IngestMode::for_count(0, 5), IngestMode::Manual);
	assert_eq!(IngestMode::for_count(4, 5), IngestMode::Manual);
	assert_eq!(IngestMode::for_count(5, 5), IngestMode::Ai);
	assert_eq!(IngestMode::for_count(500, 5), IngestMode::Ai);
}

#[test]
fn dream_serializes_with_camel_case_fields() {
	let dream = dream_with_score(0.8);
	let json = serde_json::to_value(&dream).expect("serialize failed");

	assert_eq!(json["imageReference"], "img://test");
	assert_eq!(json["moodScore"], 0.8);
	assert_eq!(json["createdAt"], "2024-03-01T08:30:00Z");
	assert_eq!(json["position"]["x"], 0.0);
}

#[test]
fn sky_mood_serializes_label_and_color_only() {
	let json = serde_json::to_value(sky::compute_sky_mood(&[])).expect("serialize failed");

	assert_eq!(json, serde_json::json!({ "label": "neutral", "color": "#1a1a2e" }));
}
