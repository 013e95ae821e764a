pub mod dream;
pub mod mood;
pub mod placement;
pub mod sky;
pub mod time_serde;

pub use dream::{Dream, IngestMode, Position, SkyMood};
pub use mood::MoodLabel;
