use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

pub const DESCRIPTION_PLACEHOLDER: &str = "{description}";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	#[serde(default)]
	pub storage: Storage,
	#[serde(default)]
	pub ingest: Ingest,
	#[serde(default)]
	pub providers: Providers,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
	#[serde(default = "default_uploads_dir")]
	pub uploads_dir: PathBuf,
	#[serde(default = "default_max_body_bytes")]
	pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
	/// Optional. Dreams live in process memory when no database is configured.
	pub postgres: Option<Postgres>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Ingest {
	/// Number of stored dreams after which submissions are analyzed by the AI providers.
	pub ai_threshold: u64,
	pub placeholder_image: String,
	/// Optional. Fixes the star placement sequence, e.g. for demos.
	pub placement_seed: Option<u64>,
}
impl Default for Ingest {
	fn default() -> Self {
		Self {
			ai_threshold: 5,
			placeholder_image: default_placeholder_image(),
			placement_seed: None,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Providers {
	pub sentiment: Option<SentimentProviderConfig>,
	pub image: Option<ImageProviderConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SentimentProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	/// Model version identifier sent with each prediction.
	pub model: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
	#[serde(default = "default_prompt_template")]
	pub prompt_template: String,
	#[serde(default = "default_image_side")]
	pub width: u32,
	#[serde(default = "default_image_side")]
	pub height: u32,
	#[serde(default = "default_num_inference_steps")]
	pub num_inference_steps: u32,
	#[serde(default = "default_guidance_scale")]
	pub guidance_scale: f32,
	#[serde(default = "default_poll_interval_ms")]
	pub poll_interval_ms: u64,
	#[serde(default = "default_max_polls")]
	pub max_polls: u32,
}

fn default_uploads_dir() -> PathBuf {
	PathBuf::from("uploads")
}

fn default_max_body_bytes() -> usize {
	10 * 1_024 * 1_024
}

fn default_placeholder_image() -> String {
	"https://via.placeholder.com/1024x1024.png/1a1a2e/ffffff?text=No+Image".to_string()
}

fn default_prompt_template() -> String {
	"A dreamlike, ethereal, mystical, and otherworldly image capturing: {description}".to_string()
}

fn default_image_side() -> u32 {
	1_024
}

fn default_num_inference_steps() -> u32 {
	25
}

fn default_guidance_scale() -> f32 {
	7.5
}

fn default_poll_interval_ms() -> u64 {
	1_000
}

fn default_max_polls() -> u32 {
	60
}
