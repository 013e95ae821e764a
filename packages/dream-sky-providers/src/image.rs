use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::{
	Client,
	header::{HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value;

use dream_sky_config::{DESCRIPTION_PLACEHOLDER, ImageProviderConfig};

#[derive(Debug, PartialEq)]
enum Prediction {
	Ready(String),
	Pending { poll_url: String },
}

/// Generates an illustration for a dream description and returns the image URL.
pub async fn generate(cfg: &ImageProviderConfig, description: &str) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let headers = prediction_headers(cfg)?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"version": cfg.model,
		"input": {
			"prompt": render_prompt(&cfg.prompt_template, description),
			"width": cfg.width,
			"height": cfg.height,
			"num_inference_steps": cfg.num_inference_steps,
			"guidance_scale": cfg.guidance_scale,
		},
	});
	let res = client.post(url).headers(headers.clone()).json(&body).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	match parse_prediction(&json)? {
		Prediction::Ready(image_url) => Ok(image_url),
		Prediction::Pending { poll_url } => poll_prediction(cfg, &client, headers, &poll_url).await,
	}
}

/// Auth and configured headers, plus `Prefer: wait` unless the config sets its own `Prefer`.
fn prediction_headers(cfg: &ImageProviderConfig) -> Result<HeaderMap> {
	let mut headers = crate::auth_headers(&cfg.api_key, &cfg.default_headers)?;

	headers.entry(HeaderName::from_static("prefer")).or_insert(HeaderValue::from_static("wait"));

	Ok(headers)
}

pub fn render_prompt(template: &str, description: &str) -> String {
	template.replace(DESCRIPTION_PLACEHOLDER, description.trim())
}

async fn poll_prediction(
	cfg: &ImageProviderConfig,
	client: &Client,
	headers: HeaderMap,
	poll_url: &str,
) -> Result<String> {
	let interval = Duration::from_millis(cfg.poll_interval_ms);

	for attempt in 1..=cfg.max_polls {
		tokio::time::sleep(interval).await;

		let res = client.get(poll_url).headers(headers.clone()).send().await?;
		let json: Value = res.error_for_status()?.json().await?;

		match parse_prediction(&json)? {
			Prediction::Ready(image_url) => return Ok(image_url),
			Prediction::Pending { .. } => {
				tracing::debug!(provider_id = %cfg.provider_id, attempt, "Image still generating.");
			},
		}
	}

	Err(eyre::eyre!("Image generation did not finish after {} polls.", cfg.max_polls))
}

fn parse_prediction(json: &Value) -> Result<Prediction> {
	let status = json.get("status").and_then(|v| v.as_str()).unwrap_or("succeeded");

	match status {
		"succeeded" => first_output_url(json).map(Prediction::Ready),
		"starting" | "processing" => {
			let poll_url = json
				.get("urls")
				.and_then(|urls| urls.get("get"))
				.and_then(|v| v.as_str())
				.ok_or_else(|| eyre::eyre!("Pending prediction is missing urls.get."))?;

			Ok(Prediction::Pending { poll_url: poll_url.to_string() })
		},
		other => {
			let detail = json.get("error").and_then(|v| v.as_str()).unwrap_or("no error detail");

			Err(eyre::eyre!("Image prediction {other}: {detail}"))
		},
	}
}

fn first_output_url(json: &Value) -> Result<String> {
	let output = json
		.get("output")
		.ok_or_else(|| eyre::eyre!("Image response is missing output."))?;
	let url = match output {
		Value::String(url) => Some(url.as_str()),
		Value::Array(items) => items.first().and_then(|v| v.as_str()),
		_ => None,
	};

	match url {
		Some(url) if !url.trim().is_empty() => Ok(url.to_string()),
		_ => Err(eyre::eyre!("Image response output contains no URL.")),
	}
}
