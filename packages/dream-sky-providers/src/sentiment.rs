use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

/// Classifies `text` and returns the highest-scoring label, e.g. `POSITIVE`.
pub async fn classify(cfg: &dream_sky_config::SentimentProviderConfig, text: &str) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"inputs": text,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;
	let label = parse_classification_response(json)?;

	tracing::debug!(provider_id = %cfg.provider_id, %label, "Sentiment classified.");

	Ok(label)
}

// Text classification endpoints answer either `[{label, score}, ..]` or, for batched inputs,
// `[[{label, score}, ..]]`.
fn parse_classification_response(json: Value) -> Result<String> {
	let outer = json
		.as_array()
		.ok_or_else(|| eyre::eyre!("Sentiment response is not an array."))?;
	let candidates = match outer.first() {
		Some(Value::Array(inner)) => inner.as_slice(),
		_ => outer.as_slice(),
	};

	let mut best: Option<(&str, f64)> = None;
	for item in candidates {
		let label = item
			.get("label")
			.and_then(|v| v.as_str())
			.ok_or_else(|| eyre::eyre!("Sentiment item missing label."))?;
		let score = item
			.get("score")
			.and_then(|v| v.as_f64())
			.ok_or_else(|| eyre::eyre!("Sentiment item missing numeric score."))?;
		if best.map(|(_, top)| score > top).unwrap_or(true) {
			best = Some((label, score));
		}
	}

	best.map(|(label, _)| label.to_string())
		.ok_or_else(|| eyre::eyre!("Sentiment response contains no labels."))
}
