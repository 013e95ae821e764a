use std::{
	env,
	path::{Path, PathBuf},
	sync::Arc,
};

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::Value;
use tower::util::ServiceExt;
use uuid::Uuid;

use dream_sky_api::{routes, state::AppState};
use dream_sky_config::{Config, Ingest, Providers as ProviderConfigs, Service, Storage};
use dream_sky_domain::Dream;
use dream_sky_service::{BoxFuture, DreamService, ImageProvider, Providers, SentimentProvider};
use dream_sky_storage::memory::MemoryStore;

const BOUNDARY: &str = "dream-sky-test-boundary";
const PLACEHOLDER: &str = "img://placeholder";

struct PositiveSentiment;
impl SentimentProvider for PositiveSentiment {
	fn classify<'a>(&'a self, _text: &'a str) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(async move { Ok("positive".to_string()) })
	}
}

struct StaticImage;
impl ImageProvider for StaticImage {
	fn generate<'a>(&'a self, _text: &'a str) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(async move { Ok("https://images.example/generated.png".to_string()) })
	}
}

fn test_config(uploads_dir: PathBuf, ai_threshold: u64) -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
			uploads_dir,
			max_body_bytes: 1024 * 1024,
		},
		storage: Storage::default(),
		ingest: Ingest {
			ai_threshold,
			placeholder_image: PLACEHOLDER.to_string(),
			placement_seed: Some(11),
		},
		providers: ProviderConfigs::default(),
	}
}

fn uploads_dir() -> PathBuf {
	env::temp_dir().join(format!("dream-sky-http-{}", Uuid::new_v4().simple()))
}

async fn manual_app(uploads_dir: PathBuf) -> Router {
	let state = AppState::new(test_config(uploads_dir, 5)).await.expect("Failed to build state.");

	routes::router(state)
}

fn ai_app(uploads_dir: PathBuf) -> Router {
	let providers = Providers::new(Some(Arc::new(PositiveSentiment)), Some(Arc::new(StaticImage)));
	let service = DreamService::with_providers(
		test_config(uploads_dir, 0),
		Arc::new(MemoryStore::new()),
		providers,
	);

	routes::router(AppState::from_service(service))
}

enum Part<'a> {
	Text(&'a str, &'a str),
	File(&'a str, &'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
	let mut body = Vec::new();

	for part in parts {
		body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());

		match part {
			Part::Text(name, value) => {
				body.extend_from_slice(
					format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
						.as_bytes(),
				);
			},
			Part::File(name, file_name, bytes) => {
				body.extend_from_slice(
					format!(
						"Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
					)
					.as_bytes(),
				);
				body.extend_from_slice(bytes);
				body.extend_from_slice(b"\r\n");
			},
		}
	}

	body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

	body
}

fn submit_request(parts: &[Part<'_>]) -> Request<Body> {
	Request::builder()
		.method("POST")
		.uri("/api/dreams")
		.header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
		.body(Body::from(multipart_body(parts)))
		.expect("Failed to build request.")
}

fn get_request(uri: &str) -> Request<Body> {
	Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request.")
}

async fn json_body(response: axum::response::Response) -> Value {
	let body = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");

	serde_json::from_slice(&body).expect("Response body must be JSON.")
}

fn stored_files(dir: &Path) -> usize {
	std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

#[tokio::test]
async fn health_ok() {
	let app = manual_app(uploads_dir()).await;
	let response = app.oneshot(get_request("/health")).await.expect("Failed to call /health.");

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn manual_submission_returns_dream_and_lists_it() {
	let app = manual_app(uploads_dir()).await;
	let response = app
		.clone()
		.oneshot(submit_request(&[
			Part::Text("description", "Flying over mountains"),
			Part::Text("mood", "Joyful"),
		]))
		.await
		.expect("Failed to submit dream.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = json_body(response).await;

	assert_eq!(json["mood"], "Joyful");
	assert_eq!(json["moodScore"], 0.8);
	assert_eq!(json["imageReference"], PLACEHOLDER);
	assert!(json["createdAt"].is_string());

	let dream: Dream = serde_json::from_value(json).expect("Response must decode as a dream.");
	let response = app.oneshot(get_request("/api/dreams")).await.expect("Failed to list dreams.");

	assert_eq!(response.status(), StatusCode::OK);

	let listed: Vec<Dream> =
		serde_json::from_value(json_body(response).await).expect("List must decode as dreams.");

	assert_eq!(listed, vec![dream]);
}

#[tokio::test]
async fn missing_fields_are_reported() {
	let app = manual_app(uploads_dir()).await;
	let response = app
		.clone()
		.oneshot(submit_request(&[Part::Text("description", "  ")]))
		.await
		.expect("Failed to submit dream.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let json = json_body(response).await;

	assert_eq!(json["error_code"], "validation_error");
	assert_eq!(json["fields"], serde_json::json!(["description", "mood"]));

	let response = app.oneshot(get_request("/api/mode")).await.expect("Failed to read mode.");
	let json = json_body(response).await;

	assert_eq!(json["storedCount"], 0);
}

#[tokio::test]
async fn uploaded_image_is_stored_and_served() {
	let dir = uploads_dir();
	let app = manual_app(dir.clone()).await;
	let response = app
		.clone()
		.oneshot(submit_request(&[
			Part::Text("description", "Swimming with whales"),
			Part::Text("mood", "Peaceful"),
			Part::File("image", "../whale song.png", b"not really a png"),
		]))
		.await
		.expect("Failed to submit dream.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = json_body(response).await;
	let reference = json["imageReference"].as_str().expect("imageReference must be a string.");

	assert!(reference.starts_with("/uploads/"));
	assert!(reference.ends_with("-whale_song.png"));

	let response = app.oneshot(get_request(reference)).await.expect("Failed to fetch upload.");

	assert_eq!(response.status(), StatusCode::OK);

	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read upload body.");

	assert_eq!(&bytes[..], b"not really a png");

	let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn rejected_submission_discards_upload() {
	let dir = uploads_dir();
	let app = manual_app(dir.clone()).await;
	let response = app
		.oneshot(submit_request(&[
			Part::Text("description", "Forgot the mood"),
			Part::File("image", "moon.png", b"moon"),
		]))
		.await
		.expect("Failed to submit dream.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(stored_files(&dir), 0);

	let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn ai_mode_replaces_upload_with_generated_image() {
	let dir = uploads_dir();
	let app = ai_app(dir.clone());
	let response = app
		.clone()
		.oneshot(submit_request(&[
			Part::Text("description", "Dancing on the moon"),
			Part::File("image", "moon.png", b"moon"),
		]))
		.await
		.expect("Failed to submit dream.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = json_body(response).await;

	assert_eq!(json["mood"], "Joyful");
	assert_eq!(json["imageReference"], "https://images.example/generated.png");
	assert_eq!(stored_files(&dir), 0);

	let response = app.oneshot(get_request("/api/sky-mood")).await.expect("Failed to read sky.");
	let json = json_body(response).await;

	assert_eq!(json["label"], "positive");
	assert_eq!(json["color"], "#1a1a4e");

	let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn ai_mode_without_providers_is_unavailable() {
	let state = AppState::new(test_config(uploads_dir(), 0)).await.expect("Failed to build state.");
	let app = routes::router(state);
	let response = app
		.oneshot(submit_request(&[Part::Text("description", "Talking to a fox")]))
		.await
		.expect("Failed to submit dream.");

	assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
	assert_eq!(json_body(response).await["error_code"], "service_unavailable");
}

#[tokio::test]
async fn empty_sky_is_neutral_and_mode_is_manual() {
	let app = manual_app(uploads_dir()).await;
	let response =
		app.clone().oneshot(get_request("/api/sky-mood")).await.expect("Failed to read sky.");
	let json = json_body(response).await;

	assert_eq!(json["label"], "neutral");
	assert_eq!(json["color"], "#1a1a2e");

	let response = app.oneshot(get_request("/api/mode")).await.expect("Failed to read mode.");
	let json = json_body(response).await;

	assert_eq!(json["mode"], "manual");
	assert_eq!(json["threshold"], 5);
	assert_eq!(json["aiConfigured"], false);
}
