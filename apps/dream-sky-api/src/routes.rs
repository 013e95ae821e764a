use std::path::{Path, PathBuf};

use axum::{
	Json, Router,
	body::Bytes,
	extract::{DefaultBodyLimit, Multipart, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;
use time::OffsetDateTime;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};
use tower_http::{cors::CorsLayer, services::ServeDir};
use uuid::Uuid;

use crate::state::AppState;
use dream_sky_domain::{Dream, SkyMood};
use dream_sky_service::{Error as ServiceError, ModeStatus, SubmitDreamRequest};

const UPLOADS_ROUTE: &str = "/uploads";

pub fn router(state: AppState) -> Router {
	let uploads = ServeDir::new(&state.service.cfg.service.uploads_dir);
	let body_limit = state.service.cfg.service.max_body_bytes;

	Router::new()
		.route("/health", get(health))
		.route("/api/dreams", get(list_dreams).post(submit_dream))
		.route("/api/sky-mood", get(sky_mood))
		.route("/api/mode", get(mode))
		.nest_service(UPLOADS_ROUTE, uploads)
		.layer(DefaultBodyLimit::max(body_limit))
		.layer(CorsLayer::permissive())
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn list_dreams(State(state): State<AppState>) -> Result<Json<Vec<Dream>>, ApiError> {
	let response = state.service.list().await?;

	Ok(Json(response.dreams))
}

async fn sky_mood(State(state): State<AppState>) -> Result<Json<SkyMood>, ApiError> {
	let response = state.service.sky_mood().await?;

	Ok(Json(response))
}

async fn mode(State(state): State<AppState>) -> Result<Json<ModeStatus>, ApiError> {
	let response = state.service.mode_status().await?;

	Ok(Json(response))
}

async fn submit_dream(
	State(state): State<AppState>,
	multipart: Multipart,
) -> Result<Json<Dream>, ApiError> {
	let form = read_dream_form(multipart).await?;
	let uploads_dir = &state.service.cfg.service.uploads_dir;
	let mut req = form.request;
	let upload = match form.image {
		Some(image) => {
			let upload = save_upload(uploads_dir, &image).await?;

			req.image_reference = Some(upload.reference.clone());

			Some(upload)
		},
		None => None,
	};
	let result = state.service.submit(req).await;

	if let Some(upload) = upload {
		let kept = matches!(&result, Ok(dream) if dream.image_reference == upload.reference);

		if !kept {
			remove_upload(&upload.path).await;
		}
	}

	Ok(Json(result?))
}

struct DreamForm {
	request: SubmitDreamRequest,
	image: Option<UploadedImage>,
}

struct UploadedImage {
	file_name: String,
	bytes: Bytes,
}

struct StoredUpload {
	path: PathBuf,
	reference: String,
}

async fn read_dream_form(mut multipart: Multipart) -> Result<DreamForm, ApiError> {
	let mut request = SubmitDreamRequest::default();
	let mut image = None;

	while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
		let Some(name) = field.name().map(str::to_string) else {
			continue;
		};

		match name.as_str() {
			"description" => request.description = field.text().await.map_err(invalid_form)?,
			"mood" => request.mood = Some(field.text().await.map_err(invalid_form)?),
			"imageReference" => {
				request.image_reference = Some(field.text().await.map_err(invalid_form)?)
			},
			"image" => {
				let file_name = field.file_name().unwrap_or_default().to_string();
				let bytes = field.bytes().await.map_err(invalid_form)?;

				if !bytes.is_empty() {
					image = Some(UploadedImage { file_name, bytes });
				}
			},
			other => {
				tracing::debug!(field = other, "Ignoring unknown form field.");
			},
		}
	}

	Ok(DreamForm { request, image })
}

async fn save_upload(uploads_dir: &Path, image: &UploadedImage) -> Result<StoredUpload, ApiError> {
	let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
	let nonce = Uuid::new_v4().simple().to_string();
	let name = format!("{millis}-{}-{}", &nonce[..8], sanitize_file_name(&image.file_name));
	let path = uploads_dir.join(&name);

	tokio::fs::create_dir_all(uploads_dir).await.map_err(upload_failed)?;

	// `create_new` refuses to replace an image another dream may already reference.
	let mut file =
		OpenOptions::new().write(true).create_new(true).open(&path).await.map_err(upload_failed)?;

	if let Err(err) = write_upload(&mut file, &image.bytes).await {
		remove_upload(&path).await;

		return Err(upload_failed(err));
	}

	tracing::info!(path = %path.display(), bytes = image.bytes.len(), "Image uploaded.");

	Ok(StoredUpload { path, reference: format!("{UPLOADS_ROUTE}/{name}") })
}

async fn write_upload(file: &mut tokio::fs::File, bytes: &[u8]) -> std::io::Result<()> {
	file.write_all(bytes).await?;
	file.flush().await
}

async fn remove_upload(path: &Path) {
	if let Err(err) = tokio::fs::remove_file(path).await {
		tracing::warn!(error = %err, path = %path.display(), "Failed to remove unused upload.");
	}
}

/// Keeps the last path component and replaces anything outside `[A-Za-z0-9._-]`.
fn sanitize_file_name(raw: &str) -> String {
	let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
	let cleaned: String = base
		.chars()
		.map(|ch| if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') { ch } else { '_' })
		.collect();
	let cleaned = cleaned.trim_start_matches('.');

	if cleaned.is_empty() { "upload".to_string() } else { cleaned.to_string() }
}

fn invalid_form(err: impl std::fmt::Display) -> ApiError {
	json_error(
		StatusCode::BAD_REQUEST,
		"validation_error",
		format!("Invalid multipart form: {err}."),
		None,
	)
}

fn upload_failed(err: std::io::Error) -> ApiError {
	tracing::error!(error = %err, "Failed to store upload.");

	json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", "Failed to store upload.", None)
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::Validation { fields, message } => {
				json_error(StatusCode::BAD_REQUEST, "validation_error", message, Some(fields))
			},
			ServiceError::ServiceUnavailable { message } => {
				json_error(StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", message, None)
			},
			err @ ServiceError::Capability { .. } => {
				json_error(StatusCode::BAD_GATEWAY, "capability_error", err.to_string(), None)
			},
			ServiceError::Storage { message } => {
				tracing::error!(%message, "Dream store failed.");

				json_error(
					StatusCode::INTERNAL_SERVER_ERROR,
					"storage_error",
					"Failed to access the dream store.",
					None,
				)
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<Vec<String>>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}
