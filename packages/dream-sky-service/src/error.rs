pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid submission: {message}")]
	Validation { fields: Vec<String>, message: String },
	#[error("Service unavailable: {message}")]
	ServiceUnavailable { message: String },
	#[error("{capability} capability failed: {message}")]
	Capability { capability: String, message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<dream_sky_storage::Error> for Error {
	fn from(err: dream_sky_storage::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}
