mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, DESCRIPTION_PLACEHOLDER, ImageProviderConfig, Ingest, Postgres, Providers,
	SentimentProviderConfig, Service, Storage,
};

use std::{fs, net::SocketAddr, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.parse::<SocketAddr>().is_err() {
		return Err(Error::Validation {
			message: "service.http_bind must be a socket address.".to_string(),
		});
	}
	if cfg.service.uploads_dir.as_os_str().is_empty() {
		return Err(Error::Validation {
			message: "service.uploads_dir must be non-empty.".to_string(),
		});
	}
	if cfg.service.max_body_bytes == 0 {
		return Err(Error::Validation {
			message: "service.max_body_bytes must be greater than zero.".to_string(),
		});
	}
	if let Some(postgres) = cfg.storage.postgres.as_ref() {
		if postgres.dsn.trim().is_empty() {
			return Err(Error::Validation {
				message: "storage.postgres.dsn must be non-empty.".to_string(),
			});
		}
		if postgres.pool_max_conns == 0 {
			return Err(Error::Validation {
				message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
			});
		}
	}
	if cfg.ingest.ai_threshold == 0 {
		return Err(Error::Validation {
			message: "ingest.ai_threshold must be greater than zero.".to_string(),
		});
	}
	if cfg.ingest.placeholder_image.trim().is_empty() {
		return Err(Error::Validation {
			message: "ingest.placeholder_image must be non-empty.".to_string(),
		});
	}

	if let Some(sentiment) = cfg.providers.sentiment.as_ref() {
		validate_endpoint(
			"sentiment",
			&sentiment.api_base,
			&sentiment.api_key,
			sentiment.timeout_ms,
		)?;
	}
	if let Some(image) = cfg.providers.image.as_ref() {
		validate_endpoint("image", &image.api_base, &image.api_key, image.timeout_ms)?;

		if !image.prompt_template.contains(DESCRIPTION_PLACEHOLDER) {
			return Err(Error::Validation {
				message: format!(
					"providers.image.prompt_template must contain {DESCRIPTION_PLACEHOLDER}."
				),
			});
		}
		if image.width == 0 || image.height == 0 {
			return Err(Error::Validation {
				message: "providers.image.width and height must be greater than zero.".to_string(),
			});
		}
		if !image.guidance_scale.is_finite() || image.guidance_scale < 0.0 {
			return Err(Error::Validation {
				message: "providers.image.guidance_scale must be a finite number, zero or greater."
					.to_string(),
			});
		}
		if image.max_polls == 0 {
			return Err(Error::Validation {
				message: "providers.image.max_polls must be greater than zero.".to_string(),
			});
		}
	}

	Ok(())
}

fn validate_endpoint(label: &str, api_base: &str, api_key: &str, timeout_ms: u64) -> Result<()> {
	if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
		return Err(Error::Validation {
			message: format!("providers.{label}.api_base must start with http:// or https://."),
		});
	}
	if api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: format!("Provider {label} api_key must be non-empty."),
		});
	}
	if timeout_ms == 0 {
		return Err(Error::Validation {
			message: format!("providers.{label}.timeout_ms must be greater than zero."),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if let Some(sentiment) = cfg.providers.sentiment.as_mut() {
		sentiment.api_base = sentiment.api_base.trim_end_matches('/').to_string();
	}
	if let Some(image) = cfg.providers.image.as_mut() {
		image.api_base = image.api_base.trim_end_matches('/').to_string();
	}
	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
