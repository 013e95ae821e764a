pub mod ingest;
pub mod list;
pub mod mode;
pub mod sky;

mod error;

pub use error::{Error, Result};
pub use ingest::{IngestInput, SubmitDreamRequest};
pub use list::ListResponse;
pub use mode::ModeStatus;

use std::sync::{Arc, Mutex};

use rand::{SeedableRng, rngs::StdRng};

use dream_sky_config::{Config, ImageProviderConfig, SentimentProviderConfig};
use dream_sky_providers::{image, sentiment};
pub use dream_sky_storage::BoxFuture;
use dream_sky_storage::DreamStore;

/// Classifies the tone of a dream description into a coarse label such as `positive`.
pub trait SentimentProvider
where
	Self: Send + Sync,
{
	fn classify<'a>(&'a self, text: &'a str) -> BoxFuture<'a, color_eyre::Result<String>>;
}

/// Produces an image reference illustrating a dream description.
pub trait ImageProvider
where
	Self: Send + Sync,
{
	fn generate<'a>(&'a self, text: &'a str) -> BoxFuture<'a, color_eyre::Result<String>>;
}

/// AI capabilities. `None` means the capability is not configured.
#[derive(Clone, Default)]
pub struct Providers {
	pub sentiment: Option<Arc<dyn SentimentProvider>>,
	pub image: Option<Arc<dyn ImageProvider>>,
}

pub struct DreamService {
	pub cfg: Config,
	pub store: Arc<dyn DreamStore>,
	pub providers: Providers,
	rng: Mutex<StdRng>,
}

struct HttpSentiment {
	cfg: SentimentProviderConfig,
}

struct HttpImage {
	cfg: ImageProviderConfig,
}

impl SentimentProvider for HttpSentiment {
	fn classify<'a>(&'a self, text: &'a str) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(sentiment::classify(&self.cfg, text))
	}
}

impl ImageProvider for HttpImage {
	fn generate<'a>(&'a self, text: &'a str) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(image::generate(&self.cfg, text))
	}
}

impl Providers {
	pub fn new(
		sentiment: Option<Arc<dyn SentimentProvider>>,
		image: Option<Arc<dyn ImageProvider>>,
	) -> Self {
		Self { sentiment, image }
	}

	pub fn from_config(cfg: &dream_sky_config::Providers) -> Self {
		let sentiment = cfg.sentiment.clone().map(|cfg| {
			let provider: Arc<dyn SentimentProvider> = Arc::new(HttpSentiment { cfg });

			provider
		});
		let image = cfg.image.clone().map(|cfg| {
			let provider: Arc<dyn ImageProvider> = Arc::new(HttpImage { cfg });

			provider
		});

		Self { sentiment, image }
	}

	/// AI mode needs both capabilities; one without the other counts as unconfigured.
	pub fn is_configured(&self) -> bool {
		self.sentiment.is_some() && self.image.is_some()
	}
}

impl DreamService {
	pub fn new(cfg: Config, store: Arc<dyn DreamStore>) -> Self {
		let providers = Providers::from_config(&cfg.providers);

		Self::with_providers(cfg, store, providers)
	}

	pub fn with_providers(cfg: Config, store: Arc<dyn DreamStore>, providers: Providers) -> Self {
		let rng = match cfg.ingest.placement_seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};

		Self { cfg, store, providers, rng: Mutex::new(rng) }
	}

	pub(crate) fn place_star(&self) -> dream_sky_domain::Position {
		let mut rng = self.rng.lock().unwrap_or_else(|err| err.into_inner());

		dream_sky_domain::placement::place(&mut *rng)
	}
}
