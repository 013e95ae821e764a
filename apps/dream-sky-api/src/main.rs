use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = dream_sky_api::Args::parse();

	dream_sky_api::run(args).await
}
