use anyhow::{bail, Context};
use garmentkit::{
    init_logging, run_script, Config, DesignSession, ImageArtworkLoader, ProductRecord,
    SessionCommand,
};
use std::path::{Path, PathBuf};

const USAGE: &str = "usage: garmentkit <product.json> <script.json> [config.toml]";

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

fn load_config(explicit: Option<PathBuf>) -> anyhow::Result<Config> {
    let config = match explicit {
        Some(path) => Config::load_from_file(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => match Config::default_path() {
            Ok(path) => Config::load_or_default(&path).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {}: {}", path.display(), e);
                Config::default()
            }),
            Err(_) => Config::default(),
        },
    };
    config.validate().context("invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let (Some(product_path), Some(script_path)) = (args.next(), args.next()) else {
        bail!(USAGE);
    };
    let config = load_config(args.next())?;

    let product: ProductRecord = read_json(&product_path)?;
    let commands: Vec<SessionCommand> = read_json(&script_path)?;
    tracing::info!(
        "Replaying {} commands against product {}",
        commands.len(),
        product.id
    );

    let loader = ImageArtworkLoader::new(config.artwork.clone());
    let mut session = DesignSession::new(product, config);
    let summary = run_script(&mut session, &loader, commands).await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
