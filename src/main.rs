use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use canvaskit_locator::{AssetLocations, AssetLocator, BaseUri, BuildConfig, FlutterConfiguration, HtmlDocument};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_INDEX_FILE: &str = "index.html";

/// Print where a web build will load its CanvasKit assets from.
#[derive(Debug, Parser)]
#[command(name = "canvaskit-locator", version, about)]
struct Cli {
  /// Directory containing the built web application.
  #[arg(long, default_value = ".")]
  site: PathBuf,
  /// HTML page whose `<base href>` is used. Defaults to `<site>/index.html`.
  #[arg(long)]
  index: Option<PathBuf>,
  /// Runtime configuration (JSON or YAML). Defaults to `<site>/flutter.config.json` when present.
  #[arg(long)]
  config: Option<PathBuf>,
  /// Build metadata (JSON or YAML). Defaults to `<site>/build.config.json` when present.
  #[arg(long)]
  build_config: Option<PathBuf>,
  /// CanvasKit file to resolve; may be repeated.
  #[arg(long = "asset", value_name = "FILE")]
  assets: Vec<String>,
  /// Emit JSON instead of plain text.
  #[arg(long)]
  json: bool,
}

fn main() -> Result<()> {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "canvaskit_locator=info".into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  let cli = Cli::parse();
  let locations = run(&cli)?;

  if cli.json {
    println!(
      "{}",
      serde_json::to_string_pretty(&locations).context("failed to serialise locations")?
    );
  } else {
    println!("base_uri: {}", locations.base_uri);
    println!("canvaskit_base_url: {}", locations.canvaskit_base_url);
    for (file, url) in &locations.assets {
      println!("{file}: {url}");
    }
  }

  Ok(())
}

fn run(cli: &Cli) -> Result<AssetLocations> {
  let index_path = cli
    .index
    .clone()
    .unwrap_or_else(|| cli.site.join(DEFAULT_INDEX_FILE));
  let base_uri = load_base_uri(&index_path)?;

  let config = match &cli.config {
    Some(path) => FlutterConfiguration::from_path(path)
      .with_context(|| format!("failed to load runtime configuration {}", path.display()))?,
    None => FlutterConfiguration::discover(&cli.site),
  };
  let build_config = match &cli.build_config {
    Some(path) => BuildConfig::from_path(path)
      .with_context(|| format!("failed to load build configuration {}", path.display()))?,
    None => BuildConfig::discover(&cli.site),
  };

  let locator = AssetLocator::with_base_uri(base_uri, &config, &build_config);
  let locations = locator.locations(&cli.assets);
  tracing::info!(
    source = ?locations.canvaskit_source,
    "CanvasKit base resolved to {}",
    locations.canvaskit_base_url
  );
  Ok(locations)
}

fn load_base_uri(index_path: &Path) -> Result<BaseUri> {
  if !index_path.exists() {
    tracing::warn!(
      "{} not found, assuming the page declares no <base>",
      index_path.display()
    );
    return Ok(BaseUri::default());
  }

  let document = HtmlDocument::from_path(index_path)?;
  Ok(BaseUri::from_document(&document))
}

#[cfg(test)]
mod tests {
  use super::*;
  use canvaskit_locator::CanvasKitSource;
  use std::fs;
  use tempfile::tempdir;

  fn cli_for(site: &Path, extra: &[&str]) -> Cli {
    let site = site.to_str().expect("temp dir path should be UTF-8");
    let mut args = vec!["canvaskit-locator", "--site", site];
    args.extend_from_slice(extra);
    Cli::parse_from(args)
  }

  #[test]
  fn missing_index_means_empty_base_uri() {
    let dir = tempdir().unwrap();
    let locations = run(&cli_for(dir.path(), &["--asset", "canvaskit.js"])).unwrap();

    assert_eq!(locations.base_uri, "");
    assert_eq!(locations.canvaskit_source, CanvasKitSource::Local);
    assert_eq!(
      locations.assets.get("canvaskit.js").map(String::as_str),
      Some("/canvaskit/canvaskit.js")
    );
  }

  #[test]
  fn explicit_config_paths_must_load() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let missing = missing.to_str().unwrap();

    let err = run(&cli_for(dir.path(), &["--config", missing])).unwrap_err();
    assert!(err.to_string().contains("runtime configuration"));

    let err = run(&cli_for(dir.path(), &["--build-config", missing])).unwrap_err();
    assert!(err.to_string().contains("build configuration"));
  }

  #[test]
  fn discovers_site_files() {
    let dir = tempdir().unwrap();
    fs::write(
      dir.path().join("index.html"),
      r#"<head><base href="/app/"></head>"#,
    )
    .unwrap();
    fs::write(
      dir.path().join("build.config.json"),
      r#"{"engineRevision": "abc123"}"#,
    )
    .unwrap();

    let locations = run(&cli_for(dir.path(), &["--asset", "canvaskit.wasm"])).unwrap();
    assert_eq!(locations.base_uri, "/app/");
    assert_eq!(locations.canvaskit_source, CanvasKitSource::Cdn);
    assert_eq!(
      locations.assets.get("canvaskit.wasm").map(String::as_str),
      Some("https://www.gstatic.com/flutter-canvaskit/abc123/canvaskit.wasm")
    );
  }

  #[test]
  fn explicit_yaml_config_overrides_discovery() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("runtime.yaml");
    fs::write(&config, "canvasKitBaseUrl: vendor/ck/\n").unwrap();
    fs::write(
      dir.path().join("build.config.json"),
      r#"{"engineRevision": "abc123"}"#,
    )
    .unwrap();

    let locations = run(&cli_for(dir.path(), &["--config", config.to_str().unwrap()])).unwrap();
    assert_eq!(locations.canvaskit_source, CanvasKitSource::Override);
    assert_eq!(locations.canvaskit_base_url, "vendor/ck/");
  }
}
