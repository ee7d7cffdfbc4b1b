//! Loader configuration records consulted when locating CanvasKit assets.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

/// File name searched for by [`FlutterConfiguration::discover`].
pub const DEFAULT_FLUTTER_CONFIG_FILE: &str = "flutter.config.json";

/// File name searched for by [`BuildConfig::discover`].
pub const DEFAULT_BUILD_CONFIG_FILE: &str = "build.config.json";

/// Runtime configuration supplied by the page hosting the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlutterConfiguration {
  /// Explicit location of the CanvasKit bundle. Wins over every other rule when set.
  pub canvas_kit_base_url: Option<String>,
}

/// Build metadata emitted alongside the compiled application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildConfig {
  /// Engine revision the application was built against.
  pub engine_revision: Option<String>,
  /// Serve CanvasKit from the application's own origin instead of the CDN.
  pub use_local_canvas_kit: Option<bool>,
}

impl FlutterConfiguration {
  /// The configured CanvasKit override, ignoring empty strings.
  pub fn canvas_kit_base_url(&self) -> Option<&str> {
    non_empty(self.canvas_kit_base_url.as_deref())
  }

  /// Read configuration from a JSON or YAML file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
    load_record(path.as_ref())
  }

  /// Attempt to load [`DEFAULT_FLUTTER_CONFIG_FILE`] from `dir`, falling back to defaults.
  pub fn discover(dir: &Path) -> Self {
    discover_record(&dir.join(DEFAULT_FLUTTER_CONFIG_FILE))
  }
}

impl BuildConfig {
  /// The engine revision, ignoring empty strings.
  pub fn engine_revision(&self) -> Option<&str> {
    non_empty(self.engine_revision.as_deref())
  }

  /// Whether the build asked for locally served CanvasKit assets.
  pub fn uses_local_canvas_kit(&self) -> bool {
    self.use_local_canvas_kit.unwrap_or(false)
  }

  /// Read build metadata from a JSON or YAML file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
    load_record(path.as_ref())
  }

  /// Attempt to load [`DEFAULT_BUILD_CONFIG_FILE`] from `dir`, falling back to defaults.
  pub fn discover(dir: &Path) -> Self {
    discover_record(&dir.join(DEFAULT_BUILD_CONFIG_FILE))
  }
}

/// Errors that can occur while reading a configuration file.
#[derive(Debug)]
pub enum ConfigLoadError {
  /// Failed to read the file from disk.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse a JSON document.
  Json {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
  /// Failed to parse a YAML document.
  Yaml {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_yaml::Error,
  },
}

impl ConfigLoadError {
  /// Returns `true` when the file simply does not exist.
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::Io { source, .. } if source.kind() == ErrorKind::NotFound)
  }
}

impl std::fmt::Display for ConfigLoadError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io { path, source } => {
        write!(f, "failed to read {}: {}", path.display(), source)
      }
      Self::Json { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
      Self::Yaml { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
    }
  }
}

impl std::error::Error for ConfigLoadError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Json { source, .. } => Some(source),
      Self::Yaml { source, .. } => Some(source),
    }
  }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
  value.filter(|value| !value.is_empty())
}

fn is_yaml(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

fn load_record<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigLoadError> {
  let contents = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
    path: path.to_path_buf(),
    source,
  })?;

  if is_yaml(path) {
    serde_yaml::from_str(&contents).map_err(|source| ConfigLoadError::Yaml {
      path: path.to_path_buf(),
      source,
    })
  } else {
    serde_json::from_str(&contents).map_err(|source| ConfigLoadError::Json {
      path: path.to_path_buf(),
      source,
    })
  }
}

fn discover_record<T: DeserializeOwned + Default>(candidate: &Path) -> T {
  match load_record(candidate) {
    Ok(record) => {
      debug!(path = %candidate.display(), "loaded configuration");
      record
    }
    Err(err) if err.is_not_found() => {
      debug!(path = %candidate.display(), "no configuration file, using defaults");
      T::default()
    }
    Err(err) => {
      warn!(error = %err, "ignoring unreadable configuration, using defaults");
      T::default()
    }
  }
}
