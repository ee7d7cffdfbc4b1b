//! Selection of the base URL the CanvasKit bundle is served from.

use serde::Serialize;
use tracing::debug;

use crate::asset_paths::join_path_segments;
use crate::config::{BuildConfig, FlutterConfiguration};

/// CDN hosting CanvasKit builds, one directory per engine revision.
pub const CANVASKIT_CDN_BASE: &str = "https://www.gstatic.com/flutter-canvaskit";

/// Path used when CanvasKit is served next to the application.
pub const LOCAL_CANVASKIT_BASE: &str = "/canvaskit";

/// Which rule produced a CanvasKit base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CanvasKitSource {
  /// `canvasKitBaseUrl` from the runtime configuration.
  Override,
  /// The CDN directory for the build's engine revision.
  Cdn,
  /// The application-relative fallback.
  Local,
}

/// A resolved CanvasKit location together with the rule that chose it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasKitBase {
  /// Base URL of the CanvasKit bundle.
  pub url: String,
  /// Rule that produced [`CanvasKitBase::url`].
  pub source: CanvasKitSource,
}

/// Evaluate the CanvasKit location rules in order.
///
/// 1. A non-empty `canvasKitBaseUrl` is returned verbatim.
/// 2. With an engine revision and without `useLocalCanvasKit`, the revision's CDN directory.
/// 3. Otherwise [`LOCAL_CANVASKIT_BASE`].
pub fn resolve_canvaskit_base(
  config: &FlutterConfiguration,
  build_config: &BuildConfig,
) -> CanvasKitBase {
  let resolved = if let Some(url) = config.canvas_kit_base_url() {
    CanvasKitBase {
      url: url.to_string(),
      source: CanvasKitSource::Override,
    }
  } else {
    match build_config.engine_revision() {
      Some(revision) if !build_config.uses_local_canvas_kit() => CanvasKitBase {
        url: join_path_segments([CANVASKIT_CDN_BASE, revision]),
        source: CanvasKitSource::Cdn,
      },
      _ => CanvasKitBase {
        url: LOCAL_CANVASKIT_BASE.to_string(),
        source: CanvasKitSource::Local,
      },
    }
  };

  debug!(url = %resolved.url, source = ?resolved.source, "resolved CanvasKit base URL");
  resolved
}

/// Calculate the base URL for CanvasKit assets.
pub fn get_canvaskit_base_url(config: &FlutterConfiguration, build_config: &BuildConfig) -> String {
  resolve_canvaskit_base(config, build_config).url
}
