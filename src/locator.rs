//! Loader-side context that fixes the base URI and CanvasKit location once at start-up.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::asset_paths::{is_base_independent, join_path_segments};
use crate::base_uri::{BaseElementSource, BaseUri};
use crate::canvaskit::{CanvasKitBase, CanvasKitSource, resolve_canvaskit_base};
use crate::config::{BuildConfig, FlutterConfiguration};

/// Immutable asset locations computed when the loader initialises.
#[derive(Debug, Clone)]
pub struct AssetLocator {
  base_uri: BaseUri,
  canvaskit: CanvasKitBase,
}

/// Serializable snapshot of the resolved locations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetLocations {
  /// Page base URI, empty when the page declares none.
  pub base_uri: String,
  /// CanvasKit base URL as chosen by the configuration.
  pub canvaskit_base_url: String,
  /// Rule that chose [`AssetLocations::canvaskit_base_url`].
  pub canvaskit_source: CanvasKitSource,
  /// Requested CanvasKit files mapped to their full URLs.
  pub assets: BTreeMap<String, String>,
}

impl AssetLocator {
  /// Read the base URI from `document` and resolve the CanvasKit location.
  pub fn new<S: BaseElementSource + ?Sized>(
    document: &S,
    config: &FlutterConfiguration,
    build_config: &BuildConfig,
  ) -> Self {
    Self::with_base_uri(BaseUri::from_document(document), config, build_config)
  }

  /// Build a locator around an already computed base URI.
  pub fn with_base_uri(
    base_uri: BaseUri,
    config: &FlutterConfiguration,
    build_config: &BuildConfig,
  ) -> Self {
    Self {
      base_uri,
      canvaskit: resolve_canvaskit_base(config, build_config),
    }
  }

  /// The page base URI.
  pub fn base_uri(&self) -> &BaseUri {
    &self.base_uri
  }

  /// The CanvasKit base URL, before any resolution against the page base.
  pub fn canvaskit_base_url(&self) -> &str {
    &self.canvaskit.url
  }

  /// Which rule chose the CanvasKit base URL.
  pub fn canvaskit_source(&self) -> CanvasKitSource {
    self.canvaskit.source
  }

  /// Resolve a reference against the page base URI the way a browser resolves `<base href>`.
  ///
  /// Absolute URLs are returned unchanged, as is everything when the base is empty.
  /// Protocol-relative references take the base scheme, root-relative ones the base origin,
  /// and relative ones are appended to the base's directory (its path up to the last `/`,
  /// ignoring any query or fragment). Dot segments are not normalised.
  pub fn resolve_against_base(&self, reference: &str) -> String {
    let base = self.base_uri.as_str();
    if base.is_empty() || is_base_independent(reference) {
      return reference.to_string();
    }

    let (origin, path) = split_origin(base);
    if reference.starts_with("//") {
      return match origin.find(':') {
        Some(colon) => format!("{}{reference}", &origin[..=colon]),
        None => reference.to_string(),
      };
    }
    if reference.starts_with('/') {
      return format!("{origin}{reference}");
    }

    let directory = directory_of(path);
    if directory.is_empty() && !origin.is_empty() {
      return format!("{origin}/{reference}");
    }
    format!("{origin}{directory}{reference}")
  }

  /// Full URL of a file inside the CanvasKit bundle.
  pub fn canvaskit_asset_url(&self, file: &str) -> String {
    let joined = join_path_segments([self.canvaskit.url.as_str(), file]);
    self.resolve_against_base(&joined)
  }

  /// Snapshot the resolved locations together with the URLs of `files`.
  pub fn locations<S: AsRef<str>>(&self, files: &[S]) -> AssetLocations {
    AssetLocations {
      base_uri: self.base_uri.to_string(),
      canvaskit_base_url: self.canvaskit.url.clone(),
      canvaskit_source: self.canvaskit.source,
      assets: files
        .iter()
        .map(|file| {
          let file = file.as_ref();
          (file.to_string(), self.canvaskit_asset_url(file))
        })
        .collect(),
    }
  }
}

/// Split `scheme://authority` off the front of a URL; bases without a scheme have no origin.
fn split_origin(base: &str) -> (&str, &str) {
  match base.find("://") {
    Some(index) => {
      let authority_start = index + 3;
      let path_start = base[authority_start..]
        .find(['/', '?', '#'])
        .map_or(base.len(), |offset| authority_start + offset);
      base.split_at(path_start)
    }
    None => ("", base),
  }
}

fn directory_of(path: &str) -> &str {
  let path = path.split(['?', '#']).next().unwrap_or(path);
  path.rfind('/').map_or("", |last| &path[..=last])
}
