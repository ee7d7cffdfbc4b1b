#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod base_uri;
pub mod canvaskit;
pub mod config;
pub mod locator;

pub use asset_paths::{PathSegment, join_path_segments, strip_left_slashes, strip_right_slashes};
pub use base_uri::{BaseElementSource, BaseUri, HtmlDocument};
pub use canvaskit::{CanvasKitBase, CanvasKitSource, get_canvaskit_base_url, resolve_canvaskit_base};
pub use config::{BuildConfig, ConfigLoadError, FlutterConfiguration};
pub use locator::{AssetLocations, AssetLocator};
