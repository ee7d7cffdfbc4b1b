//! Helpers for trimming and joining the path segments that make up asset URLs.
//!
//! Slash trimming, segment joining and the base-URI classification of references live in
//! separate submodules so each rule can be tested on its own. The loader-facing pieces
//! ([`crate::canvaskit`], [`crate::locator`]) are built entirely on top of these functions.

mod filters;
mod join;
mod slashes;

pub use filters::is_base_independent;
pub use join::{PathSegment, join_path_segments};
pub use slashes::{strip_left_slashes, strip_right_slashes};
