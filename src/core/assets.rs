//! Embedded configuration assets.
//!
//! Everything under `assets/` is baked into the binary so the standalone
//! gate executables need nothing beyond the repository they inspect.

use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "*.toml"]
struct Assets;

/// Default gate configuration.
pub const DEFAULT_GATES: &str = "gates.toml";

pub fn get_asset(path: &str) -> Option<String> {
    let file = Assets::get(path)?;
    String::from_utf8(file.data.into_owned()).ok()
}

pub fn list_assets() -> Vec<String> {
    let mut names: Vec<String> = Assets::iter().map(|p| p.into_owned()).collect();
    names.sort();
    names
}
