//! Configuration model loaded from external sources.

use serde::Deserialize;

/// Image processing strategy selected once at startup.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageProcessorKind {
    /// Decode, downscale to `image_max_dimension` and re-encode.
    #[default]
    Resize,
    /// Store uploads exactly as received.
    Passthrough,
}

fn default_image_max_dimension() -> u32 {
    1600
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared across handlers. Built once in `main` and handed to
/// [`crate::run`]; nothing below reads the environment directly.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Directory uploaded images are written to.
    pub upload_dir: String,
    /// Public base URL used to build links to uploaded images.
    pub public_url: String,
    /// Origins allowed by CORS. Empty means same-origin only.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
    #[serde(default)]
    pub image_processor: ImageProcessorKind,
    #[serde(default = "default_image_max_dimension")]
    pub image_max_dimension: u32,
}
