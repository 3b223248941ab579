//! Product image processing and storage.
//!
//! The processor is picked once at startup from [`ImageProcessorKind`] and
//! shared by every upload; call sites never branch on the strategy.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use thiserror::Error;
use uuid::Uuid;

use crate::models::config::{ImageProcessorKind, ServerConfig};

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("unsupported image format")]
    UnsupportedFormat,

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("failed to store image: {0}")]
    Io(#[from] std::io::Error),
}

/// Image bytes ready to be written, with the file extension matching them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    pub bytes: Vec<u8>,
    pub extension: &'static str,
}

pub trait ImageProcessor: Send + Sync {
    fn name(&self) -> &'static str;
    fn process(&self, bytes: &[u8]) -> Result<ProcessedImage, ImageError>;
}

fn detect_format(bytes: &[u8]) -> Result<ImageFormat, ImageError> {
    image::guess_format(bytes).map_err(|_| ImageError::UnsupportedFormat)
}

fn extension_of(format: ImageFormat) -> &'static str {
    format.extensions_str().first().copied().unwrap_or("img")
}

/// Downscales images larger than `max_dimension` on either side. Images with
/// an alpha channel are re-encoded as PNG, everything else as JPEG.
pub struct ResizingProcessor {
    max_dimension: u32,
}

impl ResizingProcessor {
    pub fn new(max_dimension: u32) -> Self {
        Self {
            max_dimension: max_dimension.max(1),
        }
    }
}

impl ImageProcessor for ResizingProcessor {
    fn name(&self) -> &'static str {
        "resize"
    }

    fn process(&self, bytes: &[u8]) -> Result<ProcessedImage, ImageError> {
        let format = detect_format(bytes)?;
        let image = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| ImageError::Decode(e.to_string()))?;

        let image = if image.width() > self.max_dimension || image.height() > self.max_dimension {
            image.resize(self.max_dimension, self.max_dimension, FilterType::Lanczos3)
        } else {
            image
        };

        let mut out = Cursor::new(Vec::new());
        let extension = if image.color().has_alpha() {
            image
                .write_to(&mut out, ImageFormat::Png)
                .map_err(|e| ImageError::Encode(e.to_string()))?;
            "png"
        } else {
            DynamicImage::ImageRgb8(image.to_rgb8())
                .write_to(&mut out, ImageFormat::Jpeg)
                .map_err(|e| ImageError::Encode(e.to_string()))?;
            "jpg"
        };

        Ok(ProcessedImage {
            bytes: out.into_inner(),
            extension,
        })
    }
}

/// Stores the upload unchanged once it is recognised as an image.
pub struct PassThroughProcessor;

impl ImageProcessor for PassThroughProcessor {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn process(&self, bytes: &[u8]) -> Result<ProcessedImage, ImageError> {
        let format = detect_format(bytes)?;
        Ok(ProcessedImage {
            bytes: bytes.to_vec(),
            extension: extension_of(format),
        })
    }
}

/// Builds the processor configured for this instance.
pub fn select_processor(config: &ServerConfig) -> Arc<dyn ImageProcessor> {
    let processor: Arc<dyn ImageProcessor> = match config.image_processor {
        ImageProcessorKind::Resize => Arc::new(ResizingProcessor::new(config.image_max_dimension)),
        ImageProcessorKind::Passthrough => Arc::new(PassThroughProcessor),
    };
    log::info!("Using the {} image processor", processor.name());
    processor
}

/// Writes processed images under the upload directory.
#[derive(Clone, Debug)]
pub struct UploadStore {
    dir: PathBuf,
    public_url: String,
}

impl UploadStore {
    /// Route prefix the upload directory is served under.
    pub const ROUTE: &'static str = "/uploads";

    pub fn new(dir: impl Into<PathBuf>, public_url: &str) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            public_url: public_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saves the image under a fresh name and returns its public URL.
    pub fn save(&self, image: &ProcessedImage) -> Result<String, ImageError> {
        let file_name = format!("{}.{}", Uuid::new_v4(), image.extension);
        std::fs::write(self.dir.join(&file_name), &image.bytes)?;
        Ok(format!("{}{}/{}", self.public_url, Self::ROUTE, file_name))
    }

    /// File behind a URL produced by [`UploadStore::save`]. Foreign URLs and
    /// names that would leave the upload directory yield `None`.
    pub fn path_for_url(&self, url: &str) -> Option<PathBuf> {
        let prefix = format!("{}{}/", self.public_url, Self::ROUTE);
        let file_name = url.strip_prefix(&prefix)?;
        if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name.starts_with('.') {
            return None;
        }
        Some(self.dir.join(file_name))
    }

    /// Deletes a stored image. URLs this store does not own are left alone.
    pub fn remove(&self, url: &str) -> Result<(), ImageError> {
        let Some(path) = self.path_for_url(url) else {
            return Ok(());
        };
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
