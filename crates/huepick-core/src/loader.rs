//! Image loading: turns a file or byte source into a [`PixelBuffer`].
//!
//! Raster formats (PNG, JPEG, GIF, BMP, WebP) are decoded with `image` and
//! detected from content. SVG is rasterized at its intrinsic size with
//! `resvg` and converted to straight alpha so that sampling sees the same
//! channel values a browser canvas would report.

use std::path::{Path, PathBuf};

use image::ImageFormat;
use resvg::{tiny_skia, usvg};
use tracing::{debug, info};

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::{PickError, PickResult};

/// How far into unnamed byte sources to look for an `<svg` tag.
const SVG_SNIFF_LEN: usize = 512;

/// File extensions accepted as image sources.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "svg", "webp"];

/// Where an image comes from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes {
        data: Vec<u8>,
        /// File name used as a format hint (only `.svg` matters).
        name: Option<String>,
    },
}

impl ImageSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn bytes(data: Vec<u8>) -> Self {
        Self::Bytes { data, name: None }
    }

    /// Short display name (file name for paths).
    pub fn name(&self) -> Option<String> {
        match self {
            Self::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned()),
            Self::Bytes { name, .. } => name.clone(),
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

/// Check the extension of `path` against [`SUPPORTED_EXTENSIONS`].
pub fn is_supported_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// Load and decode an image. Decoding runs on the blocking pool.
pub async fn load(source: &ImageSource) -> PickResult<PixelBuffer> {
    let (data, name) = match source {
        ImageSource::Path(path) => {
            if !is_supported_path(path) {
                return Err(PickError::Decode(format!(
                    "unsupported file type: {}",
                    path.display()
                )));
            }
            let data = tokio::fs::read(path)
                .await
                .map_err(|err| PickError::SourceNotFound {
                    path: path.clone(),
                    source: err,
                })?;
            debug!(?path, bytes = data.len(), "read image file");
            (data, source.name())
        }
        ImageSource::Bytes { data, name } => (data.clone(), name.clone()),
    };

    let buffer = tokio::task::spawn_blocking(move || decode(&data, name.as_deref()))
        .await
        .map_err(|e| PickError::Decode(format!("decoder task failed: {e}")))??;

    info!(
        width = buffer.width(),
        height = buffer.height(),
        "image loaded"
    );
    Ok(buffer)
}

/// Decode bytes into a buffer. `name` is an optional file-name hint.
pub fn decode(data: &[u8], name: Option<&str>) -> PickResult<PixelBuffer> {
    if data.is_empty() {
        return Err(PickError::Decode("empty input".into()));
    }

    let buffer = if looks_like_svg(data, name) {
        rasterize_svg(data)?
    } else {
        decode_raster(data)?
    };

    if buffer.is_empty() {
        return Err(PickError::Decode("image has zero area".into()));
    }
    Ok(buffer)
}

fn decode_raster(data: &[u8]) -> PickResult<PixelBuffer> {
    let format = image::guess_format(data).map_err(|e| PickError::Decode(e.to_string()))?;
    match format {
        ImageFormat::Png
        | ImageFormat::Jpeg
        | ImageFormat::Gif
        | ImageFormat::Bmp
        | ImageFormat::WebP => {}
        other => {
            return Err(PickError::Decode(format!("unsupported format: {other:?}")));
        }
    }

    let img = image::load_from_memory_with_format(data, format)
        .map_err(|e| PickError::Decode(e.to_string()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    debug!(?format, width, height, "decoded raster");
    PixelBuffer::from_rgba(width, height, rgba.into_raw())
}

fn looks_like_svg(data: &[u8], name: Option<&str>) -> bool {
    if let Some(name) = name {
        if name.to_ascii_lowercase().ends_with(".svg") {
            return true;
        }
    }

    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    let head = &data[start..];
    if head.starts_with(b"<svg") || head.starts_with(b"<?xml") {
        return true;
    }
    // Leading comments or a doctype
    head.starts_with(b"<!")
        && head[..head.len().min(SVG_SNIFF_LEN)]
            .windows(4)
            .any(|w| w == b"<svg")
}

fn rasterize_svg(data: &[u8]) -> PickResult<PixelBuffer> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(data, &opts)
        .map_err(|e| PickError::Decode(format!("invalid SVG: {e}")))?;

    let width = tree.size().width().round() as u32;
    let height = tree.size().height().round() as u32;
    // Same allocation ceiling `image` applies to raster decodes
    let max_alloc = image::Limits::default().max_alloc.unwrap_or(u64::MAX);
    let bytes = u64::from(width) * u64::from(height) * CHANNELS as u64;
    if bytes > max_alloc {
        return Err(PickError::Decode(format!(
            "SVG size {width}x{height} exceeds the {max_alloc} byte limit"
        )));
    }
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PickError::Decode("SVG has no renderable area".into()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha.
    let mut rgba = Vec::with_capacity(pixmap.pixels().len() * CHANNELS);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    debug!(width, height, "rasterized SVG");
    PixelBuffer::from_rgba(width, height, rgba)
}
