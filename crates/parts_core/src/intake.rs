//! Turning user-supplied files into data URIs and back.
//!
//! Nothing here validates that the payload really is an image; a dropped text
//! file is encoded just the same and simply fails to render later.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageFormat;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Extensions offered by the file picker.
pub const PICKER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("failed to read {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Reads `path` and encodes its contents as a data URI.
pub fn read_data_uri(path: impl AsRef<Path>) -> Result<String, IntakeError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| IntakeError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let mime = sniff_mime(&bytes).unwrap_or_else(|| mime_from_extension(path));
    Ok(encode_data_uri(mime, &bytes))
}

/// Encodes in-memory bytes (e.g. a drop payload without a path).
pub fn bytes_to_data_uri(bytes: &[u8], hint: Option<&str>) -> String {
    let mime = sniff_mime(bytes)
        .or_else(|| hint.filter(|m| !m.is_empty()))
        .unwrap_or(FALLBACK_MIME);
    encode_data_uri(mime, bytes)
}

pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Splits a base64 data URI into its MIME type and decoded payload.
///
/// Returns `None` for anything that is not a base64 data URI, including the
/// static references used by seed records.
pub fn decode_data_uri(uri: &str) -> Option<(String, Vec<u8>)> {
    let rest = uri.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload.trim()).ok()?;
    let mime = if mime.is_empty() { FALLBACK_MIME } else { mime };
    Some((mime.to_string(), bytes))
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    let format = image::guess_format(bytes).ok()?;
    Some(format_mime(format))
}

fn format_mime(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Gif => "image/gif",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Bmp => "image/bmp",
        ImageFormat::Tiff => "image/tiff",
        ImageFormat::Ico => "image/x-icon",
        ImageFormat::Avif => "image/avif",
        _ => FALLBACK_MIME,
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => ImageFormat::from_extension(ext)
            .map(format_mime)
            .unwrap_or(FALLBACK_MIME),
        None => FALLBACK_MIME,
    }
}
