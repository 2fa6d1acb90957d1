//! # Branding Assets
//!
//! Loads the company logo for quotes. The logo can live on disk or behind an
//! http(s) URL. Failure to get it is never fatal: the problem is logged and
//! the quote is rendered without a logo.
//!
//! The bytes stay in memory and are handed straight to the PDF renderer.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use estimate_core::branding::{load_logo, LogoSource};
//!
//! let source = LogoSource::parse("https://example.com/logo.png");
//! let logo = load_logo(&source, Duration::from_secs(10));
//! println!("logo available: {}", logo.is_some());
//! ```

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Where a logo comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoSource {
    Path(PathBuf),
    Url(Url),
}

impl LogoSource {
    /// Interpret text as an http(s) URL, or otherwise as a file path.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match Url::parse(text) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => LogoSource::Url(url),
            _ => LogoSource::Path(PathBuf::from(text)),
        }
    }
}

impl fmt::Display for LogoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogoSource::Path(path) => write!(f, "{}", path.display()),
            LogoSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Image formats the renderer can embed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Svg,
}

impl ImageFormat {
    /// Sniff the format from the leading bytes.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            return Some(ImageFormat::Png);
        }
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }
        if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            return Some(ImageFormat::Gif);
        }
        let head = String::from_utf8_lossy(&bytes[..bytes.len().min(512)]);
        let head = head.trim_start_matches('\u{feff}').trim_start();
        if head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg")) {
            return Some(ImageFormat::Svg);
        }
        None
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Gif => "gif",
            ImageFormat::Svg => "svg",
        }
    }
}

/// Logo bytes ready for embedding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

impl Logo {
    /// Wrap image bytes, or `None` if they are not a supported format.
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        let format = ImageFormat::detect(&bytes)?;
        Some(Logo { bytes, format })
    }
}

/// Reasons a logo could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum LogoError {
    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),
    #[error("not a PNG, JPEG, GIF or SVG image")]
    UnsupportedFormat,
}

/// Load a logo, returning `None` (and logging why) if it is unavailable.
pub fn load_logo(source: &LogoSource, timeout: Duration) -> Option<Logo> {
    match try_load_logo(source, timeout) {
        Ok(logo) => {
            tracing::debug!(source = %source, bytes = logo.bytes.len(), "loaded logo");
            Some(logo)
        }
        Err(e) => {
            tracing::warn!(source = %source, error = %e, "logo unavailable, rendering without it");
            None
        }
    }
}

/// Load a logo, reporting why it failed.
pub fn try_load_logo(source: &LogoSource, timeout: Duration) -> Result<Logo, LogoError> {
    let bytes = match source {
        LogoSource::Path(path) => std::fs::read(path).map_err(|e| LogoError::Read {
            path: path.display().to_string(),
            source: e,
        })?,
        LogoSource::Url(url) => fetch(url, timeout)?,
    };
    Logo::from_bytes(bytes).ok_or(LogoError::UnsupportedFormat)
}

fn fetch(url: &Url, timeout: Duration) -> Result<Vec<u8>, LogoError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("remodel-estimator/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()?;

    let response = client.get(url.clone()).send()?;
    if !response.status().is_success() {
        return Err(LogoError::Status(response.status()));
    }
    Ok(response.bytes()?.to_vec())
}
