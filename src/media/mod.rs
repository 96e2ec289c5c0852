// SPDX-License-Identifier: MPL-2.0
//! Offered files, the video-only upload filter, and decoded frames.
//!
//! A file is accepted for upload when the media type declared for it starts
//! with `video/`. On the desktop that declaration is derived from the file
//! name (see [`media_type_for_path`]), the same way a browser derives the
//! `type` of a dropped file.

pub mod video;

use crate::error::Result;
use iced::widget::image;
use std::fs;
use std::path::{Path, PathBuf};

/// Media type prefix that marks a file as a video.
pub const VIDEO_MEDIA_PREFIX: &str = "video/";

/// Extensions suggested by the file picker.
///
/// Advisory only: a picked file still goes through the media type filter.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "wmv", "flv", "webm", "mkv"];

/// Returns the media type declared for `path`.
///
/// Unknown extensions map to `application/octet-stream`.
#[must_use]
pub fn media_type_for_path(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Returns true if `media_type` names a video.
#[must_use]
pub fn is_video_media_type(media_type: &str) -> bool {
    media_type.starts_with(VIDEO_MEDIA_PREFIX)
}

/// Formats a byte count as megabytes with two decimals (`1.50 MB`).
#[must_use]
pub fn format_megabytes(size_bytes: u64) -> String {
    format!("{:.2} MB", size_bytes as f64 / (1024.0 * 1024.0))
}

/// A file offered to the upload surface, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub media_type: String,
}

impl FileHandle {
    /// Builds a handle with an explicit declared media type.
    pub fn new(
        path: impl Into<PathBuf>,
        size: u64,
        media_type: impl Into<String>,
    ) -> Self {
        let path = path.into();
        Self {
            name: display_name(&path),
            path,
            size,
            media_type: media_type.into(),
        }
    }

    /// Builds a handle for a file on disk, reading its size and guessing
    /// its media type from the name.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let size = fs::metadata(&path)?.len();
        let media_type = media_type_for_path(&path);
        Ok(Self::new(path, size, media_type))
    }

    #[must_use]
    pub fn is_video(&self) -> bool {
        is_video_media_type(&self.media_type)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// A file accepted for the current upload cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
    pub media_type: String,
}

impl UploadedFile {
    /// Size echo shown under the results (`0.00 MB`).
    #[must_use]
    pub fn size_label(&self) -> String {
        format_megabytes(self.size)
    }
}

/// A non-empty, order-preserving set of video files.
///
/// Only [`UploadBatch::from_offered`] builds one, so every batch has already
/// been filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBatch {
    files: Vec<UploadedFile>,
}

impl UploadBatch {
    /// Keeps the video-typed subset of `offered`, in order.
    ///
    /// Returns `None` when no offered file is a video.
    pub fn from_offered(offered: impl IntoIterator<Item = FileHandle>) -> Option<Self> {
        let files: Vec<UploadedFile> = offered
            .into_iter()
            .filter(FileHandle::is_video)
            .map(|handle| UploadedFile {
                name: handle.name,
                size: handle.size,
                path: handle.path,
                media_type: handle.media_type,
            })
            .collect();

        if files.is_empty() {
            None
        } else {
            Some(Self { files })
        }
    }

    #[must_use]
    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[must_use]
    pub fn into_files(self) -> Vec<UploadedFile> {
        self.files
    }
}

/// A decoded RGBA frame ready for display.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }
}
