// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Nothing here touches the upload flow: offers that hold no video are not
//! errors. [`Error`] covers config and state files, catalog validation and
//! FFmpeg, and [`VideoError`] is what the detail player shows to the user.

use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    /// The embedded episode catalog failed to parse or validate.
    Catalog(String),
    Video(VideoError),
}

/// Why a video could not be opened or decoded.
///
/// Each kind maps to a localized message through [`VideoError::i18n_key`].
#[derive(Debug, Clone, PartialEq)]
pub enum VideoError {
    /// FFmpeg has no decoder for the stream's codec.
    UnsupportedCodec(String),
    CorruptedFile,
    /// The container holds no video stream.
    NoVideoStream,
    DecodingFailed(String),
    /// The file is missing or unreadable.
    IoError(String),
    Other(String),
}

/// Codec names recognised in FFmpeg messages.
const KNOWN_CODECS: [&str; 8] = ["h264", "hevc", "h265", "vp8", "vp9", "av1", "mpeg4", "mpeg2"];

fn mentions_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

impl VideoError {
    /// Fluent key of the message shown in the player.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            VideoError::UnsupportedCodec(_) => "error-video-unsupported-codec",
            VideoError::CorruptedFile => "error-video-corrupted",
            VideoError::NoVideoStream => "error-video-no-video-stream",
            VideoError::DecodingFailed(_) => "error-video-decoding-failed",
            VideoError::IoError(_) => "error-video-io",
            VideoError::Other(_) => "error-video-general",
        }
    }

    /// Classifies a raw FFmpeg or decoder message.
    ///
    /// Checks run from most to least specific; a codec message may also say
    /// "not found", so it is matched before the I/O rule.
    pub fn from_message(msg: &str) -> Self {
        let lower = msg.to_lowercase();

        if mentions_any(&lower, &["codec", "decoder"]) {
            if let Some(codec) = KNOWN_CODECS.iter().find(|codec| lower.contains(*codec)) {
                return VideoError::UnsupportedCodec(codec.to_uppercase());
            }
            if mentions_any(&lower, &["not found", "unsupported"]) {
                return VideoError::DecodingFailed(msg.to_string());
            }
        }

        if mentions_any(
            &lower,
            &["no such file", "not found", "permission denied", "i/o error"],
        ) {
            VideoError::IoError(msg.to_string())
        } else if mentions_any(&lower, &["no video stream", "invalid data found"]) {
            VideoError::NoVideoStream
        } else if mentions_any(&lower, &["corrupt", "invalid", "malformed"]) {
            VideoError::CorruptedFile
        } else if mentions_any(&lower, &["packet", "scaling", "seek", "decode"]) {
            VideoError::DecodingFailed(msg.to_string())
        } else {
            VideoError::Other(msg.to_string())
        }
    }
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::UnsupportedCodec(codec) => write!(f, "unsupported codec {codec}"),
            VideoError::CorruptedFile => f.write_str("corrupted video file"),
            VideoError::NoVideoStream => f.write_str("no video stream"),
            VideoError::DecodingFailed(msg) => write!(f, "decoding failed: {msg}"),
            VideoError::IoError(msg) => write!(f, "cannot read video: {msg}"),
            VideoError::Other(msg) => f.write_str(msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {e}"),
            Error::Config(e) => write!(f, "Config Error: {e}"),
            Error::Catalog(e) => write!(f, "Catalog Error: {e}"),
            Error::Video(e) => write!(f, "Video Error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<VideoError> for Error {
    fn from(err: VideoError) -> Self {
        Error::Video(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_and_display() {
        let err: Error = std::io::Error::other("disk failure").into();
        assert!(matches!(&err, Error::Io(message) if message.contains("disk failure")));
        assert_eq!(err.to_string(), "I/O Error: disk failure");
    }

    #[test]
    fn catalog_error_names_its_source() {
        let err = Error::Catalog("duplicate episode id '2'".into());
        assert_eq!(err.to_string(), "Catalog Error: duplicate episode id '2'");
    }

    #[test]
    fn toml_errors_become_config_errors() {
        let parse: std::result::Result<toml::Table, _> = toml::from_str("[timing");
        let err: Error = parse.expect_err("unterminated table").into();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn missing_file_message_is_io() {
        let err = VideoError::from_message("No such file or directory");
        assert!(matches!(err, VideoError::IoError(_)));
        assert_eq!(err.i18n_key(), "error-video-io");
    }

    #[test]
    fn ffmpeg_invalid_data_means_no_stream() {
        let err = VideoError::from_message("Failed to open video file: Invalid data found when processing input");
        assert_eq!(err, VideoError::NoVideoStream);
    }

    #[test]
    fn missing_codec_is_named() {
        let err = VideoError::from_message("Decoder vp9 not found");
        assert_eq!(err, VideoError::UnsupportedCodec("VP9".into()));
    }

    #[test]
    fn unnamed_missing_decoder_is_a_decoding_failure() {
        let err = VideoError::from_message("decoder not found");
        assert!(matches!(err, VideoError::DecodingFailed(_)));
    }

    #[test]
    fn corrupt_and_packet_messages() {
        assert_eq!(
            VideoError::from_message("malformed header"),
            VideoError::CorruptedFile
        );
        assert!(matches!(
            VideoError::from_message("Packet send failed"),
            VideoError::DecodingFailed(_)
        ));
    }

    #[test]
    fn unknown_message_is_kept_verbatim() {
        let err = VideoError::from_message("something odd");
        assert_eq!(err.to_string(), "something odd");
        assert_eq!(err.i18n_key(), "error-video-general");
    }
}
