// SPDX-License-Identifier: MPL-2.0
//! FFmpeg helpers: opening a video stream, poster frames and metadata.

use crate::error::{Error, Result, VideoError};
use crate::media::ImageData;
use ffmpeg_next::format::{context::Input, Pixel};
use ffmpeg_next::software::scaling;
use ffmpeg_next::{codec, decoder, frame, media};
use std::path::Path;
use std::sync::Once;

/// Static flag to ensure FFmpeg is initialized only once.
static FFMPEG_INIT: Once = Once::new();

/// Initialize FFmpeg with the log level set to errors only.
///
/// Safe to call multiple times.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(Error::Io(format!("FFmpeg initialization failed: {e}")));
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

fn video_error(message: impl AsRef<str>) -> Error {
    Error::Video(VideoError::from_message(message.as_ref()))
}

/// Video metadata read from the container.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub duration_secs: f64,
    pub fps: f64,
}

/// An opened video stream with its decoder and an RGBA scaler.
pub(crate) struct VideoInput {
    pub ictx: Input,
    pub stream_index: usize,
    pub decoder: decoder::Video,
    pub scaler: scaling::Context,
    /// Seconds per stream timestamp unit.
    pub time_base: f64,
    pub metadata: VideoMetadata,
}

/// Opens `path` and prepares decoding of its best video stream.
pub(crate) fn open_video(path: &Path) -> Result<VideoInput> {
    init_ffmpeg()?;

    if !path.exists() {
        return Err(Error::Video(VideoError::IoError(format!(
            "No such file: {}",
            path.display()
        ))));
    }

    let ictx = ffmpeg_next::format::input(&path)
        .map_err(|e| video_error(format!("Failed to open video file: {e}")))?;

    let stream = ictx
        .streams()
        .best(media::Type::Video)
        .ok_or(Error::Video(VideoError::NoVideoStream))?;
    let stream_index = stream.index();
    let time_base = f64::from(stream.time_base());

    let decoder = codec::context::Context::from_parameters(stream.parameters())
        .and_then(|context| context.decoder().video())
        .map_err(|e| video_error(format!("Failed to create video decoder: {e}")))?;

    let width = decoder.width();
    let height = decoder.height();
    if width == 0 || height == 0 {
        return Err(Error::Video(VideoError::CorruptedFile));
    }

    let duration_secs = if stream.duration() > 0 {
        stream.duration() as f64 * time_base
    } else if ictx.duration() > 0 {
        ictx.duration() as f64 / f64::from(ffmpeg_next::ffi::AV_TIME_BASE)
    } else {
        0.0
    };

    let fps = {
        let rate = stream.avg_frame_rate();
        if rate.denominator() == 0 {
            0.0
        } else {
            f64::from(rate.numerator()) / f64::from(rate.denominator())
        }
    };

    let scaler = scaling::Context::get(
        decoder.format(),
        width,
        height,
        Pixel::RGBA,
        width,
        height,
        scaling::Flags::BILINEAR,
    )
    .map_err(|e| video_error(format!("Failed to create scaler: {e}")))?;

    Ok(VideoInput {
        ictx,
        stream_index,
        decoder,
        scaler,
        time_base,
        metadata: VideoMetadata {
            width,
            height,
            duration_secs,
            fps,
        },
    })
}

impl VideoInput {
    /// Seeks the container to `secs` and drops buffered decoder state.
    pub fn seek_to(&mut self, secs: f64) -> Result<()> {
        let ts = (secs.max(0.0) * f64::from(ffmpeg_next::ffi::AV_TIME_BASE)) as i64;
        self.ictx
            .seek(ts, ..ts)
            .map_err(|e| video_error(format!("Seek failed: {e}")))?;
        self.decoder.flush();
        Ok(())
    }

    /// Converts a decoded frame to tightly packed RGBA bytes.
    pub fn to_rgba(&mut self, decoded: &frame::Video) -> Result<(u32, u32, Vec<u8>)> {
        let mut rgba = frame::Video::empty();
        self.scaler
            .run(decoded, &mut rgba)
            .map_err(|e| video_error(format!("Frame scaling failed: {e}")))?;

        let width = rgba.width();
        let height = rgba.height();
        let stride = rgba.stride(0);
        let data = rgba.data(0);
        let row_len = width as usize * 4;

        let mut bytes = Vec::with_capacity(row_len * height as usize);
        for y in 0..height as usize {
            let start = y * stride;
            bytes.extend_from_slice(&data[start..start + row_len]);
        }
        Ok((width, height, bytes))
    }

    /// Presentation time of `decoded` in seconds, if it carries one.
    pub fn frame_secs(&self, decoded: &frame::Video) -> Option<f64> {
        decoded.timestamp().map(|pts| pts as f64 * self.time_base)
    }
}

/// Decodes one frame at (or just before) `offset_secs` and returns it as RGBA.
pub fn extract_poster_frame<P: AsRef<Path>>(path: P, offset_secs: f64) -> Result<ImageData> {
    let mut input = open_video(path.as_ref())?;

    if offset_secs > 0.0 {
        // A failed seek still leaves the first frame, which is a fine poster.
        if let Err(err) = input.seek_to(offset_secs) {
            tracing::debug!(error = %err, "poster seek failed, using first frame");
        }
    }

    let mut decoded = frame::Video::empty();
    let mut got_frame = false;
    let stream_index = input.stream_index;
    for (stream, packet) in input.ictx.packets() {
        if stream.index() != stream_index {
            continue;
        }
        input
            .decoder
            .send_packet(&packet)
            .map_err(|e| video_error(format!("Packet send failed: {e}")))?;
        if input.decoder.receive_frame(&mut decoded).is_ok() {
            got_frame = true;
            break;
        }
    }

    if !got_frame {
        let _ = input.decoder.send_eof();
        got_frame = input.decoder.receive_frame(&mut decoded).is_ok();
    }

    if !got_frame {
        return Err(Error::Video(VideoError::DecodingFailed(
            "Could not decode a poster frame".to_string(),
        )));
    }

    let (width, height, bytes) = input.to_rgba(&decoded)?;
    Ok(ImageData::from_rgba(width, height, bytes))
}

/// Reads dimensions, duration and frame rate without decoding frames.
pub fn extract_video_metadata<P: AsRef<Path>>(path: P) -> Result<VideoMetadata> {
    open_video(path.as_ref()).map(|input| input.metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_reported_as_io_error() {
        let dir = tempdir().expect("temp dir");
        let result = extract_video_metadata(dir.path().join("absent.mp4"));
        assert!(matches!(
            result,
            Err(Error::Video(VideoError::IoError(_)))
        ));
    }

    #[test]
    fn garbage_file_is_rejected() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("fake.mp4");
        std::fs::write(&path, b"definitely not a video container").expect("write");

        let result = extract_poster_frame(&path, 0.1);
        assert!(matches!(result, Err(Error::Video(_))));
    }

    #[test]
    #[ignore = "requires tests/data/sample.mp4"]
    fn poster_of_sample_video() {
        let image = extract_poster_frame("tests/data/sample.mp4", 0.1).expect("sample decodes");
        assert!(image.width > 0);
        assert!(image.height > 0);
    }
}
