// SPDX-License-Identifier: MPL-2.0
//! Background FFmpeg decoder for the detail player.
//!
//! The decoder runs on a blocking thread (FFmpeg contexts are not `Send`)
//! and talks to the UI through two Tokio channels: unbounded commands in,
//! bounded events out. Dropping the handle closes the command channel, which
//! ends the thread.

use crate::error::{Error, Result, VideoError};
use crate::media::video::{open_video, VideoInput};
use ffmpeg_next::frame;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Idle wait between command polls while paused.
const IDLE_POLL: Duration = Duration::from_millis(10);

/// Bounded so a fast decoder cannot pile up frames the UI has not drawn.
const EVENT_CAPACITY: usize = 2;

/// A decoded frame ready for display.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// Tightly packed RGBA bytes (width × height × 4).
    pub rgba_data: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
    /// Presentation time in seconds.
    pub pts_secs: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecoderCommand {
    Play,
    Pause,
    /// Jump to `target_secs`. While paused, one frame is decoded to show
    /// the new position.
    Seek { target_secs: f64 },
    Stop,
}

#[derive(Debug, Clone)]
pub enum DecoderEvent {
    /// The stream was opened; carries its duration in seconds.
    Opened { duration_secs: f64 },
    FrameReady(DecodedFrame),
    Buffering,
    EndOfStream,
    Error(VideoError),
}

/// Handle to a running decoder thread.
pub struct AsyncDecoder {
    command_tx: mpsc::UnboundedSender<DecoderCommand>,
    event_rx: mpsc::Receiver<DecoderEvent>,
}

impl AsyncDecoder {
    /// Starts decoding `video_path` on a blocking thread.
    ///
    /// Only checks that the file exists; open and decode failures arrive as
    /// [`DecoderEvent::Error`].
    pub fn new<P: AsRef<Path>>(video_path: P) -> Result<Self> {
        let path = video_path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::Video(VideoError::IoError(format!(
                "No such file: {}",
                path.display()
            ))));
        }

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(EVENT_CAPACITY);

        tokio::task::spawn_blocking(move || {
            decoder_loop(&path, command_rx, &event_tx);
            tracing::debug!(path = %path.display(), "decoder thread finished");
        });

        Ok(Self {
            command_tx,
            event_rx,
        })
    }

    pub fn send_command(&self, command: DecoderCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::Io("Decoder task is not running".into()))
    }

    /// Next event, or `None` once the decoder thread has ended.
    pub async fn recv_event(&mut self) -> Option<DecoderEvent> {
        self.event_rx.recv().await
    }
}

/// Playback clock of the decoder thread.
#[derive(Debug, Default)]
struct Pacing {
    playing: bool,
    /// Wall-clock instant and stream time of the first frame since play.
    anchor: Option<(Instant, f64)>,
    position_secs: f64,
    /// Decode one frame even though paused (after a seek).
    single_frame: bool,
}

impl Pacing {
    /// How long to wait before showing a frame at `pts_secs`.
    fn delay_for(&mut self, pts_secs: f64, now: Instant) -> Duration {
        match self.anchor {
            None => {
                self.anchor = Some((now, pts_secs));
                Duration::ZERO
            }
            Some((started, first_pts)) => {
                let due = started + Duration::from_secs_f64((pts_secs - first_pts).max(0.0));
                due.saturating_duration_since(now)
            }
        }
    }

    fn reset_anchor(&mut self) {
        self.anchor = None;
    }
}

fn decoder_loop(
    path: &Path,
    mut command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
    event_tx: &mpsc::Sender<DecoderEvent>,
) {
    let mut input = match open_video(path) {
        Ok(input) => input,
        Err(err) => {
            let _ = event_tx.blocking_send(DecoderEvent::Error(as_video_error(err)));
            return;
        }
    };

    if event_tx
        .blocking_send(DecoderEvent::Opened {
            duration_secs: input.metadata.duration_secs,
        })
        .is_err()
    {
        return;
    }

    let mut pacing = Pacing {
        single_frame: true,
        ..Pacing::default()
    };

    loop {
        match command_rx.try_recv() {
            Ok(DecoderCommand::Play) => {
                if !pacing.playing && pacing.position_secs > 0.0 {
                    if let Err(err) = input.seek_to(pacing.position_secs) {
                        let _ = event_tx.blocking_send(DecoderEvent::Error(as_video_error(err)));
                    }
                }
                pacing.playing = true;
                pacing.reset_anchor();
                let _ = event_tx.blocking_send(DecoderEvent::Buffering);
            }
            Ok(DecoderCommand::Pause) => {
                pacing.playing = false;
                pacing.reset_anchor();
            }
            Ok(DecoderCommand::Seek { target_secs }) => match input.seek_to(target_secs) {
                Ok(()) => {
                    pacing.position_secs = target_secs.max(0.0);
                    pacing.reset_anchor();
                    pacing.single_frame = !pacing.playing;
                    let _ = event_tx.blocking_send(DecoderEvent::Buffering);
                }
                Err(err) => {
                    let _ = event_tx.blocking_send(DecoderEvent::Error(as_video_error(err)));
                }
            },
            Ok(DecoderCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => break,
            Err(mpsc::error::TryRecvError::Empty) => {}
        }

        if !pacing.playing && !pacing.single_frame {
            std::thread::sleep(IDLE_POLL);
            continue;
        }

        match next_frame(&mut input) {
            Ok(Some(decoded)) => {
                let pts_secs = input.frame_secs(&decoded).unwrap_or(pacing.position_secs);
                let (width, height, rgba) = match input.to_rgba(&decoded) {
                    Ok(converted) => converted,
                    Err(err) => {
                        pacing.single_frame = false;
                        let _ = event_tx.blocking_send(DecoderEvent::Error(as_video_error(err)));
                        continue;
                    }
                };

                if pacing.playing {
                    let wait = pacing.delay_for(pts_secs, Instant::now());
                    if !wait.is_zero() {
                        std::thread::sleep(wait);
                    }
                }

                pacing.position_secs = pts_secs;
                pacing.single_frame = false;

                let frame = DecodedFrame {
                    rgba_data: Arc::new(rgba),
                    width,
                    height,
                    pts_secs,
                };
                if event_tx.blocking_send(DecoderEvent::FrameReady(frame)).is_err() {
                    break;
                }
            }
            Ok(None) => {
                pacing.playing = false;
                pacing.single_frame = false;
                pacing.reset_anchor();
                if event_tx.blocking_send(DecoderEvent::EndOfStream).is_err() {
                    break;
                }
            }
            Err(err) => {
                pacing.playing = false;
                pacing.single_frame = false;
                let _ = event_tx.blocking_send(DecoderEvent::Error(as_video_error(err)));
            }
        }
    }
}

/// Decodes the next frame of the video stream, `None` at end of stream.
fn next_frame(input: &mut VideoInput) -> Result<Option<frame::Video>> {
    let mut decoded = frame::Video::empty();
    let stream_index = input.stream_index;

    for (stream, packet) in input.ictx.packets() {
        if stream.index() != stream_index {
            continue;
        }
        if let Err(err) = input.decoder.send_packet(&packet) {
            return Err(Error::Video(VideoError::from_message(&format!(
                "Packet send failed: {err}"
            ))));
        }
        if input.decoder.receive_frame(&mut decoded).is_ok() {
            return Ok(Some(decoded));
        }
    }

    // Drain frames still buffered in the decoder
    let _ = input.decoder.send_eof();
    if input.decoder.receive_frame(&mut decoded).is_ok() {
        return Ok(Some(decoded));
    }
    Ok(None)
}

fn as_video_error(err: Error) -> VideoError {
    match err {
        Error::Video(video) => video,
        other => VideoError::from_message(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_fails_immediately() {
        let result = AsyncDecoder::new("/nonexistent/episode-01.mp4");
        assert!(matches!(
            result,
            Err(Error::Video(VideoError::IoError(_)))
        ));
    }

    #[tokio::test]
    async fn garbage_file_reports_error_event() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("broken.mp4");
        std::fs::write(&path, b"not a video").expect("write");

        let mut decoder = AsyncDecoder::new(&path).expect("file exists");
        let event = tokio::time::timeout(Duration::from_secs(5), decoder.recv_event())
            .await
            .expect("decoder answers");
        assert!(matches!(event, Some(DecoderEvent::Error(_))));
    }

    #[tokio::test]
    async fn commands_are_accepted_while_running() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("broken.mp4");
        std::fs::write(&path, b"not a video").expect("write");

        let decoder = AsyncDecoder::new(&path).expect("file exists");
        // The thread may already have exited after the open error; either
        // outcome is fine as long as nothing panics.
        let _ = decoder.send_command(DecoderCommand::Play);
        let _ = decoder.send_command(DecoderCommand::Seek { target_secs: 1.0 });
    }

    #[test]
    fn pacing_anchors_on_first_frame() {
        let mut pacing = Pacing::default();
        let t0 = Instant::now();

        assert_eq!(pacing.delay_for(2.0, t0), Duration::ZERO);
        assert_eq!(pacing.delay_for(2.5, t0), Duration::from_millis(500));
        assert_eq!(
            pacing.delay_for(2.5, t0 + Duration::from_secs(1)),
            Duration::ZERO
        );

        pacing.reset_anchor();
        assert_eq!(pacing.delay_for(10.0, t0), Duration::ZERO);
    }

    #[test]
    fn non_video_errors_are_classified() {
        let err = as_video_error(Error::Io("No such file or directory".into()));
        assert!(matches!(err, VideoError::IoError(_)));
    }
}
