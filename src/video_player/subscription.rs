// SPDX-License-Identifier: MPL-2.0
//! Iced subscription bridging the decoder thread to the update loop.
//!
//! The subscription is keyed by [`PlaybackSource`]. Selecting another record
//! changes the key, so Iced drops the old stream (and with it the decoder)
//! and starts a new one. Messages already queued by the old stream can still
//! arrive afterwards; each one carries its session id so the receiver can
//! tell them apart.

use super::decoder::{AsyncDecoder, DecodedFrame, DecoderCommand, DecoderEvent};
use crate::error::{Error, VideoError};
use iced::futures::{SinkExt, Stream};
use iced::stream;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Identity of one playback session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaybackSource {
    pub path: PathBuf,
    /// Bumped on every (re)start so the same file can be reopened.
    pub session_id: u64,
}

/// Cloneable handle the player uses to steer the decoder.
#[derive(Clone)]
pub struct DecoderCommandSender(mpsc::UnboundedSender<DecoderCommand>);

impl DecoderCommandSender {
    pub fn send(&self, command: DecoderCommand) -> Result<(), String> {
        self.0
            .send(command)
            .map_err(|_| "Video decoder not running".to_string())
    }

    #[cfg(test)]
    pub(crate) fn channel() -> (Self, mpsc::UnboundedReceiver<DecoderCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self(tx), rx)
    }
}

impl std::fmt::Debug for DecoderCommandSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderCommandSender")
            .field("closed", &self.0.is_closed())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum PlaybackMessage {
    Started(DecoderCommandSender),
    Opened { duration_secs: f64 },
    FrameReady(DecodedFrame),
    Buffering,
    EndOfStream,
    Error(VideoError),
}

impl From<DecoderEvent> for PlaybackMessage {
    fn from(event: DecoderEvent) -> Self {
        match event {
            DecoderEvent::Opened { duration_secs } => PlaybackMessage::Opened { duration_secs },
            DecoderEvent::FrameReady(frame) => PlaybackMessage::FrameReady(frame),
            DecoderEvent::Buffering => PlaybackMessage::Buffering,
            DecoderEvent::EndOfStream => PlaybackMessage::EndOfStream,
            DecoderEvent::Error(err) => PlaybackMessage::Error(err),
        }
    }
}

/// A [`PlaybackMessage`] stamped with the session that produced it.
#[derive(Debug, Clone)]
pub struct PlaybackUpdate {
    pub session_id: u64,
    pub message: PlaybackMessage,
}

/// Playback subscription for `source`.
pub fn video_playback(source: PlaybackSource) -> iced::Subscription<PlaybackUpdate> {
    iced::Subscription::run_with(source, playback_stream)
}

fn playback_stream(source: &PlaybackSource) -> impl Stream<Item = PlaybackUpdate> {
    let path = source.path.clone();
    let session_id = source.session_id;
    let stamp = move |message: PlaybackMessage| PlaybackUpdate {
        session_id,
        message,
    };

    stream::channel(16, move |mut output| async move {
        let mut decoder = match AsyncDecoder::new(&path) {
            Ok(decoder) => decoder,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cannot start playback");
                let video_err = match err {
                    Error::Video(video) => video,
                    other => VideoError::from_message(&other.to_string()),
                };
                let _ = output.send(stamp(PlaybackMessage::Error(video_err))).await;
                std::future::pending::<()>().await;
                return;
            }
        };

        // Commands from the UI go through a forwarder so the decoder handle
        // (and its event receiver) stays owned by this stream.
        let (ui_tx, mut ui_rx) = mpsc::unbounded_channel();
        let _ = output
            .send(stamp(PlaybackMessage::Started(DecoderCommandSender(ui_tx))))
            .await;

        loop {
            tokio::select! {
                command = ui_rx.recv() => {
                    let Some(command) = command else { break };
                    if let Err(err) = decoder.send_command(command) {
                        tracing::debug!(error = %err, "decoder command dropped");
                    }
                }
                event = decoder.recv_event() => {
                    let Some(event) = event else { break };
                    if let DecoderEvent::Error(ref err) = event {
                        tracing::warn!(path = %path.display(), error = %err, "playback error");
                    }
                    if output.send(stamp(PlaybackMessage::from(event))).await.is_err() {
                        break;
                    }
                }
            }
        }

        std::future::pending::<()>().await;
    })
}
