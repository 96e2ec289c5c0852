// SPDX-License-Identifier: MPL-2.0
//! Playback state machine of the detail player.
//!
//! - Loading: decoder not opened yet
//! - Paused / Playing: normal playback at a position
//! - Seeking: waiting for the first frame at a new position
//! - Ended: the stream ran out and loop is off
//! - Error: opening or decoding failed, shown as a localized message

use super::decoder::DecoderCommand;
use super::subscription::{DecoderCommandSender, PlaybackMessage, PlaybackSource};
use crate::error::VideoError;
use crate::media::ImageData;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackState {
    Loading,
    Paused {
        position_secs: f64,
    },
    Playing {
        position_secs: f64,
    },
    Seeking {
        target_secs: f64,
        resume_playing: bool,
    },
    Ended,
    Error(VideoError),
}

impl PlaybackState {
    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing { .. })
    }

    /// True while playing or about to resume after a seek.
    #[must_use]
    pub fn is_playing_or_will_resume(&self) -> bool {
        match self {
            Self::Playing { .. } => true,
            Self::Seeking { resume_playing, .. } => *resume_playing,
            _ => false,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&VideoError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// Something the user did to the player, reported to the caller for
/// logging.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    None,
    Toggled { playing: bool },
    Seeked { position_secs: f64 },
}

#[derive(Debug, Clone)]
pub enum Message {
    TogglePlayback,
    /// Slider dragged; the seek is only sent on release.
    SeekPreview(f64),
    SeekCommit,
    Restart,
    ToggleLoop,
    Playback(PlaybackMessage),
}

pub struct VideoPlayer {
    source: PlaybackSource,
    state: PlaybackState,
    duration_secs: f64,
    frame: Option<ImageData>,
    loop_enabled: bool,
    autoplay: bool,
    seek_preview: Option<f64>,
    command_sender: Option<DecoderCommandSender>,
}

impl std::fmt::Debug for VideoPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoPlayer")
            .field("source", &self.source)
            .field("state", &self.state)
            .field("duration_secs", &self.duration_secs)
            .field("loop_enabled", &self.loop_enabled)
            .finish_non_exhaustive()
    }
}

impl VideoPlayer {
    #[must_use]
    pub fn new(source: PlaybackSource, autoplay: bool, loop_enabled: bool) -> Self {
        Self {
            source,
            state: PlaybackState::Loading,
            duration_secs: 0.0,
            frame: None,
            loop_enabled,
            autoplay,
            seek_preview: None,
            command_sender: None,
        }
    }

    #[must_use]
    pub fn source(&self) -> &PlaybackSource {
        &self.source
    }

    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[must_use]
    pub fn frame(&self) -> Option<&ImageData> {
        self.frame.as_ref()
    }

    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    #[must_use]
    pub fn is_loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    /// Position shown by the slider: the drag preview if any, else playback.
    #[must_use]
    pub fn display_position(&self) -> f64 {
        if let Some(preview) = self.seek_preview {
            return preview;
        }
        match self.state {
            PlaybackState::Paused { position_secs } | PlaybackState::Playing { position_secs } => {
                position_secs
            }
            PlaybackState::Seeking { target_secs, .. } => target_secs,
            PlaybackState::Ended => self.duration_secs,
            PlaybackState::Loading | PlaybackState::Error(_) => 0.0,
        }
    }

    fn send(&self, command: DecoderCommand) {
        if let Some(sender) = &self.command_sender {
            if let Err(err) = sender.send(command) {
                tracing::debug!(error = %err, "player command dropped");
            }
        }
    }

    pub fn play(&mut self) {
        match self.state {
            PlaybackState::Paused { position_secs } => {
                self.state = PlaybackState::Playing { position_secs };
                self.send(DecoderCommand::Play);
            }
            PlaybackState::Ended => self.restart(),
            _ => {}
        }
    }

    pub fn pause(&mut self) {
        match self.state {
            PlaybackState::Playing { position_secs } => {
                self.state = PlaybackState::Paused { position_secs };
                self.send(DecoderCommand::Pause);
            }
            PlaybackState::Seeking {
                target_secs,
                resume_playing: true,
            } => {
                self.state = PlaybackState::Seeking {
                    target_secs,
                    resume_playing: false,
                };
                self.send(DecoderCommand::Pause);
            }
            _ => {}
        }
    }

    /// Jumps to `target_secs`, clamped to the stream.
    pub fn seek(&mut self, target_secs: f64) {
        if matches!(self.state, PlaybackState::Loading | PlaybackState::Error(_)) {
            return;
        }
        let target = target_secs.clamp(0.0, self.duration_secs.max(0.0));
        let resume_playing = self.state.is_playing_or_will_resume();
        self.state = PlaybackState::Seeking {
            target_secs: target,
            resume_playing,
        };
        self.send(DecoderCommand::Seek {
            target_secs: target,
        });
    }

    /// Back to the start, playing.
    pub fn restart(&mut self) {
        if matches!(self.state, PlaybackState::Loading | PlaybackState::Error(_)) {
            return;
        }
        self.state = PlaybackState::Seeking {
            target_secs: 0.0,
            resume_playing: true,
        };
        self.send(DecoderCommand::Seek { target_secs: 0.0 });
        self.send(DecoderCommand::Play);
    }

    pub fn update(&mut self, message: Message) -> PlayerEvent {
        match message {
            Message::TogglePlayback => {
                if self.state.is_playing_or_will_resume() {
                    self.pause();
                    PlayerEvent::Toggled { playing: false }
                } else if matches!(self.state, PlaybackState::Paused { .. } | PlaybackState::Ended)
                {
                    self.play();
                    PlayerEvent::Toggled { playing: true }
                } else {
                    PlayerEvent::None
                }
            }
            Message::SeekPreview(position) => {
                if !matches!(self.state, PlaybackState::Loading | PlaybackState::Error(_)) {
                    self.seek_preview = Some(position);
                }
                PlayerEvent::None
            }
            Message::SeekCommit => match self.seek_preview.take() {
                Some(position) => {
                    self.seek(position);
                    PlayerEvent::Seeked {
                        position_secs: self.display_position(),
                    }
                }
                None => PlayerEvent::None,
            },
            Message::Restart => {
                self.restart();
                PlayerEvent::Seeked { position_secs: 0.0 }
            }
            Message::ToggleLoop => {
                self.loop_enabled = !self.loop_enabled;
                PlayerEvent::None
            }
            Message::Playback(playback) => {
                self.handle_playback(playback);
                PlayerEvent::None
            }
        }
    }

    fn handle_playback(&mut self, message: PlaybackMessage) {
        match message {
            PlaybackMessage::Started(sender) => {
                self.command_sender = Some(sender);
            }
            PlaybackMessage::Opened { duration_secs } => {
                self.duration_secs = duration_secs.max(0.0);
                if matches!(self.state, PlaybackState::Loading) {
                    self.state = PlaybackState::Paused { position_secs: 0.0 };
                    if self.autoplay {
                        self.play();
                    }
                }
            }
            PlaybackMessage::FrameReady(frame) => {
                let pts = frame.pts_secs;
                let pixels = Arc::try_unwrap(frame.rgba_data).unwrap_or_else(|arc| (*arc).clone());
                self.frame = Some(ImageData::from_rgba(frame.width, frame.height, pixels));

                self.state = match self.state {
                    PlaybackState::Playing { .. } => PlaybackState::Playing { position_secs: pts },
                    PlaybackState::Seeking {
                        resume_playing: true,
                        ..
                    } => PlaybackState::Playing { position_secs: pts },
                    PlaybackState::Seeking {
                        resume_playing: false,
                        ..
                    }
                    | PlaybackState::Paused { .. }
                    | PlaybackState::Loading => PlaybackState::Paused { position_secs: pts },
                    ref other => other.clone(),
                };
            }
            PlaybackMessage::Buffering => {}
            PlaybackMessage::EndOfStream => {
                if self.loop_enabled && !matches!(self.state, PlaybackState::Error(_)) {
                    self.restart();
                } else if self.state.is_playing_or_will_resume() {
                    self.state = PlaybackState::Ended;
                }
            }
            PlaybackMessage::Error(err) => {
                self.state = PlaybackState::Error(err);
            }
        }
    }
}

/// Formats seconds as `m:ss`.
#[must_use]
pub fn format_time(secs: f64) -> String {
    let total = if secs.is_finite() {
        secs.max(0.0).floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
