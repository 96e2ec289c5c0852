// SPDX-License-Identifier: MPL-2.0
//! Video playback for the detail player.
//!
//! FFmpeg decodes on a blocking thread, frames reach the UI through an Iced
//! subscription, and [`VideoPlayer`] keeps the playback state.

mod decoder;
mod state;
pub mod subscription;

pub use decoder::{AsyncDecoder, DecodedFrame, DecoderCommand, DecoderEvent};
pub use state::{format_time, Message, PlaybackState, PlayerEvent, VideoPlayer};
pub use subscription::{
    video_playback, DecoderCommandSender, PlaybackMessage, PlaybackSource, PlaybackUpdate,
};
