// SPDX-License-Identifier: MPL-2.0
//! `minerama` is a small desktop demo built with the Iced GUI framework.
//!
//! Drop video files on the window (or pick them), watch a short simulated
//! analysis, then browse a fixed gallery of "generated" episodes with a
//! built-in FFmpeg player. The flow itself lives in [`session`]; everything
//! under [`ui`] renders it.

pub mod app;
pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod i18n;
pub mod media;
pub mod session;
pub mod ui;
pub mod video_player;
