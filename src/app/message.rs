// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::config::Config;
use crate::ui::{action_bar, notifications, results_gallery, upload_surface};
use iced::window;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Upload(upload_surface::Message),
    Gallery(results_gallery::Message),
    Action(action_bar::Message),
    Notification(notifications::NotificationMessage),
    PromptChanged(String),
    /// A file is dragged over the window.
    FileHovered(PathBuf),
    /// The drag left the window.
    FilesHoveredLeft,
    /// One file was dropped on the window.
    FileDropped(PathBuf),
    /// The drop settle window has passed since the first pending drop.
    DropSettled,
    /// Result from the multi-file picker.
    PickerClosed(Option<Vec<PathBuf>>),
    Tick(Instant), // Periodic tick for animations, the analysis deadline and toasts
    WindowCloseRequested(window::Id),
}

/// Runtime flags passed from `main.rs` into [`crate::app::run`].
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Optional locale override (`--lang`).
    pub lang: Option<String>,
    /// Files named on the command line, offered at start-up.
    pub files: Vec<PathBuf>,
    /// Configuration already loaded by `main` for the log level.
    pub config: Config,
    /// i18n key of a warning raised while loading `config`.
    pub config_warning: Option<String>,
}
