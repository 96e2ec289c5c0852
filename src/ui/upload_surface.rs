// SPDX-License-Identifier: MPL-2.0
//! The drop zone: collects offered files and hands the video subset upward.
//!
//! Files arrive three ways: dropped on the window, picked in the file
//! dialog, or named on the command line. All of them go through
//! [`UploadSurface::offer`], which keeps only video-typed files.
//!
//! The window reports dropped files one event at a time. The surface groups
//! them into one offer: the group is flushed when as many files were dropped
//! as were hovered, or once the settle window has passed since the first
//! drop.

use crate::i18n::fluent::I18n;
use crate::media::{media_type_for_path, FileHandle, UploadBatch};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, column, container, mouse_area, text, Text};
use iced::{alignment, Element, Length};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// How the drop zone looks while files are dragged over the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPresentation {
    /// Nothing is being dragged.
    Neutral,
    /// Every hovered file is a video.
    Accepting,
    /// At least one hovered file is not a video.
    Rejecting,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// The zone or its button was clicked.
    BrowsePressed,
}

/// What the surface asks of its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    OpenPicker,
}

/// Builds a handle for a path reported by the window or the picker.
///
/// Hovered paths may not be readable yet; they still get a declared type
/// from their name so the drag presentation can be computed.
#[must_use]
pub fn handle_for_path(path: PathBuf) -> FileHandle {
    match FileHandle::from_path(path.clone()) {
        Ok(handle) => handle,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "offered file has no metadata");
            let media_type = media_type_for_path(&path);
            FileHandle::new(path, 0, media_type)
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadSurface {
    enabled: bool,
    hovered: Vec<FileHandle>,
    pending_drop: Vec<FileHandle>,
    first_drop_at: Option<Instant>,
    settle: Duration,
}

impl UploadSurface {
    #[must_use]
    pub fn new(settle: Duration) -> Self {
        Self {
            enabled: true,
            hovered: Vec::new(),
            pending_drop: Vec::new(),
            first_drop_at: None,
            settle,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the surface. Disabling drops any drag in progress.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.hovered.clear();
            self.pending_drop.clear();
            self.first_drop_at = None;
        }
    }

    /// Filters `offered` down to its video files.
    ///
    /// Returns `None` when nothing is a video or the surface is disabled.
    #[must_use]
    pub fn offer(&self, offered: Vec<FileHandle>) -> Option<UploadBatch> {
        if !self.enabled {
            return None;
        }
        UploadBatch::from_offered(offered)
    }

    /// A file is being dragged over the window.
    pub fn hover(&mut self, handle: FileHandle) {
        if self.enabled {
            self.hovered.push(handle);
        }
    }

    /// The drag left the window without dropping.
    pub fn hover_left(&mut self) {
        self.hovered.clear();
    }

    #[must_use]
    pub fn presentation(&self) -> DragPresentation {
        if self.hovered.is_empty() {
            DragPresentation::Neutral
        } else if self.hovered.iter().all(FileHandle::is_video) {
            DragPresentation::Accepting
        } else {
            DragPresentation::Rejecting
        }
    }

    /// Records one dropped file.
    ///
    /// Returns the whole group when it is complete (as many drops as hovered
    /// files), otherwise keeps it pending. Without a hovered set the group
    /// only ends with the settle window.
    pub fn drop_file(&mut self, handle: FileHandle, now: Instant) -> Option<Vec<FileHandle>> {
        if !self.enabled {
            return None;
        }
        self.pending_drop.push(handle);
        self.first_drop_at.get_or_insert(now);

        if !self.hovered.is_empty() && self.pending_drop.len() >= self.hovered.len() {
            Some(self.take_pending())
        } else {
            None
        }
    }

    /// Returns the pending group once the settle window has passed.
    pub fn flush_due(&mut self, now: Instant) -> Option<Vec<FileHandle>> {
        let first = self.first_drop_at?;
        if now.saturating_duration_since(first) >= self.settle {
            Some(self.take_pending())
        } else {
            None
        }
    }

    #[must_use]
    pub fn has_pending_drop(&self) -> bool {
        !self.pending_drop.is_empty()
    }

    #[must_use]
    pub fn settle_window(&self) -> Duration {
        self.settle
    }

    fn take_pending(&mut self) -> Vec<FileHandle> {
        self.hovered.clear();
        self.first_drop_at = None;
        std::mem::take(&mut self.pending_drop)
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::BrowsePressed if self.enabled => Event::OpenPicker,
            Message::BrowsePressed => Event::None,
        }
    }

    pub fn view<'a>(&self, i18n: &'a I18n) -> Element<'a, Message> {
        let presentation = self.presentation();

        let content: Element<'a, Message> = if !self.enabled {
            column![
                Text::new("◌").size(typography::TITLE_LG).color(palette::INFO_500),
                Text::new(i18n.tr("upload-processing"))
                    .size(typography::TITLE_SM)
                    .color(palette::INFO_500),
            ]
            .spacing(spacing::SM)
            .align_x(alignment::Horizontal::Center)
            .into()
        } else {
            match presentation {
                DragPresentation::Neutral => {
                    let browse = button(text(i18n.tr("upload-browse")).size(typography::BODY))
                        .padding([spacing::XS, spacing::MD])
                        .style(styles::button::primary)
                        .on_press(Message::BrowsePressed);

                    column![
                        Text::new("▶").size(typography::TITLE_LG).color(palette::PURPLE_300),
                        Text::new(i18n.tr("upload-title"))
                            .size(typography::TITLE_MD)
                            .color(palette::PURPLE_300),
                        Text::new(i18n.tr("upload-hint")).size(typography::BODY_SM),
                        browse,
                    ]
                    .spacing(spacing::SM)
                    .align_x(alignment::Horizontal::Center)
                    .into()
                }
                DragPresentation::Accepting | DragPresentation::Rejecting => {
                    let key = if presentation == DragPresentation::Accepting {
                        "upload-drag-active"
                    } else {
                        "upload-drag-reject"
                    };
                    column![
                        Text::new("⇩").size(typography::TITLE_LG).color(palette::INFO_500),
                        Text::new(i18n.tr(key)).size(typography::TITLE_MD),
                    ]
                    .spacing(spacing::SM)
                    .align_x(alignment::Horizontal::Center)
                    .into()
                }
            }
        };

        let accent = match (self.enabled, presentation) {
            (false, _) => Some(palette::INFO_500),
            (true, DragPresentation::Neutral) => None,
            (true, DragPresentation::Accepting) => Some(palette::SUCCESS_500),
            (true, DragPresentation::Rejecting) => Some(palette::ERROR_500),
        };

        let zone = container(content)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::DROP_ZONE_HEIGHT))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(sizing::DROP_ZONE_HEIGHT))
            .style(styles::container::drop_zone(accent));

        if self.enabled {
            mouse_area(zone).on_press(Message::BrowsePressed).into()
        } else {
            zone.into()
        }
    }
}
