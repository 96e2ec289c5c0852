// SPDX-License-Identifier: MPL-2.0
//! Message handlers behind `App::update`.
//!
//! Every state change of the window happens here, one message at a time.
//! Handlers that need "now" take it as a parameter so the flow can be
//! driven with explicit instants in tests.

use super::{App, Message};
use crate::diagnostics::{OfferSource, UserAction};
use crate::media::{FileHandle, UploadBatch, VIDEO_EXTENSIONS};
use crate::session::Transition;
use crate::ui::action_bar;
use crate::ui::notifications::Notification;
use crate::ui::results_gallery;
use crate::ui::upload_surface::{self, handle_for_path};
use crate::video_player::PlayerEvent;
use iced::Task;
use std::path::PathBuf;
use std::time::Instant;

impl App {
    /// Runs an offer through the upload filter and, when it holds videos,
    /// submits it to the session.
    pub(super) fn offer_files(
        &mut self,
        source: OfferSource,
        offered: Vec<FileHandle>,
        now: Instant,
    ) {
        if offered.is_empty() {
            return;
        }
        if !self.upload.is_enabled() {
            tracing::debug!(%source, count = offered.len(), "upload surface disabled, offer ignored");
            return;
        }

        let offered_count = offered.len();
        let batch = self.upload.offer(offered);
        self.interaction_log.record(UserAction::FilesOffered {
            source,
            offered: offered_count,
            accepted: batch.as_ref().map_or(0, UploadBatch::len),
        });

        let Some(batch) = batch else {
            tracing::info!(%source, offered = offered_count, "offer held no video files");
            self.notifications
                .push(Notification::warning("notification-upload-rejected"));
            return;
        };

        let file_count = batch.len();
        match self.session.submit_files(batch, now) {
            Ok(()) => {
                self.interaction_log
                    .record(UserAction::AnalysisStarted { file_count });
                self.upload.set_enabled(false);
                self.now = now;
            }
            Err(err) => tracing::debug!(error = %err, "offer not submitted"),
        }
    }

    pub(super) fn handle_tick(&mut self, now: Instant) -> Task<Message> {
        self.now = now;
        self.notifications.tick(now);

        if let Some(dropped) = self.upload.flush_due(now) {
            self.offer_files(OfferSource::Drop, dropped, now);
        }

        match self.session.tick(now) {
            Some(Transition::ResultsReady) => {
                self.interaction_log.record(UserAction::ResultsShown);
                match &self.catalog {
                    Some(catalog) => self.gallery.load_posters(catalog).map(Message::Gallery),
                    None => Task::none(),
                }
            }
            None => Task::none(),
        }
    }

    pub(super) fn handle_file_hovered(&mut self, path: PathBuf) -> Task<Message> {
        self.upload.hover(handle_for_path(path));
        Task::none()
    }

    pub(super) fn handle_file_dropped(&mut self, path: PathBuf, now: Instant) -> Task<Message> {
        let was_pending = self.upload.has_pending_drop();

        if let Some(dropped) = self.upload.drop_file(handle_for_path(path), now) {
            self.offer_files(OfferSource::Drop, dropped, now);
            return Task::none();
        }

        if !was_pending && self.upload.has_pending_drop() {
            let settle = self.upload.settle_window();
            return Task::perform(
                async move { tokio::time::sleep(settle).await },
                |()| Message::DropSettled,
            );
        }
        Task::none()
    }

    pub(super) fn handle_drop_settled(&mut self, now: Instant) -> Task<Message> {
        if let Some(dropped) = self.upload.flush_due(now) {
            self.offer_files(OfferSource::Drop, dropped, now);
        }
        Task::none()
    }

    pub(super) fn handle_upload_message(
        &mut self,
        message: upload_surface::Message,
    ) -> Task<Message> {
        match self.upload.update(message) {
            upload_surface::Event::None => Task::none(),
            upload_surface::Event::OpenPicker => self.open_picker(),
        }
    }

    fn open_picker(&self) -> Task<Message> {
        let filter_name = self.i18n.tr("upload-picker-filter");
        let last_directory = self.app_state.last_open_directory.clone();

        Task::perform(
            async move {
                let mut dialog = rfd::AsyncFileDialog::new().add_filter(filter_name, VIDEO_EXTENSIONS);

                // Start where the user picked last time
                if let Some(dir) = last_directory {
                    if dir.exists() {
                        dialog = dialog.set_directory(&dir);
                    }
                }

                dialog.pick_files().await.map(|handles| {
                    handles
                        .iter()
                        .map(|handle| handle.path().to_path_buf())
                        .collect()
                })
            },
            Message::PickerClosed,
        )
    }

    pub(super) fn handle_picker_closed(
        &mut self,
        picked: Option<Vec<PathBuf>>,
        now: Instant,
    ) -> Task<Message> {
        let Some(paths) = picked.filter(|paths| !paths.is_empty()) else {
            return Task::none();
        };

        if let Some(first) = paths.first() {
            self.app_state.set_last_open_directory_from_file(first);
            if let Some(key) = self.app_state.save() {
                self.notifications.push(Notification::warning(&key));
            }
        }

        let offered = paths.into_iter().map(handle_for_path).collect();
        self.offer_files(OfferSource::Picker, offered, now);
        Task::none()
    }

    pub(super) fn handle_gallery_message(
        &mut self,
        message: results_gallery::Message,
    ) -> Task<Message> {
        if let results_gallery::Message::CardPressed(id) = &message {
            let Some(catalog) = &self.catalog else {
                return Task::none();
            };
            if self.session.select_record(id, catalog) {
                if let Some(record) = catalog.get(id) {
                    self.gallery.open(record);
                }
                self.interaction_log
                    .record(UserAction::RecordSelected { id: id.clone() });
            }
            return Task::none();
        }

        match self.gallery.update(message) {
            PlayerEvent::None => {}
            PlayerEvent::Toggled { playing } => {
                self.interaction_log
                    .record(UserAction::PlaybackToggled { playing });
            }
            PlayerEvent::Seeked { position_secs } => {
                self.interaction_log
                    .record(UserAction::PlaybackSeeked { position_secs });
            }
        }
        Task::none()
    }

    pub(super) fn handle_action(&mut self, message: action_bar::Message) -> Task<Message> {
        let action_bar::Message::Pressed(action) = message;
        self.interaction_log.record(UserAction::ActionTriggered {
            id: action.as_str(),
        });
        Task::none()
    }

    pub(super) fn handle_close_requested(&mut self, window_id: iced::window::Id) -> Task<Message> {
        self.session.dispose();
        tracing::debug!(events = self.interaction_log.len(), "closing window");
        iced::window::close(window_id)
    }
}
