// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration of the upload → analyze →
//! results flow.
//!
//! The `App` struct wires together the session state machine, the upload
//! surface, the results gallery, localization and notifications, and
//! translates messages into side effects like poster decoding or the file
//! picker.

mod message;
pub mod paths;
pub mod persisted_state;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::catalog::Catalog;
use crate::config::{self, Config};
use crate::diagnostics::{InteractionLog, OfferSource};
use crate::i18n::fluent::I18n;
use crate::session::Session;
use crate::ui::notifications;
use crate::ui::results_gallery::{Gallery, PlayerOptions};
use crate::ui::theming::ThemeMode;
use crate::ui::upload_surface::{handle_for_path, UploadSurface};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Root Iced application state.
pub struct App {
    i18n: I18n,
    theme_mode: ThemeMode,
    session: Session,
    /// `None` when the embedded catalog failed validation.
    catalog: Option<Catalog>,
    upload: UploadSurface,
    gallery: Gallery,
    step_offsets: Vec<Duration>,
    interaction_log: InteractionLog,
    /// Persisted application state (last picker directory).
    app_state: persisted_state::AppState,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
    /// Time of the latest tick, used to animate the analysis indicator.
    now: Instant,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("phase", self.session.phase())
            .field("catalog_loaded", &self.catalog.is_some())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 860;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1200;
pub const MIN_WINDOW_HEIGHT: u32 = 600;
pub const MIN_WINDOW_WIDTH: u32 = 720;

/// Builds the window settings.
///
/// Close requests are handled by the app so the session can be disposed
/// before the window goes away.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    // iced 0.14 requires a Fn boot closure
    let boot = move || App::new(flags.clone());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state and offers the command-line files.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (app_state, state_warning) = persisted_state::AppState::load();
        let now = Instant::now();
        let files = flags.files.clone();

        let mut app = Self::with_state(flags, app_state, now);
        if let Some(key) = state_warning {
            app.notifications
                .push(notifications::Notification::warning(&key));
        }

        let offered = files.into_iter().map(handle_for_path).collect();
        app.offer_files(OfferSource::CommandLine, offered, now);

        (app, Task::none())
    }

    /// Builds the app from already-loaded configuration and state.
    fn with_state(flags: Flags, app_state: persisted_state::AppState, now: Instant) -> Self {
        let Flags {
            lang,
            config,
            config_warning,
            ..
        } = flags;

        let i18n = I18n::new(lang, &config);
        let mut notifications = notifications::Manager::new();

        if let Some(key) = config_warning {
            notifications.push(notifications::Notification::warning(&key));
        }

        let catalog = match Catalog::load_embedded() {
            Ok(catalog) => {
                tracing::debug!(records = catalog.len(), "catalog loaded");
                Some(catalog)
            }
            Err(err) => {
                tracing::error!(error = %err, "embedded catalog is invalid");
                notifications.push(
                    notifications::Notification::error("notification-catalog-load-error")
                        .with_arg("error", err.to_string()),
                );
                None
            }
        };

        let media_root = media_root(&config);
        tracing::info!(path = %media_root.display(), "episode media directory");

        let options = PlayerOptions {
            autoplay: config.video.autoplay.unwrap_or(false),
            loop_enabled: config.video.loop_enabled.unwrap_or(false),
        };

        Self {
            i18n,
            theme_mode: config.general.theme_mode,
            session: Session::new(config.timing.analysis_delay()),
            catalog,
            upload: UploadSurface::new(config.timing.drop_settle()),
            gallery: Gallery::new(media_root, options),
            step_offsets: config.timing.step_offsets(),
            interaction_log: InteractionLog::default(),
            app_state,
            notifications,
            now,
        }
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.theme_mode.iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let tick_sub = subscription::create_tick_subscription(
            self.session.phase().is_analyzing()
                || self.upload.has_pending_drop()
                || self.notifications.has_notifications(),
        );
        let playback_sub = self.gallery.subscription().map(Message::Gallery);

        Subscription::batch([event_sub, tick_sub, playback_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Upload(upload_message) => self.handle_upload_message(upload_message),
            Message::Gallery(gallery_message) => self.handle_gallery_message(gallery_message),
            Message::Action(action_message) => self.handle_action(action_message),
            Message::Notification(notification_message) => {
                self.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::PromptChanged(text) => {
                self.session.set_prompt(text);
                Task::none()
            }
            Message::FileHovered(path) => self.handle_file_hovered(path),
            Message::FilesHoveredLeft => {
                self.upload.hover_left();
                Task::none()
            }
            Message::FileDropped(path) => self.handle_file_dropped(path, Instant::now()),
            Message::DropSettled => self.handle_drop_settled(Instant::now()),
            Message::PickerClosed(picked) => self.handle_picker_closed(picked, Instant::now()),
            Message::Tick(now) => self.handle_tick(now),
            Message::WindowCloseRequested(window_id) => self.handle_close_requested(window_id),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            session: &self.session,
            catalog: self.catalog.as_ref(),
            upload: &self.upload,
            gallery: &self.gallery,
            notifications: &self.notifications,
            step_offsets: &self.step_offsets,
            now: self.now,
        })
    }
}

/// Episode media directory: `--media-dir`, then `[catalog] media_dir`, then
/// the default below the data directory.
fn media_root(config: &Config) -> PathBuf {
    paths::get_media_dir(config.catalog.media_dir.as_deref())
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_MEDIA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::UserAction;
    use crate::session::Phase;
    use crate::ui::action_bar::{self, ActionId};
    use crate::ui::results_gallery;
    use std::fs;

    fn test_app(now: Instant) -> App {
        let mut config = Config::default();
        config.timing.analysis_delay_ms = Some(4000);
        let flags = Flags {
            lang: Some("en-US".into()),
            config,
            ..Flags::default()
        };
        App::with_state(flags, persisted_state::AppState::default(), now)
    }

    fn write_file(dir: &std::path::Path, name: &str, len: usize) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, vec![0u8; len]).expect("write file");
        path
    }

    fn actions(app: &App) -> Vec<UserAction> {
        app.interaction_log
            .iter()
            .map(|event| event.action.clone())
            .collect()
    }

    #[test]
    fn picker_offer_moves_to_analyzing_then_results() {
        let dir = tempfile::tempdir().expect("temp dir");
        let video = write_file(dir.path(), "a.mp4", 1024);
        let text = write_file(dir.path(), "b.txt", 10);
        let start = Instant::now();
        let mut app = test_app(start);

        let _ = app.handle_picker_closed(Some(vec![video, text]), start);
        assert!(app.session.phase().is_analyzing());
        assert!(!app.upload.is_enabled());
        assert_eq!(app.session.uploaded_files().len(), 1);
        assert_eq!(app.session.uploaded_files()[0].name, "a.mp4");

        let _ = app.handle_tick(start + Duration::from_millis(3999));
        assert!(app.session.phase().is_analyzing());

        let _ = app.handle_tick(start + Duration::from_millis(4000));
        assert!(app.session.phase().is_showing_results());
        assert!(actions(&app).contains(&UserAction::ResultsShown));
    }

    #[test]
    fn non_video_offer_stays_idle_and_warns() {
        let dir = tempfile::tempdir().expect("temp dir");
        let text = write_file(dir.path(), "notes.txt", 10);
        let now = Instant::now();
        let mut app = test_app(now);

        app.offer_files(OfferSource::Drop, vec![handle_for_path(text)], now);

        assert_eq!(app.session.phase(), &Phase::Idle);
        assert!(app.upload.is_enabled());
        assert!(app.notifications.has_notifications());
        assert_eq!(
            actions(&app),
            vec![UserAction::FilesOffered {
                source: OfferSource::Drop,
                offered: 1,
                accepted: 0,
            }]
        );
    }

    #[test]
    fn offers_while_analyzing_are_ignored() {
        let dir = tempfile::tempdir().expect("temp dir");
        let first = write_file(dir.path(), "first.mp4", 10);
        let second = write_file(dir.path(), "second.mp4", 10);
        let now = Instant::now();
        let mut app = test_app(now);

        app.offer_files(OfferSource::Picker, vec![handle_for_path(first)], now);
        app.offer_files(OfferSource::Picker, vec![handle_for_path(second)], now);

        assert_eq!(app.session.uploaded_files().len(), 1);
        assert_eq!(app.session.uploaded_files()[0].name, "first.mp4");
    }

    #[test]
    fn dropped_files_are_grouped_into_one_offer() {
        let dir = tempfile::tempdir().expect("temp dir");
        let a = write_file(dir.path(), "a.mp4", 10);
        let b = write_file(dir.path(), "b.webm", 10);
        let now = Instant::now();
        let mut app = test_app(now);

        let _ = app.handle_file_hovered(a.clone());
        let _ = app.handle_file_hovered(b.clone());
        let _ = app.handle_file_dropped(a, now);
        assert!(app.session.phase().is_idle());

        let _ = app.handle_file_dropped(b, now);
        assert!(app.session.phase().is_analyzing());
        assert_eq!(app.session.uploaded_files().len(), 2);
    }

    #[test]
    fn unhovered_drop_flushes_after_settle_window() {
        let dir = tempfile::tempdir().expect("temp dir");
        let a = write_file(dir.path(), "a.mp4", 10);
        let now = Instant::now();
        let mut app = test_app(now);

        // Hovered twice but only one file arrives
        let _ = app.handle_file_hovered(a.clone());
        let _ = app.handle_file_hovered(a.clone());
        let _ = app.handle_file_dropped(a, now);
        assert!(app.session.phase().is_idle());

        let _ = app.handle_drop_settled(now + app.upload.settle_window());
        assert!(app.session.phase().is_analyzing());
    }

    #[test]
    fn unhovered_multi_file_drop_submits_every_video() {
        let dir = tempfile::tempdir().expect("temp dir");
        let paths = ["a.mp4", "b.mp4", "c.mp4"].map(|name| write_file(dir.path(), name, 10));
        let now = Instant::now();
        let mut app = test_app(now);

        for path in paths {
            let _ = app.handle_file_dropped(path, now);
        }
        assert!(app.session.phase().is_idle());

        let _ = app.handle_drop_settled(now + app.upload.settle_window());
        let names: Vec<_> = app
            .session
            .uploaded_files()
            .iter()
            .map(|file| file.name.as_str())
            .collect();
        assert_eq!(names, ["a.mp4", "b.mp4", "c.mp4"]);
    }

    #[test]
    fn selecting_a_card_opens_the_player() {
        let dir = tempfile::tempdir().expect("temp dir");
        let video = write_file(dir.path(), "a.mp4", 10);
        let start = Instant::now();
        let mut app = test_app(start);

        app.offer_files(OfferSource::CommandLine, vec![handle_for_path(video)], start);
        let _ = app.handle_tick(start + Duration::from_secs(5));

        let _ = app.handle_gallery_message(results_gallery::Message::CardPressed("2".into()));
        assert_eq!(app.session.selected(), Some("2"));
        assert!(app.gallery.player().is_some());

        let _ = app.handle_gallery_message(results_gallery::Message::CardPressed("missing".into()));
        assert_eq!(app.session.selected(), Some("2"));
    }

    #[test]
    fn action_buttons_only_log() {
        let now = Instant::now();
        let mut app = test_app(now);

        let _ = app.handle_action(action_bar::Message::Pressed(ActionId::Remix));

        assert!(app.session.phase().is_idle());
        assert_eq!(
            actions(&app),
            vec![UserAction::ActionTriggered { id: "remix" }]
        );
    }

    #[test]
    fn close_request_discards_pending_results() {
        let dir = tempfile::tempdir().expect("temp dir");
        let video = write_file(dir.path(), "a.mp4", 10);
        let start = Instant::now();
        let mut app = test_app(start);

        app.offer_files(OfferSource::Drop, vec![handle_for_path(video)], start);
        let _ = app.handle_close_requested(window::Id::unique());
        let _ = app.handle_tick(start + Duration::from_secs(60));

        assert!(app.session.phase().is_analyzing());
    }

    #[test]
    fn prompt_is_stored() {
        let mut app = test_app(Instant::now());
        let _ = app.update(Message::PromptChanged("a cooking show".into()));
        assert_eq!(app.session.prompt(), "a cooking show");
    }
}
