// SPDX-License-Identifier: MPL-2.0
//! The results screen: header, detail player, episode grid and the echo of
//! the uploaded files.
//!
//! The gallery owns what only matters for display (poster frames and the
//! player). Which record is selected belongs to the session; the gallery is
//! told about it through [`Gallery::open`].

mod card;
mod player;

use crate::catalog::{Catalog, EpisodeRecord};
use crate::config::POSTER_FRAME_OFFSET_SECS;
use crate::error::{Error, Result};
use crate::i18n::fluent::I18n;
use crate::media::{video, ImageData, UploadedFile};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::video_player::{self, PlaybackSource, PlaybackUpdate, PlayerEvent, VideoPlayer};
use iced::widget::{column, container, row, Column, Row, Text};
use iced::{alignment, Element, Length, Subscription, Task};
use std::collections::HashMap;
use std::path::PathBuf;

/// Cards per grid row.
const GRID_COLUMNS: usize = 3;

#[derive(Debug, Clone)]
pub enum PosterState {
    Loading,
    Ready(ImageData),
    Unavailable,
}

#[derive(Debug, Clone)]
pub enum Message {
    CardPressed(String),
    PosterLoaded {
        id: String,
        result: Result<ImageData>,
    },
    Player(video_player::Message),
    /// Output of a playback stream, possibly from a player already replaced.
    Playback(PlaybackUpdate),
}

/// Player options taken from the `[video]` config section.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerOptions {
    pub autoplay: bool,
    pub loop_enabled: bool,
}

#[derive(Debug)]
pub struct Gallery {
    media_root: PathBuf,
    posters: HashMap<String, PosterState>,
    player: Option<VideoPlayer>,
    options: PlayerOptions,
    next_session: u64,
}

impl Gallery {
    #[must_use]
    pub fn new(media_root: PathBuf, options: PlayerOptions) -> Self {
        Self {
            media_root,
            posters: HashMap::new(),
            player: None,
            options,
            next_session: 0,
        }
    }

    #[must_use]
    pub fn poster(&self, id: &str) -> Option<&PosterState> {
        self.posters.get(id)
    }

    #[must_use]
    pub fn player(&self) -> Option<&VideoPlayer> {
        self.player.as_ref()
    }

    /// Starts decoding one poster frame per record in the background.
    pub fn load_posters(&mut self, catalog: &Catalog) -> Task<Message> {
        let tasks = catalog.records().iter().map(|record| {
            let id = record.id.clone();
            let path = record.resolve_media(&self.media_root);
            self.posters.insert(id.clone(), PosterState::Loading);

            Task::perform(extract_poster(path), move |result| Message::PosterLoaded {
                id,
                result,
            })
        });
        Task::batch(tasks.collect::<Vec<_>>())
    }

    /// Replaces the player with one bound to `record`.
    pub fn open(&mut self, record: &EpisodeRecord) {
        self.next_session += 1;
        let source = PlaybackSource {
            path: record.resolve_media(&self.media_root),
            session_id: self.next_session,
        };
        tracing::info!(id = %record.id, path = %source.path.display(), "opening episode");
        self.player = Some(VideoPlayer::new(
            source,
            self.options.autoplay,
            self.options.loop_enabled,
        ));
    }

    pub fn update(&mut self, message: Message) -> PlayerEvent {
        match message {
            Message::CardPressed(_) => PlayerEvent::None,
            Message::PosterLoaded { id, result } => {
                let state = match result {
                    Ok(image) => PosterState::Ready(image),
                    Err(err) => {
                        tracing::debug!(%id, error = %err, "no poster frame");
                        PosterState::Unavailable
                    }
                };
                self.posters.insert(id, state);
                PlayerEvent::None
            }
            Message::Player(player_message) => match self.player.as_mut() {
                Some(player) => player.update(player_message),
                None => PlayerEvent::None,
            },
            Message::Playback(update) => match self.player.as_mut() {
                Some(player) if player.source().session_id == update.session_id => {
                    player.update(video_player::Message::Playback(update.message))
                }
                _ => {
                    tracing::trace!(session_id = update.session_id, "stale playback message dropped");
                    PlayerEvent::None
                }
            },
        }
    }

    /// Playback stream of the open player, if any.
    pub fn subscription(&self) -> Subscription<Message> {
        match &self.player {
            Some(player) => {
                video_player::video_playback(player.source().clone()).map(Message::Playback)
            }
            None => Subscription::none(),
        }
    }

    pub fn view<'a>(
        &'a self,
        catalog: &'a Catalog,
        selected: Option<&'a str>,
        uploaded: &'a [UploadedFile],
        i18n: &'a I18n,
    ) -> Element<'a, Message> {
        let count = catalog.len().to_string();
        let header = column![
            Text::new(i18n.tr("results-title"))
                .size(typography::TITLE_LG)
                .color(palette::SUCCESS_500),
            Text::new(i18n.tr_with_args("results-summary", &[("count", count.as_str())]))
                .size(typography::BODY_LG)
                .color(palette::GRAY_400),
        ]
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center);

        let mut content = Column::new()
            .spacing(spacing::XL)
            .align_x(alignment::Horizontal::Center)
            .push(header);

        let selected_record = selected.and_then(|id| catalog.get(id));
        if let (Some(player), Some(record)) = (&self.player, selected_record) {
            let detail = player::view(player, record, i18n).map(Message::Player);
            content = content.push(
                container(detail)
                    .width(Length::Fill)
                    .padding(spacing::LG)
                    .style(styles::container::panel),
            );
        }

        content = content.push(self.grid(catalog, selected, i18n));

        if !uploaded.is_empty() {
            content = content.push(uploaded_echo(uploaded, i18n));
        }

        content.into()
    }

    fn grid<'a>(
        &'a self,
        catalog: &'a Catalog,
        selected: Option<&'a str>,
        i18n: &'a I18n,
    ) -> Element<'a, Message> {
        catalog
            .records()
            .chunks(GRID_COLUMNS)
            .fold(Column::new().spacing(spacing::LG), |grid, chunk| {
                let cards = chunk.iter().fold(Row::new().spacing(spacing::LG), |line, record| {
                    line.push(card::view(
                        record,
                        self.posters.get(&record.id),
                        selected == Some(record.id.as_str()),
                        i18n,
                    ))
                });
                grid.push(cards)
            })
            .into()
    }
}

/// Echo of the files the results were "generated" from.
fn uploaded_echo<'a, M: 'a>(files: &'a [UploadedFile], i18n: &I18n) -> Element<'a, M> {
    let entries = files.iter().fold(Column::new().spacing(spacing::XS), |list, file| {
        list.push(
            row![
                Text::new("•").color(palette::INFO_500),
                Text::new(file.name.as_str()).size(typography::BODY),
                Text::new(format!("({})", file.size_label()))
                    .size(typography::BODY_SM)
                    .color(palette::GRAY_400),
            ]
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center),
        )
    });

    container(
        column![
            Text::new(i18n.tr("results-uploaded-files")).size(typography::TITLE_SM),
            entries,
        ]
        .spacing(spacing::SM),
    )
    .width(Length::Fill)
    .max_width(sizing::CONTENT_MAX_WIDTH)
    .padding(spacing::MD)
    .style(styles::container::panel)
    .into()
}

async fn extract_poster(path: PathBuf) -> Result<ImageData> {
    tokio::task::spawn_blocking(move || video::extract_poster_frame(&path, POSTER_FRAME_OFFSET_SECS))
        .await
        .map_err(|e| Error::Io(format!("poster task failed: {e}")))?
}
