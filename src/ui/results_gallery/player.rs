// SPDX-License-Identifier: MPL-2.0
//! Detail player: the playback surface, its controls and the record info.

use crate::catalog::EpisodeRecord;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::video_player::{format_time, Message, PlaybackState, VideoPlayer};
use iced::widget::{button, column, container, image, row, slider, text, Text};
use iced::{alignment, ContentFit, Element, Length};

/// Slider resolution in seconds.
const SLIDER_STEP_SECS: f64 = 0.01;

pub fn view<'a>(
    player: &'a VideoPlayer,
    record: &'a EpisodeRecord,
    i18n: &I18n,
) -> Element<'a, Message> {
    let surface: Element<'a, Message> = match (player.state(), player.frame()) {
        (PlaybackState::Error(err), _) => column![
            Text::new("⚠").size(typography::TITLE_LG).color(palette::ERROR_500),
            Text::new(i18n.tr(err.i18n_key()))
                .size(typography::BODY_LG)
                .color(palette::GRAY_200),
        ]
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center)
        .into(),
        (_, Some(frame)) => image(frame.handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        (_, None) => Text::new(i18n.tr("player-loading"))
            .size(typography::BODY)
            .color(palette::GRAY_400)
            .into(),
    };

    let surface = container(surface)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::PLAYER_HEIGHT))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(sizing::PLAYER_HEIGHT))
        .style(styles::container::media_frame);

    let info = column![
        row![
            Text::new(record.title.as_str())
                .size(typography::TITLE_MD)
                .width(Length::Fill),
            container(text(record.duration.to_string()).size(typography::CAPTION))
                .padding([spacing::XXS, spacing::SM])
                .style(styles::container::badge(palette::INFO_500)),
        ]
        .align_y(alignment::Vertical::Center),
        Text::new(record.description.as_str())
            .size(typography::BODY)
            .color(palette::GRAY_200),
    ]
    .spacing(spacing::XS);

    column![surface, controls(player, i18n), info]
        .spacing(spacing::MD)
        .into()
}

fn controls<'a>(player: &'a VideoPlayer, i18n: &I18n) -> Element<'a, Message> {
    let usable = !matches!(
        player.state(),
        PlaybackState::Loading | PlaybackState::Error(_)
    );
    let playing = player.state().is_playing_or_will_resume();

    let (glyph, label_key) = if playing {
        ("❚❚", "player-pause")
    } else {
        ("▶", "player-play")
    };
    let play_pause = button(
        row![text(glyph), text(i18n.tr(label_key))]
            .spacing(spacing::XXS)
            .align_y(alignment::Vertical::Center),
    )
    .padding([spacing::XS, spacing::SM])
    .height(Length::Fixed(sizing::BUTTON_HEIGHT))
    .style(styles::button::primary)
    .on_press_maybe(usable.then_some(Message::TogglePlayback));

    let restart = button(text(format!("↺ {}", i18n.tr("player-restart"))))
        .padding([spacing::XS, spacing::SM])
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(styles::button::chip)
        .on_press_maybe(usable.then_some(Message::Restart));

    let duration = player.duration_secs().max(0.0);
    let timeline = slider(
        0.0..=duration,
        player.display_position().min(duration),
        Message::SeekPreview,
    )
    .on_release(Message::SeekCommit)
    .step(SLIDER_STEP_SECS)
    .width(Length::Fill);

    let time = text(format!(
        "{} / {}",
        format_time(player.display_position()),
        format_time(duration)
    ))
    .size(typography::BODY_SM);

    let loop_style = if player.is_loop_enabled() {
        styles::button::chip_active
    } else {
        styles::button::chip
    };
    let loop_toggle = button(text(format!("⟲ {}", i18n.tr("player-loop"))))
        .padding([spacing::XS, spacing::SM])
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(loop_style)
        .on_press(Message::ToggleLoop);

    row![play_pause, restart, timeline, time, loop_toggle]
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .into()
}
