// SPDX-License-Identifier: MPL-2.0
//! One episode card of the results grid.

use super::{Message, PosterState};
use crate::catalog::EpisodeRecord;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, column, container, image, stack, text, Text};
use iced::{alignment, ContentFit, Element, Length};

pub fn view<'a>(
    record: &'a EpisodeRecord,
    poster: Option<&'a PosterState>,
    selected: bool,
    i18n: &I18n,
) -> Element<'a, Message> {
    let poster_area: Element<'a, Message> = match poster {
        Some(PosterState::Ready(data)) => image(data.handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(sizing::POSTER_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        Some(PosterState::Loading) => placeholder("…"),
        Some(PosterState::Unavailable) | None => placeholder("▶"),
    };

    let duration_badge = container(text(record.duration.to_string()).size(typography::CAPTION))
        .padding([spacing::XXS, spacing::XS])
        .style(styles::container::badge(palette::WHITE));

    let poster_with_badge = stack![
        poster_area,
        container(duration_badge)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::POSTER_HEIGHT))
            .padding(spacing::XS)
            .align_x(alignment::Horizontal::Right)
            .align_y(alignment::Vertical::Bottom),
    ];

    let score = record.match_score.to_string();
    let match_badge = container(
        text(i18n.tr_with_args("results-match", &[("score", score.as_str())]))
            .size(typography::CAPTION),
    )
    .padding([spacing::XXS, spacing::XS])
    .style(styles::container::badge(palette::SUCCESS_500));

    let body = column![
        Text::new(record.title.as_str()).size(typography::TITLE_SM),
        Text::new(record.description.as_str())
            .size(typography::BODY_SM)
            .color(palette::GRAY_400),
        match_badge,
    ]
    .spacing(spacing::XS)
    .padding(spacing::SM);

    button(column![poster_with_badge, body])
        .width(Length::Fixed(sizing::CARD_WIDTH))
        .padding(0)
        .style(styles::button::card(selected))
        .on_press(Message::CardPressed(record.id.clone()))
        .into()
}

fn placeholder<'a>(glyph: &'a str) -> Element<'a, Message> {
    container(Text::new(glyph).size(typography::TITLE_LG))
        .width(Length::Fill)
        .height(Length::Fixed(sizing::POSTER_HEIGHT))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(sizing::POSTER_HEIGHT))
        .style(styles::container::media_frame)
        .into()
}
