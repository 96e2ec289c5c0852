// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The window is one scrollable page: header, prompt field, the body of the
//! current phase and the action bar. Toasts are stacked on top.

use super::Message;
use crate::catalog::Catalog;
use crate::i18n::fluent::I18n;
use crate::session::{Phase, Session};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::notifications::{self, Toast};
use crate::ui::results_gallery::Gallery;
use crate::ui::upload_surface::UploadSurface;
use crate::ui::{action_bar, analysis_indicator};
use iced::widget::{column, container, scrollable, stack, text_input, Column, Text};
use iced::{alignment, Element, Length};
use std::time::{Duration, Instant};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub session: &'a Session,
    pub catalog: Option<&'a Catalog>,
    pub upload: &'a UploadSurface,
    pub gallery: &'a Gallery,
    pub notifications: &'a notifications::Manager,
    pub step_offsets: &'a [Duration],
    pub now: Instant,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;

    let header = column![
        Text::new(i18n.tr("app-title"))
            .size(typography::TITLE_LG)
            .color(palette::PURPLE_300),
        Text::new(i18n.tr("app-subtitle"))
            .size(typography::BODY_LG)
            .color(palette::GRAY_400),
    ]
    .spacing(spacing::XXS)
    .align_x(alignment::Horizontal::Center);

    let prompt = text_input(&i18n.tr("prompt-placeholder"), ctx.session.prompt())
        .on_input(Message::PromptChanged)
        .padding(spacing::SM)
        .size(typography::BODY_LG)
        .width(Length::Fill);

    let mut page = Column::new()
        .spacing(spacing::XL)
        .padding(spacing::XL)
        .width(Length::Fill)
        .max_width(sizing::CONTENT_MAX_WIDTH)
        .align_x(alignment::Horizontal::Center)
        .push(header)
        .push(prompt);

    match ctx.session.phase() {
        Phase::Idle => {
            page = page.push(ctx.upload.view(i18n).map(Message::Upload));
        }
        Phase::Analyzing { .. } => {
            let elapsed = ctx.session.analysis_elapsed(ctx.now).unwrap_or_default();
            page = page
                .push(ctx.upload.view(i18n).map(Message::Upload))
                .push(analysis_indicator::view(i18n, elapsed, ctx.step_offsets));
        }
        Phase::ShowingResults { selected } => {
            if let Some(catalog) = ctx.catalog {
                page = page.push(
                    ctx.gallery
                        .view(
                            catalog,
                            selected.as_deref(),
                            ctx.session.uploaded_files(),
                            i18n,
                        )
                        .map(Message::Gallery),
                );
            }
        }
    }

    page = page.push(action_bar::view(i18n).map(Message::Action));

    let body = scrollable(container(page).width(Length::Fill).center_x(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill);

    let toasts = Toast::view_overlay(ctx.notifications, i18n).map(Message::Notification);

    stack![body, toasts]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
