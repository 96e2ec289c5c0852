// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, palette, radius, shadow};
use crate::ui::theming;
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Translucent panel surface derived from the theme background.
pub fn panel(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::SURFACE,
            ..base
        })),
        border: Border {
            radius: radius::XL.into(),
            ..Default::default()
        },
        shadow: shadow::SM,
        ..Default::default()
    }
}

/// Small pill, e.g. the duration and match badges on a card.
pub fn badge(accent: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_STRONG,
            ..palette::BLACK
        })),
        text_color: Some(accent),
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Dark frame behind posters and the player.
pub fn media_frame(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::GRAY_900)),
        text_color: Some(palette::GRAY_200),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Outline of the upload drop zone.
///
/// `accent` is the border color chosen from the drag presentation; `None`
/// means no drag is in progress.
pub fn drop_zone(accent: Option<Color>) -> impl Fn(&Theme) -> container::Style {
    move |theme: &Theme| {
        let neutral = if theming::is_light(theme) {
            palette::GRAY_200
        } else {
            palette::GRAY_700
        };
        let color = accent.unwrap_or(neutral);

        container::Style {
            background: Some(Background::Color(Color {
                a: if accent.is_some() {
                    opacity::OVERLAY_SUBTLE
                } else {
                    opacity::TRANSPARENT
                },
                ..color
            })),
            border: Border {
                color,
                width: border::WIDTH_MD,
                radius: radius::XL.into(),
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_zone_uses_accent_when_dragging() {
        let style = drop_zone(Some(palette::SUCCESS_500))(&Theme::Dark);
        assert_eq!(style.border.color, palette::SUCCESS_500);
        assert!(style.background.is_some());
    }

    #[test]
    fn idle_drop_zone_background_is_transparent() {
        let style = drop_zone(None)(&Theme::Light);
        match style.background {
            Some(Background::Color(color)) => assert_eq!(color.a, opacity::TRANSPARENT),
            other => panic!("unexpected background {other:?}"),
        }
    }
}
