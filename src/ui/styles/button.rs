// SPDX-License-Identifier: MPL-2.0
//! Button styles.

use crate::ui::design_tokens::{border, opacity, palette, radius, shadow};
use crate::ui::theming;
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Main call to action ("browse", play/pause).
pub fn primary(theme: &Theme, status: button::Status) -> button::Style {
    let (background, shadow) = match status {
        button::Status::Active => (palette::PURPLE_500, shadow::SM),
        button::Status::Hovered => (palette::PURPLE_300, shadow::MD),
        button::Status::Pressed => (palette::PURPLE_700, shadow::SM),
        button::Status::Disabled => return disabled(theme),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: palette::WHITE,
        border: Border {
            color: palette::PURPLE_700,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        shadow,
        snap: true,
    }
}

/// Outlined chip used by the action bar and the secondary player controls.
pub fn chip(theme: &Theme, status: button::Status) -> button::Style {
    let text_color = theme.palette().text;
    let fill_alpha = match status {
        button::Status::Hovered => opacity::OVERLAY_SUBTLE,
        button::Status::Pressed => opacity::OVERLAY_MEDIUM,
        button::Status::Active | button::Status::Disabled => opacity::TRANSPARENT,
    };

    button::Style {
        background: Some(Background::Color(Color {
            a: fill_alpha,
            ..palette::PURPLE_500
        })),
        text_color,
        border: Border {
            color: palette::PURPLE_500,
            width: border::WIDTH_SM,
            radius: radius::FULL.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Chip in its "on" state (e.g. loop enabled).
pub fn chip_active(_theme: &Theme, _status: button::Status) -> button::Style {
    button::Style {
        background: Some(Background::Color(palette::PURPLE_500)),
        text_color: palette::WHITE,
        border: Border {
            color: palette::PURPLE_500,
            width: border::WIDTH_SM,
            radius: radius::FULL.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Result card wrapper. The border highlights the selected card.
pub fn card(selected: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        let extended = theme.extended_palette();
        let border_color = if selected {
            palette::PINK_500
        } else if matches!(status, button::Status::Hovered) {
            palette::PURPLE_300
        } else {
            extended.background.strong.color
        };

        button::Style {
            background: Some(Background::Color(extended.background.weak.color)),
            text_color: extended.background.base.text,
            border: Border {
                color: border_color,
                width: if selected {
                    border::WIDTH_MD
                } else {
                    border::WIDTH_SM
                },
                radius: radius::LG.into(),
            },
            shadow: if selected { shadow::MD } else { shadow::SM },
            snap: true,
        }
    }
}

/// Grayed out, non-interactive.
pub fn disabled(theme: &Theme) -> button::Style {
    let (background, text_color) = if theming::is_light(theme) {
        (palette::GRAY_200, palette::GRAY_400)
    } else {
        (palette::GRAY_700, palette::GRAY_400)
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: palette::GRAY_400,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}
