// SPDX-License-Identifier: MPL-2.0
//! The row of follow-up actions under the main content.
//!
//! The buttons carry no behavior yet: a click is only logged.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::widget::{button, row, text, Row};
use iced::{alignment, Element};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionId {
    Translate,
    Remix,
    AllEntries,
}

impl ActionId {
    pub const ALL: [ActionId; 3] = [ActionId::Translate, ActionId::Remix, ActionId::AllEntries];

    /// Stable identifier used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ActionId::Translate => "translate",
            ActionId::Remix => "remix",
            ActionId::AllEntries => "all-entries",
        }
    }

    fn label_key(self) -> &'static str {
        match self {
            ActionId::Translate => "action-translate",
            ActionId::Remix => "action-remix",
            ActionId::AllEntries => "action-all-entries",
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            ActionId::Translate => "文",
            ActionId::Remix => "⇄",
            ActionId::AllEntries => "☰",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Pressed(ActionId),
}

pub fn view<'a>(i18n: &I18n) -> Element<'a, Message> {
    ActionId::ALL
        .into_iter()
        .fold(Row::new().spacing(spacing::MD), |bar, action| {
            let label = row![
                text(action.glyph()).size(typography::BODY_LG),
                text(i18n.tr(action.label_key())).size(typography::BODY_LG),
            ]
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center);

            bar.push(
                button(label)
                    .padding([spacing::SM, spacing::LG])
                    .style(styles::button::chip)
                    .on_press(Message::Pressed(action)),
            )
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_log_names() {
        let ids: Vec<&str> = ActionId::ALL.iter().map(|a| a.as_str()).collect();
        assert_eq!(ids, ["translate", "remix", "all-entries"]);
    }

    #[test]
    fn every_action_has_a_label_key() {
        for action in ActionId::ALL {
            assert!(action.label_key().starts_with("action-"));
        }
    }
}
