// SPDX-License-Identifier: MPL-2.0
//! "Analyzing Videos" panel shown while the session waits for results.
//!
//! Stateless: everything is derived from the time elapsed since the analysis
//! started and the configured step offsets.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::{AnimatedSpinner, ScanBar};
use iced::widget::{column, container, row, Column, Text};
use iced::{alignment, Element, Length};
use std::time::Duration;

/// Labels of the progress steps, in reveal order.
pub const STEP_KEYS: [&str; 4] = [
    "analysis-step-processing",
    "analysis-step-visual",
    "analysis-step-matching",
    "analysis-step-generating",
];

/// Number of steps revealed after `elapsed`.
///
/// A step is revealed once `elapsed` reaches its offset. Offsets beyond the
/// known steps are ignored.
#[must_use]
pub fn visible_steps(elapsed: Duration, offsets: &[Duration]) -> usize {
    offsets
        .iter()
        .take(STEP_KEYS.len())
        .filter(|offset| elapsed >= **offset)
        .count()
}

pub fn view<'a, Message: 'static>(
    i18n: &I18n,
    elapsed: Duration,
    offsets: &[Duration],
) -> Element<'a, Message> {
    let revealed = visible_steps(elapsed, offsets);

    let steps = STEP_KEYS
        .iter()
        .take(revealed)
        .enumerate()
        .fold(Column::new().spacing(spacing::XS), |steps, (index, key)| {
            // Only the newest step is still "in progress"
            let (marker, color) = if index + 1 == revealed {
                ("•", palette::PURPLE_300)
            } else {
                ("✓", palette::SUCCESS_500)
            };
            steps.push(
                row![
                    Text::new(marker).size(typography::BODY).color(color),
                    Text::new(i18n.tr(key)).size(typography::BODY),
                ]
                .spacing(spacing::XS)
                .align_y(alignment::Vertical::Center),
            )
        });

    let content = column![
        AnimatedSpinner::new(elapsed).into_element(),
        Text::new(i18n.tr("analysis-title"))
            .size(typography::TITLE_MD)
            .color(palette::PURPLE_300),
        Text::new(i18n.tr("analysis-subtitle"))
            .size(typography::BODY)
            .color(palette::GRAY_400),
        steps,
        ScanBar::new(elapsed).into_element(),
    ]
    .spacing(spacing::MD)
    .align_x(alignment::Horizontal::Center);

    container(content)
        .width(Length::Fill)
        .padding(spacing::XL)
        .style(styles::container::panel)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets() -> Vec<Duration> {
        [0, 1500, 3000, 4500]
            .into_iter()
            .map(Duration::from_millis)
            .collect()
    }

    #[test]
    fn first_step_is_visible_immediately() {
        assert_eq!(visible_steps(Duration::ZERO, &offsets()), 1);
    }

    #[test]
    fn steps_appear_at_their_offsets() {
        let offsets = offsets();
        assert_eq!(visible_steps(Duration::from_millis(1499), &offsets), 1);
        assert_eq!(visible_steps(Duration::from_millis(1500), &offsets), 2);
        assert_eq!(visible_steps(Duration::from_millis(3000), &offsets), 3);
        assert_eq!(visible_steps(Duration::from_millis(4499), &offsets), 3);
        assert_eq!(visible_steps(Duration::from_millis(4500), &offsets), 4);
    }

    #[test]
    fn default_delay_ends_before_last_step() {
        // Results replace the panel at 4 s, so the last step is never reached
        assert_eq!(visible_steps(Duration::from_millis(4000), &offsets()), 3);
    }

    #[test]
    fn extra_offsets_are_ignored() {
        let mut offsets = offsets();
        offsets.push(Duration::from_millis(5000));
        assert_eq!(
            visible_steps(Duration::from_secs(10), &offsets),
            STEP_KEYS.len()
        );
    }

    #[test]
    fn no_offsets_means_no_steps() {
        assert_eq!(visible_steps(Duration::from_secs(1), &[]), 0);
    }
}
