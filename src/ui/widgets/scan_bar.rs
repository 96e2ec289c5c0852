// SPDX-License-Identifier: MPL-2.0
//! Thin track with a highlight sweeping left to right, drawn on a Canvas.

use crate::ui::design_tokens::{palette, sizing};
use crate::ui::widgets::animated_spinner::phase;
use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Size, Theme};
use std::time::Duration;

/// Time for the highlight to cross the track once.
const SWEEP_PERIOD: Duration = Duration::from_secs(2);

/// Highlight width as a fraction of the track.
const HIGHLIGHT_FRACTION: f32 = 0.16;

/// Left edge of the highlight for a track `width` wide.
///
/// The highlight enters fully off-screen on the left and leaves fully
/// off-screen on the right.
#[must_use]
pub fn highlight_offset(elapsed: Duration, width: f32) -> f32 {
    let highlight = width * HIGHLIGHT_FRACTION;
    -highlight + (width + highlight) * phase(elapsed, SWEEP_PERIOD)
}

pub struct ScanBar {
    elapsed: Duration,
}

impl ScanBar {
    #[must_use]
    pub fn new(elapsed: Duration) -> Self {
        Self { elapsed }
    }

    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        Canvas::new(self)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::SCAN_BAR_HEIGHT))
            .into()
    }
}

impl<Message> canvas::Program<Message> for ScanBar {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let width = bounds.width;
        let height = bounds.height;

        frame.fill(
            &Path::rounded_rectangle(Point::ORIGIN, bounds.size(), (height / 2.0).into()),
            palette::GRAY_800,
        );

        let highlight = width * HIGHLIGHT_FRACTION;
        let x = highlight_offset(self.elapsed, width);
        let left = x.max(0.0);
        let right = (x + highlight).min(width);
        if right > left {
            frame.fill_rectangle(
                Point::new(left, 0.0),
                Size::new(right - left, height),
                Color {
                    a: 0.9,
                    ..palette::INFO_500
                },
            );
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_starts_off_track_and_loops() {
        let width = 800.0;
        assert!(highlight_offset(Duration::ZERO, width) < 0.0);
        assert_eq!(
            highlight_offset(Duration::ZERO, width),
            highlight_offset(SWEEP_PERIOD, width)
        );
    }

    #[test]
    fn sweep_moves_right_over_time() {
        let width = 800.0;
        let early = highlight_offset(Duration::from_millis(200), width);
        let late = highlight_offset(Duration::from_millis(1800), width);
        assert!(late > early);
        assert!(late < width);
    }
}
