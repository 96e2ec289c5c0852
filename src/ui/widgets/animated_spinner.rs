// SPDX-License-Identifier: MPL-2.0
//! Rotating arc spinner with a pulsing halo, drawn on a Canvas.
//!
//! The spinner holds no clock of its own: the caller passes the elapsed
//! analysis time and the angle and pulse are derived from it.

use crate::ui::design_tokens::{palette, sizing};
use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::{PI, TAU};
use std::time::Duration;

/// One full turn of the arc.
const ROTATION_PERIOD: Duration = Duration::from_millis(1500);

/// One halo pulse, from the arc outwards until it fades.
const PULSE_PERIOD: Duration = Duration::from_secs(2);

/// Fraction of the current period that has passed, in `0.0..1.0`.
pub(crate) fn phase(elapsed: Duration, period: Duration) -> f32 {
    let period_ms = period.as_millis().max(1);
    (elapsed.as_millis() % period_ms) as f32 / period_ms as f32
}

/// Arc angle in radians after `elapsed`.
#[must_use]
pub fn rotation_for(elapsed: Duration) -> f32 {
    phase(elapsed, ROTATION_PERIOD) * TAU
}

pub struct AnimatedSpinner {
    rotation: f32,
    pulse: f32,
    color: Color,
    size: f32,
}

impl AnimatedSpinner {
    #[must_use]
    pub fn new(elapsed: Duration) -> Self {
        Self {
            rotation: rotation_for(elapsed),
            pulse: phase(elapsed, PULSE_PERIOD),
            color: palette::PURPLE_300,
            size: sizing::SPINNER,
        }
    }

    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size * 1.6))
            .height(Length::Fixed(size * 1.6))
            .into()
    }
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        // Redrawn every frame; the angle changes on every tick
        let mut frame = Frame::new(renderer, bounds.size());
        let center = frame.center();
        let radius = self.size / 2.0 - 4.0;

        // Halo grows from the arc and fades out
        let halo_radius = radius * (1.0 + 0.6 * self.pulse);
        frame.stroke(
            &Path::circle(center, halo_radius),
            Stroke::default().with_width(1.5).with_color(Color {
                a: 0.6 * (1.0 - self.pulse),
                ..self.color
            }),
        );

        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default().with_width(3.0).with_color(Color {
                a: 0.25,
                ..self.color
            }),
        );

        // 180° arc starting at the top
        let start_angle = self.rotation - PI / 2.0;
        let mut arc = canvas::path::Builder::new();
        arc.move_to(Point::new(
            center.x + radius * start_angle.cos(),
            center.y + radius * start_angle.sin(),
        ));
        let segments = 30;
        for i in 1..=segments {
            let angle = start_angle + PI * (i as f32 / segments as f32);
            arc.line_to(Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            ));
        }
        frame.stroke(
            &arc.build(),
            Stroke::default()
                .with_width(3.0)
                .with_color(self.color)
                .with_line_cap(canvas::LineCap::Round),
        );

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_wraps_every_period() {
        assert_eq!(rotation_for(Duration::ZERO), 0.0);
        assert_eq!(rotation_for(ROTATION_PERIOD), 0.0);
        let half = rotation_for(ROTATION_PERIOD / 2);
        assert!((half - PI).abs() < 1e-4);
    }

    #[test]
    fn phase_stays_in_unit_range() {
        for ms in [0u64, 1, 999, 1000, 1999, 123_456] {
            let p = phase(Duration::from_millis(ms), PULSE_PERIOD);
            assert!((0.0..1.0).contains(&p));
        }
    }
}
