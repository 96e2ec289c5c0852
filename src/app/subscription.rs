// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native window events (file hover/drop, close request) are routed to
//! top-level messages; the periodic tick only runs while something is
//! animating or waiting.

use super::Message;
use crate::config::ANIMATION_TICK_MS;
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Routes the window events the app reacts to.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, window_id| match event {
        event::Event::Window(window::Event::CloseRequested) => {
            Some(Message::WindowCloseRequested(window_id))
        }
        event::Event::Window(window::Event::FileHovered(path)) => Some(Message::FileHovered(path)),
        event::Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
        event::Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        _ => None,
    })
}

/// Periodic tick, active only while `active` is true.
///
/// Drives the analysis deadline, the spinner and scan bar, pending drop
/// groups and toast auto-dismissal.
pub fn create_tick_subscription(active: bool) -> Subscription<Message> {
    if active {
        time::every(Duration::from_millis(ANIMATION_TICK_MS)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
