// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Each component follows the Elm-style "state down, messages up" pattern:
//! it renders from borrowed state and reports user intent as messages that
//! `App::update` routes.
//!
//! # Screens
//!
//! - [`upload_surface`] - Drop zone and file picker entry point
//! - [`analysis_indicator`] - "Analyzing Videos" progress panel
//! - [`results_gallery`] - Episode grid, detail player and upload echo
//! - [`action_bar`] - Follow-up action buttons
//!
//! # Shared Infrastructure
//!
//! - [`widgets`] - Canvas widgets (spinner, scan bar)
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management
//! - [`notifications`] - Toast notification system for user feedback

pub mod action_bar;
pub mod analysis_indicator;
pub mod design_tokens;
pub mod notifications;
pub mod results_gallery;
pub mod styles;
pub mod theming;
pub mod upload_surface;
pub mod widgets;
