// SPDX-License-Identifier: MPL-2.0
//! Toast notifications.
//!
//! Short, non-blocking messages in the bottom-right corner: a rejected drop,
//! a settings file that could not be read, a catalog that failed to load.
//!
//! - [`Notification`] carries a severity and an i18n message key
//! - [`Manager`] queues them, shows at most three, and expires them on tick
//! - [`Toast`] renders them
//!
//! Durations: 3s for success/info, 5s for warnings, manual dismiss for errors.

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage, MAX_VISIBLE};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
