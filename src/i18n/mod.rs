// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Translations are Fluent `.ftl` files embedded from `assets/i18n/`. The
//! active locale comes from the `--lang` flag, then `[general] language`,
//! then the OS locale, then `en-US`. Unknown keys render as `MISSING: <key>`.

pub mod fluent;
