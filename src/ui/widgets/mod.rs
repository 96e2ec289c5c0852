// SPDX-License-Identifier: MPL-2.0
pub mod animated_spinner;
pub mod scan_bar;

pub use animated_spinner::AnimatedSpinner;
pub use scan_bar::ScanBar;
