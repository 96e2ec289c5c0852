// SPDX-License-Identifier: MPL-2.0
//! Design tokens: the fixed colors, spacing, sizes and radii every screen
//! element is built from.
//!
//! - **Palette**: Base colors (neutral grays plus the purple/pink accents)
//! - **Opacity**: Standardized opacity levels
//! - **Spacing**: Spacing scale (8px grid)
//! - **Sizing**: Component sizes (cards, drop zone, player, toasts)
//! - **Typography**: Font size scale
//! - **Border**, **Radius**, **Shadow**
//!
//! ```
//! use minerama::ui::design_tokens::{opacity, palette, spacing};
//! use iced::Color;
//!
//! let scrim = Color { a: opacity::OVERLAY_STRONG, ..palette::BLACK };
//! let padding = spacing::MD;
//! ```

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.07, 0.07, 0.1);
    pub const GRAY_800: Color = Color::from_rgb(0.12, 0.12, 0.16);
    pub const GRAY_700: Color = Color::from_rgb(0.22, 0.22, 0.27);
    pub const GRAY_400: Color = Color::from_rgb(0.45, 0.45, 0.5);
    pub const GRAY_200: Color = Color::from_rgb(0.78, 0.78, 0.82);
    pub const GRAY_100: Color = Color::from_rgb(0.9, 0.9, 0.93);

    // Accent (purple → pink)
    pub const PURPLE_300: Color = Color::from_rgb(0.76, 0.6, 0.98);
    pub const PURPLE_500: Color = Color::from_rgb(0.58, 0.33, 0.95);
    pub const PURPLE_700: Color = Color::from_rgb(0.42, 0.2, 0.75);
    pub const PINK_500: Color = Color::from_rgb(0.93, 0.29, 0.6);

    // Semantic colors
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
    pub const INFO_500: Color = Color::from_rgb(0.392, 0.588, 1.0);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OVERLAY_PRESSED: f32 = 0.9;
    pub const OPAQUE: f32 = 1.0;

    /// Semi-transparent panels and cards
    pub const SURFACE: f32 = 0.95;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
    pub const XXL: f32 = 48.0;
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    pub const BUTTON_HEIGHT: f32 = 36.0;

    /// Max width of the centered content column.
    pub const CONTENT_MAX_WIDTH: f32 = 1100.0;

    pub const DROP_ZONE_HEIGHT: f32 = 220.0;
    pub const SPINNER: f32 = 72.0;
    pub const SCAN_BAR_HEIGHT: f32 = 4.0;

    pub const CARD_WIDTH: f32 = 320.0;
    pub const POSTER_HEIGHT: f32 = 180.0;
    pub const PLAYER_HEIGHT: f32 = 420.0;

    pub const TOAST_WIDTH: f32 = 320.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// App name
    pub const TITLE_LG: f32 = 36.0;

    /// Section headings ("Video Edits Generated!")
    pub const TITLE_MD: f32 = 24.0;

    /// Card titles
    pub const TITLE_SM: f32 = 18.0;

    pub const BODY_LG: f32 = 16.0;
    pub const BODY: f32 = 14.0;
    pub const BODY_SM: f32 = 13.0;

    /// Badges, sizes, timestamps
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Scale
// ============================================================================

pub mod border {
    pub const WIDTH_SM: f32 = 1.0;
    pub const WIDTH_MD: f32 = 2.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
    pub const XL: f32 = 16.0;
    pub const FULL: f32 = 9999.0;
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const SM: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 2.0 },
        blur_radius: 4.0,
    };

    pub const MD: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::SURFACE > 0.0 && opacity::SURFACE < 1.0);

    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::TITLE_MD > typography::TITLE_SM);
    assert!(typography::BODY > typography::CAPTION);

    assert!(sizing::CARD_WIDTH < sizing::CONTENT_MAX_WIDTH);
    assert!(border::WIDTH_MD > border::WIDTH_SM);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_is_consistent() {
        assert_eq!(spacing::MD, spacing::XS * 2.0);
        assert_eq!(spacing::LG, spacing::MD * 1.5);
    }

    #[test]
    fn accent_colors_lean_purple_and_pink() {
        assert!(palette::PURPLE_500.b > palette::PURPLE_500.g);
        assert!(palette::PINK_500.r > palette::PINK_500.b);
    }
}
