//! Color tokens and the default theme palette.
//!
//! Tokens are opaque names. Markup output resolves them to utility class
//! names through [`color_class_names`]; painting resolves them to a concrete
//! [`Color`] through [`ColorToken::base_color`].

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named color token from the base palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Slate,
    Gray,
    Zinc,
    Neutral,
    Stone,
    Red,
    Orange,
    Amber,
    Yellow,
    Lime,
    Green,
    Emerald,
    Teal,
    Cyan,
    Sky,
    Blue,
    Indigo,
    Violet,
    Purple,
    Fuchsia,
    Pink,
    Rose,
}

impl ColorToken {
    /// Every token, in palette order.
    pub const ALL: [Self; 22] = [
        Self::Slate,
        Self::Gray,
        Self::Zinc,
        Self::Neutral,
        Self::Stone,
        Self::Red,
        Self::Orange,
        Self::Amber,
        Self::Yellow,
        Self::Lime,
        Self::Green,
        Self::Emerald,
        Self::Teal,
        Self::Cyan,
        Self::Sky,
        Self::Blue,
        Self::Indigo,
        Self::Violet,
        Self::Purple,
        Self::Fuchsia,
        Self::Pink,
        Self::Rose,
    ];

    /// Lowercase token name as used in class names.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Slate => "slate",
            Self::Gray => "gray",
            Self::Zinc => "zinc",
            Self::Neutral => "neutral",
            Self::Stone => "stone",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Amber => "amber",
            Self::Yellow => "yellow",
            Self::Lime => "lime",
            Self::Green => "green",
            Self::Emerald => "emerald",
            Self::Teal => "teal",
            Self::Cyan => "cyan",
            Self::Sky => "sky",
            Self::Blue => "blue",
            Self::Indigo => "indigo",
            Self::Violet => "violet",
            Self::Purple => "purple",
            Self::Fuchsia => "fuchsia",
            Self::Pink => "pink",
            Self::Rose => "rose",
        }
    }

    /// The 500 shade of this token.
    #[must_use]
    pub fn base_color(&self) -> Color {
        let (r, g, b) = match self {
            Self::Slate => (0x64, 0x74, 0x8b),
            Self::Gray => (0x6b, 0x72, 0x80),
            Self::Zinc => (0x71, 0x71, 0x7a),
            Self::Neutral => (0x73, 0x73, 0x73),
            Self::Stone => (0x78, 0x71, 0x6c),
            Self::Red => (0xef, 0x44, 0x44),
            Self::Orange => (0xf9, 0x73, 0x16),
            Self::Amber => (0xf5, 0x9e, 0x0b),
            Self::Yellow => (0xea, 0xb3, 0x08),
            Self::Lime => (0x84, 0xcc, 0x16),
            Self::Green => (0x22, 0xc5, 0x5e),
            Self::Emerald => (0x10, 0xb9, 0x81),
            Self::Teal => (0x14, 0xb8, 0xa6),
            Self::Cyan => (0x06, 0xb6, 0xd4),
            Self::Sky => (0x0e, 0xa5, 0xe9),
            Self::Blue => (0x3b, 0x82, 0xf6),
            Self::Indigo => (0x63, 0x66, 0xf1),
            Self::Violet => (0x8b, 0x5c, 0xf6),
            Self::Purple => (0xa8, 0x55, 0xf7),
            Self::Fuchsia => (0xd9, 0x46, 0xef),
            Self::Pink => (0xec, 0x48, 0x99),
            Self::Rose => (0xf4, 0x3f, 0x5e),
        };
        Color::from_rgb8(r, g, b)
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Token used when a color sequence is shorter than its segment sequence.
pub const DEFAULT_COLOR: ColorToken = ColorToken::Gray;

/// Theme default color range, applied when a widget is given no colors.
pub const DEFAULT_COLOR_RANGE: &[ColorToken] = &[
    ColorToken::Blue,
    ColorToken::Cyan,
    ColorToken::Sky,
    ColorToken::Indigo,
    ColorToken::Violet,
    ColorToken::Purple,
    ColorToken::Fuchsia,
    ColorToken::Slate,
    ColorToken::Gray,
    ColorToken::Zinc,
    ColorToken::Neutral,
    ColorToken::Stone,
    ColorToken::Red,
    ColorToken::Orange,
    ColorToken::Amber,
    ColorToken::Yellow,
    ColorToken::Lime,
    ColorToken::Green,
    ColorToken::Emerald,
    ColorToken::Teal,
    ColorToken::Pink,
    ColorToken::Rose,
];

/// Semantic role a token plays; each role picks a shade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorRole {
    CanvasBackground,
    LightBackground,
    Background,
    DarkBackground,
    LightBorder,
    Border,
    Ring,
    Text,
    DarkText,
}

impl ColorRole {
    /// Palette shade used for this role.
    #[must_use]
    pub const fn shade(&self) -> u16 {
        match self {
            Self::CanvasBackground => 50,
            Self::LightBackground => 100,
            Self::Background | Self::Border | Self::Text => 500,
            Self::DarkBackground => 600,
            Self::LightBorder => 200,
            Self::Ring => 300,
            Self::DarkText => 700,
        }
    }
}

/// Utility class names for a token at one shade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorClassNames {
    /// Background color class, e.g. `bg-blue-500`
    pub bg_color: String,
    /// Text color class
    pub text_color: String,
    /// Border color class
    pub border_color: String,
    /// Ring color class
    pub ring_color: String,
    /// SVG fill class
    pub fill_color: String,
    /// SVG stroke class
    pub stroke_color: String,
}

/// Resolve a token and role to utility class names.
#[must_use]
pub fn color_class_names(token: ColorToken, role: ColorRole) -> ColorClassNames {
    let suffix = format!("{}-{}", token.name(), role.shade());
    ColorClassNames {
        bg_color: format!("bg-{suffix}"),
        text_color: format!("text-{suffix}"),
        border_color: format!("border-{suffix}"),
        ring_color: format!("ring-{suffix}"),
        fill_color: format!("fill-{suffix}"),
        stroke_color: format!("stroke-{suffix}"),
    }
}

/// Concrete colors for the chrome around the data (labels, marker ring, tooltip).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    /// Label text
    pub content: Color,
    /// Ring drawn around the marker
    pub brand_inverted: Color,
    /// Surface the widget sits on
    pub surface: Color,
    /// Tooltip background
    pub tooltip_background: Color,
    /// Tooltip text
    pub tooltip_text: Color,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::light()
    }
}

impl ColorPalette {
    /// Light palette.
    #[must_use]
    pub fn light() -> Self {
        Self {
            content: Color::from_rgb8(0x6b, 0x72, 0x80), // gray-500
            brand_inverted: Color::WHITE,
            surface: Color::WHITE,
            tooltip_background: Color::BLACK,
            tooltip_text: Color::WHITE,
        }
    }

    /// Dark palette.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            content: Color::from_rgb8(0x9c, 0xa3, 0xaf), // gray-400
            brand_inverted: Color::from_rgb8(0x03, 0x07, 0x12),
            surface: Color::from_rgb8(0x03, 0x07, 0x12), // gray-950
            tooltip_background: Color::WHITE,
            tooltip_text: Color::BLACK,
        }
    }
}
