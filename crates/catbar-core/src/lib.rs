//! Core types and traits for the catbar category bar widget.
//!
//! This crate provides the foundation widgets are built on:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] with WCAG contrast calculations
//! - Layout constraints: [`Constraints`]
//! - Events: [`Event`], [`Key`]
//! - The [`Widget`], [`Canvas`] and [`Brick`] contracts, with a
//!   [`RecordingCanvas`] that captures [`DrawCommand`]s
//! - Color tokens, class-name and numeric helpers used by markup output

pub mod brick;
mod canvas;
pub mod class_name;
mod color;
mod constraints;
pub mod draw;
mod event;
mod geometry;
pub mod markup;
pub mod numeric;
pub mod theme;
pub mod widget;

pub use brick::{
    Brick, BrickAssertion, BrickBudget, BrickError, BrickResult, BrickVerification,
    BrickWidgetExt,
};
pub use canvas::RecordingCanvas;
pub use class_name::{make_class_name, merge_classes};
pub use color::Color;
pub use constraints::Constraints;
pub use draw::DrawCommand;
pub use event::{Event, Key};
pub use geometry::{CornerRadius, Point, Rect, Size};
pub use markup::escape_html;
pub use numeric::{format_number, sum_numeric};
pub use theme::{
    color_class_names, ColorClassNames, ColorPalette, ColorRole, ColorToken, DEFAULT_COLOR,
    DEFAULT_COLOR_RANGE,
};
pub use widget::{AccessibleRole, Canvas, FontWeight, LayoutResult, TextStyle, TypeId, Widget};
