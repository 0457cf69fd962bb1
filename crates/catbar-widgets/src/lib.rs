//! Category bar widget for catbar.
//!
//! [`CategoryBar`] draws a segmented horizontal bar. Cumulative labels sit
//! above the segment boundaries ([`place_labels`] decides which fit) and an
//! optional marker takes the color of the segment it falls on
//! ([`resolve_marker_color`]). A [`Tooltip`] opens while the marker is
//! hovered or focused.
//!
//! ```
//! use catbar_core::{ColorToken, Rect, RecordingCanvas, Widget};
//! use catbar_widgets::CategoryBar;
//!
//! let mut bar = CategoryBar::new(vec![40.0, 30.0, 30.0])
//!     .colors(vec![ColorToken::Emerald, ColorToken::Yellow, ColorToken::Rose])
//!     .marker_value(55.0);
//! bar.layout(Rect::new(0.0, 0.0, 300.0, 36.0));
//!
//! let mut canvas = RecordingCanvas::new();
//! bar.paint(&mut canvas);
//! assert_eq!(bar.marker_color(), Some(ColorToken::Yellow));
//! ```

pub mod category_bar;
pub mod labels;
pub mod marker;
pub mod tooltip;

pub use category_bar::CategoryBar;
pub use labels::{place_labels, BarLabel, BoundaryLabel, LabelLayout};
pub use marker::{marker_segment_index, resolve_marker_color};
pub use tooltip::{Tooltip, TooltipPlacement};
