//! Tooltip widget for contextual hover information.
//!
//! A tooltip floats next to a reference element (its anchor). It prefers one
//! side, flips to the opposite side when the preferred one would leave the
//! viewport, and shifts along the other axis to stay inside it.

use catbar_core::{
    markup::attributes, merge_classes, AccessibleRole, Brick, BrickAssertion, BrickBudget,
    BrickVerification, Canvas, Color, ColorPalette, Constraints, Event, Key, LayoutResult, Point,
    Rect, Size, TextStyle, TypeId, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::time::Duration;

const ASSERTIONS: &[BrickAssertion] = &[BrickAssertion::TextVisible];

const TOOLTIP_CLASSES: &str = "max-w-xs text-sm z-20 rounded-tremor-default opacity-100 \
                               px-2.5 py-1 text-white bg-black shadow-tremor-dropdown";

/// Tooltip placement relative to the anchor element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TooltipPlacement {
    /// Above the anchor
    #[default]
    Top,
    /// Below the anchor
    Bottom,
    /// Left of the anchor
    Left,
    /// Right of the anchor
    Right,
}

impl TooltipPlacement {
    /// The placement on the other side of the anchor.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Tooltip widget for showing contextual information on hover.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tooltip {
    /// Tooltip text content
    content: String,
    /// Placement preference
    placement: TooltipPlacement,
    /// Gap between anchor and tooltip
    offset: f32,
    /// Whether tooltip is currently visible
    visible: bool,
    /// Background color
    background: Color,
    /// Text color
    text_color: Color,
    /// Horizontal padding
    padding_x: f32,
    /// Vertical padding
    padding_y: f32,
    /// Maximum width
    max_width: Option<f32>,
    /// Text size
    text_size: f32,
    /// Anchor bounds (for positioning)
    #[serde(skip)]
    anchor_bounds: Rect,
    /// Area the tooltip must stay inside, if known
    #[serde(skip)]
    viewport: Option<Rect>,
    /// Cached bounds
    #[serde(skip)]
    bounds: Rect,
}

impl Default for Tooltip {
    fn default() -> Self {
        let palette = ColorPalette::default();
        Self {
            content: String::new(),
            placement: TooltipPlacement::Top,
            offset: 5.0,
            visible: false,
            background: palette.tooltip_background,
            text_color: palette.tooltip_text,
            padding_x: 10.0,
            padding_y: 4.0,
            max_width: Some(320.0),
            text_size: 14.0,
            anchor_bounds: Rect::default(),
            viewport: None,
            bounds: Rect::default(),
        }
    }
}

impl Tooltip {
    /// Create a new tooltip.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Set the placement.
    #[must_use]
    pub const fn placement(mut self, placement: TooltipPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the gap between anchor and tooltip.
    #[must_use]
    pub fn offset(mut self, offset: f32) -> Self {
        self.offset = offset.max(0.0);
        self
    }

    /// Set the maximum width (None = unbounded).
    #[must_use]
    pub fn max_width(mut self, width: Option<f32>) -> Self {
        self.max_width = width.map(|w| w.max(self.padding_x * 2.0 + 1.0));
        self
    }

    /// Take background and text colors from a palette.
    #[must_use]
    pub fn palette(mut self, palette: &ColorPalette) -> Self {
        self.background = palette.tooltip_background;
        self.text_color = palette.tooltip_text;
        self
    }

    /// Get the content.
    #[must_use]
    pub fn get_content(&self) -> &str {
        &self.content
    }

    /// Get the preferred placement.
    #[must_use]
    pub const fn get_placement(&self) -> TooltipPlacement {
        self.placement
    }

    /// Check if visible.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Get the anchor bounds.
    #[must_use]
    pub const fn get_anchor(&self) -> Rect {
        self.anchor_bounds
    }

    /// Show the tooltip.
    pub fn show(&mut self) {
        if !self.visible {
            tracing::debug!(content = %self.content, "tooltip shown");
        }
        self.visible = true;
    }

    /// Hide the tooltip.
    pub fn hide(&mut self) {
        if self.visible {
            tracing::debug!(content = %self.content, "tooltip hidden");
        }
        self.visible = false;
    }

    /// Set anchor bounds.
    pub fn set_anchor(&mut self, bounds: Rect) {
        self.anchor_bounds = bounds;
    }

    /// Set the viewport used for flipping and shifting.
    pub fn set_viewport(&mut self, viewport: Option<Rect>) {
        self.viewport = viewport;
    }

    /// Whether there is anything to render.
    fn is_shown(&self) -> bool {
        self.visible && !self.content.is_empty()
    }

    fn text_style(&self) -> TextStyle {
        TextStyle {
            size: self.text_size,
            color: self.text_color,
            ..TextStyle::default()
        }
    }

    /// Calculate tooltip size.
    fn calculate_size(&self) -> Size {
        let text_width = self.text_style().estimate_width(&self.content);
        let max_text = self.max_width.map(|m| self.padding_x.mul_add(-2.0, m));

        let content_width = match max_text {
            Some(max) if text_width > max => max,
            _ => text_width,
        };

        let lines = match max_text {
            Some(max) if max > 0.0 => (text_width / max).ceil().max(1.0),
            _ => 1.0,
        };

        let content_height = lines * self.text_size * 1.4;

        Size::new(
            self.padding_x.mul_add(2.0, content_width),
            self.padding_y.mul_add(2.0, content_height),
        )
    }

    /// Position on one side of the anchor, before any shifting.
    fn position_on(&self, placement: TooltipPlacement, size: Size) -> Point {
        let anchor = self.anchor_bounds;
        match placement {
            TooltipPlacement::Top => Point::new(
                anchor.x + (anchor.width - size.width) / 2.0,
                anchor.y - size.height - self.offset,
            ),
            TooltipPlacement::Bottom => Point::new(
                anchor.x + (anchor.width - size.width) / 2.0,
                anchor.bottom() + self.offset,
            ),
            TooltipPlacement::Left => Point::new(
                anchor.x - size.width - self.offset,
                anchor.y + (anchor.height - size.height) / 2.0,
            ),
            TooltipPlacement::Right => Point::new(
                anchor.right() + self.offset,
                anchor.y + (anchor.height - size.height) / 2.0,
            ),
        }
    }

    /// Whether a tooltip at `origin` overflows the viewport on the main axis of `placement`.
    fn overflows(placement: TooltipPlacement, origin: Point, size: Size, viewport: Rect) -> bool {
        match placement {
            TooltipPlacement::Top => origin.y < viewport.y,
            TooltipPlacement::Bottom => origin.y + size.height > viewport.bottom(),
            TooltipPlacement::Left => origin.x < viewport.x,
            TooltipPlacement::Right => origin.x + size.width > viewport.right(),
        }
    }

    /// Placement after flipping away from a viewport edge.
    #[must_use]
    pub fn resolved_placement(&self) -> TooltipPlacement {
        let Some(viewport) = self.viewport else {
            return self.placement;
        };
        let size = self.calculate_size();
        let preferred = self.position_on(self.placement, size);
        if !Self::overflows(self.placement, preferred, size, viewport) {
            return self.placement;
        }
        let flipped = self.placement.opposite();
        let alternative = self.position_on(flipped, size);
        if Self::overflows(flipped, alternative, size, viewport) {
            self.placement
        } else {
            flipped
        }
    }

    /// Calculate tooltip position from placement, anchor and viewport.
    fn calculate_position(&self, size: Size) -> Point {
        let placement = self.resolved_placement();
        let mut origin = self.position_on(placement, size);

        if let Some(viewport) = self.viewport {
            match placement {
                TooltipPlacement::Top | TooltipPlacement::Bottom => {
                    let max_x = (viewport.right() - size.width).max(viewport.x);
                    origin.x = origin.x.clamp(viewport.x, max_x);
                }
                TooltipPlacement::Left | TooltipPlacement::Right => {
                    let max_y = (viewport.bottom() - size.height).max(viewport.y);
                    origin.y = origin.y.clamp(viewport.y, max_y);
                }
            }
        }
        origin
    }
}

impl Widget for Tooltip {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        if !self.is_shown() {
            return Size::ZERO;
        }
        constraints.constrain(self.calculate_size())
    }

    fn layout(&mut self, _bounds: Rect) -> LayoutResult {
        if !self.is_shown() {
            self.bounds = Rect::default();
            return LayoutResult { size: Size::ZERO };
        }

        let size = self.calculate_size();
        let position = self.calculate_position(size);
        self.bounds = Rect::new(position.x, position.y, size.width, size.height);

        LayoutResult { size }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if !self.is_shown() {
            return;
        }

        canvas.fill_rect(self.bounds, self.background);
        canvas.draw_text(
            &self.content,
            Point::new(
                self.bounds.x + self.padding_x,
                self.bounds.y + self.padding_y + self.text_size,
            ),
            &self.text_style(),
        );
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        // Visibility is driven by the anchor's owner; only dismissal lives here.
        if matches!(
            event,
            Event::MouseLeave | Event::FocusOut | Event::KeyDown { key: Key::Escape }
        ) {
            self.hide();
        }
        None
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(&self.content)
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Tooltip
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for Tooltip {
    fn brick_name(&self) -> &'static str {
        "Tooltip"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        ASSERTIONS
    }

    fn budget(&self) -> BrickBudget {
        BrickBudget::uniform(16)
    }

    fn verify(&self) -> BrickVerification {
        // Hidden or empty tooltips render nothing, which is valid.
        BrickVerification {
            passed: ASSERTIONS.to_vec(),
            failed: vec![],
            verification_time: Duration::from_micros(1),
        }
    }

    fn to_html(&self) -> String {
        if !self.is_shown() {
            return String::new();
        }
        let style = format!(
            "position: fixed; left: {}px; top: {}px",
            self.bounds.x, self.bounds.y
        );
        format!(
            "<div{}>{}</div>",
            attributes([
                ("role", "tooltip"),
                ("class", merge_classes(&[TOOLTIP_CLASSES]).as_str()),
                ("style", style.as_str()),
            ]),
            catbar_core::escape_html(&self.content)
        )
    }

    fn to_css(&self) -> String {
        format!(
            r#"[role="tooltip"] {{
    background-color: {};
    color: {};
    font-size: {}px;
    padding: {}px {}px;
}}"#,
            self.background.to_hex(),
            self.text_color.to_hex(),
            self.text_size,
            self.padding_y,
            self.padding_x
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catbar_core::{DrawCommand, RecordingCanvas};

    fn shown(content: &str, anchor: Rect) -> Tooltip {
        let mut tip = Tooltip::new(content);
        tip.set_anchor(anchor);
        tip.show();
        tip
    }

    // ===== Visibility =====

    #[test]
    fn test_tooltip_hidden_by_default() {
        let tip = Tooltip::new("Hello");
        assert!(!tip.is_visible());
        assert_eq!(tip.measure(Constraints::unbounded()), Size::ZERO);
        assert!(tip.to_html().is_empty());
    }

    #[test]
    fn test_empty_content_never_renders() {
        let mut tip = shown("", Rect::new(0.0, 100.0, 4.0, 16.0));
        let result = tip.layout(Rect::default());
        assert_eq!(result.size, Size::ZERO);

        let mut canvas = RecordingCanvas::new();
        tip.paint(&mut canvas);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_dismiss_events_hide() {
        for event in [
            Event::MouseLeave,
            Event::FocusOut,
            Event::KeyDown { key: Key::Escape },
        ] {
            let mut tip = shown("x", Rect::default());
            assert!(tip.event(&event).is_none());
            assert!(!tip.is_visible(), "{event:?} should hide");
        }
    }

    #[test]
    fn test_pointer_and_focus_keep_tooltip_open() {
        let mut tip = shown("x", Rect::default());
        tip.event(&Event::MouseMove {
            position: Point::new(1.0, 1.0),
        });
        tip.event(&Event::FocusIn);
        assert!(tip.is_visible());
    }

    // ===== Positioning =====

    #[test]
    fn test_top_placement_centers_above_anchor() {
        let anchor = Rect::new(100.0, 100.0, 4.0, 16.0);
        let mut tip = shown("Target", anchor);
        let size = tip.layout(Rect::default()).size;
        let bounds = tip.bounds();

        assert!((bounds.center().x - anchor.center().x).abs() < 0.001);
        assert!((bounds.y - (anchor.y - size.height - 5.0)).abs() < 0.001);
    }

    #[test]
    fn test_flips_to_bottom_near_viewport_top() {
        let anchor = Rect::new(100.0, 2.0, 4.0, 16.0);
        let mut tip = shown("Target", anchor);
        tip.set_viewport(Some(Rect::new(0.0, 0.0, 800.0, 600.0)));

        assert_eq!(tip.resolved_placement(), TooltipPlacement::Bottom);
        tip.layout(Rect::default());
        assert!((tip.bounds().y - (anchor.bottom() + 5.0)).abs() < 0.001);
    }

    #[test]
    fn test_keeps_preferred_side_when_both_overflow() {
        let mut tip = shown("Target", Rect::new(10.0, 2.0, 4.0, 16.0));
        tip.set_viewport(Some(Rect::new(0.0, 0.0, 800.0, 20.0)));
        assert_eq!(tip.resolved_placement(), TooltipPlacement::Top);
    }

    #[test]
    fn test_shifts_inside_viewport_horizontally() {
        let mut tip = shown("A fairly long tooltip text", Rect::new(0.0, 200.0, 4.0, 16.0));
        tip.set_viewport(Some(Rect::new(0.0, 0.0, 800.0, 600.0)));
        tip.layout(Rect::default());
        assert_eq!(tip.bounds().x, 0.0);

        let mut tip = shown("A fairly long tooltip text", Rect::new(798.0, 200.0, 4.0, 16.0));
        tip.set_viewport(Some(Rect::new(0.0, 0.0, 800.0, 600.0)));
        tip.layout(Rect::default());
        assert!((tip.bounds().right() - 800.0).abs() < 0.001);
    }

    #[test]
    fn test_right_placement_flips_left() {
        let mut tip = Tooltip::new("Target").placement(TooltipPlacement::Right);
        tip.set_anchor(Rect::new(790.0, 100.0, 4.0, 16.0));
        tip.set_viewport(Some(Rect::new(0.0, 0.0, 800.0, 600.0)));
        tip.show();
        assert_eq!(tip.resolved_placement(), TooltipPlacement::Left);
    }

    #[test]
    fn test_max_width_wraps_lines() {
        let long = "x".repeat(200);
        let tip = Tooltip::new(long).max_width(Some(100.0));
        let size = tip.calculate_size();
        assert_eq!(size.width, 100.0);
        assert!(size.height > 14.0 * 1.4 + 8.0);
    }

    // ===== Paint & markup =====

    #[test]
    fn test_paint_background_then_text() {
        let mut tip = shown("Target", Rect::new(100.0, 100.0, 4.0, 16.0));
        tip.layout(Rect::default());

        let mut canvas = RecordingCanvas::new();
        tip.paint(&mut canvas);

        assert_eq!(canvas.command_count(), 2);
        match &canvas.commands()[0] {
            DrawCommand::Rect { style, .. } => assert_eq!(style.fill, Some(Color::BLACK)),
            other => panic!("Expected Rect, got {other:?}"),
        }
        assert_eq!(canvas.texts(), vec!["Target"]);
    }

    #[test]
    fn test_dark_palette_colors() {
        let tip = Tooltip::new("x").palette(&ColorPalette::dark());
        assert_eq!(tip.background, Color::WHITE);
        assert_eq!(tip.text_color, Color::BLACK);
    }

    #[test]
    fn test_html_has_role_and_escaped_text() {
        let mut tip = shown("<b>Target</b>", Rect::new(100.0, 100.0, 4.0, 16.0));
        tip.layout(Rect::default());
        let html = tip.to_html();
        assert!(html.starts_with(r#"<div role="tooltip""#));
        assert!(html.contains("&lt;b&gt;Target&lt;/b&gt;"));
        assert!(html.contains("position: fixed"));
        assert!(html.contains("bg-black"));
    }

    #[test]
    fn test_css_uses_palette_colors() {
        let css = Tooltip::new("x").to_css();
        assert!(css.contains("background-color: #000000"));
        assert!(css.contains("color: #ffffff"));
    }

    #[test]
    fn test_accessible_role() {
        let tip = Tooltip::new("x");
        assert_eq!(tip.accessible_role(), AccessibleRole::Tooltip);
        assert_eq!(Widget::accessible_name(&tip), Some("x"));
        assert_eq!(tip.get_content(), "x");
        assert_eq!(tip.get_placement(), TooltipPlacement::Top);
    }
}
