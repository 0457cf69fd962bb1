//! Category bar widget.
//!
//! A horizontal bar split into colored segments whose widths are percentages
//! of the widget width, with cumulative labels above the boundaries and an
//! optional marker that takes the color of the segment it sits on.

use crate::labels::{place_labels, BarLabel, LabelLayout};
use crate::marker::{color_at, resolve_marker_color};
use crate::tooltip::Tooltip;
use catbar_core::{
    color_class_names, escape_html, format_number, make_class_name, markup::attributes,
    merge_classes, AccessibleRole, Brick, BrickAssertion, BrickBudget, BrickVerification, Canvas,
    ColorPalette, ColorRole, ColorToken, Constraints, Event, Key, LayoutResult, Point, Rect,
    RecordingCanvas, Size, TextStyle, TypeId, Widget, DEFAULT_COLOR_RANGE,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt::Write;
use std::time::{Duration, Instant};

const COMPONENT: &str = "CategoryBar";

/// Height of the segment track.
pub const BAR_HEIGHT: f32 = 8.0;
/// Height of the label row.
pub const LABEL_ROW_HEIGHT: f32 = 20.0;
/// Gap between the label row and the track.
pub const LABEL_GAP: f32 = 8.0;
/// Marker width.
pub const MARKER_WIDTH: f32 = 4.0;
/// Marker height.
pub const MARKER_HEIGHT: f32 = 16.0;
/// Width of the pointer target around the marker.
pub const MARKER_TARGET_WIDTH: f32 = 20.0;
/// Width of the ring drawn around the marker.
pub const MARKER_RING_WIDTH: f32 = 2.0;
/// Marker slide duration when animated.
pub const MARKER_TRANSITION_MS: u32 = 1000;

const LABEL_TEXT_SIZE: f32 = 14.0;

/// One 60fps frame.
const FRAME_BUDGET_MS: u32 = 16;

const ASSERTIONS: &[BrickAssertion] = &[
    BrickAssertion::ContrastRatio(4.5),
    BrickAssertion::MaxLatencyMs(FRAME_BUDGET_MS),
];

/// Segmented bar with boundary labels and an optional marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryBar {
    /// Segment widths, as percentages of the widget width
    values: Vec<f64>,
    /// Segment colors, positionally matched to `values`
    colors: Vec<ColorToken>,
    /// Marker position on the same scale as `values`
    marker_value: Option<f64>,
    /// Reserved; stored but not rendered
    marker_text: Option<BarLabel>,
    /// Whether the label row is shown
    show_labels: bool,
    /// Explicit boundary labels
    labels: Option<Vec<Option<BarLabel>>>,
    /// Tooltip text shown while the marker is hovered or focused
    tooltip: Option<String>,
    /// Animate marker movement
    show_animation: bool,
    /// Extra classes merged into the root
    class_name: Option<String>,
    /// Pass-through root attributes
    attributes: Vec<(String, String)>,
    /// Chrome colors
    palette: ColorPalette,
    /// Preferred width when unconstrained
    min_width: f32,
    /// Accessible name
    accessible_name_value: Option<String>,
    /// Test ID
    test_id_value: Option<String>,
    #[serde(skip)]
    viewport: Option<Rect>,
    #[serde(skip)]
    popup: Tooltip,
    #[serde(skip)]
    bounds: Rect,
}

impl Default for CategoryBar {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            colors: DEFAULT_COLOR_RANGE.to_vec(),
            marker_value: None,
            marker_text: None,
            show_labels: true,
            labels: None,
            tooltip: None,
            show_animation: false,
            class_name: None,
            attributes: Vec::new(),
            palette: ColorPalette::default(),
            min_width: 200.0,
            accessible_name_value: None,
            test_id_value: None,
            viewport: None,
            popup: Tooltip::default(),
            bounds: Rect::default(),
        }
    }
}

impl CategoryBar {
    /// Create a category bar with the given segment widths.
    #[must_use]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            ..Self::default()
        }
    }

    /// Set the segment widths.
    #[must_use]
    pub fn values(mut self, values: impl Into<Vec<f64>>) -> Self {
        self.values = values.into();
        self
    }

    /// Set the segment colors.
    #[must_use]
    pub fn colors(mut self, colors: impl Into<Vec<ColorToken>>) -> Self {
        self.colors = colors.into();
        self
    }

    /// Set the marker position.
    #[must_use]
    pub fn marker_value(mut self, value: f64) -> Self {
        self.marker_value = Some(value);
        self
    }

    /// Set the marker text.
    #[must_use]
    pub fn marker_text(mut self, text: impl Into<BarLabel>) -> Self {
        self.marker_text = Some(text.into());
        self
    }

    /// Show or hide the label row.
    #[must_use]
    pub const fn show_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    /// Set explicit boundary labels (`values.len() + 1` entries).
    #[must_use]
    pub fn labels<L: Into<BarLabel>>(mut self, labels: impl IntoIterator<Item = Option<L>>) -> Self {
        self.labels = Some(labels.into_iter().map(|l| l.map(Into::into)).collect());
        self
    }

    /// Set the tooltip text.
    #[must_use]
    pub fn tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
        self
    }

    /// Animate marker movement.
    #[must_use]
    pub const fn show_animation(mut self, animate: bool) -> Self {
        self.show_animation = animate;
        self
    }

    /// Merge extra classes into the root.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Add a pass-through root attribute.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Set the chrome palette.
    #[must_use]
    pub fn palette(mut self, palette: ColorPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the preferred width.
    #[must_use]
    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = width.max(0.0);
        self
    }

    /// Set the accessible name.
    #[must_use]
    pub fn accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Get the segment widths.
    #[must_use]
    pub fn get_values(&self) -> &[f64] {
        &self.values
    }

    /// Get the configured colors.
    #[must_use]
    pub fn get_colors(&self) -> &[ColorToken] {
        &self.colors
    }

    /// Get the marker position.
    #[must_use]
    pub const fn get_marker_value(&self) -> Option<f64> {
        self.marker_value
    }

    /// Get the marker text.
    #[must_use]
    pub const fn get_marker_text(&self) -> Option<&BarLabel> {
        self.marker_text.as_ref()
    }

    /// Check if the label row is shown.
    #[must_use]
    pub const fn is_labels_shown(&self) -> bool {
        self.show_labels
    }

    /// Get the explicit labels.
    #[must_use]
    pub fn get_labels(&self) -> Option<&[Option<BarLabel>]> {
        self.labels.as_deref()
    }

    /// Get the tooltip text.
    #[must_use]
    pub fn get_tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Check if marker movement is animated.
    #[must_use]
    pub const fn is_animated(&self) -> bool {
        self.show_animation
    }

    /// Get the extra root classes.
    #[must_use]
    pub fn get_class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Get the chrome palette.
    #[must_use]
    pub const fn get_palette(&self) -> &ColorPalette {
        &self.palette
    }

    /// Color of every segment, with missing colors filled by the default.
    #[must_use]
    pub fn segment_colors(&self) -> Vec<ColorToken> {
        (0..self.values.len())
            .map(|i| color_at(&self.colors, i))
            .collect()
    }

    /// Label placement for the current values and labels.
    #[must_use]
    pub fn label_layout(&self) -> LabelLayout {
        place_labels(&self.values, self.labels.as_deref())
    }

    /// Color of the segment under the marker.
    #[must_use]
    pub fn marker_color(&self) -> Option<ColorToken> {
        resolve_marker_color(self.marker_value, &self.values, &self.colors)
    }

    /// Marker slide duration, when animated.
    #[must_use]
    pub const fn marker_transition_ms(&self) -> Option<u32> {
        if self.show_animation {
            Some(MARKER_TRANSITION_MS)
        } else {
            None
        }
    }

    /// Check if the tooltip is currently open.
    #[must_use]
    pub const fn is_tooltip_open(&self) -> bool {
        self.popup.is_visible()
    }

    fn label_style(&self) -> TextStyle {
        TextStyle {
            size: LABEL_TEXT_SIZE,
            color: self.palette.content,
            ..TextStyle::default()
        }
    }

    fn label_row(&self) -> Option<Rect> {
        self.show_labels.then(|| {
            Rect::new(
                self.bounds.x,
                self.bounds.y,
                self.bounds.width,
                LABEL_ROW_HEIGHT,
            )
        })
    }

    /// Bounds of the segment track.
    #[must_use]
    pub fn track_bounds(&self) -> Rect {
        let offset = if self.show_labels {
            LABEL_ROW_HEIGHT + LABEL_GAP
        } else {
            0.0
        };
        Rect::new(
            self.bounds.x,
            self.bounds.y + offset,
            self.bounds.width,
            BAR_HEIGHT,
        )
    }

    /// Length of `share` percent of the widget width.
    fn span_of(&self, share: f64) -> f32 {
        (f64::from(self.bounds.width) * share / 100.0) as f32
    }

    /// Horizontal position of `share` percent along the widget.
    fn x_at(&self, share: f64) -> f32 {
        self.bounds.x + self.span_of(share)
    }

    /// Bounds of each drawn segment; segments without a positive width are skipped.
    #[must_use]
    pub fn segment_bounds(&self) -> Vec<(usize, Rect)> {
        let track = self.track_bounds();
        let mut prefix_sum = 0.0;
        let mut segments = Vec::with_capacity(self.values.len());
        for (i, &value) in self.values.iter().enumerate() {
            let start = prefix_sum;
            prefix_sum += value;
            if !(value.is_finite() && value > 0.0) {
                continue;
            }
            segments.push((
                i,
                Rect::new(self.x_at(start), track.y, self.span_of(value), track.height),
            ));
        }
        segments
    }

    /// Bounds of the painted marker, if there is one.
    #[must_use]
    pub fn marker_bounds(&self) -> Option<Rect> {
        let marker = self.marker_value.filter(|m| m.is_finite())?;
        let track = self.track_bounds();
        let center_x = self.x_at(marker);
        Some(Rect::new(
            center_x - MARKER_WIDTH / 2.0,
            track.y + (track.height - MARKER_HEIGHT) / 2.0,
            MARKER_WIDTH,
            MARKER_HEIGHT,
        ))
    }

    /// Area that counts as hovering the marker.
    fn marker_target(&self) -> Option<Rect> {
        self.marker_bounds().map(|marker| {
            Rect::new(
                marker.center().x - MARKER_TARGET_WIDTH / 2.0,
                marker.y,
                MARKER_TARGET_WIDTH,
                marker.height,
            )
        })
    }

    fn open_tooltip(&mut self) {
        if self.popup.is_visible() {
            return;
        }
        let Some(text) = self.tooltip.as_deref().filter(|t| !t.is_empty()) else {
            return;
        };
        let Some(anchor) = self.marker_bounds() else {
            return;
        };
        let mut popup = Tooltip::new(text).palette(&self.palette);
        popup.set_anchor(anchor);
        popup.set_viewport(self.viewport);
        popup.show();
        popup.layout(self.bounds);
        self.popup = popup;
    }

    fn close_tooltip(&mut self) {
        self.popup.hide();
    }

    fn relayout_tooltip(&mut self) {
        if !self.popup.is_visible() {
            return;
        }
        match self.marker_bounds() {
            Some(anchor) => {
                self.popup.set_anchor(anchor);
                self.popup.set_viewport(self.viewport);
                self.popup.layout(self.bounds);
            }
            None => self.popup.hide(),
        }
    }

    fn paint_labels(&self, canvas: &mut dyn Canvas, row: Rect, layout: &LabelLayout) {
        let style = self.label_style();
        let baseline = row.y + LABEL_TEXT_SIZE;

        for boundary in layout.visible() {
            let text = boundary.text.to_string();
            let x = self.x_at(boundary.position) - style.estimate_width(&text) / 2.0;
            canvas.draw_text(&text, Point::new(x, baseline), &style);
        }

        let start = layout.start.to_string();
        canvas.draw_text(&start, Point::new(row.x, baseline), &style);

        let end = layout.end.to_string();
        let x = row.right() - style.estimate_width(&end);
        canvas.draw_text(&end, Point::new(x, baseline), &style);
    }

    /// Wall time of one paint into a recording canvas plus one markup pass.
    fn render_time(&self) -> Duration {
        let start = Instant::now();
        let mut canvas = RecordingCanvas::new();
        self.paint(&mut canvas);
        let _ = self.to_html();
        start.elapsed()
    }

    fn labels_html(&self, layout: &LabelLayout) -> String {
        let mut html = String::new();
        let row_class = merge_classes(&[
            &make_class_name(COMPONENT, "labels"),
            "relative flex w-full text-tremor-default h-5 mb-2",
            "text-tremor-content",
            "dark:text-dark-tremor-content",
        ]);
        let _ = write!(html, r#"<div class="{row_class}">"#);
        for boundary in &layout.boundaries {
            let display = if boundary.visible { "block" } else { "hidden" };
            let _ = write!(
                html,
                r#"<div class="flex items-center justify-end" style="width: {}%"><span class="{}">{}</span></div>"#,
                format_number(boundary.width),
                merge_classes(&[display, "left-1/2 translate-x-1/2"]),
                escape_html(&boundary.text.to_string())
            );
        }
        let _ = write!(
            html,
            r#"<div class="absolute bottom-0 flex items-center left-0">{}</div>"#,
            escape_html(&layout.start.to_string())
        );
        let _ = write!(
            html,
            r#"<div class="absolute bottom-0 flex items-center right-0">{}</div>"#,
            escape_html(&layout.end.to_string())
        );
        html.push_str("</div>");
        html
    }

    fn bar_html(&self) -> String {
        let mut html = String::new();
        let wrapper_class = merge_classes(&[
            &make_class_name(COMPONENT, "barWrapper"),
            "relative w-full flex items-center h-2",
        ]);
        let _ = write!(
            html,
            r#"<div class="{wrapper_class}"><div class="flex-1 flex items-center h-full overflow-hidden rounded-tremor-full">"#
        );

        let segment_hook = make_class_name(COMPONENT, "categoryBar");
        for (value, token) in self.values.iter().zip(self.segment_colors()) {
            let bg = color_class_names(token, ColorRole::Background).bg_color;
            let _ = write!(
                html,
                r#"<div class="{}" style="width: {}%"></div>"#,
                merge_classes(&[&segment_hook, "h-full", &bg]),
                format_number(*value)
            );
        }
        html.push_str("</div>");

        if let Some(marker) = self.marker_value {
            let mut style = format!("left: {}%", format_number(marker));
            if self.show_animation {
                style.push_str("; transition: all 1s");
            }
            let marker_bg = self
                .marker_color()
                .map(|token| color_class_names(token, ColorRole::Background).bg_color)
                .unwrap_or_default();
            let _ = write!(
                html,
                r#"<div class="{}" style="{style}"><div class="{}"></div></div>"#,
                merge_classes(&[
                    &make_class_name(COMPONENT, "markerWrapper"),
                    "absolute right-1/2 -translate-x-1/2 w-5",
                ]),
                merge_classes(&[
                    &make_class_name(COMPONENT, "marker"),
                    "ring-2 mx-auto rounded-tremor-full h-4 w-1",
                    "ring-tremor-brand-inverted",
                    "dark:ring-dark-tremor-brand-inverted",
                    &marker_bg,
                ])
            );
        }

        html.push_str("</div>");
        html
    }
}

impl Widget for CategoryBar {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let width = if constraints.has_bounded_width() {
            constraints.max_width
        } else {
            self.min_width
        };
        let height = if self.show_labels {
            LABEL_ROW_HEIGHT + LABEL_GAP + BAR_HEIGHT
        } else {
            BAR_HEIGHT
        };
        constraints.constrain(Size::new(width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        self.relayout_tooltip();
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let _span = tracing::debug_span!(
            "widget_paint",
            widget = "CategoryBar",
            segments = self.values.len(),
            x = self.bounds.x,
            y = self.bounds.y,
            w = self.bounds.width,
            h = self.bounds.height
        )
        .entered();

        if let Some(row) = self.label_row() {
            self.paint_labels(canvas, row, &self.label_layout());
        }

        let segments = self.segment_bounds();
        if !segments.is_empty() {
            canvas.push_clip(self.track_bounds());
            for (i, rect) in segments {
                canvas.fill_rect(rect, color_at(&self.colors, i).base_color());
            }
            canvas.pop_clip();
        }

        if let Some(marker) = self.marker_bounds() {
            if let Some(token) = self.marker_color() {
                canvas.fill_rect(marker, token.base_color());
            }
            canvas.stroke_rect(marker, self.palette.brand_inverted, MARKER_RING_WIDTH);
        }

        self.popup.paint(canvas);
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::MouseMove { position } => {
                let over_marker = self
                    .marker_target()
                    .is_some_and(|target| target.contains_point(position));
                if over_marker {
                    self.open_tooltip();
                } else {
                    self.close_tooltip();
                }
            }
            Event::FocusIn => self.open_tooltip(),
            Event::MouseLeave | Event::FocusOut | Event::KeyDown { key: Key::Escape } => {
                self.close_tooltip();
            }
            Event::Resize { width, height } => {
                self.viewport = Some(Rect::new(0.0, 0.0, *width, *height));
                self.relayout_tooltip();
            }
        }
        None
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn is_interactive(&self) -> bool {
        self.marker_value.is_some() && self.tooltip.as_deref().is_some_and(|t| !t.is_empty())
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Group
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Reason a render exceeded its latency limit, if it did.
fn latency_failure(elapsed: Duration, limit: Duration) -> Option<String> {
    (elapsed > limit).then(|| format!("render took {elapsed:?}, limit is {limit:?}"))
}

impl Brick for CategoryBar {
    fn brick_name(&self) -> &'static str {
        COMPONENT
    }

    fn assertions(&self) -> &[BrickAssertion] {
        ASSERTIONS
    }

    fn budget(&self) -> BrickBudget {
        BrickBudget::uniform(FRAME_BUDGET_MS)
    }

    fn verify(&self) -> BrickVerification {
        let start = Instant::now();
        let mut passed = Vec::new();
        let mut failed = Vec::new();

        for assertion in self.assertions() {
            match assertion {
                BrickAssertion::ContrastRatio(min) if self.show_labels => {
                    let ratio = self.palette.content.contrast_ratio(&self.palette.surface);
                    if ratio >= *min {
                        passed.push(assertion.clone());
                    } else {
                        failed.push((
                            assertion.clone(),
                            format!("label contrast {ratio:.2}:1 is below {min}:1"),
                        ));
                    }
                }
                BrickAssertion::MaxLatencyMs(ms) => {
                    // The tighter of the assertion and the frame budget applies.
                    let limit = Duration::from_millis(u64::from(*ms))
                        .min(self.budget().as_duration());
                    match latency_failure(self.render_time(), limit) {
                        None => passed.push(assertion.clone()),
                        Some(reason) => failed.push((assertion.clone(), reason)),
                    }
                }
                _ => passed.push(assertion.clone()),
            }
        }

        BrickVerification {
            passed,
            failed,
            verification_time: start.elapsed(),
        }
    }

    fn to_html(&self) -> String {
        let mut html = self.popup.to_html();

        let root_class = merge_classes(&[
            &make_class_name(COMPONENT, "root"),
            self.class_name.as_deref().unwrap_or_default(),
        ]);
        let mut attrs = vec![
            ("class", root_class.as_str()),
            ("role", self.accessible_role().aria().unwrap_or_default()),
            (
                "aria-label",
                self.accessible_name_value.as_deref().unwrap_or_default(),
            ),
            (
                "data-testid",
                self.test_id_value.as_deref().unwrap_or_default(),
            ),
        ];
        attrs.extend(
            self.attributes
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        );

        let _ = write!(html, "<div{}>", attributes(attrs));
        if self.show_labels {
            html.push_str(&self.labels_html(&self.label_layout()));
        }
        html.push_str(&self.bar_html());
        html.push_str("</div>");
        html
    }

    fn to_css(&self) -> String {
        let mut css = format!(
            ".{labels} {{ color: {content}; font-size: {size}px; height: {row}px; margin-bottom: {gap}px; }}\n\
             .{bar} {{ height: {bar_height}px; }}\n\
             .{marker} {{ width: {mw}px; height: {mh}px; box-shadow: 0 0 0 {ring}px {ring_color}; }}\n",
            labels = make_class_name(COMPONENT, "labels"),
            content = self.palette.content.to_hex(),
            size = LABEL_TEXT_SIZE,
            row = LABEL_ROW_HEIGHT,
            gap = LABEL_GAP,
            bar = make_class_name(COMPONENT, "barWrapper"),
            bar_height = BAR_HEIGHT,
            marker = make_class_name(COMPONENT, "marker"),
            mw = MARKER_WIDTH,
            mh = MARKER_HEIGHT,
            ring = MARKER_RING_WIDTH,
            ring_color = self.palette.brand_inverted.to_hex(),
        );
        if self.show_animation {
            let _ = writeln!(
                css,
                ".{} {{ transition: all {MARKER_TRANSITION_MS}ms; }}",
                make_class_name(COMPONENT, "markerWrapper")
            );
        }

        let mut seen = Vec::new();
        for token in self.segment_colors().into_iter().chain(self.marker_color()) {
            if seen.contains(&token) {
                continue;
            }
            seen.push(token);
            let _ = writeln!(
                css,
                ".{} {{ background-color: {}; }}",
                color_class_names(token, ColorRole::Background).bg_color,
                token.base_color().to_hex()
            );
        }
        css
    }
}
