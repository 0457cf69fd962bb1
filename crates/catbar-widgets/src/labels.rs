//! Boundary label placement for the category bar.
//!
//! Each segment ends at a boundary. A boundary label is shown only when it
//! will not crowd its neighbours: its own segment is wide enough (or enough
//! hidden width has piled up since the last shown label), and it sits far
//! enough from both bar edges. The far-left and far-right labels are fixed
//! and always shown.

use catbar_core::{format_number, sum_numeric};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Share of the total a segment needs to earn its own label.
pub const MIN_SEGMENT_SHARE: f64 = 0.1;
/// Share of accumulated hidden width that forces the next label.
pub const HIDDEN_RUN_SHARE: f64 = 0.09;
/// Minimum distance from the right edge, as a share of the total.
pub const RIGHT_EDGE_SHARE: f64 = 0.15;
/// Minimum distance from the left edge, as a share of the total.
pub const LEFT_EDGE_SHARE: f64 = 0.1;

/// A label value: a number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BarLabel {
    /// Numeric label, formatted without trailing zeros
    Number(f64),
    /// Text label, shown verbatim
    Text(String),
}

impl BarLabel {
    /// Whether an explicit label takes precedence over the computed one.
    ///
    /// Empty text, zero and NaN fall back to the computed value.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for BarLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for BarLabel {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for BarLabel {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for BarLabel {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for BarLabel {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Label at the boundary that closes one segment.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryLabel {
    /// Index of the segment this boundary closes
    pub index: usize,
    /// Width of that segment
    pub width: f64,
    /// Cumulative sum at the boundary
    pub position: f64,
    /// Text to display
    pub text: BarLabel,
    /// Whether the label is shown
    pub visible: bool,
}

/// Result of placing labels along a bar.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    /// Sum of all segment widths
    pub total: f64,
    /// Fixed far-left label
    pub start: BarLabel,
    /// Fixed far-right label
    pub end: BarLabel,
    /// One entry per segment, in order
    pub boundaries: Vec<BoundaryLabel>,
}

impl LabelLayout {
    /// Boundary labels that are shown.
    pub fn visible(&self) -> impl Iterator<Item = &BoundaryLabel> {
        self.boundaries.iter().filter(|b| b.visible)
    }

    /// Number of shown boundary labels.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    /// The two endpoint labels, left then right.
    #[must_use]
    pub const fn fixed_labels(&self) -> [&BarLabel; 2] {
        [&self.start, &self.end]
    }
}

/// Decide which boundary labels to show.
///
/// `labels`, when given, holds one entry per boundary (`values.len() + 1`):
/// entry 0 is the left edge, entry `i + 1` closes segment `i`, the last entry
/// is the right edge. Missing, null or falsy entries fall back to the
/// cumulative sum (left edge: `0`, right edge: the total).
#[must_use]
pub fn place_labels(values: &[f64], labels: Option<&[Option<BarLabel>]>) -> LabelLayout {
    let total = sum_numeric(values);
    let provided = |i: usize| {
        labels
            .and_then(|l| l.get(i))
            .and_then(Option::as_ref)
            .filter(|label| label.is_truthy())
            .cloned()
    };

    let mut prefix_sum = 0.0;
    let mut hidden_run = 0.0;
    let boundaries: Vec<BoundaryLabel> = values
        .iter()
        .enumerate()
        .map(|(index, &width)| {
            prefix_sum += width;
            let visible = (width >= MIN_SEGMENT_SHARE * total
                || hidden_run >= HIDDEN_RUN_SHARE * total)
                && total - prefix_sum >= RIGHT_EDGE_SHARE * total
                && prefix_sum >= LEFT_EDGE_SHARE * total;
            hidden_run = if visible { 0.0 } else { hidden_run + width };

            BoundaryLabel {
                index,
                width,
                position: prefix_sum,
                text: provided(index + 1).unwrap_or(BarLabel::Number(prefix_sum)),
                visible,
            }
        })
        .collect();

    let start = provided(0).unwrap_or(BarLabel::Number(0.0));
    let end = labels
        .and_then(|l| l.len().checked_sub(1))
        .and_then(provided)
        .unwrap_or(BarLabel::Number(total));

    let layout = LabelLayout {
        total,
        start,
        end,
        boundaries,
    };
    tracing::trace!(
        total,
        segments = values.len(),
        visible = layout.visible_count(),
        "placed category bar labels"
    );
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn visible_texts(layout: &LabelLayout) -> Vec<String> {
        layout.visible().map(|b| b.text.to_string()).collect()
    }

    // =========================================================================
    // Visibility rule
    // =========================================================================

    #[test]
    fn test_two_halves() {
        let layout = place_labels(&[50.0, 50.0], None);
        assert_eq!(visible_texts(&layout), vec!["50"]);
        assert!(!layout.boundaries[1].visible);
        assert_eq!(layout.start.to_string(), "0");
        assert_eq!(layout.end.to_string(), "100");
    }

    #[test]
    fn test_hidden_run_accumulates_and_resets() {
        let layout = place_labels(&[5.0, 5.0, 5.0, 5.0, 80.0], None);
        let flags: Vec<bool> = layout.boundaries.iter().map(|b| b.visible).collect();
        // 5 and 10 accumulate; at 15 the run (10) passes 9% and the label shows;
        // the run restarts at 0, so 20 stays hidden; 100 is the right edge.
        assert_eq!(flags, vec![false, false, true, false, false]);
        assert_eq!(visible_texts(&layout), vec!["15"]);
    }

    #[test]
    fn test_narrow_first_segment_stays_hidden() {
        // Width 9 of 100: neither wide enough nor far enough from the left.
        let layout = place_labels(&[9.0, 91.0], None);
        assert_eq!(layout.visible_count(), 0);
    }

    #[test]
    fn test_right_edge_margin() {
        // 20 remaining after the second boundary clears the 15% margin.
        let layout = place_labels(&[40.0, 40.0, 20.0], None);
        assert_eq!(visible_texts(&layout), vec!["40", "80"]);
    }

    #[test]
    fn test_thresholds_scale_with_total() {
        // Same proportions as [50, 50] but a total of 10.
        let layout = place_labels(&[5.0, 5.0], None);
        assert_eq!(visible_texts(&layout), vec!["5"]);
        assert_eq!(layout.end, BarLabel::Number(10.0));
    }

    #[test]
    fn test_four_category_bar() {
        let layout = place_labels(&[10.0, 25.0, 45.0, 20.0], None);
        assert_eq!(visible_texts(&layout), vec!["10", "35", "80"]);
    }

    // =========================================================================
    // Degenerate inputs
    // =========================================================================

    #[test]
    fn test_empty_values() {
        let layout = place_labels(&[], None);
        assert!(layout.boundaries.is_empty());
        assert_eq!(layout.start, BarLabel::Number(0.0));
        assert_eq!(layout.end, BarLabel::Number(0.0));
    }

    #[test]
    fn test_empty_values_with_labels() {
        let labels = [Some(BarLabel::from("low")), Some(BarLabel::from("high"))];
        let layout = place_labels(&[], Some(&labels));
        assert_eq!(layout.start.to_string(), "low");
        assert_eq!(layout.end.to_string(), "high");
    }

    #[test]
    fn test_zero_total_shows_every_boundary() {
        let layout = place_labels(&[0.0, 0.0], None);
        assert_eq!(layout.total, 0.0);
        assert!(layout.boundaries.iter().all(|b| b.visible));
        assert!(layout.boundaries.iter().all(|b| !b.position.is_nan()));
        assert_eq!(visible_texts(&layout), vec!["0", "0"]);
    }

    #[test]
    fn test_negative_widths_are_computed_not_rejected() {
        let layout = place_labels(&[-10.0, 60.0], None);
        assert_eq!(layout.total, 50.0);
        assert_eq!(layout.boundaries[0].position, -10.0);
        assert_eq!(layout.boundaries.len(), 2);
    }

    // =========================================================================
    // Explicit labels
    // =========================================================================

    #[test]
    fn test_explicit_labels_replace_boundary_values() {
        let labels = [
            Some(BarLabel::from("start")),
            Some(BarLabel::from("mid")),
            Some(BarLabel::from("end")),
        ];
        let layout = place_labels(&[50.0, 50.0], Some(&labels));
        assert_eq!(layout.start.to_string(), "start");
        assert_eq!(visible_texts(&layout), vec!["mid"]);
        assert_eq!(layout.boundaries[1].text.to_string(), "end");
        assert_eq!(layout.end.to_string(), "end");
    }

    #[test]
    fn test_null_and_falsy_labels_fall_back() {
        let labels = [
            Some(BarLabel::Number(0.0)),
            None,
            Some(BarLabel::from("")),
            Some(BarLabel::Number(f64::NAN)),
        ];
        let layout = place_labels(&[40.0, 40.0, 20.0], Some(&labels));
        assert_eq!(layout.start, BarLabel::Number(0.0));
        assert_eq!(layout.boundaries[0].text, BarLabel::Number(40.0));
        assert_eq!(layout.boundaries[1].text, BarLabel::Number(80.0));
        // Last entry (NaN) is falsy, so the right edge shows the total.
        assert_eq!(layout.end, BarLabel::Number(100.0));
    }

    #[test]
    fn test_short_label_sequence_is_tolerated() {
        let labels = [Some(BarLabel::from("a")), Some(BarLabel::from("b"))];
        let layout = place_labels(&[30.0, 30.0, 40.0], Some(&labels));
        assert_eq!(layout.boundaries[0].text.to_string(), "b");
        assert_eq!(layout.boundaries[1].text, BarLabel::Number(60.0));
        // Right edge takes the last provided entry, wherever it sits.
        assert_eq!(layout.end.to_string(), "b");
    }

    #[test]
    fn test_empty_label_sequence() {
        let layout = place_labels(&[50.0, 50.0], Some(&[]));
        assert_eq!(layout.start, BarLabel::Number(0.0));
        assert_eq!(layout.end, BarLabel::Number(100.0));
    }

    #[test]
    fn test_numeric_labels_format() {
        assert_eq!(BarLabel::Number(12.5).to_string(), "12.5");
        assert_eq!(BarLabel::from(7).to_string(), "7");
        assert_eq!(BarLabel::from(String::from("x")).to_string(), "x");
    }

    #[test]
    fn test_bar_label_serde_untagged() {
        let labels: Vec<Option<BarLabel>> =
            serde_json::from_str(r#"[0, null, "mid", 12.5]"#).unwrap();
        assert_eq!(
            labels,
            vec![
                Some(BarLabel::Number(0.0)),
                None,
                Some(BarLabel::from("mid")),
                Some(BarLabel::Number(12.5)),
            ]
        );
    }

    // =========================================================================
    // Properties
    // =========================================================================

    proptest! {
        #[test]
        fn prop_one_boundary_per_segment_and_two_fixed(
            values in prop::collection::vec(0.0f64..100.0, 0..20)
        ) {
            let layout = place_labels(&values, None);
            prop_assert_eq!(layout.boundaries.len(), values.len());
            prop_assert_eq!(layout.fixed_labels().len(), 2);
        }

        #[test]
        fn prop_idempotent(values in prop::collection::vec(0.0f64..100.0, 0..20)) {
            prop_assert_eq!(place_labels(&values, None), place_labels(&values, None));
        }

        #[test]
        fn prop_last_boundary_never_visible_with_positive_total(
            values in prop::collection::vec(0.1f64..100.0, 1..20)
        ) {
            let layout = place_labels(&values, None);
            prop_assert!(!layout.boundaries[values.len() - 1].visible);
        }

        #[test]
        fn prop_no_nan_for_finite_input(values in prop::collection::vec(0.0f64..1000.0, 0..20)) {
            let layout = place_labels(&values, None);
            prop_assert!(layout.boundaries.iter().all(|b| !b.position.is_nan()));
        }
    }
}
