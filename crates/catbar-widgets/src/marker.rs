//! Which segment a marker sits on.

use catbar_core::{ColorToken, DEFAULT_COLOR};

/// Color of segment `index`, falling back to [`DEFAULT_COLOR`] when the
/// color sequence is shorter than the segment sequence.
#[must_use]
pub fn color_at(colors: &[ColorToken], index: usize) -> ColorToken {
    colors.get(index).copied().unwrap_or(DEFAULT_COLOR)
}

/// Index of the segment the marker falls within.
///
/// A marker exactly on a boundary belongs to the segment ending there.
/// Returns `None` for an absent marker or one beyond the total.
#[must_use]
pub fn marker_segment_index(marker_value: Option<f64>, values: &[f64]) -> Option<usize> {
    let marker = marker_value?;
    let mut prefix_sum = 0.0;
    values.iter().position(|value| {
        prefix_sum += value;
        prefix_sum >= marker
    })
}

/// Color of the segment under the marker.
#[must_use]
pub fn resolve_marker_color(
    marker_value: Option<f64>,
    values: &[f64],
    colors: &[ColorToken],
) -> Option<ColorToken> {
    marker_segment_index(marker_value, values).map(|index| color_at(colors, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use catbar_core::ColorToken::{Blue, Emerald, Rose};
    use proptest::prelude::*;

    const VALUES: [f64; 3] = [30.0, 20.0, 50.0];
    const COLORS: [ColorToken; 3] = [Blue, Emerald, Rose];

    #[test]
    fn test_absent_marker_has_no_color() {
        assert_eq!(resolve_marker_color(None, &VALUES, &COLORS), None);
    }

    #[test]
    fn test_boundary_belongs_to_ending_segment() {
        assert_eq!(resolve_marker_color(Some(30.0), &VALUES, &COLORS), Some(Blue));
        assert_eq!(resolve_marker_color(Some(50.0), &VALUES, &COLORS), Some(Emerald));
    }

    #[test]
    fn test_just_past_boundary_moves_to_next_segment() {
        assert_eq!(
            resolve_marker_color(Some(30.0001), &VALUES, &COLORS),
            Some(Emerald)
        );
    }

    #[test]
    fn test_marker_at_total_is_last_segment() {
        assert_eq!(resolve_marker_color(Some(100.0), &VALUES, &COLORS), Some(Rose));
    }

    #[test]
    fn test_marker_beyond_total_has_no_color() {
        assert_eq!(resolve_marker_color(Some(150.0), &VALUES, &COLORS), None);
        assert_eq!(marker_segment_index(Some(150.0), &VALUES), None);
    }

    #[test]
    fn test_marker_at_or_below_zero_is_first_segment() {
        assert_eq!(resolve_marker_color(Some(0.0), &VALUES, &COLORS), Some(Blue));
        assert_eq!(resolve_marker_color(Some(-5.0), &VALUES, &COLORS), Some(Blue));
    }

    #[test]
    fn test_nan_marker_has_no_color() {
        assert_eq!(resolve_marker_color(Some(f64::NAN), &VALUES, &COLORS), None);
    }

    #[test]
    fn test_empty_segments_have_no_color() {
        assert_eq!(resolve_marker_color(Some(0.0), &[], &COLORS), None);
    }

    #[test]
    fn test_short_color_sequence_uses_default() {
        assert_eq!(
            resolve_marker_color(Some(90.0), &VALUES, &[Blue]),
            Some(DEFAULT_COLOR)
        );
        assert_eq!(color_at(&[], 0), DEFAULT_COLOR);
    }

    proptest! {
        #[test]
        fn prop_idempotent(
            marker in prop::option::of(-10.0f64..200.0),
            values in prop::collection::vec(0.0f64..100.0, 0..10)
        ) {
            let colors = &ColorToken::ALL[..];
            prop_assert_eq!(
                resolve_marker_color(marker, &values, colors),
                resolve_marker_color(marker, &values, colors)
            );
        }

        #[test]
        fn prop_selected_segment_contains_marker(
            marker in 0.0f64..100.0,
            values in prop::collection::vec(0.0f64..100.0, 1..10)
        ) {
            if let Some(i) = marker_segment_index(Some(marker), &values) {
                let end: f64 = values[..=i].iter().sum();
                let start: f64 = values[..i].iter().sum();
                prop_assert!(end >= marker);
                prop_assert!(i == 0 || start < marker);
            }
        }
    }
}
