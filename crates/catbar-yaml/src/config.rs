//! Category bar configuration.

use crate::error::ParseError;
use catbar_core::{ColorPalette, ColorToken, DEFAULT_COLOR_RANGE};
use catbar_widgets::{BarLabel, CategoryBar};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Palette preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light surface
    #[default]
    Light,
    /// Dark surface
    Dark,
}

impl Theme {
    /// Concrete palette for this preset.
    #[must_use]
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Light => ColorPalette::light(),
            Self::Dark => ColorPalette::dark(),
        }
    }
}

fn default_colors() -> Vec<ColorToken> {
    DEFAULT_COLOR_RANGE.to_vec()
}

const fn default_true() -> bool {
    true
}

/// Declarative description of a category bar.
///
/// ```
/// use catbar_yaml::CategoryBarConfig;
///
/// let config = CategoryBarConfig::from_yaml(
///     "values: [40, 30, 30]\ncolors: [emerald, yellow, rose]\nmarker_value: 55\n",
/// )
/// .unwrap();
/// let bar = config.into_widget();
/// assert_eq!(bar.get_values(), &[40.0, 30.0, 30.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryBarConfig {
    /// Segment widths
    #[serde(default)]
    pub values: Vec<f64>,
    /// Segment colors
    #[serde(default = "default_colors")]
    pub colors: Vec<ColorToken>,
    /// Marker position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_value: Option<f64>,
    /// Marker text (stored, not rendered)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_text: Option<BarLabel>,
    /// Show the label row
    #[serde(default = "default_true")]
    pub show_labels: bool,
    /// Explicit boundary labels; `null` entries use the computed value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Option<BarLabel>>>,
    /// Tooltip text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    /// Animate marker movement
    #[serde(default)]
    pub show_animation: bool,
    /// Extra root classes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Pass-through root attributes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Palette preset
    #[serde(default)]
    pub theme: Theme,
    /// Accessible name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessible_name: Option<String>,
    /// Test ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,
}

impl Default for CategoryBarConfig {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            colors: default_colors(),
            marker_value: None,
            marker_text: None,
            show_labels: true,
            labels: None,
            tooltip: None,
            show_animation: false,
            class_name: None,
            attributes: BTreeMap::new(),
            theme: Theme::Light,
            accessible_name: None,
            test_id: None,
        }
    }
}

impl CategoryBarConfig {
    /// Parse a configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or a value is unusable.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or a value is unusable.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ParseError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Reject non-finite numbers.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ParseError> {
        if let Some(i) = self.values.iter().position(|v| !v.is_finite()) {
            return Err(ParseError::InvalidValue {
                field: format!("values[{i}]"),
                message: "must be a finite number".to_string(),
            });
        }
        if self.marker_value.is_some_and(|m| !m.is_finite()) {
            return Err(ParseError::InvalidValue {
                field: "marker_value".to_string(),
                message: "must be a finite number".to_string(),
            });
        }
        Ok(())
    }

    /// Build the widget.
    #[must_use]
    pub fn into_widget(self) -> CategoryBar {
        let mut bar = CategoryBar::new(self.values)
            .colors(self.colors)
            .show_labels(self.show_labels)
            .show_animation(self.show_animation)
            .palette(self.theme.palette());

        if let Some(marker) = self.marker_value {
            bar = bar.marker_value(marker);
        }
        if let Some(text) = self.marker_text {
            bar = bar.marker_text(text);
        }
        if let Some(labels) = self.labels {
            bar = bar.labels(labels);
        }
        if let Some(tooltip) = self.tooltip {
            bar = bar.tooltip(tooltip);
        }
        if let Some(class_name) = self.class_name {
            bar = bar.class_name(class_name);
        }
        for (name, value) in self.attributes {
            bar = bar.attribute(name, value);
        }
        if let Some(name) = self.accessible_name {
            bar = bar.accessible_name(name);
        }
        if let Some(id) = self.test_id {
            bar = bar.with_test_id(id);
        }
        bar
    }
}
