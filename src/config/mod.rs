//! Panel settings and serialization.

use serde::{Deserialize, Serialize};

use crate::calculator::{CalcMode, CalcValues, ZOOM_MAX_PERCENT, ZOOM_MIN_PERCENT};
use crate::error::SettingsError;

/// Everything the user entered in the panel. Stored in session files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "ProjectorSession")]
pub struct ProjectorSettings {
    /// Projector display name.
    #[serde(rename = "name", default = "default_name")]
    pub name: String,

    /// Selected brand ID.
    #[serde(rename = "brandId", default, skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<String>,

    /// Selected projector ID.
    #[serde(rename = "projectorId", default, skip_serializing_if = "Option::is_none")]
    pub projector_id: Option<String>,

    /// Selected lens ID.
    #[serde(rename = "lensId", default, skip_serializing_if = "Option::is_none")]
    pub lens_id: Option<String>,

    #[serde(rename = "image", default)]
    pub image: ImageSettings,

    #[serde(rename = "lens", default)]
    pub lens: LensAdjustments,

    #[serde(rename = "light", default)]
    pub light: LightSettings,

    #[serde(rename = "calculator", default)]
    pub calculator: CalculatorSettings,

    #[serde(rename = "display", default)]
    pub display: DisplayOptions,

    #[serde(rename = "sections", default)]
    pub sections: SectionVisibility,
}

fn default_name() -> String {
    "Projector 1".to_string()
}

impl Default for ProjectorSettings {
    fn default() -> Self {
        Self {
            name: default_name(),
            brand_id: None,
            projector_id: None,
            lens_id: None,
            image: ImageSettings::default(),
            lens: LensAdjustments::default(),
            light: LightSettings::default(),
            calculator: CalculatorSettings::default(),
            display: DisplayOptions::default(),
            sections: SectionVisibility::default(),
        }
    }
}

/// Source image and throw distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSettings {
    /// Image width (mm).
    pub width: f64,
    /// Image height (mm).
    pub height: f64,
    /// Throw distance (mm).
    pub distance: f64,
    /// Texture file path.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub texture_path: String,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            distance: 5000.0,
            texture_path: String::new(),
        }
    }
}

pub const SHIFT_LIMIT_PERCENT: f64 = 100.0;

/// Lens shift and zoom, all in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LensAdjustments {
    /// Vertical lens shift (-100..=100).
    pub shift_vertical: f64,
    /// Horizontal lens shift (-100..=100).
    pub shift_horizontal: f64,
    /// Zoom (50..=150).
    pub zoom: f64,
}

impl Default for LensAdjustments {
    fn default() -> Self {
        Self {
            shift_vertical: 0.0,
            shift_horizontal: 0.0,
            zoom: 100.0,
        }
    }
}

impl LensAdjustments {
    pub fn clamped(self) -> Self {
        Self {
            shift_vertical: clamp_finite(self.shift_vertical, -SHIFT_LIMIT_PERCENT, SHIFT_LIMIT_PERCENT, 0.0),
            shift_horizontal: clamp_finite(self.shift_horizontal, -SHIFT_LIMIT_PERCENT, SHIFT_LIMIT_PERCENT, 0.0),
            zoom: clamp_finite(self.zoom, ZOOM_MIN_PERCENT, ZOOM_MAX_PERCENT, 100.0),
        }
    }
}

/// Clamp into `min..=max`, replacing NaN/inf with `fallback`.
pub(crate) fn clamp_finite(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

/// Light parameters for the projector light in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightSettings {
    /// Intensity (0..=100 %).
    pub intensity: f64,
    /// Colour as `#rrggbb`.
    pub color: String,
    /// Colour temperature in kelvin.
    pub temperature: u32,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            intensity: 100.0,
            color: "#ffffff".to_string(),
            temperature: 6500,
        }
    }
}

impl LightSettings {
    /// Set the colour from a `#rrggbb` string (case-insensitive).
    pub fn set_color(&mut self, color: &str) -> Result<(), SettingsError> {
        parse_hex_color(color)?;
        self.color = color.trim().to_ascii_lowercase();
        Ok(())
    }

    pub fn rgb(&self) -> Option<[u8; 3]> {
        parse_hex_color(&self.color).ok()
    }
}

/// Parse `#rrggbb` into RGB bytes.
pub fn parse_hex_color(color: &str) -> Result<[u8; 3], SettingsError> {
    let invalid = || SettingsError::InvalidColor(color.to_string());
    let hex = color.trim().strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// Persisted calculator state: the active mode and the last value of every
/// field (the driven one is recomputed on load).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorSettings {
    pub mode: CalcMode,
    pub values: CalcValues,
}

/// Viewport display toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOptions {
    /// Draw the projection cone.
    pub show_cone: bool,
    /// Draw the zoom range.
    pub show_zoom_range: bool,
    /// Camera visible in the viewport.
    pub camera_visible: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_cone: true,
            show_zoom_range: false,
            camera_visible: true,
        }
    }
}

/// Which collapsible panel sections are shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionVisibility {
    pub specs: bool,
    pub advanced: bool,
    pub calculations: bool,
    pub formulas: bool,
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self {
            specs: true,
            advanced: true,
            calculations: true,
            formulas: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ProjectorSettings::default();
        assert_eq!(settings.image.width, 1920.0);
        assert_eq!(settings.image.distance, 5000.0);
        assert_eq!(settings.lens.zoom, 100.0);
        assert_eq!(settings.calculator.mode, CalcMode::ProjectedWidth);
        assert_eq!(settings.calculator.values.projected_width, 3000.0);
        assert!(!settings.sections.formulas);
        assert!(settings.display.show_cone);
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(parse_hex_color("#ffffff"), Ok([255, 255, 255]));
        assert_eq!(parse_hex_color("#FF8000"), Ok([255, 128, 0]));
        assert!(parse_hex_color("ffffff").is_err());
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gg0000").is_err());

        let mut light = LightSettings::default();
        light.set_color("#FFAA00").unwrap();
        assert_eq!(light.color, "#ffaa00");
        assert!(light.set_color("orange").is_err());
        assert_eq!(light.rgb(), Some([255, 170, 0]));
    }

    #[test]
    fn test_lens_adjustments_clamp() {
        let clamped = LensAdjustments {
            shift_vertical: 250.0,
            shift_horizontal: f64::NAN,
            zoom: 10.0,
        }
        .clamped();
        assert_eq!(clamped.shift_vertical, 100.0);
        assert_eq!(clamped.shift_horizontal, 0.0);
        assert_eq!(clamped.zoom, 50.0);
    }

    #[test]
    fn test_calculator_values_use_camel_case() {
        let json = serde_json::to_string(&ProjectorSettings::default()).unwrap();
        assert!(json.contains("\"projectedWidth\""));
        assert!(json.contains("\"throwDistance\""));
        assert!(!json.contains("projected_width"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: ProjectorSettings = serde_json::from_str(r#"{"name":"Stage left"}"#).unwrap();
        assert_eq!(settings.name, "Stage left");
        assert_eq!(settings.light, LightSettings::default());
        assert!(settings.brand_id.is_none());
    }
}
