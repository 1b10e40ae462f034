//! Projector panel state.
//!
//! Owns the selection, every user input and the calculator, and recomputes
//! the derived values after each change. The UI layer only reads from here
//! and forwards edits.

use crate::calculator::{
    aspect_ratio, compute_projected_size, CalcField, CalcMode, CalcValues, CalculationResult,
    Calculator, LensContext, ProjectedSize, ZoomRange,
};
use crate::catalog::Catalog;
use crate::config::{
    clamp_finite, DisplayOptions, LensAdjustments, ProjectorSettings, SectionVisibility,
    SHIFT_LIMIT_PERCENT,
};
use crate::error::{CalculatorError, SelectionError, SettingsError};
use crate::selection::{Selection, SelectionChange};

/// Formulas shown in the formulas section.
pub const FORMULAS: &[(&str, &str)] = &[
    ("Throw distance", "D = W × TR × (Z / 100)"),
    ("Projected width", "W = D / (TR × (Z / 100))"),
    ("Projected height", "H = W / AspectRatio"),
    ("Pixel size", "PS = W / ResolutionX"),
    ("Illuminance", "E = Lumens / (W[m] × H[m])"),
];

pub const FORMULA_LEGEND: &str = "D: distance, W: width, TR: throw ratio, Z: zoom";

pub struct ProjectorPanel {
    catalog: Catalog,
    selection: Selection,
    settings: ProjectorSettings,
    calculator: Calculator,
    /// Last computed value of the driven calculator field.
    last_driven: f64,
    projection: Option<ProjectedSize>,
    calculation: Option<CalculationResult>,
}

impl Default for ProjectorPanel {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}

impl ProjectorPanel {
    pub fn new(catalog: Catalog) -> Self {
        Self::from_settings(catalog, ProjectorSettings::default())
    }

    /// Restore a panel from saved settings. Selection ids that no longer
    /// exist in the catalog are dropped.
    pub fn from_settings(catalog: Catalog, mut settings: ProjectorSettings) -> Self {
        let selection = Selection::restore(
            &catalog,
            settings.brand_id.as_deref(),
            settings.projector_id.as_deref(),
            settings.lens_id.as_deref(),
        );
        settings.lens = settings.lens.clone().clamped();

        let mode = settings.calculator.mode;
        let values = settings.calculator.values;
        let mut panel = Self {
            catalog,
            selection,
            settings,
            calculator: Calculator::from_values(mode, values),
            last_driven: values.get(mode.driven_field()),
            projection: None,
            calculation: None,
        };
        panel.sync_selection_ids();
        panel.recompute();
        panel
    }

    /// Snapshot for saving.
    pub fn to_settings(&self) -> ProjectorSettings {
        let mut settings = self.settings.clone();
        settings.calculator.mode = self.calculator.mode();
        settings.calculator.values = self.calculator.values_with(self.last_driven);
        settings
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn settings(&self) -> &ProjectorSettings {
        &self.settings
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Projected size for the selected lens at the panel distance.
    pub fn projection_size(&self) -> Option<ProjectedSize> {
        self.projection
    }

    pub fn calculation(&self) -> Option<CalculationResult> {
        self.calculation
    }

    // Selection

    pub fn select_brand(&mut self, id: Option<&str>) -> Result<(), SelectionError> {
        self.apply_selection(SelectionChange::Brand(id))
    }

    pub fn select_projector(&mut self, id: Option<&str>) -> Result<(), SelectionError> {
        self.apply_selection(SelectionChange::Projector(id))
    }

    pub fn select_lens(&mut self, id: Option<&str>) -> Result<(), SelectionError> {
        self.apply_selection(SelectionChange::Lens(id))
    }

    fn apply_selection(&mut self, change: SelectionChange<'_>) -> Result<(), SelectionError> {
        self.selection.apply(&self.catalog, change)?;
        self.sync_selection_ids();
        self.recompute();
        Ok(())
    }

    fn sync_selection_ids(&mut self) {
        self.settings.brand_id = self.selection.brand().map(|b| b.id.to_string());
        self.settings.projector_id = self.selection.projector().map(|p| p.id.to_string());
        self.settings.lens_id = self.selection.lens().map(|l| l.id.to_string());
    }

    // Inputs

    pub fn set_name(&mut self, name: &str) {
        self.settings.name = name.to_string();
    }

    pub fn set_image_size(&mut self, width: f64, height: f64) {
        self.settings.image.width = width;
        self.settings.image.height = height;
        self.recompute();
    }

    pub fn set_distance(&mut self, distance: f64) {
        self.settings.image.distance = distance;
        self.recompute();
    }

    pub fn set_texture_path(&mut self, path: &str) {
        self.settings.image.texture_path = path.to_string();
    }

    pub fn set_lens_adjustments(&mut self, lens: LensAdjustments) {
        self.settings.lens = lens.clamped();
        self.recompute();
    }

    /// Zoom in percent, clamped to 50-150.
    pub fn set_zoom(&mut self, zoom: f64) {
        let lens = LensAdjustments {
            zoom,
            ..self.settings.lens.clone()
        };
        self.set_lens_adjustments(lens);
    }

    pub fn set_shift(&mut self, horizontal: f64, vertical: f64) {
        self.settings.lens.shift_horizontal =
            clamp_finite(horizontal, -SHIFT_LIMIT_PERCENT, SHIFT_LIMIT_PERCENT, 0.0);
        self.settings.lens.shift_vertical =
            clamp_finite(vertical, -SHIFT_LIMIT_PERCENT, SHIFT_LIMIT_PERCENT, 0.0);
    }

    /// Light intensity in percent, clamped to 0-100.
    pub fn set_light_intensity(&mut self, intensity: f64) {
        self.settings.light.intensity = clamp_finite(intensity, 0.0, 100.0, 100.0);
    }

    pub fn set_light_color(&mut self, color: &str) -> Result<(), SettingsError> {
        self.settings.light.set_color(color)
    }

    pub fn set_light_temperature(&mut self, kelvin: u32) {
        self.settings.light.temperature = kelvin.max(1);
    }

    pub fn display_options_mut(&mut self) -> &mut DisplayOptions {
        &mut self.settings.display
    }

    pub fn sections_mut(&mut self) -> &mut SectionVisibility {
        &mut self.settings.sections
    }

    // Calculator

    pub fn set_calc_mode(&mut self, mode: CalcMode) {
        self.calculator.switch_mode(mode, self.last_driven);
        self.recompute();
    }

    pub fn set_calc_field(&mut self, field: CalcField, value: f64) -> Result<(), CalculatorError> {
        self.calculator.set(field, value)?;
        self.recompute();
        Ok(())
    }

    /// Current value of a calculator field: computed for the driven field,
    /// as entered for the others.
    pub fn calc_field_value(&self, field: CalcField) -> f64 {
        match self.calculator.editable(field) {
            Some(value) => value,
            None => self
                .calculation
                .map(|r| r.value(field))
                .unwrap_or(self.last_driven),
        }
    }

    /// Lens and projector context, `None` until a lens with a readable
    /// throw ratio is selected.
    pub fn lens_context(&self) -> Option<LensContext> {
        let projector = self.selection.projector()?;
        let lens = self.selection.lens()?;
        let throw_ratio = lens.nominal_throw_ratio()?;

        Some(LensContext {
            throw_ratio,
            zoom_percent: self.settings.lens.zoom,
            image_width: self.settings.image.width,
            image_height: self.settings.image.height,
            horizontal_resolution: projector.resolution.width,
            lumens: f64::from(projector.lumens),
        })
    }

    /// Recompute every derived value from the current inputs.
    fn recompute(&mut self) {
        let ctx = self.lens_context();

        self.projection = ctx.and_then(|c| {
            compute_projected_size(
                c.throw_ratio,
                self.settings.image.distance,
                c.zoom_percent,
                c.image_width,
                c.image_height,
            )
        });
        self.calculation = ctx.and_then(|c| self.calculator.evaluate(&c));

        // A driven value only survives while it can be computed.
        self.last_driven = match self.calculation {
            Some(result) => result.driven_value(),
            None => CalcValues::default().get(self.calculator.mode().driven_field()),
        };

        log::debug!(
            "Recomputed: projection={:?} calculation={:?}",
            self.projection.map(|p| (p.width_mm(), p.height_mm())),
            self.calculation.map(|r| (r.mode, r.driven_value()))
        );
    }

    // Display helpers

    /// Image aspect ratio with two decimals, e.g. `"1.78"`.
    pub fn aspect_ratio_label(&self) -> String {
        match aspect_ratio(self.settings.image.width, self.settings.image.height) {
            Some(aspect) => format!("{:.2}", aspect),
            None => "-".to_string(),
        }
    }

    pub fn footer_label(&self) -> String {
        self.selection
            .projector_label()
            .unwrap_or_else(|| "No projector".to_string())
    }

    /// Rows of the specification section. Lens rows only appear once a lens
    /// is chosen.
    pub fn spec_rows(&self) -> Vec<(&'static str, String)> {
        let Some(projector) = self.selection.projector() else {
            return Vec::new();
        };

        let mut rows = vec![
            ("Resolution", projector.resolution.label()),
            ("Brightness", projector.brightness_label()),
        ];
        if let Some(lens) = self.selection.lens() {
            rows.push(("Throw ratio", lens.throw_ratio.to_string()));
            rows.push(("Zoom", lens.zoom_range.to_string()));
        }
        if let Some(label) = self.zoomed_ratio_label() {
            rows.push(("Ratio at zoom", label));
        }
        rows
    }

    /// Throw ratio after the zoom slider, checked against the lens range,
    /// e.g. `"0.90:1 (within lens range)"`.
    pub fn zoomed_ratio_label(&self) -> Option<String> {
        let lens = self.selection.lens()?;
        let range = lens.throw_range()?;
        let ratio = range.min * self.settings.lens.zoom / 100.0;

        let note = if range.is_fixed() && lens.zoom() == ZoomRange::Fixed {
            "fixed lens"
        } else if range.contains(ratio) {
            "within lens range"
        } else {
            "outside lens range"
        };
        Some(format!("{:.2}:1 ({})", ratio, note))
    }

    /// Plain-text summary of the panel.
    pub fn report(&self) -> String {
        let settings = &self.settings;
        let mut out = String::new();

        out.push_str(&format!("Projector: {}\n", settings.name));
        out.push_str(&format!("Model: {}\n", self.footer_label()));
        if let Some(lens) = self.selection.lens() {
            out.push_str(&format!("Lens: {}\n", lens.name));
        }
        for (label, value) in self.spec_rows() {
            out.push_str(&format!("  {}: {}\n", label, value));
        }

        out.push_str(&format!(
            "Image: {} x {} mm (ratio {}:1)\n",
            settings.image.width,
            settings.image.height,
            self.aspect_ratio_label()
        ));
        out.push_str(&format!("Distance: {} mm\n", settings.image.distance));
        out.push_str(&format!(
            "Zoom: {}%  Shift H/V: {}% / {}%\n",
            settings.lens.zoom, settings.lens.shift_horizontal, settings.lens.shift_vertical
        ));
        out.push_str(&format!(
            "Light: {}% {} {} K\n",
            settings.light.intensity, settings.light.color, settings.light.temperature
        ));

        match self.projection {
            Some(size) => out.push_str(&format!(
                "Projected size: {} x {} mm\n",
                size.width_mm(),
                size.height_mm()
            )),
            None => out.push_str("Projected size: unavailable\n"),
        }

        out.push_str(&format!(
            "Calculator mode: {}\n",
            self.calculator.mode().short_label()
        ));
        match self.calculation {
            Some(result) => {
                for field in CalcField::all() {
                    let marker = if self.calculator.is_driven(*field) { " (computed)" } else { "" };
                    out.push_str(&format!("  {}: {}{}\n", field.label(), result.display(*field), marker));
                }
                out.push_str(&format!("Status: {}\n", result.status_label()));
            }
            None => out.push_str("  unavailable\n"),
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel_with_lens() -> ProjectorPanel {
        let mut panel = ProjectorPanel::default();
        panel.select_brand(Some("barco")).unwrap();
        panel.select_projector(Some("barco-uhd")).unwrap();
        panel.select_lens(Some("tld-0.38")).unwrap();
        panel
    }

    #[test]
    fn test_no_projection_without_lens() {
        let mut panel = ProjectorPanel::default();
        assert!(panel.projection_size().is_none());
        assert!(panel.calculation().is_none());
        assert_eq!(panel.footer_label(), "No projector");

        panel.select_brand(Some("barco")).unwrap();
        panel.select_projector(Some("barco-uhd")).unwrap();
        assert!(panel.projection_size().is_none());
        assert_eq!(panel.footer_label(), "Barco UDX-4K32");
        assert_eq!(panel.spec_rows().len(), 2);
    }

    #[test]
    fn test_projection_with_lens() {
        let panel = panel_with_lens();
        let size = panel.projection_size().unwrap();
        assert_eq!(size.width_mm(), 13158);
        assert_eq!(size.height_mm(), 7401);
        assert_eq!(panel.aspect_ratio_label(), "1.78");
        assert_eq!(panel.spec_rows().len(), 5);
        assert_eq!(panel.zoomed_ratio_label().as_deref(), Some("0.38:1 (fixed lens)"));
    }

    #[test]
    fn test_upstream_change_clears_results() {
        let mut panel = panel_with_lens();
        assert!(panel.calculation().is_some());

        panel.select_projector(Some("barco-wuxga")).unwrap();
        assert!(panel.selection().lens().is_none());
        assert!(panel.projection_size().is_none());
        assert!(panel.calculation().is_none());
        assert!(panel.settings().lens_id.is_none());
    }

    #[test]
    fn test_zoomed_ratio_against_lens_range() {
        let mut panel = ProjectorPanel::default();
        panel.select_brand(Some("barco")).unwrap();
        panel.select_projector(Some("barco-uhd")).unwrap();
        panel.select_lens(Some("tld-0.75-1.16")).unwrap();
        assert_eq!(panel.zoomed_ratio_label().as_deref(), Some("0.75:1 (within lens range)"));

        panel.set_zoom(120.0);
        assert_eq!(panel.zoomed_ratio_label().as_deref(), Some("0.90:1 (within lens range)"));

        panel.set_zoom(60.0);
        assert_eq!(panel.zoomed_ratio_label().as_deref(), Some("0.45:1 (outside lens range)"));
    }

    #[test]
    fn test_selection_change_drops_driven_value() {
        let mut panel = panel_with_lens();
        let computed = panel.calc_field_value(CalcField::ProjectedWidth);
        assert!((computed - 5000.0 / 0.38).abs() < 1e-6);

        panel.select_brand(Some("epson")).unwrap();
        assert!(panel.calculation().is_none());
        assert_eq!(panel.calc_field_value(CalcField::ProjectedWidth), 3000.0);
        assert_eq!(panel.to_settings().calculator.values.projected_width, 3000.0);

        panel.set_calc_mode(CalcMode::PixelSize);
        assert_eq!(panel.calculator().editable(CalcField::ProjectedWidth), Some(3000.0));
    }

    #[test]
    fn test_zero_distance_is_unavailable() {
        let mut panel = panel_with_lens();
        panel.set_distance(0.0);
        assert!(panel.projection_size().is_none());
        assert!(panel.report().contains("Projected size: unavailable"));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut panel = panel_with_lens();
        panel.set_zoom(400.0);
        assert_eq!(panel.settings().lens.zoom, 150.0);

        let size = panel.projection_size().unwrap();
        assert!((size.width - 5000.0 / (0.38 * 1.5)).abs() < 1e-9);
    }

    #[test]
    fn test_calculator_follows_projector() {
        let mut panel = panel_with_lens();
        panel.set_calc_mode(CalcMode::PixelSize);
        // The computed LW (5000 / 0.38) carries over as the editable width.
        let width = panel.calc_field_value(CalcField::ProjectedWidth);
        assert!((width - 5000.0 / 0.38).abs() < 1e-6);

        let result = panel.calculation().unwrap();
        assert!((result.pixel_size * 4096.0 - width).abs() < 1e-6);

        assert!(panel.set_calc_field(CalcField::PixelSize, 2.0).is_err());
        panel.set_calc_field(CalcField::ProjectedWidth, 8192.0).unwrap();
        assert!((panel.calc_field_value(CalcField::PixelSize) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_settings_roundtrip_through_panel() {
        let mut panel = panel_with_lens();
        panel.set_calc_mode(CalcMode::Illuminance);
        panel.set_name("Dome");
        panel.set_light_color("#00FF00").unwrap();
        panel.sections_mut().formulas = true;

        let settings = panel.to_settings();
        assert_eq!(settings.lens_id.as_deref(), Some("tld-0.38"));
        assert_eq!(settings.calculator.mode, CalcMode::Illuminance);

        let restored = ProjectorPanel::from_settings(Catalog::builtin(), settings);
        assert_eq!(restored.selection().lens().unwrap().id, "tld-0.38");
        assert_eq!(restored.settings().name, "Dome");
        assert_eq!(restored.settings().light.color, "#00ff00");
        assert_eq!(restored.calculator().mode(), CalcMode::Illuminance);
        assert_eq!(restored.calculation(), panel.calculation());
    }

    #[test]
    fn test_stale_lens_id_dropped() {
        let mut settings = ProjectorSettings::default();
        settings.brand_id = Some("christie".to_string());
        settings.projector_id = Some("christie-hd".to_string());
        settings.lens_id = Some("tld-0.38".to_string());

        let panel = ProjectorPanel::from_settings(Catalog::builtin(), settings);
        assert_eq!(panel.selection().projector().unwrap().id, "christie-hd");
        assert!(panel.selection().lens().is_none());
        assert!(panel.settings().lens_id.is_none());
    }

    #[test]
    fn test_report() {
        let report = panel_with_lens().report();
        assert!(report.contains("Model: Barco UDX-4K32"));
        assert!(report.contains("Lens: TLD+ 0.38:1"));
        assert!(report.contains("Projected size: 13158 x 7401 mm"));
        assert!(report.contains("Calculator mode: LW"));
        assert!(report.contains("Status: Feasible"));
    }
}
