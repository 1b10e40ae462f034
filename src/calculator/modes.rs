//! Four-mode projection calculator (LW / L / PS / Lux).
//!
//! All modes solve `distance = width * throw_ratio * zoom / 100` or quantities
//! derived from the projected width. The runtime state is a tagged
//! [`Calculator`]: the variant names the computed field and the payload only
//! holds the three fields the user can still edit.

use serde::{Deserialize, Serialize};

use super::projection::{aspect_ratio, effective_ratio};
use crate::error::CalculatorError;

/// Which quantity the calculator solves for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CalcMode {
    /// LW: projected width from throw distance.
    #[default]
    ProjectedWidth,
    /// L: throw distance from projected width.
    ThrowDistance,
    /// PS: size of one projected pixel.
    PixelSize,
    /// Lux: illuminance on the projection surface.
    Illuminance,
}

impl CalcMode {
    pub fn all() -> &'static [CalcMode] {
        &[
            CalcMode::ProjectedWidth,
            CalcMode::ThrowDistance,
            CalcMode::PixelSize,
            CalcMode::Illuminance,
        ]
    }

    /// Short label used on the mode buttons.
    pub fn short_label(&self) -> &'static str {
        match self {
            CalcMode::ProjectedWidth => "LW",
            CalcMode::ThrowDistance => "L",
            CalcMode::PixelSize => "PS",
            CalcMode::Illuminance => "Lux",
        }
    }

    /// The field this mode computes.
    pub fn driven_field(&self) -> CalcField {
        match self {
            CalcMode::ProjectedWidth => CalcField::ProjectedWidth,
            CalcMode::ThrowDistance => CalcField::ThrowDistance,
            CalcMode::PixelSize => CalcField::PixelSize,
            CalcMode::Illuminance => CalcField::Illuminance,
        }
    }
}

/// One of the four calculator fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcField {
    ProjectedWidth,
    ThrowDistance,
    PixelSize,
    Illuminance,
}

impl CalcField {
    pub fn all() -> &'static [CalcField] {
        &[
            CalcField::ProjectedWidth,
            CalcField::ThrowDistance,
            CalcField::PixelSize,
            CalcField::Illuminance,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            CalcField::ProjectedWidth => "LW - Projection width (mm)",
            CalcField::ThrowDistance => "L - Throw distance (mm)",
            CalcField::PixelSize => "PS - Pixel size (mm)",
            CalcField::Illuminance => "Lux - Surface illuminance (lux)",
        }
    }

    /// Display precision: whole millimetres, 3 decimals for pixel size,
    /// 2 decimals for illuminance.
    pub fn format(&self, value: f64) -> String {
        match self {
            CalcField::ProjectedWidth | CalcField::ThrowDistance => {
                format!("{}", value.round() as i64)
            }
            CalcField::PixelSize => format!("{:.3}", value),
            CalcField::Illuminance => format!("{:.2}", value),
        }
    }

    /// Editing step for the UI.
    pub fn step(&self) -> f64 {
        match self {
            CalcField::ProjectedWidth | CalcField::ThrowDistance => 1.0,
            CalcField::PixelSize => 0.001,
            CalcField::Illuminance => 0.01,
        }
    }
}

/// Snapshot of all four calculator fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcValues {
    /// LW, in millimetres.
    pub projected_width: f64,
    /// L, in millimetres.
    pub throw_distance: f64,
    /// PS, in millimetres per pixel.
    pub pixel_size: f64,
    /// Lux.
    pub illuminance: f64,
}

impl Default for CalcValues {
    fn default() -> Self {
        Self {
            projected_width: 3000.0,
            throw_distance: 5000.0,
            pixel_size: 0.0,
            illuminance: 0.0,
        }
    }
}

impl CalcValues {
    pub fn get(&self, field: CalcField) -> f64 {
        match field {
            CalcField::ProjectedWidth => self.projected_width,
            CalcField::ThrowDistance => self.throw_distance,
            CalcField::PixelSize => self.pixel_size,
            CalcField::Illuminance => self.illuminance,
        }
    }

    pub fn set(&mut self, field: CalcField, value: f64) {
        match field {
            CalcField::ProjectedWidth => self.projected_width = value,
            CalcField::ThrowDistance => self.throw_distance = value,
            CalcField::PixelSize => self.pixel_size = value,
            CalcField::Illuminance => self.illuminance = value,
        }
    }
}

/// Everything [`compute_by_mode`] reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationInput {
    /// Nominal lens throw ratio.
    pub throw_ratio: f64,
    /// Zoom slider, 50-150 %.
    pub zoom_percent: f64,
    /// Source image width (any unit, only the ratio matters).
    pub image_width: f64,
    /// Source image height.
    pub image_height: f64,
    /// Projector native horizontal resolution.
    pub horizontal_resolution: u32,
    /// Projector rated brightness.
    pub lumens: f64,
    /// Current field values. The driven one is ignored.
    pub values: CalcValues,
}

/// Output of one calculator evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationResult {
    pub mode: CalcMode,
    pub projected_width: f64,
    pub projected_height: f64,
    pub throw_distance: f64,
    pub pixel_size: f64,
    pub illuminance: f64,
    /// Whether the setup is physically realizable with these values.
    pub feasible: bool,
}

impl CalculationResult {
    pub fn value(&self, field: CalcField) -> f64 {
        match field {
            CalcField::ProjectedWidth => self.projected_width,
            CalcField::ThrowDistance => self.throw_distance,
            CalcField::PixelSize => self.pixel_size,
            CalcField::Illuminance => self.illuminance,
        }
    }

    /// The value computed by this result's mode.
    pub fn driven_value(&self) -> f64 {
        self.value(self.mode.driven_field())
    }

    pub fn display(&self, field: CalcField) -> String {
        field.format(self.value(field))
    }

    pub fn status_label(&self) -> &'static str {
        if self.feasible {
            "Feasible"
        } else {
            "Not feasible"
        }
    }
}

fn positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Solve for the field selected by `mode`.
///
/// Returns `None` whenever the inputs cannot produce a finite value: missing
/// or non-positive throw ratio, zoom outside 50-150 %, image without a
/// positive aspect ratio, or a non-positive operand for the chosen mode.
pub fn compute_by_mode(mode: CalcMode, input: &CalculationInput) -> Option<CalculationResult> {
    let aspect = aspect_ratio(input.image_width, input.image_height)?;
    let ratio = effective_ratio(input.throw_ratio, input.zoom_percent)?;
    let mut out = input.values;

    match mode {
        CalcMode::ProjectedWidth => {
            out.projected_width = positive(input.values.throw_distance)? / ratio;
        }
        CalcMode::ThrowDistance => {
            out.throw_distance = positive(input.values.projected_width)? * ratio;
        }
        CalcMode::PixelSize => {
            if input.horizontal_resolution == 0 {
                return None;
            }
            out.pixel_size =
                positive(input.values.projected_width)? / f64::from(input.horizontal_resolution);
        }
        CalcMode::Illuminance => {
            if !(input.lumens.is_finite() && input.lumens >= 0.0) {
                return None;
            }
            let width_m = positive(input.values.projected_width)? / 1000.0;
            let height_m = width_m / aspect;
            out.illuminance = input.lumens / (width_m * height_m);
        }
    }

    let driven = out.get(mode.driven_field());
    if !driven.is_finite() {
        return None;
    }

    let projected_height = out.projected_width / aspect;
    if !projected_height.is_finite() {
        return None;
    }

    let all_finite = CalcField::all().iter().all(|f| out.get(*f).is_finite());
    let feasible = all_finite
        && driven > 0.0
        && out.projected_width > 0.0
        && out.throw_distance > 0.0
        && out.pixel_size >= 0.0
        && out.illuminance >= 0.0;

    Some(CalculationResult {
        mode,
        projected_width: out.projected_width,
        projected_height,
        throw_distance: out.throw_distance,
        pixel_size: out.pixel_size,
        illuminance: out.illuminance,
        feasible,
    })
}

/// Projector/lens/image context the calculator is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensContext {
    pub throw_ratio: f64,
    pub zoom_percent: f64,
    pub image_width: f64,
    pub image_height: f64,
    pub horizontal_resolution: u32,
    pub lumens: f64,
}

/// Calculator state. The variant is the active mode; the payload holds the
/// three editable fields. The computed field has no storage, so two fields
/// can never be "computed" at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Calculator {
    ProjectedWidth {
        throw_distance: f64,
        pixel_size: f64,
        illuminance: f64,
    },
    ThrowDistance {
        projected_width: f64,
        pixel_size: f64,
        illuminance: f64,
    },
    PixelSize {
        projected_width: f64,
        throw_distance: f64,
        illuminance: f64,
    },
    Illuminance {
        projected_width: f64,
        throw_distance: f64,
        pixel_size: f64,
    },
}

impl Default for Calculator {
    fn default() -> Self {
        Self::from_values(CalcMode::default(), CalcValues::default())
    }
}

impl Calculator {
    /// Build a calculator in `mode`, keeping the editable fields of `values`.
    pub fn from_values(mode: CalcMode, values: CalcValues) -> Self {
        let CalcValues {
            projected_width,
            throw_distance,
            pixel_size,
            illuminance,
        } = values;
        match mode {
            CalcMode::ProjectedWidth => Calculator::ProjectedWidth {
                throw_distance,
                pixel_size,
                illuminance,
            },
            CalcMode::ThrowDistance => Calculator::ThrowDistance {
                projected_width,
                pixel_size,
                illuminance,
            },
            CalcMode::PixelSize => Calculator::PixelSize {
                projected_width,
                throw_distance,
                illuminance,
            },
            CalcMode::Illuminance => Calculator::Illuminance {
                projected_width,
                throw_distance,
                pixel_size,
            },
        }
    }

    pub fn mode(&self) -> CalcMode {
        match self {
            Calculator::ProjectedWidth { .. } => CalcMode::ProjectedWidth,
            Calculator::ThrowDistance { .. } => CalcMode::ThrowDistance,
            Calculator::PixelSize { .. } => CalcMode::PixelSize,
            Calculator::Illuminance { .. } => CalcMode::Illuminance,
        }
    }

    pub fn is_driven(&self, field: CalcField) -> bool {
        self.mode().driven_field() == field
    }

    fn slot_mut(&mut self, field: CalcField) -> Option<&mut f64> {
        match (self, field) {
            (Calculator::ThrowDistance { projected_width, .. }, CalcField::ProjectedWidth)
            | (Calculator::PixelSize { projected_width, .. }, CalcField::ProjectedWidth)
            | (Calculator::Illuminance { projected_width, .. }, CalcField::ProjectedWidth) => {
                Some(projected_width)
            }
            (Calculator::ProjectedWidth { throw_distance, .. }, CalcField::ThrowDistance)
            | (Calculator::PixelSize { throw_distance, .. }, CalcField::ThrowDistance)
            | (Calculator::Illuminance { throw_distance, .. }, CalcField::ThrowDistance) => {
                Some(throw_distance)
            }
            (Calculator::ProjectedWidth { pixel_size, .. }, CalcField::PixelSize)
            | (Calculator::ThrowDistance { pixel_size, .. }, CalcField::PixelSize)
            | (Calculator::Illuminance { pixel_size, .. }, CalcField::PixelSize) => Some(pixel_size),
            (Calculator::ProjectedWidth { illuminance, .. }, CalcField::Illuminance)
            | (Calculator::ThrowDistance { illuminance, .. }, CalcField::Illuminance)
            | (Calculator::PixelSize { illuminance, .. }, CalcField::Illuminance) => Some(illuminance),
            _ => None,
        }
    }

    /// Value of an editable field, `None` for the computed one.
    pub fn editable(&self, field: CalcField) -> Option<f64> {
        let mut copy = *self;
        copy.slot_mut(field).map(|v| *v)
    }

    /// Update an editable field.
    pub fn set(&mut self, field: CalcField, value: f64) -> Result<(), CalculatorError> {
        if !value.is_finite() {
            return Err(CalculatorError::NonFinite(field));
        }
        let mode = self.mode();
        let slot = self
            .slot_mut(field)
            .ok_or(CalculatorError::ReadOnly { field, mode })?;
        *slot = value;
        Ok(())
    }

    /// All four values, with `driven` filling the computed slot.
    pub fn values_with(&self, driven: f64) -> CalcValues {
        let mut values = CalcValues {
            projected_width: 0.0,
            throw_distance: 0.0,
            pixel_size: 0.0,
            illuminance: 0.0,
        };
        for field in CalcField::all() {
            let value = self.editable(*field).unwrap_or(driven);
            values.set(*field, value);
        }
        values
    }

    /// Change mode. The previously computed value becomes editable.
    pub fn switch_mode(&mut self, mode: CalcMode, last_driven: f64) {
        if mode == self.mode() {
            return;
        }
        let values = self.values_with(last_driven);
        log::debug!("Calculator mode {:?} -> {:?}", self.mode(), mode);
        *self = Calculator::from_values(mode, values);
    }

    pub fn input(&self, ctx: &LensContext) -> CalculationInput {
        CalculationInput {
            throw_ratio: ctx.throw_ratio,
            zoom_percent: ctx.zoom_percent,
            image_width: ctx.image_width,
            image_height: ctx.image_height,
            horizontal_resolution: ctx.horizontal_resolution,
            lumens: ctx.lumens,
            values: self.values_with(0.0),
        }
    }

    pub fn evaluate(&self, ctx: &LensContext) -> Option<CalculationResult> {
        compute_by_mode(self.mode(), &self.input(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> LensContext {
        LensContext {
            throw_ratio: 0.75,
            zoom_percent: 100.0,
            image_width: 1920.0,
            image_height: 1080.0,
            horizontal_resolution: 4096,
            lumens: 31_000.0,
        }
    }

    fn input(values: CalcValues) -> CalculationInput {
        let c = ctx();
        CalculationInput {
            throw_ratio: c.throw_ratio,
            zoom_percent: c.zoom_percent,
            image_width: c.image_width,
            image_height: c.image_height,
            horizontal_resolution: c.horizontal_resolution,
            lumens: c.lumens,
            values,
        }
    }

    #[test]
    fn test_projected_width_mode() {
        let values = CalcValues {
            throw_distance: 6000.0,
            ..CalcValues::default()
        };
        let result = compute_by_mode(CalcMode::ProjectedWidth, &input(values)).unwrap();

        assert!((result.projected_width - 8000.0).abs() < 1e-9);
        assert!((result.projected_height - 4500.0).abs() < 1e-9);
        assert_eq!(result.display(CalcField::ProjectedWidth), "8000");
        assert!(result.feasible);
    }

    #[test]
    fn test_throw_distance_mode() {
        let values = CalcValues {
            projected_width: 8000.0,
            ..CalcValues::default()
        };
        let result = compute_by_mode(CalcMode::ThrowDistance, &input(values)).unwrap();
        assert!((result.throw_distance - 6000.0).abs() < 1e-9);
        assert_eq!(result.driven_value(), result.throw_distance);
    }

    #[test]
    fn test_pixel_size_times_resolution_is_width() {
        let values = CalcValues {
            projected_width: 13158.0,
            ..CalcValues::default()
        };
        let result = compute_by_mode(CalcMode::PixelSize, &input(values)).unwrap();

        assert_eq!(result.display(CalcField::PixelSize), "3.212");
        assert!((result.pixel_size * 4096.0 - result.projected_width).abs() < 1e-6);
        let shown: f64 = result.display(CalcField::PixelSize).parse().unwrap();
        assert!((shown * 4096.0 - 13158.0).abs() < 4096.0 * 0.0005 + 1e-9);
    }

    #[test]
    fn test_illuminance_mode() {
        // 4 m x 2.25 m = 9 m^2
        let values = CalcValues {
            projected_width: 4000.0,
            ..CalcValues::default()
        };
        let result = compute_by_mode(CalcMode::Illuminance, &input(values)).unwrap();
        assert!((result.illuminance - 31_000.0 / 9.0).abs() < 1e-6);
        assert_eq!(result.display(CalcField::Illuminance), "3444.44");
    }

    #[test]
    fn test_degenerate_modes() {
        let zero_width = CalcValues {
            projected_width: 0.0,
            ..CalcValues::default()
        };
        assert!(compute_by_mode(CalcMode::ThrowDistance, &input(zero_width)).is_none());
        assert!(compute_by_mode(CalcMode::PixelSize, &input(zero_width)).is_none());
        assert!(compute_by_mode(CalcMode::Illuminance, &input(zero_width)).is_none());

        let zero_distance = CalcValues {
            throw_distance: 0.0,
            ..CalcValues::default()
        };
        assert!(compute_by_mode(CalcMode::ProjectedWidth, &input(zero_distance)).is_none());

        let mut no_height = input(CalcValues::default());
        no_height.image_height = 0.0;
        assert!(compute_by_mode(CalcMode::ProjectedWidth, &no_height).is_none());

        let mut no_resolution = input(CalcValues::default());
        no_resolution.horizontal_resolution = 0;
        assert!(compute_by_mode(CalcMode::PixelSize, &no_resolution).is_none());
    }

    #[test]
    fn test_overflowing_height_is_unavailable() {
        let values = CalcValues {
            projected_width: 5000.0,
            ..CalcValues::default()
        };
        let mut tall = input(values);
        tall.image_width = 1e-10;
        tall.image_height = 1e300;
        assert!(compute_by_mode(CalcMode::PixelSize, &tall).is_none());

        let far = CalcValues {
            throw_distance: 1e308,
            ..CalcValues::default()
        };
        let mut wide_zoom = input(far);
        wide_zoom.zoom_percent = 50.0;
        wide_zoom.throw_ratio = 0.38;
        assert!(compute_by_mode(CalcMode::ProjectedWidth, &wide_zoom).is_none());
    }

    #[test]
    fn test_infeasible_when_echoed_distance_is_zero() {
        let values = CalcValues {
            projected_width: 3000.0,
            throw_distance: 0.0,
            ..CalcValues::default()
        };
        let result = compute_by_mode(CalcMode::PixelSize, &input(values)).unwrap();
        assert!(!result.feasible);
        assert_eq!(result.status_label(), "Not feasible");
    }

    #[test]
    fn test_driven_field_is_read_only() {
        let mut calc = Calculator::default();
        assert_eq!(calc.mode(), CalcMode::ProjectedWidth);
        assert!(calc.editable(CalcField::ProjectedWidth).is_none());

        let err = calc.set(CalcField::ProjectedWidth, 10.0).unwrap_err();
        assert!(matches!(err, CalculatorError::ReadOnly { .. }));

        calc.set(CalcField::ThrowDistance, 7000.0).unwrap();
        assert_eq!(calc.editable(CalcField::ThrowDistance), Some(7000.0));
        assert!(calc.set(CalcField::PixelSize, f64::INFINITY).is_err());
    }

    #[test]
    fn test_switch_mode_keeps_computed_value() {
        let mut calc = Calculator::default();
        let result = calc.evaluate(&ctx()).unwrap();
        let width = result.projected_width;

        calc.switch_mode(CalcMode::ThrowDistance, result.driven_value());
        assert_eq!(calc.mode(), CalcMode::ThrowDistance);
        assert_eq!(calc.editable(CalcField::ProjectedWidth), Some(width));
        assert!(calc.editable(CalcField::ThrowDistance).is_none());

        let back = calc.evaluate(&ctx()).unwrap();
        assert!((back.throw_distance - 5000.0).abs() < 1e-6);
    }

    #[test]
    fn test_exactly_one_field_driven() {
        for mode in CalcMode::all() {
            let calc = Calculator::from_values(*mode, CalcValues::default());
            let driven = CalcField::all().iter().filter(|f| calc.is_driven(**f)).count();
            let editable = CalcField::all()
                .iter()
                .filter(|f| calc.editable(**f).is_some())
                .count();
            assert_eq!(driven, 1);
            assert_eq!(editable, 3);
        }
    }
}
