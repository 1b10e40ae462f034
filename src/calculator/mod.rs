//! Projection geometry calculator.
//!
//! Pure functions: every result is a function of the arguments only, and any
//! input that cannot produce a finite value yields `None`.

mod modes;
mod projection;
mod throw_ratio;

pub use modes::{
    compute_by_mode, CalcField, CalcMode, CalcValues, CalculationInput, CalculationResult,
    Calculator, LensContext,
};
pub use projection::{
    aspect_ratio, compute_projected_size, compute_throw_distance, ProjectedSize, ZOOM_MAX_PERCENT,
    ZOOM_MIN_PERCENT,
};
pub use throw_ratio::{parse_throw_range, parse_throw_ratio, parse_zoom_range, ThrowRange, ZoomRange};
