//! Throw-ratio projection geometry.

/// Allowed zoom slider range in percent.
pub const ZOOM_MIN_PERCENT: f64 = 50.0;
pub const ZOOM_MAX_PERCENT: f64 = 150.0;

/// Projected image size on the surface, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedSize {
    pub width: f64,
    pub height: f64,
}

impl ProjectedSize {
    /// Width rounded to the nearest millimetre.
    pub fn width_mm(&self) -> i64 {
        self.width.round() as i64
    }

    /// Height rounded to the nearest millimetre.
    pub fn height_mm(&self) -> i64 {
        self.height.round() as i64
    }
}

pub(crate) fn zoom_in_range(zoom_percent: f64) -> bool {
    (ZOOM_MIN_PERCENT..=ZOOM_MAX_PERCENT).contains(&zoom_percent)
}

/// Width/height ratio of the source image, `None` unless strictly positive.
pub fn aspect_ratio(image_width: f64, image_height: f64) -> Option<f64> {
    if image_height == 0.0 {
        return None;
    }
    let aspect = image_width / image_height;
    (aspect.is_finite() && aspect > 0.0).then_some(aspect)
}

/// Effective throw ratio once the zoom slider is applied.
pub(crate) fn effective_ratio(throw_ratio: f64, zoom_percent: f64) -> Option<f64> {
    if !(throw_ratio.is_finite() && throw_ratio > 0.0) || !zoom_in_range(zoom_percent) {
        return None;
    }
    Some(throw_ratio * (zoom_percent / 100.0))
}

/// Projected image size for a lens at a given throw distance.
///
/// `width = distance / (throw_ratio * zoom / 100)`, `height = width / aspect`.
/// Returns `None` for a non-positive ratio or distance, a zoom outside
/// 50-150 %, or an image size without a positive aspect ratio.
pub fn compute_projected_size(
    throw_ratio: f64,
    distance: f64,
    zoom_percent: f64,
    image_width: f64,
    image_height: f64,
) -> Option<ProjectedSize> {
    if !(distance.is_finite() && distance > 0.0) {
        return None;
    }
    let ratio = effective_ratio(throw_ratio, zoom_percent)?;
    let aspect = aspect_ratio(image_width, image_height)?;

    let width = distance / ratio;
    let height = width / aspect;
    if !(width.is_finite() && height.is_finite()) {
        return None;
    }
    Some(ProjectedSize { width, height })
}

/// Throw distance needed to produce `projected_width` (inverse of the above).
pub fn compute_throw_distance(throw_ratio: f64, projected_width: f64, zoom_percent: f64) -> Option<f64> {
    if !(projected_width.is_finite() && projected_width > 0.0) {
        return None;
    }
    let ratio = effective_ratio(throw_ratio, zoom_percent)?;
    let distance = projected_width * ratio;
    distance.is_finite().then_some(distance)
}
