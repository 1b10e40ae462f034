//! Parsing of the free-form lens labels found in the catalog.

/// Throw ratio range of a zoom lens. Fixed lenses have `min == max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowRange {
    pub min: f64,
    pub max: f64,
}

impl ThrowRange {
    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }

    pub fn contains(&self, ratio: f64) -> bool {
        ratio >= self.min && ratio <= self.max
    }
}

/// Zoom capability parsed from labels such as `"1.55x"` or `"Fixed"`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ZoomRange {
    #[default]
    Fixed,
    Multiplier(f64),
}

/// Find the first unsigned decimal number (`digits[.digits]`) in `text`,
/// starting at byte offset `from`. Returns the value and the offset just
/// past it.
fn next_number(text: &str, from: usize) -> Option<(f64, usize)> {
    let bytes = text.as_bytes();
    let start = from + bytes[from..].iter().position(u8::is_ascii_digit)?;

    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    // A trailing '.' ("2.") still parses as 2.0.
    let value = text[start..end].trim_end_matches('.').parse().ok()?;
    Some((value, end))
}

/// Extract the nominal throw ratio from a label like `"0.75-1.16:1"`.
///
/// The first number in the label is taken as the minimum (or fixed) ratio.
/// Labels without any digit, e.g. `"Fixed"`, yield `None`.
pub fn parse_throw_ratio(label: &str) -> Option<f64> {
    next_number(label, 0).map(|(value, _)| value)
}

/// Parse the full ratio range from the part of the label before `:`.
pub fn parse_throw_range(label: &str) -> Option<ThrowRange> {
    let ratio_part = label.split(':').next().unwrap_or(label);
    let (first, end) = next_number(ratio_part, 0)?;
    let second = next_number(ratio_part, end).map(|(value, _)| value);

    let (min, max) = match second {
        Some(second) if second < first => (second, first),
        Some(second) => (first, second),
        None => (first, first),
    };
    Some(ThrowRange { min, max })
}

/// Parse a zoom label. Anything without a usable multiplier is treated as fixed.
pub fn parse_zoom_range(label: &str) -> ZoomRange {
    match parse_throw_ratio(label) {
        Some(multiplier) if multiplier > 1.0 => ZoomRange::Multiplier(multiplier),
        _ => ZoomRange::Fixed,
    }
}
