//! Projector catalog module.
//!
//! The catalog is a fixed brand → projector → lens table embedded in the
//! binary. Nothing mutates it at runtime; every lookup hands out `'static`
//! references into the table.

mod data;

use crate::calculator::{parse_throw_range, parse_throw_ratio, parse_zoom_range, ThrowRange, ZoomRange};

/// A lens compatible with a projector model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensSpec {
    /// Unique ID.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Throw ratio label, e.g. `"0.75-1.16:1"`.
    pub throw_ratio: &'static str,
    /// Zoom range label, e.g. `"1.55x"` or `"Fixed"`.
    pub zoom_range: &'static str,
}

impl LensSpec {
    /// Nominal (minimum or fixed) throw ratio.
    pub fn nominal_throw_ratio(&self) -> Option<f64> {
        parse_throw_ratio(self.throw_ratio)
    }

    /// Full throw ratio range covered by the lens.
    pub fn throw_range(&self) -> Option<ThrowRange> {
        parse_throw_range(self.throw_ratio)
    }

    /// Zoom capability of the lens.
    pub fn zoom(&self) -> ZoomRange {
        parse_zoom_range(self.zoom_range)
    }
}

/// Native output resolution in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Label as shown in the specification panel.
    pub fn label(&self) -> String {
        format!("{} x {}", self.width, self.height)
    }
}

/// A projector model and the lenses it accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectorSpec {
    /// Unique ID.
    pub id: &'static str,
    /// Model name.
    pub name: &'static str,
    /// Native resolution.
    pub resolution: Resolution,
    /// Rated brightness in lumens.
    pub lumens: u32,
    /// Compatible lenses, in display order.
    pub lenses: &'static [LensSpec],
}

impl ProjectorSpec {
    pub fn lens(&self, id: &str) -> Option<&'static LensSpec> {
        self.lenses.iter().find(|l| l.id == id)
    }

    /// Brightness label with thousands separators, e.g. `"31,000 lumens"`.
    pub fn brightness_label(&self) -> String {
        format!("{} lumens", group_thousands(self.lumens))
    }
}

/// A projector manufacturer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrandCatalog {
    /// Unique ID.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Projector models, in display order.
    pub projectors: &'static [ProjectorSpec],
}

impl BrandCatalog {
    pub fn projector(&self, id: &str) -> Option<&'static ProjectorSpec> {
        self.projectors.iter().find(|p| p.id == id)
    }
}

/// Read-only brand table.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    brands: &'static [BrandCatalog],
}

impl Catalog {
    /// Wrap a static brand table.
    pub const fn new(brands: &'static [BrandCatalog]) -> Self {
        Self { brands }
    }

    /// The catalog shipped with the application.
    pub const fn builtin() -> Self {
        Self::new(data::BRANDS)
    }

    pub fn brands(&self) -> &'static [BrandCatalog] {
        self.brands
    }

    pub fn brand(&self, id: &str) -> Option<&'static BrandCatalog> {
        self.brands.iter().find(|b| b.id == id)
    }

    /// Total number of lenses across all projectors.
    pub fn lens_count(&self) -> usize {
        self.brands
            .iter()
            .flat_map(|b| b.projectors.iter())
            .map(|p| p.lenses.len())
            .sum()
    }

    /// Multi-line listing of the whole table, used by `--catalog`.
    pub fn listing(&self) -> String {
        let mut out = format!("{} brands, {} lenses\n", self.brands.len(), self.lens_count());
        for brand in self.brands {
            out.push_str(&format!("{} [{}]\n", brand.name, brand.id));
            for projector in brand.projectors {
                out.push_str(&format!(
                    "  {} [{}]  {}  {}\n",
                    projector.name,
                    projector.id,
                    projector.resolution.label(),
                    projector.brightness_label()
                ));
                for lens in projector.lenses {
                    out.push_str(&format!(
                        "    {} [{}]  throw {}  zoom {}\n",
                        lens.name, lens.id, lens.throw_ratio, lens.zoom_range
                    ));
                }
            }
        }
        out
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
