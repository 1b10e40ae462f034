//! Brand → projector → lens selection cascade.

use crate::catalog::{BrandCatalog, Catalog, LensSpec, ProjectorSpec};
use crate::error::SelectionError;

/// A single change to the selection. `None` clears that level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange<'a> {
    Brand(Option<&'a str>),
    Projector(Option<&'a str>),
    Lens(Option<&'a str>),
}

/// Current selection. Each level is only ever set together with a valid
/// parent, so a lens always belongs to the selected projector and the
/// projector to the selected brand.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Selection {
    brand: Option<&'static BrandCatalog>,
    projector: Option<&'static ProjectorSpec>,
    lens: Option<&'static LensSpec>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn brand(&self) -> Option<&'static BrandCatalog> {
        self.brand
    }

    pub fn projector(&self) -> Option<&'static ProjectorSpec> {
        self.projector
    }

    pub fn lens(&self) -> Option<&'static LensSpec> {
        self.lens
    }

    pub fn is_complete(&self) -> bool {
        self.lens.is_some()
    }

    /// Apply one change. Choosing a level resets every level below it.
    /// Invalid ids are rejected and leave the selection unchanged.
    pub fn apply(&mut self, catalog: &Catalog, change: SelectionChange<'_>) -> Result<(), SelectionError> {
        let next = match change {
            SelectionChange::Brand(None) => Selection::default(),
            SelectionChange::Brand(Some(id)) => {
                let brand = catalog
                    .brand(id)
                    .ok_or_else(|| SelectionError::UnknownBrand(id.to_string()))?;
                Selection {
                    brand: Some(brand),
                    projector: None,
                    lens: None,
                }
            }
            SelectionChange::Projector(None) if self.brand.is_none() => *self,
            SelectionChange::Lens(None) if self.projector.is_none() => *self,
            SelectionChange::Projector(id) => {
                let brand = self.brand.ok_or(SelectionError::NoBrand)?;
                let projector = match id {
                    Some(id) => Some(brand.projector(id).ok_or_else(|| {
                        SelectionError::UnknownProjector {
                            brand: brand.id.to_string(),
                            projector: id.to_string(),
                        }
                    })?),
                    None => None,
                };
                Selection {
                    brand: Some(brand),
                    projector,
                    lens: None,
                }
            }
            SelectionChange::Lens(id) => {
                let projector = self.projector.ok_or(SelectionError::NoProjector)?;
                let lens = match id {
                    Some(id) => Some(projector.lens(id).ok_or_else(|| SelectionError::UnknownLens {
                        projector: projector.id.to_string(),
                        lens: id.to_string(),
                    })?),
                    None => None,
                };
                Selection { lens, ..*self }
            }
        };

        log::debug!("Selection change {:?}", change);
        *self = next;
        Ok(())
    }

    /// Rebuild a selection from stored ids, keeping the deepest valid prefix.
    pub fn restore(
        catalog: &Catalog,
        brand: Option<&str>,
        projector: Option<&str>,
        lens: Option<&str>,
    ) -> Self {
        let mut selection = Selection::default();
        let steps = [
            SelectionChange::Brand(brand),
            SelectionChange::Projector(projector),
            SelectionChange::Lens(lens),
        ];
        for step in steps {
            if matches!(
                step,
                SelectionChange::Brand(None) | SelectionChange::Projector(None) | SelectionChange::Lens(None)
            ) {
                break;
            }
            if let Err(e) = selection.apply(catalog, step) {
                log::warn!("Dropping stored selection: {}", e);
                break;
            }
        }
        selection
    }

    /// `"Brand Model"` for the footer, `None` without a projector.
    pub fn projector_label(&self) -> Option<String> {
        let projector = self.projector?;
        let brand = self.brand.map(|b| b.name).unwrap_or_default();
        Some(format!("{} {}", brand, projector.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_selection(catalog: &Catalog) -> Selection {
        let mut selection = Selection::new();
        selection.apply(catalog, SelectionChange::Brand(Some("barco"))).unwrap();
        selection
            .apply(catalog, SelectionChange::Projector(Some("barco-uhd")))
            .unwrap();
        selection.apply(catalog, SelectionChange::Lens(Some("tld-0.38"))).unwrap();
        selection
    }

    #[test]
    fn test_brand_change_clears_downstream() {
        let catalog = Catalog::builtin();
        let mut selection = full_selection(&catalog);
        assert!(selection.is_complete());

        selection.apply(&catalog, SelectionChange::Brand(Some("christie"))).unwrap();
        assert_eq!(selection.brand().unwrap().id, "christie");
        assert!(selection.projector().is_none());
        assert!(selection.lens().is_none());
    }

    #[test]
    fn test_projector_change_clears_only_lens() {
        let catalog = Catalog::builtin();
        let mut selection = full_selection(&catalog);

        selection
            .apply(&catalog, SelectionChange::Projector(Some("barco-wuxga")))
            .unwrap();
        assert_eq!(selection.brand().unwrap().id, "barco");
        assert_eq!(selection.projector().unwrap().id, "barco-wuxga");
        assert!(selection.lens().is_none());
    }

    #[test]
    fn test_clearing_levels() {
        let catalog = Catalog::builtin();
        let mut selection = full_selection(&catalog);

        selection.apply(&catalog, SelectionChange::Lens(None)).unwrap();
        assert!(selection.projector().is_some());
        assert!(selection.lens().is_none());

        selection.apply(&catalog, SelectionChange::Brand(None)).unwrap();
        assert_eq!(selection, Selection::default());
    }

    #[test]
    fn test_rejects_foreign_ids() {
        let catalog = Catalog::builtin();
        let mut selection = full_selection(&catalog);
        let before = selection;

        // Lens from another projector.
        let err = selection
            .apply(&catalog, SelectionChange::Lens(Some("tld-0.73-0.95")))
            .unwrap_err();
        assert!(matches!(err, SelectionError::UnknownLens { .. }));
        assert_eq!(selection, before);

        // Projector from another brand.
        let err = selection
            .apply(&catalog, SelectionChange::Projector(Some("christie-4k")))
            .unwrap_err();
        assert!(matches!(err, SelectionError::UnknownProjector { .. }));
        assert_eq!(selection, before);

        assert!(selection.apply(&catalog, SelectionChange::Brand(Some("nec"))).is_err());
        assert_eq!(selection, before);
    }

    #[test]
    fn test_requires_parent() {
        let catalog = Catalog::builtin();
        let mut selection = Selection::new();
        assert_eq!(
            selection.apply(&catalog, SelectionChange::Projector(Some("barco-uhd"))),
            Err(SelectionError::NoBrand)
        );
        assert_eq!(
            selection.apply(&catalog, SelectionChange::Lens(Some("tld-0.38"))),
            Err(SelectionError::NoProjector)
        );
    }

    #[test]
    fn test_clearing_empty_level_is_noop() {
        let catalog = Catalog::builtin();
        let mut selection = Selection::new();
        selection.apply(&catalog, SelectionChange::Projector(None)).unwrap();
        selection.apply(&catalog, SelectionChange::Lens(None)).unwrap();
        assert_eq!(selection, Selection::default());

        selection.apply(&catalog, SelectionChange::Brand(Some("epson"))).unwrap();
        selection.apply(&catalog, SelectionChange::Lens(None)).unwrap();
        assert_eq!(selection.brand().unwrap().id, "epson");
    }

    #[test]
    fn test_restore_keeps_valid_prefix() {
        let catalog = Catalog::builtin();
        let selection = Selection::restore(&catalog, Some("epson"), Some("epson-pro"), Some("missing"));
        assert_eq!(selection.projector().unwrap().id, "epson-pro");
        assert!(selection.lens().is_none());
        assert_eq!(selection.projector_label().as_deref(), Some("Epson EB-PU1007B"));

        let empty = Selection::restore(&catalog, None, None, None);
        assert!(empty.brand().is_none());
        assert!(empty.projector_label().is_none());
    }
}
