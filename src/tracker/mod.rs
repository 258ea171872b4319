//! Item toggler core.
//!
//! Every tracked item is either "bright" (rendered opacity above 0.5) or "dim".
//! Clicking a bright plain item dims it. Clicking a bright progressive item
//! advances its variant, dimming it again once the last variant wraps to the
//! first. Clicking a dim item brightens it and leaves its variant alone.
//!
//! The transition itself is [`step`], a pure function of the rendered opacity,
//! the current variant index and the variant count. [`ItemToggler`] owns the
//! per-item records and applies steps to anything implementing [`ItemSurface`];
//! the browser binding lives in [`dom`].

pub mod config;
pub mod dom;
mod items;

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::TrackerError;

pub use config::{ProgressiveItem, TrackerConfig};

/// Opacity written when an item is brightened.
pub const BRIGHT_OPACITY: f64 = 0.75;
/// Opacity written when an item is dimmed.
pub const DIM_OPACITY: f64 = 0.25;
/// Rendered opacity strictly above this counts as bright.
pub const BRIGHT_THRESHOLD: f64 = 0.5;

/// Result of one click.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    /// New opacity, or `None` when the opacity is left as rendered.
    pub opacity: Option<f64>,
    /// Variant index after the click.
    pub index: usize,
    /// Whether the image source must be set to the variant at `index`.
    pub show_variant: bool,
}

/// Computes the effect of a click on an item.
pub fn step(opacity: f64, index: usize, variant_count: usize) -> Step {
    if opacity <= BRIGHT_THRESHOLD {
        return Step {
            opacity: Some(BRIGHT_OPACITY),
            index,
            show_variant: false,
        };
    }
    if variant_count == 0 {
        return Step {
            opacity: Some(DIM_OPACITY),
            index,
            show_variant: false,
        };
    }
    if index + 1 >= variant_count {
        // last variant: wrap and dim
        Step {
            opacity: Some(DIM_OPACITY),
            index: 0,
            show_variant: true,
        }
    } else {
        Step {
            opacity: None,
            index: index + 1,
            show_variant: true,
        }
    }
}

/// Parses a CSS opacity value as reported by computed style.
///
/// Detached elements report an empty value, which counts as dim so a click
/// restores them to bright.
pub fn parse_opacity(raw: &str) -> Result<f64, TrackerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| TrackerError::Opacity {
            raw: raw.to_string(),
        })
}

/// A clickable element the toggler can restyle.
pub trait ItemSurface {
    fn opacity(&self) -> Result<f64, TrackerError>;
    fn set_opacity(&mut self, opacity: f64) -> Result<(), TrackerError>;
    fn set_source(&mut self, source: &str) -> Result<(), TrackerError>;
}

/// Per-item state: position in the variant cycle and the cycle itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemRecord {
    pub index: usize,
    pub variants: Vec<String>,
}

impl ItemRecord {
    pub fn is_progressive(&self) -> bool {
        !self.variants.is_empty()
    }
}

/// Owns the records of every registered item, keyed by element identity.
#[derive(Debug)]
pub struct ItemToggler<K> {
    items: HashMap<K, ItemRecord>,
}

impl<K> Default for ItemToggler<K> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Debug> ItemToggler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an item as a plain item at index 0, replacing any previous record.
    pub fn register(&mut self, key: K) {
        self.items.insert(key, ItemRecord::default());
    }

    /// Replaces the variant cycle of a registered item.
    ///
    /// The index is kept when still valid for the new cycle and reset to 0 otherwise.
    pub fn set_variants(&mut self, key: &K, variants: Vec<String>) -> Result<(), TrackerError> {
        let record = self
            .items
            .get_mut(key)
            .ok_or_else(|| TrackerError::unregistered(key))?;
        if record.index >= variants.len() {
            record.index = 0;
        }
        record.variants = variants;
        Ok(())
    }

    pub fn record(&self, key: &K) -> Option<&ItemRecord> {
        self.items.get(key)
    }

    pub fn is_registered(&self, key: &K) -> bool {
        self.items.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of registered items with a variant cycle.
    pub fn progressive_count(&self) -> usize {
        self.items.values().filter(|r| r.is_progressive()).count()
    }

    /// Handles a click on `key`, restyling `surface` accordingly.
    pub fn click<S: ItemSurface + ?Sized>(
        &mut self,
        key: &K,
        surface: &mut S,
    ) -> Result<Step, TrackerError> {
        let record = self
            .items
            .get_mut(key)
            .ok_or_else(|| TrackerError::unregistered(key))?;
        let opacity = surface.opacity()?;
        let next = step(opacity, record.index, record.variants.len());
        // the record only advances once every write has landed
        if next.show_variant {
            surface.set_source(&record.variants[next.index])?;
        }
        if let Some(o) = next.opacity {
            surface.set_opacity(o)?;
        }
        record.index = next.index;
        log::debug!(
            "item {:?}: opacity {} -> {:?}, variant {}",
            key,
            opacity,
            next.opacity,
            next.index
        );
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FakeSurface {
        opacity: f64,
        source: String,
    }

    impl FakeSurface {
        fn bright(source: &str) -> Self {
            Self {
                opacity: BRIGHT_OPACITY,
                source: source.to_string(),
            }
        }
    }

    impl ItemSurface for FakeSurface {
        fn opacity(&self) -> Result<f64, TrackerError> {
            Ok(self.opacity)
        }
        fn set_opacity(&mut self, opacity: f64) -> Result<(), TrackerError> {
            self.opacity = opacity;
            Ok(())
        }
        fn set_source(&mut self, source: &str) -> Result<(), TrackerError> {
            self.source = source.to_string();
            Ok(())
        }
    }

    fn abc() -> Vec<String> {
        vec!["a.gif".into(), "b.gif".into(), "c.gif".into()]
    }

    #[test]
    fn test_step_dim_always_brightens() {
        for (index, count) in [(0, 0), (0, 3), (2, 3), (1, 4)] {
            let s = step(DIM_OPACITY, index, count);
            assert_eq!(s.opacity, Some(BRIGHT_OPACITY));
            assert_eq!(s.index, index);
            assert!(!s.show_variant);
        }
    }

    #[test]
    fn test_step_threshold_is_dim() {
        assert_eq!(step(0.5, 0, 0).opacity, Some(BRIGHT_OPACITY));
        assert_eq!(step(0.51, 0, 0).opacity, Some(DIM_OPACITY));
    }

    #[test]
    fn test_step_progressive_advances_then_wraps() {
        let s = step(BRIGHT_OPACITY, 0, 3);
        assert_eq!(
            s,
            Step {
                opacity: None,
                index: 1,
                show_variant: true,
            }
        );
        let s = step(BRIGHT_OPACITY, 2, 3);
        assert_eq!(
            s,
            Step {
                opacity: Some(DIM_OPACITY),
                index: 0,
                show_variant: true,
            }
        );
    }

    #[test]
    fn test_step_single_variant_dims_immediately() {
        let s = step(1.0, 0, 1);
        assert_eq!(
            s,
            Step {
                opacity: Some(DIM_OPACITY),
                index: 0,
                show_variant: true,
            }
        );
    }

    #[test]
    fn test_parse_opacity() {
        assert_eq!(parse_opacity("0.75"), Ok(0.75));
        assert_eq!(parse_opacity(" 1 "), Ok(1.0));
        assert!(matches!(parse_opacity("x"), Err(TrackerError::Opacity { .. })));
        assert!(parse_opacity("NaN").is_err());
    }

    #[test]
    fn test_empty_opacity_counts_as_dim() {
        assert_eq!(parse_opacity(""), Ok(0.0));
        assert_eq!(parse_opacity("  "), Ok(0.0));
        let s = step(parse_opacity("").unwrap(), 1, 3);
        assert_eq!(s.opacity, Some(BRIGHT_OPACITY));
        assert_eq!(s.index, 1);
    }

    #[test]
    fn test_click_unregistered_leaves_surface_untouched() {
        let mut toggler: ItemToggler<u32> = ItemToggler::new();
        let mut surface = FakeSurface::bright("x.gif");
        let err = toggler.click(&7, &mut surface).unwrap_err();
        assert_eq!(err, TrackerError::Unregistered { key: "7".into() });
        assert_eq!(surface.opacity, BRIGHT_OPACITY);
        assert_eq!(surface.source, "x.gif");
    }

    #[test]
    fn test_set_variants_requires_registration() {
        let mut toggler: ItemToggler<&str> = ItemToggler::new();
        assert!(toggler.set_variants(&"sword", abc()).is_err());
        toggler.register("sword");
        toggler.set_variants(&"sword", abc()).unwrap();
        assert_eq!(toggler.progressive_count(), 1);
    }

    #[test]
    fn test_set_variants_resets_out_of_range_index() {
        let mut toggler: ItemToggler<&str> = ItemToggler::new();
        toggler.register("sword");
        toggler.set_variants(&"sword", abc()).unwrap();
        let mut surface = FakeSurface::bright("a.gif");
        toggler.click(&"sword", &mut surface).unwrap();
        toggler.click(&"sword", &mut surface).unwrap();
        assert_eq!(toggler.record(&"sword").unwrap().index, 2);
        toggler.set_variants(&"sword", vec!["z.gif".into()]).unwrap();
        assert_eq!(toggler.record(&"sword").unwrap().index, 0);
    }

    #[test]
    fn test_failed_source_write_keeps_record_and_opacity() {
        struct NoSource(f64);
        impl ItemSurface for NoSource {
            fn opacity(&self) -> Result<f64, TrackerError> {
                Ok(self.0)
            }
            fn set_opacity(&mut self, opacity: f64) -> Result<(), TrackerError> {
                self.0 = opacity;
                Ok(())
            }
            fn set_source(&mut self, _: &str) -> Result<(), TrackerError> {
                Err(TrackerError::Dom("src rejected".into()))
            }
        }

        let mut toggler: ItemToggler<&str> = ItemToggler::new();
        toggler.register("shield");
        toggler
            .set_variants(&"shield", vec!["s1.gif".into(), "s2.gif".into()])
            .unwrap();
        let mut surface = FakeSurface::bright("s1.gif");
        toggler.click(&"shield", &mut surface).unwrap();
        assert_eq!(toggler.record(&"shield").unwrap().index, 1);

        // the wrapping click would dim and reset; neither may happen
        let mut broken = NoSource(BRIGHT_OPACITY);
        assert!(matches!(
            toggler.click(&"shield", &mut broken),
            Err(TrackerError::Dom(_))
        ));
        assert_eq!(toggler.record(&"shield").unwrap().index, 1);
        assert_eq!(broken.0, BRIGHT_OPACITY);
    }

    #[test]
    fn test_register_resets_record() {
        let mut toggler: ItemToggler<&str> = ItemToggler::new();
        toggler.register("flute");
        toggler.set_variants(&"flute", abc()).unwrap();
        toggler.register("flute");
        assert_eq!(toggler.record(&"flute"), Some(&ItemRecord::default()));
        assert_eq!(toggler.len(), 1);
    }
}
