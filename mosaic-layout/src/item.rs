//! Layout items.

use mosaic_api::{normalize_ratio, ItemId, Ratio};
use serde::Serialize;

/// An item to be laid out: an id, an intrinsic aspect ratio and a payload the
/// layout never looks at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item<P> {
    pub id: ItemId,
    ratio: f64,
    pub payload: P,
}

impl<P> Item<P> {
    /// Create an item with a raw width/height ratio.
    ///
    /// The ratio is stored as given; [`Item::ratio`] applies the fallback.
    pub fn new(id: impl Into<ItemId>, ratio: f64, payload: P) -> Self {
        Self {
            id: id.into(),
            ratio,
            payload,
        }
    }

    /// Create an item from a measured ratio.
    pub fn with_ratio(id: impl Into<ItemId>, ratio: Ratio, payload: P) -> Self {
        Self::new(id, ratio.value(), payload)
    }

    /// Create an item whose ratio is not known yet (laid out as a square).
    pub fn unmeasured(id: impl Into<ItemId>, payload: P) -> Self {
        Self::new(id, 1.0, payload)
    }

    /// Effective aspect ratio used by the layout.
    ///
    /// Unknown, non-positive and non-finite ratios count as 1.
    #[inline]
    pub fn ratio(&self) -> f64 {
        normalize_ratio(self.ratio)
    }

    /// The ratio exactly as it was supplied.
    pub fn raw_ratio(&self) -> f64 {
        self.ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_fallback() {
        assert_eq!(Item::new("a", 1.5, ()).ratio(), 1.5);
        assert_eq!(Item::new("b", 0.0, ()).ratio(), 1.0);
        assert_eq!(Item::new("c", -3.0, ()).ratio(), 1.0);
        assert_eq!(Item::new("d", f64::NAN, ()).ratio(), 1.0);
        assert!(Item::new("d", f64::NAN, ()).raw_ratio().is_nan());
    }

    #[test]
    fn test_with_measured_ratio() {
        let item = Item::with_ratio("wide", Ratio::new(16, 9).unwrap(), ());
        assert_eq!(item.ratio(), 16.0 / 9.0);
        assert_eq!(Item::unmeasured("sq", ()).ratio(), 1.0);
    }
}
