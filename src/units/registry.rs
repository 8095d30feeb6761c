// ============================================================================
// Unit Registry
// Lookup by name or abbreviation, with on-demand prefixed units
// ============================================================================

use super::{standard, MetricPrefix, Units};
use crate::quantity::{QuantityError, QuantityResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

static STANDARD: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::with_standard_units);

/// A set of named units.
///
/// Exact names and abbreviations are matched first. Failing that, the key is
/// split into a metric prefix and a metric base unit (`"km"`, `"milliseconds"`)
/// and the derived unit is built once and cached. The cache is the only
/// mutable state and sits behind a read-write lock, so a registry can be
/// shared across threads.
#[derive(Debug, Default)]
pub struct UnitRegistry {
    units: Vec<Arc<Units>>,
    derived: RwLock<HashMap<String, Arc<Units>>>,
}

impl UnitRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every unit in [`standard`]
    pub fn with_standard_units() -> Self {
        let mut registry = Self::new();
        for unit in standard::all() {
            registry.register(unit);
        }
        registry
    }

    /// Process-wide registry of the standard units
    pub fn standard() -> &'static UnitRegistry {
        &STANDARD
    }

    /// Add a unit. Earlier registrations win on conflicting keys.
    pub fn register(&mut self, unit: Arc<Units>) {
        self.units.push(unit);
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Number of prefixed units built so far
    pub fn cached_len(&self) -> usize {
        self.derived.read().len()
    }

    /// Find a unit by name, singular, abbreviation or prefixed form.
    pub fn lookup(&self, key: &str) -> Option<Arc<Units>> {
        if key.is_empty() {
            return None;
        }
        if let Some(unit) = self.units.iter().find(|u| u.matches(key)) {
            return Some(Arc::clone(unit));
        }
        if let Some(unit) = self.derived.read().get(key) {
            return Some(Arc::clone(unit));
        }

        let unit = Arc::new(self.derive_prefixed(key)?);
        tracing::debug!(key, unit = %unit.name(), "derived and cached prefixed unit");
        let mut derived = self.derived.write();
        let unit = derived.entry(key.to_string()).or_insert(unit);
        Some(Arc::clone(unit))
    }

    /// Like [`lookup`](Self::lookup), failing with `UnknownUnit`.
    ///
    /// # Errors
    /// Returns `UnknownUnit` when nothing matches `key`.
    pub fn get(&self, key: &str) -> QuantityResult<Arc<Units>> {
        self.lookup(key)
            .ok_or_else(|| QuantityError::UnknownUnit(key.to_string()))
    }

    fn derive_prefixed(&self, key: &str) -> Option<Units> {
        MetricPrefix::ALL.into_iter().find_map(|prefix| {
            let by_name = key.strip_prefix(prefix.name()).and_then(|rest| {
                self.metric_bases()
                    .find(|u| u.name() == rest || u.singular() == rest)
            });
            let by_symbol = || {
                let rest = key.strip_prefix(prefix.symbol()).or_else(|| match prefix {
                    MetricPrefix::Micro => key.strip_prefix('u'),
                    _ => None,
                })?;
                self.metric_bases().find(|u| {
                    u.abbreviation() == rest || u.alt_abbreviation() == Some(rest)
                })
            };
            by_name
                .or_else(by_symbol)
                .and_then(|base| base.with_prefix(prefix).ok())
        })
    }

    fn metric_bases(&self) -> impl Iterator<Item = &Arc<Units>> {
        self.units.iter().filter(|u| u.is_metric_base())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimensions;
    use crate::numeric::Number;

    #[test]
    fn test_exact_lookup() {
        let registry = UnitRegistry::with_standard_units();
        assert_eq!(registry.lookup("m").unwrap().name(), "meters");
        assert_eq!(registry.lookup("meter").unwrap().name(), "meters");
        assert_eq!(registry.lookup("kg").unwrap().name(), "kilograms");
        assert_eq!(registry.lookup("min").unwrap().name(), "minutes");
        assert_eq!(registry.lookup("nmi").unwrap().name(), "nautical miles");
        assert_eq!(registry.cached_len(), 0);
    }

    #[test]
    fn test_prefixed_lookup_is_cached() {
        let registry = UnitRegistry::with_standard_units();

        let km = registry.lookup("km").unwrap();
        assert_eq!(km.name(), "kilometers");
        assert_eq!(km.to_base(&Number::from(5)), Number::from(5000));
        assert_eq!(registry.cached_len(), 1);

        let again = registry.lookup("km").unwrap();
        assert!(Arc::ptr_eq(&km, &again));
        assert_eq!(registry.cached_len(), 1);

        let ms = registry.lookup("milliseconds").unwrap();
        assert_eq!(ms.abbreviation(), "ms");
        assert_eq!(ms.dimensions(), Dimensions::TIME);
    }

    #[test]
    fn test_micro_aliases() {
        let registry = UnitRegistry::with_standard_units();
        let a = registry.lookup("µs").unwrap();
        let b = registry.lookup("us").unwrap();
        assert_eq!(a.conv_to_mks(), b.conv_to_mks());
        assert_eq!(b.name(), "microseconds");
    }

    #[test]
    fn test_non_metric_units_take_no_prefix() {
        let registry = UnitRegistry::with_standard_units();
        assert!(registry.lookup("kmin").is_none());
        assert!(registry.lookup("kilohours").is_none());
        assert!(matches!(
            registry.get("furlongs"),
            Err(QuantityError::UnknownUnit(_))
        ));
        assert!(registry.lookup("").is_none());
    }

    #[test]
    fn test_shared_standard_registry() {
        let a = UnitRegistry::standard();
        let b = UnitRegistry::standard();
        assert!(std::ptr::eq(a, b));
        assert!(a.len() > 20);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    UnitRegistry::standard()
                        .lookup("GW")
                        .map(|u| u.name().to_string())
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().as_deref(), Some("gigawatts"));
        }
    }
}
