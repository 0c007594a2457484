//! Metric registry implementation.
//!
//! See [`Registry`] for details.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::error::GaugeError;
use crate::gauge::Gauge;
use crate::value::Value;

/// Errors returned by [`Registry`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A metric is already registered under this name.
    #[error("A metric named {0} already exists")]
    AlreadyRegistered(String),
}

/// A metric registry.
///
/// Gauges are registered under a unique name via [`Registry::register`] and
/// queried by name or by iterating a snapshot of the [`Registry`]. The
/// [`Registry`] is meant to be shared, e.g. as an `Arc<Registry>`, between
/// the code registering gauges and the code reporting them; all operations
/// take `&self`.
///
/// ```
/// # use managed_gauges::encoding::text::encode;
/// # use managed_gauges::gauge::ConstGauge;
/// # use managed_gauges::registry::Registry;
/// #
/// // Create a metric registry.
/// let registry = Registry::default();
///
/// registry.register("build.info", ConstGauge::new(1)).unwrap();
/// assert!(registry.register("build.info", ConstGauge::new(2)).is_err());
///
/// # // Encode all metrics in the registry in the text format.
/// # let mut buffer = String::new();
/// # encode(&mut buffer, &registry).unwrap();
/// #
/// # let expected = "# TYPE build_info gauge\n".to_owned() +
/// #                "build_info 1\n" +
/// #                "# EOF\n";
/// # assert_eq!(expected, buffer);
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    prefix: Option<String>,
    gauges: RwLock<BTreeMap<String, Arc<dyn Gauge>>>,
}

impl Registry {
    /// Creates a new default [`Registry`] with the given prefix.
    ///
    /// The prefix is joined to every registered name with a `.`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Default::default()
        }
    }

    /// Register a gauge with the [`Registry`].
    ///
    /// Fails if a gauge is already registered under the (prefixed) name; the
    /// existing gauge is left in place.
    pub fn register(&self, name: impl Into<String>, gauge: impl Gauge) -> Result<(), RegistryError> {
        self.register_arc(name, Arc::new(gauge))
    }

    /// Like [`Registry::register`] for an already shared gauge.
    pub fn register_arc(
        &self,
        name: impl Into<String>,
        gauge: Arc<dyn Gauge>,
    ) -> Result<(), RegistryError> {
        let name = self.full_name(name.into());

        let mut gauges = self.gauges.write();
        if gauges.contains_key(&name) {
            return Err(RegistryError::AlreadyRegistered(name));
        }
        gauges.insert(name, gauge);

        Ok(())
    }

    /// Remove the gauge registered via [`Registry::register`] under `name`,
    /// returning whether one was.
    ///
    /// The prefix is applied to `name` as on registration.
    pub fn unregister(&self, name: impl Into<String>) -> bool {
        let name = self.full_name(name.into());
        self.remove(&name)
    }

    /// Remove the gauge registered under `name`, returning whether one was.
    ///
    /// `name` is the full, prefixed name.
    pub fn remove(&self, name: &str) -> bool {
        self.gauges.write().remove(name).is_some()
    }

    /// The gauge registered under the full name `name`.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Gauge>> {
        self.gauges.read().get(name).cloned()
    }

    /// Query the gauge registered under the full name `name`.
    ///
    /// The registry lock is released before the gauge is queried.
    pub fn value(&self, name: &str) -> Option<Result<Value, GaugeError>> {
        self.get(name).map(|gauge| gauge.value())
    }

    /// Full names of all registered gauges, sorted.
    pub fn names(&self) -> Vec<String> {
        self.gauges.read().keys().cloned().collect()
    }

    /// Number of registered gauges.
    pub fn len(&self) -> usize {
        self.gauges.read().len()
    }

    /// Whether no gauge is registered.
    pub fn is_empty(&self) -> bool {
        self.gauges.read().is_empty()
    }

    /// Snapshot of all registered gauges, sorted by name.
    pub fn iter(&self) -> std::vec::IntoIter<(String, Arc<dyn Gauge>)> {
        self.gauges
            .read()
            .iter()
            .map(|(name, gauge)| (name.clone(), gauge.clone()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn full_name(&self, name: String) -> String {
        match &self.prefix {
            Some(prefix) => crate::naming::name(prefix, [name]),
            None => name,
        }
    }
}
