//! Gauge annotation metadata.

/// Metadata attached to a method marked with `#[gauge]`.
///
/// ```
/// # use managed_gauges::annotation::GaugeAnnotation;
/// let plain = GaugeAnnotation::default();
/// assert_eq!(None, plain.name());
///
/// let renamed = GaugeAnnotation::default().named("pool.size").absolute(true);
/// assert_eq!(Some("pool.size"), renamed.name());
/// assert!(renamed.is_absolute());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GaugeAnnotation {
    name: Option<String>,
    absolute: bool,
}

impl GaugeAnnotation {
    /// Set an explicit metric name. An empty name counts as no name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.is_empty() { None } else { Some(name) };
        self
    }

    /// Use the explicit name verbatim instead of prefixing it with the type name.
    pub fn absolute(mut self, absolute: bool) -> Self {
        self.absolute = absolute;
        self
    }

    /// The explicit metric name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether the explicit name is used verbatim.
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }
}
