//! Module defining the gauge abstraction.
//!
//! See [`Gauge`] for details.

use crate::error::GaugeError;
use crate::value::Value;

/// A metric whose value is computed on demand.
///
/// Implementations are queried by the [`Registry`](crate::registry::Registry)
/// and its encoders, possibly from several threads at once, and must not
/// cache values between queries.
///
/// ```
/// # use managed_gauges::gauge::{FnGauge, Gauge};
/// # use managed_gauges::value::Value;
/// # use std::sync::Arc;
/// # use std::sync::atomic::{AtomicI64, Ordering};
/// let queue_depth = Arc::new(AtomicI64::new(0));
/// let gauge = FnGauge::new({
///     let queue_depth = queue_depth.clone();
///     move || Ok(queue_depth.load(Ordering::Relaxed).into())
/// });
///
/// queue_depth.store(12, Ordering::Relaxed);
/// assert_eq!(Ok(Value::Int(12)), gauge.value());
/// ```
pub trait Gauge: std::fmt::Debug + Send + Sync + 'static {
    /// Compute the current value.
    fn value(&self) -> Result<Value, GaugeError>;
}

/// A [`Gauge`] backed by a closure.
pub struct FnGauge<F> {
    f: F,
}

impl<F> FnGauge<F>
where
    F: Fn() -> Result<Value, GaugeError> + Send + Sync + 'static,
{
    /// Creates a new [`FnGauge`].
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> std::fmt::Debug for FnGauge<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnGauge").finish_non_exhaustive()
    }
}

impl<F> Gauge for FnGauge<F>
where
    F: Fn() -> Result<Value, GaugeError> + Send + Sync + 'static,
{
    fn value(&self) -> Result<Value, GaugeError> {
        (self.f)()
    }
}

/// As a [`Gauge`], but constant, meaning it cannot change once created.
#[derive(Debug, Clone)]
pub struct ConstGauge {
    value: Value,
}

impl ConstGauge {
    /// Creates a new [`ConstGauge`].
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Gauge for ConstGauge {
    fn value(&self) -> Result<Value, GaugeError> {
        Ok(self.value.clone())
    }
}
