//! Registration of `#[gauge]` methods as gauges.
//!
//! See [`GaugeRegistrar`] for details.

use std::any::Any;
use std::sync::Arc;

use crate::error::{Error, GaugeError};
use crate::gauge::Gauge;
use crate::lifecycle::{Bean, Ordered, Phase, LOWEST_PRECEDENCE};
use crate::naming::gauge_name;
use crate::reflect::{Class, Method};
use crate::registry::Registry;
use crate::scan::{AnnotationPostProcessor, MethodCallback, MethodFilter};
use crate::value::Value;

/// Registers every zero-argument `#[gauge]` instance method of a bean as a
/// [`MethodGauge`] in a shared [`Registry`].
///
/// Runs in [`Phase::PostInit`] with [`LOWEST_PRECEDENCE`], i.e. after every
/// other post-processor, so gauges only observe fully initialized beans.
///
/// ```
/// # use managed_gauges::lifecycle::Container;
/// # use managed_gauges::managed;
/// # use managed_gauges::registrar::GaugeRegistrar;
/// # use managed_gauges::registry::Registry;
/// # use managed_gauges::value::Value;
/// # use std::sync::Arc;
/// # use std::sync::atomic::{AtomicU32, Ordering};
/// #[derive(Default)]
/// struct Pool {
///     active: AtomicU32,
/// }
///
/// #[managed]
/// impl Pool {
///     #[gauge]
///     fn active(&self) -> u32 {
///         self.active.load(Ordering::Relaxed)
///     }
/// }
///
/// let registry = Arc::new(Registry::default());
/// let mut container = Container::default();
/// container.add_post_processor(GaugeRegistrar::post_processor(registry.clone()));
///
/// let bean = container.register("pool", Pool::default()).unwrap();
/// bean.downcast::<Pool>().unwrap().active.store(4, Ordering::Relaxed);
///
/// assert_eq!(Some(Ok(Value::UInt(4))), registry.value("Pool.active"));
/// ```
#[derive(Debug, Clone)]
pub struct GaugeRegistrar {
    registry: Arc<Registry>,
}

impl GaugeRegistrar {
    /// Creates a new [`GaugeRegistrar`] registering into `registry`.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// The registrar wrapped in a post-init [`AnnotationPostProcessor`],
    /// ready to be added to a [`Container`](crate::lifecycle::Container).
    pub fn post_processor(registry: Arc<Registry>) -> AnnotationPostProcessor<Self> {
        AnnotationPostProcessor::new(Phase::PostInit, Self::new(registry))
    }

    /// The registry gauges are registered with.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    fn name(class: &Class, method: &Method) -> String {
        let annotation = method.gauge().cloned().unwrap_or_default();
        gauge_name(class, method, &annotation)
    }
}

impl Ordered for GaugeRegistrar {
    fn order(&self) -> i32 {
        LOWEST_PRECEDENCE
    }
}

impl MethodCallback for GaugeRegistrar {
    fn filter(&self) -> MethodFilter {
        MethodFilter::GaugeInstanceMethods
    }

    fn validate(&self, _bean: &Bean, _class: &Class, method: &Method) -> Result<(), Error> {
        if !method.parameter_types().is_empty() {
            return Err(Error::Configuration(format!(
                "Method {} is annotated with #[gauge] but requires parameters.",
                method.name()
            )));
        }
        Ok(())
    }

    fn with_method(&self, bean: &Bean, _bean_name: &str, class: &Class, method: &Method) -> Result<(), Error> {
        self.validate(bean, class, method)?;

        let name = Self::name(class, method);
        let gauge = MethodGauge::new(bean.instance().clone(), Arc::new(method.clone()));
        self.registry.register(name.clone(), gauge)?;

        tracing::debug!(
            "Created gauge {} for method {}.{}",
            name,
            class.name(),
            method.name()
        );

        Ok(())
    }

    fn discard(&self, _bean: &Bean, class: &Class, method: &Method) {
        let name = Self::name(class, method);
        if self.registry.unregister(&name) {
            tracing::debug!("Removed gauge {}", name);
        }
    }
}

/// A [`Gauge`] invoking a zero-argument method on a managed instance each
/// time it is queried.
#[derive(Clone)]
pub struct MethodGauge {
    target: Arc<dyn Any + Send + Sync>,
    method: Arc<Method>,
}

impl MethodGauge {
    /// Bind `method` to `target`.
    pub fn new(target: Arc<dyn Any + Send + Sync>, method: Arc<Method>) -> Self {
        Self { target, method }
    }

    /// The bound method.
    pub fn method(&self) -> &Method {
        &self.method
    }
}

impl std::fmt::Debug for MethodGauge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodGauge")
            .field("declaring_type", &self.method.declaring_type())
            .field("method", &self.method.name())
            .finish()
    }
}

impl Gauge for MethodGauge {
    fn value(&self) -> Result<Value, GaugeError> {
        Ok(self.method.invoke(&*self.target, &[])?)
    }
}
