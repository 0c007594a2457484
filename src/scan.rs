//! Method scanning post-processor.
//!
//! [`AnnotationPostProcessor`] walks the methods of each bean's [`Class`] and
//! hands every method accepted by a [`MethodFilter`] to a [`MethodCallback`].

use crate::error::Error;
use crate::lifecycle::{Bean, Ordered, Phase, PostProcessor};
use crate::reflect::{Class, Method, Receiver};

/// Selects the methods a [`MethodCallback`] is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodFilter {
    /// Instance methods carrying a gauge annotation.
    GaugeInstanceMethods,
    /// Every method carrying a gauge annotation.
    GaugeMethods,
}

impl MethodFilter {
    /// Whether `method` passes the filter.
    pub fn matches(&self, method: &Method) -> bool {
        match self {
            MethodFilter::GaugeInstanceMethods => {
                method.gauge().is_some() && method.receiver() == Receiver::Instance
            }
            MethodFilter::GaugeMethods => method.gauge().is_some(),
        }
    }
}

/// Per-method callback driven by an [`AnnotationPostProcessor`].
pub trait MethodCallback: Ordered + std::fmt::Debug + Send + Sync {
    /// Methods to be handed to [`MethodCallback::with_method`].
    fn filter(&self) -> MethodFilter;

    /// Check one matching method of `bean` before any of them is handled.
    ///
    /// A failure refuses the bean without calling
    /// [`MethodCallback::with_method`] for any of its methods.
    fn validate(&self, _bean: &Bean, _class: &Class, _method: &Method) -> Result<(), Error> {
        Ok(())
    }

    /// Handle one matching method of `bean`, whose resolved type is `class`.
    fn with_method(&self, bean: &Bean, bean_name: &str, class: &Class, method: &Method) -> Result<(), Error>;

    /// Undo [`MethodCallback::with_method`] for a method of `bean` that was
    /// handled before a later method of the same bean failed.
    fn discard(&self, _bean: &Bean, _class: &Class, _method: &Method) {}
}

/// A [`PostProcessor`] dispatching matching methods to a [`MethodCallback`].
///
/// Its order is the order of the callback. Every matching method is
/// validated before the first one is handled, and a bean is either handled
/// completely or not at all.
#[derive(Debug)]
pub struct AnnotationPostProcessor<C> {
    phase: Phase,
    callback: C,
}

impl<C: MethodCallback> AnnotationPostProcessor<C> {
    /// Run `callback` in `phase`.
    pub fn new(phase: Phase, callback: C) -> Self {
        Self { phase, callback }
    }

    /// The wrapped callback.
    pub fn callback(&self) -> &C {
        &self.callback
    }
}

impl<C: MethodCallback> Ordered for AnnotationPostProcessor<C> {
    fn order(&self) -> i32 {
        self.callback.order()
    }
}

impl<C: MethodCallback> PostProcessor for AnnotationPostProcessor<C> {
    fn phase(&self) -> Phase {
        self.phase
    }

    fn process(&self, bean: &Bean) -> Result<(), Error> {
        let class = bean.class();
        let filter = self.callback.filter();
        let methods = class
            .methods()
            .iter()
            .filter(|m| filter.matches(m))
            .collect::<Vec<_>>();

        for method in &methods {
            self.callback.validate(bean, class, method)?;
        }

        for (handled, method) in methods.iter().enumerate() {
            if let Err(err) = self.callback.with_method(bean, bean.name(), class, method) {
                for method in methods[..handled].iter().rev() {
                    self.callback.discard(bean, class, method);
                }
                return Err(err);
            }
        }
        Ok(())
    }
}
