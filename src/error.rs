//! Error types.

use thiserror::Error;

use crate::reflect::InvokeError;
use crate::registry::RegistryError;

/// Errors raised while creating managed objects and registering their gauges.
#[derive(Debug, Error)]
pub enum Error {
    /// A managed type is misconfigured, e.g. a `#[gauge]` method takes
    /// parameters.
    #[error("{0}")]
    Configuration(String),
    /// The metric registry refused a registration.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// A bean with this name is already managed by the container.
    #[error("a bean named {0} already exists")]
    DuplicateBean(String),
    /// A post-processor failed while creating a bean.
    #[error("error creating bean {bean}: {source}")]
    BeanCreation {
        /// Name of the bean.
        bean: String,
        /// Underlying failure.
        #[source]
        source: Box<Error>,
    },
}

/// Errors raised when a gauge is queried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GaugeError {
    /// The gauge could not dispatch to its accessor.
    #[error("illegal argument: {0}")]
    IllegalArgument(#[from] InvokeError),
}
