//! Managed object lifecycle.
//!
//! A [`Container`] creates [`Bean`]s from [`Managed`] instances. Creating a
//! bean runs every [`Phase::PreInit`] post-processor, then the instance's
//! [`Managed::init`] hook, then every [`Phase::PostInit`] post-processor.
//! Within a phase, post-processors run in ascending [`Ordered::order`].

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::Error;
use crate::reflect::{Class, Managed};

/// Order value of post-processors that must run first.
pub const HIGHEST_PRECEDENCE: i32 = i32::MIN;

/// Order value of post-processors that must run last.
pub const LOWEST_PRECEDENCE: i32 = i32::MAX;

/// Ordering key consumed by the [`Container`]. Smaller values run first.
pub trait Ordered {
    /// The order value. Defaults to `0`.
    fn order(&self) -> i32 {
        0
    }
}

/// Lifecycle phase a post-processor is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the instance's own [`Managed::init`] hook.
    PreInit,
    /// After the instance's own [`Managed::init`] hook.
    PostInit,
}

/// Hook invoked by the [`Container`] for every bean it creates.
pub trait PostProcessor: Ordered + std::fmt::Debug + Send + Sync {
    /// The phase this post-processor runs in.
    fn phase(&self) -> Phase;

    /// Process the bean. An error aborts creation of the bean.
    fn process(&self, bean: &Bean) -> Result<(), Error>;
}

/// A named, type-erased managed object together with its [`Class`].
#[derive(Clone)]
pub struct Bean {
    name: String,
    instance: Arc<dyn Any + Send + Sync>,
    class: Arc<Class>,
}

impl std::fmt::Debug for Bean {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bean")
            .field("name", &self.name)
            .field("class", &self.class.name())
            .finish()
    }
}

impl Bean {
    /// Wrap a [`Managed`] instance.
    pub fn new<T: Managed>(name: impl Into<String>, instance: Arc<T>) -> Self {
        Self {
            name: name.into(),
            instance,
            class: Arc::new(T::class()),
        }
    }

    /// Wrap an instance with an explicitly resolved [`Class`], which need not
    /// describe the instance's runtime type.
    pub fn with_class(
        name: impl Into<String>,
        instance: Arc<dyn Any + Send + Sync>,
        class: Arc<Class>,
    ) -> Self {
        Self {
            name: name.into(),
            instance,
            class,
        }
    }

    /// Name of the bean.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The managed instance.
    pub fn instance(&self) -> &Arc<dyn Any + Send + Sync> {
        &self.instance
    }

    /// The resolved class of the bean.
    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    /// Typed access to the instance.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.instance.clone().downcast::<T>().ok()
    }
}

/// Initialization coordinator running [`PostProcessor`]s over created beans.
///
/// ```
/// # use managed_gauges::lifecycle::Container;
/// # use managed_gauges::reflect::{Class, ClassBuilder, Managed};
/// #
/// struct Cache;
///
/// impl Managed for Cache {
///     fn class() -> Class {
///         ClassBuilder::<Cache>::new("Cache").build()
///     }
/// }
///
/// let mut container = Container::default();
/// container.register("cache", Cache).unwrap();
///
/// assert!(container.bean("cache").is_some());
/// assert!(container.register("cache", Cache).is_err());
/// ```
#[derive(Debug, Default)]
pub struct Container {
    post_processors: Vec<Box<dyn PostProcessor>>,
    beans: BTreeMap<String, Bean>,
}

impl Container {
    /// Add a post-processor. It applies to beans created afterwards.
    pub fn add_post_processor(&mut self, post_processor: impl PostProcessor + 'static) {
        self.post_processors.push(Box::new(post_processor));
        // Stable, so equal orders keep insertion order.
        self.post_processors.sort_by_key(|p| p.order());
    }

    /// Create a bean named `name` from `instance`.
    ///
    /// Fails if the name is taken or a post-processor fails; in both cases
    /// the bean is not added.
    pub fn register<T: Managed>(&mut self, name: impl Into<String>, instance: T) -> Result<Bean, Error> {
        let name = name.into();
        if self.beans.contains_key(&name) {
            return Err(Error::DuplicateBean(name));
        }

        let instance = Arc::new(instance);
        let bean = Bean::new(name, instance.clone());

        self.run(Phase::PreInit, &bean)?;
        instance.init();
        self.run(Phase::PostInit, &bean)?;

        self.beans.insert(bean.name().to_owned(), bean.clone());
        Ok(bean)
    }

    fn run(&self, phase: Phase, bean: &Bean) -> Result<(), Error> {
        for post_processor in self.post_processors.iter().filter(|p| p.phase() == phase) {
            tracing::trace!(bean = bean.name(), ?phase, ?post_processor, "Running post-processor.");
            post_processor
                .process(bean)
                .map_err(|source| Error::BeanCreation {
                    bean: bean.name().to_owned(),
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }

    /// The bean named `name`.
    pub fn bean(&self, name: &str) -> Option<&Bean> {
        self.beans.get(name)
    }

    /// Number of beans.
    pub fn len(&self) -> usize {
        self.beans.len()
    }

    /// Whether the container holds no beans.
    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }
}
