//! Explicit type metadata standing in for runtime reflection.
//!
//! A [`Class`] describes a managed type: its name and the [`Method`]s that
//! can be invoked on a type-erased instance of it. Classes are usually
//! generated by the [`managed`](crate::managed) attribute macro, but can be
//! assembled by hand with a [`ClassBuilder`].
//!
//! ```
//! # use managed_gauges::annotation::GaugeAnnotation;
//! # use managed_gauges::reflect::{Class, ClassBuilder};
//! # use managed_gauges::value::Value;
//! # use std::sync::Arc;
//! # use std::sync::atomic::{AtomicU64, Ordering};
//! #[derive(Default)]
//! struct Pool {
//!     active: AtomicU64,
//! }
//!
//! let class: Class = ClassBuilder::<Pool>::new("Pool")
//!     .getter("active", Some(GaugeAnnotation::default()), |p: &Pool| {
//!         p.active.load(Ordering::Relaxed)
//!     })
//!     .build();
//!
//! let pool = Arc::new(Pool::default());
//! pool.active.store(3, Ordering::Relaxed);
//!
//! let method = class.method("active", &[]).unwrap();
//! assert_eq!(Ok(Value::UInt(3)), method.invoke(&*pool, &[]));
//! ```

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::marker::PhantomData;
use std::sync::Arc;

use thiserror::Error;

use crate::annotation::GaugeAnnotation;
use crate::value::Value;

/// Failure to dispatch a reflective method call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    /// The target is not an instance of the method's declaring type.
    #[error("target is not an instance of {expected}")]
    TypeMismatch {
        /// Declaring type of the method.
        expected: &'static str,
        /// Runtime type of the target.
        actual: TypeId,
    },
    /// Wrong number of arguments.
    #[error("expected {expected} argument(s), got {actual}")]
    ArgumentCount {
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        actual: usize,
    },
    /// An argument could not be converted to the declared parameter type.
    #[error("argument {index} is not convertible to {expected}")]
    ArgumentType {
        /// Position of the offending argument.
        index: usize,
        /// Declared parameter type.
        expected: &'static str,
    },
}

/// Type-erased method body.
pub type Invoker =
    Arc<dyn Fn(&(dyn Any + Send + Sync), &[Value]) -> Result<Value, InvokeError> + Send + Sync>;

/// Whether a method needs an instance to be called on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// Called on an instance (`&self`).
    Instance,
    /// Associated function without receiver.
    Static,
}

/// Metadata and invoker of a single method.
#[derive(Clone)]
pub struct Method {
    name: Cow<'static, str>,
    declaring_type: &'static str,
    declaring_type_id: TypeId,
    parameter_types: Vec<Cow<'static, str>>,
    receiver: Receiver,
    gauge: Option<GaugeAnnotation>,
    invoker: Invoker,
}

impl std::fmt::Debug for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("declaring_type", &self.declaring_type)
            .field("parameter_types", &self.parameter_types)
            .field("receiver", &self.receiver)
            .field("gauge", &self.gauge)
            .finish()
    }
}

impl Method {
    /// Name of the method.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rust type name of the declaring type.
    pub fn declaring_type(&self) -> &'static str {
        self.declaring_type
    }

    /// Declared parameter types, receiver excluded.
    pub fn parameter_types(&self) -> &[Cow<'static, str>] {
        &self.parameter_types
    }

    /// Receiver kind.
    pub fn receiver(&self) -> Receiver {
        self.receiver
    }

    /// The gauge annotation, if the method carries one.
    pub fn gauge(&self) -> Option<&GaugeAnnotation> {
        self.gauge.as_ref()
    }

    /// Whether `target` is an instance of the declaring type.
    pub fn accepts(&self, target: &(dyn Any + Send + Sync)) -> bool {
        self.receiver == Receiver::Static || target.type_id() == self.declaring_type_id
    }

    /// Invoke the method on `target` with `args`.
    ///
    /// Static methods ignore `target`.
    pub fn invoke(&self, target: &(dyn Any + Send + Sync), args: &[Value]) -> Result<Value, InvokeError> {
        if args.len() != self.parameter_types.len() {
            return Err(InvokeError::ArgumentCount {
                expected: self.parameter_types.len(),
                actual: args.len(),
            });
        }
        (self.invoker)(target, args)
    }

    fn matches(&self, name: &str, parameter_types: &[&str]) -> bool {
        self.name == name
            && self.parameter_types.len() == parameter_types.len()
            && self
                .parameter_types
                .iter()
                .zip(parameter_types)
                .all(|(a, b)| a == b)
    }
}

/// Metadata of a managed type.
#[derive(Debug, Clone)]
pub struct Class {
    name: Cow<'static, str>,
    type_id: TypeId,
    methods: Vec<Arc<Method>>,
}

impl Class {
    /// Name used for metric naming, e.g. `Pool` or `app.db.Pool`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// [`TypeId`] of the described type.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// All methods, in declaration order.
    pub fn methods(&self) -> &[Arc<Method>] {
        &self.methods
    }

    /// Look a method up by name and exact parameter types.
    pub fn method(&self, name: &str, parameter_types: &[&str]) -> Option<&Arc<Method>> {
        self.methods
            .iter()
            .find(|m| m.matches(name, parameter_types))
    }
}

/// A type that exposes [`Class`] metadata and can be managed by a
/// [`Container`](crate::lifecycle::Container).
///
/// Usually implemented through [`managed`](crate::managed).
pub trait Managed: Any + Send + Sync {
    /// Metadata of the type.
    fn class() -> Class
    where
        Self: Sized;

    /// Initialization hook, run by the container after pre-init processors and
    /// before post-init processors.
    fn init(&self) {}
}

/// Builder for a [`Class`] describing `T`.
#[derive(Debug)]
pub struct ClassBuilder<T> {
    name: Cow<'static, str>,
    methods: Vec<Arc<Method>>,
    phantom: PhantomData<fn(&T)>,
}

impl<T: Any + Send + Sync> ClassBuilder<T> {
    /// Start describing `T` under the given name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            phantom: PhantomData,
        }
    }

    /// Add a zero-argument instance method.
    pub fn getter<F, R>(self, name: impl Into<Cow<'static, str>>, gauge: Option<GaugeAnnotation>, f: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        self.method(name, &[], gauge, move |this: &T, _: &[Value]| Ok(f(this).into()))
    }

    /// Add an instance method with parameters.
    ///
    /// The argument count is checked before `f` is called.
    pub fn method<F>(
        mut self,
        name: impl Into<Cow<'static, str>>,
        parameter_types: &[&'static str],
        gauge: Option<GaugeAnnotation>,
        f: F,
    ) -> Self
    where
        F: Fn(&T, &[Value]) -> Result<Value, InvokeError> + Send + Sync + 'static,
    {
        let invoker: Invoker = Arc::new(move |target: &(dyn Any + Send + Sync), args: &[Value]| {
            let this = target
                .downcast_ref::<T>()
                .ok_or_else(|| InvokeError::TypeMismatch {
                    expected: std::any::type_name::<T>(),
                    actual: target.type_id(),
                })?;
            f(this, args)
        });
        self.push(name, parameter_types, Receiver::Instance, gauge, invoker);
        self
    }

    /// Add an associated function without receiver.
    pub fn static_method<F>(
        mut self,
        name: impl Into<Cow<'static, str>>,
        parameter_types: &[&'static str],
        gauge: Option<GaugeAnnotation>,
        f: F,
    ) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, InvokeError> + Send + Sync + 'static,
    {
        let invoker: Invoker = Arc::new(move |_: &(dyn Any + Send + Sync), args: &[Value]| f(args));
        self.push(name, parameter_types, Receiver::Static, gauge, invoker);
        self
    }

    fn push(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        parameter_types: &[&'static str],
        receiver: Receiver,
        gauge: Option<GaugeAnnotation>,
        invoker: Invoker,
    ) {
        self.methods.push(Arc::new(Method {
            name: name.into(),
            declaring_type: std::any::type_name::<T>(),
            declaring_type_id: TypeId::of::<T>(),
            parameter_types: parameter_types.iter().map(|t| Cow::Borrowed(*t)).collect(),
            receiver,
            gauge,
            invoker,
        }));
    }

    /// Finish the [`Class`].
    pub fn build(self) -> Class {
        Class {
            name: self.name,
            type_id: TypeId::of::<T>(),
            methods: self.methods,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FromValue;
    use std::sync::atomic::{AtomicI64, Ordering};

    #[derive(Default)]
    struct Account {
        balance: AtomicI64,
    }

    fn class() -> Class {
        ClassBuilder::<Account>::new("Account")
            .getter("balance", Some(GaugeAnnotation::default()), |a: &Account| {
                a.balance.load(Ordering::Relaxed)
            })
            .method("deposit", &["i64"], None, |a: &Account, args: &[Value]| {
                let amount = i64::from_value(&args[0], 0)?;
                Ok(a.balance.fetch_add(amount, Ordering::Relaxed).into())
            })
            .static_method("currency", &[], None, |_| Ok("EUR".into()))
            .build()
    }

    #[test]
    fn lookup_by_name_and_parameter_types() {
        let class = class();
        assert_eq!("Account", class.name());
        assert_eq!(TypeId::of::<Account>(), class.type_id());
        assert_eq!(3, class.methods().len());

        assert!(class.method("balance", &[]).is_some());
        assert!(class.method("deposit", &["i64"]).is_some());
        assert!(class.method("deposit", &[]).is_none());
        assert!(class.method("deposit", &["u64"]).is_none());
        assert!(class.method("withdraw", &[]).is_none());
    }

    #[test]
    fn invoke_instance_and_static_methods() {
        let class = class();
        let account = Account::default();

        let deposit = class.method("deposit", &["i64"]).unwrap();
        deposit.invoke(&account, &[Value::Int(40)]).unwrap();
        deposit.invoke(&account, &[Value::UInt(2)]).unwrap();

        let balance = class.method("balance", &[]).unwrap();
        assert_eq!(Ok(Value::Int(42)), balance.invoke(&account, &[]));

        let currency = class.method("currency", &[]).unwrap();
        assert_eq!(Receiver::Static, currency.receiver());
        assert_eq!(Ok(Value::Text("EUR".into())), currency.invoke(&(), &[]));
    }

    #[test]
    fn invoke_rejects_wrong_target_and_arguments() {
        let class = class();
        let balance = class.method("balance", &[]).unwrap();

        assert!(!balance.accepts(&"not an account"));
        let err = balance.invoke(&"not an account", &[]).unwrap_err();
        assert!(matches!(err, InvokeError::TypeMismatch { .. }));
        assert_eq!(
            format!("target is not an instance of {}", std::any::type_name::<Account>()),
            err.to_string()
        );

        let deposit = class.method("deposit", &["i64"]).unwrap();
        assert_eq!(
            Err(InvokeError::ArgumentCount {
                expected: 1,
                actual: 0
            }),
            deposit.invoke(&Account::default(), &[])
        );
        assert!(matches!(
            deposit.invoke(&Account::default(), &[Value::Bool(true)]),
            Err(InvokeError::ArgumentType { index: 0, .. })
        ));
    }
}
