#![deny(dead_code)]
#![deny(missing_docs)]
#![deny(unused)]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

//! Gauges backed by methods of managed objects.
//!
//! Mark the state-reading methods of a type with `#[gauge]`, let a
//! [`Container`](lifecycle::Container) manage instances of it, and a
//! [`GaugeRegistrar`](registrar::GaugeRegistrar) registers each of those
//! methods as a gauge in a shared [`Registry`](registry::Registry) once the
//! instance is initialized. Every query of such a gauge calls the method on
//! the live instance.
//!
//! # Examples
//!
//! ```
//! use managed_gauges::encoding::text::encode;
//! use managed_gauges::lifecycle::Container;
//! use managed_gauges::managed;
//! use managed_gauges::registrar::GaugeRegistrar;
//! use managed_gauges::registry::Registry;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! #[derive(Default)]
//! struct ConnectionPool {
//!     open: AtomicU64,
//!     max: u64,
//! }
//!
//! // Describe the type. Methods marked with `#[gauge]` become gauges.
//! #[managed(name = "db.ConnectionPool")]
//! impl ConnectionPool {
//!     #[gauge]
//!     fn open(&self) -> u64 {
//!         self.open.load(Ordering::Relaxed)
//!     }
//!
//!     #[gauge(name = "utilization")]
//!     fn utilization(&self) -> f64 {
//!         self.open() as f64 / self.max as f64
//!     }
//! }
//!
//! // Create a metric registry, shared with whoever reports it.
//! let registry = Arc::new(Registry::default());
//!
//! // Gauges are registered once a managed object is initialized.
//! let mut container = Container::default();
//! container.add_post_processor(GaugeRegistrar::post_processor(registry.clone()));
//!
//! let pool = ConnectionPool { max: 4, ..Default::default() };
//! let bean = container.register("pool", pool).unwrap();
//!
//! // Somewhere in your business logic.
//! bean.downcast::<ConnectionPool>().unwrap().open.store(1, Ordering::Relaxed);
//!
//! // Encode all gauges in the registry in the text format.
//! let mut buffer = String::new();
//! encode(&mut buffer, &registry).unwrap();
//!
//! let expected = "# TYPE db_ConnectionPool_open gauge\n".to_owned() +
//!                "db_ConnectionPool_open 1\n" +
//!                "# TYPE db_ConnectionPool_utilization gauge\n" +
//!                "db_ConnectionPool_utilization 0.25\n" +
//!                "# EOF\n";
//! assert_eq!(expected, buffer);
//! ```

pub mod annotation;
pub mod encoding;
pub mod error;
pub mod gauge;
pub mod lifecycle;
pub mod naming;
pub mod reflect;
pub mod registrar;
pub mod registry;
pub mod scan;
pub mod value;

/// Describe the methods of an inherent `impl` block as a
/// [`Class`](reflect::Class), implementing [`Managed`](reflect::Managed).
///
/// See the crate level documentation for an example.
pub use managed_gauges_derive::managed;
