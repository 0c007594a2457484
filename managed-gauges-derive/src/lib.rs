#![deny(missing_docs)]
#![forbid(unsafe_code)]

//! This crate provides the `#[managed]` attribute macro for
//! [`managed_gauges`](https://docs.rs/managed-gauges).
mod managed;

use proc_macro::TokenStream as TokenStream1;
use proc_macro2::TokenStream as TokenStream2;
use syn::Error;

type Result<T> = std::result::Result<T, Error>;

#[proc_macro_attribute]
/// Implements `managed_gauges::reflect::Managed` for the self type of an
/// inherent `impl` block.
/// ```rust
/// use managed_gauges::managed;
/// use managed_gauges::reflect::Managed;
/// use std::sync::atomic::{AtomicU64, Ordering};
///
/// struct Server {
///     requests: AtomicU64,
/// }
///
/// #[managed]
/// impl Server {
///     /// Number of HTTP requests received
///     #[gauge]
///     fn requests(&self) -> u64 {
///         self.requests.load(Ordering::Relaxed)
///     }
///
///     #[gauge(name = "server.up", absolute)]
///     fn up(&self) -> bool {
///         true
///     }
/// }
///
/// let class = Server::class();
/// assert_eq!("Server", class.name());
/// assert_eq!(2, class.methods().len());
/// ```
///
/// Arguments of `#[managed(...)]`:
/// - `name = "..."`: Type name used for metric naming. Defaults to the name of
///   the self type.
/// - `init = "..."`: Method called as the `Managed::init` hook.
///
/// Arguments of `#[gauge(...)]` on a method:
/// - `name = "..."`: Explicit metric name, prefixed with the type name.
/// - `absolute`: Use the explicit name as is.
///
/// Gauge methods take `&self`. Additional parameters are recorded, and
/// rejected when the gauge is registered.
pub fn managed(attr: TokenStream1, item: TokenStream1) -> TokenStream1 {
    match managed::managed_impl(attr.into(), item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
