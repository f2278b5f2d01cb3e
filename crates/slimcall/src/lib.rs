//! Two-word, non-owning references to callables.
//!
//! A [`Delegate`] stores a pointer to a *trampoline* function and an opaque *context*, and
//! nothing else. Binding a delegate picks the trampoline that knows how to turn the context back
//! into the bound callable, so calling it costs exactly one indirect call on top of the call
//! to the target. No heap allocation or `dyn` vtable is involved.
//!
//! Delegates can refer to:
//! - free functions and non-capturing closures known at compile time ([`Delegate::from_fn()`]),
//! - function pointers selected at run time ([`Delegate::from_fn_ptr()`]),
//! - methods bound to an object ([`Delegate::from_method()`]),
//! - closures and other functors, by reference ([`Delegate::from_functor()`]),
//! - free functions taking the object as their first argument ([`Delegate::from_object_fn()`]),
//! - C style callbacks receiving an opaque `*mut ()` ([`Delegate::from_context_fn()`]).
//!
//! A [`MethodRef`] names a method without an object, so it can be picked once and bound to many
//! objects later.
//!
//! # Example
//!
//! ```
//! use slimcall::Delegate;
//!
//! fn triple(x: i32) -> i32 {
//!     x * 3
//! }
//!
//! let factor = 5;
//! let times_factor = move |x: i32| x * factor;
//!
//! let mut callback = Delegate::<fn(i32) -> i32>::from_fn(triple);
//! assert_eq!(callback.call(7), 21);
//!
//! callback.set_functor(&times_factor);
//! assert_eq!(callback.call(7), 35);
//!
//! callback.clear();
//! assert_eq!(callback.call(7), 0);
//! ```
//!
//! # Feature Flags
//!
//! ## `std`
//!
//! Enables a dependency on the Rust standard library, which is used to implement
//! `std::error::Error` for [`NullPointerError`].
//!
//! - Enabled by: `default`
//!
//! ## `log`
//!
//! Emits [`log`] records at the `trace` level whenever an existing [`Delegate`] is rebound or
//! cleared.
//!
//! [`log`]: https://docs.rs/log

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![deny(unreachable_pub)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::exhaustive_enums)]
#![deny(clippy::missing_safety_doc)]
#![deny(clippy::alloc_instead_of_core)]
#![deny(clippy::std_instead_of_core)]

#[cfg(feature = "std")]
extern crate std;

/// Invokes the given macro once for every supported number of call arguments.
macro_rules! with_parameters {
    ($macro:ident) => {
        $macro!((); 0);
        $macro!((a0: A0); 1);
        $macro!((a0: A0, a1: A1); 2);
        $macro!((a0: A0, a1: A1, a2: A2); 3);
        $macro!((a0: A0, a1: A1, a2: A2, a3: A3); 4);
        $macro!((a0: A0, a1: A1, a2: A2, a3: A3, a4: A4); 5);
        $macro!((a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5); 6);
        $macro!((a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6); 7);
        $macro!((a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7); 8);
        $macro!((a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7, a8: A8); 9);
    };
}

pub(crate) use with_parameters;

pub mod adapter;
pub mod cmp;
mod delegate;
mod error;
mod invoke;
mod method_ref;
mod raw;
mod signature;

pub use delegate::Delegate;
pub use error::NullPointerError;
pub use method_ref::{Access, Exclusive, MethodRef, Shared};
pub use raw::RawContext;
pub use signature::Signature;

/// Creates a [`Delegate`] calling a method with a shared receiver on the given object.
///
/// This expands to a call to [`Delegate::from_method()`], with the signature taken from the
/// first argument.
///
/// # Example
///
/// ```
/// struct Sensor {
///     offset: i32,
/// }
///
/// impl Sensor {
///     fn read(&self, raw: i32) -> i32 {
///         raw + self.offset
///     }
/// }
///
/// let sensor = Sensor { offset: -4 };
/// let read = slimcall::delegate!(fn(i32) -> i32, Sensor::read, &sensor);
/// assert_eq!(read.call(10), 6);
/// ```
#[macro_export]
macro_rules! delegate {
    ($signature:ty, $method:expr, $object:expr $(,)?) => {
        $crate::Delegate::<$signature>::from_method($object, $method)
    };
}
