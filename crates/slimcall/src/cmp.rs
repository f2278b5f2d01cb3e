//! Comparison of [`Delegate`]s and [`MethodRef`]s.
//!
//! Neither type implements [`PartialOrd`] or [`Ord`], since their order depends on where the
//! compiler and linker happened to place each trampoline. When an order is still needed, this
//! module makes the choice explicit: [`Equal`] and [`Less`] are predicates that can be passed
//! around like any other value, and [`ByAddress`] wraps a value so it can be used as a key in
//! ordered collections.
//!
//! ```
//! use slimcall::cmp::ByAddress;
//! use slimcall::Delegate;
//! use std::collections::BTreeMap;
//!
//! struct Light {
//!     level: u8,
//! }
//!
//! impl Light {
//!     fn level(&self) -> u8 {
//!         self.level
//!     }
//! }
//!
//! let kitchen = Light { level: 3 };
//! let hallway = Light { level: 7 };
//!
//! let mut names = BTreeMap::new();
//! names.insert(ByAddress(Delegate::<fn() -> u8>::from_method(&kitchen, Light::level)), "kitchen");
//! names.insert(ByAddress(Delegate::<fn() -> u8>::from_method(&hallway, Light::level)), "hallway");
//!
//! let lookup = ByAddress(Delegate::<fn() -> u8>::from_method(&hallway, Light::level));
//! assert_eq!(names.len(), 2);
//! assert_eq!(names[&lookup], "hallway");
//! ```
//!
//! [`Delegate`]: crate::Delegate
//! [`MethodRef`]: crate::MethodRef

use crate::{Access, Delegate, MethodRef, Signature};
use core::cmp::Ordering;

/// Types with an arbitrary total order derived from the addresses they contain.
///
/// The order is consistent within a single execution of a program, but may differ between
/// builds.
pub trait AddressOrder {
    /// Compares two values by address.
    fn address_cmp(&self, other: &Self) -> Ordering;

    /// Returns `true` if both values have the same addresses.
    fn address_eq(&self, other: &Self) -> bool {
        self.address_cmp(other).is_eq()
    }
}

impl<S: Signature> AddressOrder for Delegate<'_, S> {
    fn address_cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }

    fn address_eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T, S: Signature, A: Access> AddressOrder for MethodRef<T, S, A> {
    fn address_cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }

    fn address_eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T: AddressOrder + ?Sized> AddressOrder for &T {
    fn address_cmp(&self, other: &Self) -> Ordering {
        T::address_cmp(self, other)
    }

    fn address_eq(&self, other: &Self) -> bool {
        T::address_eq(self, other)
    }
}

/// A binary predicate over two values of the same type.
pub trait Predicate<T: ?Sized> {
    /// Applies the predicate.
    fn test(&self, lhs: &T, rhs: &T) -> bool;
}

/// Predicate that is `true` when both values are equal by address.
#[derive(Clone, Copy, Debug, Default)]
pub struct Equal;

/// Predicate that is `true` when the left value comes before the right value in the order
/// given by [`AddressOrder`].
///
/// ```
/// use slimcall::cmp::{Less, Predicate};
/// use slimcall::Delegate;
///
/// let null = Delegate::<fn() -> bool>::NULL;
/// let bound = Delegate::<fn() -> bool>::from_fn(|| true);
/// assert!(Less.test(&null, &bound));
/// assert!(!Less.test(&bound, &null));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Less;

impl<T: AddressOrder + ?Sized> Predicate<T> for Equal {
    fn test(&self, lhs: &T, rhs: &T) -> bool {
        lhs.address_eq(rhs)
    }
}

impl<T: AddressOrder + ?Sized> Predicate<T> for Less {
    fn test(&self, lhs: &T, rhs: &T) -> bool {
        lhs.address_cmp(rhs).is_lt()
    }
}

/// Implements [`Ord`] for a value using its [`AddressOrder`].
#[derive(Clone, Copy, Default)]
#[repr(transparent)]
pub struct ByAddress<T>(pub T);

impl<T> ByAddress<T> {
    /// Gets the wrapped value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> core::ops::Deref for ByAddress<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: AddressOrder> PartialEq for ByAddress<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.address_eq(&other.0)
    }
}

impl<T: AddressOrder> Eq for ByAddress<T> {}

impl<T: AddressOrder> PartialOrd for ByAddress<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: AddressOrder> Ord for ByAddress<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.address_cmp(&other.0)
    }
}

impl<T: core::hash::Hash> core::hash::Hash for ByAddress<T> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for ByAddress<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("ByAddress").field(&self.0).finish()
    }
}
