//! Methods chosen ahead of time, without an object to call them on.

use crate::adapter::{ObjectFn, ObjectFnMut};
use crate::Signature;
use core::marker::PhantomData;

mod sealed {
    #[allow(unreachable_pub)]
    pub trait Sealed {}
}

/// Indicates whether the receiver of a [`MethodRef`] is borrowed as `&T` ([`Shared`]) or as
/// `&mut T` ([`Exclusive`]).
pub trait Access: sealed::Sealed {
    /// `true` for [`Exclusive`], `false` for [`Shared`].
    const EXCLUSIVE: bool;
}

/// Marks a [`MethodRef`] to a method taking `&self`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Shared;

/// Marks a [`MethodRef`] to a method taking `&mut self`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Exclusive;

impl sealed::Sealed for Shared {}

impl sealed::Sealed for Exclusive {}

impl Access for Shared {
    const EXCLUSIVE: bool = false;
}

impl Access for Exclusive {
    const EXCLUSIVE: bool = true;
}

/// Refers to a method of `T` callable with the signature `S`, without referring to an object.
///
/// A [`MethodRef`] is picked once, then combined with any number of objects later using
/// [`Delegate::from_method_ref()`] or [`Delegate::from_method_ref_mut()`]. It is the size of a
/// single pointer.
///
/// Whether the method takes `&self` or `&mut self` is tracked by `A`. A [`Shared`] method can be
/// combined with a `&T`, or with a `&mut T` that is reborrowed. An [`Exclusive`] method can only
/// be combined with a `&mut T`.
///
/// ```
/// use slimcall::{Delegate, MethodRef};
///
/// struct Channel {
///     gain: i32,
/// }
///
/// impl Channel {
///     fn apply(&self, sample: i32) -> i32 {
///         sample * self.gain
///     }
/// }
///
/// let apply = MethodRef::<Channel, fn(i32) -> i32>::new(Channel::apply);
/// let left = Channel { gain: 2 };
/// let right = Channel { gain: 3 };
///
/// let mut output = Delegate::from_method_ref(apply, &left);
/// assert_eq!(output.call(10), 20);
///
/// output.set_method_ref(apply, &right);
/// assert_eq!(output.call(10), 30);
/// assert_eq!(output, Delegate::from_method(&right, Channel::apply));
/// ```
///
/// [`Delegate::from_method_ref()`]: crate::Delegate::from_method_ref()
/// [`Delegate::from_method_ref_mut()`]: crate::Delegate::from_method_ref_mut()
pub struct MethodRef<T, S: Signature, A: Access = Shared> {
    pub(crate) trampoline: Option<S::Trampoline>,
    _marker: PhantomData<fn(&T) -> A>,
}

impl<T, S: Signature> MethodRef<T, S, Shared> {
    /// Refers to a method taking `&self`, or a closure that captures nothing and takes `&T` as its
    /// first argument.
    pub const fn new<M: ObjectFn<T, S>>(method: M) -> Self {
        let _ = method;
        Self::with_trampoline(M::METHOD)
    }
}

impl<T, S: Signature> MethodRef<T, S, Exclusive> {
    /// Refers to a method taking `&mut self`, or a closure that captures nothing and takes
    /// `&mut T` as its first argument.
    pub const fn new_mut<M: ObjectFnMut<T, S>>(method: M) -> Self {
        let _ = method;
        Self::with_trampoline(M::METHOD)
    }
}

impl<T, S: Signature, A: Access> MethodRef<T, S, A> {
    /// A [`MethodRef`] that refers to no method. Combining it with an object results in a
    /// [`NULL`] delegate.
    ///
    /// [`NULL`]: crate::Delegate::NULL
    pub const NULL: Self = Self {
        trampoline: None,
        _marker: PhantomData,
    };

    const fn with_trampoline(trampoline: S::Trampoline) -> Self {
        Self {
            trampoline: Some(trampoline),
            _marker: PhantomData,
        }
    }

    /// Returns `true` if this is the [`NULL`] method reference.
    ///
    /// [`NULL`]: MethodRef::NULL
    pub const fn is_null(&self) -> bool {
        self.trampoline.is_none()
    }

    /// Returns `true` if both refer to the same method, or if both are [`NULL`].
    ///
    /// [`NULL`]: MethodRef::NULL
    pub fn equal(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }

    /// Defines an arbitrary total order over method references, with [`NULL`] first.
    ///
    /// Like [`Delegate::compare()`], the order is not stable across builds.
    ///
    /// [`NULL`]: MethodRef::NULL
    /// [`Delegate::compare()`]: crate::Delegate::compare()
    pub fn compare(&self, other: &Self) -> core::cmp::Ordering {
        // `None` is ordered before `Some`.
        self.addr().cmp(&other.addr())
    }

    /// Returns `true` if `self` comes before `other` in the order defined by
    /// [`compare()`](MethodRef::compare()).
    pub fn less(&self, other: &Self) -> bool {
        self.compare(other).is_lt()
    }

    fn addr(&self) -> Option<*const ()> {
        self.trampoline.map(S::trampoline_addr)
    }
}

impl<T, S: Signature, A: Access> Default for MethodRef<T, S, A> {
    fn default() -> Self {
        Self::NULL
    }
}

impl<T, S: Signature, A: Access> Clone for MethodRef<T, S, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S: Signature, A: Access> Copy for MethodRef<T, S, A> {}

impl<T, S: Signature, A: Access> PartialEq for MethodRef<T, S, A> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T, S: Signature, A: Access> Eq for MethodRef<T, S, A> {}

impl<T, S: Signature, A: Access> core::hash::Hash for MethodRef<T, S, A> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        core::hash::Hash::hash(&self.addr(), state)
    }
}

impl<T, S: Signature, A: Access> core::fmt::Debug for MethodRef<T, S, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.addr() {
            Some(trampoline) => f
                .debug_struct("MethodRef")
                .field("receiver", &core::any::type_name::<T>())
                .field("exclusive", &A::EXCLUSIVE)
                .field("trampoline", &trampoline)
                .finish(),
            None => {
                #[derive(Clone, Copy, Debug)]
                struct Null;

                f.debug_tuple("MethodRef").field(&Null).finish()
            }
        }
    }
}

static_assertions::assert_eq_size!(MethodRef<u8, fn(u32) -> u32, Exclusive>, usize);
