//! The opaque half of a [`Delegate`](crate::Delegate).

use crate::Signature;

/// The context passed to a trampoline as its first argument.
///
/// This is either a pointer to an object, or a function pointer of type `S`. Which field is
/// meaningful is decided entirely by the trampoline it is paired with: trampolines for methods,
/// functors and object-first functions read the [`object()`] pointer, while the trampoline for
/// run-time function pointers reads the [`function()`].
///
/// Custom trampolines passed to [`Delegate::from_raw_parts()`] receive this value unchanged.
///
/// `S` is always a function pointer type, so both fields are fully initialized pointer-sized
/// values. Other types cannot be stored.
///
/// ```compile_fail
/// # use slimcall::RawContext;
/// let padded = RawContext::<(u32, u16)>::from_fn((1, 2));
/// let _ = padded.object();
/// ```
///
/// ```compile_fail
/// # use slimcall::RawContext;
/// use core::mem::MaybeUninit;
/// let uninit = RawContext::<MaybeUninit<usize>>::from_fn(MaybeUninit::uninit());
/// let _ = uninit.object();
/// ```
///
/// [`object()`]: RawContext::object()
/// [`function()`]: RawContext::function()
/// [`Delegate::from_raw_parts()`]: crate::Delegate::from_raw_parts()
#[derive(Clone, Copy)]
pub union RawContext<S: Signature> {
    object: *const (),
    function: S,
}

impl<S: Signature> RawContext<S> {
    /// A context containing a null [`object()`] pointer.
    ///
    /// [`object()`]: RawContext::object()
    pub const NULL: Self = Self {
        object: core::ptr::null(),
    };

    /// Creates a context pointing to an object.
    pub const fn from_ptr<T>(object: *const T) -> Self {
        Self {
            object: object as *const (),
        }
    }

    /// Creates a context pointing to a mutable object.
    pub const fn from_mut_ptr<T>(object: *mut T) -> Self {
        Self::from_ptr(object as *const T)
    }

    /// Creates a context containing a function pointer.
    pub const fn from_fn(function: S) -> Self {
        const {
            assert!(
                core::mem::size_of::<S>() == core::mem::size_of::<*const ()>(),
                "function pointers must be the same size as data pointers"
            );
        }

        Self { function }
    }

    /// Interprets the context as an object pointer.
    ///
    /// If the context was created with [`from_fn()`], this is the address of the function.
    ///
    /// [`from_fn()`]: RawContext::from_fn()
    pub const fn object(self) -> *const () {
        // SAFETY: `S` is a function pointer, which is the same size as a data pointer and has no
        // padding, so the bytes are always initialized.
        unsafe { self.object }
    }

    /// Interprets the context as a function pointer.
    ///
    /// # Safety
    ///
    /// The context must have been created with [`from_fn()`].
    ///
    /// [`from_fn()`]: RawContext::from_fn()
    pub const unsafe fn function(self) -> S {
        // SAFETY: ensured by caller.
        unsafe { self.function }
    }
}

impl<S: Signature> core::fmt::Debug for RawContext<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("RawContext").field(&self.object()).finish()
    }
}

/// Produces the result of calling a null [`Delegate`](crate::Delegate).
///
/// For `R = ()` this does nothing.
#[inline]
pub(crate) fn null_return<R: Default>() -> R {
    R::default()
}
