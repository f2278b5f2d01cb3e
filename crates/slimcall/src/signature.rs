use crate::RawContext;

mod sealed {
    #[allow(unreachable_pub)]
    pub trait Sealed {}
}

/// Describes the parameter and return types of a [`Delegate`].
///
/// This is implemented for function pointer types with up to nine parameters, so a delegate
/// taking an `i32` and a `bool` and returning a `u8` is written as `Delegate<fn(i32, bool) -> u8>`.
///
/// Parameters containing references must name their lifetime, as higher-ranked function pointers
/// such as `for<'x> fn(&'x str)` do not implement [`Signature`]. Use `fn(&'s str)` instead.
///
/// [`Delegate`]: crate::Delegate
pub trait Signature: Copy + sealed::Sealed {
    /// The type returned by calls to the function.
    type Output;

    /// The uniform shape of every trampoline for this signature, which is
    /// `unsafe fn(RawContext<Self>, A0, A1, ...) -> Self::Output`.
    ///
    /// A trampoline is only safe to call with the [`RawContext`] it was paired with when the
    /// [`Delegate`] was bound.
    ///
    /// [`Delegate`]: crate::Delegate
    type Trampoline: Copy;

    /// The trampoline used by delegates bound to a run-time function pointer, which reads the
    /// [`RawContext::function()`] and calls it.
    const FN_PTR_TRAMPOLINE: Self::Trampoline;

    /// Gets the address of a trampoline.
    fn trampoline_addr(trampoline: Self::Trampoline) -> *const ();

    /// Gets the address of the function.
    fn fn_addr(self) -> *const ();
}

macro_rules! define_signature {
    (($($argument:ident: $parameter:ident),*); $number:literal) => {
        impl<R, $($parameter),*> sealed::Sealed for fn($($parameter),*) -> R {}

        impl<R, $($parameter),*> Signature for fn($($parameter),*) -> R {
            type Output = R;
            type Trampoline = unsafe fn(RawContext<Self> $(, $parameter)*) -> R;

            const FN_PTR_TRAMPOLINE: Self::Trampoline = |context $(, $argument)*| {
                // SAFETY: this trampoline is only ever paired with `RawContext::from_fn()`.
                let function = unsafe { context.function() };
                function($($argument),*)
            };

            #[inline]
            fn trampoline_addr(trampoline: Self::Trampoline) -> *const () {
                trampoline as *const ()
            }

            #[inline]
            fn fn_addr(self) -> *const () {
                self as *const ()
            }
        }
    };
}

crate::with_parameters!(define_signature);

static_assertions::assert_eq_size!(RawContext<fn()>, *const ());
static_assertions::assert_eq_size!(RawContext<fn(u64, u64, u64) -> u64>, *const ());
