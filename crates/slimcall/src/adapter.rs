//! Trampolines for each kind of callable a [`Delegate`] can refer to.
//!
//! Every trait in this module is implemented for all types that can be bound as one kind of
//! callable, and provides the trampoline for that kind as an associated constant. Because the
//! constant is generic over the type of the callable, each function item, method or closure type
//! gets a trampoline of its own, and the address of that trampoline identifies what the
//! [`Delegate`] is bound to.
//!
//! These traits only appear in the bounds of the binding functions on [`Delegate`] and
//! [`MethodRef`], and there is rarely a reason to name them directly.
//!
//! [`Delegate`]: crate::Delegate
//! [`MethodRef`]: crate::MethodRef

use crate::Signature;

/// Fails compilation if `F` is not zero-sized.
const fn assert_zero_sized<F>() {
    assert!(
        core::mem::size_of::<F>() == 0,
        "a compile-time callable must be a function item or a closure that captures nothing, \
        bind function pointers with `Delegate::from_fn_ptr()` instead"
    );
}

/// Produces a reference to an instance of a zero-sized `F`.
///
/// # Safety
///
/// `F` must be zero-sized, and a value of type `F` must have been created before.
#[inline(always)]
unsafe fn conjure<'a, F>() -> &'a F {
    // SAFETY: any non-null, well-aligned pointer is valid for reads of zero bytes.
    unsafe { core::ptr::NonNull::<F>::dangling().as_ref() }
}

/// A free function known at compile time, bound with [`Delegate::from_fn()`].
///
/// This is implemented for function items (such as `u32::count_ones` or the name of a `fn`) and
/// closures that capture nothing, since both are zero-sized. Binding a type that is not
/// zero-sized, such as a `fn` pointer, fails to compile.
///
/// # Safety
///
/// [`TRAMPOLINE`] must be safe to call with any [`RawContext`].
///
/// [`Delegate::from_fn()`]: crate::Delegate::from_fn()
/// [`TRAMPOLINE`]: FreeFn::TRAMPOLINE
/// [`RawContext`]: crate::RawContext
pub unsafe trait FreeFn<S: Signature>: Copy {
    /// Calls the function, ignoring the context.
    const TRAMPOLINE: S::Trampoline;
}

/// A free function known at compile time that receives the context pointer as its first
/// argument, bound with [`Delegate::from_context_fn()`].
///
/// # Safety
///
/// [`TRAMPOLINE`] must be safe to call with any [`RawContext`].
///
/// [`Delegate::from_context_fn()`]: crate::Delegate::from_context_fn()
/// [`TRAMPOLINE`]: ContextFn::TRAMPOLINE
/// [`RawContext`]: crate::RawContext
pub unsafe trait ContextFn<S: Signature>: Copy {
    /// Calls the function with the [`RawContext::object()`] pointer as its first argument.
    ///
    /// [`RawContext::object()`]: crate::RawContext::object()
    const TRAMPOLINE: S::Trampoline;
}

/// A method or free function known at compile time that takes a `&T` as its first argument.
///
/// # Safety
///
/// Both trampolines must be safe to call with a [`RawContext`] pointing to a live `T` that is
/// not mutably borrowed.
///
/// [`RawContext`]: crate::RawContext
pub unsafe trait ObjectFn<T, S: Signature>: Copy {
    /// Calls the method on the object the context points to.
    ///
    /// Used by [`Delegate::from_method()`] and [`MethodRef::new()`].
    ///
    /// [`Delegate::from_method()`]: crate::Delegate::from_method()
    /// [`MethodRef::new()`]: crate::MethodRef::new()
    const METHOD: S::Trampoline;

    /// Calls the function, passing the object the context points to as the first argument.
    ///
    /// Used by [`Delegate::from_object_fn()`].
    ///
    /// [`Delegate::from_object_fn()`]: crate::Delegate::from_object_fn()
    const OBJECT_FN: S::Trampoline;
}

/// A method or free function known at compile time that takes a `&mut T` as its first argument.
///
/// # Safety
///
/// Both trampolines must be safe to call with a [`RawContext`] pointing to a live `T` that is not
/// otherwise borrowed.
///
/// [`RawContext`]: crate::RawContext
pub unsafe trait ObjectFnMut<T, S: Signature>: Copy {
    /// Calls the method on the object the context points to.
    ///
    /// Used by [`Delegate::from_method_mut()`] and [`MethodRef::new_mut()`].
    ///
    /// [`Delegate::from_method_mut()`]: crate::Delegate::from_method_mut()
    /// [`MethodRef::new_mut()`]: crate::MethodRef::new_mut()
    const METHOD: S::Trampoline;

    /// Calls the function, passing the object the context points to as the first argument.
    ///
    /// Used by [`Delegate::from_object_fn_mut()`].
    ///
    /// [`Delegate::from_object_fn_mut()`]: crate::Delegate::from_object_fn_mut()
    const OBJECT_FN: S::Trampoline;
}

/// A closure or other functor called through a shared reference, bound with
/// [`Delegate::from_functor()`].
///
/// # Safety
///
/// [`TRAMPOLINE`] must be safe to call with a [`RawContext`] pointing to a live `Self` that is
/// not mutably borrowed.
///
/// [`Delegate::from_functor()`]: crate::Delegate::from_functor()
/// [`TRAMPOLINE`]: Functor::TRAMPOLINE
/// [`RawContext`]: crate::RawContext
pub unsafe trait Functor<S: Signature> {
    /// Calls the functor the context points to.
    const TRAMPOLINE: S::Trampoline;
}

/// A closure or other functor called through an exclusive reference, bound with
/// [`Delegate::from_functor_mut()`].
///
/// # Safety
///
/// [`TRAMPOLINE`] must be safe to call with a [`RawContext`] pointing to a live `Self` that is
/// not otherwise borrowed.
///
/// [`Delegate::from_functor_mut()`]: crate::Delegate::from_functor_mut()
/// [`TRAMPOLINE`]: FunctorMut::TRAMPOLINE
/// [`RawContext`]: crate::RawContext
pub unsafe trait FunctorMut<S: Signature> {
    /// Calls the functor the context points to.
    const TRAMPOLINE: S::Trampoline;
}

macro_rules! define_adapters {
    (($($argument:ident: $parameter:ident),*); $number:literal) => {
        // SAFETY: the context is ignored.
        unsafe impl<F, R $(, $parameter)*> FreeFn<fn($($parameter),*) -> R> for F
        where
            F: Fn($($parameter),*) -> R + Copy,
        {
            const TRAMPOLINE: <fn($($parameter),*) -> R as Signature>::Trampoline = {
                assert_zero_sized::<F>();

                |_ $(, $argument)*| {
                    // SAFETY: `F` is zero-sized, and an instance was passed when binding.
                    let function = unsafe { conjure::<F>() };
                    function($($argument),*)
                }
            };
        }

        // SAFETY: the context pointer is passed along, never dereferenced.
        unsafe impl<F, R $(, $parameter)*> ContextFn<fn($($parameter),*) -> R> for F
        where
            F: Fn(*mut () $(, $parameter)*) -> R + Copy,
        {
            const TRAMPOLINE: <fn($($parameter),*) -> R as Signature>::Trampoline = {
                assert_zero_sized::<F>();

                |context $(, $argument)*| {
                    // SAFETY: `F` is zero-sized, and an instance was passed when binding.
                    let function = unsafe { conjure::<F>() };
                    function(context.object() as *mut () $(, $argument)*)
                }
            };
        }

        // SAFETY: the context points to a `T`, which is ensured by the caller.
        unsafe impl<T, M, R $(, $parameter)*> ObjectFn<T, fn($($parameter),*) -> R> for M
        where
            M: Fn(&T $(, $parameter)*) -> R + Copy,
        {
            const METHOD: <fn($($parameter),*) -> R as Signature>::Trampoline = {
                assert_zero_sized::<M>();

                |context $(, $argument)*| {
                    // SAFETY: `M` is zero-sized, and an instance was passed when binding.
                    let method = unsafe { conjure::<M>() };
                    // SAFETY: the context was created from a `&T` borrowed by the delegate.
                    let object = unsafe { &*(context.object() as *const T) };
                    method(object $(, $argument)*)
                }
            };

            const OBJECT_FN: <fn($($parameter),*) -> R as Signature>::Trampoline = {
                assert_zero_sized::<M>();

                |context $(, $argument)*| {
                    // SAFETY: `M` is zero-sized, and an instance was passed when binding.
                    let function = unsafe { conjure::<M>() };
                    // SAFETY: the context was created from a `&T` borrowed by the delegate.
                    let object = unsafe { &*(context.object() as *const T) };
                    function(object $(, $argument)*)
                }
            };
        }

        // SAFETY: the context points to a `T`, which is ensured by the caller.
        unsafe impl<T, M, R $(, $parameter)*> ObjectFnMut<T, fn($($parameter),*) -> R> for M
        where
            M: Fn(&mut T $(, $parameter)*) -> R + Copy,
        {
            const METHOD: <fn($($parameter),*) -> R as Signature>::Trampoline = {
                assert_zero_sized::<M>();

                |context $(, $argument)*| {
                    // SAFETY: `M` is zero-sized, and an instance was passed when binding.
                    let method = unsafe { conjure::<M>() };
                    // SAFETY: the context was created from a `&mut T` borrowed by the delegate,
                    // and the caller ensures that calls do not overlap.
                    let object = unsafe { &mut *(context.object() as *mut T) };
                    method(object $(, $argument)*)
                }
            };

            const OBJECT_FN: <fn($($parameter),*) -> R as Signature>::Trampoline = {
                assert_zero_sized::<M>();

                |context $(, $argument)*| {
                    // SAFETY: `M` is zero-sized, and an instance was passed when binding.
                    let function = unsafe { conjure::<M>() };
                    // SAFETY: the context was created from a `&mut T` borrowed by the delegate,
                    // and the caller ensures that calls do not overlap.
                    let object = unsafe { &mut *(context.object() as *mut T) };
                    function(object $(, $argument)*)
                }
            };
        }

        // SAFETY: the context points to an `F`, which is ensured by the caller.
        unsafe impl<F, R $(, $parameter)*> Functor<fn($($parameter),*) -> R> for F
        where
            F: Fn($($parameter),*) -> R,
        {
            const TRAMPOLINE: <fn($($parameter),*) -> R as Signature>::Trampoline =
                |context $(, $argument)*| {
                    // SAFETY: the context was created from a `&F` borrowed by the delegate.
                    let functor = unsafe { &*(context.object() as *const F) };
                    functor($($argument),*)
                };
        }

        // SAFETY: the context points to an `F`, which is ensured by the caller.
        unsafe impl<F, R $(, $parameter)*> FunctorMut<fn($($parameter),*) -> R> for F
        where
            F: FnMut($($parameter),*) -> R,
        {
            const TRAMPOLINE: <fn($($parameter),*) -> R as Signature>::Trampoline =
                |context $(, $argument)*| {
                    // SAFETY: the context was created from a `&mut F` borrowed by the delegate,
                    // and the caller ensures that calls do not overlap.
                    let functor = unsafe { &mut *(context.object() as *mut F) };
                    functor($($argument),*)
                };
        }
    };
}

crate::with_parameters!(define_adapters);
