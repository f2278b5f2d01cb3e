use crate::adapter::{ContextFn, FreeFn, Functor, FunctorMut, ObjectFn, ObjectFnMut};
use crate::{Exclusive, MethodRef, NullPointerError, RawContext, Shared, Signature};
use core::marker::PhantomData;

/// A non-owning reference to something that can be called with the signature `S`.
///
/// A [`Delegate`] is exactly two pointers wide: a trampoline that performs the call, and a
/// [`RawContext`] that the trampoline turns back into the referenced function, object or closure.
/// Like a reference, it is [`Copy`], never owns what it refers to, and is only valid for the
/// lifetime `'a` of the borrows used to bind it.
///
/// # Null Delegates
///
/// The [`NULL`] delegate (also the [`Default`]) refers to nothing. Calling it does not panic, and
/// instead returns [`R::default()`], so callbacks that were never set can be invoked without
/// checking [`is_null()`] first.
///
/// # Binding
///
/// Every kind of callable has a `const` constructor `from_*` and an in-place `set_*`
/// counterpart. Bindings to methods, functors and object-first functions come in a shared form,
/// taking `&'a T`, and an exclusive form, taking `&'a mut T`. Since a [`Delegate`] can be copied
/// freely, the exclusive forms are `unsafe`: the caller must ensure that calls reaching the same
/// exclusively borrowed object never overlap, which includes a call from within the object back
/// into a copy of the delegate.
///
/// # Equality and Ordering
///
/// Two delegates are equal if they are both null, or if they use the same trampoline with the
/// same context. Because the addresses of trampolines are decided by the compiler and linker,
/// any ordering of delegates is arbitrary and can change from one build to the next. For this
/// reason [`Delegate`] does not implement [`PartialOrd`] or [`Ord`]; the [`compare()`] and
/// [`less()`] methods, along with the [`cmp`] module, provide an ordering when one is needed, such
/// as for keys in a [`BTreeMap`].
///
/// ```compile_fail
/// # use slimcall::Delegate;
/// fn one() -> i32 { 1 }
/// fn two() -> i32 { 2 }
/// let a = Delegate::<fn() -> i32>::from_fn(one);
/// let b = Delegate::<fn() -> i32>::from_fn(two);
/// let _ = a < b;
/// ```
///
/// Delegates of different signatures are unrelated types, and cannot be compared at all.
///
/// ```compile_fail
/// # use slimcall::Delegate;
/// let a = Delegate::<fn() -> i32>::NULL;
/// let b = Delegate::<fn() -> u32>::NULL;
/// let _ = a == b;
/// ```
///
/// [`NULL`]: Delegate::NULL
/// [`R::default()`]: Default::default()
/// [`is_null()`]: Delegate::is_null()
/// [`compare()`]: Delegate::compare()
/// [`less()`]: Delegate::less()
/// [`cmp`]: crate::cmp
/// [`BTreeMap`]: https://doc.rust-lang.org/std/collections/struct.BTreeMap.html
pub struct Delegate<'a, S: Signature> {
    pub(crate) trampoline: Option<S::Trampoline>,
    pub(crate) context: RawContext<S>,
    _marker: PhantomData<&'a ()>,
}

impl<S: Signature> Default for Delegate<'_, S> {
    fn default() -> Self {
        Self::NULL
    }
}

impl<'a, S: Signature> Delegate<'a, S> {
    /// The delegate that refers to nothing.
    pub const NULL: Self = Self {
        trampoline: None,
        context: RawContext::NULL,
        _marker: PhantomData,
    };

    const fn bound(trampoline: S::Trampoline, context: RawContext<S>) -> Self {
        Self {
            trampoline: Some(trampoline),
            context,
            _marker: PhantomData,
        }
    }

    /// Creates a delegate from a trampoline and the context it is called with.
    ///
    /// This allows plugging in a calling convention not covered by the other constructors, since
    /// the trampoline receives the [`RawContext`] as is.
    ///
    /// # Safety
    ///
    /// Calling `trampoline` with `context` and any arguments must be safe for as long as `'a`.
    pub const unsafe fn from_raw_parts(trampoline: S::Trampoline, context: RawContext<S>) -> Self {
        Self::bound(trampoline, context)
    }

    /// Returns `true` if this delegate is [`NULL`].
    ///
    /// [`NULL`]: Delegate::NULL
    pub const fn is_null(&self) -> bool {
        self.trampoline.is_none()
    }

    /// Returns `true` if this delegate refers to something, which is the opposite of
    /// [`is_null()`].
    ///
    /// [`is_null()`]: Delegate::is_null()
    pub const fn is_bound(&self) -> bool {
        self.trampoline.is_some()
    }

    /// Sets this delegate to [`NULL`].
    ///
    /// [`NULL`]: Delegate::NULL
    pub fn clear(&mut self) {
        *self = Self::NULL;

        #[cfg(feature = "log")]
        log::trace!("cleared delegate at {:p}", self);
    }

    #[inline]
    #[cfg_attr(not(feature = "log"), allow(unused_variables))]
    fn rebound(&mut self, kind: &'static str) -> &mut Self {
        #[cfg(feature = "log")]
        log::trace!("rebound delegate at {:p} to {kind}: {:?}", self, self);

        self
    }

    /// Creates a delegate calling a free function known at compile time.
    ///
    /// The `function` must be a function item or a closure that captures nothing. Passing
    /// anything else, such as a `fn` pointer stored in a variable, fails to compile; use
    /// [`from_fn_ptr()`] for those instead.
    ///
    /// ```compile_fail
    /// # use slimcall::Delegate;
    /// fn triple(x: i32) -> i32 { x * 3 }
    /// let pointer: fn(i32) -> i32 = triple;
    /// let delegate = Delegate::<fn(i32) -> i32>::from_fn(pointer);
    /// assert_eq!(delegate.call(1), 3);
    /// ```
    ///
    /// [`from_fn_ptr()`]: Delegate::from_fn_ptr()
    pub const fn from_fn<F: FreeFn<S>>(function: F) -> Self {
        let _ = function;
        Self::bound(F::TRAMPOLINE, RawContext::NULL)
    }

    /// Sets this delegate to call a free function known at compile time.
    ///
    /// See [`from_fn()`](Delegate::from_fn()) for more information.
    pub fn set_fn<F: FreeFn<S>>(&mut self, function: F) -> &mut Self {
        *self = Self::from_fn(function);
        self.rebound("function")
    }

    /// Creates a delegate calling a function pointer chosen at run time.
    ///
    /// The function pointer is stored in the context. To turn an `Option` of a function pointer
    /// into a delegate, where `None` becomes [`NULL`], use the [`From`] implementation.
    ///
    /// [`NULL`]: Delegate::NULL
    pub const fn from_fn_ptr(function: S) -> Self {
        Self::bound(S::FN_PTR_TRAMPOLINE, RawContext::from_fn(function))
    }

    /// Sets this delegate to call a function pointer chosen at run time.
    pub fn set_fn_ptr(&mut self, function: S) -> &mut Self {
        *self = Self::from_fn_ptr(function);
        self.rebound("function pointer")
    }

    /// Creates a delegate calling a method with a shared receiver on the given `object`.
    ///
    /// The `method` is usually a path such as `Type::method`, but can also be a closure that
    /// captures nothing and takes `&T` as its first argument.
    ///
    /// Binding a temporary is rejected, since the delegate would outlive it.
    ///
    /// ```compile_fail
    /// # use slimcall::Delegate;
    /// struct Counter(u32);
    /// impl Counter {
    ///     fn get(&self) -> u32 { self.0 }
    /// }
    /// let start = std::env::args().count() as u32;
    /// let delegate = Delegate::<fn() -> u32>::from_method(&Counter(start), Counter::get);
    /// assert_eq!(delegate.call(), start);
    /// ```
    pub const fn from_method<T, M: ObjectFn<T, S>>(object: &'a T, method: M) -> Self {
        let _ = method;
        Self::bound(M::METHOD, RawContext::from_ptr(object))
    }

    /// Sets this delegate to call a method with a shared receiver on the given `object`.
    pub fn set_method<T, M: ObjectFn<T, S>>(&mut self, object: &'a T, method: M) -> &mut Self {
        *self = Self::from_method(object, method);
        self.rebound("method")
    }

    /// Creates a delegate calling a method with an exclusive receiver on the given `object`.
    ///
    /// A method taking `&mut self` can only be bound to a `&mut T`.
    ///
    /// ```compile_fail
    /// # use slimcall::Delegate;
    /// struct Counter(u32);
    /// impl Counter {
    ///     fn bump(&mut self) -> u32 { self.0 += 1; self.0 }
    /// }
    /// let counter = Counter(0);
    /// let delegate = unsafe { Delegate::<fn() -> u32>::from_method_mut(&counter, Counter::bump) };
    /// ```
    ///
    /// # Safety
    ///
    /// Calls through this delegate and its copies must not overlap with each other, or with any
    /// other call reaching the same `object` through an exclusive binding.
    pub const unsafe fn from_method_mut<T, M: ObjectFnMut<T, S>>(
        object: &'a mut T,
        method: M,
    ) -> Self {
        let _ = method;
        Self::bound(M::METHOD, RawContext::from_mut_ptr(object))
    }

    /// Sets this delegate to call a method with an exclusive receiver on the given `object`.
    ///
    /// # Safety
    ///
    /// See the documentation for [`from_method_mut()`](Delegate::from_method_mut()).
    pub unsafe fn set_method_mut<T, M: ObjectFnMut<T, S>>(
        &mut self,
        object: &'a mut T,
        method: M,
    ) -> &mut Self {
        // SAFETY: ensured by caller.
        *self = unsafe { Self::from_method_mut(object, method) };
        self.rebound("exclusive method")
    }

    /// Creates a delegate calling a method with a shared receiver, chosen earlier with a
    /// [`MethodRef`], on the given `object`.
    ///
    /// Passing a `&mut T` is allowed, as it is reborrowed as a `&T`. A null [`MethodRef`] results
    /// in a [`NULL`] delegate.
    ///
    /// [`NULL`]: Delegate::NULL
    pub const fn from_method_ref<T>(method: MethodRef<T, S, Shared>, object: &'a T) -> Self {
        match method.trampoline {
            Some(trampoline) => Self::bound(trampoline, RawContext::from_ptr(object)),
            None => Self::NULL,
        }
    }

    /// Sets this delegate to call a method with a shared receiver, chosen earlier with a
    /// [`MethodRef`], on the given `object`.
    pub fn set_method_ref<T>(&mut self, method: MethodRef<T, S, Shared>, object: &'a T) -> &mut Self {
        *self = Self::from_method_ref(method, object);
        self.rebound("method reference")
    }

    /// Creates a delegate calling a method with an exclusive receiver, chosen earlier with a
    /// [`MethodRef`], on the given `object`.
    ///
    /// An exclusive [`MethodRef`] cannot be combined with a shared reference.
    ///
    /// ```compile_fail
    /// # use slimcall::{Delegate, MethodRef};
    /// struct Counter(u32);
    /// impl Counter {
    ///     fn bump(&mut self) -> u32 { self.0 += 1; self.0 }
    /// }
    /// let counter = Counter(0);
    /// let bump = MethodRef::<Counter, fn() -> u32, _>::new_mut(Counter::bump);
    /// let delegate = Delegate::from_method_ref(bump, &counter);
    /// ```
    ///
    /// # Safety
    ///
    /// See the documentation for [`from_method_mut()`](Delegate::from_method_mut()).
    pub const unsafe fn from_method_ref_mut<T>(
        method: MethodRef<T, S, Exclusive>,
        object: &'a mut T,
    ) -> Self {
        match method.trampoline {
            Some(trampoline) => Self::bound(trampoline, RawContext::from_mut_ptr(object)),
            None => Self::NULL,
        }
    }

    /// Sets this delegate to call a method with an exclusive receiver, chosen earlier with a
    /// [`MethodRef`], on the given `object`.
    ///
    /// # Safety
    ///
    /// See the documentation for [`from_method_mut()`](Delegate::from_method_mut()).
    pub unsafe fn set_method_ref_mut<T>(
        &mut self,
        method: MethodRef<T, S, Exclusive>,
        object: &'a mut T,
    ) -> &mut Self {
        // SAFETY: ensured by caller.
        *self = unsafe { Self::from_method_ref_mut(method, object) };
        self.rebound("exclusive method reference")
    }

    /// Creates a delegate calling a method with a shared receiver on the object behind a raw
    /// pointer.
    ///
    /// # Errors
    ///
    /// Returns an error if `object` is null.
    ///
    /// # Safety
    ///
    /// If `object` is not null, it must be valid to convert it to a `&'a T`.
    pub unsafe fn try_from_method_ptr<T: 'a, M: ObjectFn<T, S>>(
        object: *const T,
        method: M,
    ) -> Result<Self, NullPointerError> {
        if object.is_null() {
            return Err(NullPointerError::new::<T>());
        }

        // SAFETY: ensured by caller.
        Ok(Self::from_method(unsafe { &*object }, method))
    }

    /// Creates a delegate calling a method with an exclusive receiver on the object behind a raw
    /// pointer.
    ///
    /// # Errors
    ///
    /// Returns an error if `object` is null.
    ///
    /// # Safety
    ///
    /// If `object` is not null, it must be valid to convert it to a `&'a mut T`. The requirements
    /// of [`from_method_mut()`](Delegate::from_method_mut()) also apply.
    pub unsafe fn try_from_method_mut_ptr<T: 'a, M: ObjectFnMut<T, S>>(
        object: *mut T,
        method: M,
    ) -> Result<Self, NullPointerError> {
        if object.is_null() {
            return Err(NullPointerError::new::<T>());
        }

        // SAFETY: ensured by caller.
        Ok(unsafe { Self::from_method_mut(&mut *object, method) })
    }

    /// Creates a delegate calling a closure or other functor through a shared reference.
    ///
    /// Only the reference is stored, so the delegate observes any changes made to the functor
    /// through interior mutability.
    ///
    /// ```compile_fail
    /// # use slimcall::Delegate;
    /// let offset = std::env::args().count() as i32;
    /// let delegate = Delegate::<fn(i32) -> i32>::from_functor(&move |x: i32| x + offset);
    /// assert_eq!(delegate.call(1), 1 + offset);
    /// ```
    pub const fn from_functor<F: Functor<S>>(functor: &'a F) -> Self {
        Self::bound(F::TRAMPOLINE, RawContext::from_ptr(functor))
    }

    /// Sets this delegate to call a closure or other functor through a shared reference.
    pub fn set_functor<F: Functor<S>>(&mut self, functor: &'a F) -> &mut Self {
        *self = Self::from_functor(functor);
        self.rebound("functor")
    }

    /// Creates a delegate calling a closure or other functor through an exclusive reference,
    /// allowing [`FnMut`] closures to be bound.
    ///
    /// # Safety
    ///
    /// Calls through this delegate and its copies must not overlap, which includes the functor
    /// calling a copy of this delegate.
    pub const unsafe fn from_functor_mut<F: FunctorMut<S>>(functor: &'a mut F) -> Self {
        Self::bound(F::TRAMPOLINE, RawContext::from_mut_ptr(functor))
    }

    /// Sets this delegate to call a closure or other functor through an exclusive reference.
    ///
    /// # Safety
    ///
    /// See the documentation for [`from_functor_mut()`](Delegate::from_functor_mut()).
    pub unsafe fn set_functor_mut<F: FunctorMut<S>>(&mut self, functor: &'a mut F) -> &mut Self {
        // SAFETY: ensured by caller.
        *self = unsafe { Self::from_functor_mut(functor) };
        self.rebound("exclusive functor")
    }

    /// Creates a delegate calling a free function known at compile time, passing the `object`
    /// as its first argument followed by the arguments of the call.
    pub const fn from_object_fn<T, F: ObjectFn<T, S>>(object: &'a T, function: F) -> Self {
        let _ = function;
        Self::bound(F::OBJECT_FN, RawContext::from_ptr(object))
    }

    /// Sets this delegate to call a free function known at compile time, passing the `object` as
    /// its first argument.
    pub fn set_object_fn<T, F: ObjectFn<T, S>>(&mut self, object: &'a T, function: F) -> &mut Self {
        *self = Self::from_object_fn(object, function);
        self.rebound("object function")
    }

    /// Creates a delegate calling a free function known at compile time, passing the exclusively
    /// borrowed `object` as its first argument.
    ///
    /// # Safety
    ///
    /// See the documentation for [`from_method_mut()`](Delegate::from_method_mut()).
    pub const unsafe fn from_object_fn_mut<T, F: ObjectFnMut<T, S>>(
        object: &'a mut T,
        function: F,
    ) -> Self {
        let _ = function;
        Self::bound(F::OBJECT_FN, RawContext::from_mut_ptr(object))
    }

    /// Sets this delegate to call a free function known at compile time, passing the exclusively
    /// borrowed `object` as its first argument.
    ///
    /// # Safety
    ///
    /// See the documentation for [`from_method_mut()`](Delegate::from_method_mut()).
    pub unsafe fn set_object_fn_mut<T, F: ObjectFnMut<T, S>>(
        &mut self,
        object: &'a mut T,
        function: F,
    ) -> &mut Self {
        // SAFETY: ensured by caller.
        *self = unsafe { Self::from_object_fn_mut(object, function) };
        self.rebound("exclusive object function")
    }

    /// Creates a delegate calling a free function known at compile time, passing the opaque
    /// `context` pointer as its first argument followed by the arguments of the call.
    ///
    /// This is the shape of callbacks in C interfaces, such as
    /// `extern "C" fn(*mut (), u32) -> bool`. The pointer is passed along as is, even if it is
    /// null, and is never dereferenced by the delegate.
    pub const fn from_context_fn<F: ContextFn<S>>(context: *mut (), function: F) -> Self {
        let _ = function;
        Self::bound(F::TRAMPOLINE, RawContext::from_mut_ptr(context))
    }

    /// Sets this delegate to call a free function known at compile time, passing the opaque
    /// `context` pointer as its first argument.
    pub fn set_context_fn<F: ContextFn<S>>(&mut self, context: *mut (), function: F) -> &mut Self {
        *self = Self::from_context_fn(context, function);
        self.rebound("context function")
    }

    /// Gets the address that the context is compared by, which depends on the trampoline.
    fn context_addr(&self, trampoline: S::Trampoline) -> *const () {
        if S::trampoline_addr(trampoline) == S::trampoline_addr(S::FN_PTR_TRAMPOLINE) {
            // SAFETY: the function pointer trampoline is only paired with `RawContext::from_fn()`.
            unsafe { self.context.function() }.fn_addr()
        } else {
            self.context.object()
        }
    }

    /// Returns `true` if both delegates are [`NULL`], or if they call the same thing with the
    /// same context.
    ///
    /// This can also be called as `Delegate::equal(&a, &b)`, and is what [`PartialEq`] uses.
    ///
    /// [`NULL`]: Delegate::NULL
    pub fn equal(&self, other: &Self) -> bool {
        match (self.trampoline, other.trampoline) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                S::trampoline_addr(a) == S::trampoline_addr(b)
                    && self.context_addr(a) == other.context_addr(b)
            }
            _ => false,
        }
    }

    /// Defines an arbitrary total order over delegates with the same signature.
    ///
    /// [`NULL`] delegates come first. Others are ordered by the address of their trampoline,
    /// then by the address in their context. These addresses are not stable across builds, so
    /// the order is only suitable for organizing delegates in sorted containers.
    ///
    /// [`NULL`]: Delegate::NULL
    pub fn compare(&self, other: &Self) -> core::cmp::Ordering {
        match (self.trampoline, other.trampoline) {
            (None, None) => core::cmp::Ordering::Equal,
            (None, Some(_)) => core::cmp::Ordering::Less,
            (Some(_), None) => core::cmp::Ordering::Greater,
            (Some(a), Some(b)) => S::trampoline_addr(a)
                .cmp(&S::trampoline_addr(b))
                .then_with(|| self.context_addr(a).cmp(&other.context_addr(b))),
        }
    }

    /// Returns `true` if `self` comes before `other` in the order defined by
    /// [`compare()`](Delegate::compare()).
    pub fn less(&self, other: &Self) -> bool {
        self.compare(other).is_lt()
    }
}

impl<S: Signature> Clone for Delegate<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Signature> Copy for Delegate<'_, S> {}

impl<S: Signature> PartialEq for Delegate<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<S: Signature> Eq for Delegate<'_, S> {}

impl<S: Signature> core::hash::Hash for Delegate<'_, S> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        let identity = self
            .trampoline
            .map(|trampoline| (S::trampoline_addr(trampoline), self.context_addr(trampoline)));

        core::hash::Hash::hash(&identity, state)
    }
}

impl<S: Signature> core::fmt::Debug for Delegate<'_, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.trampoline {
            Some(trampoline) => f
                .debug_struct("Delegate")
                .field("trampoline", &S::trampoline_addr(trampoline))
                .field("context", &self.context_addr(trampoline))
                .finish(),
            None => {
                #[derive(Clone, Copy, Debug)]
                struct Null;

                f.debug_tuple("Delegate").field(&Null).finish()
            }
        }
    }
}

macro_rules! define_conversions {
    (($($argument:ident: $parameter:ident),*); $number:literal) => {
        impl<R $(, $parameter)*> From<fn($($parameter),*) -> R> for Delegate<'_, fn($($parameter),*) -> R> {
            fn from(function: fn($($parameter),*) -> R) -> Self {
                Self::from_fn_ptr(function)
            }
        }

        impl<R $(, $parameter)*> From<Option<fn($($parameter),*) -> R>> for Delegate<'_, fn($($parameter),*) -> R> {
            fn from(function: Option<fn($($parameter),*) -> R>) -> Self {
                match function {
                    Some(function) => Self::from_fn_ptr(function),
                    None => Self::NULL,
                }
            }
        }
    };
}

crate::with_parameters!(define_conversions);

static_assertions::assert_eq_size!(Delegate<'static, fn()>, [usize; 2]);
static_assertions::assert_eq_size!(Delegate<'static, fn(i32) -> i32>, [usize; 2]);
static_assertions::assert_eq_size!(Delegate<'static, fn(u8, u16, u32, u64) -> u128>, [usize; 2]);
static_assertions::assert_not_impl_any!(Delegate<'static, fn()>: Send, Sync, PartialOrd);
