use crate::Delegate;

macro_rules! define_call {
    (($($argument:ident: $parameter:ident),*); $number:literal) => {
        /// Defines the methods used to invoke the delegate.
        #[allow(clippy::too_many_arguments)]
        impl<R $(, $parameter)*> Delegate<'_, fn($($parameter),*) -> R> {
            /// Calls the function, method or functor this delegate refers to.
            ///
            /// If the delegate is [`NULL`], this returns [`R::default()`] instead, which for
            /// `R = ()` means that nothing happens.
            ///
            /// [`NULL`]: Delegate::NULL
            /// [`R::default()`]: Default::default()
            #[inline(always)]
            pub fn call(&self $(, $argument: $parameter)*) -> R
            where
                R: Default,
            {
                match self.trampoline {
                    // SAFETY: the trampoline was paired with this context when binding.
                    Some(trampoline) => unsafe { trampoline(self.context $(, $argument)*) },
                    None => crate::raw::null_return(),
                }
            }

            /// Calls the function, method or functor this delegate refers to, or returns `None`
            /// if the delegate is [`NULL`].
            ///
            /// Unlike [`call()`], this does not require `R` to implement [`Default`].
            ///
            /// [`NULL`]: Delegate::NULL
            /// [`call()`]: Delegate::call()
            #[inline(always)]
            pub fn try_call(&self $(, $argument: $parameter)*) -> Option<R> {
                match self.trampoline {
                    // SAFETY: the trampoline was paired with this context when binding.
                    Some(trampoline) => Some(unsafe { trampoline(self.context $(, $argument)*) }),
                    None => None,
                }
            }
        }
    };
}

crate::with_parameters!(define_call);
