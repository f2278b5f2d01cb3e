/// Error type used when a null pointer is given where a [`Delegate`] needs an object.
///
/// Returned by [`Delegate::try_from_method_ptr()`] and [`Delegate::try_from_method_mut_ptr()`].
///
/// [`Delegate`]: crate::Delegate
/// [`Delegate::try_from_method_ptr()`]: crate::Delegate::try_from_method_ptr()
/// [`Delegate::try_from_method_mut_ptr()`]: crate::Delegate::try_from_method_mut_ptr()
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct NullPointerError {
    type_name: &'static str,
}

impl NullPointerError {
    pub(crate) fn new<T>() -> Self {
        Self {
            type_name: core::any::type_name::<T>(),
        }
    }

    /// The name of the type of object the pointer should have pointed to.
    ///
    /// The exact contents are not guaranteed, as with [`core::any::type_name()`].
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl core::fmt::Debug for NullPointerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NullPointerError")
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl core::fmt::Display for NullPointerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "null pointer to `{}` cannot be bound to a delegate",
            self.type_name
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NullPointerError {}
