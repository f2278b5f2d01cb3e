use slimcall::Delegate;

macro_rules! arity_tests {
    ($($number:literal => ($($argument:ident: $parameter:ty = $value:literal),*);)*) => {
        paste::paste! {
            $(
                #[test]
                fn [<null_arity_ $number>]() {
                    let delegate = Delegate::<fn($($parameter),*) -> u64>::default();
                    assert!(delegate.is_null());
                    assert!(!delegate.is_bound());
                    assert_eq!(delegate, Delegate::NULL);
                    assert_eq!(delegate.call($($value),*), 0);
                    assert_eq!(delegate.try_call($($value),*), None);
                }

                #[test]
                fn [<unit_null_arity_ $number>]() {
                    let delegate = Delegate::<fn($($parameter),*)>::NULL;
                    delegate.call($($value),*);
                    assert_eq!(delegate.try_call($($value),*), None);
                }

                #[test]
                fn [<fn_item_arity_ $number>]() {
                    let delegate = Delegate::<fn($($parameter),*) -> u64>::from_fn(
                        |$($argument: $parameter),*| 1 $(+ $argument)*
                    );
                    assert!(delegate.is_bound());
                    assert_eq!(delegate.call($($value),*), 1 $(+ $value)*);
                    assert_eq!(delegate.try_call($($value),*), Some(1 $(+ $value)*));
                }

                #[test]
                fn [<fn_ptr_arity_ $number>]() {
                    let function: fn($($parameter),*) -> u64 = |$($argument: $parameter),*| 2 $(* $argument)*;
                    let delegate: Delegate<fn($($parameter),*) -> u64> = function.into();
                    assert_eq!(delegate.call($($value),*), 2 $(* $value)*);
                    assert_eq!(delegate, Delegate::from_fn_ptr(function));
                }
            )*
        }
    };
}

arity_tests! {
    0 => ();
    1 => (a0: u64 = 3);
    2 => (a0: u64 = 3, a1: u64 = 5);
    3 => (a0: u64 = 3, a1: u64 = 5, a2: u64 = 7);
    4 => (a0: u64 = 3, a1: u64 = 5, a2: u64 = 7, a3: u64 = 11);
    5 => (a0: u64 = 3, a1: u64 = 5, a2: u64 = 7, a3: u64 = 11, a4: u64 = 13);
    6 => (a0: u64 = 3, a1: u64 = 5, a2: u64 = 7, a3: u64 = 11, a4: u64 = 13, a5: u64 = 17);
    7 => (a0: u64 = 3, a1: u64 = 5, a2: u64 = 7, a3: u64 = 11, a4: u64 = 13, a5: u64 = 17, a6: u64 = 19);
    8 => (a0: u64 = 3, a1: u64 = 5, a2: u64 = 7, a3: u64 = 11, a4: u64 = 13, a5: u64 = 17, a6: u64 = 19, a7: u64 = 23);
    9 => (a0: u64 = 3, a1: u64 = 5, a2: u64 = 7, a3: u64 = 11, a4: u64 = 13, a5: u64 = 17, a6: u64 = 19, a7: u64 = 23, a8: u64 = 29);
}

#[test]
fn two_words() {
    use core::mem::size_of;

    assert_eq!(size_of::<Delegate<fn()>>(), 2 * size_of::<usize>());
    assert_eq!(size_of::<Delegate<fn(&'static str) -> String>>(), 2 * size_of::<usize>());
    assert_eq!(
        size_of::<Delegate<fn(u8, u16, u32, u64, i8, i16, i32, i64, u128) -> [u8; 64]>>(),
        2 * size_of::<usize>()
    );
}
