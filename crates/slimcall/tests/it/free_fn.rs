use slimcall::Delegate;

fn triple(x: i32) -> i32 {
    x * 3
}

fn negate(x: i32) -> i32 {
    -x
}

#[test]
fn triple_then_functor() {
    let mut delegate = Delegate::<fn(i32) -> i32>::from_fn(triple);
    assert_eq!(delegate.call(7), 21);

    let tripled = delegate;
    assert_eq!(delegate, tripled);

    let multiplier = 5;
    let scale = move |x: i32| x * multiplier;
    delegate.set_functor(&scale);

    assert_eq!(delegate.call(7), 35);
    assert_ne!(delegate, tripled, "{delegate:?} should differ from {tripled:?}");
    assert_eq!(tripled.call(7), 21);
}

#[test]
fn same_function_is_equal() {
    let a = Delegate::<fn(i32) -> i32>::from_fn(triple);
    let b = Delegate::<fn(i32) -> i32>::from_fn(triple);
    let c = Delegate::<fn(i32) -> i32>::from_fn(negate);

    assert_eq!(a, b);
    assert!(Delegate::equal(&a, &b));
    assert_ne!(a, c);
    assert_eq!(c.call(4), -4);
}

#[test]
fn associated_function() {
    let delegate = Delegate::<fn(u32) -> u32>::from_fn(u32::count_ones);
    assert_eq!(delegate.call(0b1011), 3);
}

#[test]
fn set_fn_chains() {
    let mut delegate = Delegate::<fn(i32) -> i32>::NULL;
    assert_eq!(delegate.set_fn(negate).call(9), -9);

    delegate.clear();
    assert!(delegate.is_null());
    assert_eq!(delegate.call(9), 0);
}

#[test]
fn constant_delegate() {
    const TRIPLE: Delegate<'static, fn(i32) -> i32> = Delegate::from_fn(triple);
    assert_eq!(TRIPLE.call(2), 6);
}

#[test]
fn runtime_pointer() {
    let pointers: [fn(i32) -> i32; 2] = [triple, negate];

    let a = Delegate::from_fn_ptr(pointers[0]);
    let b = Delegate::from_fn_ptr(pointers[1]);
    let mut c = Delegate::NULL;
    c.set_fn_ptr(pointers[0]);

    assert_eq!(a.call(2), 6);
    assert_eq!(b.call(2), -2);
    assert_eq!(a, c);
    assert_ne!(a, b);
}

#[test]
fn from_optional_pointer() {
    let none: Option<fn(i32) -> i32> = None;
    let null: Delegate<fn(i32) -> i32> = none.into();
    assert!(null.is_null());
    assert_eq!(null.try_call(1), None);

    let some: Delegate<fn(i32) -> i32> = Some(triple as fn(i32) -> i32).into();
    assert_eq!(some.try_call(1), Some(3));
    assert_eq!(some, Delegate::from_fn_ptr(triple as fn(i32) -> i32));
}

#[test]
fn non_default_return() {
    struct Token(u8);

    let delegate = Delegate::<fn(u8) -> Token>::from_fn(Token);
    assert_eq!(delegate.try_call(4).map(|token| token.0), Some(4));
    assert!(Delegate::<fn(u8) -> Token>::NULL.try_call(4).is_none());
}
