use slimcall::Delegate;
use std::cell::Cell;

#[test]
fn observes_interior_mutation() {
    let multiplier = Cell::new(2);
    let scale = |x: i32| x * multiplier.get();

    let delegate = Delegate::<fn(i32) -> i32>::from_functor(&scale);
    assert_eq!(delegate.call(7), 14);

    multiplier.set(5);
    assert_eq!(delegate.call(7), 35);
}

#[test]
fn counts_calls() {
    let calls = Cell::new(0usize);
    let add_then_halve = |a: i32, b: i32| {
        calls.set(calls.get() + 1);
        (a + b) / 2
    };

    let delegate = Delegate::<fn(i32, i32) -> i32>::from_functor(&add_then_halve);
    let copy = delegate;

    assert_eq!(delegate.call(10, 20), 15);
    assert_eq!(copy.call(1, 3), 2);
    assert_eq!(calls.get(), 2);
}

#[test]
fn equality_follows_the_functor() {
    let offset = 3;
    let first = move |x: u8| x + offset;
    let second = move |x: u8| x + offset;

    let a = Delegate::<fn(u8) -> u8>::from_functor(&first);
    let b = Delegate::<fn(u8) -> u8>::from_functor(&first);
    let c = Delegate::<fn(u8) -> u8>::from_functor(&second);

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.call(1), c.call(1));
}

#[test]
fn exclusive_functor() {
    let mut total = 0u32;
    let mut accumulate = |step: u32| {
        total += step;
        total
    };

    {
        // SAFETY: calls do not overlap, and the closure never calls back into the delegate.
        let delegate = unsafe { Delegate::<fn(u32) -> u32>::from_functor_mut(&mut accumulate) };
        assert_eq!(delegate.call(2), 2);
        assert_eq!(delegate.call(3), 5);
    }

    let mut delegate = Delegate::<fn(u32) -> u32>::NULL;
    // SAFETY: calls do not overlap.
    unsafe {
        delegate.set_functor_mut(&mut accumulate);
    }
    assert_eq!(delegate.call(10), 15);
    assert_eq!(total, 15);
}

#[test]
fn unit_return() {
    let seen = Cell::new(None);
    let record = |value: char| seen.set(Some(value));

    let mut delegate = Delegate::<fn(char)>::NULL;
    delegate.call('a');
    assert_eq!(seen.get(), None);

    delegate.set_functor(&record).call('b');
    assert_eq!(seen.get(), Some('b'));
}
