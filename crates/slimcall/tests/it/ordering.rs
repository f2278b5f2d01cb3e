use slimcall::cmp::{ByAddress, Equal, Less, Predicate};
use slimcall::{Delegate, MethodRef};
use std::collections::{BTreeMap, BTreeSet, HashSet};

struct Valve {
    open: bool,
}

impl Valve {
    fn is_open(&self) -> bool {
        self.open
    }

    fn is_closed(&self) -> bool {
        !self.open
    }
}

fn always() -> bool {
    true
}

fn never() -> bool {
    false
}

#[test]
fn same_method_different_objects() {
    let inlet = Valve { open: true };
    let outlet = Valve { open: false };

    let on_inlet = Delegate::<fn() -> bool>::from_method(&inlet, Valve::is_open);
    let on_outlet = Delegate::<fn() -> bool>::from_method(&outlet, Valve::is_open);
    assert_ne!(on_inlet, on_outlet);

    let mut names = BTreeMap::new();
    names.insert(ByAddress(on_inlet), "inlet");
    names.insert(ByAddress(on_outlet), "outlet");
    names.insert(ByAddress(on_inlet), "inlet again");

    assert_eq!(names.len(), 2);
    assert_eq!(names[&ByAddress(on_inlet)], "inlet again");
    assert_eq!(names[&ByAddress(on_outlet)], "outlet");

    let order = names.keys().map(|key| key.0).collect::<Vec<_>>();
    assert!(order[0].less(&order[1]));
}

#[test]
fn strict_weak_order() {
    let inlet = Valve { open: true };
    let outlet = Valve { open: false };
    let flag = std::cell::Cell::new(false);
    let read_flag = || flag.get();

    let delegates: [Delegate<fn() -> bool>; 8] = [
        Delegate::NULL,
        Delegate::from_fn(always),
        Delegate::from_fn(never),
        Delegate::from_fn_ptr(always),
        Delegate::from_method(&inlet, Valve::is_open),
        Delegate::from_method(&outlet, Valve::is_open),
        Delegate::from_method(&inlet, Valve::is_closed),
        Delegate::from_functor(&read_flag),
    ];

    for a in &delegates {
        assert!(Equal.test(a, a), "{a:?} should equal itself");
        assert!(!Less.test(a, a), "{a:?} should not be less than itself");

        for b in &delegates {
            assert_eq!(a == b, b == a);
            assert_eq!(a == b, a.compare(b).is_eq());
            assert_eq!(a.less(b), b.compare(a).is_gt());
            assert!(!(a.less(b) && b.less(a)), "{a:?} and {b:?} are both less than each other");

            for c in &delegates {
                if a.less(b) && b.less(c) {
                    assert!(a.less(c), "ordering of {a:?}, {b:?} and {c:?} is not transitive");
                }
            }
        }
    }

    let unique = delegates.iter().copied().map(ByAddress).collect::<BTreeSet<_>>();
    assert_eq!(unique.len(), delegates.len());
    assert!(unique.first().is_some_and(|first| first.is_null()));

    let hashed = delegates.iter().copied().collect::<HashSet<_>>();
    assert_eq!(hashed.len(), delegates.len());
}

#[test]
fn sorting_is_consistent() {
    let inlet = Valve { open: true };
    let outlet = Valve { open: false };

    let mut forward = vec![
        Delegate::<fn() -> bool>::from_method(&outlet, Valve::is_closed),
        Delegate::from_method(&inlet, Valve::is_open),
        Delegate::NULL,
        Delegate::from_fn(never),
    ];
    let mut backward = forward.iter().rev().copied().collect::<Vec<_>>();

    forward.sort_by(Delegate::compare);
    backward.sort_by(Delegate::compare);

    assert_eq!(forward, backward);
    assert!(forward[0].is_null());
}

#[test]
fn method_refs_as_keys() {
    let open = MethodRef::<Valve, fn() -> bool>::new(Valve::is_open);
    let closed = MethodRef::<Valve, fn() -> bool>::new(Valve::is_closed);

    let set = [open, closed, open, MethodRef::NULL]
        .into_iter()
        .map(ByAddress)
        .collect::<BTreeSet<_>>();

    assert_eq!(set.len(), 3);
    assert!(set.contains(&ByAddress(open)));
    assert!(set.contains(&ByAddress(closed)));
    assert!(Less.test(&MethodRef::NULL, &open));
}
