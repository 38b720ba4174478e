//! Binomial heap behaviour through the heap traits and the inherent API
//!
//! The helpers are written against `DecreaseKeyHeap` so the same scenarios
//! read the way Prim's algorithm uses the heap.

use prim_mst::binomial::BinomialHeap;
use prim_mst::{DecreaseKeyHeap, Heap, HeapError};

fn test_empty_heap<H: Heap<String, i32>>() {
    let mut heap = H::new();
    assert!(heap.is_empty());
    assert_eq!(heap.len(), 0);
    assert_eq!(heap.peek(), None);
    assert_eq!(heap.pop(), None);
}

fn test_basic_operations<H: Heap<&'static str, i32>>() {
    let mut heap = H::new();
    heap.push(5, "five");
    heap.push(1, "one");
    heap.push(10, "ten");
    heap.push(3, "three");

    assert_eq!(heap.len(), 4);
    assert_eq!(heap.peek(), Some((&1, &"one")));

    assert_eq!(heap.pop(), Some((1, "one")));
    assert_eq!(heap.pop(), Some((3, "three")));
    assert_eq!(heap.pop(), Some((5, "five")));
    assert_eq!(heap.pop(), Some((10, "ten")));
    assert_eq!(heap.pop(), None);
    assert!(heap.is_empty());
}

fn test_decrease_key_operations<H: DecreaseKeyHeap<i32, i32>>() {
    let mut heap = H::new();
    let _h1 = heap.push_with_handle(100, 1);
    let h2 = heap.push_with_handle(200, 2);
    let _h3 = heap.push_with_handle(300, 3);
    let h4 = heap.push_with_handle(400, 4);

    assert_eq!(heap.peek(), Some((&100, &1)));

    heap.decrease_key(&h2, 50).unwrap();
    assert_eq!(heap.peek(), Some((&50, &2)));

    heap.decrease_key(&h4, 25).unwrap();
    assert_eq!(heap.peek(), Some((&25, &4)));

    heap.decrease_key(&h4, 1).unwrap();
    assert_eq!(heap.peek(), Some((&1, &4)));

    assert_eq!(heap.pop(), Some((1, 4)));
    assert_eq!(heap.pop(), Some((50, 2)));
    assert_eq!(heap.pop(), Some((100, 1)));
    assert_eq!(heap.pop(), Some((300, 3)));
}

fn test_merge<H: Heap<i32, i32>>() {
    let mut heap1 = H::new();
    let mut heap2 = H::new();
    for i in [9, 3, 7] {
        heap1.push(i, i);
    }
    for i in [8, 1, 4, 6] {
        heap2.push(i, i);
    }

    heap1.merge(heap2);
    assert_eq!(heap1.len(), 7);

    let mut popped = Vec::new();
    while let Some((p, _)) = heap1.pop() {
        popped.push(p);
    }
    assert_eq!(popped, vec![1, 3, 4, 6, 7, 8, 9]);
}

#[test]
fn empty_heap() {
    test_empty_heap::<BinomialHeap<_, _>>();
}

#[test]
fn basic_operations() {
    test_basic_operations::<BinomialHeap<_, _>>();
}

#[test]
fn decrease_key_operations() {
    test_decrease_key_operations::<BinomialHeap<_, _>>();
}

#[test]
fn merge_through_trait() {
    test_merge::<BinomialHeap<_, _>>();
}

#[test]
fn handles_follow_values_through_bubble_up() {
    let mut heap = BinomialHeap::new();
    let handles: Vec<_> = (0..32).map(|i| heap.insert(1000 + i, i)).collect();

    // the deepest nodes end up at the top, pushing roots' values down
    for (i, handle) in handles.iter().enumerate().rev() {
        heap.decrease_key(handle, i as i32).unwrap();
        heap.check_invariants().unwrap();
    }
    for (i, handle) in handles.iter().enumerate() {
        assert_eq!(heap.get(handle), Some((&(i as i32), &(i as i32))));
    }
    for i in 0..32 {
        assert_eq!(heap.delete_min(), Some((i, i)));
    }
}

#[test]
fn decrease_key_rejects_increase_and_accepts_equal() {
    let mut heap = BinomialHeap::new();
    let h = heap.insert(10, "x");
    heap.insert(5, "y");

    assert_eq!(heap.decrease_key(&h, 11), Err(HeapError::PriorityNotDecreased));
    assert_eq!(heap.get(&h), Some((&10, &"x")));

    assert_eq!(heap.decrease_key(&h, 10), Ok(()));
    assert_eq!(heap.peek(), Some((&5, &"y")));
}

#[test]
fn stale_handle_is_invalid() {
    let mut heap = BinomialHeap::new();
    let h = heap.insert(1, ());
    heap.insert(2, ());
    assert_eq!(heap.delete_min(), Some((1, ())));

    assert!(!heap.contains(&h));
    assert_eq!(heap.get(&h), None);
    assert_eq!(heap.decrease_key(&h, 0), Err(HeapError::InvalidHandle));
    assert_eq!(heap.delete(&h), None);
    assert_eq!(heap.len(), 1);
}

#[test]
fn delete_arbitrary_entry() {
    let mut heap = BinomialHeap::new();
    let handles: Vec<_> = [5, 3, 8, 1, 9, 2, 7].iter().map(|&p| heap.insert(p, p * 10)).collect();

    assert_eq!(heap.delete(&handles[2]), Some((8, 80)));
    heap.check_invariants().unwrap();
    assert_eq!(heap.delete(&handles[3]), Some((1, 10)));
    heap.check_invariants().unwrap();
    assert_eq!(heap.len(), 5);

    let mut rest = Vec::new();
    while let Some((p, _)) = heap.pop() {
        rest.push(p);
    }
    assert_eq!(rest, vec![2, 3, 5, 7, 9]);
}

#[test]
fn union_translates_donor_handles() {
    let mut a = BinomialHeap::new();
    let mut b = BinomialHeap::new();
    for p in [10, 20, 30] {
        a.insert(p, "a");
    }
    let donor: Vec<_> = [15, 25, 35, 45, 55].iter().map(|&p| b.insert(p, "b")).collect();

    let translated = a.union(b);
    assert_eq!(a.len(), 8);
    a.check_invariants().unwrap();
    assert_eq!(translated.len(), donor.len());

    let h45 = translated[&donor[3]];
    a.decrease_key(&h45, 1).unwrap();
    assert_eq!(a.delete_min(), Some((1, "b")));
    a.check_invariants().unwrap();
}

#[test]
fn union_with_empty_heaps() {
    let mut a: BinomialHeap<(), i32> = BinomialHeap::new();
    assert!(a.union(BinomialHeap::new()).is_empty());
    assert!(a.is_empty());

    let mut b = BinomialHeap::new();
    b.insert(4, ());
    a.union(b);
    assert_eq!(a.find_min(), Some((&4, &())));
}

#[test]
fn root_list_mirrors_binary_count() {
    let mut heap = BinomialHeap::new();
    for n in 1..=100usize {
        heap.insert(n, ());
        let expected: Vec<usize> = (0..usize::BITS as usize).filter(|bit| n & (1 << bit) != 0).collect();
        assert_eq!(heap.root_degrees(), expected, "after {n} inserts");
    }
    for n in (0..100usize).rev() {
        heap.delete_min();
        let expected: Vec<usize> = (0..usize::BITS as usize).filter(|bit| n & (1 << bit) != 0).collect();
        assert_eq!(heap.root_degrees(), expected, "with {n} left");
    }
}

#[test]
fn equal_priorities_drain_completely() {
    let mut heap = BinomialHeap::new();
    for i in 0..50 {
        heap.insert(7, i);
    }
    heap.check_invariants().unwrap();
    let mut items: Vec<_> = std::iter::from_fn(|| heap.delete_min()).map(|(_, i)| i).collect();
    items.sort_unstable();
    assert_eq!(items, (0..50).collect::<Vec<_>>());
}

#[test]
fn many_decrease_keys() {
    let mut heap = BinomialHeap::new();
    let handles: Vec<_> = (0..500).map(|i| heap.insert(10_000 + i, i)).collect();
    for (i, handle) in handles.iter().enumerate() {
        assert!(heap.decrease_key(handle, i as i32).is_ok());
    }
    heap.check_invariants().unwrap();
    for i in 0..500 {
        assert_eq!(heap.pop(), Some((i, i)));
    }
}
