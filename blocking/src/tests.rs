use crate::BlockingBulkRb;
use rstest::rstest;
use std::{
    sync::{
        atomic::{AtomicU64, AtomicUsize, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

const TIMEOUT: Duration = Duration::from_millis(1000);

#[test]
fn try_push_growth_and_rejection() {
    let rb = BlockingBulkRb::<u32, 2>::with_max_capacity(1, 4);
    assert_eq!(rb.try_push(1, 0), Ok(()));
    assert_eq!(rb.try_push(2, 0), Ok(()));
    // full, zero increment: rejected without blocking
    assert_eq!(rb.try_push(3, 0), Err(3));
    // a positive increment grows by a whole segment
    assert_eq!(rb.try_push(3, 2), Ok(()));
    assert_eq!(rb.capacity(), 4);
    assert_eq!(rb.try_push(4, 0), Ok(()));
    // at the configured maximum the increment no longer helps
    assert_eq!(rb.try_push(5, 2), Err(5));
    assert_eq!(rb.drain(), vec![1, 2, 3, 4]);
    assert!(rb.is_empty());
}

#[test]
fn emplace_family() {
    let rb = BlockingBulkRb::<String, 1>::with_max_capacity(2, 2);
    assert_eq!(rb.push_with(|| String::from("a")), Ok(()));
    assert!(rb.try_push_with(|| String::from("b")));
    // full: no implicit growth, and growth past the maximum is refused
    assert!(!rb.try_push_with(|| String::from("c")));
    assert!(!rb.try_reserve_and_push_with(0, || String::from("c")));
    assert!(!rb.try_reserve_and_push_with(1, || String::from("c")));
    assert_eq!(rb.try_pop().as_deref(), Some("a"));
    // not full anymore: the growth path is skipped entirely
    assert!(rb.try_reserve_and_push_with(1, || String::from("c")));
    assert_eq!(rb.drain(), vec!["b", "c"]);
}

#[test]
fn pop_and_try_pop_on_empty() {
    let rb = BlockingBulkRb::<u32, 2>::new(1);
    assert_eq!(rb.pop(), None);
    assert_eq!(rb.try_pop(), None);
    rb.push(5).unwrap();
    assert_eq!(rb.len(), 1);
    assert_eq!(rb.try_pop(), Some(5));
    assert_eq!(rb.try_pop(), None);
}

#[test]
#[cfg_attr(miri, ignore)]
fn wait_released_by_push() {
    let rb = Arc::new(BlockingBulkRb::<u32, 2>::new(1));
    let waiter = thread::spawn({
        let rb = rb.clone();
        move || {
            rb.wait();
            rb.try_pop()
        }
    });
    thread::sleep(Duration::from_millis(50));
    rb.push(9).unwrap();
    assert_eq!(waiter.join().unwrap(), Some(9));
}

#[test]
#[cfg_attr(miri, ignore)]
fn wait_for_times_out_on_empty_buffer() {
    let rb = BlockingBulkRb::<u32, 2>::new(1);
    let start = Instant::now();
    assert!(!rb.wait_for(Duration::from_millis(50)));
    assert!(start.elapsed() >= Duration::from_millis(50));

    rb.push(1).unwrap();
    assert!(rb.wait_for(Duration::from_millis(50)));
}

#[test]
#[cfg_attr(miri, ignore)]
fn pop_wait_observes_later_push() {
    let rb = Arc::new(BlockingBulkRb::<u32, 1>::new(1));
    assert_eq!(rb.pop_wait(Some(Duration::from_millis(10))), None);

    let consumer = thread::spawn({
        let rb = rb.clone();
        move || rb.pop_wait(Some(TIMEOUT))
    });
    thread::sleep(Duration::from_millis(50));
    rb.push(3).unwrap();
    assert_eq!(consumer.join().unwrap(), Some(3));
}

/// Single producer, single consumer, fixed capacity: the producer backs off
/// on rejection, the consumer blocks, and order comes out intact.
#[test]
#[cfg_attr(miri, ignore)]
fn spsc_bounded_preserves_order() {
    const COUNT: u32 = 10_000;
    let rb = Arc::new(BlockingBulkRb::<u32, 16>::with_max_capacity(4, 64));

    let producer = thread::spawn({
        let rb = rb.clone();
        move || {
            for i in 0..COUNT {
                let mut value = i;
                while let Err(rejected) = rb.try_push(value, 0) {
                    value = rejected;
                    thread::yield_now();
                }
            }
        }
    });

    for expected in 0..COUNT {
        assert_eq!(rb.pop_wait(Some(TIMEOUT)), Some(expected));
    }
    producer.join().unwrap();
    assert!(rb.is_empty());
}

/// N producers and M consumers over a growing buffer: nothing lost, nothing
/// duplicated, nothing corrupted.
#[rstest]
#[case(1, 1)]
#[case(1, 4)]
#[case(4, 1)]
#[case(4, 4)]
#[cfg_attr(miri, ignore)]
fn mpmc_accounting(#[case] producers: usize, #[case] consumers: usize) {
    const PER_PRODUCER: u64 = 2_000;
    let total = producers as u64 * PER_PRODUCER;
    let rb = Arc::new(BlockingBulkRb::<u64, 8>::new(1));
    let popped = Arc::new(AtomicUsize::new(0));
    let sum = Arc::new(AtomicU64::new(0));

    let mut handles = Vec::new();
    for p in 0..producers as u64 {
        handles.push(thread::spawn({
            let rb = rb.clone();
            move || {
                for i in 0..PER_PRODUCER {
                    let value = p * PER_PRODUCER + i;
                    assert!(rb.try_reserve_and_push_with(8, move || value));
                }
            }
        }));
    }
    for _ in 0..consumers {
        handles.push(thread::spawn({
            let rb = rb.clone();
            let popped = popped.clone();
            let sum = sum.clone();
            move || {
                while popped.load(Ordering::Acquire) < total as usize {
                    if let Some(value) = rb.pop_wait(Some(Duration::from_millis(10))) {
                        assert!(value < total);
                        sum.fetch_add(value, Ordering::AcqRel);
                        popped.fetch_add(1, Ordering::AcqRel);
                    }
                }
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(popped.load(Ordering::Acquire), total as usize);
    assert_eq!(sum.load(Ordering::Acquire), total * (total - 1) / 2);
    assert!(rb.is_empty());
}

#[test]
fn into_inner_hands_back_contents() {
    let rb = BlockingBulkRb::<u32, 2>::new(1);
    rb.push(1).unwrap();
    rb.push(2).unwrap();
    let mut inner = rb.into_inner();
    assert_eq!(inner.pop(), Some(1));
    assert_eq!(inner.pop(), Some(2));
    assert_eq!(inner.pop(), None);
}
