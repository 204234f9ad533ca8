// Host-side tests for the analyser slot and for handing async completions
// back to shared state.

use pulse_sphere::core::handoff::deliver;
use pulse_sphere::core::{AnalyserSlot, AudioTap};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

struct CountingTap {
    attached: Rc<Cell<i32>>,
}

impl CountingTap {
    fn connect(attached: &Rc<Cell<i32>>) -> Self {
        attached.set(attached.get() + 1);
        Self {
            attached: attached.clone(),
        }
    }
}

impl AudioTap for CountingTap {
    fn detach(&self) {
        self.attached.set(self.attached.get() - 1);
    }
}

#[test]
fn rebinding_keeps_a_single_tap_attached() {
    let attached = Rc::new(Cell::new(0));
    let mut slot = AnalyserSlot::default();
    for _ in 0..6 {
        slot.clear();
        slot.replace(CountingTap::connect(&attached));
        assert_eq!(attached.get(), 1);
    }
    assert!(slot.is_attached());
}

#[test]
fn replace_detaches_previous_tap() {
    let attached = Rc::new(Cell::new(0));
    let mut slot = AnalyserSlot::default();
    slot.replace(CountingTap::connect(&attached));
    slot.replace(CountingTap::connect(&attached));
    assert_eq!(attached.get(), 1);
}

#[test]
fn clear_and_drop_detach() {
    let attached = Rc::new(Cell::new(0));
    let mut slot = AnalyserSlot::default();
    slot.replace(CountingTap::connect(&attached));
    slot.clear();
    assert_eq!(attached.get(), 0);
    assert!(!slot.is_attached());
    assert!(slot.get_mut().is_none());

    slot.replace(CountingTap::connect(&attached));
    drop(slot);
    assert_eq!(attached.get(), 0);
}

thread_local! {
    static QUEUE: RefCell<VecDeque<Box<dyn FnOnce()>>> = RefCell::new(VecDeque::new());
}

fn enqueue(task: Box<dyn FnOnce()>) {
    QUEUE.with(|q| q.borrow_mut().push_back(task));
}

fn run_queue() -> usize {
    let mut ran = 0;
    while let Some(task) = QUEUE.with(|q| q.borrow_mut().pop_front()) {
        task();
        ran += 1;
    }
    ran
}

#[test]
fn delivers_immediately_when_free() {
    let target = Rc::new(RefCell::new(Vec::<u64>::new()));
    deliver(Rc::downgrade(&target), |v: &mut Vec<u64>| v.push(7), enqueue);
    assert_eq!(*target.borrow(), vec![7]);
    assert_eq!(run_queue(), 0);
}

#[test]
fn busy_target_gets_the_result_later() {
    let target = Rc::new(RefCell::new(Vec::<u64>::new()));
    {
        let _held = target.borrow_mut();
        deliver(Rc::downgrade(&target), |v: &mut Vec<u64>| v.push(3), enqueue);
    }
    assert!(target.borrow().is_empty());
    assert_eq!(run_queue(), 1);
    assert_eq!(*target.borrow(), vec![3]);
}

#[test]
fn dropped_target_discards_silently() {
    let target = Rc::new(RefCell::new(0u32));
    let weak = Rc::downgrade(&target);
    drop(target);
    deliver(weak, |n: &mut u32| *n += 1, enqueue);
    assert_eq!(run_queue(), 0);
}
