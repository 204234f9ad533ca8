use std::cell::RefCell;
use std::rc::Rc;

pub type SubscriptionId = usize;

struct Inner<T> {
    value: T,
    next_id: SubscriptionId,
    subscribers: Vec<(SubscriptionId, Rc<RefCell<dyn FnMut(&T)>>)>,
}

/// Single-threaded shared value with change notification.
///
/// Clones share the same cell. Subscribers run synchronously inside `set`,
/// in subscription order, and only when the value actually changes. A
/// subscriber may read the value but must not call `set` on the same
/// observable.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Returns true if the value changed and subscribers were notified.
    pub fn set(&self, value: T) -> bool {
        let subscribers = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value.clone();
            inner
                .subscribers
                .iter()
                .map(|(_, f)| f.clone())
                .collect::<Vec<_>>()
        };
        for f in subscribers {
            (f.borrow_mut())(&value);
        }
        true
    }

    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let next = f(&self.inner.borrow().value);
        self.set(next)
    }

    pub fn subscribe(&self, f: impl FnMut(&T) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let callback: Rc<RefCell<dyn FnMut(&T)>> = Rc::new(RefCell::new(f));
        inner.subscribers.push((id, callback));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}
