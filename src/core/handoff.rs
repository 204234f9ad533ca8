use std::cell::RefCell;
use std::rc::Weak;

/// Schedules a task to run later on the same thread (a fresh microtask in
/// the browser).
pub type Defer = fn(Box<dyn FnOnce()>);

/// Apply `f` to the target if it is still alive.
///
/// When the target is already mutably borrowed, `f` is handed to `defer`
/// and retried from there instead of being dropped, so async completions
/// (decoded buffers, end-of-track) always reach the state machine.
pub fn deliver<T, F>(target: Weak<RefCell<T>>, f: F, defer: Defer)
where
    T: 'static,
    F: FnOnce(&mut T) + 'static,
{
    let Some(rc) = target.upgrade() else {
        return;
    };
    let busy = match rc.try_borrow_mut() {
        Ok(mut t) => {
            f(&mut t);
            return;
        }
        Err(_) => f,
    };
    log::debug!("[handoff] target busy; deferring");
    defer(Box::new(move || deliver(target, busy, defer)));
}
