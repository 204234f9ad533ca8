use crate::constants::{
    NOTIFICATION_CLOSE_ID, NOTIFICATION_ID, NOTIFICATION_LABEL_ID, NOTIFICATION_STATUS_ID,
};
use crate::core::{NotificationEvent, NotificationState, NotificationStatus, TimerRequest};
use crate::dom;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use web_sys as web;

/// Drives the `#song-notification` surface from [`NotificationState`].
///
/// The page owns the look (CSS classes `visible` / `entered`); this only
/// toggles classes, fills the text and runs the dismiss timers. Without the
/// element the state machine still runs so logs stay meaningful.
pub struct Presenter {
    state: NotificationState,
    root: Option<web::Element>,
    status_el: Option<web::Element>,
    label_el: Option<web::Element>,
    timer: Option<dom::Timeout>,
    close_listener: Option<dom::Listener>,
    self_ref: Weak<RefCell<Presenter>>,
}

impl Presenter {
    pub fn new(document: &web::Document, dismiss_ms: u32, exit_ms: u32) -> Rc<RefCell<Self>> {
        let root = document.get_element_by_id(NOTIFICATION_ID);
        if root.is_none() {
            log::info!("[notify] no #{} element; notifications are log-only", NOTIFICATION_ID);
        }
        let presenter = Rc::new_cyclic(|weak: &Weak<RefCell<Presenter>>| {
            RefCell::new(Presenter {
                state: NotificationState::new(dismiss_ms, exit_ms),
                root,
                status_el: document.get_element_by_id(NOTIFICATION_STATUS_ID),
                label_el: document.get_element_by_id(NOTIFICATION_LABEL_ID),
                timer: None,
                close_listener: None,
                self_ref: weak.clone(),
            })
        });
        let weak = Rc::downgrade(&presenter);
        presenter.borrow_mut().close_listener =
            dom::add_click_listener(document, NOTIFICATION_CLOSE_ID, move || {
                if let Some(p) = weak.upgrade() {
                    p.borrow_mut().close();
                }
            });
        presenter.borrow().render();
        presenter
    }

    pub fn state(&self) -> &NotificationState {
        &self.state
    }

    pub fn show(&mut self, event: &NotificationEvent) {
        match event.status {
            NotificationStatus::Loading => log::info!("[notify] loading {}", event.track_path),
            NotificationStatus::NowPlaying => {
                log::info!("[notify] now playing {}", event.track_path)
            }
        }
        // Replacing the live notification cancels its timers.
        self.timer = None;
        let timer = self.state.show(event);
        self.schedule(timer);
        self.render();
    }

    pub fn close(&mut self) {
        let timer = self.state.close();
        self.schedule(timer);
        self.render();
    }

    pub fn clear(&mut self) {
        self.timer = None;
        self.state.clear();
        self.render();
    }

    fn on_timer(&mut self, fired: TimerRequest) {
        let next = self.state.timer_fired(fired);
        self.schedule(next);
        self.render();
    }

    fn schedule(&mut self, timer: Option<TimerRequest>) {
        let Some(req) = timer else {
            return;
        };
        let weak = self.self_ref.clone();
        self.timer = dom::Timeout::new(req.delay_ms, move || {
            if let Some(p) = weak.upgrade() {
                if let Ok(mut p) = p.try_borrow_mut() {
                    p.on_timer(req);
                }
            }
        });
    }

    fn render(&self) {
        let Some(root) = &self.root else {
            return;
        };
        let classes = root.class_list();
        _ = classes.toggle_with_force("visible", self.state.visible());
        _ = classes.toggle_with_force("entered", self.state.entered());
        _ = root.set_attribute("aria-hidden", if self.state.visible() { "false" } else { "true" });
        let status = match self.state.status() {
            NotificationStatus::Loading => "loading",
            NotificationStatus::NowPlaying => "now-playing",
        };
        _ = root.set_attribute("data-status", status);
        if let Some(el) = &self.status_el {
            el.set_text_content(Some(self.state.status().heading()));
        }
        if let Some(el) = &self.label_el {
            el.set_text_content(Some(self.state.track_label()));
        }
    }
}
