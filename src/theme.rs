use crate::constants::{THEME_STORAGE_KEY, THEME_TOGGLE_ID};
use crate::core::{Observable, Theme, TransportAction};
use crate::{dom, events};
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use web_sys as web;

thread_local! {
    static SHARED: RefCell<Option<ThemeStore>> = const { RefCell::new(None) };
    // Page-lifetime listeners for the theme button and key.
    static PAGE_CONTROLS: RefCell<Vec<dom::Listener>> = const { RefCell::new(Vec::new()) };
}

/// Page theme persisted in `localStorage`, shared by every surface that
/// renders themed content. `toggle` is the only writer.
#[derive(Clone)]
pub struct ThemeStore {
    theme: Observable<Theme>,
}

impl ThemeStore {
    fn load() -> Self {
        let stored = storage().and_then(|s| s.get_item(THEME_STORAGE_KEY).ok().flatten());
        let theme = Theme::parse(stored.as_deref());
        log::info!("[theme] initial theme {}", theme.as_str());
        apply_to_document(theme);
        Self {
            theme: Observable::new(theme),
        }
    }

    /// The store for this page, created on first use. Creating it also wires
    /// `#theme-toggle` and the theme key, once for the whole page.
    pub fn shared() -> Self {
        let (store, created) = SHARED.with(|cell| {
            let mut slot = cell.borrow_mut();
            match slot.as_ref() {
                Some(store) => (store.clone(), false),
                None => {
                    let store = Self::load();
                    *slot = Some(store.clone());
                    (store, true)
                }
            }
        });
        if created {
            wire_page_controls();
        }
        store
    }

    pub fn observable(&self) -> Observable<Theme> {
        self.theme.clone()
    }

    pub fn current(&self) -> Theme {
        self.theme.get()
    }

    pub fn toggle(&self) -> Theme {
        let next = self.theme.get().toggled();
        if let Some(s) = storage() {
            if let Err(e) = s.set_item(THEME_STORAGE_KEY, next.as_str()) {
                log::warn!("[theme] could not persist theme: {:?}", e);
            }
        }
        apply_to_document(next);
        self.theme.set(next);
        log::info!("[theme] switched to {}", next.as_str());
        next
    }
}

fn wire_page_controls() {
    let mut listeners = Vec::new();
    if let Some(document) = dom::window_document() {
        listeners.extend(dom::add_click_listener(&document, THEME_TOGGLE_ID, || {
            ThemeStore::shared().toggle();
        }));
    }
    listeners.extend(events::wire_transport_keys(
        TransportAction::is_page_wide,
        |_| {
            ThemeStore::shared().toggle();
        },
    ));
    PAGE_CONTROLS.with(|cell| cell.borrow_mut().extend(listeners));
}

fn storage() -> Option<web::Storage> {
    web::window()?.local_storage().ok().flatten()
}

fn apply_to_document(theme: Theme) {
    let Some(document) = dom::window_document() else {
        return;
    };
    let preset = theme.preset();
    if let Some(root) = document.document_element() {
        let classes = root.class_list();
        _ = classes.toggle_with_force("dark", theme == Theme::Dark);
        if let Ok(html) = root.dyn_into::<web::HtmlElement>() {
            dom::set_background(&html, preset.page_background);
        }
    }
    if let Some(body) = document.body() {
        dom::set_background(&body, preset.page_background);
    }
}
