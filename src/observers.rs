use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::COMPACT_BREAKPOINT;
use crate::events::viewport_width;

type EntriesCallback = dyn FnMut(Array, IntersectionObserver);

/// Owns an `IntersectionObserver` and its callback; disconnects on drop.
pub struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<EntriesCallback>,
}

impl Observer {
    fn new<F>(root_margin: &str, threshold: f64, targets: &[Element], mut on_entries: F) -> Option<Self>
    where
        F: FnMut(Vec<IntersectionObserverEntry>) + 'static,
    {
        let callback = Closure::wrap(Box::new(move |entries: Array, _: IntersectionObserver| {
            let entries = entries
                .iter()
                .map(|entry| entry.unchecked_into::<IntersectionObserverEntry>())
                .collect();
            on_entries(entries);
        }) as Box<EntriesCallback>);

        let init = IntersectionObserverInit::new();
        init.set_root_margin(root_margin);
        init.set_threshold(&JsValue::from(threshold));
        let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => observer,
            Err(e) => {
                log::warn!("IntersectionObserver unavailable: {:?}", e);
                return None;
            }
        };
        for target in targets {
            observer.observe(target);
        }
        Some(Self {
            observer,
            _callback: callback,
        })
    }

    /// Reports the id of the first `section[id]` crossing the middle band of
    /// the viewport. The band is wider on compact screens.
    pub fn sections<F>(mut on_section: F) -> Option<Self>
    where
        F: FnMut(String) + 'static,
    {
        let root_margin = if viewport_width() <= COMPACT_BREAKPOINT {
            "-30% 0px -30% 0px"
        } else {
            "-45% 0px -45% 0px"
        };
        let sections = query_all("section[id]");
        Self::new(root_margin, 0.0, &sections, move |entries| {
            if let Some(entry) = entries.iter().find(|e| e.is_intersecting()) {
                on_section(entry.target().id());
            }
        })
    }

    /// Reports footer visibility changes (15% of the footer on screen).
    pub fn footer<F>(on_visible: F) -> Option<Self>
    where
        F: FnMut(bool) + 'static,
    {
        let footer = query_all(".footer").into_iter().next()?;
        Self::visibility(&footer, "0px", 0.15, on_visible)
    }

    /// Reports whether `target` is on screen each time it crosses `threshold`.
    pub fn visibility<F>(target: &Element, root_margin: &str, threshold: f64, mut on_visible: F) -> Option<Self>
    where
        F: FnMut(bool) + 'static,
    {
        Self::new(root_margin, threshold, std::slice::from_ref(target), move |entries| {
            for entry in entries {
                on_visible(entry.is_intersecting());
            }
        })
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Vec::new();
    };
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}
