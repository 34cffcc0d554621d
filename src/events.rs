//! DOM listeners that unregister themselves when dropped.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, callback: F) -> Self
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        if let Err(e) = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
            log::warn!("could not listen for {}: {:?}", event, e);
        }
        Self {
            target: target.clone(),
            event,
            callback,
        }
    }

    /// Non-passive listener, for handlers that call `prevent_default` on
    /// touch events.
    pub fn active<F>(target: &EventTarget, event: &'static str, callback: F) -> Self
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        ) {
            log::warn!("could not listen for {}: {:?}", event, e);
        }
        Self {
            target: target.clone(),
            event,
            callback,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Horizontal pointer position of a mouse or touch event in client space.
pub fn pointer_client_x(event: &Event) -> Option<f64> {
    if let Some(mouse) = event.dyn_ref::<web_sys::MouseEvent>() {
        return Some(f64::from(mouse.client_x()));
    }
    let touch = event.dyn_ref::<web_sys::TouchEvent>()?;
    let point = touch.touches().get(0).or_else(|| touch.changed_touches().get(0))?;
    Some(f64::from(point.client_x()))
}

pub fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}
