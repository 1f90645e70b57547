use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Event, EventTarget};

use crate::error::SkyError;

/// An event listener that unregisters itself when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn attach<T, F>(target: &T, event: &'static str, handler: F) -> Result<Self, SkyError>
    where
        T: AsRef<EventTarget>,
        F: FnMut(Event) + 'static,
    {
        let target = target.as_ref().clone();
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target,
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let callback = self.callback.as_ref().unchecked_ref();
        let removed = self
            .target
            .remove_event_listener_with_callback(self.event, callback);
        if removed.is_err() {
            log::warn!("failed to remove `{}` listener", self.event);
        }
    }
}
