use std::collections::HashMap;
use std::rc::Rc;

use hairzone::page::Event;
use hairzone::timers::TimerId;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::Shared;

struct PendingTimer {
    handle: i32,
    callback: Closure<dyn FnMut()>,
}

/// `setTimeout` handles and their callbacks, keyed by controller timer id.
#[derive(Default)]
pub(super) struct BrowserTimers {
    live: HashMap<TimerId, PendingTimer>,
    // Callbacks that already ran. A closure must not be freed while it is
    // executing, so they are dropped at the start of the next timer callback.
    spent: Vec<Closure<dyn FnMut()>>,
}

impl BrowserTimers {
    fn retire(&mut self, id: TimerId) {
        self.spent.clear();
        if let Some(t) = self.live.remove(&id) {
            self.spent.push(t.callback);
        }
    }

    pub(super) fn cancel(&mut self, window: &web_sys::Window, id: TimerId) {
        if let Some(t) = self.live.remove(&id) {
            window.clear_timeout_with_handle(t.handle);
        }
    }
}

pub(super) fn schedule(rt: &Shared, id: TimerId, delay_ms: u32) -> Result<(), String> {
    let window = rt.borrow().dom.window.clone();

    let rt_cb = Rc::clone(rt);
    let callback = Closure::wrap(Box::new(move || {
        rt_cb.borrow_mut().timers.retire(id);
        super::dispatch(&rt_cb, Event::TimerFired(id), None);
    }) as Box<dyn FnMut()>);

    let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    let handle = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay,
        )
        .map_err(|_| "failed to start timeout".to_string())?;

    rt.borrow_mut()
        .timers
        .live
        .insert(id, PendingTimer { handle, callback });
    Ok(())
}
