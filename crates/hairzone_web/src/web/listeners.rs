use std::rc::Rc;

use hairzone::navigation::{fragment_target, is_activation_key};
use hairzone::page::Event;
use hairzone::reveal::RevealOptions;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::dom::{js_err, query_all};
use super::{dispatch, Shared};

/// Listeners live as long as the page, so their closures are leaked on purpose.
fn on(
    target: &web_sys::EventTarget,
    kind: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), String> {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    target
        .add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())
        .map_err(|_| format!("{kind}: add_event_listener failed"))?;
    cb.forget();
    Ok(())
}

fn event_element(ev: &web_sys::Event) -> Option<web_sys::Element> {
    ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok())
}

/// Passive scroll listener on the scroll source, plus window resize.
pub(super) fn listen_scroll(rt: &Shared) -> Result<(), String> {
    let (window, source) = {
        let r = rt.borrow();
        (r.dom.window.clone(), r.dom.scroll_source.clone())
    };

    let rt_scroll = Rc::clone(rt);
    let sampled = source.clone();
    let on_scroll = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
        let offset = sampled.offset();
        dispatch(&rt_scroll, Event::Scroll { offset }, None);
    }) as Box<dyn FnMut(web_sys::Event)>);

    let opts = web_sys::AddEventListenerOptions::new();
    opts.set_passive(true);
    source
        .event_target()
        .add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            on_scroll.as_ref().unchecked_ref(),
            &opts,
        )
        .map_err(js_err("scroll: add_event_listener"))?;
    on_scroll.forget();

    let rt_resize = Rc::clone(rt);
    on(window.as_ref(), "resize", move |_ev| {
        let offset = source.offset();
        dispatch(&rt_resize, Event::Resize { offset }, None);
    })
}

/// Intersection watcher over the `reveal-on-scroll` collection.
pub(super) fn observe_reveals(rt: &Shared, opts: &RevealOptions) -> Result<(), String> {
    let targets = rt.borrow().dom.reveal_on_scroll.clone();
    if targets.is_empty() {
        return Ok(());
    }

    let rt_cb = Rc::clone(rt);
    let lookup = targets.clone();
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: web_sys::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web_sys::IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(index) = lookup.iter().position(|el| *el == target) else {
                    continue;
                };
                dispatch(
                    &rt_cb,
                    Event::Intersection {
                        index,
                        is_intersecting: entry.is_intersecting(),
                    },
                    Some(&target),
                );
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>);

    let init = web_sys::IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(opts.threshold));
    init.set_root_margin(&opts.root_margin);
    let observer =
        web_sys::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(js_err("IntersectionObserver::new"))?;
    for el in &targets {
        observer.observe(el);
    }
    callback.forget();
    Ok(())
}

/// Same-page anchors scroll smoothly instead of jumping.
pub(super) fn intercept_anchors(rt: &Shared) -> Result<(), String> {
    let (document, selector) = {
        let r = rt.borrow();
        (r.dom.document.clone(), r.dom.selectors.same_page_anchor.clone())
    };

    for anchor in query_all(&document, &selector) {
        let rt_cb = Rc::clone(rt);
        let doc = document.clone();
        let link = anchor.clone();
        on(anchor.as_ref(), "click", move |ev| {
            ev.prevent_default();
            let href = link.get_attribute("href").unwrap_or_default();
            let fragment = fragment_target(&href).unwrap_or_default().to_string();
            let target_found = !fragment.is_empty() && doc.get_element_by_id(&fragment).is_some();
            dispatch(
                &rt_cb,
                Event::AnchorActivated {
                    fragment,
                    target_found,
                },
                None,
            );
        })?;
    }
    Ok(())
}

/// Enter/click on booking controls, and focus rings for keyboard users.
pub(super) fn listen_keyboard(rt: &Shared) -> Result<(), String> {
    let (document, selector) = {
        let r = rt.borrow();
        (r.dom.document.clone(), r.dom.selectors.booking_control.clone())
    };

    let is_booking_control = {
        let selector = selector.clone();
        move |el: &web_sys::Element| el.matches(&selector).unwrap_or(false)
    };

    let rt_key = Rc::clone(rt);
    let matches_key = is_booking_control.clone();
    on(document.as_ref(), "keydown", move |ev| {
        let Some(key_ev) = ev.dyn_ref::<web_sys::KeyboardEvent>() else {
            return;
        };
        let key = key_ev.key();
        let on_booking_control = event_element(&ev).is_some_and(|el| matches_key(&el));
        if on_booking_control && is_activation_key(&key) {
            // Buttons synthesize a click from Enter; that would open the page twice.
            ev.prevent_default();
        }
        dispatch(
            &rt_key,
            Event::KeyDown {
                key,
                on_booking_control,
            },
            None,
        );
    })?;

    for (kind, focused) in [("focusin", true), ("focusout", false)] {
        let rt_focus = Rc::clone(rt);
        let matches_focus = is_booking_control.clone();
        on(document.as_ref(), kind, move |ev| {
            let Some(el) = event_element(&ev) else {
                return;
            };
            let on_booking_control = matches_focus(&el);
            dispatch(
                &rt_focus,
                Event::Focus {
                    on_booking_control,
                    focused,
                },
                Some(&el),
            );
        })?;
    }

    for control in query_all(&document, &selector) {
        let rt_click = Rc::clone(rt);
        on(control.as_ref(), "click", move |_ev| {
            dispatch(&rt_click, Event::BookingClicked, None);
        })?;
    }
    Ok(())
}

/// Broken images are hidden. Resource errors do not bubble, so listen in capture.
pub(super) fn listen_resource_errors(rt: &Shared) -> Result<(), String> {
    let window = rt.borrow().dom.window.clone();
    let rt_err = Rc::clone(rt);
    let cb = Closure::wrap(Box::new(move |ev: web_sys::Event| {
        let Some(el) = event_element(&ev) else {
            return;
        };
        let is_image = el.dyn_ref::<web_sys::HtmlImageElement>().is_some();
        dispatch(&rt_err, Event::ResourceError { is_image }, Some(&el));
    }) as Box<dyn FnMut(web_sys::Event)>);
    window
        .add_event_listener_with_callback_and_bool("error", cb.as_ref().unchecked_ref(), true)
        .map_err(js_err("error: add_event_listener"))?;
    cb.forget();
    Ok(())
}
