use std::cell::RefCell;
use std::rc::Rc;

use hairzone::controller::Controller;
use hairzone::page::{Command, Event};
use hairzone::state::translate_y_css;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

mod dom;
mod listeners;
mod timers;

use dom::{set_element_style, set_style, PageDom};
use timers::BrowserTimers;

pub(crate) struct Runtime {
    controller: Controller,
    dom: PageDom,
    timers: BrowserTimers,
}

pub(crate) type Shared = Rc<RefCell<Runtime>>;

/// Boot the page controller once the document has been parsed.
pub fn start() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(boot_and_report);
        if document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            .is_err()
        {
            web_sys::console::error_1(&"DOMContentLoaded: add_event_listener failed".into());
        }
    } else {
        boot_and_report();
    }
}

fn boot_and_report() {
    if let Err(e) = boot() {
        web_sys::console::error_1(&format!("Error: {e}").into());
    }
}

fn boot() -> Result<(), String> {
    let window = web_sys::window().ok_or("no window".to_string())?;
    let document = window.document().ok_or("no document".to_string())?;

    let cfg = dom::load_config(&document);
    let page = PageDom::discover(window, &cfg)?;
    let inventory = page.inventory();

    let mut controller = Controller::new(cfg);
    let wiring = controller.bootstrap(&inventory).map_err(|e| e.to_string())?;

    let rt: Shared = Rc::new(RefCell::new(Runtime {
        controller,
        dom: page,
        timers: BrowserTimers::default(),
    }));
    apply_all(&rt, wiring, None);
    Ok(())
}

/// Feed one browser event through the controller and apply what comes back.
///
/// No `RefCell` borrow is held while the DOM is touched, since DOM calls can
/// synchronously dispatch further events.
pub(crate) fn dispatch(rt: &Shared, event: Event, target: Option<&web_sys::Element>) {
    let cmds = rt.borrow_mut().controller.handle(event);
    apply_all(rt, cmds, target);
}

fn apply_all(rt: &Shared, cmds: Vec<Command>, target: Option<&web_sys::Element>) {
    for cmd in cmds {
        if let Err(e) = apply(rt, cmd, target) {
            web_sys::console::warn_1(&e.into());
        }
    }
}

fn apply(rt: &Shared, cmd: Command, target: Option<&web_sys::Element>) -> Result<(), String> {
    match cmd {
        Command::ScheduleTimer { id, delay_ms, .. } => timers::schedule(rt, id, delay_ms),
        Command::CancelTimer(id) => {
            let mut r = rt.borrow_mut();
            let window = r.dom.window.clone();
            r.timers.cancel(&window, id);
            Ok(())
        }

        Command::ListenScroll => listeners::listen_scroll(rt),
        Command::ObserveReveals(opts) => listeners::observe_reveals(rt, &opts),
        Command::InterceptAnchors => listeners::intercept_anchors(rt),
        Command::ListenKeyboard => listeners::listen_keyboard(rt),
        Command::ListenResourceErrors => listeners::listen_resource_errors(rt),

        Command::HidePreloader => {
            let Some(el) = rt.borrow().dom.preloader.clone() else {
                return Ok(());
            };
            set_style(&el, "opacity", "0")?;
            set_style(&el, "visibility", "hidden")
        }
        Command::SetFloatingButton { visible } => {
            let Some(el) = rt.borrow().dom.floating_button.clone() else {
                return Ok(());
            };
            set_style(&el, "display", if visible { "flex" } else { "none" })
        }
        Command::SetParallax { translate_y } => {
            let Some(el) = rt.borrow().dom.hero_background.clone() else {
                return Ok(());
            };
            set_style(&el, "transform", &translate_y_css(translate_y))
        }
        Command::AddRevealed(reveal) => {
            let (el, class) = {
                let r = rt.borrow();
                (r.dom.reveal_element(reveal), r.dom.selectors.revealed_class.clone())
            };
            let Some(el) = el else {
                return Ok(());
            };
            el.class_list()
                .add_1(&class)
                .map_err(|_| "class_list: add failed".to_string())
        }
        Command::ShowHero(index) => {
            let Some(el) = rt.borrow().dom.hero_fade_in.get(index).cloned() else {
                return Ok(());
            };
            set_style(&el, "opacity", "1")?;
            set_style(&el, "transform", "translateY(0)")
        }
        Command::ScrollIntoView { id } => {
            let document = rt.borrow().dom.document.clone();
            let Some(el) = document.get_element_by_id(&id) else {
                return Ok(());
            };
            let opts = web_sys::ScrollIntoViewOptions::new();
            opts.set_behavior(web_sys::ScrollBehavior::Smooth);
            el.scroll_into_view_with_scroll_into_view_options(&opts);
            Ok(())
        }
        Command::OpenBooking { url } => {
            let window = rt.borrow().dom.window.clone();
            window
                .open_with_url_and_target(&url, "_blank")
                .map(|_| ())
                .map_err(|_| "window.open failed".to_string())
        }
        Command::SetFocusRing { focused } => {
            let Some(el) = target else {
                return Ok(());
            };
            let class = rt.borrow().dom.selectors.focus_class.clone();
            el.class_list()
                .toggle_with_force(&class, focused)
                .map(|_| ())
                .map_err(|_| "class_list: toggle failed".to_string())
        }
        Command::HideFailedImage => match target {
            Some(el) => set_element_style(el, "display", "none"),
            None => Ok(()),
        },
    }
}
