//! Responsive dropdown navigation for the site shell
//!
//! Purely presentational and independent of the simulator: toggles an
//! `open` class on `.dropdown` elements. Click-to-toggle is mobile-only;
//! above the breakpoint menus are hover-driven in CSS and any leftover
//! `open` classes are cleared on resize.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

/// Viewport width (CSS pixels) at or below which dropdowns toggle on click
pub const MOBILE_BREAKPOINT: f64 = 768.0;

fn is_mobile() -> bool {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .map(|w| w <= MOBILE_BREAKPOINT)
        .unwrap_or(false)
}

/// Remove the `open` class from every dropdown
fn close_all() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Ok(menus) = document.query_selector_all(".dropdown.open") {
        for i in 0..menus.length() {
            if let Some(el) = menus.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                let _ = el.class_list().remove_1("open");
            }
        }
    }
}

/// Wire up dropdown toggles, outside-click dismissal, and the resize guard
///
/// Missing nav markup is not an error; pages without a menu simply get
/// no listeners.
pub fn init() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    // Toggle buttons
    if let Ok(toggles) = document.query_selector_all(".dropdown-toggle") {
        for i in 0..toggles.length() {
            let Some(toggle) = toggles.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                if !is_mobile() {
                    return;
                }
                event.stop_propagation();
                let Some(target) = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.closest(".dropdown").ok().flatten())
                else {
                    return;
                };
                let was_open = target.class_list().contains("open");
                // only one menu open at a time
                close_all();
                if !was_open {
                    let _ = target.class_list().add_1("open");
                }
            });
            let _ = toggle
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    // Clicking anywhere outside a dropdown dismisses open menus
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            let inside = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(".dropdown").ok().flatten())
                .is_some();
            if !inside {
                close_all();
            }
        });
        let _ = document
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Crossing the breakpoint back to desktop clears toggled state
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if !is_mobile() {
                close_all();
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    log::info!("Navigation controller initialized");
}
