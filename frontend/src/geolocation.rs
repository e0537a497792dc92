use gloo_utils::window;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Position, PositionError};
use yew::Callback;

/// One-shot request to the browser's position provider. Exactly one of the
/// two callbacks fires; a missing geolocation object counts as a failure.
/// No retry and no timeout.
pub fn request_position(on_position: Callback<(f64, f64)>, on_error: Callback<()>) {
    let Ok(geolocation) = window().navigator().geolocation() else {
        on_error.emit(());
        return;
    };

    let success = Closure::<dyn FnMut(Position)>::new(move |position: Position| {
        let coords = position.coords();
        on_position.emit((coords.latitude(), coords.longitude()));
    });

    let on_error_cb = on_error.clone();
    let failure = Closure::<dyn FnMut(PositionError)>::new(move |_: PositionError| {
        on_error_cb.emit(());
    });

    if geolocation
        .get_current_position_with_error_callback(
            success.as_ref().unchecked_ref(),
            Some(failure.as_ref().unchecked_ref()),
        )
        .is_err()
    {
        on_error.emit(());
    }

    // The browser keeps the callbacks until the one-shot request resolves.
    success.forget();
    failure.forget();
}
