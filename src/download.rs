use gloo::file::{Blob, ObjectUrl};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

/// Hands `text` to the browser as a file download.
pub fn offer_download(filename: &str, text: &str, mime_type: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("no document, skipping download of {filename}");
        return;
    };
    let Some(body) = document.body() else {
        return;
    };

    let blob = Blob::new_with_options(text, Some(mime_type));
    let url = ObjectUrl::from(blob);

    let anchor = match document
        .create_element("a")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlAnchorElement>().ok())
    {
        Some(anchor) => anchor,
        None => {
            log::warn!("could not create download link for {filename}");
            return;
        }
    };
    anchor.set_href(&url);
    anchor.set_download(filename);

    if body.append_child(&anchor).is_ok() {
        anchor.click();
        anchor.remove();
    }
    // Revoking too early can cancel the download in some browsers.
    Timeout::new(1_000, move || drop(url)).forget();
}
