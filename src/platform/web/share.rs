//! Web Share API with clipboard fallback

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::ShareData;

use crate::share::{COPIED_NOTICE, SHARE_TEXT, SHARE_TITLE, ShareMethod, choose_method};

/// Share the current page. Failures (dismissed dialog, denied clipboard)
/// are ignored.
pub fn share_current_page() {
    spawn_local(async {
        if let Err(e) = try_share().await {
            log::debug!("Share dismissed or failed: {:?}", e);
        }
    });
}

async fn try_share() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let url = window.location().href()?;
    let navigator = window.navigator();
    let has_share = js_sys::Reflect::has(&navigator, &JsValue::from_str("share"))?;

    match choose_method(has_share) {
        ShareMethod::Native => {
            let data = ShareData::new();
            data.set_title(SHARE_TITLE);
            data.set_text(SHARE_TEXT);
            data.set_url(&url);
            JsFuture::from(navigator.share_with_data(&data)).await?;
        }
        ShareMethod::Clipboard => {
            JsFuture::from(navigator.clipboard().write_text(&url)).await?;
            window.alert_with_message(COPIED_NOTICE)?;
        }
    }
    Ok(())
}
