use crate::core::LoadError;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn reason(e: &JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// Fetch `path` and decode it into an `AudioBuffer`.
///
/// The fetch is never aborted; callers discard superseded results by
/// generation instead.
pub async fn load_track(ctx: &web::AudioContext, path: &str) -> Result<web::AudioBuffer, LoadError> {
    let fetch_err = |e: JsValue| LoadError::Fetch {
        path: path.to_string(),
        reason: reason(&e),
    };
    let decode_err = |e: JsValue| LoadError::Decode {
        path: path.to_string(),
        reason: reason(&e),
    };

    let window = web::window().ok_or_else(|| fetch_err(JsValue::from_str("no window")))?;
    let resp_value = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(fetch_err)?;
    let resp: web::Response = resp_value.dyn_into().map_err(fetch_err)?;
    if !resp.ok() {
        return Err(LoadError::Status {
            path: path.to_string(),
            status: resp.status(),
        });
    }
    let bytes = JsFuture::from(resp.array_buffer().map_err(fetch_err)?)
        .await
        .map_err(fetch_err)?;
    let bytes: js_sys::ArrayBuffer = bytes.dyn_into().map_err(fetch_err)?;

    let decoded = JsFuture::from(ctx.decode_audio_data(&bytes).map_err(decode_err)?)
        .await
        .map_err(decode_err)?;
    let buffer: web::AudioBuffer = decoded.dyn_into().map_err(decode_err)?;
    log::info!(
        "[loader] decoded {} ({:.1}s, {} ch)",
        path,
        buffer.duration(),
        buffer.number_of_channels()
    );
    Ok(buffer)
}
