//! Browser download of an [`ExportArtifact`] through a Blob object URL.

use wasm_bindgen::{JsCast, JsValue};

use super::ExportArtifact;

fn describe(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Save the artifact by clicking a temporary `<a download>` link.
pub fn download(artifact: &ExportArtifact) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let bytes = js_sys::Uint8Array::from(artifact.bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&bytes);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(artifact.mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(describe)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(describe)?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(describe)?
        .dyn_into()
        .map_err(|_| "anchor element".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(&artifact.file_name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url).map_err(describe)?;
    tracing::info!(file = %artifact.file_name, bytes = artifact.bytes.len(), "export downloaded");
    Ok(())
}
