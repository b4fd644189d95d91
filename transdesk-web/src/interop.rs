use std::time::Duration;

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use transdesk_core::api::Sleeper;
use transdesk_core::UploadedFile;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Poll interval timer on the browser event loop
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerSleeper;

#[async_trait(?Send)]
impl Sleeper for TimerSleeper {
    async fn sleep(&self, duration: Duration) {
        TimeoutFuture::new(duration.as_millis().min(u32::MAX as u128) as u32).await;
    }
}

fn file_input(input_id: &str) -> Option<web_sys::HtmlInputElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(input_id)?
        .dyn_into::<web_sys::HtmlInputElement>()
        .ok()
}

/// First file picked in the `<input type="file">` with this id.
pub fn selected_file(input_id: &str) -> Option<web_sys::File> {
    file_input(input_id)?.files()?.get(0)
}

/// Reset a file input so picking the same file again fires `change`.
pub fn clear_file_input(input_id: &str) {
    if let Some(input) = file_input(input_id) {
        input.set_value("");
    }
}

pub fn file_metadata(file: &web_sys::File) -> UploadedFile {
    UploadedFile {
        name: file.name(),
        size: file.size().max(0.0) as u64,
        mime: file.type_(),
    }
}

/// Read a picked file as UTF-8 text.
pub async fn read_file_text(file: &web_sys::File) -> Result<String, String> {
    let value = JsFuture::from(file.text())
        .await
        .map_err(|e| format!("Failed to read file: {e:?}"))?;
    value
        .as_string()
        .ok_or_else(|| "File content is not text".to_string())
}

/// Hand downloaded bytes to the browser as a file save.
pub fn save_bytes(bytes: &[u8], filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("Window not available")?;
    let document = window.document().ok_or("Document not available")?;

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let blob = web_sys::Blob::new_with_u8_array_sequence(&parts)
        .map_err(|e| format!("Failed to build blob: {e:?}"))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Failed to create object URL: {e:?}"))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create link: {e:?}"))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "Created element is not a link")?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

/// Name for a translated download: `report.docx` becomes `report_vi.docx`.
pub fn translated_filename(original: &str, target_language: &str) -> String {
    match original.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}_{target_language}.{ext}"),
        _ if original.is_empty() => format!("translation_{target_language}"),
        _ => format!("{original}_{target_language}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translated_filename() {
        assert_eq!(translated_filename("report.docx", "vi"), "report_vi.docx");
        assert_eq!(translated_filename("archive.tar.gz", "ja"), "archive.tar_ja.gz");
        assert_eq!(translated_filename("README", "en"), "README_en");
        assert_eq!(translated_filename(".env", "en"), ".env_en");
        assert_eq!(translated_filename("", "vi"), "translation_vi");
    }
}
