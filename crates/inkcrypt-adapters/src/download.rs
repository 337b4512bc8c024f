//! Local save of signed documents
//!
//! In the browser the payload becomes a temporary object URL that an anchor
//! element downloads; the URL is revoked right after. Natively the payload is
//! written into the configured download directory.

use inkcrypt_core::{DownloadPort, PortError};

#[cfg(target_arch = "wasm32")]
pub type PlatformDownload = BrowserDownload;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformDownload = DirectoryDownload;

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct BrowserDownload;

#[cfg(target_arch = "wasm32")]
impl BrowserDownload {
    pub fn from_config(_config: &crate::ClientConfig) -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
impl DownloadPort for BrowserDownload {
    fn save(&self, filename: &str, bytes: Vec<u8>) -> Result<(), PortError> {
        use wasm_bindgen::JsCast;

        let js_err = |e: wasm_bindgen::JsValue| PortError::Io(format!("{e:?}"));

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| PortError::Io("no document available".to_owned()))?;

        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(bytes.as_slice()));
        drop(bytes);

        let options = web_sys::BlobPropertyBag::new();
        options.set_type(inkcrypt_core::PDF_MEDIA_TYPE);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(js_err)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let anchor = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| PortError::Io("anchor element cast failed".to_owned()))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.click();

        web_sys::Url::revoke_object_url(&url).map_err(js_err)?;
        tracing::debug!(filename, "browser download triggered");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct DirectoryDownload {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirectoryDownload {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &crate::ClientConfig) -> Self {
        Self::new(config.download_dir.clone())
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl DownloadPort for DirectoryDownload {
    fn save(&self, filename: &str, bytes: Vec<u8>) -> Result<(), PortError> {
        // Only the final component; uploaded names must not escape the directory.
        let name = std::path::Path::new(filename)
            .file_name()
            .ok_or_else(|| PortError::Validation(format!("invalid file name '{filename}'")))?;
        std::fs::create_dir_all(&self.dir).map_err(|e| PortError::Io(e.to_string()))?;
        let target = self.dir.join(name);
        std::fs::write(&target, bytes).map_err(|e| PortError::Io(e.to_string()))?;
        tracing::info!(path = %target.display(), "signed document written");
        Ok(())
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use inkcrypt_core::{Document, PDF_MEDIA_TYPE};

    fn scratch_dir(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("inkcrypt-download-{tag}-{}", std::process::id()))
    }

    #[test]
    fn writes_payload_under_directory() {
        let dir = scratch_dir("write");
        let sink = DirectoryDownload::new(&dir);

        sink.save("signed_contract.pdf", b"%PDF-signed".to_vec())
            .expect("save");

        let written = std::fs::read(dir.join("signed_contract.pdf")).expect("read back");
        assert_eq!(written, b"%PDF-signed");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn strips_directory_components() {
        let dir = scratch_dir("strip");
        let sink = DirectoryDownload::new(&dir);
        let document = Document::new("../../x.pdf", PDF_MEDIA_TYPE, b"x".to_vec());

        sink.save(&document.signed_filename(), b"x".to_vec())
            .expect("save");

        assert!(dir.join("signed_x.pdf").exists());
        sink.save("nested/signed_y.pdf", b"y".to_vec())
            .expect("save nested");
        assert!(dir.join("signed_y.pdf").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
