pub mod config;
pub mod download;
pub mod http;

pub use config::{ClientConfig, ConfigError};
pub use download::PlatformDownload;
#[cfg(target_arch = "wasm32")]
pub use download::BrowserDownload;
#[cfg(not(target_arch = "wasm32"))]
pub use download::DirectoryDownload;
pub use http::HttpSigningService;
