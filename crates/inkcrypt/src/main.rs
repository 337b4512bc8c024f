//! InkCrypt: sign, verify and revoke PDF documents against an InkCrypt service

mod app;
mod runtime;
mod ui;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eyre::Result<()> {
    use eframe::egui;
    use inkcrypt_adapters::{ClientConfig, HttpSigningService, PlatformDownload};

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = ClientConfig::default();
    tracing::info!(base_url = %config.service_base_url, "Starting InkCrypt");

    let downloads = PlatformDownload::from_config(&config);
    let service = HttpSigningService::new(config)?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("InkCrypt")
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([480.0, 400.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "InkCrypt",
        native_options,
        Box::new(|cc| Ok(Box::new(app::App::new(cc, service, downloads)))),
    )
    .map_err(|e| eyre::eyre!("eframe exited with error: {e}"))
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use inkcrypt_adapters::{ClientConfig, HttpSigningService, PlatformDownload};
    use wasm_bindgen::JsCast;

    tracing_wasm::set_as_global_default();

    let config = ClientConfig::default();
    let downloads = PlatformDownload::from_config(&config);
    let service = match HttpSigningService::new(config) {
        Ok(service) => service,
        Err(e) => {
            tracing::error!(error = %e, "failed to build http client");
            return;
        }
    };

    wasm_bindgen_futures::spawn_local(async move {
        let Some(canvas) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("inkcrypt_canvas"))
            .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            tracing::error!("canvas #inkcrypt_canvas not found");
            return;
        };

        let start = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| Ok(Box::new(app::App::new(cc, service, downloads)))),
            )
            .await;
        if let Err(e) = start {
            tracing::error!(error = ?e, "failed to start eframe");
        }
    });
}
