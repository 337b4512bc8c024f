//! Executor bridge for the frame loop
//!
//! wasm32 tasks run on the browser event loop. Native tasks each get a
//! current-thread tokio runtime on a worker thread.

use std::future::Future;

#[cfg(target_arch = "wasm32")]
pub fn spawn<F, Fut>(make_task: F) -> Result<(), String>
where
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(make_task());
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn spawn<F, Fut>(make_task: F) -> Result<(), String>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    std::thread::spawn(move || runtime.block_on(make_task()));
    Ok(())
}
