use std::sync::Once;

static INIT: Once = Once::new();

/// Route `tracing` events to the browser console. Safe to call more than once.
pub fn init() {
    INIT.call_once(|| {
        #[cfg(target_arch = "wasm32")]
        tracing_wasm::set_as_global_default();
    });
}
