use canteen_admin::AppConfig;
use canteen_admin_frontend::App;
use leptos::prelude::*;

#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

// SAFETY: This application is single threaded, so using AssumeSingleThreaded is allowed.
#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_build_env();
    wasm_logger::init(wasm_logger::Config::new(config.log_level));
    log::info!("[Main] API base: {}", config.api_base_url);

    mount_to_body(App);
}
