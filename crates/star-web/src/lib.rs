pub mod canvas;
pub mod config;
pub mod dom;
pub mod fetch;
pub mod frame_loop;
pub mod listeners;
pub mod runner;

pub use canvas::Canvas2dRenderer;
pub use config::HeroConfig;
pub use runner::{mount, HeroRunner, Mounted};

/// Generate the `#[wasm_bindgen]` entry points for a hero page.
///
/// Generates:
/// - `thread_local!` storage for the mounted hero
/// - `hero_mount(config)`, which takes an optional plain JS object
/// - `hero_unmount()`, which stops the frame loop, removes listeners and
///   aborts pending catalog requests
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// star_web::export_hero!("my-hero");
/// ```
#[macro_export]
macro_rules! export_hero {
    ($app_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static MOUNTED: RefCell<Option<$crate::Mounted>> = RefCell::new(None);
        }

        #[wasm_bindgen]
        pub fn hero_mount(config: JsValue) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            // Remounting replaces the previous hero
            hero_unmount();
            let config = $crate::HeroConfig::from_js(&config)?;
            let mounted = $crate::mount(config)?;
            MOUNTED.with(|cell| {
                *cell.borrow_mut() = Some(mounted);
            });
            log::info!("{}: mounted", $app_name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn hero_unmount() {
            let previous = MOUNTED.with(|cell| cell.borrow_mut().take());
            if previous.is_some() {
                drop(previous);
                log::info!("{}: unmounted", $app_name);
            }
        }
    };
}
