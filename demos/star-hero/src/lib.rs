use wasm_bindgen::prelude::*;

star_web::export_hero!("star-hero");
