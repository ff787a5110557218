// The page's `<script type="module">` imports the generated bundle, which runs
// `wasm_start` once the module is instantiated. Outside wasm there is no page
// to drive, so the binary exits immediately.

fn main() {}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_start() {
    hairzone_web::start();
}
