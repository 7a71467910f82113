use wasm_bindgen::JsValue;

/// Root directory of the generated dataset and all sprite/picture assets.
pub const ASSET_ROOT: &str = "out";

/// Resolve a dataset-relative path (pic_path, sprite_path, ...) to a URL.
pub fn asset_url(path: &str) -> String {
    format!("{ASSET_ROOT}/{path}")
}

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub fn cerr(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}
