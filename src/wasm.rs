//! WebAssembly bindings for captionmorph

use crate::{Morpher, NoMatchPolicy};
use image::RgbaImage;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmMorpher {
    inner: Morpher<image::Rgba<u8>>,
}

#[wasm_bindgen]
impl WasmMorpher {
    /// Create a morpher over an RGBA canvas
    ///
    /// # Arguments
    /// * `image_data` - RGBA bytes, row-major, `width * height * 4` long
    /// * `reference` - String describing the image from top to bottom
    #[wasm_bindgen(constructor)]
    pub fn new(image_data: &[u8], width: u32, height: u32, reference: String) -> Result<WasmMorpher, JsValue> {
        let image = RgbaImage::from_raw(width, height, image_data.to_vec())
            .ok_or_else(|| JsValue::from_str("Invalid image dimensions"))?;
        Ok(WasmMorpher { inner: Morpher::new(image, reference) })
    }

    /// Fail on target text that shares nothing with the reference instead of dropping it
    #[wasm_bindgen]
    pub fn set_strict(&mut self, enabled: bool) {
        let policy = if enabled { NoMatchPolicy::Error } else { NoMatchPolicy::Skip };
        self.inner.set_no_match(policy);
    }

    /// Morph to `target`; returns `{ data, width, height }` with RGBA bytes in `data`
    #[wasm_bindgen]
    pub fn morph(&self, target: &str) -> Result<js_sys::Object, JsValue> {
        let out = self.inner.morph(target).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let result = js_sys::Object::new();
        js_sys::Reflect::set(&result, &"data".into(), &js_sys::Uint8Array::from(out.as_raw().as_slice()))?;
        js_sys::Reflect::set(&result, &"width".into(), &out.width().into())?;
        js_sys::Reflect::set(&result, &"height".into(), &out.height().into())?;

        Ok(result)
    }

    /// Reference ranges for `target` as a JSON array of `{start, end}`
    #[wasm_bindgen]
    pub fn ranges(&self, target: &str) -> Result<String, JsValue> {
        let ranges = self.inner.ranges(target).map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_json::to_string(&ranges).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
