use crate::translator::{translate_xml, TranslateOptions};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn translate_project_xml(source: &str) -> Result<String, JsValue> {
    translate_project_xml_with_options(source, false)
}

#[wasm_bindgen]
pub fn translate_project_xml_with_options(source: &str, strict: bool) -> Result<String, JsValue> {
    translate_xml(source, TranslateOptions { strict })
        .map(|translation| translation.text)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
