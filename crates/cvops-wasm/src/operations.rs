//! Catalog listing and operation dispatch.
//!
//! Parameters arrive as a plain JS object of form fields; values are strings
//! exactly as a form would submit them and are coerced by the core crate.

use std::collections::BTreeMap;

use crate::types::JsImage;
use cvops_core::{DispatchError, Image};
use wasm_bindgen::prelude::*;

/// The ordered category → operations listing, as
/// `[{ category, operations: [...] }, ...]`.
#[wasm_bindgen]
pub fn catalog() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&cvops_core::catalog()).map_err(crate::js_error)
}

/// Apply the operation selected by (`category`, `operation`).
///
/// `params` is an object of string fields; `undefined` or `null` means no
/// parameters. Errors carry the user-facing dispatch message.
#[wasm_bindgen]
pub fn apply_operation(
    category: &str,
    operation: &str,
    params: JsValue,
    image: &JsImage,
) -> Result<JsImage, JsValue> {
    let fields: BTreeMap<String, String> = if params.is_undefined() || params.is_null() {
        BTreeMap::new()
    } else {
        serde_wasm_bindgen::from_value(params).map_err(crate::js_error)?
    };
    let input = image.to_image().map_err(crate::js_error)?;
    run(category, operation, &fields, &input)
        .map(JsImage::from_image)
        .map_err(crate::js_error)
}

fn run(
    category: &str,
    operation: &str,
    fields: &BTreeMap<String, String>,
    image: &Image,
) -> Result<Image, DispatchError> {
    cvops_core::dispatch(category, operation, fields, image)
}


/// WASM-specific tests that require JsValue.
///
/// These run on wasm32 targets only. Use `wasm-pack test` to run them.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde::Serialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn js_object(pairs: &[(&str, &str)]) -> JsValue {
        let map: BTreeMap<&str, &str> = pairs.iter().copied().collect();
        map.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn test_apply_operation_with_params_object() {
        let image = JsImage::from_image(Image::from_gray(2, 1, &[10, 200]).unwrap());
        let out = apply_operation(
            "Point Operations",
            "Threshold transformation",
            js_object(&[("thresh", "127")]),
            &image,
        )
        .unwrap();
        assert_eq!(out.pixels(), vec![0, 0, 0, 255, 255, 255]);
    }

    #[wasm_bindgen_test]
    fn test_apply_operation_without_params() {
        let image = JsImage::from_image(Image::filled(3, 3, 40).unwrap());
        let out = apply_operation("Point Operations", "Negative transformation", JsValue::UNDEFINED, &image)
            .unwrap();
        assert!(out.pixels().iter().all(|&v| v == 215));
    }

    #[wasm_bindgen_test]
    fn test_apply_operation_unknown_pair() {
        let image = JsImage::from_image(Image::filled(2, 2, 0).unwrap());
        let err = apply_operation("Point Operations", "Blur", JsValue::NULL, &image).unwrap_err();
        assert_eq!(err.as_string().as_deref(), Some("Selected operation is not available."));
    }

    #[wasm_bindgen_test]
    fn test_catalog_is_js_value() {
        assert!(catalog().unwrap().is_object());
    }
}
