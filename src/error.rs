use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

pub type Result<T> = std::result::Result<T, VizError>;

#[derive(Debug, Error)]
pub enum VizError {
    #[error("timeline boundary {name} = {value} is outside [0, 1]")]
    BoundaryOutOfRange { name: &'static str, value: f32 },

    #[error("timeline boundary {name} = {value} comes before {prev_name} = {prev}")]
    BoundaryOrder {
        name: &'static str,
        value: f32,
        prev_name: &'static str,
        prev: f32,
    },

    #[error("invalid config value for `{key}`: {value:?}")]
    InvalidOverride { key: String, value: String },

    #[error("element #{0} not found")]
    MissingElement(&'static str),

    #[error("no {0} available")]
    MissingGlobal(&'static str),

    #[error("WebGL2 not supported")]
    WebGl2Unsupported,

    #[error("shader error: {0}")]
    Shader(String),

    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for VizError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{value:?}"));
        VizError::Js(msg)
    }
}

impl From<VizError> for JsValue {
    fn from(err: VizError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
