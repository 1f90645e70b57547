use wasm_bindgen::JsValue;

/// Reasons the sky background could not be brought up.
#[derive(Debug, thiserror::Error)]
pub enum SkyError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("canvas `#{0}` not found")]
    CanvasNotFound(String),
    #[error("element `#{0}` is not a canvas")]
    NotACanvas(String),
    #[error("WebGL2 not supported")]
    WebGl2Unavailable,
    #[error("failed to create {0}")]
    ResourceCreation(&'static str),
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: &'static str, log: String },
    #[error("program failed to link: {0}")]
    ProgramLink(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for SkyError {
    fn from(value: JsValue) -> Self {
        SkyError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<SkyError> for JsValue {
    fn from(err: SkyError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
