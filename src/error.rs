use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures of the browser host. The session itself never fails: stray or
/// late events are dropped, not reported.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("no global window")]
    NoWindow,
    #[error("no document on window")]
    NoDocument,
    #[error("missing DOM element `{0}`")]
    MissingElement(&'static str),
    #[error("DOM call failed: {0}")]
    Dom(String),
    #[error("entropy source unavailable: {0}")]
    Entropy(#[from] rand::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[cfg(feature = "serde_json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Dom(format!("{value:?}"))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
