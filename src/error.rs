//! Error type shared by the effect modules and the wasm bindings.

use std::fmt;

#[derive(Debug)]
pub enum FxError {
    /// A typewriter was given no words to cycle through.
    EmptyWordList,
    /// Configuration text could not be parsed.
    Config(toml::de::Error),
    /// Configuration parsed but holds values the effects cannot run with.
    InvalidConfig(String),
    /// A browser API call failed.
    Js(String),
}

impl fmt::Display for FxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FxError::EmptyWordList => write!(f, "typewriter needs at least one word"),
            FxError::Config(e) => write!(f, "failed to parse config: {}", e),
            FxError::InvalidConfig(msg) => write!(f, "invalid config: {}", msg),
            FxError::Js(msg) => write!(f, "browser call failed: {}", msg),
        }
    }
}

impl std::error::Error for FxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FxError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for FxError {
    fn from(e: toml::de::Error) -> Self {
        FxError::Config(e)
    }
}

impl From<FxError> for wasm_bindgen::JsValue {
    fn from(e: FxError) -> Self {
        js_sys::Error::new(&e.to_string()).into()
    }
}

pub type Result<T> = std::result::Result<T, FxError>;
