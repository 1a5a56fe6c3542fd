use wasm_bindgen::prelude::*;

use super::{decode_output, encode_args, Backend, Command};
use crate::error::BackendError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"], js_name = invoke)]
    async fn tauri_invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Calls backend commands through `window.__TAURI__.core.invoke`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TauriBackend;

impl TauriBackend {
    /// Whether the page runs inside the desktop shell.
    pub fn is_available() -> bool {
        if !cfg!(target_arch = "wasm32") {
            return false;
        }
        web_sys::window()
            .and_then(|window| js_sys::Reflect::get(&window, &JsValue::from_str("__TAURI__")).ok())
            .map(|tauri| !tauri.is_undefined())
            .unwrap_or(false)
    }
}

impl Backend for TauriBackend {
    async fn call<C: Command>(&self, command: &C) -> Result<C::Output, BackendError> {
        if !Self::is_available() {
            return Err(BackendError::Unavailable(format!(
                "`{}` needs the desktop shell",
                C::NAME
            )));
        }
        let args = encode_args(command)?;
        let args = to_js(&args).map_err(|message| BackendError::Encode {
            command: C::NAME,
            message,
        })?;

        tracing::debug!(command = C::NAME, "invoke");
        match tauri_invoke(C::NAME, args).await {
            Ok(value) => {
                let value = from_js(&value).map_err(|message| BackendError::Decode {
                    command: C::NAME,
                    message,
                })?;
                decode_output::<C>(value)
            }
            Err(rejection) => {
                let err = match rejection.as_string() {
                    Some(message) => BackendError::from_message(message),
                    None => from_js(&rejection)
                        .map(BackendError::from_rejection)
                        .unwrap_or_else(BackendError::Command),
                };
                tracing::warn!(command = C::NAME, error = %err, "command rejected");
                Err(err)
            }
        }
    }
}

fn to_js(value: &serde_json::Value) -> Result<JsValue, String> {
    let raw = value.to_string();
    js_sys::JSON::parse(&raw).map_err(describe)
}

fn from_js(value: &JsValue) -> Result<serde_json::Value, String> {
    if value.is_undefined() || value.is_null() {
        return Ok(serde_json::Value::Null);
    }
    let raw: String = js_sys::JSON::stringify(value).map_err(describe)?.into();
    serde_json::from_str(&raw).map_err(|err| err.to_string())
}

fn describe(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
