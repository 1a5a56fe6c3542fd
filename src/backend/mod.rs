//! The remote-procedure boundary to the desktop backend.
//!
//! Every backend command is a [`Command`]: a serializable request with a
//! typed response. A [`Backend`] executes commands; [`TauriBackend`] does so
//! through the shell's `invoke` bridge.

pub mod commands;
pub mod tauri;
pub mod wire;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::BackendError;

pub use self::tauri::TauriBackend;

pub trait Command: Serialize {
    const NAME: &'static str;
    type Output: DeserializeOwned;
}

#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn call<C: Command>(&self, command: &C) -> Result<C::Output, BackendError>;
}

impl<B: Backend> Backend for &B {
    async fn call<C: Command>(&self, command: &C) -> Result<C::Output, BackendError> {
        (**self).call(command).await
    }
}

impl<B: Backend> Backend for std::rc::Rc<B> {
    async fn call<C: Command>(&self, command: &C) -> Result<C::Output, BackendError> {
        (**self).call(command).await
    }
}

/// Encode command arguments as JSON.
pub fn encode_args<C: Command>(command: &C) -> Result<serde_json::Value, BackendError> {
    serde_json::to_value(command).map_err(|err| BackendError::Encode {
        command: C::NAME,
        message: err.to_string(),
    })
}

/// Decode a JSON response into the command's output type.
pub fn decode_output<C: Command>(value: serde_json::Value) -> Result<C::Output, BackendError> {
    serde_json::from_value(value).map_err(|err| BackendError::Decode {
        command: C::NAME,
        message: err.to_string(),
    })
}
