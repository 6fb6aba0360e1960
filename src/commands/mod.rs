//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.
//!
//! Every backend call goes through [`Bridge::invoke`]; the typed wrappers on
//! [`Api`] only name the command and shape the argument bag.

mod verdaccio;
mod config;
mod packages;
mod settings;
mod users;
mod system;

use leptos::logging::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::errors::BackendError;

pub use packages::BulkScope;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], js_name = invoke, catch)]
    async fn tauri_invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Transport from the UI to backend commands
#[allow(async_fn_in_trait)]
pub trait Bridge {
    /// Send `cmd` with an argument object, resolve with the raw result
    async fn invoke(&self, cmd: &str, args: Value) -> Result<Value, BackendError>;
}

/// Bridge over `window.__TAURI__.core.invoke`
#[derive(Debug, Clone, Copy, Default)]
pub struct TauriBridge;

impl Bridge for TauriBridge {
    async fn invoke(&self, cmd: &str, args: Value) -> Result<Value, BackendError> {
        // Maps must arrive as plain objects for Tauri's argument lookup
        let js_args = args
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| BackendError::Decode(format!("argument encoding failed: {}", e)))?;

        let result = tauri_invoke(cmd, js_args).await.map_err(rejection_to_error)?;

        if result.is_undefined() || result.is_null() {
            return Ok(Value::Null);
        }
        // Read back through JSON text so integers stay integers
        let text = js_sys::JSON::stringify(&result)
            .ok()
            .and_then(|s| s.as_string())
            .ok_or_else(|| BackendError::Decode(format!("{} returned a non-JSON value", cmd)))?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Tauri rejects with the command's error string; anything else thrown means
/// the IPC layer itself failed.
fn rejection_to_error(err: JsValue) -> BackendError {
    if let Some(message) = err.as_string() {
        return BackendError::Rejected(message);
    }
    if let Some(js_err) = err.dyn_ref::<js_sys::Error>() {
        return BackendError::Unreachable(String::from(js_err.message()));
    }
    match js_sys::JSON::stringify(&err).ok().and_then(|s| s.as_string()) {
        Some(text) => BackendError::Rejected(text),
        None => BackendError::Unreachable(format!("{:?}", err)),
    }
}

/// Typed command surface over a [`Bridge`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Api<B = TauriBridge> {
    bridge: B,
}

/// The API type pages use at runtime
pub type ConsoleApi = Api<TauriBridge>;

impl<B: Bridge> Api<B> {
    pub fn new(bridge: B) -> Self {
        Self { bridge }
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Invoke `cmd` and decode its result
    async fn call<A, R>(&self, cmd: &str, args: &A) -> Result<R, BackendError>
    where
        A: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let value = self.send(cmd, args).await?;
        serde_json::from_value(value).map_err(|e| {
            warn!("[Bridge] {} returned an unexpected shape: {}", cmd, e);
            BackendError::Decode(e.to_string())
        })
    }

    /// Invoke `cmd` and discard its result
    async fn call_unit<A>(&self, cmd: &str, args: &A) -> Result<(), BackendError>
    where
        A: Serialize + ?Sized,
    {
        self.send(cmd, args).await.map(|_| ())
    }

    async fn send<A>(&self, cmd: &str, args: &A) -> Result<Value, BackendError>
    where
        A: Serialize + ?Sized,
    {
        let args = serde_json::to_value(args)?;
        self.bridge.invoke(cmd, args).await.inspect_err(|e| {
            warn!("[Bridge] {} failed: {}", cmd, e);
        })
    }
}

/// Argument bag for commands that take no parameters
#[derive(Serialize)]
struct NoArgs {}

const NO_ARGS: &NoArgs = &NoArgs {};
