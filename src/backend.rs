//! Bridge to the Tauri commands exposed by `src-tauri`.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadDirArgs<'a> {
    pub path: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadFileArgs<'a> {
    pub path: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteFileArgs<'a> {
    pub path: &'a str,
    pub content: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultPathArgs<'a> {
    pub vault_path: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalGraphArgs<'a> {
    pub vault_path: &'a str,
    pub path: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendError {
    Encode(String),
    /// The command rejected; carries the backend's message.
    Command { cmd: String, message: String },
    Decode { cmd: String, message: String },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Encode(message) => write!(f, "could not encode arguments: {message}"),
            BackendError::Command { cmd, message } => write!(f, "`{cmd}` failed: {message}"),
            BackendError::Decode { cmd, message } => {
                write!(f, "`{cmd}` returned an unexpected value: {message}")
            }
        }
    }
}

impl std::error::Error for BackendError {}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Invokes `cmd` and decodes its JSON result.
pub async fn call<A, R>(cmd: &str, args: &A) -> Result<R, BackendError>
where
    A: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let args = serde_wasm_bindgen::to_value(args)
        .map_err(|err| BackendError::Encode(err.to_string()))?;
    call_raw(cmd, args).await
}

pub async fn call_without_args<R: DeserializeOwned>(cmd: &str) -> Result<R, BackendError> {
    call_raw(cmd, JsValue::NULL).await
}

async fn call_raw<R: DeserializeOwned>(cmd: &str, args: JsValue) -> Result<R, BackendError> {
    let value = invoke(cmd, args)
        .await
        .map_err(|err| BackendError::Command {
            cmd: cmd.to_string(),
            message: describe(&err),
        })?;
    serde_wasm_bindgen::from_value(value).map_err(|err| BackendError::Decode {
        cmd: cmd.to_string(),
        message: err.to_string(),
    })
}
