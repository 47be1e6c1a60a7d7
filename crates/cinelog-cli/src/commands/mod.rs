pub mod genres;
pub mod list;
pub mod seed;
pub mod stats;

use anyhow::bail;
use serde::de::DeserializeOwned;

#[allow(async_fn_in_trait)]
pub trait Executor {
    async fn run(self) -> anyhow::Result<()>;
}

/// Decodes successful response, error responses are turned into error with server's message
pub(crate) async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> anyhow::Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        let message = body
            .get("errors")
            .and_then(|e| e.as_array())
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .or_else(|| {
                ["error", "message"]
                    .iter()
                    .find_map(|key| body.get(*key).and_then(|v| v.as_str()).map(String::from))
            })
            .unwrap_or_else(|| "unknown error".to_string());
        bail!("Server returned {status}: {message}");
    }
    Ok(response.json().await?)
}
