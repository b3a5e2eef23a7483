//! Minimal JSON-RPC client for querying a running service.

use serde::de::DeserializeOwned;
use serde_json::json;

/// Make a JSON-RPC call and decode the `result` field.
pub async fn call<R: DeserializeOwned>(
    rpc_url: &str,
    method: &str,
    params: serde_json::Value,
) -> anyhow::Result<R> {
    let client = reqwest::Client::new();

    let request = json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": 1
    });

    let response = client.post(rpc_url).json(&request).send().await?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP error: {}", response.status());
    }

    let body: serde_json::Value = response.json().await?;

    if let Some(error) = body.get("error") {
        anyhow::bail!("RPC error: {error}");
    }

    let result: R = serde_json::from_value(
        body.get("result")
            .ok_or_else(|| anyhow::anyhow!("Missing result"))?
            .clone(),
    )?;

    Ok(result)
}
