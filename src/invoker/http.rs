use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;
use crate::models::{ExitStatus, HttpMethod};
use super::resolver::{has_unresolved, resolve_template};
use super::RunContext;
use tracing::debug;

/// Issue the single outbound request a scenario declares. The payload is
/// reproduced faithfully, with no interpretation or sanitization. The
/// response status becomes the exit status and the body the raw output.
pub async fn invoke_http(
    client: &Client,
    method: HttpMethod,
    url: &str,
    headers: &BTreeMap<String, String>,
    body: &Option<String>,
    context: &RunContext,
) -> (String, Option<ExitStatus>) {
    let url = resolve_template(url, context);
    if has_unresolved(&url) {
        return (
            format!("unresolved placeholder in trigger url: {}", url),
            Some(ExitStatus::Error),
        );
    }

    debug!(method = method.as_str(), url = %url, "Sending HTTP trigger");

    let mut request = client
        .request(method.into(), url.as_str())
        .timeout(Duration::from_secs(context.timeout_secs));

    for (name, value) in headers {
        request = request.header(name.as_str(), resolve_template(value, context));
    }
    if let Some(body) = body {
        // Bodies may legitimately contain braces (JSON payloads), so they are
        // resolved but never checked for leftover placeholders.
        request = request.body(resolve_template(body, context));
    }

    match request.send().await {
        Ok(response) => {
            let status = response.status().as_u16() as i32;
            match response.text().await {
                Ok(text) => (text, Some(ExitStatus::Exited(status))),
                Err(e) => (
                    format!("failed to read response body: {}", e),
                    Some(ExitStatus::Error),
                ),
            }
        }
        Err(e) if e.is_timeout() => (
            format!("request timed out after {}s", context.timeout_secs),
            Some(ExitStatus::Timeout),
        ),
        Err(e) => (format!("request failed: {}", e), Some(ExitStatus::Error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn make_context() -> RunContext {
        RunContext {
            scratch_dir: PathBuf::from("/tmp"),
            target: None,
            timeout_secs: 2,
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_error_status() {
        let client = Client::new();
        let (output, status) = invoke_http(
            &client,
            HttpMethod::Get,
            "http://127.0.0.1:1/vulns",
            &BTreeMap::new(),
            &None,
            &make_context(),
        )
        .await;
        assert_eq!(status, Some(ExitStatus::Error));
        assert!(output.contains("request failed"));
    }

    #[tokio::test]
    async fn test_unresolved_target_is_error_status() {
        let client = Client::new();
        let (output, status) = invoke_http(
            &client,
            HttpMethod::Get,
            "{target}/vulns/ssrf",
            &BTreeMap::new(),
            &None,
            &make_context(),
        )
        .await;
        assert_eq!(status, Some(ExitStatus::Error));
        assert!(output.contains("unresolved placeholder"));
    }
}
