use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use crate::models::ExitStatus;
use super::resolver::{has_unresolved, resolve_template};
use super::RunContext;
use tracing::debug;

/// Spawn a local process trigger and capture combined stdout + stderr.
/// Failures never escape: spawn errors, timeouts and collection errors are
/// all encoded in the returned status.
pub async fn invoke_local(
    program: &str,
    args: &[String],
    context: &RunContext,
) -> (String, Option<ExitStatus>) {
    let program = resolve_template(program, context);
    let args: Vec<String> = args.iter().map(|a| resolve_template(a, context)).collect();

    if has_unresolved(&program) || args.iter().any(|a| has_unresolved(a)) {
        return (
            "unresolved placeholder in trigger argv".to_string(),
            Some(ExitStatus::Error),
        );
    }

    debug!(program = %program, "Spawning local trigger");

    let child = match Command::new(&program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            return (
                format!("failed to spawn {}: {}", program, e),
                Some(ExitStatus::Error),
            );
        }
    };

    match tokio::time::timeout(
        Duration::from_secs(context.timeout_secs),
        child.wait_with_output(),
    )
    .await
    {
        Err(_) => (
            format!("timed out after {}s", context.timeout_secs),
            Some(ExitStatus::Timeout),
        ),
        Ok(Err(e)) => (
            format!("failed to collect output: {}", e),
            Some(ExitStatus::Error),
        ),
        Ok(Ok(output)) => {
            let mut collected = String::from_utf8_lossy(&output.stdout).to_string();
            collected.push_str(&String::from_utf8_lossy(&output.stderr));
            let code = output.status.code().unwrap_or(-1);
            (collected, Some(ExitStatus::Exited(code)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn make_context(timeout_secs: u64) -> RunContext {
        RunContext {
            scratch_dir: PathBuf::from("/tmp"),
            target: None,
            timeout_secs,
        }
    }

    #[tokio::test]
    async fn test_invoke_echo_captures_output() {
        let ctx = make_context(5);
        let (output, status) =
            invoke_local("echo", &["hello".to_string()], &ctx).await;
        assert!(output.contains("hello"));
        assert_eq!(status, Some(ExitStatus::Exited(0)));
    }

    #[tokio::test]
    async fn test_invoke_nonzero_exit_code() {
        let ctx = make_context(5);
        let (_, status) = invoke_local("false", &[], &ctx).await;
        assert_eq!(status, Some(ExitStatus::Exited(1)));
    }

    #[tokio::test]
    async fn test_invoke_missing_program_is_error_status() {
        let ctx = make_context(5);
        let (output, status) =
            invoke_local("definitely-not-a-real-binary", &[], &ctx).await;
        assert_eq!(status, Some(ExitStatus::Error));
        assert!(output.contains("failed to spawn"));
    }

    #[tokio::test]
    async fn test_invoke_timeout() {
        let ctx = make_context(1);
        let (output, status) =
            invoke_local("sleep", &["10".to_string()], &ctx).await;
        assert_eq!(status, Some(ExitStatus::Timeout));
        assert!(output.contains("timed out"));
    }

    #[tokio::test]
    async fn test_unresolved_placeholder_is_error_status() {
        let ctx = make_context(5);
        let (output, status) =
            invoke_local("curl", &["{target}/vulns".to_string()], &ctx).await;
        assert_eq!(status, Some(ExitStatus::Error));
        assert!(output.contains("unresolved placeholder"));
    }
}
