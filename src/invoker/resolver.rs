use super::RunContext;

/// Substitute run-context placeholders into a trigger template. `{scratch}`
/// resolves to the per-run scratch directory, `{target}` to the configured
/// target base URL.
pub fn resolve_template(template: &str, context: &RunContext) -> String {
    let mut resolved = template.replace("{scratch}", &context.scratch_dir.to_string_lossy());
    if let Some(target) = &context.target {
        resolved = resolved.replace("{target}", target.trim_end_matches('/'));
    }
    resolved
}

/// Returns true if the string still has unresolved {placeholders}.
pub fn has_unresolved(value: &str) -> bool {
    let re = regex::Regex::new(r"\{[a-z_]+\}").unwrap();
    re.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn make_context() -> RunContext {
        RunContext {
            scratch_dir: PathBuf::from("/tmp/scratch-abc"),
            target: Some("http://127.0.0.1:8080/".to_string()),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_resolve_scratch() {
        let ctx = make_context();
        assert_eq!(
            resolve_template("{scratch}/dropped.txt", &ctx),
            "/tmp/scratch-abc/dropped.txt"
        );
    }

    #[test]
    fn test_resolve_target_strips_trailing_slash() {
        let ctx = make_context();
        assert_eq!(
            resolve_template("{target}/vulns/ssrf", &ctx),
            "http://127.0.0.1:8080/vulns/ssrf"
        );
    }

    #[test]
    fn test_target_unresolved_without_configured_target() {
        let mut ctx = make_context();
        ctx.target = None;
        let resolved = resolve_template("{target}/vulns/ssrf", &ctx);
        assert!(has_unresolved(&resolved));
    }

    #[test]
    fn test_has_unresolved_false_for_plain_string() {
        assert!(!has_unresolved("cat /etc/hosts"));
    }
}
