use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Vulnerability class exercised by a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    DirListing,
    FileRead,
    FileWrite,
    FileRename,
    FileInclude,
    CommandExec,
    Ssrf,
    SqlInjection,
    Xss,
    WebShell,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirListing => "dir-listing",
            Self::FileRead => "file-read",
            Self::FileWrite => "file-write",
            Self::FileRename => "file-rename",
            Self::FileInclude => "file-include",
            Self::CommandExec => "command-exec",
            Self::Ssrf => "ssrf",
            Self::SqlInjection => "sql-injection",
            Self::Xss => "xss",
            Self::WebShell => "web-shell",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Patch => "PATCH",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Options => reqwest::Method::OPTIONS,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

/// How a scenario is exercised. One typed variant per scenario, resolved at
/// load time; request shape is never inferred from loosely-typed input.
///
/// String fields may contain `{scratch}` and `{target}` placeholders,
/// substituted against the run context at invoke time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Trigger {
    /// Spawn a local process with the declared argv.
    LocalCall {
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
    /// Issue exactly one outbound HTTP request.
    HttpRequest {
        method: HttpMethod,
        url: String,
        #[serde(default)]
        headers: BTreeMap<String, String>,
        #[serde(default)]
        body: Option<String>,
    },
}

impl Trigger {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LocalCall { .. } => "local-call",
            Self::HttpRequest { .. } => "http-request",
        }
    }
}

/// Declarative assertion evaluated against an invocation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Expectation {
    /// Raw output contains the substring, byte-exact and case-sensitive.
    ContainsText { text: String },
    /// A file exists under the run's scratch directory after invocation.
    FileExists { path: PathBuf },
    /// No file at the path under the scratch directory after invocation.
    FileAbsent { path: PathBuf },
    ExitCodeEquals { code: i32 },
    /// Side-effect paths recorded by the invocation are a superset of the
    /// declared set. Order is irrelevant.
    PathsAccessed { paths: Vec<PathBuf> },
}

/// A named, immutable description of one exploit-style interaction and its
/// expected observable effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub category: Category,
    #[serde(default)]
    pub description: Option<String>,
    pub trigger: Trigger,
    pub expectation: Expectation,
}
