//! Classifier Rules
//!
//! The built-in classifier table and the auxiliary patterns.
//! Data only - patterns mirror the tracer's libc-call notation exactly,
//! any change here changes what existing traces produce.

use super::types::{Category, ClassifierDef, Normalizer};

// ============================================================================
// CLASSIFIERS
// ============================================================================

/// Built-in classifiers, in export order
pub const CLASSIFIERS: &[ClassifierDef] = &[
    ClassifierDef {
        category: Category::FilesRemoved,
        keywords: &["unlink", "unlinkat", "rmdir"],
        patterns: &[
            r#"unlink\("(.*?)""#,
            r#"unlinkat\(.*?"(.*?)""#,
            r#"rmdir\("(.*?)""#,
        ],
        normalizer: Normalizer::RelativePath,
    },
    ClassifierDef {
        category: Category::FilesRead,
        keywords: &["openat"],
        patterns: &[r#"openat\(.*?"(?P<filename>.*?)".*?(?:O_RDWR|O_RDONLY).*?\)"#],
        normalizer: Normalizer::RelativePath,
    },
    ClassifierDef {
        category: Category::FilesWritten,
        keywords: &["openat", "rename", "link", "mkdir"],
        patterns: &[
            r#"openat\(.*?"(.*?)".*?(?:O_RDWR|O_WRONLY|O_CREAT|O_APPEND)"#,
            r#"(?:link|rename)\(".*?", "(.*?)"\)"#,
            r#"mkdir\("(.*?)""#,
        ],
        normalizer: Normalizer::RelativePath,
    },
    ClassifierDef {
        category: Category::HostsConnected,
        keywords: &["connect"],
        patterns: &[r"connect\(.*?\{AF_INET6?, (.*?), (.*?)\},"],
        normalizer: Normalizer::HostPort,
    },
    ClassifierDef {
        category: Category::ProcessesCreated,
        keywords: &["execve"],
        patterns: &[r"execve\(.*?\[(.*?)\]"],
        normalizer: Normalizer::CommandLine,
    },
    ClassifierDef {
        category: Category::Domains,
        keywords: &["connect"],
        patterns: &[r"connect\(.*?\{AF_INET6?, (.*?),"],
        normalizer: Normalizer::ReverseLookup,
    },
];

// ============================================================================
// AUXILIARY PATTERNS
// ============================================================================

/// `sh -c <dir>/<script>`; group 1 is the working directory
pub const SHELL_INVOCATION_PATTERN: &str = r#"execve\(.*?"-c", "(.*?)/[^"/]+""#;

/// `<token>|` container prefix: first whitespace-delimited lowercase
/// alphanumeric token directly followed by `|`
pub const CONTAINER_ID_PATTERN: &str = r"(?:^|\s)([0-9a-z]+)\|";

/// First quoted argument of an execve call
pub const EXECUTABLE_PATH_PATTERN: &str = r#"execve\("([^"]*)""#;

/// Dotted-decimal IPv4 host
pub const IPV4_HOST_PATTERN: &str = r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}$";

// ============================================================================
// WHITELIST
// ============================================================================

/// Path prefixes that are known noise
pub const DEFAULT_WHITELIST: &[&str] = &[
    "/root/.npm/_cacache",                   // npm cache
    "/root/.npm/_locks",                     // npm locks
    "/root/.npm/anonymous-cli-metrics.json", // npm metrics
    "/root/.npm/_logs",                      // npm logs
];
