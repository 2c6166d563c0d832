//! Working Directory Resolution
//!
//! The sample is launched as `sh -c <dir>/<script>`; `<dir>` is the base for
//! every relative path in the trace. First invocation wins.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::WorkingDirectory;
use crate::error::{TraceError, TraceResult};
use crate::logic::catalog::rules::SHELL_INVOCATION_PATTERN;

static SHELL_INVOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(SHELL_INVOCATION_PATTERN).expect("shell invocation pattern is valid")
});

/// Single resolution attempt over the whole trace
pub fn resolve_working_dir(trace: &str) -> TraceResult<WorkingDirectory> {
    for (line_index, line) in trace.lines().enumerate() {
        if let Some(caps) = SHELL_INVOCATION.captures(line) {
            let path = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            log::debug!("Working directory '{}' from line {}", path, line_index + 1);
            return Ok(WorkingDirectory {
                path: path.to_string(),
                line_index,
            });
        }
    }

    Err(TraceError::WorkingDirectoryUnresolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_script_directory() {
        let trace = r#"execve("/bin/sh", ["/bin/sh", "-c", "/build/dir/script.sh"], []) = 0"#;
        let cwd = resolve_working_dir(trace).unwrap();
        assert_eq!(cwd.path, "/build/dir");
        assert_eq!(cwd.line_index, 0);
    }

    #[test]
    fn test_first_invocation_wins() {
        let trace = concat!(
            "openat(AT_FDCWD, \"/etc/ld.so.cache\", O_RDONLY) = 3\n",
            "execve(\"/bin/sh\", [\"/bin/sh\", \"-c\", \"/first/run.sh\"], []) = 0\n",
            "execve(\"/bin/sh\", [\"/bin/sh\", \"-c\", \"/second/run.sh\"], []) = 0\n",
        );
        let cwd = resolve_working_dir(trace).unwrap();
        assert_eq!(cwd.path, "/first");
        assert_eq!(cwd.line_index, 1);
    }

    #[test]
    fn test_nested_directory() {
        let trace = r#"a1b2| execve("/bin/bash", ["bash", "-c", "/opt/work/sub/build.sh"], 0x7ffc)"#;
        assert_eq!(resolve_working_dir(trace).unwrap().path, "/opt/work/sub");
    }

    #[test]
    fn test_bare_script_name_does_not_resolve() {
        let trace = r#"execve("/bin/sh", ["/bin/sh", "-c", "script.sh"], []) = 0"#;
        assert!(matches!(
            resolve_working_dir(trace),
            Err(TraceError::WorkingDirectoryUnresolved)
        ));
    }

    #[test]
    fn test_missing_invocation_is_fatal() {
        let trace = "unlink(\"relative/file\") = 0\n";
        assert!(matches!(
            resolve_working_dir(trace),
            Err(TraceError::WorkingDirectoryUnresolved)
        ));
        assert!(resolve_working_dir("").is_err());
    }
}
