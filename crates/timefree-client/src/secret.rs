//! Secret reference resolver.
//!
//! Values in `config.toml` (and credential flags) can use special prefixes
//! to reference secrets stored outside the file:
//!
//! - `pass::path/in/store` — runs `pass show path/in/store`, returns first line
//! - `env::VAR_NAME` — reads `$VAR_NAME` from the environment
//! - `file::/path/to/file` — reads the first line of the file
//! - anything else — returned as-is (plain text)

/// Resolves a value that may contain a secret reference prefix.
///
/// # Prefixes
///
/// - `pass::path` — executes `pass show path` and returns the first line
/// - `env::VAR` — reads environment variable `VAR`
/// - `file::path` — reads the first line of the file at `path`
/// - plain text — returned unchanged
pub fn resolve(value: &str) -> Result<String, String> {
    if let Some(path) = value.strip_prefix("pass::") {
        resolve_pass(path)
    } else if let Some(var) = value.strip_prefix("env::") {
        resolve_env(var)
    } else if let Some(path) = value.strip_prefix("file::") {
        resolve_file(path)
    } else {
        Ok(value.to_string())
    }
}

/// Runs `pass show <path>` and returns the first line of stdout.
fn resolve_pass(path: &str) -> Result<String, String> {
    let output = std::process::Command::new("pass")
        .arg("show")
        .arg(path)
        .output()
        .map_err(|e| format!("failed to run `pass show {}`: {}", path, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "`pass show {}` failed (exit {}): {}",
            path,
            output.status,
            stderr.trim()
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .next()
        .map(|s| s.to_string())
        .ok_or_else(|| format!("`pass show {}` produced no output", path))
}

/// Reads an environment variable.
fn resolve_env(var: &str) -> Result<String, String> {
    std::env::var(var).map_err(|_| format!("environment variable `{}` is not set", var))
}

/// Reads the first line of a file.
fn resolve_file(path: &str) -> Result<String, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read `{}`: {}", path, e))?;
    content
        .lines()
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("`{}` is empty", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passthrough() {
        assert_eq!(resolve("hello").unwrap(), "hello");
        assert_eq!(resolve("").unwrap(), "");
        assert_eq!(
            resolve("xxx.apps.googleusercontent.com").unwrap(),
            "xxx.apps.googleusercontent.com"
        );
    }

    #[test]
    fn env_prefix_resolves() {
        unsafe {
            std::env::set_var("_TIMEFREE_TEST_SECRET", "my-secret-value");
        }
        assert_eq!(
            resolve("env::_TIMEFREE_TEST_SECRET").unwrap(),
            "my-secret-value"
        );
        unsafe {
            std::env::remove_var("_TIMEFREE_TEST_SECRET");
        }
    }

    #[test]
    fn env_prefix_missing_var_errors() {
        let result = resolve("env::_TIMEFREE_NONEXISTENT_VAR_12345");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("not set"));
    }

    #[test]
    fn file_prefix_reads_first_line() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("credential");
        std::fs::write(&path, "line-one\nline-two\n").unwrap();

        let value = resolve(&format!("file::{}", path.display())).unwrap();
        assert_eq!(value, "line-one");
    }

    #[test]
    fn file_prefix_empty_file_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("empty");
        std::fs::write(&path, "").unwrap();

        let result = resolve(&format!("file::{}", path.display()));
        assert!(result.is_err());
    }

    #[test]
    fn pass_prefix_missing_entry_errors() {
        // Works whether or not `pass` is installed: either the command
        // itself fails or the entry does not exist.
        let result = resolve("pass::nonexistent/entry/that/should/not/exist/12345");
        assert!(result.is_err());
    }
}
