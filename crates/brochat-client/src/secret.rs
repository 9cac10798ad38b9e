//! Secret reference resolver.
//!
//! The access token in `config.toml` may point at a secret stored elsewhere:
//!
//! - `pass::path/in/store` runs `pass show path/in/store` and keeps the first line
//! - `env::VAR_NAME` reads `$VAR_NAME`
//! - anything else is used as written

use std::process::Command;

use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Resolves a value that may contain a secret reference prefix.
pub fn resolve(value: &str) -> ClientResult<String> {
    if let Some(path) = value.strip_prefix("pass::") {
        debug!(path, "resolving secret from password store");
        resolve_pass(path)
    } else if let Some(var) = value.strip_prefix("env::") {
        debug!(var, "resolving secret from environment");
        resolve_env(var)
    } else {
        Ok(value.to_string())
    }
}

/// Returns true if the value is a secret reference rather than plain text.
pub fn is_reference(value: &str) -> bool {
    value.starts_with("pass::") || value.starts_with("env::")
}

fn resolve_pass(path: &str) -> ClientResult<String> {
    let output = Command::new("pass")
        .arg("show")
        .arg(path)
        .output()
        .map_err(|e| ClientError::Secret(format!("failed to run `pass show {}`: {}", path, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ClientError::Secret(format!(
            "`pass show {}` failed ({}): {}",
            path,
            output.status,
            stderr.trim()
        )));
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(str::to_string)
        .ok_or_else(|| ClientError::Secret(format!("`pass show {}` produced no output", path)))
}

fn resolve_env(var: &str) -> ClientResult<String> {
    std::env::var(var)
        .map_err(|_| ClientError::Secret(format!("environment variable `{}` is not set", var)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passthrough() {
        assert_eq!(resolve("abc.def.ghi").unwrap(), "abc.def.ghi");
        assert_eq!(resolve("").unwrap(), "");
        assert!(!is_reference("abc"));
    }

    #[test]
    fn env_prefix_resolves() {
        unsafe {
            std::env::set_var("_BROCHAT_TEST_SECRET", "token-from-env");
        }
        assert!(is_reference("env::_BROCHAT_TEST_SECRET"));
        assert_eq!(
            resolve("env::_BROCHAT_TEST_SECRET").unwrap(),
            "token-from-env"
        );
        unsafe {
            std::env::remove_var("_BROCHAT_TEST_SECRET");
        }
    }

    #[test]
    fn env_prefix_missing_var_errors() {
        let err = resolve("env::_BROCHAT_NONEXISTENT_VAR_12345").unwrap_err();
        assert!(matches!(err, ClientError::Secret(_)));
        assert!(err.to_string().contains("not set"));
    }

    #[test]
    fn pass_prefix_unknown_entry_errors() {
        // Fails whether or not `pass` is installed.
        assert!(resolve("pass::brochat/nonexistent/entry/12345").is_err());
    }
}
