//! Configuration commands.

use std::path::Path;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::secret;

/// Dump the current configuration to stdout.
///
/// A plain-text access token is masked; secret references are shown as written.
pub fn dump(config: &ClientConfig, path: &Path) -> ClientResult<()> {
    println!("{}", render(config, path)?);
    Ok(())
}

/// Show the configuration file path.
pub fn path(path: &Path) -> ClientResult<()> {
    println!("config: {}", path.display());
    Ok(())
}

fn render(config: &ClientConfig, path: &Path) -> ClientResult<String> {
    Ok(format!(
        "# config.toml ({})\n{}",
        path.display(),
        masked(config).to_toml()?
    ))
}

fn masked(config: &ClientConfig) -> ClientConfig {
    let mut config = config.clone();
    if let Some(token) = config.auth.access_token.as_mut() {
        if !secret::is_reference(token) {
            *token = "<redacted>".to_string();
        }
    }
    config
}
