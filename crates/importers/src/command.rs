use crate::error::{ImportError, Result};
use std::ffi::OsStr;
use std::path::Path;

/// Run an external converter and return its stdout as text.
///
/// The call has no timeout: a hung converter blocks the caller.
pub(crate) async fn run_tool<I, S>(tool: &str, args: I, path: &Path) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    log::debug!("running {tool} on {}", path.display());

    let output = tokio::process::Command::new(tool)
        .args(args)
        .output()
        .await
        .map_err(|source| ImportError::ToolUnavailable {
            tool: tool.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(ImportError::ToolFailed {
            tool: tool.to_string(),
            path: path.to_path_buf(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
