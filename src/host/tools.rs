use std::process::Command;
use tracing::debug;

use crate::inventory::FacilityError;

/// True if `program` can be spawned at all; exit status is ignored.
pub fn tool_available(program: &str, args: &[&str]) -> bool {
    let found = Command::new(program).args(args).output().is_ok();
    debug!(program, found, "looked up external tool");
    found
}

pub fn powershell_available() -> bool {
    tool_available("powershell", &["-NoProfile", "-NonInteractive", "-Command", "exit"])
}

/// Run a command and return its stdout, failing on a non-zero exit.
pub fn run_tool(program: &str, args: &[&str]) -> Result<String, FacilityError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| FacilityError::Command {
            command: program.to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(FacilityError::Command {
            command: program.to_string(),
            message: format!("{} {}", output.status, stderr.trim()),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

pub fn run_powershell(script: &str) -> Result<String, FacilityError> {
    run_tool("powershell", &["-NoProfile", "-NonInteractive", "-Command", script])
}
