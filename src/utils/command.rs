use std::process::Command;
use anyhow::{bail, Result};

#[derive(Debug, Default, Clone, Copy)]
pub struct CommandExecutor;

impl CommandExecutor {
    pub fn new() -> Self {
        CommandExecutor
    }

    pub fn execute(&self, command: &str, args: &[&str]) -> Result<(String, i32)> {
        let output = Command::new(command)
            .args(args)
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let exit_status = output.status.code().unwrap_or(-1);

        let combined_output = format!("{}{}", stdout, stderr);

        Ok((combined_output, exit_status))
    }

    pub fn shell(&self, command_line: &str) -> Result<String> {
        tracing::debug!("running: {}", command_line);
        let (output, status) = self.execute("sh", &["-c", command_line])?;
        if status != 0 {
            bail!(
                "command `{}` exited with status {}: {}",
                command_line,
                status,
                output.trim()
            );
        }
        Ok(output)
    }
}
