//! Connection to the machine the demo runs on.

use async_trait::async_trait;
use tokio::process::Command;
use vigil_resource::{CommandOutput, Connection, Platform, PlatformFacts, TransportError};

/// Runs commands through the local shell.
#[derive(Debug)]
pub struct LocalConnection {
    platform: PlatformFacts,
}

impl LocalConnection {
    /// Detect facts for the local machine.
    pub async fn detect() -> Self {
        let name = std::env::consts::OS;
        let families: &[&str] = match name {
            "windows" => &["windows", "os"],
            "macos" => &["darwin", "bsd", "unix", "os"],
            "linux" => &["linux", "unix", "os"],
            _ => &["unix", "os"],
        };

        let mut conn = Self {
            platform: PlatformFacts::new(name, "unknown").with_families(families.iter().copied()),
        };
        if name != "windows" {
            let release = conn
                .run_command("uname -r")
                .await
                .and_then(|out| out.check("uname -r"));
            match release {
                Ok(out) => {
                    conn.platform = PlatformFacts::new(name, out.stdout.trim())
                        .with_families(families.iter().copied());
                }
                Err(err) => tracing::debug!(error = %err, "release detection failed"),
            }
        }

        tracing::debug!(platform = ?conn.platform, "detected local platform");
        conn
    }
}

#[async_trait]
impl Connection for LocalConnection {
    fn platform(&self) -> &dyn Platform {
        &self.platform
    }

    async fn run_command(&self, command: &str) -> Result<CommandOutput, TransportError> {
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C");
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c");
            cmd
        };

        let output = cmd
            .arg(command)
            .output()
            .await
            .map_err(|e| TransportError::Connection(format!("{command}: {e}")))?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_status: output.status.code().unwrap_or(-1),
        })
    }
}
