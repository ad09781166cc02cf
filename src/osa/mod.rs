use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    process::Command,
};

use serde::de::DeserializeOwned;

pub mod library;
pub mod playlist;

/// Docs:
/// https://developer.apple.com/library/archive/releasenotes/InterapplicationCommunication/RN-JavaScriptForAutomation/
///
/// Every script is a JXA program whose `run(argv)` receives the application
/// name as `argv[0]` followed by the operation's own arguments. Scripts print
/// JSON (or nothing) on stdout.
#[derive(Debug, thiserror::Error)]
pub enum OsaError {
    #[error(
        "osascript not found. It ships with macOS; set `osascript` in the config if it lives elsewhere"
    )]
    OsascriptNotFound,
    #[error("Failed to run osascript for `{operation}`: {source}")]
    Spawn {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("`{operation}` script failed (exit status {status:?}):\n{stderr}")]
    ScriptFailed {
        operation: &'static str,
        status: Option<i32>,
        stderr: String,
    },
    #[error("Failed to decode `{operation}` script output {output:?}: {source}")]
    Decode {
        operation: &'static str,
        output: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Handle on the `osascript` binary bound to one scriptable application.
#[derive(Debug, Clone)]
pub struct Osascript {
    program: PathBuf,
    application: String,
}

impl Osascript {
    pub fn new(program: PathBuf, application: impl Into<String>) -> Self {
        Self {
            program,
            application: application.into(),
        }
    }

    /// Use `configured` when given, otherwise look `osascript` up on `PATH`.
    pub fn locate(
        configured: Option<PathBuf>,
        application: impl Into<String>,
    ) -> Result<Self, OsaError> {
        let program = match configured {
            Some(path) if path.is_file() => path,
            Some(path) => {
                log::warn!("Configured osascript does not exist: {}", path.display());
                return Err(OsaError::OsascriptNotFound);
            }
            None => which::which("osascript").map_err(|_| OsaError::OsascriptNotFound)?,
        };

        log::debug!("Using osascript at {}", program.display());
        Ok(Self::new(program, application))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    /// Runs `script` and returns its stdout with the trailing newline removed.
    pub fn run(
        &self,
        operation: &'static str,
        script: &str,
        args: &[&str],
    ) -> Result<String, OsaError> {
        log::trace!("Running `{}` with arguments: {:?}", operation, args);

        let output = Command::new(&self.program)
            .args(["-l", "JavaScript", "-e", script])
            .arg(&self.application)
            .args(args)
            .output()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    OsaError::OsascriptNotFound
                } else {
                    OsaError::Spawn {
                        operation,
                        source: e,
                    }
                }
            })?;

        if !output.status.success() {
            return Err(OsaError::ScriptFailed {
                operation,
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn run_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        script: &str,
        args: &[&str],
    ) -> Result<T, OsaError> {
        let output = self.run(operation, script, args)?;
        serde_json::from_str(&output).map_err(|source| OsaError::Decode {
            operation,
            output,
            source,
        })
    }
}

const LAUNCH_SCRIPT: &str = r#"
function run(argv) {
    const app = Application(argv[0]);
    app.run();
    return "";
}
"#;

/// Starts the application, or does nothing if it is already running.
pub fn launch_application(osa: &Osascript) -> Result<(), OsaError> {
    osa.run("launch", LAUNCH_SCRIPT, &[])?;
    Ok(())
}
