//! Helpers intended for [`std::process::Command`].

use std::ffi::OsStr;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

/// Helpers intended for [`std::process::Command`].
pub trait CommandRunExt {
    /// Log (at debug level) the full child commandline.
    fn log_debug(&mut self) -> &mut Self;

    /// Execute the child process, capturing stdout and stderr. On success
    /// stdout is returned as a string; on failure the error carries the
    /// commandline, the exit status and the captured stderr.
    fn run_get_string(&mut self) -> Result<String>;

    /// Render the program and its arguments as a shell-quoted string.
    fn to_string_pretty(&self) -> String;
}

fn quote_arg(arg: &OsStr) -> String {
    let arg = arg.to_string_lossy();
    match shlex::try_quote(&arg) {
        Ok(quoted) => quoted.into_owned(),
        // Interior NUL; not representable in a shell string anyway
        Err(_) => arg.into_owned(),
    }
}

impl CommandRunExt for Command {
    fn log_debug(&mut self) -> &mut Self {
        tracing::debug!("exec: {}", self.to_string_pretty());
        self
    }

    fn run_get_string(&mut self) -> Result<String> {
        let output = self
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Spawning {}", quote_arg(self.get_program())))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "Subprocess failed: {}: {}\n{}",
                self.to_string_pretty(),
                output.status,
                stderr.trim_end()
            );
        }
        String::from_utf8(output.stdout)
            .with_context(|| format!("Parsing output of {}", self.to_string_pretty()))
    }

    fn to_string_pretty(&self) -> String {
        std::iter::once(self.get_program())
            .chain(self.get_args())
            .map(quote_arg)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
