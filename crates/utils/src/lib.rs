//! Process plumbing shared by the cloudimg binary and library:
//! running the registry tool, log setup and top-level error reporting.

mod command;
pub use command::*;
mod tracing_util;
pub use tracing_util::*;

/// The name of our binary
pub const NAME: &str = "cloudimg";

/// Run the entrypoint `f`; on error print the whole context chain
/// to stderr and exit with status 1.
pub fn run_main<F>(f: F)
where
    F: FnOnce() -> anyhow::Result<()>,
{
    use std::io::Write as _;

    use owo_colors::OwoColorize;

    if let Err(e) = f() {
        let mut stderr = anstream::stderr();
        // Don't panic if writing fails.
        let _ = writeln!(stderr, "{}{:#}", "error: ".red(), e);
        std::process::exit(1);
    }
}
