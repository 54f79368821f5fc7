//! Test command resolution.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

use crate::PlatformTarget;

/// Test argument that disables the gdb wrapper instead of reaching the binary.
pub const NO_GDB_SENTINEL: &str = "nogdb";

const DEFAULT_DEBUGGER: &str = "gdb";

/// gdb flags: run the program, print a backtrace if it stops, then quit.
/// `-return-child-result` makes gdb exit with the test's own exit code.
const GDB_BATCH_ARGS: &[&str] = &[
    "-batch",
    "-return-child-result",
    "-ex",
    "run",
    "-ex",
    "bt",
    "-ex",
    "quit",
    "--args",
];

/// A resolved test command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestInvocation {
    pub executable: PathBuf,
    pub args: Vec<String>,
    pub wrap_in_debugger: bool,
    pub debugger: PathBuf,
}

impl TestInvocation {
    /// A direct, unwrapped invocation.
    pub fn direct(executable: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            executable: executable.into(),
            args,
            wrap_in_debugger: false,
            debugger: PathBuf::from(DEFAULT_DEBUGGER),
        }
    }

    pub fn with_debugger(mut self, debugger: impl Into<PathBuf>) -> Self {
        self.debugger = debugger.into();
        self
    }

    /// Full argument vector, program first.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + GDB_BATCH_ARGS.len() + 2);

        if self.wrap_in_debugger {
            argv.push(self.debugger.display().to_string());
            argv.extend(GDB_BATCH_ARGS.iter().map(|s| s.to_string()));
        }

        argv.push(self.executable.display().to_string());
        argv.extend(self.args.iter().cloned());
        argv
    }

    /// Shell-quoted command line, suitable for logs and error messages.
    pub fn command_line(&self) -> String {
        shell_words::join(self.argv())
    }

    pub fn program(&self) -> &Path {
        if self.wrap_in_debugger {
            &self.debugger
        } else {
            &self.executable
        }
    }

    /// Build the process command. Paths are passed as `OsStr`, never through
    /// their display form.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(self.program());
        if self.wrap_in_debugger {
            cmd.args(GDB_BATCH_ARGS);
            cmd.arg(&self.executable);
        }
        cmd.args(&self.args);
        cmd
    }
}

impl std::fmt::Display for TestInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.command_line())
    }
}

/// Splits shell words, falling back to whitespace on malformed quoting.
fn shellsplit(s: &str) -> Vec<String> {
    match shell_words::split(s) {
        Ok(v) => v,
        Err(e) => {
            warn!(args = %s, error = %e, "Could not split test arguments, using whitespace");
            s.split_whitespace().map(|s| s.to_string()).collect()
        }
    }
}

/// Resolve how the test binary should be launched.
///
/// Every `nogdb` token is removed from the arguments and turns the gdb
/// wrapper off. Otherwise tests run under gdb on platforms that have it.
pub fn resolve_test_invocation(
    platform: PlatformTarget,
    executable: impl Into<PathBuf>,
    raw_args: Option<&str>,
) -> TestInvocation {
    let tokens = raw_args.map(shellsplit).unwrap_or_default();
    let total = tokens.len();

    let args: Vec<String> = tokens
        .into_iter()
        .filter(|arg| arg != NO_GDB_SENTINEL)
        .collect();
    let no_gdb = args.len() != total;

    let mut invocation = TestInvocation::direct(executable, args);
    invocation.wrap_in_debugger = !no_gdb && platform.supports_gdb();

    debug!(
        platform = %platform,
        no_gdb,
        command = %invocation.command_line(),
        "Resolved test invocation"
    );

    invocation
}
