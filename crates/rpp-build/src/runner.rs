//! Runs a resolved [`TestInvocation`].

use std::process::{ExitStatus, Stdio};
use tracing::{info, instrument, warn};

use crate::{Error, Result, TestInvocation};

/// Exit code for a finished process. A process killed by a signal reports
/// `128 + signal`, the way shells do.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// Drop the gdb wrapper when the debugger is not installed.
fn ensure_debugger(invocation: &TestInvocation) -> TestInvocation {
    if invocation.wrap_in_debugger && which::which(&invocation.debugger).is_err() {
        warn!(
            debugger = %invocation.debugger.display(),
            "Debugger not found, running tests directly"
        );
        return TestInvocation {
            wrap_in_debugger: false,
            ..invocation.clone()
        };
    }

    invocation.clone()
}

/// Spawn the test process, wait for it, and fail on a non-zero exit.
///
/// Stdio is inherited. There is no timeout and nothing is retried.
#[instrument(skip(invocation), fields(command = %invocation.command_line()))]
pub fn run_test(invocation: &TestInvocation) -> Result<()> {
    let invocation = ensure_debugger(invocation);
    let command = invocation.command_line();

    info!(command = %command, "Running tests");

    let status = invocation
        .to_command()
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| Error::Spawn {
            command: command.clone(),
            source,
        })?;

    if !status.success() {
        return Err(Error::TestFailed {
            command,
            code: exit_code(status),
        });
    }

    info!("Tests passed");

    Ok(())
}
