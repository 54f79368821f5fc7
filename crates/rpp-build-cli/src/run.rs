use anyhow::Result;
use clap::Args;
use rpp_build::{runner, ConfigResolver};
use std::path::PathBuf;
use tracing::{error, info, instrument};

use crate::args::ResolveArgs;

#[derive(Args, Debug, Clone)]
pub struct TestArgs {
    #[command(flatten)]
    pub resolve: ResolveArgs,

    /// Debugger used to wrap the test binary
    #[arg(long, default_value = "gdb", env = "RPP_GDB")]
    pub gdb: PathBuf,

    /// Arguments for the test binary; `nogdb` disables the debugger
    #[arg(last = true)]
    pub args: Vec<String>,
}

impl TestArgs {
    /// `--test-args` and trailing arguments, joined into one raw string.
    fn raw_test_args(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(raw) = &self.resolve.test_args {
            parts.push(raw.clone());
        }
        if !self.args.is_empty() {
            parts.push(shell_words::join(&self.args));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Resolve and run the test binary, exiting with its exit code on failure.
#[instrument(skip(args))]
pub fn run(args: &TestArgs) -> Result<()> {
    let mut request = args.resolve.to_request();
    request.test_args = args.raw_test_args();

    let invocation = ConfigResolver::from_process_env()
        .test_invocation(&request)
        .with_debugger(args.gdb.clone());

    info!(
        platform = %request.platform,
        debugger = invocation.wrap_in_debugger,
        "Resolved test command"
    );

    match runner::run_test(&invocation) {
        Ok(()) => Ok(()),
        Err(e) => match e.exit_code() {
            Some(code) => {
                error!("{e}");
                std::process::exit(code);
            }
            None => Err(e.into()),
        },
    }
}
