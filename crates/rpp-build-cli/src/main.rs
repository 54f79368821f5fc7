mod args;
mod resolve;
mod run;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// Log directives used when `RUST_LOG` is not set.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "rpp_build=debug,rpp_build_cli=debug"
    } else {
        "rpp_build=info,rpp_build_cli=info"
    }
}

/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Parser)]
#[command(name = "rpp-build")]
#[command(bin_name = "rpp-build")]
#[command(version, about = "Resolve ReCpp build options, system libraries and test runs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the CMake options for a platform
    Options(resolve::OptionsArgs),

    /// Print the system libraries a consumer has to link
    Syslibs(resolve::SyslibsArgs),

    /// Print the full resolution as JSON
    Resolve(args::ResolveArgs),

    /// Run the ReCpp test binary, under gdb unless `nogdb` is passed
    #[command(alias = "t")]
    Test(run::TestArgs),

    /// List known target platforms
    #[command(alias = "ls")]
    Platforms,
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Commands::Options(args) => args.resolve.verbose,
            Commands::Syslibs(args) => args.verbose,
            Commands::Resolve(args) => args.verbose,
            Commands::Test(args) => args.resolve.verbose,
            Commands::Platforms => false,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.verbose());

    match cli.command {
        Commands::Options(args) => resolve::print_options(&args)?,
        Commands::Syslibs(args) => resolve::print_syslibs(&args)?,
        Commands::Resolve(args) => resolve::print_resolution(&args)?,
        Commands::Test(args) => run::run(&args)?,
        Commands::Platforms => resolve::list_platforms(),
    }

    Ok(())
}
