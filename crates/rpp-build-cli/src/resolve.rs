use anyhow::{Context, Result};
use clap::Args;
use rpp_build::{install_hints, ConfigResolver, PlatformTarget};
use tracing::{debug, info};

use crate::args::ResolveArgs;

#[derive(Args, Debug, Clone)]
pub struct OptionsArgs {
    #[command(flatten)]
    pub resolve: ResolveArgs,

    /// Print as a JSON array instead of -D lines
    #[arg(long)]
    pub json: bool,

    /// Collapse repeated option names, keeping the last value
    #[arg(long)]
    pub effective: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SyslibsArgs {
    /// Target platform (defaults to the host)
    #[arg(short, long, env = "RPP_PLATFORM")]
    pub platform: Option<PlatformTarget>,

    /// Print package install hints instead of linker arguments
    #[arg(long)]
    pub hints: bool,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn print_options(args: &OptionsArgs) -> Result<()> {
    let resolver = ConfigResolver::from_process_env();
    debug!(env = ?resolver.env().vars(), "Environment snapshot");

    let mut options = resolver.build_options(&args.resolve.to_request());
    if args.effective {
        options = rpp_build::effective_options(&options);
    }

    if args.json {
        let json = serde_json::to_string_pretty(&options).context("Failed to serialize options")?;
        println!("{json}");
    } else {
        for option in &options {
            println!("{}", option.cmake_define());
        }
    }

    Ok(())
}

pub fn print_syslibs(args: &SyslibsArgs) -> Result<()> {
    let platform = args.platform.unwrap_or_else(PlatformTarget::host);
    let libs = rpp_build::resolve_sys_libs(platform);
    info!(platform = %platform, count = libs.len(), "Resolved system libraries");

    if args.json {
        let json = serde_json::to_string_pretty(&libs).context("Failed to serialize libraries")?;
        println!("{json}");
    } else if args.hints {
        for hint in install_hints(&libs) {
            println!("{hint}");
        }
    } else {
        for lib in &libs {
            println!("{}", lib.linker_args().join(" "));
        }
    }

    Ok(())
}

pub fn print_resolution(args: &ResolveArgs) -> Result<()> {
    let resolution = ConfigResolver::from_process_env().resolve(&args.to_request());
    let json =
        serde_json::to_string_pretty(&resolution).context("Failed to serialize resolution")?;
    println!("{json}");

    Ok(())
}

pub fn list_platforms() {
    let host = PlatformTarget::host();

    for platform in PlatformTarget::ALL {
        if platform == host {
            println!("{platform} (host)");
        } else {
            println!("{platform}");
        }
    }
}
