use clap::{Args, ValueEnum};
use rpp_build::{BuildOption, CxxStandard, PlatformTarget, ResolveRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CxxArg {
    #[value(name = "17")]
    Cxx17,
    #[value(name = "20")]
    Cxx20,
}

impl From<CxxArg> for CxxStandard {
    fn from(arg: CxxArg) -> Self {
        match arg {
            CxxArg::Cxx17 => CxxStandard::Cxx17,
            CxxArg::Cxx20 => CxxStandard::Cxx20,
        }
    }
}

/// Arguments shared by every resolving subcommand
#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Target platform (defaults to the host)
    #[arg(short, long, env = "RPP_PLATFORM")]
    pub platform: Option<PlatformTarget>,

    /// Request test mode (forces BUILD_TESTS=ON)
    #[arg(long)]
    pub tests: bool,

    /// Preferred C++ standard (forces CXX17/CXX20)
    #[arg(long, value_enum)]
    pub cxx: Option<CxxArg>,

    /// Build ReCpp as a shared library
    #[arg(long)]
    pub shared: bool,

    /// Extra CMake option, appended last (NAME=VALUE, repeatable)
    #[arg(short = 'D', long = "option", value_name = "NAME=VALUE")]
    pub options: Vec<BuildOption>,

    /// Path to the test executable (defaults to bin/RppTests)
    #[arg(long, env = "RPP_TEST_EXE")]
    pub test_exe: Option<std::path::PathBuf>,

    /// Raw test argument string, e.g. "nogdb -v"
    #[arg(long, allow_hyphen_values = true)]
    pub test_args: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ResolveArgs {
    pub fn platform(&self) -> PlatformTarget {
        self.platform.unwrap_or_else(PlatformTarget::host)
    }

    pub fn to_request(&self) -> ResolveRequest {
        let mut request = ResolveRequest::new(self.platform());
        request.tests = self.tests;
        request.cxx_standard = self.cxx.map(Into::into);
        request.shared = self.shared;
        request.extra_options = self.options.clone();
        if let Some(exe) = &self.test_exe {
            request.test_executable = exe.clone();
        }
        request.test_args = self.test_args.clone();
        request
    }
}
