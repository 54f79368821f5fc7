use serde::Serialize;
use std::path::PathBuf;
use tracing::instrument;

use crate::{
    resolve_build_options, resolve_sys_libs, resolve_test_invocation, BuildOption, CxxStandard,
    EnvSource, PlatformTarget, ProcessEnv, SysLibRequirement, TestInvocation,
};

/// What the caller wants resolved, apart from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    pub platform: PlatformTarget,
    /// Test mode was explicitly requested.
    pub tests: bool,
    pub cxx_standard: Option<CxxStandard>,
    /// Build ReCpp as a shared library.
    pub shared: bool,
    /// Appended after every other option.
    pub extra_options: Vec<BuildOption>,
    pub test_executable: PathBuf,
    pub test_args: Option<String>,
}

impl ResolveRequest {
    pub fn new(platform: PlatformTarget) -> Self {
        Self {
            platform,
            tests: false,
            cxx_standard: None,
            shared: false,
            extra_options: Vec::new(),
            test_executable: PathBuf::from("bin").join(platform.test_executable_name()),
            test_args: None,
        }
    }
}

/// Output of a full resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub platform: PlatformTarget,
    pub build_options: Vec<BuildOption>,
    pub sys_libs: Vec<SysLibRequirement>,
    pub test: TestInvocation,
}

/// Resolves build options, system libraries and the test command against
/// one environment source.
#[derive(Debug, Clone)]
pub struct ConfigResolver<E> {
    env: E,
}

impl ConfigResolver<ProcessEnv> {
    /// Resolver over a snapshot of the current process environment.
    pub fn from_process_env() -> Self {
        Self::new(ProcessEnv::snapshot())
    }
}

impl<E: EnvSource> ConfigResolver<E> {
    pub fn new(env: E) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn build_options(&self, request: &ResolveRequest) -> Vec<BuildOption> {
        resolve_build_options(request, &self.env)
    }

    pub fn sys_libs(&self, platform: PlatformTarget) -> Vec<SysLibRequirement> {
        resolve_sys_libs(platform)
    }

    pub fn test_invocation(&self, request: &ResolveRequest) -> TestInvocation {
        resolve_test_invocation(
            request.platform,
            request.test_executable.clone(),
            request.test_args.as_deref(),
        )
    }

    #[instrument(skip(self, request), fields(platform = %request.platform))]
    pub fn resolve(&self, request: &ResolveRequest) -> Resolution {
        Resolution {
            platform: request.platform,
            build_options: self.build_options(request),
            sys_libs: self.sys_libs(request.platform),
            test: self.test_invocation(request),
        }
    }
}
