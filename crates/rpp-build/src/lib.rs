//! # `rpp-build`
//!
//! Resolves how ReCpp should be configured, linked and tested for a given
//! target platform.
//!
//! Three independent resolutions are provided:
//!
//! - CMake build options derived from environment flags, caller preferences
//!   and platform rules ([`resolve_build_options`])
//! - System libraries a consumer has to link ([`resolve_sys_libs`])
//! - The command used to run the `RppTests` binary, optionally under gdb
//!   ([`resolve_test_invocation`])
//!
//! ```
//! use std::collections::HashMap;
//! use rpp_build::{ConfigResolver, PlatformTarget, ResolveRequest};
//!
//! let mut env = HashMap::new();
//! env.insert("BUILD_WITH_MEM_SAFETY".to_string(), "ON".to_string());
//! let resolver = ConfigResolver::new(env);
//! let resolution = resolver.resolve(&ResolveRequest::new(PlatformTarget::Linux));
//!
//! assert_eq!(resolution.build_options[0].to_string(), "BUILD_WITH_MEM_SAFETY=ON");
//! ```

mod env;
mod error;
mod invocation;
mod options;
mod platform;
mod resolver;
pub mod runner;
mod syslibs;

pub use env::{EnvSource, ProcessEnv, CONSUMED_ENV_VARS};
pub use error::{Error, Result};
pub use invocation::{resolve_test_invocation, TestInvocation, NO_GDB_SENTINEL};
pub use options::{
    effective_options, is_enabled_value, resolve_build_options, BuildOption, CxxStandard, FlagRule,
    FLAG_REGISTRY,
};
pub use platform::PlatformTarget;
pub use resolver::{ConfigResolver, ResolveRequest, Resolution};
pub use syslibs::{install_hints, resolve_sys_libs, SysLibRequirement};
