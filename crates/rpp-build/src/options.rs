//! CMake build options.
//!
//! Environment-driven toggles live in [`FLAG_REGISTRY`]; each entry knows
//! the value it emits and when it is forced on regardless of the environment.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::{EnvSource, Error, PlatformTarget, ResolveRequest};

/// A `NAME=VALUE` pair handed to CMake.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildOption {
    pub name: String,
    pub value: String,
}

impl BuildOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Render as a CMake cache definition, e.g. `-DBUILD_TESTS=ON`.
    pub fn cmake_define(&self) -> String {
        format!("-D{}={}", self.name, self.value)
    }
}

impl std::fmt::Display for BuildOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

impl FromStr for BuildOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("-D").unwrap_or(s);

        match s.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok(BuildOption::new(name.trim(), value.trim()))
            }
            _ => Err(Error::InvalidOption(s.to_string())),
        }
    }
}

/// Explicitly requested C++ language standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CxxStandard {
    #[serde(rename = "17")]
    Cxx17,
    #[serde(rename = "20")]
    Cxx20,
}

/// One environment-driven toggle.
pub struct FlagRule {
    pub name: &'static str,
    /// Value emitted when the flag is enabled (`ON` or `TRUE`).
    pub value: &'static str,
    forced: fn(&ResolveRequest, &dyn EnvSource) -> bool,
}

impl FlagRule {
    /// Enabled by an exact truthy env value, or by the rule's force condition.
    pub fn is_enabled(&self, request: &ResolveRequest, env: &dyn EnvSource) -> bool {
        let from_env = env
            .get(self.name)
            .map(|v| is_enabled_value(&v))
            .unwrap_or(false);

        from_env || (self.forced)(request, env)
    }
}

impl std::fmt::Debug for FlagRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagRule")
            .field("name", &self.name)
            .field("value", &self.value)
            .finish()
    }
}

fn never(_: &ResolveRequest, _: &dyn EnvSource) -> bool {
    false
}

fn tests_requested(request: &ResolveRequest, env: &dyn EnvSource) -> bool {
    request.tests || is_ci(env)
}

fn wants_cxx17(request: &ResolveRequest, _: &dyn EnvSource) -> bool {
    request.cxx_standard == Some(CxxStandard::Cxx17)
}

fn wants_cxx20(request: &ResolveRequest, _: &dyn EnvSource) -> bool {
    request.cxx_standard == Some(CxxStandard::Cxx20)
}

/// AppVeyor sets `APPVEYOR=True`. Empty or explicitly false values
/// (`0`, `false`, `off`, `no`, any case) do not mark a CI run.
fn is_ci(env: &dyn EnvSource) -> bool {
    match env.get("APPVEYOR") {
        Some(v) => !matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "" | "0" | "false" | "off" | "no"
        ),
        None => false,
    }
}

/// Environment flags, in emission order.
pub const FLAG_REGISTRY: &[FlagRule] = &[
    FlagRule {
        name: "BUILD_TESTS",
        value: "ON",
        forced: tests_requested,
    },
    FlagRule {
        name: "BUILD_WITH_MEM_SAFETY",
        value: "ON",
        forced: never,
    },
    FlagRule {
        name: "BUILD_WITH_THREAD_SAFETY",
        value: "ON",
        forced: never,
    },
    FlagRule {
        name: "BUILD_WITH_CODE_COVERAGE",
        value: "ON",
        forced: never,
    },
    FlagRule {
        name: "CXX17",
        value: "TRUE",
        forced: wants_cxx17,
    },
    FlagRule {
        name: "CXX20",
        value: "TRUE",
        forced: wants_cxx20,
    },
];

/// Only these exact strings enable a flag. `true`, `on` or `yes` do not.
pub fn is_enabled_value(raw: &str) -> bool {
    matches!(raw, "1" | "ON" | "TRUE")
}

/// Unconditional options for a platform, applied after env-derived ones.
fn platform_options(platform: PlatformTarget) -> Vec<BuildOption> {
    match platform {
        // no libdw in the embedded sysroots
        PlatformTarget::Raspi | PlatformTarget::Oclea => {
            vec![BuildOption::new("RPP_WITH_LIBDW", "OFF")]
        }
        PlatformTarget::Windows
        | PlatformTarget::Linux
        | PlatformTarget::Android
        | PlatformTarget::Macos
        | PlatformTarget::Ios
        | PlatformTarget::Mips
        | PlatformTarget::Other => Vec::new(),
    }
}

/// Resolve the ordered CMake option list for a request.
///
/// Order: registry flags, request rules, platform rules, then the caller's
/// extra options. Repeated names are kept; the last one wins downstream.
pub fn resolve_build_options(request: &ResolveRequest, env: &dyn EnvSource) -> Vec<BuildOption> {
    let mut options = Vec::new();

    for rule in FLAG_REGISTRY {
        if rule.is_enabled(request, env) {
            options.push(BuildOption::new(rule.name, rule.value));
        }
    }

    if request.shared {
        options.push(BuildOption::new("BUILD_SHARED_LIBS", "ON"));
    }

    options.extend(platform_options(request.platform));
    options.extend(request.extra_options.iter().cloned());

    debug!(
        platform = %request.platform,
        options = ?options.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "Resolved build options"
    );

    options
}

/// Collapse repeated names, last write wins. Each name keeps the position of
/// its last occurrence.
pub fn effective_options(options: &[BuildOption]) -> Vec<BuildOption> {
    let mut result: Vec<BuildOption> = Vec::with_capacity(options.len());

    for option in options {
        result.retain(|o| o.name != option.name);
        result.push(option.clone());
    }

    result
}
