//! System libraries a ReCpp consumer has to link, per platform.

use serde::{Deserialize, Serialize};

use crate::PlatformTarget;

const FRAMEWORK_PREFIX: &str = "-framework ";

/// An OS-provided library plus the package that usually ships it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SysLibRequirement {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_hint: Option<String>,
}

impl SysLibRequirement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package_hint: None,
        }
    }

    pub fn with_hint(name: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package_hint: Some(hint.into()),
        }
    }

    pub fn is_framework(&self) -> bool {
        self.name.starts_with(FRAMEWORK_PREFIX)
    }

    /// Linker arguments for this library (`-ldl`, `-framework Foundation`).
    pub fn linker_args(&self) -> Vec<String> {
        match self.name.strip_prefix(FRAMEWORK_PREFIX) {
            Some(framework) => vec!["-framework".to_string(), framework.trim().to_string()],
            None => vec![format!("-l{}", self.name)],
        }
    }
}

impl std::fmt::Display for SysLibRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.package_hint {
            Some(hint) => write!(f, "{} ({})", self.name, hint),
            None => write!(f, "{}", self.name),
        }
    }
}

fn linux_libs() -> Vec<SysLibRequirement> {
    vec![
        SysLibRequirement::new("dl"),
        SysLibRequirement::with_hint("dw", "libdw-dev"),
        SysLibRequirement::new("rt"),
    ]
}

/// Resolve the system libraries for exactly one platform branch.
///
/// Branches never overlap: linking a Linux-only library such as `dw` on
/// Android fails at link time.
pub fn resolve_sys_libs(platform: PlatformTarget) -> Vec<SysLibRequirement> {
    match platform {
        PlatformTarget::Raspi | PlatformTarget::Oclea => vec![
            SysLibRequirement::new("dl"),
            SysLibRequirement::new("rt"),
        ],
        PlatformTarget::Mips => {
            let mut libs = linux_libs();
            // the mips runtime has no lock-free atomic intrinsics
            libs.push(SysLibRequirement::new("atomic"));
            libs
        }
        PlatformTarget::Linux => linux_libs(),
        PlatformTarget::Android => vec![
            SysLibRequirement::new("android"),
            SysLibRequirement::new("log"),
        ],
        PlatformTarget::Macos | PlatformTarget::Ios => {
            vec![SysLibRequirement::new("-framework Foundation")]
        }
        PlatformTarget::Windows | PlatformTarget::Other => Vec::new(),
    }
}

/// Package hints of a requirement set, in order, without duplicates.
pub fn install_hints(libs: &[SysLibRequirement]) -> Vec<&str> {
    let mut hints: Vec<&str> = Vec::new();
    for hint in libs.iter().filter_map(|lib| lib.package_hint.as_deref()) {
        if !hints.contains(&hint) {
            hints.push(hint);
        }
    }
    hints
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lib_names(platform: PlatformTarget) -> Vec<String> {
        resolve_sys_libs(platform)
            .into_iter()
            .map(|lib| lib.name)
            .collect()
    }

    #[test]
    fn test_linux_libs() {
        assert_eq!(lib_names(PlatformTarget::Linux), ["dl", "dw", "rt"]);
    }

    #[test]
    fn test_mips_adds_atomic() {
        assert_eq!(lib_names(PlatformTarget::Mips), ["dl", "dw", "rt", "atomic"]);
        assert!(!lib_names(PlatformTarget::Linux).contains(&"atomic".to_string()));
    }

    #[test]
    fn test_embedded_arm_has_no_libdw() {
        assert_eq!(lib_names(PlatformTarget::Raspi), ["dl", "rt"]);
        assert_eq!(lib_names(PlatformTarget::Oclea), ["dl", "rt"]);
    }

    #[test]
    fn test_android_never_gets_linux_libs() {
        let libs = lib_names(PlatformTarget::Android);
        assert_eq!(libs, ["android", "log"]);
        assert!(!libs.contains(&"dw".to_string()));
    }

    #[test]
    fn test_apple_shares_foundation() {
        assert_eq!(
            resolve_sys_libs(PlatformTarget::Macos),
            resolve_sys_libs(PlatformTarget::Ios)
        );
        assert!(resolve_sys_libs(PlatformTarget::Ios)[0].is_framework());
    }

    #[test]
    fn test_no_libs() {
        assert!(resolve_sys_libs(PlatformTarget::Windows).is_empty());
        assert!(resolve_sys_libs(PlatformTarget::Other).is_empty());
    }

    #[test]
    fn test_linker_args() {
        assert_eq!(SysLibRequirement::new("dl").linker_args(), ["-ldl"]);
        assert_eq!(
            SysLibRequirement::new("-framework Foundation").linker_args(),
            ["-framework", "Foundation"]
        );
    }

    #[test]
    fn test_install_hints() {
        assert_eq!(install_hints(&resolve_sys_libs(PlatformTarget::Mips)), ["libdw-dev"]);
        assert!(install_hints(&resolve_sys_libs(PlatformTarget::Android)).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SysLibRequirement::with_hint("dw", "libdw-dev").to_string(),
            "dw (libdw-dev)"
        );
    }
}
