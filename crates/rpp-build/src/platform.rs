//! Target platform model.
//!
//! The recipes this replaces carried one boolean per platform
//! (`self.linux`, `self.raspi`, `self.oclea`, ...). Here a target is exactly
//! one [`PlatformTarget`], and every rule that depends on it matches
//! exhaustively.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::Error;

/// Supported target platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformTarget {
    Windows,
    Linux,
    Android,
    Macos,
    Ios,
    /// Raspberry Pi (embedded ARM Linux)
    Raspi,
    /// Oclea camera SoC (embedded ARM Linux)
    Oclea,
    Mips,
    Other,
}

impl PlatformTarget {
    pub const ALL: [PlatformTarget; 9] = [
        PlatformTarget::Windows,
        PlatformTarget::Linux,
        PlatformTarget::Android,
        PlatformTarget::Macos,
        PlatformTarget::Ios,
        PlatformTarget::Raspi,
        PlatformTarget::Oclea,
        PlatformTarget::Mips,
        PlatformTarget::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformTarget::Windows => "windows",
            PlatformTarget::Linux => "linux",
            PlatformTarget::Android => "android",
            PlatformTarget::Macos => "macos",
            PlatformTarget::Ios => "ios",
            PlatformTarget::Raspi => "raspi",
            PlatformTarget::Oclea => "oclea",
            PlatformTarget::Mips => "mips",
            PlatformTarget::Other => "other",
        }
    }

    /// Map a Rust/GNU target triple onto a platform.
    ///
    /// Oclea has no distinct triple and is only reachable by name. Unknown
    /// triples map to [`PlatformTarget::Other`].
    pub fn from_triple(triple: &str) -> Self {
        let arch = triple.split('-').next().unwrap_or_default();

        if triple.contains("android") {
            PlatformTarget::Android
        } else if triple.contains("apple-ios") {
            PlatformTarget::Ios
        } else if triple.contains("apple-darwin") {
            PlatformTarget::Macos
        } else if triple.contains("windows") {
            PlatformTarget::Windows
        } else if triple.contains("linux") {
            if arch.starts_with("mips") {
                PlatformTarget::Mips
            } else if arch.starts_with("arm") && triple.ends_with("gnueabihf") {
                PlatformTarget::Raspi
            } else {
                PlatformTarget::Linux
            }
        } else {
            PlatformTarget::Other
        }
    }

    /// Detect the platform of the machine running this code.
    pub fn host() -> Self {
        match (std::env::consts::OS, std::env::consts::ARCH) {
            ("windows", _) => PlatformTarget::Windows,
            ("macos", _) => PlatformTarget::Macos,
            ("ios", _) => PlatformTarget::Ios,
            ("android", _) => PlatformTarget::Android,
            ("linux", arch) if arch.starts_with("mips") => PlatformTarget::Mips,
            ("linux", _) => PlatformTarget::Linux,
            _ => PlatformTarget::Other,
        }
    }

    /// Raspberry Pi and Oclea share one configuration family.
    pub fn is_embedded_arm(&self) -> bool {
        matches!(self, PlatformTarget::Raspi | PlatformTarget::Oclea)
    }

    pub fn is_apple(&self) -> bool {
        matches!(self, PlatformTarget::Macos | PlatformTarget::Ios)
    }

    /// Whether tests on this platform can be run under gdb.
    pub fn supports_gdb(&self) -> bool {
        match self {
            PlatformTarget::Linux
            | PlatformTarget::Raspi
            | PlatformTarget::Oclea
            | PlatformTarget::Mips => true,
            PlatformTarget::Windows
            | PlatformTarget::Android
            | PlatformTarget::Macos
            | PlatformTarget::Ios
            | PlatformTarget::Other => false,
        }
    }

    /// File name of the ReCpp test binary on this platform.
    pub fn test_executable_name(&self) -> &'static str {
        match self {
            PlatformTarget::Windows => "RppTests.exe",
            _ => "RppTests",
        }
    }
}

impl FromStr for PlatformTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let platform = match s.trim().to_ascii_lowercase().as_str() {
            "windows" | "win32" | "win64" => PlatformTarget::Windows,
            "linux" => PlatformTarget::Linux,
            "android" => PlatformTarget::Android,
            "macos" | "osx" | "darwin" => PlatformTarget::Macos,
            "ios" => PlatformTarget::Ios,
            "raspi" | "raspberrypi" | "rpi" => PlatformTarget::Raspi,
            "oclea" => PlatformTarget::Oclea,
            "mips" => PlatformTarget::Mips,
            "other" => PlatformTarget::Other,
            _ => return Err(Error::UnknownPlatform(s.to_string())),
        };

        Ok(platform)
    }
}

impl std::fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
