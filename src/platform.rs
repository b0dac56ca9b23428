use std::fmt;
use std::str::FromStr;

use crate::error::PrefsError;

/// Operating system family used to pick platform-specific keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    Windows,
    Macos,
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Macos
        } else {
            Platform::Other
        }
    }

    /// Key suffix that selects an override for this platform, if any.
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            Platform::Linux => Some(".linux"),
            Platform::Windows => Some(".windows"),
            Platform::Macos => Some(".macos"),
            Platform::Other => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Windows => "windows",
            Platform::Macos => "macos",
            Platform::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linux" => Ok(Platform::Linux),
            "windows" => Ok(Platform::Windows),
            "macos" => Ok(Platform::Macos),
            "other" => Ok(Platform::Other),
            _ => Err(PrefsError::UnknownPlatform(s.to_string())),
        }
    }
}
