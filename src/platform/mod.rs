//! Host platform detection and bundle platform matching.
//!
//! Catalog filenames carry dot-joined platform tokens (e.g.
//! `.linux.x86_64`); the search command drops bundles built for other
//! hosts before selection unless asked not to.

/// The OS/architecture pair a bundle must target to be installable here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    /// Detect the platform of the running host.
    pub fn detect() -> Self {
        Platform {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }

    /// Check whether an archive name targets this platform.
    ///
    /// Matching is alias-based over the lowercased name, since catalogs are
    /// not consistent about how they spell an OS or an architecture.
    pub fn matches(&self, name: &str) -> bool {
        let name_lower = name.to_lowercase();

        let os_match = match self.os.as_str() {
            "macos" | "darwin" => {
                name_lower.contains("darwin") || name_lower.contains("macos")
            }
            "linux" => name_lower.contains("linux"),
            "windows" => name_lower.contains("windows"),
            _ => false,
        };

        if !os_match {
            return false;
        }

        match self.arch.as_str() {
            "x86_64" | "amd64" => {
                name_lower.contains("x86_64") || name_lower.contains("amd64")
            }
            "aarch64" | "arm64" => {
                name_lower.contains("aarch64") || name_lower.contains("arm64")
            }
            // Allow if the arch is one we have no aliases for
            _ => true,
        }
    }
}
