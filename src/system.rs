//! Host and toolchain facts reported in the `system` section.

use serde::Serialize;
use sysinfo::System;

use crate::error::AppError;

/// Version of the rustc that compiled the service, captured by `build.rs`.
pub const RUST_VERSION: &str = env!("RUSTC_VERSION");

/// Facts gathered fresh on every request.
#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    pub hostname: String,
    pub platform: String,
    pub platform_version: String,
    pub architecture: String,
    pub cpu_count: usize,
    pub rust_version: String,
}

impl SystemInfo {
    /// Query the host. Fails only if the hostname cannot be determined.
    pub fn gather() -> Result<Self, AppError> {
        let version = System::kernel_version().or_else(System::os_version);
        Self::from_host(System::host_name(), version)
    }

    fn from_host(hostname: Option<String>, version: Option<String>) -> Result<Self, AppError> {
        let hostname = hostname
            .filter(|h| !h.is_empty())
            .ok_or_else(|| AppError::Internal("Unable to determine hostname".to_string()))?;

        Ok(Self {
            hostname,
            platform: platform_name(std::env::consts::OS).to_string(),
            platform_version: version.unwrap_or_else(|| "unknown".to_string()),
            architecture: std::env::consts::ARCH.to_string(),
            cpu_count: cpu_count(),
            rust_version: RUST_VERSION.to_string(),
        })
    }
}

/// OS family name in the form `uname -s` reports it.
fn platform_name(os: &str) -> &str {
    match os {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        "netbsd" => "NetBSD",
        "openbsd" => "OpenBSD",
        "android" => "Android",
        "ios" => "iOS",
        other => other,
    }
}

/// Logical CPUs available to the process, 0 if unknown.
fn cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_name() {
        assert_eq!(platform_name("linux"), "Linux");
        assert_eq!(platform_name("macos"), "Darwin");
        assert_eq!(platform_name("windows"), "Windows");
        assert_eq!(platform_name("haiku"), "haiku");
    }

    #[test]
    fn test_from_host() {
        let info = SystemInfo::from_host(Some("box".to_string()), Some("6.1.0".to_string()))
            .unwrap();
        assert_eq!(info.hostname, "box");
        assert_eq!(info.platform_version, "6.1.0");
        assert_eq!(info.architecture, std::env::consts::ARCH);
    }

    #[test]
    fn test_rust_version_is_full_release() {
        let parts: Vec<&str> = RUST_VERSION.split('.').collect();
        assert_eq!(parts.len(), 3, "expected x.y.z, got {}", RUST_VERSION);
        for part in parts {
            assert!(!part.is_empty() && part.chars().all(|c| c.is_ascii_digit()), "{}", RUST_VERSION);
        }
        // Never older than the declared rust-version
        let minor: u32 = RUST_VERSION.split('.').nth(1).unwrap().parse().unwrap();
        assert!(RUST_VERSION.starts_with("1.") && minor >= 80);
    }

    #[test]
    fn test_missing_version_is_unknown() {
        let info = SystemInfo::from_host(Some("box".to_string()), None).unwrap();
        assert_eq!(info.platform_version, "unknown");
    }

    #[test]
    fn test_missing_hostname_is_internal_error() {
        let err = SystemInfo::from_host(None, None).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));

        let err = SystemInfo::from_host(Some(String::new()), None).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
