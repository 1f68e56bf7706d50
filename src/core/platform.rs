//! Host platform detection and artifact tag resolution.

use std::fmt;

/// Operating system family, as far as artifact selection cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    MacOs,
    /// Linux and every other POSIX-like system.
    Posix(String),
}

impl OsFamily {
    /// Accepts both Rust (`windows`, `macos`) and Node (`win32`, `darwin`)
    /// spellings.
    pub fn from_identifier(os: &str) -> Self {
        let os = os.trim().to_ascii_lowercase();
        if os.starts_with("win") {
            OsFamily::Windows
        } else if os == "macos" || os == "darwin" {
            OsFamily::MacOs
        } else {
            OsFamily::Posix(os)
        }
    }

    pub fn host() -> Self {
        Self::from_identifier(std::env::consts::OS)
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, OsFamily::Windows)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CpuArch {
    X64,
    Arm64,
    Arm,
    S390x,
    Ppc64,
    Other(String),
}

impl CpuArch {
    pub fn from_identifier(arch: &str) -> Self {
        match arch.trim().to_ascii_lowercase().as_str() {
            "x64" | "x86_64" | "amd64" => CpuArch::X64,
            "arm64" | "aarch64" => CpuArch::Arm64,
            "arm" => CpuArch::Arm,
            "s390x" => CpuArch::S390x,
            "ppc64" | "powerpc64" => CpuArch::Ppc64,
            other => CpuArch::Other(other.to_string()),
        }
    }

    pub fn host() -> Self {
        Self::from_identifier(std::env::consts::ARCH)
    }
}

/// Canonical tags published on the distribution server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactTag {
    WindowsAmd64,
    MacArm64,
    Mac386,
    LinuxAmd64,
    LinuxArm64,
    LinuxArm,
    LinuxS390x,
    LinuxPpc64,
    Linux386,
}

impl ArtifactTag {
    pub const ALL: [ArtifactTag; 9] = [
        ArtifactTag::WindowsAmd64,
        ArtifactTag::MacArm64,
        ArtifactTag::Mac386,
        ArtifactTag::LinuxAmd64,
        ArtifactTag::LinuxArm64,
        ArtifactTag::LinuxArm,
        ArtifactTag::LinuxS390x,
        ArtifactTag::LinuxPpc64,
        ArtifactTag::Linux386,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactTag::WindowsAmd64 => "windows-amd64",
            ArtifactTag::MacArm64 => "mac-arm64",
            ArtifactTag::Mac386 => "mac-386",
            ArtifactTag::LinuxAmd64 => "linux-amd64",
            ArtifactTag::LinuxArm64 => "linux-arm64",
            ArtifactTag::LinuxArm => "linux-arm",
            ArtifactTag::LinuxS390x => "linux-s390x",
            ArtifactTag::LinuxPpc64 => "linux-ppc64",
            ArtifactTag::Linux386 => "linux-386",
        }
    }
}

impl fmt::Display for ArtifactTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    pub os: OsFamily,
    pub arch: CpuArch,
    pub tag: ArtifactTag,
    pub executable_name: String,
}

/// Maps an OS/CPU pair to the artifact to download. Never fails: unknown
/// architectures fall back to `linux-386`.
pub fn resolve(os: OsFamily, arch: CpuArch, executable_base: &str) -> TargetDescriptor {
    let tag = match (&os, &arch) {
        (OsFamily::Windows, _) => ArtifactTag::WindowsAmd64,
        (OsFamily::MacOs, CpuArch::Arm64) => ArtifactTag::MacArm64,
        (OsFamily::MacOs, _) => ArtifactTag::Mac386,
        (OsFamily::Posix(_), CpuArch::X64) => ArtifactTag::LinuxAmd64,
        (OsFamily::Posix(_), CpuArch::Arm64) => ArtifactTag::LinuxArm64,
        (OsFamily::Posix(_), CpuArch::Arm) => ArtifactTag::LinuxArm,
        (OsFamily::Posix(_), CpuArch::S390x) => ArtifactTag::LinuxS390x,
        (OsFamily::Posix(_), CpuArch::Ppc64) => ArtifactTag::LinuxPpc64,
        (OsFamily::Posix(_), CpuArch::Other(_)) => ArtifactTag::Linux386,
    };

    let executable_name = if os.is_windows() {
        format!("{executable_base}.exe")
    } else {
        executable_base.to_string()
    };

    TargetDescriptor {
        os,
        arch,
        tag,
        executable_name,
    }
}
