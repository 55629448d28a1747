//! Platform detection

use acconfig_core::PlatformProvider;
use acconfig_domain::Platform;

/// Platform implied by the build target
///
/// Android and iOS builds run inside a native shell; everything else is
/// treated as a browser.
#[must_use]
pub const fn detect_platform() -> Platform {
    if cfg!(any(target_os = "android", target_os = "ios")) {
        Platform::Native
    } else {
        Platform::Web
    }
}

/// `PlatformProvider` answering with a fixed value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticPlatform(Platform);

impl StaticPlatform {
    #[must_use]
    pub const fn new(platform: Platform) -> Self {
        Self(platform)
    }

    #[must_use]
    pub const fn detect() -> Self {
        Self(detect_platform())
    }
}

impl Default for StaticPlatform {
    fn default() -> Self {
        Self::detect()
    }
}

impl PlatformProvider for StaticPlatform {
    fn platform(&self) -> Platform {
        self.0
    }
}
