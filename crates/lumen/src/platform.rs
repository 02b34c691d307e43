//! Platform capability detection.

use lumen_config::Config;
use lumen_core::{Capabilities, is_mobile_platform};
use sysinfo::System;

/// Identification string for the running platform: OS family, name,
/// version and kernel, plus a Termux marker when running inside it.
pub fn identification() -> String {
    let mut parts = vec![std::env::consts::OS.to_string()];
    parts.extend(System::name());
    parts.extend(System::long_os_version());
    parts.extend(System::kernel_version());
    if std::env::var_os("TERMUX_VERSION").is_some() {
        parts.push("termux".to_string());
    }
    parts.join(" ")
}

/// Decide what the background may do on this platform.
pub fn detect(config: &Config) -> Capabilities {
    let ident = identification();
    let capabilities = Capabilities {
        reduced_motion: config.reduced_motion,
        mobile: is_mobile_platform(&ident),
    };
    log::info!("platform: {ident}");
    log::debug!("capabilities: {capabilities:?}");
    capabilities
}
