//! Host capability flags that decide whether the animation may run.

/// Identification-string fragments of mobile-class platforms.
const MOBILE_MARKERS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "ios",
    "termux",
];

/// What the host environment allows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// The user asked for non-essential motion to be suppressed.
    pub reduced_motion: bool,
    /// The platform looks like a phone or tablet.
    pub mobile: bool,
}

impl Capabilities {
    /// Whether the animated background may run at all.
    pub fn allows_animation(&self) -> bool {
        !self.reduced_motion && !self.mobile
    }
}

/// Coarse device-class sniff over a platform identification string.
pub fn is_mobile_platform(ident: &str) -> bool {
    let ident = ident.to_ascii_lowercase();
    ident
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|word| MOBILE_MARKERS.contains(&word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_animation() {
        assert!(Capabilities::default().allows_animation());
        let reduced = Capabilities {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!reduced.allows_animation());
        let mobile = Capabilities {
            mobile: true,
            ..Default::default()
        };
        assert!(!mobile.allows_animation());
    }

    #[test]
    fn test_mobile_sniff() {
        assert!(is_mobile_platform("Android 14 5.15.123-android14-11"));
        assert!(is_mobile_platform("iOS 17.2 (iPhone)"));
        assert!(is_mobile_platform("Linux termux"));
        assert!(!is_mobile_platform("Ubuntu 24.04 LTS 6.8.0-45-generic"));
        assert!(!is_mobile_platform("macOS 14.5 Sonoma 23.5.0"));
        // "ios" must match as a word, not inside "Kiosk"
        assert!(!is_mobile_platform("Kiosk Linux 6.1"));
    }
}
