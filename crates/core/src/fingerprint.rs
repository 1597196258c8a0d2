//! Device fingerprints for view deduplication.
//!
//! The backend counts one view per `(article, device)` pair. The device key
//! is a digest of the client's reported browser/OS attributes together with
//! the article owner and article id, so the same browser viewing two
//! different articles yields two keys.

use sha2::{Digest, Sha256};

use crate::types::DbId;

/// Client/device attributes reported by the host environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceInfo {
    pub user_agent: String,
    pub browser: String,
    pub browser_version: String,
    pub os: String,
    pub os_version: String,
}

/// Lower-case hex SHA-256 over the device attributes, owner id and article id.
pub fn fingerprint(device: &DeviceInfo, user_id: DbId, article_id: DbId) -> String {
    let mut hasher = Sha256::new();
    for part in [
        device.user_agent.as_str(),
        device.browser.as_str(),
        device.browser_version.as_str(),
        device.os.as_str(),
        device.os_version.as_str(),
    ] {
        hasher.update(part.as_bytes());
        hasher.update([0x1f]);
    }
    hasher.update(user_id.to_string().as_bytes());
    hasher.update([0x1f]);
    hasher.update(article_id.to_string().as_bytes());

    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device() -> DeviceInfo {
        DeviceInfo {
            user_agent: "Mozilla/5.0".into(),
            browser: "chrome".into(),
            browser_version: "64".into(),
            os: "mac".into(),
            os_version: "10.13".into(),
        }
    }

    #[test]
    fn is_stable_hex_digest() {
        let a = fingerprint(&device(), 1, 2);
        let b = fingerprint(&device(), 1, 2);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn empty_device_matches_known_digest() {
        assert_eq!(
            fingerprint(&DeviceInfo::default(), 1, 2),
            "5b3bf860be290285f84a9831537845057e0446cd3a7ac7e32aa690dcca88f5eb"
        );
    }

    #[test]
    fn differs_per_article() {
        assert_ne!(fingerprint(&device(), 1, 2), fingerprint(&device(), 1, 3));
    }

    #[test]
    fn attribute_boundaries_are_not_ambiguous() {
        let mut left = device();
        left.browser = "chrome6".into();
        left.browser_version = "4".into();
        assert_ne!(fingerprint(&left, 1, 2), fingerprint(&device(), 1, 2));
    }
}
