use serde::Deserialize;

use crate::{ActionError, Result};

pub const MANIFEST_URL: &str = "https://deployer.org/manifest.json";

/// One release record from the Deployer manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    pub version: String,
    pub url: String,
}

/// Fetch the release manifest.
pub async fn fetch(url: &str) -> Result<Vec<ManifestEntry>> {
    let body = reqwest::get(url).await?.error_for_status()?.text().await?;
    let entries = serde_json::from_str(&body)?;
    Ok(entries)
}

/// Find the download URL for a release version.
///
/// A leading `v` on the requested version is ignored; the manifest is
/// scanned in order and the first exact match wins. A miss is an error
/// naming the version and the manifest, rather than the upstream
/// behavior of warning and running on with no binary.
pub fn find_version(entries: &[ManifestEntry], version: &str) -> Result<String> {
    let version = version.strip_prefix('v').unwrap_or(version);

    entries
        .iter()
        .find(|entry| entry.version == version)
        .map(|entry| entry.url.clone())
        .ok_or_else(|| ActionError::VersionNotFound {
            version: version.to_string(),
            manifest_url: MANIFEST_URL.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ManifestEntry> {
        serde_json::from_str(
            r#"[
                {"version": "7.0.0", "url": "https://deployer.org/releases/v7.0.0/deployer.phar"},
                {"version": "7.1.0", "url": "https://deployer.org/releases/v7.1.0/deployer.phar"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_find_exact_version() {
        let url = find_version(&sample(), "7.1.0").unwrap();
        assert_eq!(url, "https://deployer.org/releases/v7.1.0/deployer.phar");
    }

    #[test]
    fn test_find_version_strips_leading_v() {
        let url = find_version(&sample(), "v7.1.0").unwrap();
        assert_eq!(url, "https://deployer.org/releases/v7.1.0/deployer.phar");
    }

    #[test]
    fn test_find_version_miss() {
        let err = find_version(&sample(), "9.9.9").unwrap_err();
        assert!(matches!(
            err,
            ActionError::VersionNotFound { ref version, .. } if version == "9.9.9"
        ));
    }

    #[test]
    fn test_manifest_extra_fields_ignored() {
        let entries: Vec<ManifestEntry> = serde_json::from_str(
            r#"[{"version": "7.0.0", "url": "X", "sha1": "abc"}]"#,
        )
        .unwrap();
        assert_eq!(find_version(&entries, "7.0.0").unwrap(), "X");
    }
}
