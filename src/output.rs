//! Output writers for the two report formats.

use crate::crawl::pipeline::Profile;
use anyhow::Result;
use std::fs::{self, File};
use std::path::Path;

/// Characters of detail text carried into the CSV snippet column.
const SNIPPET_LEN: usize = 300;

/// Write the full profile list as pretty-printed JSON.
pub fn write_json(profiles: &[Profile], path: &Path) -> Result<()> {
    let rendered = serde_json::to_string_pretty(profiles)?;
    fs::write(path, rendered)?;
    Ok(())
}

/// Write the flattened CSV report. Multi-valued indicator columns are
/// semicolon-joined; the details column is a flattened snippet.
pub fn write_csv(profiles: &[Profile], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_writer(File::create(path)?);
    writer.write_record([
        "name",
        "status",
        "profile_url",
        "emails",
        "phones",
        "crypto_addrs",
        "details_snippet",
    ])?;

    for profile in profiles {
        writer.write_record([
            profile.name.clone().unwrap_or_default(),
            profile.status.clone().unwrap_or_default(),
            profile.profile_url.clone().unwrap_or_default(),
            profile.emails.join(";"),
            profile.phones.join(";"),
            profile.crypto_addrs.join(";"),
            snippet(profile.details_text.as_deref()),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn snippet(details: Option<&str>) -> String {
    details
        .unwrap_or("")
        .chars()
        .take(SNIPPET_LEN)
        .collect::<String>()
        .replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;

    fn sample_profile() -> Profile {
        Profile {
            name: Some("Alice Example".to_string()),
            status: Some("confirmed".to_string()),
            profile_url: Some("https://scamwave.com/scammers/alice".to_string()),
            details_text: Some("Contact alice@example.com\nor call +1 555 867 5309".to_string()),
            emails: vec!["alice@example.com".to_string()],
            phones: vec!["+15558675309".to_string()],
            crypto_addrs: vec![],
        }
    }

    #[test]
    fn test_json_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        let profiles = vec![sample_profile(), Profile::default()];

        write_json(&profiles, &path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let parsed: Vec<Profile> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, profiles);
    }

    #[test]
    fn test_json_field_order_matches_declaration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");

        write_json(&[sample_profile()], &path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let name_at = raw.find("\"name\"").unwrap();
        let status_at = raw.find("\"status\"").unwrap();
        let url_at = raw.find("\"profile_url\"").unwrap();
        let details_at = raw.find("\"details_text\"").unwrap();
        assert!(name_at < status_at);
        assert!(status_at < url_at);
        assert!(url_at < details_at);

        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_json_eq!(
            parsed[0]["emails"],
            serde_json::json!(["alice@example.com"])
        );
    }

    #[test]
    fn test_csv_headers_only_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.csv");

        write_csv(&[], &path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(
            raw.trim(),
            "name,status,profile_url,emails,phones,crypto_addrs,details_snippet"
        );
    }

    #[test]
    fn test_csv_joins_indicator_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.csv");
        let mut profile = sample_profile();
        profile.emails.push("alt@example.com".to_string());

        write_csv(&[profile], &path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let row = raw.lines().nth(1).unwrap();
        assert!(row.contains("alice@example.com;alt@example.com"));
        assert!(row.contains("+15558675309"));
    }

    #[test]
    fn test_snippet_truncates_and_flattens() {
        let long = "x".repeat(400);
        assert_eq!(snippet(Some(&long)).len(), SNIPPET_LEN);
        assert_eq!(snippet(Some("line one\nline two")), "line one line two");
        assert_eq!(snippet(None), "");
    }
}
