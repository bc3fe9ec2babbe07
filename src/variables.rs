//! Computed version variables.
//!
//! [`VersionVariables`] is the read-only bag of version fields handed to
//! build agents when they report a version back to the CI system. The
//! values are computed elsewhere; this crate only reads them.

use crate::error::{BuildAgentError, Result};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^v?(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)(?:-(?P<pre>[0-9A-Za-z.\-]+))?(?:\+(?P<meta>[0-9A-Za-z.\-]+))?$",
    )
    .expect("version pattern is valid")
});

/// Accept strings, numbers, booleans and null for any field.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

macro_rules! version_variables {
    ($($(#[$doc:meta])* $key:literal => $field:ident),* $(,)?) => {
        /// Version fields produced by the version calculation.
        ///
        /// Field names serialize in `PascalCase`, matching the JSON the
        /// version calculation writes. Missing fields are empty strings.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct VersionVariables {
            $(
                $(#[$doc])*
                #[serde(rename = $key, deserialize_with = "lenient_string")]
                pub $field: String,
            )*
        }

        impl VersionVariables {
            /// Every variable name, in declaration order.
            pub const NAMES: &'static [&'static str] = &[$($key),*];

            /// Iterate `(name, value)` pairs in declaration order.
            pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
                [$(($key, self.$field.as_str())),*].into_iter()
            }

            /// Look up a variable by its `PascalCase` name, case-insensitively.
            pub fn get(&self, name: &str) -> Option<&str> {
                $(
                    if name.eq_ignore_ascii_case($key) {
                        return Some(self.$field.as_str());
                    }
                )*
                None
            }
        }
    };
}

version_variables! {
    "Major" => major,
    "Minor" => minor,
    "Patch" => patch,
    "PreReleaseTag" => pre_release_tag,
    "PreReleaseTagWithDash" => pre_release_tag_with_dash,
    "PreReleaseLabel" => pre_release_label,
    "PreReleaseLabelWithDash" => pre_release_label_with_dash,
    "PreReleaseNumber" => pre_release_number,
    "WeightedPreReleaseNumber" => weighted_pre_release_number,
    "BuildMetaData" => build_meta_data,
    "FullBuildMetaData" => full_build_meta_data,
    "MajorMinorPatch" => major_minor_patch,
    "SemVer" => sem_ver,
    "AssemblySemVer" => assembly_sem_ver,
    "AssemblySemFileVer" => assembly_sem_file_ver,
    /// The version CI systems display as the build number.
    "FullSemVer" => full_sem_ver,
    "InformationalVersion" => informational_version,
    "BranchName" => branch_name,
    "EscapedBranchName" => escaped_branch_name,
    "Sha" => sha,
    "ShortSha" => short_sha,
    "VersionSourceSha" => version_source_sha,
    "CommitsSinceVersionSource" => commits_since_version_source,
    "CommitDate" => commit_date,
    "UncommittedChanges" => uncommitted_changes,
}

impl VersionVariables {
    /// Build variables from a plain version string such as `1.2.3-beta.4+5`.
    ///
    /// Strings that do not look like a semantic version still produce a
    /// usable bag: `FullSemVer`, `SemVer` and `InformationalVersion` are set
    /// to the input and everything else stays empty.
    ///
    /// # Example
    ///
    /// ```
    /// use buildagent::VersionVariables;
    ///
    /// let vars = VersionVariables::from_version("1.2.3-beta.4+5");
    /// assert_eq!(vars.major_minor_patch, "1.2.3");
    /// assert_eq!(vars.sem_ver, "1.2.3-beta.4");
    /// assert_eq!(vars.full_sem_ver, "1.2.3-beta.4+5");
    /// assert_eq!(vars.pre_release_label, "beta");
    /// ```
    pub fn from_version(version: &str) -> Self {
        let version = version.trim();
        let Some(caps) = VERSION_PATTERN.captures(version) else {
            return Self {
                sem_ver: version.to_string(),
                full_sem_ver: version.to_string(),
                informational_version: version.to_string(),
                ..Self::default()
            };
        };

        let major = caps["major"].to_string();
        let minor = caps["minor"].to_string();
        let patch = caps["patch"].to_string();
        let pre = caps.name("pre").map(|m| m.as_str()).unwrap_or_default();
        let meta = caps.name("meta").map(|m| m.as_str()).unwrap_or_default();

        let major_minor_patch = format!("{}.{}.{}", major, minor, patch);
        let with_dash = |s: &str| {
            if s.is_empty() {
                String::new()
            } else {
                format!("-{}", s)
            }
        };

        let (label, number) = match pre.rsplit_once('.') {
            Some((label, number)) if number.chars().all(|c| c.is_ascii_digit()) => {
                (label.to_string(), number.to_string())
            }
            _ => (pre.to_string(), String::new()),
        };

        let sem_ver = format!("{}{}", major_minor_patch, with_dash(pre));
        let full_sem_ver = if meta.is_empty() {
            sem_ver.clone()
        } else {
            format!("{}+{}", sem_ver, meta)
        };

        Self {
            major,
            minor,
            patch,
            pre_release_tag: pre.to_string(),
            pre_release_tag_with_dash: with_dash(pre),
            pre_release_label_with_dash: with_dash(&label),
            pre_release_label: label,
            pre_release_number: number,
            build_meta_data: meta.to_string(),
            full_build_meta_data: meta.to_string(),
            assembly_sem_ver: format!("{}.0", major_minor_patch),
            assembly_sem_file_ver: format!("{}.0", major_minor_patch),
            major_minor_patch,
            sem_ver,
            informational_version: full_sem_ver.clone(),
            full_sem_ver,
            ..Self::default()
        }
    }

    /// Parse variables from the JSON document written by the version calculation.
    pub fn from_json(json: &str, source_name: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BuildAgentError::VariablesParseError {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })
    }

    /// Load variables from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content, &path.display().to_string())
    }
}
