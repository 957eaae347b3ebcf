//! Profile persistence
//!
//! Loads and saves the profile document at
//! `<project>/.gantry/profiles/default.toml`, and hosts the locator
//! (`ensure_default`) that guarantees the document exists before anything
//! reads it.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use toml::value::Table;

use crate::catalog::{closest_name, StepCatalog};
use crate::error::{GantryError, GantryResult};
use crate::profile::{BuildProfile, ProfileSettings, StepRecord, SyncReport};

/// Document format version this build reads and writes.
pub const PROFILE_FORMAT_VERSION: u32 = 1;

/// Directory holding gantry state inside a project.
pub const GANTRY_DIR: &str = ".gantry";
/// Subdirectory for profile documents.
pub const PROFILES_DIR: &str = "profiles";
/// File name of the default profile document.
pub const DEFAULT_PROFILE_FILE: &str = "default.toml";

/// Non-fatal document warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Outcome of [`ProfileStore::ensure_default`].
#[derive(Debug, Clone)]
pub struct EnsureReport {
    pub profile: BuildProfile,
    /// True when the document did not exist and was created.
    pub created: bool,
    /// Directories created on the way to the document, project-relative,
    /// in creation order.
    pub created_dirs: Vec<PathBuf>,
    /// Unknown-key warnings from loading an existing document.
    pub warnings: Vec<ProfileWarning>,
    /// The reconciliation that seeded a freshly created document. Empty
    /// when the document already existed.
    pub seeded: SyncReport,
}

/// TOML representation of the profile document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProfileDoc {
    version: u32,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
    #[serde(default)]
    settings: ProfileSettings,
    #[serde(default)]
    steps: BTreeMap<String, StepDoc>,
}

/// TOML representation of one step record. The registry key carries the name.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StepDoc {
    #[serde(default = "default_true")]
    enabled: bool,
    #[serde(default)]
    settings: Table,
}

fn default_true() -> bool {
    true
}

/// Store for the default profile of one project.
pub struct ProfileStore {
    project_root: PathBuf,
}

impl ProfileStore {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Absolute path of the default profile document.
    pub fn profile_path(&self) -> PathBuf {
        self.project_root
            .join(GANTRY_DIR)
            .join(PROFILES_DIR)
            .join(DEFAULT_PROFILE_FILE)
    }

    pub fn exists(&self) -> bool {
        self.profile_path().exists()
    }

    /// Load the document and collect non-fatal warnings (unknown keys).
    pub fn load_with_warnings(&self) -> GantryResult<(BuildProfile, Vec<ProfileWarning>)> {
        let path = self.profile_path();
        if !path.exists() {
            return Err(GantryError::ProfileMissing { path });
        }
        let content = fs::read_to_string(&path)?;
        parse_profile(&content, &path)
    }

    /// Save the document atomically (write to a temp file, then rename).
    pub fn save(&self, profile: &BuildProfile) -> GantryResult<()> {
        let dir = self.project_root.join(GANTRY_DIR).join(PROFILES_DIR);
        fs::create_dir_all(&dir)?;

        let content = render_profile(profile)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.persist(self.profile_path())
            .map_err(|e| GantryError::Io(e.error))?;
        Ok(())
    }

    /// Locate the default profile, creating it if necessary.
    ///
    /// Missing ancestor directories are created top-down and reported, not
    /// treated as errors. A missing document is created with default
    /// settings, then seeded by reconciling against `catalog` (saved before
    /// and after seeding). An existing document is loaded as-is; its steps
    /// table re-populates the in-memory registry.
    pub fn ensure_default(&self, catalog: &StepCatalog) -> GantryResult<EnsureReport> {
        let created_dirs = self.ensure_dirs()?;

        if self.exists() {
            let (profile, warnings) = self.load_with_warnings()?;
            return Ok(EnsureReport {
                profile,
                created: false,
                created_dirs,
                warnings,
                seeded: SyncReport::default(),
            });
        }

        let (profile, seeded) = self.create_default(catalog)?;
        Ok(EnsureReport {
            profile,
            created: true,
            created_dirs,
            warnings: Vec::new(),
            seeded,
        })
    }

    /// Overwrite the document with a fresh default profile (`init --force`).
    ///
    /// Never reads the existing document, so it also recovers from a
    /// corrupted one.
    pub fn recreate_default(&self, catalog: &StepCatalog) -> GantryResult<EnsureReport> {
        let created_dirs = self.ensure_dirs()?;
        let (profile, seeded) = self.create_default(catalog)?;
        Ok(EnsureReport {
            profile,
            created: true,
            created_dirs,
            warnings: Vec::new(),
            seeded,
        })
    }

    /// Walk the fixed path below the project root, creating each missing
    /// directory. Returns the created ones, project-relative.
    fn ensure_dirs(&self) -> GantryResult<Vec<PathBuf>> {
        let mut created = Vec::new();
        let mut rel = PathBuf::new();
        for part in [GANTRY_DIR, PROFILES_DIR] {
            rel.push(part);
            let abs = self.project_root.join(&rel);
            if !abs.exists() {
                fs::create_dir(&abs)?;
                created.push(rel.clone());
            }
        }
        Ok(created)
    }

    fn create_default(&self, catalog: &StepCatalog) -> GantryResult<(BuildProfile, SyncReport)> {
        let mut profile = BuildProfile::new();
        self.save(&profile)?;
        let seeded = profile.sync_steps(catalog);
        self.save(&profile)?;
        Ok((profile, seeded))
    }
}

/// Parse a profile document. Public for callers that already hold the
/// content (and for fuzzing).
pub fn parse_profile(
    content: &str,
    file: &Path,
) -> GantryResult<(BuildProfile, Vec<ProfileWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let doc: ProfileDoc = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| GantryError::InvalidProfile {
        file: file.to_path_buf(),
        message: e.to_string(),
    })?;

    if doc.version != PROFILE_FORMAT_VERSION {
        return Err(GantryError::VersionMismatch {
            found: doc.version,
            expected: PROFILE_FORMAT_VERSION,
        });
    }

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ProfileWarning {
                key: key.clone(),
                file: file.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((from_doc(doc), warnings))
}

/// Render the document exactly as [`ProfileStore::save`] writes it.
pub fn render_profile(profile: &BuildProfile) -> GantryResult<String> {
    toml::to_string_pretty(&to_doc(profile)).map_err(|e| GantryError::Serialize {
        message: e.to_string(),
    })
}

fn from_doc(doc: ProfileDoc) -> BuildProfile {
    let steps = doc
        .steps
        .into_iter()
        .map(|(name, step)| {
            let record = StepRecord {
                name: name.clone(),
                enabled: step.enabled,
                settings: step.settings,
            };
            (name, record)
        })
        .collect();

    BuildProfile {
        settings: doc.settings,
        steps,
        created_at: doc.created_at,
        updated_at: doc.updated_at,
    }
}

fn to_doc(profile: &BuildProfile) -> ProfileDoc {
    ProfileDoc {
        version: PROFILE_FORMAT_VERSION,
        created_at: profile.created_at,
        updated_at: profile.updated_at,
        settings: profile.settings.clone(),
        steps: profile
            .steps
            .iter()
            .map(|(name, record)| {
                (
                    name.clone(),
                    StepDoc {
                        enabled: record.enabled,
                        settings: record.settings.clone(),
                    },
                )
            })
            .collect(),
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const KNOWN_KEYS: &[&str] = &[
        "version",
        "created_at",
        "updated_at",
        "settings",
        "automate_info_plist",
        "default_info_plist",
        "automate_entitlements",
        "default_entitlements",
        "app_uses_non_exempt_encryption",
        "minimum_os_version",
        "ios",
        "tvos",
        "macos",
        "steps",
        "enabled",
    ];

    closest_name(unknown, KNOWN_KEYS.iter().copied())
}
