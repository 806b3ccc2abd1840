//! Durable state: document content, references, sticky notes, and theme.
//!
//! # File layout
//!
//! ```text
//! <data dir>/
//!   document.txt        raw document content
//!   references.json     [{"id": 1, "text": "...", "added": "..."}]
//!   sticky_notes.json   opaque JSON array owned by the caller
//! ```
//!
//! Each file is replaced whole (written to a `.tmp` sibling, then renamed),
//! so a reader never sees a half-written file. The three files are written
//! independently; a crash between writes can leave them out of step with
//! each other.
//!
//! Theme settings live in memory only and are never written.
//!
//! # Concurrency
//!
//! [`StateStore`] is a plain owned value. Callers that serve requests on more
//! than one thread must wrap it in a mutex and hold the lock across each
//! mutate-and-persist call.

use std::io;
use std::sync::LazyLock;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{Local, NaiveDateTime, SubsecRound};
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

const DOCUMENT_FILE: &str = "document.txt";
const REFERENCES_FILE: &str = "references.json";
const STICKY_NOTES_FILE: &str = "sticky_notes.json";

/// `#RGB` or `#RRGGBB`.
static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("valid regex")
});

/// Locations of the backing files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    dir: Utf8PathBuf,
}

impl StorePaths {
    /// Use `dir` as the data directory. It is created on first save.
    pub fn new<P: AsRef<Utf8Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// The data directory.
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Path of the document content file.
    pub fn document(&self) -> Utf8PathBuf {
        self.dir.join(DOCUMENT_FILE)
    }

    /// Path of the references file.
    pub fn references(&self) -> Utf8PathBuf {
        self.dir.join(REFERENCES_FILE)
    }

    /// Path of the sticky notes file.
    pub fn sticky_notes(&self) -> Utf8PathBuf {
        self.dir.join(STICKY_NOTES_FILE)
    }
}

/// A bibliographic reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Positive id, unique within the collection.
    pub id: u64,
    /// Free-form citation text.
    pub text: String,
    /// When the reference was added (local time).
    pub added: NaiveDateTime,
}

/// Named editor theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Light background (default).
    #[default]
    Light,
    /// Dark background.
    Dark,
    /// High-contrast black and white.
    Bw,
    /// Warm paper tones.
    Paper,
}

impl ThemeName {
    /// Returns the theme name as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Bw => "bw",
            Self::Paper => "paper",
        }
    }
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-chosen theme colors. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomTheme {
    /// Accent color for primary actions.
    pub primary_color: String,
    /// Accent color for secondary elements.
    pub secondary_color: String,
    /// Page background.
    pub background_color: String,
    /// Body text.
    pub text_color: String,
}

impl Default for CustomTheme {
    fn default() -> Self {
        Self {
            primary_color: "#E53E3E".to_string(),
            secondary_color: "#319795".to_string(),
            background_color: "#F9FAFB".to_string(),
            text_color: "#1F2937".to_string(),
        }
    }
}

/// A partial [`CustomTheme`] update. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomThemePatch {
    /// New primary color.
    pub primary_color: Option<String>,
    /// New secondary color.
    pub secondary_color: Option<String>,
    /// New background color.
    pub background_color: Option<String>,
    /// New text color.
    pub text_color: Option<String>,
}

impl CustomThemePatch {
    fn fields(&self) -> [(&'static str, Option<&String>); 4] {
        [
            ("primaryColor", self.primary_color.as_ref()),
            ("secondaryColor", self.secondary_color.as_ref()),
            ("backgroundColor", self.background_color.as_ref()),
            ("textColor", self.text_color.as_ref()),
        ]
    }
}

/// Owner of all persisted application state.
#[derive(Debug)]
pub struct StateStore {
    paths: StorePaths,
    document: String,
    references: Vec<Reference>,
    sticky_notes: Vec<serde_json::Value>,
    theme: ThemeName,
    custom_theme: CustomTheme,
    /// Highest reference id handed out or loaded, so deleted ids stay retired.
    highest_reference_id: u64,
}

impl StateStore {
    /// Create an empty store backed by `paths` without touching the disk.
    pub fn new(paths: StorePaths) -> Self {
        Self {
            paths,
            document: String::new(),
            references: Vec::new(),
            sticky_notes: Vec::new(),
            theme: ThemeName::default(),
            custom_theme: CustomTheme::default(),
            highest_reference_id: 0,
        }
    }

    /// Create a store and [`load`](Self::load) whatever is on disk.
    pub fn open(paths: StorePaths) -> StoreResult<Self> {
        let mut store = Self::new(paths);
        store.load()?;
        Ok(store)
    }

    /// Read the backing files, replacing in-memory document, references,
    /// and sticky notes.
    ///
    /// Missing files load as empty. A references or sticky notes file that
    /// is not valid JSON also loads as empty (with a warning). Other I/O
    /// failures are returned.
    #[tracing::instrument(skip(self), fields(dir = %self.paths.dir))]
    pub fn load(&mut self) -> StoreResult<()> {
        self.document = read_optional(&self.paths.document())?.unwrap_or_default();
        let references_path = self.paths.references();
        self.references = recover_references(read_json_list(&references_path)?, &references_path);
        self.sticky_notes = read_json_list(&self.paths.sticky_notes())?;
        self.highest_reference_id = self.references.iter().map(|r| r.id).max().unwrap_or(0);

        tracing::debug!(
            document_len = self.document.len(),
            references = self.references.len(),
            sticky_notes = self.sticky_notes.len(),
            "state loaded"
        );
        Ok(())
    }

    /// Write document, references, and sticky notes to disk.
    ///
    /// Creates the data directory if needed. Each file is replaced whole;
    /// the three writes are not a transaction.
    #[tracing::instrument(skip(self), fields(dir = %self.paths.dir))]
    pub fn save(&self) -> StoreResult<()> {
        std::fs::create_dir_all(self.paths.dir()).map_err(|source| StoreError::Io {
            path: self.paths.dir.clone(),
            source,
        })?;

        write_atomic(&self.paths.document(), self.document.as_bytes())?;
        write_atomic(
            &self.paths.references(),
            &to_pretty_json(&self.references, "references")?,
        )?;
        write_atomic(
            &self.paths.sticky_notes(),
            &to_pretty_json(&self.sticky_notes, "sticky notes")?,
        )?;

        tracing::debug!("state saved");
        Ok(())
    }

    /// Backing file locations.
    pub const fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Current document content.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Replace the document content and persist.
    ///
    /// On a failed save the previous content is kept.
    #[tracing::instrument(skip_all, fields(len = tracing::field::Empty))]
    pub fn set_document(&mut self, content: impl Into<String>) -> StoreResult<()> {
        let content = content.into();
        tracing::Span::current().record("len", content.len());
        let previous = std::mem::replace(&mut self.document, content);
        self.save().inspect_err(|_| self.document = previous)
    }

    /// References in insertion order.
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Append a reference and persist.
    ///
    /// The new id is one past the larger of the collection size and the
    /// highest id seen since the store was loaded. Nothing changes if the
    /// save fails.
    #[tracing::instrument(skip_all)]
    pub fn add_reference(&mut self, text: impl Into<String>) -> StoreResult<Reference> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(StoreError::EmptyReference);
        }

        let id = (self.references.len() as u64).max(self.highest_reference_id) + 1;
        let reference = Reference {
            id,
            text,
            added: Local::now().naive_local().trunc_subsecs(6),
        };
        self.references.push(reference.clone());
        if let Err(e) = self.save() {
            self.references.pop();
            return Err(e);
        }
        self.highest_reference_id = id;

        tracing::info!(id, count = self.references.len(), "reference added");
        Ok(reference)
    }

    /// Remove the reference with `id` and persist.
    ///
    /// Returns `false` if no reference had that id; the files are rewritten
    /// either way. On a failed save the reference stays.
    #[tracing::instrument(skip(self))]
    pub fn delete_reference(&mut self, id: u64) -> StoreResult<bool> {
        let previous = self.references.clone();
        self.references.retain(|r| r.id != id);
        let removed = self.references.len() != previous.len();
        if let Err(e) = self.save() {
            self.references = previous;
            return Err(e);
        }

        if removed {
            tracing::info!(id, "reference deleted");
        } else {
            tracing::debug!(id, "no reference with this id");
        }
        Ok(removed)
    }

    /// Sticky notes, exactly as last set.
    pub fn sticky_notes(&self) -> &[serde_json::Value] {
        &self.sticky_notes
    }

    /// Replace all sticky notes and persist.
    #[tracing::instrument(skip_all, fields(count = notes.len()))]
    pub fn set_sticky_notes(&mut self, notes: Vec<serde_json::Value>) -> StoreResult<()> {
        let previous = std::mem::replace(&mut self.sticky_notes, notes);
        self.save().inspect_err(|_| self.sticky_notes = previous)
    }

    /// Current theme name.
    pub const fn theme(&self) -> ThemeName {
        self.theme
    }

    /// Switch theme. Not persisted.
    pub fn set_theme(&mut self, theme: ThemeName) {
        tracing::debug!(theme = theme.as_str(), "theme changed");
        self.theme = theme;
    }

    /// Current custom theme colors.
    pub const fn custom_theme(&self) -> &CustomTheme {
        &self.custom_theme
    }

    /// Apply the set fields of `patch`. Not persisted.
    ///
    /// Every provided color is validated before any is applied, so an
    /// invalid patch leaves the theme untouched.
    pub fn merge_custom_theme(&mut self, patch: &CustomThemePatch) -> StoreResult<&CustomTheme> {
        for (field, value) in patch.fields() {
            if let Some(value) = value
                && !HEX_COLOR.is_match(value)
            {
                return Err(StoreError::InvalidColor {
                    field,
                    value: value.clone(),
                });
            }
        }

        let theme = &mut self.custom_theme;
        let targets = [
            (&patch.primary_color, &mut theme.primary_color),
            (&patch.secondary_color, &mut theme.secondary_color),
            (&patch.background_color, &mut theme.background_color),
            (&patch.text_color, &mut theme.text_color),
        ];
        for (value, target) in targets {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }

        tracing::debug!(theme = ?self.custom_theme, "custom theme updated");
        Ok(&self.custom_theme)
    }
}

/// Read a file, treating "not found" as `None`.
fn read_optional(path: &Utf8Path) -> StoreResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read a JSON array, substituting an empty list when the file is absent or
/// is not a JSON array.
fn read_json_list(path: &Utf8Path) -> StoreResult<Vec<serde_json::Value>> {
    let Some(content) = read_optional(path)? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str(&content) {
        Ok(items) => Ok(items),
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "malformed data file, starting empty");
            Ok(Vec::new())
        }
    }
}

/// A reference entry as found on disk. Older files hold bare
/// `{"text": ...}` entries without an id or timestamp.
#[derive(Deserialize)]
struct StoredReference {
    id: Option<u64>,
    text: String,
    added: Option<NaiveDateTime>,
}

/// Turn loaded entries into references.
///
/// Entries without usable text are skipped with a warning. Missing ids are
/// assigned after the highest id present, in file order; a missing
/// timestamp becomes the load time.
fn recover_references(entries: Vec<serde_json::Value>, path: &Utf8Path) -> Vec<Reference> {
    let stored: Vec<StoredReference> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match StoredReference::deserialize(entry) {
            Ok(r) => Some(r),
            Err(e) => {
                tracing::warn!(path = %path, index, error = %e, "skipping unreadable reference");
                None
            }
        })
        .collect();

    let mut next_id = stored.iter().filter_map(|r| r.id).max().unwrap_or(0);
    let loaded_at = Local::now().naive_local().trunc_subsecs(6);
    stored
        .into_iter()
        .map(|r| Reference {
            id: r.id.unwrap_or_else(|| {
                next_id += 1;
                next_id
            }),
            text: r.text,
            added: r.added.unwrap_or(loaded_at),
        })
        .collect()
}

fn to_pretty_json<T: Serialize>(value: &T, what: &'static str) -> StoreResult<Vec<u8>> {
    serde_json::to_vec_pretty(value).map_err(|source| StoreError::Serialize { what, source })
}

/// Write `bytes` to a temporary sibling of `path`, then rename over `path`.
fn write_atomic(path: &Utf8Path, bytes: &[u8]) -> StoreResult<()> {
    let temp_path = path.with_extension(format!("{}.tmp", path.extension().unwrap_or("")));

    std::fs::write(&temp_path, bytes).map_err(|source| StoreError::Io {
        path: temp_path.clone(),
        source,
    })?;
    std::fs::rename(&temp_path, path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (StateStore, TempDir) {
        let tmp = TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().join("data")).unwrap();
        let store = StateStore::open(StorePaths::new(dir)).unwrap();
        (store, tmp)
    }

    #[test]
    fn opens_empty_when_nothing_on_disk() {
        let (store, _tmp) = setup();
        assert_eq!(store.document(), "");
        assert!(store.references().is_empty());
        assert!(store.sticky_notes().is_empty());
        assert_eq!(store.theme(), ThemeName::Light);
        assert_eq!(store.custom_theme(), &CustomTheme::default());
    }

    #[test]
    fn save_creates_data_dir_and_files() {
        let (store, _tmp) = setup();
        assert!(!store.paths().dir().exists());
        store.save().unwrap();
        assert!(store.paths().document().is_file());
        assert!(store.paths().references().is_file());
        assert!(store.paths().sticky_notes().is_file());
        assert!(!store.paths().document().with_extension("txt.tmp").exists());
    }

    #[test]
    fn add_then_delete_leaves_collection_empty() {
        let (mut store, _tmp) = setup();
        let reference = store.add_reference("Johnson et al. (2020)").unwrap();
        assert_eq!(reference.id, 1);
        assert_eq!(store.references().len(), 1);

        assert!(store.delete_reference(reference.id).unwrap());
        assert!(store.references().is_empty());

        assert!(!store.delete_reference(reference.id).unwrap());
        assert!(store.references().is_empty());
    }

    #[test]
    fn reference_ids_count_up() {
        let (mut store, _tmp) = setup();
        let ids: Vec<u64> = ["a", "b", "c"]
            .into_iter()
            .map(|t| store.add_reference(t).unwrap().id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let (mut store, _tmp) = setup();
        store.add_reference("first").unwrap();
        let second = store.add_reference("second").unwrap();
        store.delete_reference(second.id).unwrap();

        let third = store.add_reference("third").unwrap();
        assert_eq!(third.id, 3);

        store.delete_reference(1).unwrap();
        let fourth = store.add_reference("fourth").unwrap();
        assert_eq!(fourth.id, 4);
    }

    #[test]
    fn blank_reference_is_rejected() {
        let (mut store, _tmp) = setup();
        assert!(matches!(
            store.add_reference("   "),
            Err(StoreError::EmptyReference)
        ));
        assert!(store.references().is_empty());
    }

    #[test]
    fn add_reference_persists_immediately() {
        let (mut store, _tmp) = setup();
        store.add_reference("Smith (1999)").unwrap();

        let reopened = StateStore::open(store.paths().clone()).unwrap();
        assert_eq!(reopened.references(), store.references());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (mut store, _tmp) = setup();
        store.set_document("<p>Naïve café — draft</p>\n\nSecond paragraph.").unwrap();
        store.add_reference("Müller, K. (2021). Über Texte.").unwrap();
        store
            .set_sticky_notes(vec![
                json!({"id": 1, "content": "Cite Johnson", "color": "#FEF08A"}),
                json!({"id": 2, "content": "Check stats", "color": "#BFDBFE"}),
            ])
            .unwrap();

        let mut reloaded = StateStore::new(store.paths().clone());
        reloaded.load().unwrap();
        assert_eq!(reloaded.document(), store.document());
        assert_eq!(reloaded.references(), store.references());
        assert_eq!(reloaded.sticky_notes(), store.sticky_notes());
    }

    #[test]
    fn json_files_are_pretty_and_keep_non_ascii() {
        let (mut store, _tmp) = setup();
        store.add_reference("Ünïcödé").unwrap();
        let raw = fs::read_to_string(store.paths().references()).unwrap();
        assert!(raw.contains("Ünïcödé"));
        assert!(raw.contains("\n  {"));
    }

    #[test]
    fn document_is_written_raw() {
        let (mut store, _tmp) = setup();
        store.set_document("<b>plain</b> text").unwrap();
        let raw = fs::read_to_string(store.paths().document()).unwrap();
        assert_eq!(raw, "<b>plain</b> text");
    }

    #[test]
    fn corrupt_references_load_as_empty() {
        let (mut store, _tmp) = setup();
        store.add_reference("kept?").unwrap();
        store.set_document("still here").unwrap();
        fs::write(store.paths().references(), "{not json").unwrap();

        store.load().unwrap();
        assert!(store.references().is_empty());
        assert_eq!(store.document(), "still here");
    }

    #[test]
    fn corrupt_sticky_notes_load_as_empty() {
        let (mut store, _tmp) = setup();
        store.set_sticky_notes(vec![json!("note")]).unwrap();
        fs::write(store.paths().sticky_notes(), "[1, 2,").unwrap();

        store.load().unwrap();
        assert!(store.sticky_notes().is_empty());
    }

    #[test]
    fn loads_references_written_by_older_versions() {
        let (store, _tmp) = setup();
        fs::create_dir_all(store.paths().dir()).unwrap();
        fs::write(
            store.paths().references(),
            r#"[{"id": 7, "text": "Old ref", "added": "2024-03-01T10:15:30.123456"}]"#,
        )
        .unwrap();

        let mut store = StateStore::open(store.paths().clone()).unwrap();
        assert_eq!(store.references()[0].id, 7);
        assert_eq!(store.add_reference("new").unwrap().id, 8);
    }

    #[test]
    fn bare_text_references_get_ids_and_keep_neighbours() {
        let (store, _tmp) = setup();
        fs::create_dir_all(store.paths().dir()).unwrap();
        fs::write(
            store.paths().references(),
            r#"[
                {"id": 1, "text": "Keep me", "added": "2024-03-01T10:15:30"},
                {"text": "no id"},
                {"id": 3}
            ]"#,
        )
        .unwrap();

        let mut store = StateStore::open(store.paths().clone()).unwrap();
        let texts: Vec<&str> = store.references().iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["Keep me", "no id"]);
        assert_eq!(store.references()[1].id, 2);

        store.add_reference("new").unwrap();
        let raw = fs::read_to_string(store.paths().references()).unwrap();
        assert!(raw.contains("Keep me"));
        assert!(raw.contains("no id"));
    }

    #[test]
    fn high_water_mark_is_rebuilt_from_disk_on_reopen() {
        let (mut store, _tmp) = setup();
        store.add_reference("one").unwrap();
        store.add_reference("two").unwrap();
        store.delete_reference(2).unwrap();
        assert_eq!(store.add_reference("three").unwrap().id, 3);

        store.delete_reference(3).unwrap();
        let mut reopened = StateStore::open(store.paths().clone()).unwrap();
        assert_eq!(reopened.add_reference("four").unwrap().id, 2);
    }

    /// A store whose data directory sits under a regular file, so every
    /// save fails.
    fn unwritable() -> (StateStore, TempDir) {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let dir = Utf8PathBuf::try_from(blocker.join("data")).unwrap();
        (StateStore::new(StorePaths::new(dir)), tmp)
    }

    #[test]
    fn failed_save_rolls_back_add_reference() {
        let (mut store, _tmp) = unwritable();
        assert!(matches!(store.add_reference("x"), Err(StoreError::Io { .. })));
        assert!(store.references().is_empty());
        assert_eq!(store.highest_reference_id, 0);
    }

    #[test]
    fn failed_save_rolls_back_delete_reference() {
        let (mut store, _tmp) = unwritable();
        let reference = Reference {
            id: 1,
            text: "kept".to_string(),
            added: Local::now().naive_local(),
        };
        store.references.push(reference.clone());

        assert!(store.delete_reference(1).is_err());
        assert_eq!(store.references(), &[reference]);
    }

    #[test]
    fn failed_save_rolls_back_document_and_notes() {
        let (mut store, _tmp) = unwritable();
        store.document = "before".to_string();

        assert!(store.set_document("after").is_err());
        assert_eq!(store.document(), "before");

        assert!(store.set_sticky_notes(vec![json!({"id": 1})]).is_err());
        assert!(store.sticky_notes().is_empty());
    }

    #[test]
    fn theme_changes_are_not_persisted() {
        let (mut store, _tmp) = setup();
        store.set_theme(ThemeName::Dark);
        store
            .merge_custom_theme(&CustomThemePatch {
                primary_color: Some("#000000".to_string()),
                ..Default::default()
            })
            .unwrap();
        store.save().unwrap();

        let reopened = StateStore::open(store.paths().clone()).unwrap();
        assert_eq!(reopened.theme(), ThemeName::Light);
        assert_eq!(reopened.custom_theme(), &CustomTheme::default());
    }

    #[test]
    fn custom_theme_merge_is_partial() {
        let (mut store, _tmp) = setup();
        let theme = store
            .merge_custom_theme(&CustomThemePatch {
                background_color: Some("#111".to_string()),
                text_color: Some("#EEEEEE".to_string()),
                ..Default::default()
            })
            .unwrap()
            .clone();

        assert_eq!(theme.background_color, "#111");
        assert_eq!(theme.text_color, "#EEEEEE");
        assert_eq!(theme.primary_color, CustomTheme::default().primary_color);
        assert_eq!(theme.secondary_color, CustomTheme::default().secondary_color);
    }

    #[test]
    fn invalid_color_leaves_theme_unchanged() {
        let (mut store, _tmp) = setup();
        let result = store.merge_custom_theme(&CustomThemePatch {
            primary_color: Some("#123456".to_string()),
            text_color: Some("red".to_string()),
            ..Default::default()
        });

        assert!(matches!(
            result,
            Err(StoreError::InvalidColor { field: "textColor", .. })
        ));
        assert_eq!(store.custom_theme(), &CustomTheme::default());
    }

    #[test]
    fn patch_deserializes_from_camel_case() {
        let patch: CustomThemePatch =
            serde_json::from_value(json!({"primaryColor": "#abc"})).unwrap();
        assert_eq!(patch.primary_color.as_deref(), Some("#abc"));
        assert!(patch.text_color.is_none());
    }

    #[test]
    fn theme_name_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ThemeName::Bw).unwrap(), json!("bw"));
        assert_eq!(ThemeName::Paper.to_string(), "paper");
    }
}
