//! File Store: the ordered set of open files.
//!
//! The store upholds two invariants after every public operation:
//! - it is never empty
//! - exactly one file is active

use crate::test_cases::TestCaseStore;
use ide_core_lang::Language;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Final extension of a file name (`main.cpp` -> `.cpp`).
static EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[^/.]+$").expect("valid extension regex"));

/// `name` without its final extension (`main.cpp` -> `main`, `Makefile` -> `Makefile`).
pub fn base_name(name: &str) -> Cow<'_, str> {
    EXTENSION.replace(name, "")
}

/// Opaque, generation-ordered identifier of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FileId(u64);

impl FileId {
    /// Create an id from its raw value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Extension appended by [`FileStore::rename`] when the new name has no `.`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenameExtensionPolicy {
    /// Always append `.cpp`, whatever the file's language.
    #[default]
    AlwaysCpp,
    /// Use the file's own language extension.
    FileLanguage,
}

/// An open source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFile {
    /// Identifier.
    pub id: FileId,
    /// Display name, including the extension.
    pub name: String,
    /// Language of the source.
    pub language: Language,
    /// Source text.
    pub source: String,
    /// Test cases, in insertion order.
    pub test_cases: TestCaseStore,
    /// A run is in flight.
    pub running: bool,
    /// This file is shown in the editor pane.
    pub active: bool,
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The file was removed.
    Deleted {
        /// File that became active because the deleted one was active.
        promoted: Option<FileId>,
    },
    /// The file is the only one left and was kept.
    KeptLastFile,
    /// No such file.
    NotFound,
}

/// Ordered collection of [`CodeFile`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    files: Vec<CodeFile>,
    next_id: u64,
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStore {
    /// Store with the default `main.cpp` file, active, with the greeting test case.
    pub fn new() -> Self {
        let language = Language::Cpp;
        let main = CodeFile {
            id: FileId(1),
            name: format!("main{}", language.extension()),
            language,
            source: language.template().to_string(),
            test_cases: TestCaseStore::with_case(
                "Alice",
                Some("Hello, World!\nEnter your name: Hello, Alice!".to_string()),
            ),
            running: false,
            active: true,
        };
        Self {
            files: vec![main],
            next_id: 2,
        }
    }

    /// Append a new cpp file with a blank test case and make it active.
    pub fn create(&mut self) -> FileId {
        let id = FileId(self.next_id);
        self.next_id += 1;

        let language = Language::Cpp;
        let name = format!("untitled{}{}", self.files.len() + 1, language.extension());
        for file in &mut self.files {
            file.active = false;
        }
        self.files.push(CodeFile {
            id,
            name,
            language,
            source: language.template().to_string(),
            test_cases: TestCaseStore::with_blank(),
            running: false,
            active: true,
        });
        id
    }

    /// Remove a file unless it is the last one. Deleting the active file activates the first
    /// remaining file.
    pub fn delete(&mut self, id: FileId) -> DeleteOutcome {
        let Some(index) = self.position(id) else {
            return DeleteOutcome::NotFound;
        };
        if self.files.len() <= 1 {
            return DeleteOutcome::KeptLastFile;
        }

        let removed = self.files.remove(index);
        let mut promoted = None;
        if removed.active
            && let Some(first) = self.files.first_mut()
        {
            first.active = true;
            promoted = Some(first.id);
        }
        DeleteOutcome::Deleted { promoted }
    }

    /// Make `id` the active file. Unknown ids leave the store untouched and return `false`.
    pub fn set_active(&mut self, id: FileId) -> bool {
        if self.position(id).is_none() {
            return false;
        }
        for file in &mut self.files {
            file.active = file.id == id;
        }
        true
    }

    /// Rename a file. The name is trimmed; an empty name is discarded. A name without `.` gets
    /// an extension according to `policy`. Returns whether the name changed.
    pub fn rename(&mut self, id: FileId, new_name: &str, policy: RenameExtensionPolicy) -> bool {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return false;
        }
        let Some(file) = self.get_mut(id) else {
            return false;
        };

        let name = if trimmed.contains('.') {
            trimmed.to_string()
        } else {
            let extension = match policy {
                RenameExtensionPolicy::FileLanguage => file.language.extension(),
                RenameExtensionPolicy::AlwaysCpp => Language::Cpp.extension(),
            };
            format!("{trimmed}{extension}")
        };

        if file.name == name {
            return false;
        }
        file.name = name;
        true
    }

    /// Switch a file's language. The source is reset to the language template (edits are
    /// discarded) and the extension is swapped. Returns `false` if `id` is unknown.
    pub fn change_language(&mut self, id: FileId, language: Language) -> bool {
        let Some(file) = self.get_mut(id) else {
            return false;
        };
        file.name = format!("{}{}", base_name(&file.name), language.extension());
        file.language = language;
        file.source = language.template().to_string();
        true
    }

    /// Look up a file.
    pub fn get(&self, id: FileId) -> Option<&CodeFile> {
        self.files.iter().find(|file| file.id == id)
    }

    /// Look up a file mutably.
    pub fn get_mut(&mut self, id: FileId) -> Option<&mut CodeFile> {
        self.files.iter_mut().find(|file| file.id == id)
    }

    /// Index of a file in display order.
    pub fn position(&self, id: FileId) -> Option<usize> {
        self.files.iter().position(|file| file.id == id)
    }

    /// The active file.
    pub fn active(&self) -> Option<&CodeFile> {
        self.files.iter().find(|file| file.active)
    }

    /// The active file, mutably.
    pub fn active_mut(&mut self) -> Option<&mut CodeFile> {
        self.files.iter_mut().find(|file| file.active)
    }

    /// Id of the active file.
    pub fn active_id(&self) -> Option<FileId> {
        self.active().map(|file| file.id)
    }

    /// Files in display order.
    pub fn iter(&self) -> impl Iterator<Item = &CodeFile> {
        self.files.iter()
    }

    /// Number of files (never zero).
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the store holds no files. Never true for a store built by [`FileStore::new`],
    /// since the last file cannot be deleted.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Id of the file `step` positions away from the active one, wrapping around.
    pub fn neighbor_of_active(&self, step: isize) -> Option<FileId> {
        let index = self.files.iter().position(|file| file.active)?;
        let len = self.files.len() as isize;
        let target = (index as isize + step).rem_euclid(len) as usize;
        self.files.get(target).map(|file| file.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_count(store: &FileStore) -> usize {
        store.iter().filter(|f| f.active).count()
    }

    #[test]
    fn test_default_store() {
        let store = FileStore::new();
        assert_eq!(store.len(), 1);
        let main = store.active().unwrap();
        assert_eq!(main.name, "main.cpp");
        assert_eq!(main.source, Language::Cpp.template());
        let case = main.test_cases.iter().next().unwrap();
        assert_eq!(case.input, "Alice");
    }

    #[test]
    fn test_create_names_and_activates() {
        let mut store = FileStore::new();
        let id = store.create();
        assert_eq!(store.active_id(), Some(id));
        assert_eq!(store.get(id).unwrap().name, "untitled2.cpp");
        assert_eq!(store.get(id).unwrap().test_cases.len(), 1);
        assert_eq!(active_count(&store), 1);
    }

    #[test]
    fn test_extension_swap_without_existing_extension() {
        let mut store = FileStore::new();
        let id = store.active_id().unwrap();
        store.rename(id, "Makefile.", RenameExtensionPolicy::FileLanguage);
        store.change_language(id, Language::Python);
        assert_eq!(store.get(id).unwrap().name, "Makefile..py");

        store.rename(id, "dir.d/file", RenameExtensionPolicy::FileLanguage);
        store.change_language(id, Language::JavaScript);
        assert_eq!(store.get(id).unwrap().name, "dir.d/file.js");
    }

    #[test]
    fn test_store_is_never_emptied() {
        let mut store = FileStore::new();
        let first = store.active_id().unwrap();
        let second = store.create();
        assert!(!store.is_empty());

        assert_eq!(
            store.delete(second),
            DeleteOutcome::Deleted {
                promoted: Some(first)
            }
        );
        assert_eq!(store.delete(first), DeleteOutcome::KeptLastFile);
        assert!(!store.is_empty());
        assert_eq!(store.len(), 1);
        assert_eq!(active_count(&store), 1);
    }

    #[test]
    fn test_neighbor_wraps() {
        let mut store = FileStore::new();
        let first = store.active_id().unwrap();
        let second = store.create();
        assert_eq!(store.neighbor_of_active(1), Some(first));
        assert_eq!(store.neighbor_of_active(-1), Some(first));
        store.set_active(first);
        assert_eq!(store.neighbor_of_active(1), Some(second));
    }
}
