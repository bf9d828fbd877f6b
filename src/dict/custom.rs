use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CustomDictionaryError {
    #[error("failed to read custom dictionary {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write custom dictionary {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The user's own words, one per line. Without a path the list lives in memory only.
#[derive(Debug, Clone, Default)]
pub struct CustomWordList {
    path: Option<PathBuf>,
    words: Vec<String>,
}

impl CustomWordList {
    /// Read the list at `path`; a missing file is an empty list.
    pub fn load(path: &Path) -> Result<Self, CustomDictionaryError> {
        let words = match fs::read_to_string(path) {
            Ok(content) => parse_words(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(source) => {
                return Err(CustomDictionaryError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            words,
        })
    }

    pub fn in_memory(words: Vec<String>) -> Self {
        Self { path: None, words }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Append `word` and persist the list. Returns `false` if it was already present.
    pub fn insert(&mut self, word: &str) -> Result<bool, CustomDictionaryError> {
        if self.contains(word) {
            return Ok(false);
        }

        self.words.push(word.to_string());
        if let Err(e) = self.save() {
            self.words.pop();
            return Err(e);
        }
        Ok(true)
    }

    fn save(&self) -> Result<(), CustomDictionaryError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let write_err = |source| CustomDictionaryError::Write {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, self.words.join("\n")).map_err(write_err)
    }
}

fn parse_words(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let list = CustomWordList::load(&dir.path().join("custom.txt")).unwrap();
        assert!(list.words().is_empty());
    }

    #[test]
    fn test_load_trims_and_skips_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.txt");
        fs::write(&path, "ropey\n\n  spellbook \r\nnspell").unwrap();

        let list = CustomWordList::load(&path).unwrap();
        assert_eq!(list.words(), ["ropey", "spellbook", "nspell"]);
    }

    #[test]
    fn test_insert_persists_and_dedupes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("custom.txt");

        let mut list = CustomWordList::load(&path).unwrap();
        assert!(list.insert("Obsidian").unwrap());
        assert!(list.insert("wrold").unwrap());
        assert!(!list.insert("Obsidian").unwrap());
        // Exact match only.
        assert!(list.insert("obsidian").unwrap());

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Obsidian\nwrold\nobsidian"
        );
        let reloaded = CustomWordList::load(&path).unwrap();
        assert_eq!(reloaded.words(), list.words());
    }

    #[test]
    fn test_in_memory_list_never_touches_disk() {
        let mut list = CustomWordList::in_memory(vec!["one".to_string()]);
        assert!(list.insert("two").unwrap());
        assert!(list.contains("two"));
        assert_eq!(list.path(), None);
    }
}
