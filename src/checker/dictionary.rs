use crate::checker::oracle::{Oracle, OracleHandle};
use crate::dict::custom::CustomWordList;
use crate::dict::manager::dictionary_paths;
use spellbook::Dictionary;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("dictionary files not found: {aff} and {dic}")]
    Missing { aff: PathBuf, dic: PathBuf },

    #[error("failed to read dictionary file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dictionary: {0}")]
    Parse(String),
}

/// Hunspell-format dictionary backed oracle.
pub struct HunspellOracle {
    dictionary: Dictionary,
}

impl HunspellOracle {
    /// Build from the contents of an `.aff` and a `.dic` file.
    pub fn from_sources(aff: &str, dic: &str) -> Result<Self, OracleError> {
        let dictionary =
            Dictionary::new(aff, dic).map_err(|e| OracleError::Parse(format!("{:?}", e)))?;
        Ok(Self { dictionary })
    }

    /// Load `index.aff` and `index.dic` for `language` from `dictionary_dir`.
    pub fn load(dictionary_dir: &Path, language: &str) -> Result<Self, OracleError> {
        let (aff_path, dic_path) = dictionary_paths(dictionary_dir, language);

        if !aff_path.exists() || !dic_path.exists() {
            return Err(OracleError::Missing {
                aff: aff_path,
                dic: dic_path,
            });
        }

        let aff = read_source(&aff_path)?;
        let dic = read_source(&dic_path)?;
        Self::from_sources(&aff, &dic)
    }
}

fn read_source(path: &Path) -> Result<String, OracleError> {
    fs::read_to_string(path).map_err(|source| OracleError::Read {
        path: path.to_path_buf(),
        source,
    })
}

impl Oracle for HunspellOracle {
    fn correct(&self, word: &str) -> bool {
        self.dictionary.check(word)
    }

    fn suggest(&self, word: &str) -> Vec<String> {
        let mut suggestions = Vec::new();
        self.dictionary.suggest(word, &mut suggestions);
        suggestions
    }

    fn add(&mut self, word: &str) {
        if let Err(e) = self.dictionary.add(word) {
            warn!("Failed to add '{}' to dictionary: {:?}", word, e);
        }
    }
}

/// Load the oracle for `language` and whitelist every custom word.
///
/// Failures never propagate: the checker simply starts with an unavailable oracle.
pub fn load_oracle(
    dictionary_dir: Option<&Path>,
    language: &str,
    custom_words: &CustomWordList,
) -> OracleHandle {
    let Some(dir) = dictionary_dir else {
        warn!("No dictionary directory available; spell checking is disabled");
        return OracleHandle::unavailable("no dictionary directory");
    };

    match HunspellOracle::load(dir, language) {
        Ok(mut oracle) => {
            for word in custom_words.words() {
                oracle.add(word);
            }
            info!(
                "Loaded {} dictionary ({} custom words)",
                language,
                custom_words.words().len()
            );
            OracleHandle::ready(oracle)
        }
        Err(e) => {
            warn!("Failed to load {} dictionary: {}", language, e);
            OracleHandle::unavailable(e.to_string())
        }
    }
}
