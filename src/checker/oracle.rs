use std::fmt;

/// Correctness and suggestion provider queried word by word.
pub trait Oracle {
    fn correct(&self, word: &str) -> bool;

    /// Candidate corrections, best first. May be empty.
    fn suggest(&self, word: &str) -> Vec<String>;

    /// Accept `word` as correct for the rest of the session.
    fn add(&mut self, word: &str);
}

/// The oracle as owned by the checker, with its load state made explicit.
pub enum OracleHandle {
    Ready(Box<dyn Oracle>),
    Unavailable(String),
}

impl OracleHandle {
    pub fn ready(oracle: impl Oracle + 'static) -> Self {
        OracleHandle::Ready(Box::new(oracle))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        OracleHandle::Unavailable(reason.into())
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, OracleHandle::Ready(_))
    }

    pub fn get(&self) -> Option<&dyn Oracle> {
        match self {
            OracleHandle::Ready(oracle) => Some(oracle.as_ref()),
            OracleHandle::Unavailable(_) => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut dyn Oracle> {
        match self {
            OracleHandle::Ready(oracle) => Some(oracle.as_mut()),
            OracleHandle::Unavailable(_) => None,
        }
    }

    /// Why the oracle is not ready, if it is not.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            OracleHandle::Ready(_) => None,
            OracleHandle::Unavailable(reason) => Some(reason),
        }
    }
}

impl fmt::Debug for OracleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleHandle::Ready(_) => f.write_str("OracleHandle::Ready"),
            OracleHandle::Unavailable(reason) => {
                f.debug_tuple("OracleHandle::Unavailable").field(reason).finish()
            }
        }
    }
}

/// Word-list oracle used as a test double throughout the crate.
#[cfg(test)]
pub(crate) mod fake {
    use super::Oracle;
    use std::collections::{HashMap, HashSet};

    #[derive(Debug, Default, Clone)]
    pub struct FakeOracle {
        known: HashSet<String>,
        suggestions: HashMap<String, Vec<String>>,
    }

    impl FakeOracle {
        pub fn new(known: &[&str]) -> Self {
            Self {
                known: known.iter().map(|w| w.to_string()).collect(),
                suggestions: HashMap::new(),
            }
        }

        pub fn with_suggestions(mut self, word: &str, suggestions: &[&str]) -> Self {
            self.suggestions.insert(
                word.to_string(),
                suggestions.iter().map(|s| s.to_string()).collect(),
            );
            self
        }
    }

    impl Oracle for FakeOracle {
        fn correct(&self, word: &str) -> bool {
            self.known.contains(word)
        }

        fn suggest(&self, word: &str) -> Vec<String> {
            self.suggestions.get(word).cloned().unwrap_or_default()
        }

        fn add(&mut self, word: &str) {
            self.known.insert(word.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeOracle;
    use super::*;

    #[test]
    fn test_handle_state() {
        let mut ready = OracleHandle::ready(FakeOracle::new(&["hello"]));
        assert!(ready.is_ready());
        assert!(ready.get().unwrap().correct("hello"));

        ready.get_mut().unwrap().add("wrold");
        assert!(ready.get().unwrap().correct("wrold"));
        assert_eq!(ready.unavailable_reason(), None);

        let missing = OracleHandle::unavailable("dictionary files not found");
        assert!(!missing.is_ready());
        assert!(missing.get().is_none());
        assert_eq!(
            missing.unavailable_reason(),
            Some("dictionary files not found")
        );
    }
}
