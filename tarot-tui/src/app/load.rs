//! Loading state shared by screens that fetch on entry

/// Progress of a screen's entry fetch
#[derive(Debug, Clone, PartialEq)]
pub enum Load<T> {
    Loading,
    Loaded(T),
    /// Fixed user-facing message; technical detail only goes to the log
    Failed(String),
}

impl<T> Load<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Load::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Load::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Load::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for Load<T> {
    fn default() -> Self {
        Load::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let loading: Load<u8> = Load::default();
        assert!(loading.is_loading());
        assert!(loading.loaded().is_none());

        let loaded = Load::Loaded(7u8);
        assert_eq!(loaded.loaded(), Some(&7));
        assert!(loaded.error().is_none());

        let failed: Load<u8> = Load::Failed("nope".to_string());
        assert_eq!(failed.error(), Some("nope"));
        assert!(!failed.is_loading());
    }
}
