use serde::{Deserialize, Serialize};

/// Process-wide UI preferences. No per-chatroom scoping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPreferences {
    pub dark_mode: bool,
    pub sidebar_open: bool,
    pub search_query: String,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            sidebar_open: true,
            search_query: String::new(),
        }
    }
}

impl UiPreferences {
    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        self.dark_mode = dark;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn set_sidebar_open(&mut self, open: bool) {
        self.sidebar_open = open;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_start_light_with_open_sidebar() {
        let prefs = UiPreferences::default();

        assert!(!prefs.dark_mode);
        assert!(prefs.sidebar_open);
        assert!(prefs.search_query.is_empty());
    }

    #[test]
    fn toggles_flip_current_values() {
        let mut prefs = UiPreferences::default();

        prefs.toggle_dark_mode();
        prefs.toggle_sidebar();

        assert!(prefs.dark_mode);
        assert!(!prefs.sidebar_open);
    }
}
