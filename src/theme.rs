pub const THEME_KEY: &str = "portfolio-theme";
pub const THEME_ATTRIBUTE: &str = "data-theme";
pub const THEME_CONTROL_SELECTOR: &str = ".theme-btn";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Purple,
    Blue,
    Green,
    Orange,
    Pink,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Self::Purple,
        Self::Blue,
        Self::Green,
        Self::Orange,
        Self::Pink,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Purple => "purple",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Pink => "pink",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim() {
            "purple" => Some(Self::Purple),
            "blue" => Some(Self::Blue),
            "green" => Some(Self::Green),
            "orange" => Some(Self::Orange),
            "pink" => Some(Self::Pink),
            _ => None,
        }
    }
}

/// Key-value storage for user preferences.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str);
}

/// Loads the saved theme, rewriting the stored value when it is missing or
/// unknown so storage always names the theme that gets applied.
pub fn restore_theme(store: &impl PreferenceStore) -> Theme {
    let stored = store.load(THEME_KEY);
    let theme = stored
        .as_deref()
        .and_then(Theme::from_str)
        .unwrap_or_default();

    if stored.as_deref() != Some(theme.as_str()) {
        persist_theme(store, theme);
    }
    theme
}

pub fn persist_theme(store: &impl PreferenceStore, theme: Theme) {
    store.save(THEME_KEY, theme.as_str());
}

/// Active flags for each control, matched by the identifier it carries.
pub fn active_controls(controls: &[Option<String>], theme: Theme) -> Vec<bool> {
    controls
        .iter()
        .map(|control| control.as_deref().and_then(Theme::from_str) == Some(theme))
        .collect()
}
