pub const TAB_SELECTOR: &str = ".editor-tab";
pub const PANE_SELECTOR: &str = ".code-content";
pub const TAB_LANG_ATTRIBUTE: &str = "data-lang";

pub fn pane_id(lang: &str) -> String {
    format!("code-{lang}")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabSelection {
    pub active_tab: usize,
    pub pane_id: Option<String>,
}

/// Picks the clicked tab and the pane it points at. Tabs without a
/// language still become active but show no pane.
pub fn select_tab(langs: &[Option<String>], clicked: usize) -> Option<TabSelection> {
    let lang = langs.get(clicked)?;

    Some(TabSelection {
        active_tab: clicked,
        pane_id: lang
            .as_deref()
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .map(pane_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicked_tab_points_at_its_pane() {
        let langs = vec![Some("java".to_string()), Some("rust".to_string())];

        assert_eq!(
            select_tab(&langs, 1),
            Some(TabSelection {
                active_tab: 1,
                pane_id: Some("code-rust".to_string()),
            })
        );
    }

    #[test]
    fn tab_without_language_has_no_pane() {
        let langs = vec![None, Some(" ".to_string())];

        assert_eq!(select_tab(&langs, 0).and_then(|selection| selection.pane_id), None);
        assert_eq!(select_tab(&langs, 1).and_then(|selection| selection.pane_id), None);
        assert_eq!(select_tab(&langs, 5), None);
    }
}
