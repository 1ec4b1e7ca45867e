pub const FAB_BUTTON_ID: &str = "fabMain";
pub const FAB_MENU_ID: &str = "fabMenu";
pub const OPEN_ICON: &str = "fa-times";
pub const CLOSED_ICON: &str = "fa-plus";

/// Open/closed state of the floating action menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FabMenu {
    open: bool,
}

impl FabMenu {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Closes the menu for clicks outside the button and menu. Returns
    /// `true` when the click changed anything.
    pub fn click_outside(&mut self, inside: bool) -> bool {
        if inside || !self.open {
            return false;
        }

        self.open = false;
        true
    }

    /// Icon class to add and the one to remove.
    pub fn icon_swap(self) -> (&'static str, &'static str) {
        if self.open {
            (OPEN_ICON, CLOSED_ICON)
        } else {
            (CLOSED_ICON, OPEN_ICON)
        }
    }
}
