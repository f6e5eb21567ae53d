/// Overlay menu state machine with focus trap
use log::debug;

/// The page operations the menu needs, independent of any real DOM
pub trait MenuDom {
    type Element: Clone + PartialEq;

    /// The element that currently has keyboard focus
    fn active_element(&self) -> Option<Self::Element>;

    fn focus(&mut self, element: &Self::Element);

    /// Focusable descendants of the overlay, in tab order
    fn focusables(&self) -> Vec<Self::Element>;

    fn set_overlay_hidden(&mut self, hidden: bool);

    /// Reflect the state on the trigger's `aria-expanded`
    fn set_trigger_expanded(&mut self, expanded: bool);

    fn set_scroll_locked(&mut self, locked: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
}

/// Keys the menu reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Escape,
    Other,
}

impl Key {
    /// Map a `KeyboardEvent.key` value
    pub fn from_name(name: &str) -> Self {
        match name {
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: Key, shift: bool) -> Self {
        Self { key, shift }
    }
}

/// Whether the host should suppress the browser's default action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Handled,
}

pub struct MenuController<D: MenuDom> {
    dom: D,
    state: MenuState,
    last_focused: Option<D::Element>,
}

impl<D: MenuDom> MenuController<D> {
    pub fn new(dom: D) -> Self {
        Self {
            dom,
            state: MenuState::Closed,
            last_focused: None,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }
        self.last_focused = self.dom.active_element();
        self.dom.set_overlay_hidden(false);
        self.dom.set_trigger_expanded(true);
        if let Some(first) = self.dom.focusables().first() {
            self.dom.focus(first);
        }
        self.dom.set_scroll_locked(true);
        self.state = MenuState::Open;
        debug!("Menu opened");
    }

    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }
        self.dom.set_overlay_hidden(true);
        self.dom.set_trigger_expanded(false);
        self.dom.set_scroll_locked(false);
        if let Some(previous) = self.last_focused.take() {
            self.dom.focus(&previous);
        }
        self.state = MenuState::Closed;
        debug!("Menu closed");
    }

    /// Trigger button activation
    pub fn toggle(&mut self) {
        match self.state {
            MenuState::Closed => self.open(),
            MenuState::Open => self.close(),
        }
    }

    /// Activation of an element marked as a closer
    pub fn activate_closer(&mut self) {
        self.close();
    }

    /// Click inside the overlay; only a click on the backdrop itself closes
    pub fn click_overlay(&mut self, on_backdrop: bool) {
        if on_backdrop {
            self.close();
        }
    }

    pub fn key_down(&mut self, press: KeyPress) -> KeyOutcome {
        if !self.is_open() {
            return KeyOutcome::Ignored;
        }
        match press.key {
            Key::Escape => {
                self.close();
                KeyOutcome::Handled
            }
            Key::Tab => self.trap_tab(press.shift),
            Key::Other => KeyOutcome::Ignored,
        }
    }

    /// Wrap focus at the ends of the overlay. Moves between the ends are
    /// left to the browser.
    fn trap_tab(&mut self, backwards: bool) -> KeyOutcome {
        let items = self.dom.focusables();
        let (Some(first), Some(last)) = (items.first(), items.last()) else {
            return KeyOutcome::Handled;
        };

        let active = self.dom.active_element();
        let inside = active.as_ref().is_some_and(|el| items.contains(el));
        let (edge, wrap_to) = if backwards { (first, last) } else { (last, first) };

        if !inside || active.as_ref() == Some(edge) {
            self.dom.focus(wrap_to);
            KeyOutcome::Handled
        } else {
            KeyOutcome::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Page with a trigger, a link outside the menu and three menu items
    struct FakeDom {
        focused: Option<&'static str>,
        items: Vec<&'static str>,
        hidden: bool,
        expanded: bool,
        scroll_locked: bool,
    }

    impl FakeDom {
        fn new() -> Self {
            Self {
                focused: Some("trigger"),
                items: vec!["home", "about", "close"],
                hidden: true,
                expanded: false,
                scroll_locked: false,
            }
        }
    }

    impl MenuDom for FakeDom {
        type Element = &'static str;

        fn active_element(&self) -> Option<&'static str> {
            self.focused
        }

        fn focus(&mut self, element: &&'static str) {
            self.focused = Some(*element);
        }

        fn focusables(&self) -> Vec<&'static str> {
            if self.hidden {
                Vec::new()
            } else {
                self.items.clone()
            }
        }

        fn set_overlay_hidden(&mut self, hidden: bool) {
            self.hidden = hidden;
        }

        fn set_trigger_expanded(&mut self, expanded: bool) {
            self.expanded = expanded;
        }

        fn set_scroll_locked(&mut self, locked: bool) {
            self.scroll_locked = locked;
        }
    }

    fn open_menu() -> MenuController<FakeDom> {
        let mut menu = MenuController::new(FakeDom::new());
        menu.toggle();
        menu
    }

    fn tab() -> KeyPress {
        KeyPress::new(Key::Tab, false)
    }

    fn shift_tab() -> KeyPress {
        KeyPress::new(Key::Tab, true)
    }

    #[test]
    fn test_starts_closed() {
        let menu = MenuController::new(FakeDom::new());
        assert_eq!(menu.state(), MenuState::Closed);
        assert!(menu.dom().hidden);
    }

    #[test]
    fn test_trigger_opens_and_focuses_inside() {
        let menu = open_menu();
        assert!(menu.is_open());
        assert!(!menu.dom().hidden);
        assert!(menu.dom().expanded);
        assert!(menu.dom().scroll_locked);
        assert_eq!(menu.dom().focused, Some("home"));
    }

    #[test]
    fn test_escape_closes_and_restores_focus() {
        let mut menu = open_menu();
        assert_eq!(menu.key_down(KeyPress::new(Key::Escape, false)), KeyOutcome::Handled);
        assert!(!menu.is_open());
        assert!(menu.dom().hidden);
        assert!(!menu.dom().expanded);
        assert!(!menu.dom().scroll_locked);
        assert_eq!(menu.dom().focused, Some("trigger"));
    }

    #[test]
    fn test_keys_ignored_while_closed() {
        let mut menu = MenuController::new(FakeDom::new());
        assert_eq!(menu.key_down(tab()), KeyOutcome::Ignored);
        assert_eq!(menu.key_down(KeyPress::new(Key::Escape, false)), KeyOutcome::Ignored);
        assert_eq!(menu.dom().focused, Some("trigger"));
        assert!(!menu.is_open());
    }

    #[test]
    fn test_tab_wraps_from_last_to_first() {
        let mut menu = open_menu();
        menu.dom.focused = Some("close");
        assert_eq!(menu.key_down(tab()), KeyOutcome::Handled);
        assert_eq!(menu.dom().focused, Some("home"));
    }

    #[test]
    fn test_shift_tab_wraps_from_first_to_last() {
        let mut menu = open_menu();
        assert_eq!(menu.key_down(shift_tab()), KeyOutcome::Handled);
        assert_eq!(menu.dom().focused, Some("close"));
    }

    #[test]
    fn test_tab_in_the_middle_is_left_to_browser() {
        let mut menu = open_menu();
        menu.dom.focused = Some("about");
        assert_eq!(menu.key_down(tab()), KeyOutcome::Ignored);
        assert_eq!(menu.key_down(shift_tab()), KeyOutcome::Ignored);
        assert_eq!(menu.dom().focused, Some("about"));
    }

    #[test]
    fn test_tab_pulls_stray_focus_back_inside() {
        let mut menu = open_menu();
        menu.dom.focused = Some("footer-link");
        assert_eq!(menu.key_down(shift_tab()), KeyOutcome::Handled);
        assert_eq!(menu.dom().focused, Some("close"));
    }

    #[test]
    fn test_tab_with_no_focusables_is_swallowed() {
        let mut dom = FakeDom::new();
        dom.items.clear();
        let mut menu = MenuController::new(dom);
        menu.open();
        assert_eq!(menu.dom().focused, Some("trigger"));
        assert_eq!(menu.key_down(tab()), KeyOutcome::Handled);
    }

    #[test]
    fn test_closer_and_backdrop_close() {
        let mut menu = open_menu();
        menu.activate_closer();
        assert!(!menu.is_open());

        menu.toggle();
        menu.click_overlay(false);
        assert!(menu.is_open());
        menu.click_overlay(true);
        assert!(!menu.is_open());
        assert_eq!(menu.dom().focused, Some("trigger"));
    }

    #[test]
    fn test_toggle_while_open_closes() {
        let mut menu = open_menu();
        menu.toggle();
        assert_eq!(menu.state(), MenuState::Closed);
        assert!(!menu.dom().expanded);
    }

    #[test]
    fn test_focus_not_restored_without_previous_element() {
        let mut dom = FakeDom::new();
        dom.focused = None;
        let mut menu = MenuController::new(dom);
        menu.open();
        assert_eq!(menu.dom().focused, Some("home"));
        menu.close();
        assert_eq!(menu.dom().focused, Some("home"));
    }

    #[test]
    fn test_reopen_remembers_latest_focus() {
        let mut menu = open_menu();
        menu.close();
        menu.dom.focused = Some("footer-link");
        menu.open();
        menu.close();
        assert_eq!(menu.dom().focused, Some("footer-link"));
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("Tab"), Key::Tab);
        assert_eq!(Key::from_name("Escape"), Key::Escape);
        assert_eq!(Key::from_name("Esc"), Key::Escape);
        assert_eq!(Key::from_name("Enter"), Key::Other);
    }
}
