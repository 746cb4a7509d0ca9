//! Keyboard shortcuts registry.
//!
//! Single source of truth for the help dialog and the footer hints of each page.

use crossterm::event::KeyCode;

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: KeyCode,
    /// Alternative key (e.g. an arrow key)
    pub alt_key: Option<KeyCode>,
    pub description: &'static str,
    pub category: ShortcutCategory,
    pub context: ShortcutContext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutCategory {
    General,
    Navigation,
    Actions,
}

/// Where a shortcut is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutContext {
    Global,
    Home,
    Menu,
    Cart,
    Tracking,
    Profile,
    /// Any text field while editing
    Editing,
}

impl ShortcutCategory {
    pub fn all() -> &'static [ShortcutCategory] {
        &[
            ShortcutCategory::General,
            ShortcutCategory::Navigation,
            ShortcutCategory::Actions,
        ]
    }
}

impl ShortcutContext {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutContext::Global => "Everywhere",
            ShortcutContext::Home => "Home",
            ShortcutContext::Menu => "Menu",
            ShortcutContext::Cart => "Cart",
            ShortcutContext::Tracking => "Order Tracking",
            ShortcutContext::Profile => "Profile",
            ShortcutContext::Editing => "While Typing",
        }
    }

    pub fn all() -> &'static [ShortcutContext] {
        &[
            ShortcutContext::Global,
            ShortcutContext::Home,
            ShortcutContext::Menu,
            ShortcutContext::Cart,
            ShortcutContext::Tracking,
            ShortcutContext::Profile,
            ShortcutContext::Editing,
        ]
    }
}

impl Shortcut {
    /// Format key for display (e.g., "q", "Tab", "j/↓")
    pub fn key_display(&self) -> String {
        let primary = format_keycode(&self.key);
        match &self.alt_key {
            Some(alt) => format!("{}/{}", primary, format_keycode(alt)),
            None => primary,
        }
    }

    pub fn key_display_padded(&self) -> String {
        format!("{:<10}", self.key_display())
    }
}

fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        _ => format!("{:?}", key),
    }
}

const fn shortcut(
    key: KeyCode,
    alt_key: Option<KeyCode>,
    description: &'static str,
    category: ShortcutCategory,
    context: ShortcutContext,
) -> Shortcut {
    Shortcut {
        key,
        alt_key,
        description,
        category,
        context,
    }
}

use ShortcutCategory::{Actions, General, Navigation};
use ShortcutContext as Ctx;

#[rustfmt::skip]
pub static SHORTCUTS: &[Shortcut] = &[
    // Global
    shortcut(KeyCode::Char('q'), None, "Quit", General, Ctx::Global),
    shortcut(KeyCode::Char('?'), None, "Toggle help", General, Ctx::Global),
    shortcut(KeyCode::Tab, Some(KeyCode::BackTab), "Next / previous page", Navigation, Ctx::Global),
    shortcut(KeyCode::Char('1'), None, "Home", Navigation, Ctx::Global),
    shortcut(KeyCode::Char('2'), None, "Menu", Navigation, Ctx::Global),
    shortcut(KeyCode::Char('3'), None, "Cart", Navigation, Ctx::Global),
    shortcut(KeyCode::Char('4'), None, "Track order", Navigation, Ctx::Global),
    shortcut(KeyCode::Char('5'), None, "Profile", Navigation, Ctx::Global),
    // Home
    shortcut(KeyCode::Char('j'), Some(KeyCode::Down), "Next restaurant", Navigation, Ctx::Home),
    shortcut(KeyCode::Char('k'), Some(KeyCode::Up), "Previous restaurant", Navigation, Ctx::Home),
    shortcut(KeyCode::Char('h'), Some(KeyCode::Left), "Previous cuisine", Navigation, Ctx::Home),
    shortcut(KeyCode::Char('l'), Some(KeyCode::Right), "Next cuisine", Navigation, Ctx::Home),
    shortcut(KeyCode::Char('['), Some(KeyCode::Char(']')), "Previous / next slide", Navigation, Ctx::Home),
    shortcut(KeyCode::Char('/'), None, "Search restaurants", Actions, Ctx::Home),
    shortcut(KeyCode::Enter, None, "Open menu", Actions, Ctx::Home),
    // Menu
    shortcut(KeyCode::Char('j'), Some(KeyCode::Down), "Next item", Navigation, Ctx::Menu),
    shortcut(KeyCode::Char('k'), Some(KeyCode::Up), "Previous item", Navigation, Ctx::Menu),
    shortcut(KeyCode::Char('a'), None, "Add to cart", Actions, Ctx::Menu),
    shortcut(KeyCode::Enter, None, "Item details", Actions, Ctx::Menu),
    shortcut(KeyCode::Esc, None, "Back to restaurants", Navigation, Ctx::Menu),
    // Cart
    shortcut(KeyCode::Char('j'), Some(KeyCode::Down), "Next item", Navigation, Ctx::Cart),
    shortcut(KeyCode::Char('k'), Some(KeyCode::Up), "Previous item", Navigation, Ctx::Cart),
    shortcut(KeyCode::Char('+'), Some(KeyCode::Char('=')), "Increase quantity", Actions, Ctx::Cart),
    shortcut(KeyCode::Char('-'), None, "Decrease quantity", Actions, Ctx::Cart),
    shortcut(KeyCode::Char('d'), Some(KeyCode::Delete), "Remove item", Actions, Ctx::Cart),
    shortcut(KeyCode::Char('p'), None, "Enter promo code", Actions, Ctx::Cart),
    shortcut(KeyCode::Char('o'), None, "Proceed to checkout", Actions, Ctx::Cart),
    // Tracking
    shortcut(KeyCode::Char('v'), None, "Toggle stepper orientation", Actions, Ctx::Tracking),
    shortcut(KeyCode::Char('n'), None, "Advance to next stage", Actions, Ctx::Tracking),
    shortcut(KeyCode::Char('r'), None, "Refresh order", Actions, Ctx::Tracking),
    // Profile
    shortcut(KeyCode::Char('j'), Some(KeyCode::Down), "Next field / order", Navigation, Ctx::Profile),
    shortcut(KeyCode::Char('k'), Some(KeyCode::Up), "Previous field / order", Navigation, Ctx::Profile),
    shortcut(KeyCode::Enter, None, "Edit field / track order", Actions, Ctx::Profile),
    shortcut(KeyCode::Char('s'), None, "Save changes", Actions, Ctx::Profile),
    shortcut(KeyCode::Char('L'), None, "Log out", Actions, Ctx::Profile),
    // Editing
    shortcut(KeyCode::Enter, None, "Confirm", Actions, Ctx::Editing),
    shortcut(KeyCode::Esc, None, "Stop editing", Actions, Ctx::Editing),
];

pub fn shortcuts_for_context(context: ShortcutContext) -> impl Iterator<Item = &'static Shortcut> {
    SHORTCUTS.iter().filter(move |s| s.context == context)
}

/// Shortcuts grouped by category for a given context
pub fn shortcuts_by_category_for_context(
    context: ShortcutContext,
) -> Vec<(ShortcutCategory, Vec<&'static Shortcut>)> {
    let mut result = Vec::new();
    for category in ShortcutCategory::all() {
        let shortcuts: Vec<&Shortcut> = shortcuts_for_context(context)
            .filter(|s| s.category == *category)
            .collect();
        if !shortcuts.is_empty() {
            result.push((*category, shortcuts));
        }
    }
    result
}

/// One-line hint for a page footer, e.g. "a Add to cart  Enter Item details"
pub fn footer_hint(context: ShortcutContext) -> String {
    shortcuts_for_context(context)
        .filter(|s| s.category == ShortcutCategory::Actions)
        .map(|s| format!("{} {}", s.key_display(), s.description))
        .collect::<Vec<_>>()
        .join("  ")
}
