pub mod dialogs;
pub mod form_field;
pub mod keybindings;
pub mod pages;
pub mod panels;
pub mod terminal_guard;
pub mod widgets;
