use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::time::Instant;

use super::{Page, PageAction, Route};
use crate::profile::{ProfileError, ProfileField, ProfileForm};
use crate::session::Session;
use crate::types::{format_price, PastOrderStatus};
use crate::ui::form_field::TextInput;
use crate::ui::keybindings::ShortcutContext;
use crate::ui::panels::{border_style, select_next, select_prev};
use crate::ui::widgets::Toast;

pub struct ProfilePage {
    inputs: Vec<(ProfileField, TextInput)>,
    errors: Vec<ProfileError>,
    /// Fields first, then history orders
    focus: usize,
    editing: bool,
    history_state: ListState,
}

impl ProfilePage {
    pub fn new(session: &Session) -> Self {
        let mut page = Self {
            inputs: ProfileField::all()
                .iter()
                .map(|f| (*f, TextInput::new(f.placeholder())))
                .collect(),
            errors: Vec::new(),
            focus: 0,
            editing: false,
            history_state: ListState::default(),
        };
        page.load(&session.profile);
        page
    }

    /// Reset the inputs to the saved profile
    pub fn load(&mut self, profile: &ProfileForm) {
        for (field, input) in &mut self.inputs {
            input.set_value(profile.value(*field));
        }
        self.errors.clear();
    }

    pub fn draft(&self) -> ProfileForm {
        let mut form = ProfileForm::default();
        for (field, input) in &self.inputs {
            form.set_value(*field, input.value());
        }
        form
    }

    pub fn errors(&self) -> &[ProfileError] {
        &self.errors
    }

    fn focus_count(&self, session: &Session) -> usize {
        self.inputs.len() + session.order_history.len()
    }

    fn focused_order(&self) -> Option<usize> {
        self.focus.checked_sub(self.inputs.len())
    }

    fn save(&mut self, session: &mut Session) -> Vec<PageAction> {
        let draft = self.draft();
        match draft.validate() {
            Ok(()) => {
                self.errors.clear();
                tracing::info!(name = %draft.name, "Profile updated");
                session.profile = draft;
                vec![PageAction::Notify(Toast::info(
                    "Profile Updated",
                    "Your profile information has been saved.",
                ))]
            }
            Err(errors) => {
                tracing::debug!(count = errors.len(), "Profile validation failed");
                self.errors = errors;
                Vec::new()
            }
        }
    }

    fn error_for(&self, field: ProfileField) -> Option<&ProfileError> {
        self.errors.iter().find(|e| e.field() == field)
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let mut constraints = vec![Constraint::Length(3)];
        for _ in &self.inputs {
            constraints.push(Constraint::Length(3));
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(0));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {} ", session.profile.initials()),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {}  ", session.profile.name)),
            Span::styled(session.profile.email.clone(), Style::default().fg(Color::Gray)),
        ]))
        .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, chunks[0]);

        for (i, (field, input)) in self.inputs.iter().enumerate() {
            let focused = self.focus == i;
            input.render(
                frame,
                chunks[1 + i * 2],
                field.label(),
                focused,
                focused && self.editing,
            );
            if let Some(err) = self.error_for(*field) {
                frame.render_widget(
                    Paragraph::new(Span::styled(err.to_string(), Style::default().fg(Color::Red))),
                    chunks[2 + i * 2],
                );
            }
        }
    }

    fn render_account(&mut self, frame: &mut Frame, area: Rect, session: &Session) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(session.addresses.len() as u16 + 2),
                Constraint::Length(session.payment_methods.len() as u16 + 2),
                Constraint::Min(3),
            ])
            .split(area);

        let default_badge = |is_default: bool| {
            if is_default {
                Span::styled(" Default", Style::default().fg(Color::Green))
            } else {
                Span::raw("")
            }
        };

        let addresses: Vec<ListItem> = session
            .addresses
            .iter()
            .map(|a| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{}: ", a.label),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(a.address.clone()),
                    default_badge(a.is_default),
                ]))
            })
            .collect();
        frame.render_widget(
            List::new(addresses).block(
                Block::default()
                    .title(" Saved Addresses ")
                    .borders(Borders::ALL)
                    .border_style(border_style(false)),
            ),
            chunks[0],
        );

        let payments: Vec<ListItem> = session
            .payment_methods
            .iter()
            .map(|p| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{}  exp {}", p.masked(), p.expiry)),
                    default_badge(p.is_default),
                ]))
            })
            .collect();
        frame.render_widget(
            List::new(payments).block(
                Block::default()
                    .title(" Payment Methods ")
                    .borders(Borders::ALL)
                    .border_style(border_style(false)),
            ),
            chunks[1],
        );

        let orders: Vec<ListItem> = session
            .order_history
            .iter()
            .map(|o| {
                let color = match o.status {
                    PastOrderStatus::Delivered => Color::Green,
                    PastOrderStatus::Cancelled => Color::Red,
                    PastOrderStatus::InProgress => Color::Yellow,
                };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            format!("#{}", o.id),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(format!("  {}  {}  ", o.date, format_price(o.total))),
                        Span::styled(o.status.label(), Style::default().fg(color)),
                    ]),
                    Line::from(Span::styled(
                        format!("   {} item(s)", o.items),
                        Style::default().fg(Color::Gray),
                    )),
                ])
            })
            .collect();

        self.history_state.select(self.focused_order());
        let list = List::new(orders)
            .block(
                Block::default()
                    .title(" Order History ")
                    .borders(Borders::ALL)
                    .border_style(border_style(self.focused_order().is_some())),
            )
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[2], &mut self.history_state);
    }
}

impl Page for ProfilePage {
    fn title(&self, _session: &Session) -> String {
        "My Profile".to_string()
    }

    fn context(&self) -> ShortcutContext {
        if self.editing {
            ShortcutContext::Editing
        } else {
            ShortcutContext::Profile
        }
    }

    fn captures_input(&self) -> bool {
        self.editing
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        session: &mut Session,
        _now: Instant,
    ) -> Vec<PageAction> {
        if self.editing {
            match key {
                KeyCode::Enter | KeyCode::Esc => self.editing = false,
                other => {
                    if let Some((_, input)) = self.inputs.get_mut(self.focus) {
                        input.handle_key(other);
                    }
                }
            }
            return Vec::new();
        }

        let count = self.focus_count(session);
        match key {
            KeyCode::Char('j') | KeyCode::Down => {
                self.focus = select_next(Some(self.focus), count).unwrap_or(0);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.focus = select_prev(Some(self.focus), count).unwrap_or(0);
            }
            KeyCode::Enter => match self.focused_order() {
                Some(i) => {
                    if let Some(order) = session.order_history.get(i) {
                        return vec![PageAction::Navigate(Route::Tracking(order.id.clone()))];
                    }
                }
                None => self.editing = true,
            },
            KeyCode::Char('s') => return self.save(session),
            KeyCode::Char('L') => {
                tracing::info!("User logged out");
                self.load(&session.profile);
                self.focus = 0;
                return vec![
                    PageAction::Notify(Toast::info(
                        "Logged Out",
                        "You have been successfully logged out.",
                    )),
                    PageAction::Navigate(Route::Home),
                ];
            }
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, session: &Session) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);
        self.render_form(frame, chunks[0], session);
        self.render_account(frame, chunks[1], session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::pages::test_support::{contains, draw, session};

    fn press(page: &mut ProfilePage, session: &mut Session, keys: &[KeyCode]) -> Vec<PageAction> {
        keys.iter()
            .flat_map(|k| page.handle_key(*k, session, Instant::now()))
            .collect()
    }

    fn retype(text: &str) -> Vec<KeyCode> {
        let mut keys = vec![KeyCode::Enter];
        keys.extend([KeyCode::Backspace; 40]);
        keys.extend(text.chars().map(KeyCode::Char));
        keys.push(KeyCode::Enter);
        keys
    }

    #[test]
    fn test_save_valid_changes() {
        let mut session = session();
        let mut page = ProfilePage::new(&session);
        press(&mut page, &mut session, &retype("Jane Roe"));
        let actions = press(&mut page, &mut session, &[KeyCode::Char('s')]);
        assert!(matches!(&actions[..], [PageAction::Notify(t)] if t.title == "Profile Updated"));
        assert_eq!(session.profile.name, "Jane Roe");
        assert_eq!(session.profile.initials(), "JR");
    }

    #[test]
    fn test_invalid_input_reports_field_errors() {
        let mut session = session();
        let mut page = ProfilePage::new(&session);
        press(&mut page, &mut session, &retype("J"));
        press(&mut page, &mut session, &[KeyCode::Down]);
        press(&mut page, &mut session, &retype("not-an-email"));
        assert!(press(&mut page, &mut session, &[KeyCode::Char('s')]).is_empty());
        assert_eq!(
            page.errors(),
            &[ProfileError::NameTooShort, ProfileError::InvalidEmail]
        );
        assert_eq!(session.profile, ProfileForm::default());

        let rows = draw(&mut page, &session, 120, 30);
        assert!(contains(&rows, "Name must be at least 2 characters."));
        assert!(contains(&rows, "Invalid email address."));
    }

    #[test]
    fn test_enter_on_history_opens_tracking() {
        let mut session = session();
        let mut page = ProfilePage::new(&session);
        let actions = press(
            &mut page,
            &mut session,
            &[KeyCode::Down, KeyCode::Down, KeyCode::Down, KeyCode::Enter],
        );
        assert_eq!(
            actions,
            vec![PageAction::Navigate(Route::Tracking("order123".to_string()))]
        );
    }

    #[test]
    fn test_focus_wraps_from_first_field_to_last_order() {
        let mut session = session();
        let mut page = ProfilePage::new(&session);
        press(&mut page, &mut session, &[KeyCode::Up]);
        assert_eq!(page.focused_order(), Some(session.order_history.len() - 1));
    }

    #[test]
    fn test_logout_discards_draft() {
        let mut session = session();
        let mut page = ProfilePage::new(&session);
        press(&mut page, &mut session, &retype("Someone Else"));
        let actions = press(&mut page, &mut session, &[KeyCode::Char('L')]);
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[1], PageAction::Navigate(Route::Home));
        assert_eq!(page.draft().name, "John Doe");
    }

    #[test]
    fn test_render_account_sections() {
        let session = session();
        let mut page = ProfilePage::new(&session);
        let rows = draw(&mut page, &session, 140, 30);
        assert!(contains(&rows, "JD"));
        assert!(contains(&rows, "Saved Addresses"));
        assert!(contains(&rows, "Default"));
        assert!(contains(&rows, "#order789"));
        assert!(contains(&rows, "Cancelled"));
    }
}
