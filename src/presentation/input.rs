use crate::application::{App, AppMode, Event, PromptEdit};
use super::layout::{hit, Regions};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// Translates terminal input into controller events for the current mode.
pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &App, key: KeyCode, modifiers: KeyModifiers) -> Option<Event> {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(key),
            AppMode::Picking => Self::handle_picking_mode(key, modifiers),
            AppMode::Alert => Self::handle_alert_mode(key),
            AppMode::Help => Self::handle_help_mode(key),
        }
    }

    /// Left clicks on the drop zone, recognize button or copy button.
    /// Only the main screen reacts to the mouse.
    pub fn handle_mouse_event(app: &App, mouse: MouseEvent, area: Rect) -> Option<Event> {
        if app.mode != AppMode::Normal {
            return None;
        }
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return None;
        }
        let regions = Regions::new(area);
        let (column, row) = (mouse.column, mouse.row);
        if hit(regions.drop_zone, column, row) {
            Some(Event::ActivateDropZone)
        } else if hit(regions.recognize_button, column, row) {
            Some(Event::Recognize)
        } else if app.result_visible && hit(regions.copy_button, column, row) {
            Some(Event::Copy)
        } else {
            None
        }
    }

    fn handle_normal_mode(key: KeyCode) -> Option<Event> {
        match key {
            KeyCode::Char('o') | KeyCode::Enter => Some(Event::ActivateDropZone),
            KeyCode::Char('r') => Some(Event::Recognize),
            KeyCode::Char('c') | KeyCode::Char('y') => Some(Event::Copy),
            KeyCode::Char('h') => Some(Event::CheckHealth),
            KeyCode::F(1) | KeyCode::Char('?') => Some(Event::ToggleHelp),
            // 'q' is handled by the main loop
            _ => None,
        }
    }

    fn handle_picking_mode(key: KeyCode, modifiers: KeyModifiers) -> Option<Event> {
        let edit = match key {
            KeyCode::Enter => return Some(Event::SubmitPrompt),
            KeyCode::Esc => return Some(Event::CancelPrompt),
            KeyCode::Backspace => PromptEdit::Backspace,
            KeyCode::Delete => PromptEdit::Delete,
            KeyCode::Left => PromptEdit::Left,
            KeyCode::Right => PromptEdit::Right,
            KeyCode::Home => PromptEdit::Home,
            KeyCode::End => PromptEdit::End,
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => PromptEdit::Insert(c),
            _ => return None,
        };
        Some(Event::Prompt(edit))
    }

    fn handle_alert_mode(key: KeyCode) -> Option<Event> {
        match key {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Event::DismissAlert),
            _ => None,
        }
    }

    fn handle_help_mode(key: KeyCode) -> Option<Event> {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                Some(Event::ToggleHelp)
            }
            KeyCode::Up | KeyCode::Char('k') => Some(Event::ScrollHelp(-1)),
            KeyCode::Down | KeyCode::Char('j') => Some(Event::ScrollHelp(1)),
            KeyCode::PageUp => Some(Event::ScrollHelp(-5)),
            KeyCode::PageDown => Some(Event::ScrollHelp(5)),
            KeyCode::Home => Some(Event::HelpTop),
            _ => None,
        }
    }
}
