use crate::application::{App, AppMode};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::NewCycle => Self::handle_new_cycle_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, _modifiers: KeyModifiers) {
        // Any key clears a stale status message before acting
        app.status_message = None;

        match key {
            KeyCode::Char('n') => {
                app.start_new_cycle_form();
            }
            KeyCode::Char('i') => {
                app.interrupt_active_cycle();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.scroll_history_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.scroll_history_down();
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_new_cycle_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                app.submit_new_cycle_form();
            }
            KeyCode::Esc => {
                app.cancel_new_cycle_form();
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                app.switch_form_field();
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    let position = app.cursor_position - 1;
                    app.focused_input_mut().remove(position);
                    app.cursor_position = position;
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.focused_input().len() {
                    let position = app.cursor_position;
                    app.focused_input_mut().remove(position);
                }
            }
            KeyCode::Left => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Right => {
                if app.cursor_position < app.focused_input().len() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.focused_input().len();
            }
            KeyCode::Char(c) => {
                let position = app.cursor_position;
                app.focused_input_mut().insert(position, c);
                app.cursor_position += 1;
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
