use crate::app::state::{App, InputMode};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_input(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    if handle_help_toggle(app, key.code) {
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_input(app, key.code),
        InputMode::EditingEndpoint => handle_editing_input(app, key.code),
    }
}

fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if key == KeyCode::F(1) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if matches!(key, KeyCode::Esc | KeyCode::Char('?')) {
            app.show_help = false;
        }
        return true;
    }

    false
}

fn handle_normal_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('e') => {
            app.start_editing();
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('c') => {
            app.status_message.clear();
            app.last_error = None;
        }
        _ => {}
    }
}

fn handle_editing_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter => {
            app.commit_endpoint();
        }
        KeyCode::Esc => {
            app.cancel_editing();
        }
        KeyCode::Backspace => {
            app.current_input.pop();
        }
        KeyCode::Char(c) => {
            app.current_input.push(c);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::handle_input;
    use crate::app::{App, InputMode};
    use crate::config::AppConfig;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    fn press(app: &mut App, code: KeyCode) {
        handle_input(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_and_enter_sets_endpoint() {
        let mut app = App::new(&AppConfig::default());
        type_text(&mut app, "192.168.1.50");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.session.endpoint(), Some("192.168.1.51"));
    }

    #[test]
    fn q_while_editing_is_text_not_quit() {
        let mut app = App::new(&AppConfig::default());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.current_input, "q");
    }

    #[test]
    fn escape_keeps_previous_endpoint() {
        let config = AppConfig {
            endpoint: Some("old-host".to_string()),
            ..AppConfig::default()
        };
        let mut app = App::new(&config);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.current_input, "old-host");
        type_text(&mut app, "-new");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.session.endpoint(), Some("old-host"));
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let config = AppConfig {
            endpoint: Some("host".to_string()),
            ..AppConfig::default()
        };
        let mut app = App::new(&config);
        press(&mut app, KeyCode::F(1));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let mut app = App::new(&AppConfig::default());
        handle_input(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(!app.running);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = App::new(&AppConfig::default());
        let mut key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_input(&mut app, key);
        assert!(app.current_input.is_empty());
    }
}
