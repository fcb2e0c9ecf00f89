use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::action::{Action, Direction};
use crate::ui_state::{Screen, UIState};

pub struct KeyMap;

impl KeyMap {
    /// Translate a key press into an action for the current screen.
    /// An open confirm dialog captures every key except Ctrl+C.
    pub fn map(ui: &UIState, key: KeyEvent) -> Option<Action> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Action::Quit);
        }

        if ui.confirm.is_some() {
            return match key.code {
                KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('y') => Some(Action::ConfirmYes),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::ConfirmNo),
                KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
                    Some(Action::ConfirmToggle)
                }
                KeyCode::Enter | KeyCode::Char(' ') => Some(Action::ConfirmAccept),
                _ => None,
            };
        }

        match ui.screen {
            Screen::Home => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Up | KeyCode::Char('k') => Some(Action::MenuUp),
                KeyCode::Down | KeyCode::Char('j') => Some(Action::MenuDown),
                KeyCode::Enter | KeyCode::Char(' ') => Some(Action::MenuSelect),
                KeyCode::Char('1') | KeyCode::Char('c') => Some(Action::Open(Screen::Cartela)),
                KeyCode::Char('2') | KeyCode::Char('s') => Some(Action::Open(Screen::Sorteador)),
                _ => None,
            },
            Screen::Cartela => match key.code {
                KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
                KeyCode::Char('n') => Some(Action::NewCard),
                KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveCursor(Direction::Up)),
                KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveCursor(Direction::Down)),
                KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveCursor(Direction::Left)),
                KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveCursor(Direction::Right)),
                KeyCode::Enter | KeyCode::Char(' ') => Some(Action::ToggleMark),
                _ => None,
            },
            Screen::Sorteador => match key.code {
                KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('s') => Some(Action::Draw),
                KeyCode::Char('c') => Some(Action::ClearNumbers),
                KeyCode::Char('y') => Some(Action::CopyDrawn),
                _ => None,
            },
        }
    }
}
