use std::time::{Duration, Instant};

use arboard::Clipboard;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::action::{Action, Direction};
use crate::card::{Card, CELL_COUNT, GRID_SIZE};
use crate::config::{Config, MENU};
use crate::scheduler::{TimerQueue, TimerToken};
use crate::session::DrawSession;
use crate::ui_state::{ConfirmAction, Screen, UIState};

pub struct App {
    pub config: Config,
    pub ui: UIState,
    pub card: Card,
    // Only alive while the Sorteador screen is open
    pub session: Option<DrawSession<ChaCha8Rng>>,
    pub timers: TimerQueue,
    pub animation_frame: usize,
    pub animation_tick: u64,
    pub should_quit: bool,
    rng: ChaCha8Rng,
    started: Instant,
}

impl App {
    pub fn new(config: Config, screen: Screen) -> Self {
        let mut rng = match config.seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };
        let card = Card::generate(&mut rng);

        let mut app = Self {
            config,
            ui: UIState::new(Screen::Home),
            card,
            session: None,
            timers: TimerQueue::new(),
            animation_frame: 0,
            animation_tick: 0,
            should_quit: false,
            rng,
            started: Instant::now(),
        };
        app.navigate(screen);
        app
    }

    pub fn tick(&mut self) {
        self.animation_tick += 1;
        self.animation_frame = (self.animation_frame + 1) % self.config.animation_frame_mod.max(1);

        self.timers.advance_to(self.started.elapsed());
        while let Some(token) = self.timers.pop_due() {
            self.dispatch_timer(token);
        }

        if self.ui.status_message.is_some()
            && self.animation_tick - self.ui.status_since_tick >= self.config.status_timeout_ticks
        {
            self.ui.status_message = None;
        }
    }

    /// Time until the next reveal timer is due, if any.
    pub fn next_timer_in(&self) -> Option<Duration> {
        self.timers
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(self.started.elapsed()))
    }

    pub fn dispatch_timer(&mut self, token: TimerToken) {
        let handled = match self.session.as_mut() {
            Some(session) => session.on_timer(token, &mut self.timers),
            None => false,
        };
        if !handled {
            tracing::debug!(?token, "dropped stray timer");
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.ui.status_message = Some(message.into());
        self.ui.status_since_tick = self.animation_tick;
    }

    pub fn is_animating(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_animating())
    }

    fn has_drawn(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.drawn().is_empty())
    }

    pub fn apply(&mut self, action: Action) {
        if self.ui.confirm.is_some() {
            self.apply_confirm(action);
            return;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::Open(screen) => self.navigate(screen),
            Action::MenuUp => {
                self.ui.menu_selection = self.ui.menu_selection.checked_sub(1).unwrap_or(MENU.len() - 1);
            }
            Action::MenuDown => {
                self.ui.menu_selection = (self.ui.menu_selection + 1) % MENU.len();
            }
            Action::MenuSelect => {
                let screen = if self.ui.menu_selection == 0 {
                    Screen::Cartela
                } else {
                    Screen::Sorteador
                };
                self.navigate(screen);
            }
            Action::Back => self.back(),
            Action::NewCard => {
                if self.card.has_marks() {
                    self.ui.open_confirm(ConfirmAction::NewCard);
                } else {
                    self.new_card();
                }
            }
            Action::MoveCursor(direction) => self.move_cursor(direction),
            Action::ToggleMark => {
                self.card.toggle_mark(self.ui.card_cursor);
            }
            Action::MarkCell(index) => {
                if index < CELL_COUNT {
                    self.ui.card_cursor = index;
                    self.card.toggle_mark(index);
                }
            }
            Action::Draw => {
                // Start the reveal from the current time, not the last tick
                self.timers.advance_to(self.started.elapsed());
                if let Some(session) = self.session.as_mut() {
                    session.draw_next(&mut self.timers);
                }
            }
            Action::ClearNumbers => {
                if !self.is_animating() && self.has_drawn() {
                    self.ui.open_confirm(ConfirmAction::ClearNumbers);
                }
            }
            Action::CopyDrawn => self.copy_drawn(),
            Action::ConfirmYes | Action::ConfirmNo | Action::ConfirmToggle | Action::ConfirmAccept => {}
        }
    }

    fn apply_confirm(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ConfirmToggle => self.ui.confirm_yes_selected = !self.ui.confirm_yes_selected,
            Action::ConfirmAccept if self.ui.confirm_yes_selected => self.confirm(),
            Action::ConfirmYes => self.confirm(),
            Action::ConfirmAccept | Action::ConfirmNo => {
                self.ui.close_confirm();
            }
            _ => {}
        }
    }

    fn confirm(&mut self) {
        let Some(action) = self.ui.close_confirm() else {
            return;
        };
        if let Some(session) = self.session.as_mut() {
            session.cancel_reveal(&mut self.timers);
        }
        match action {
            ConfirmAction::Back => self.navigate(Screen::Home),
            ConfirmAction::NewCard => self.new_card(),
            ConfirmAction::ClearNumbers => {
                if let Some(session) = self.session.as_mut() {
                    session.clear(&mut self.timers);
                }
            }
        }
    }

    fn back(&mut self) {
        match self.ui.screen {
            Screen::Home => self.should_quit = true,
            Screen::Cartela => {
                if self.card.has_marks() {
                    self.ui.open_confirm(ConfirmAction::Back);
                } else {
                    self.navigate(Screen::Home);
                }
            }
            Screen::Sorteador => {
                if self.is_animating() {
                    return;
                }
                if self.has_drawn() {
                    self.ui.open_confirm(ConfirmAction::Back);
                } else {
                    self.navigate(Screen::Home);
                }
            }
        }
    }

    /// Switch screens. Entering a screen starts it fresh; leaving the
    /// Sorteador throws its session away.
    pub fn navigate(&mut self, screen: Screen) {
        if let Some(mut session) = self.session.take() {
            session.cancel_reveal(&mut self.timers);
        }
        match screen {
            Screen::Home => {}
            Screen::Cartela => self.new_card(),
            Screen::Sorteador => {
                let rng = ChaCha8Rng::from_rng(&mut self.rng);
                self.session = Some(DrawSession::new(self.config.reveal, rng));
            }
        }
        tracing::info!(?screen, "screen changed");
        self.ui.screen = screen;
    }

    fn new_card(&mut self) {
        self.card = Card::generate(&mut self.rng);
        self.ui.card_cursor = 0;
        tracing::debug!("new card dealt");
    }

    fn move_cursor(&mut self, direction: Direction) {
        let row = self.ui.card_cursor / GRID_SIZE;
        let col = self.ui.card_cursor % GRID_SIZE;
        let (row, col) = match direction {
            Direction::Up => (row.saturating_sub(1), col),
            Direction::Down => ((row + 1).min(GRID_SIZE - 1), col),
            Direction::Left => (row, col.saturating_sub(1)),
            Direction::Right => (row, (col + 1).min(GRID_SIZE - 1)),
        };
        self.ui.card_cursor = row * GRID_SIZE + col;
    }

    fn copy_drawn(&mut self) {
        let text = match self.session.as_ref() {
            Some(session) if !session.drawn().is_empty() => session.export_text(),
            _ => {
                self.set_status("Nenhum número sorteado ainda");
                return;
            }
        };

        let result = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
        match result {
            Ok(()) => self.set_status("Números copiados"),
            Err(e) => {
                tracing::warn!("clipboard unavailable: {}", e);
                self.set_status(format!("Clipboard error: {}", e));
            }
        }
    }
}
