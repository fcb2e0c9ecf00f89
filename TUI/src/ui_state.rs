#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Screen {
    #[default]
    Home,
    Cartela,
    Sorteador,
}

/// What the "Tem certeza?" dialog will do on Sim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Back,
    NewCard,
    ClearNumbers,
}

#[derive(Debug, Default)]
pub struct UIState {
    pub screen: Screen,

    // Home menu highlight
    pub menu_selection: usize,

    // Highlighted cell on the card (row-major, 0..25)
    pub card_cursor: usize,

    // Open confirm dialog, and whether "Sim" is the highlighted button
    pub confirm: Option<ConfirmAction>,
    pub confirm_yes_selected: bool,

    pub status_message: Option<String>,
    pub status_since_tick: u64,
}

impl UIState {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            ..Self::default()
        }
    }

    pub fn open_confirm(&mut self, action: ConfirmAction) {
        self.confirm = Some(action);
        self.confirm_yes_selected = false;
    }

    pub fn close_confirm(&mut self) -> Option<ConfirmAction> {
        self.confirm_yes_selected = false;
        self.confirm.take()
    }
}
