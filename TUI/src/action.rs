use crate::ui_state::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// User actions that can be triggered by keys or mouse events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit application
    Quit,
    /// Go straight to a screen
    Open(Screen),
    /// Move the home menu highlight
    MenuUp,
    MenuDown,
    /// Open the highlighted menu entry
    MenuSelect,
    /// "← Voltar"
    Back,
    /// "Nova cartela"
    NewCard,
    /// Move the card cursor
    MoveCursor(Direction),
    /// Mark/unmark the cell under the cursor
    ToggleMark,
    /// Mark/unmark a specific cell (mouse)
    MarkCell(usize),
    /// "Sortear"
    Draw,
    /// "Limpar números"
    ClearNumbers,
    /// Copy the drawn sequence to the clipboard
    CopyDrawn,
    /// Confirm dialog: "Sim"
    ConfirmYes,
    /// Confirm dialog: "Não"
    ConfirmNo,
    /// Confirm dialog: switch highlighted button
    ConfirmToggle,
    /// Confirm dialog: press highlighted button
    ConfirmAccept,
}
