use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph},
    Frame,
};

use crate::app::App;
use crate::card::{Cell, CELL_COUNT, CENTER, COLUMNS, GRID_SIZE};
use crate::config::MENU;
use crate::pool::BALL_COUNT;
use crate::reveal::AnimationState;
use crate::session::{history_fade, DrawSession};
use crate::ui_state::Screen;

// Copper Sapphire Morning color palette
const BG_DARK: Color = Color::Rgb(12, 12, 16);           // Deep background
const BG_PANEL: Color = Color::Rgb(18, 18, 24);          // Slightly lighter for panels

// Sapphire blues
const SAPPHIRE: Color = Color::Rgb(101, 150, 243);       // #6596F3 - Primary accent
const SAPPHIRE_DARK: Color = Color::Rgb(84, 112, 156);   // #54709C - Darker blue
const CYAN_LIGHT: Color = Color::Rgb(178, 220, 226);     // #B2DCE2 - Light cyan

// Copper/warm tones
const COPPER: Color = Color::Rgb(138, 72, 38);           // #8A4826 - Copper
const PALE_YELLOW: Color = Color::Rgb(234, 208, 148);    // #EAD094 - Pale yellow

// Accent colors
const OLIVE: Color = Color::Rgb(131, 179, 102);          // #83B366 - Success/green

// Text colors
const TEXT_PRIMARY: Color = Color::Rgb(240, 240, 245);   // Near white
const TEXT_SECONDARY: Color = Color::Rgb(180, 180, 190); // Light gray
const TEXT_MUTED: Color = Color::Rgb(105, 116, 133);     // #697485 - Medium gray

// Border colors (subtle)
const BORDER_DIM: Color = Color::Rgb(45, 50, 60);        // Dim border
const BORDER_ACCENT: Color = Color::Rgb(70, 85, 110);    // Accent border

// Card geometry, in terminal cells
const CARD_CELL_W: u16 = 7;
const CARD_CELL_H: u16 = 3;
const CARD_PANEL_W: u16 = CARD_CELL_W * GRID_SIZE as u16 + 2;
const CARD_PANEL_H: u16 = 2 + 3 + 1 + CARD_CELL_H * GRID_SIZE as u16;

// Draw board geometry: 10 columns x 9 rows
const BOARD_COLS: u16 = 10;
const BOARD_CELL_W: u16 = 5;
const BOARD_W: u16 = BOARD_COLS * BOARD_CELL_W + 2;

// 3x5 block digits for the big display
const DIGITS: [[&str; 5]; 10] = [
    ["███", "█ █", "█ █", "█ █", "███"],
    [" █ ", "██ ", " █ ", " █ ", "███"],
    ["███", "  █", "███", "█  ", "███"],
    ["███", "  █", "███", "  █", "███"],
    ["█ █", "█ █", "███", "  █", "  █"],
    ["███", "█  ", "███", "  █", "███"],
    ["███", "█  ", "███", "█ █", "███"],
    ["███", "  █", "  █", "  █", "  █"],
    ["███", "█ █", "███", "█ █", "███"],
    ["███", "█ █", "███", "  █", "███"],
];
const DASH: [&str; 5] = ["   ", "   ", "███", "   ", "   "];

/// Rows of the big display for `n`, or a dash while nothing is shown yet.
fn big_number(n: Option<u8>) -> Vec<String> {
    let glyphs: Vec<[&str; 5]> = match n {
        Some(n) => n
            .to_string()
            .bytes()
            .map(|b| DIGITS[(b - b'0') as usize])
            .collect(),
        None => vec![DASH],
    };
    (0..5)
        .map(|row| glyphs.iter().map(|g| g[row]).collect::<Vec<_>>().join(" "))
        .collect()
}

/// Blend toward the background; `opacity` 1.0 keeps `color`.
fn fade(color: Color, opacity: f64) -> Color {
    let (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) = (color, BG_DARK) else {
        return color;
    };
    let mix = |c: u8, base: u8| (base as f64 + (c as f64 - base as f64) * opacity) as u8;
    Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn row_of(area: Rect, offset: u16, height: u16) -> Rect {
    Rect {
        x: area.x,
        y: area.y + offset,
        width: area.width,
        height,
    }
    .intersection(area)
}

/// Header, card panel and status line of the Cartela screen.
fn cartela_areas(area: Rect) -> (Rect, Rect, Rect) {
    let outer = centered(area, CARD_PANEL_W, CARD_PANEL_H + 4);
    (
        row_of(outer, 0, 1),
        row_of(outer, 2, CARD_PANEL_H),
        row_of(outer, CARD_PANEL_H + 3, 1),
    )
}

fn card_grid(area: Rect) -> Rect {
    let (_, panel, _) = cartela_areas(area);
    Rect {
        x: panel.x + 1,
        y: panel.y + 1 + 3 + 1,
        width: CARD_CELL_W * GRID_SIZE as u16,
        height: CARD_CELL_H * GRID_SIZE as u16,
    }
    .intersection(area)
}

/// Card cell under a screen position, for mouse clicks on the Cartela.
pub fn card_cell_at(area: Rect, column: u16, row: u16) -> Option<usize> {
    let grid = card_grid(area);
    if column < grid.x || row < grid.y || column >= grid.x + grid.width || row >= grid.y + grid.height {
        return None;
    }
    let col = ((column - grid.x) / CARD_CELL_W) as usize;
    let line = ((row - grid.y) / CARD_CELL_H) as usize;
    let index = line * GRID_SIZE + col;
    (index < CELL_COUNT).then_some(index)
}

pub fn draw(frame: &mut Frame, app: &App) {
    // Fill entire background
    let bg = Block::default().style(Style::default().bg(BG_DARK));
    frame.render_widget(bg, frame.area());

    match app.ui.screen {
        Screen::Home => draw_home(frame, app),
        Screen::Cartela => draw_cartela(frame, app),
        Screen::Sorteador => {
            if let Some(session) = app.session.as_ref() {
                draw_sorteador(frame, app, session);
            }
        }
    }

    if app.ui.confirm.is_some() {
        draw_confirm_popup(frame, app);
    }

    draw_status(frame, app);
}

fn draw_home(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Subtle background pattern
    draw_background_pattern(frame, area, app.animation_frame);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Length(10),                  // Logo container
            Constraint::Length(1),                   // Gap
            Constraint::Length(MENU.len() as u16 * 2), // Menu
            Constraint::Length(2),                   // Hint
            Constraint::Min(0),
        ])
        .split(area);

    let logo_area = centered(v_chunks[1], 50, v_chunks[1].height);
    draw_glass_border(frame, logo_area, "", app.animation_frame, true);

    let inner = Rect {
        x: logo_area.x + 2,
        y: logo_area.y + 1,
        width: logo_area.width.saturating_sub(4),
        height: logo_area.height.saturating_sub(2),
    };
    draw_animated_logo(frame, inner, app.animation_frame);

    let mut lines: Vec<Line> = Vec::new();
    for (i, (name, desc)) in MENU.iter().enumerate() {
        let selected = app.ui.menu_selection == i;
        let style = if selected {
            Style::default().fg(CYAN_LIGHT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_SECONDARY)
        };
        let indicator = if selected { ">" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(format!("{} {}. {:<10}", indicator, i + 1, name), style),
            Span::styled(format!("- {}", desc), Style::default().fg(TEXT_MUTED)),
        ]));
        lines.push(Line::from(""));
    }
    let menu_area = centered(v_chunks[3], 48, v_chunks[3].height);
    frame.render_widget(Paragraph::new(lines), menu_area);

    // Hint with copper glow
    let glow = (app.animation_frame as f64 / 45.0).sin().abs() * 0.5 + 0.5;
    let r = (138.0 + (216.0 - 138.0) * glow) as u8;
    let g = (72.0 + (180.0 - 72.0) * glow) as u8;
    let b = (38.0 + (169.0 - 38.0) * glow) as u8;
    let hint = Paragraph::new("[ Enter para abrir  -  q para sair ]")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Rgb(r, g, b)));
    frame.render_widget(hint, v_chunks[4]);
}

fn draw_background_pattern(frame: &mut Frame, area: Rect, anim_frame: usize) {
    let pattern_offset = (anim_frame / 30) % 4;

    // Simple twinkling starfield background
    let mut lines: Vec<Line> = Vec::new();

    for y in 0..area.height as usize {
        let mut spans: Vec<Span> = Vec::new();
        for x in 0..area.width as usize {
            let show_star = ((x + pattern_offset) % 12 == 0) && ((y + pattern_offset) % 6 == 0);
            if show_star {
                let brightness = 25 + ((anim_frame as f64 / 60.0 + (x as f64 / 12.0)).sin().abs() * 15.0) as u8;
                let color = Color::Rgb(brightness, brightness + 2, brightness + 5);
                spans.push(Span::styled(".", Style::default().fg(color)));
            } else {
                spans.push(Span::raw(" "));
            }
        }
        lines.push(Line::from(spans));
    }

    let pattern = Paragraph::new(lines).style(Style::default().bg(BG_DARK));
    frame.render_widget(pattern, area);
}

/// Rounded border that pulses between sapphire and copper while `glow` is set.
/// Returns the area inside the border.
fn draw_glass_border(frame: &mut Frame, area: Rect, title: &str, anim_frame: usize, glow: bool) -> Rect {
    let border_color = if glow {
        let t = (anim_frame as f64 / 120.0).sin() * 0.5 + 0.5;
        let r = (84.0 + (138.0 - 84.0) * t) as u8;
        let g = (112.0 + (72.0 - 112.0) * t) as u8;
        let b = (156.0 + (38.0 - 156.0) * t) as u8;
        Color::Rgb(r, g, b)
    } else {
        BORDER_DIM
    };

    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(SAPPHIRE).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);

    frame.render_widget(block, area);
    inner
}

fn draw_animated_logo(frame: &mut Frame, area: Rect, anim_frame: usize) {
    let logo_lines = [
        "",
        "██████╗ ██╗███╗   ██╗ ██████╗  ██████╗ ",
        "██╔══██╗██║████╗  ██║██╔════╝ ██╔═══██╗",
        "██████╔╝██║██╔██╗ ██║██║  ███╗██║   ██║",
        "██╔══██╗██║██║╚██╗██║██║   ██║██║   ██║",
        "██████╔╝██║██║ ╚████║╚██████╔╝╚██████╔╝",
        "╚═════╝ ╚═╝╚═╝  ╚═══╝ ╚═════╝  ╚═════╝ ",
        "",
    ];

    let mut lines: Vec<Line> = Vec::new();

    for (line_idx, logo_line) in logo_lines.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();

        for (char_idx, ch) in logo_line.chars().enumerate() {
            // Wave effect from sapphire toward pale yellow
            let wave_offset = (anim_frame as f64 / 25.0) + (char_idx as f64 / 6.0) - (line_idx as f64 / 2.0);
            let t = wave_offset.sin() * 0.5 + 0.5;
            let (r, g, b) = (
                (101.0 + (234.0 - 101.0) * t) as u8,
                (150.0 + (208.0 - 150.0) * t) as u8,
                (243.0 + (148.0 - 243.0) * t) as u8,
            );

            spans.push(Span::styled(
                ch.to_string(),
                Style::default().fg(Color::Rgb(r, g, b)),
            ));
        }

        lines.push(Line::from(spans));
    }

    let logo = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(logo, area);
}

/// "← Voltar" on the left, the screen's other action on the right.
fn draw_header(frame: &mut Frame, area: Rect, back_enabled: bool, action: &str, action_enabled: bool) {
    let back_color = if back_enabled { TEXT_SECONDARY } else { BORDER_DIM };
    let action_color = if action_enabled { SAPPHIRE } else { BORDER_DIM };

    let back = Paragraph::new(Line::from(vec![
        Span::styled("← Voltar ", Style::default().fg(back_color)),
        Span::styled("(Esc)", Style::default().fg(TEXT_MUTED)),
    ]));
    let action = Paragraph::new(Span::styled(
        action.to_string(),
        Style::default().fg(action_color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Right);

    frame.render_widget(back, area);
    frame.render_widget(action, area);
}

fn draw_cartela(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (header, panel, status) = cartela_areas(area);

    draw_header(frame, header, true, "Nova cartela (n)", true);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_ACCENT))
        .style(Style::default().bg(BG_PANEL));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    // Title band
    let title = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "B  I  N  G  O",
            Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ])
    .alignment(Alignment::Center)
    .style(Style::default().bg(SAPPHIRE_DARK));
    frame.render_widget(title, row_of(inner, 0, 3));

    // Column letters
    let letters: Vec<Span> = COLUMNS
        .iter()
        .map(|c| {
            Span::styled(
                format!("{:^width$}", c, width = CARD_CELL_W as usize),
                Style::default().fg(SAPPHIRE).add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(letters)), row_of(inner, 3, 1));

    let grid = card_grid(area);
    for (index, cell) in app.card.cells().iter().enumerate() {
        let row = (index / GRID_SIZE) as u16;
        let col = (index % GRID_SIZE) as u16;
        let cell_area = Rect {
            x: grid.x + col * CARD_CELL_W,
            y: grid.y + row * CARD_CELL_H,
            width: CARD_CELL_W,
            height: CARD_CELL_H,
        }
        .intersection(grid);

        let is_cursor = app.ui.card_cursor == index && app.ui.confirm.is_none();
        let (text, style) = match cell {
            Cell::Number(n) if app.card.is_marked(index) => (
                n.to_string(),
                Style::default().fg(TEXT_PRIMARY).bg(SAPPHIRE).add_modifier(Modifier::BOLD),
            ),
            Cell::Number(n) => (n.to_string(), Style::default().fg(TEXT_PRIMARY)),
            Cell::Free => ("★".to_string(), Style::default().fg(SAPPHIRE).add_modifier(Modifier::BOLD)),
        };
        let text = if is_cursor { format!("[{:^4}]", text) } else { text };
        let style = if is_cursor && index != CENTER {
            style.fg(PALE_YELLOW)
        } else {
            style
        };

        let cell = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(text, style))])
            .alignment(Alignment::Center);
        frame.render_widget(cell, cell_area);
    }

    let status_line = Paragraph::new(app.card.status_line())
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_MUTED));
    frame.render_widget(status_line, status);
}

fn draw_sorteador(frame: &mut Frame, app: &App, session: &DrawSession<rand_chacha::ChaCha8Rng>) {
    let area = frame.area();
    let animating = session.is_animating();
    let outer = centered(area, BOARD_W, 1 + 1 + 7 + 1 + 11 + 1 + 1);

    let header = row_of(outer, 0, 1);
    let strip = row_of(outer, 2, 7);
    let board = row_of(outer, 10, 11);
    let hints = row_of(outer, 22, 1);

    draw_header(frame, header, !animating, "Limpar números (c)", !animating && !session.drawn().is_empty());
    draw_draw_strip(frame, app, session, strip);
    draw_reveal_progress(frame, app, session, row_of(outer, 9, 1));
    draw_board(frame, session, board);

    let hint = Line::from(vec![
        Span::styled("Espaço", Style::default().fg(SAPPHIRE).add_modifier(Modifier::BOLD)),
        Span::styled(" sortear  ", Style::default().fg(TEXT_MUTED)),
        Span::styled("y", Style::default().fg(COPPER).add_modifier(Modifier::BOLD)),
        Span::styled(" copiar  ", Style::default().fg(TEXT_MUTED)),
        Span::styled(
            format!("{}/{}", session.drawn().len(), BALL_COUNT),
            Style::default().fg(TEXT_SECONDARY),
        ),
    ]);
    frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), hints);
}

fn draw_draw_strip(frame: &mut Frame, app: &App, session: &DrawSession<rand_chacha::ChaCha8Rng>, area: Rect) {
    let animating = session.is_animating();

    frame.render_widget(Block::default().style(Style::default().bg(BG_PANEL)), area);
    let title = if animating { " Sorteando... " } else { " Sorteio " };
    let inner = draw_glass_border(frame, area, title, app.animation_frame, animating);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(9),  // Big number
            Constraint::Length(1),  // Gap
            Constraint::Min(10),    // History
            Constraint::Length(13), // Sortear button
        ])
        .split(inner);

    if session.drawn().is_empty() && !animating {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                " Nenhum número sorteado ainda",
                Style::default().fg(TEXT_MUTED),
            )),
        ]);
        let area = Rect {
            width: chunks[0].width + chunks[1].width + chunks[2].width,
            ..chunks[0]
        };
        frame.render_widget(empty, area);
    } else {
        let color = if animating { PALE_YELLOW } else { SAPPHIRE };
        let digits: Vec<Line> = big_number(session.display_number())
            .into_iter()
            .map(|row| Line::from(Span::styled(row, Style::default().fg(color).add_modifier(Modifier::BOLD))))
            .collect();
        frame.render_widget(Paragraph::new(digits).alignment(Alignment::Center), chunks[0]);

        let mut spans: Vec<Span> = Vec::new();
        for (i, n) in session.visible_history().iter().enumerate() {
            let (scale, opacity) = history_fade(i);
            let mut style = Style::default().fg(fade(TEXT_SECONDARY, opacity));
            if scale >= 1.0 {
                style = style.add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(format!("{} ", n), style));
        }
        if session.has_more_history() {
            spans.push(Span::styled("…", Style::default().fg(fade(TEXT_SECONDARY, 0.35))));
        }
        let history = Paragraph::new(vec![Line::from(""), Line::from(""), Line::from(spans)]);
        frame.render_widget(history, chunks[2]);
    }

    // Sortear button, dimmed while spinning or once the pool is empty
    let enabled = !animating && !session.is_exhausted();
    let button_style = if enabled {
        let glow = (app.animation_frame as f64 / 45.0).sin().abs() * 0.3 + 0.7;
        Style::default()
            .fg(TEXT_PRIMARY)
            .bg(fade(SAPPHIRE, glow))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_MUTED).bg(BORDER_DIM)
    };
    let label = if session.is_exhausted() { " Fim " } else { " Sortear " };
    let button = Paragraph::new(vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(label, button_style)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(button, chunks[3]);
}

fn draw_reveal_progress(frame: &mut Frame, app: &App, session: &DrawSession<rand_chacha::ChaCha8Rng>, area: Rect) {
    let AnimationState::Running { elapsed_ms, .. } = session.animation_state() else {
        return;
    };
    let duration = app.config.reveal.duration_ms.max(1) as f64;
    let gauge = Gauge::default()
        .ratio((elapsed_ms as f64 / duration).min(1.0))
        .gauge_style(Style::default().fg(COPPER).bg(BG_PANEL))
        .label("");
    frame.render_widget(gauge, area);
}

fn draw_board(frame: &mut Frame, session: &DrawSession<rand_chacha::ChaCha8Rng>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_DIM))
        .style(Style::default().bg(BG_PANEL));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let last = if session.is_animating() { None } else { session.last_drawn() };
    let mut lines: Vec<Line> = Vec::new();
    for row in 0..(BALL_COUNT as u16 / BOARD_COLS) {
        let mut spans: Vec<Span> = Vec::new();
        for col in 0..BOARD_COLS {
            let n = (row * BOARD_COLS + col + 1) as u8;
            let style = if last == Some(n) {
                Style::default().fg(BG_DARK).bg(OLIVE).add_modifier(Modifier::BOLD)
            } else if session.is_drawn(n) {
                Style::default().fg(TEXT_PRIMARY).bg(SAPPHIRE).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(TEXT_SECONDARY)
            };
            spans.push(Span::styled(format!(" {:>2} ", n), style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_confirm_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered(frame.area(), 38, 7);

    // Clear area behind popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COPPER))
        .style(Style::default().bg(BG_PANEL));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let button = |label: &str, selected: bool| {
        let style = if selected {
            Style::default().fg(TEXT_PRIMARY).bg(SAPPHIRE).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_SECONDARY).bg(BORDER_DIM)
        };
        Span::styled(format!("  {}  ", label), style)
    };

    let yes = app.ui.confirm_yes_selected;
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Tem certeza que quer prosseguir?",
            Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![button("Não (n)", !yes), Span::raw("   "), button("Sim (s)", yes)]),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(text, inner);
}

fn draw_status(frame: &mut Frame, app: &App) {
    let Some(message) = app.ui.status_message.as_deref() else {
        return;
    };
    let area = frame.area();
    let line = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: area.height.min(1),
    };
    let status = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(CYAN_LIGHT));
    frame.render_widget(status, line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_glass_border_titles_and_glows() {
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        let mut inner = Rect::default();
        terminal
            .draw(|frame| inner = draw_glass_border(frame, frame.area(), " Sorteio ", 0, true))
            .unwrap();

        assert_eq!(inner, Rect::new(1, 1, 18, 1));
        assert!(row_text(&terminal, 0).contains("Sorteio"));
        let glowing = terminal.backend().buffer()[(0, 1)].fg;
        assert_ne!(glowing, BORDER_DIM);

        terminal
            .draw(|frame| {
                draw_glass_border(frame, frame.area(), "", 0, false);
            })
            .unwrap();
        assert_eq!(terminal.backend().buffer()[(0, 1)].fg, BORDER_DIM);
    }

    #[test]
    fn test_big_number_rows() {
        let rows = big_number(Some(42));
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], "█ █ ███");
        assert_eq!(big_number(None)[2], "███");
        assert_eq!(big_number(Some(7))[4], "  █");
    }

    #[test]
    fn test_card_cell_at_maps_grid() {
        let area = Rect::new(0, 0, 80, 40);
        let grid = card_grid(area);

        assert_eq!(card_cell_at(area, grid.x, grid.y), Some(0));
        assert_eq!(card_cell_at(area, grid.x + CARD_CELL_W * 2 + 3, grid.y + CARD_CELL_H * 2 + 1), Some(CENTER));
        assert_eq!(
            card_cell_at(area, grid.x + grid.width - 1, grid.y + grid.height - 1),
            Some(CELL_COUNT - 1)
        );
        assert_eq!(card_cell_at(area, grid.x + grid.width, grid.y), None);
        assert_eq!(card_cell_at(area, 0, 0), None);
    }

    #[test]
    fn test_fade_blends_to_background() {
        assert_eq!(fade(TEXT_SECONDARY, 1.0), TEXT_SECONDARY);
        assert_eq!(fade(TEXT_SECONDARY, 0.0), BG_DARK);
    }
}
