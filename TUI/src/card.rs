//! Bingo card ("cartela"): 24 random numbers around a free center.

use std::collections::BTreeSet;

use rand::Rng;

use crate::pool::BALL_COUNT;

pub const COLUMNS: [&str; 5] = ["B", "I", "N", "G", "O"];
pub const GRID_SIZE: usize = 5;
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;
pub const CENTER: usize = CELL_COUNT / 2;

const NUMBERS_PER_CARD: usize = CELL_COUNT - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Number(u8),
    Free,
}

#[derive(Debug, Clone)]
pub struct Card {
    cells: [Cell; CELL_COUNT],
    marked: BTreeSet<usize>,
}

impl Card {
    /// Deal a fresh card. Numbers are sorted ascending, row by row.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let mut numbers = BTreeSet::new();
        while numbers.len() < NUMBERS_PER_CARD {
            numbers.insert(rng.random_range(1..=BALL_COUNT));
        }

        let mut cells = [Cell::Free; CELL_COUNT];
        let slots = (0..CELL_COUNT).filter(|&i| i != CENTER);
        for (slot, n) in slots.zip(numbers) {
            cells[slot] = Cell::Number(n);
        }

        Self {
            cells,
            marked: BTreeSet::new(),
        }
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Flip the mark on a numbered cell. Returns false for the free center
    /// or an index off the card.
    pub fn toggle_mark(&mut self, index: usize) -> bool {
        match self.cell(index) {
            Some(Cell::Number(_)) => {
                if !self.marked.remove(&index) {
                    self.marked.insert(index);
                }
                true
            }
            _ => false,
        }
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.contains(&index)
    }

    pub fn marked_count(&self) -> usize {
        self.marked.len()
    }

    pub fn has_marks(&self) -> bool {
        !self.marked.is_empty()
    }

    pub fn status_line(&self) -> String {
        match self.marked_count() {
            0 => "Toque em um número para marcá-lo".to_string(),
            1 => "1 número marcado".to_string(),
            n => format!("{} números marcados", n),
        }
    }
}
