//! # Grid Model
//!
//! The passive substrate every other system operates on: a fixed-size,
//! row-major array of cells with bounds-checked access.
//!
//! Reads never fail; they return `None` outside the grid so that neighbour
//! scans can treat the outside as solid rock. Writes go through the three
//! mutators below and report out-of-bounds coordinates as errors.

use crate::{Position, SweeperError, SweeperResult};
use serde::{Deserialize, Serialize};

/// Terrain classification of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    /// Solid rock, the initial state of every cell
    Wall,
    /// Open room interior
    Floor,
    /// Carved corridor cell
    Door,
    /// Room content the player should avoid
    Monster,
    /// Room content the player wants to find
    Treasure,
}

impl CellType {
    /// Whether this cell counts towards a neighbour's hint number.
    pub fn is_content(self) -> bool {
        matches!(self, CellType::Monster | CellType::Treasure)
    }

    /// Whether this cell is part of the open dungeon (anything but rock).
    pub fn is_open(self) -> bool {
        self != CellType::Wall
    }

    /// Gets the ASCII glyph used for text dumps of the board.
    pub fn glyph(self) -> char {
        match self {
            CellType::Wall => '#',
            CellType::Floor => '.',
            CellType::Door => '+',
            CellType::Monster => 'M',
            CellType::Treasure => 'T',
        }
    }

    /// Parses an ASCII glyph produced by [`CellType::glyph`].
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '#' => Some(CellType::Wall),
            '.' => Some(CellType::Floor),
            '+' => Some(CellType::Door),
            'M' => Some(CellType::Monster),
            'T' => Some(CellType::Treasure),
            _ => None,
        }
    }
}

/// Visibility of a cell to the player.
///
/// `Flagged` has no transition inside the core; it is reserved for a front
/// end that wants to let the player mark cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Revealed,
    Flagged,
}

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Terrain, fixed once generation completes
    pub cell_type: CellType,
    /// Player visibility
    pub state: CellState,
    /// Number of neighbouring monster/treasure cells; only meaningful on floor
    pub adjacent_count: u8,
}

impl Cell {
    /// Creates a hidden wall cell, the state every cell starts in.
    pub fn wall() -> Self {
        Self {
            cell_type: CellType::Wall,
            state: CellState::Hidden,
            adjacent_count: 0,
        }
    }

    /// Whether the player has not uncovered this cell yet.
    pub fn is_hidden(&self) -> bool {
        self.state == CellState::Hidden
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::wall()
    }
}

/// Fixed-size 2D grid of cells.
///
/// # Examples
///
/// ```
/// use dnd_sweeper::{CellType, Grid, Position};
///
/// let mut grid = Grid::new(4, 3);
/// assert_eq!(grid.cell_type(Position::new(1, 1)), Some(CellType::Wall));
///
/// grid.set_cell_type(Position::new(1, 1), CellType::Floor).unwrap();
/// assert_eq!(grid.cell_type(Position::new(1, 1)), Some(CellType::Floor));
///
/// assert!(grid.get(Position::new(4, 0)).is_none());
/// assert!(grid.set_cell_type(Position::new(-1, 0), CellType::Floor).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid filled with hidden wall cells.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::wall(); width as usize * height as usize],
        }
    }

    /// Builds a grid from rows of ASCII glyphs (`#`, `.`, `+`, `M`, `T`).
    ///
    /// All rows must have the same length. Adjacency counts are left at zero.
    pub fn from_ascii(rows: &[&str]) -> SweeperResult<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.chars().count()) as u32;
        let mut grid = Self::new(width, height);

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(SweeperError::InvalidConfig(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, glyph) in row.chars().enumerate() {
                let cell_type = CellType::from_glyph(glyph).ok_or_else(|| {
                    SweeperError::InvalidConfig(format!("unknown cell glyph '{}'", glyph))
                })?;
                grid.set_cell_type(Position::new(x as i32, y as i32), cell_type)?;
            }
        }

        Ok(grid)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Checks if a position lies inside `[0, width) x [0, height)`.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.is_valid_position(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    fn cell_mut(&mut self, pos: Position) -> SweeperResult<&mut Cell> {
        let index = self
            .index(pos)
            .ok_or(SweeperError::OutOfBounds { x: pos.x, y: pos.y })?;
        Ok(&mut self.cells[index])
    }

    /// Gets the cell at a position, or `None` outside the grid.
    pub fn get(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|index| &self.cells[index])
    }

    /// Gets the terrain at a position, or `None` outside the grid.
    pub fn cell_type(&self, pos: Position) -> Option<CellType> {
        self.get(pos).map(|cell| cell.cell_type)
    }

    /// Sets the terrain of a cell.
    pub fn set_cell_type(&mut self, pos: Position, cell_type: CellType) -> SweeperResult<()> {
        self.cell_mut(pos)?.cell_type = cell_type;
        Ok(())
    }

    /// Sets the visibility of a cell.
    pub fn set_state(&mut self, pos: Position, state: CellState) -> SweeperResult<()> {
        self.cell_mut(pos)?.state = state;
        Ok(())
    }

    pub(crate) fn set_adjacent_count(&mut self, pos: Position, count: u8) -> SweeperResult<()> {
        self.cell_mut(pos)?.adjacent_count = count;
        Ok(())
    }

    /// Iterates over every in-bounds position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width as i32;
        let height = self.height as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Iterates over every cell together with its position.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> {
        self.positions().zip(self.cells.iter())
    }

    /// Iterates over the up-to-8 in-bounds neighbours of a position.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        pos.adjacent_positions()
            .into_iter()
            .filter(move |&neighbor| self.is_valid_position(neighbor))
    }

    /// Counts cells of the given terrain.
    pub fn count(&self, cell_type: CellType) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.cell_type == cell_type)
            .count()
    }

    /// Counts cells in the given visibility state.
    pub fn count_state(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| cell.state == state).count()
    }

    /// Renders the terrain as ASCII rows, one line per grid row.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for row in self.cells.chunks(self.width.max(1) as usize) {
            out.extend(row.iter().map(|cell| cell.cell_type.glyph()));
            out.push('\n');
        }
        out
    }
}
