//! # Dungeon Session
//!
//! The aggregate a front end talks to. A `Dungeon` owns one finished grid and
//! exposes exactly two ways to change it: building a new one, and revealing a
//! cell. Everything else is a read-only query.
//!
//! There is no global board; every dungeon is an independent value, so any
//! number of them can exist side by side (tests rely on this).

use crate::generation::{adjacency, utils};
use crate::{
    CellState, CellType, GenerationConfig, GenerationSummary, GeneratedLayout, Generator, Grid,
    Position, RevealEngine, SectorDungeonGenerator, SweeperResult,
};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Read-only snapshot of one cell, as handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub cell_type: CellType,
    pub state: CellState,
    pub adjacent_count: u8,
}

/// A generated board and its reveal state.
#[derive(Debug, Clone)]
pub struct Dungeon {
    grid: Grid,
    seed: u64,
    summary: GenerationSummary,
}

impl Dungeon {
    /// Generates a new dungeon from the configuration's seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use dnd_sweeper::{Dungeon, GenerationConfig};
    ///
    /// let mut dungeon = Dungeon::generate(&GenerationConfig::for_testing(11)).unwrap();
    /// assert_eq!(dungeon.revealed_count(), 0);
    ///
    /// // Clicks just outside the board are ignored.
    /// assert_eq!(dungeon.reveal(-1, 0), 0);
    /// assert!(dungeon.query_cell(-1, 0).is_none());
    /// ```
    pub fn generate(config: &GenerationConfig) -> SweeperResult<Self> {
        let mut rng = utils::create_rng(config);
        Self::generate_with_rng(config, &mut rng)
    }

    /// Generates a new dungeon drawing from a caller-supplied random source.
    pub fn generate_with_rng(config: &GenerationConfig, rng: &mut StdRng) -> SweeperResult<Self> {
        let layout = SectorDungeonGenerator::new().generate(config, rng)?;
        Ok(Self::from_layout(layout, config.seed))
    }

    /// Keeps the grid of a generated layout and drops its room records.
    pub fn from_layout(layout: GeneratedLayout, seed: u64) -> Self {
        Self {
            grid: layout.grid,
            seed,
            summary: layout.summary,
        }
    }

    /// Wraps a hand-built grid, computing its hint numbers.
    pub fn from_grid(mut grid: Grid) -> SweeperResult<Self> {
        adjacency::compute_adjacency(&mut grid)?;
        Ok(Self {
            grid,
            seed: 0,
            summary: GenerationSummary::default(),
        })
    }

    /// Handles a click at grid coordinates. Returns the number of cells
    /// uncovered; out-of-range or already uncovered targets uncover nothing.
    pub fn reveal(&mut self, x: i32, y: i32) -> usize {
        RevealEngine::reveal(&mut self.grid, Position::new(x, y))
    }

    /// Gets the renderer's view of a cell, or `None` outside the board.
    pub fn query_cell(&self, x: i32, y: i32) -> Option<CellView> {
        self.grid.get(Position::new(x, y)).map(|cell| CellView {
            cell_type: cell.cell_type,
            state: cell.state,
            adjacent_count: cell.adjacent_count,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn summary(&self) -> &GenerationSummary {
        &self.summary
    }

    pub fn revealed_count(&self) -> usize {
        self.grid.count_state(CellState::Revealed)
    }

    pub fn hidden_count(&self) -> usize {
        self.grid.count_state(CellState::Hidden)
    }

    /// Draws the board as text, one line per row.
    ///
    /// Hidden cells print as a space unless `show_hidden` is set. Revealed
    /// floor with a non-zero hint prints its digit.
    pub fn render_ascii(&self, show_hidden: bool) -> String {
        let mut out = String::new();
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                let glyph = match self.query_cell(x, y) {
                    Some(view) if view.state == CellState::Hidden && !show_hidden => ' ',
                    Some(view) if view.cell_type == CellType::Floor && view.adjacent_count > 0 => {
                        char::from_digit(u32::from(view.adjacent_count), 10).unwrap_or('*')
                    }
                    Some(view) => view.cell_type.glyph(),
                    None => ' ',
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_room() -> Dungeon {
        Dungeon::from_grid(Grid::from_ascii(&["#####", "#...#", "#..M#", "#####"]).unwrap()).unwrap()
    }

    #[test]
    fn test_from_grid_computes_hints() {
        let dungeon = small_room();
        let view = dungeon.query_cell(2, 1).unwrap();
        assert_eq!(view.cell_type, CellType::Floor);
        assert_eq!(view.state, CellState::Hidden);
        assert_eq!(view.adjacent_count, 1);
        assert_eq!(dungeon.query_cell(1, 1).unwrap().adjacent_count, 0);
    }

    #[test]
    fn test_reveal_and_counts() {
        let mut dungeon = small_room();
        assert_eq!(dungeon.hidden_count(), 20);

        let uncovered = dungeon.reveal(1, 1);

        // (1,1), (1,2) are empty; (2,1), (2,2) border the monster.
        assert_eq!(uncovered, 4);
        assert_eq!(dungeon.revealed_count(), 4);
        assert_eq!(dungeon.hidden_count(), 16);
        assert_eq!(dungeon.query_cell(3, 1).unwrap().state, CellState::Hidden);
    }

    #[test]
    fn test_query_out_of_bounds() {
        let dungeon = small_room();
        assert!(dungeon.query_cell(5, 0).is_none());
        assert!(dungeon.query_cell(0, 4).is_none());
        assert!(dungeon.query_cell(0, -1).is_none());
    }

    #[test]
    fn test_render_ascii() {
        let mut dungeon = small_room();
        assert_eq!(
            dungeon.render_ascii(true),
            "#####\n#.11#\n#.1M#\n#####\n"
        );

        dungeon.reveal(1, 1);
        assert_eq!(dungeon.render_ascii(false), "     \n .1  \n .1  \n     \n");
    }

    #[test]
    fn test_generate_keeps_seed_and_summary() {
        let config = GenerationConfig::for_testing(31);
        let dungeon = Dungeon::generate(&config).unwrap();

        assert_eq!(dungeon.seed(), 31);
        assert_eq!(dungeon.width(), config.width);
        assert_eq!(dungeon.height(), config.height);
        assert!(dungeon.summary().target_rooms >= config.min_rooms);
        assert_eq!(dungeon.hidden_count(), (config.width * config.height) as usize);
    }
}
