//! # Reveal Engine
//!
//! Handles a click on the board: uncovers the cell and, when it is an empty
//! floor cell with no neighbouring monsters or treasure, cascades outwards the
//! way classic minesweeper does.
//!
//! The cascade runs on an explicit heap-allocated stack so that large open
//! rooms cannot exhaust the call stack.

use crate::{CellState, CellType, Grid, Position, SweeperResult};
use log::{debug, warn};

/// Applies player reveals to a grid.
pub struct RevealEngine;

impl RevealEngine {
    /// Reveals the cell at `pos` and cascades through zero-hint floor.
    ///
    /// Returns the number of cells whose state changed. Out-of-bounds and
    /// already uncovered targets are no-ops that return 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use dnd_sweeper::{CellState, Grid, Position, RevealEngine};
    ///
    /// let mut grid = Grid::from_ascii(&["#####", "#...#", "#####"]).unwrap();
    /// assert_eq!(RevealEngine::reveal(&mut grid, Position::new(2, 1)), 3);
    /// assert_eq!(RevealEngine::reveal(&mut grid, Position::new(2, 1)), 0);
    /// assert_eq!(RevealEngine::reveal(&mut grid, Position::new(-1, 0)), 0);
    ///
    /// // Walls bound the cascade and stay hidden.
    /// assert_eq!(grid.get(Position::new(0, 1)).unwrap().state, CellState::Hidden);
    /// ```
    pub fn reveal(grid: &mut Grid, pos: Position) -> usize {
        match Self::cascade(grid, pos) {
            Ok(revealed) => {
                if revealed > 1 {
                    debug!("Reveal at ({}, {}) cascaded over {} cells", pos.x, pos.y, revealed);
                }
                revealed
            }
            Err(err) => {
                warn!("Reveal at ({}, {}) aborted: {}", pos.x, pos.y, err);
                0
            }
        }
    }

    fn cascade(grid: &mut Grid, start: Position) -> SweeperResult<usize> {
        match grid.get(start) {
            Some(cell) if cell.is_hidden() => {}
            _ => return Ok(0),
        }

        let mut revealed = 0;
        let mut pending = vec![start];

        while let Some(pos) = pending.pop() {
            let cell = match grid.get(pos) {
                Some(cell) if cell.is_hidden() => *cell,
                _ => continue,
            };

            grid.set_state(pos, CellState::Revealed)?;
            revealed += 1;

            if cell.cell_type != CellType::Floor || cell.adjacent_count != 0 {
                continue;
            }

            for neighbor in grid.neighbors(pos) {
                if let Some(next) = grid.get(neighbor) {
                    if next.is_hidden() && next.cell_type != CellType::Wall {
                        pending.push(neighbor);
                    }
                }
            }
        }

        Ok(revealed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::adjacency;

    fn board(rows: &[&str]) -> Grid {
        let mut grid = Grid::from_ascii(rows).unwrap();
        adjacency::compute_adjacency(&mut grid).unwrap();
        grid
    }

    fn revealed(grid: &Grid) -> Vec<Position> {
        grid.iter()
            .filter(|(_, cell)| cell.state == CellState::Revealed)
            .map(|(pos, _)| pos)
            .collect()
    }

    #[test]
    fn test_open_room_cascades_to_walls() {
        let mut grid = board(&["#####", "#...#", "#...#", "#...#", "#####"]);

        let count = RevealEngine::reveal(&mut grid, Position::new(2, 2));

        assert_eq!(count, 9);
        assert_eq!(grid.count_state(CellState::Revealed), 9);
        assert_eq!(grid.count(CellType::Wall), 16);
        for pos in revealed(&grid) {
            assert_eq!(grid.cell_type(pos), Some(CellType::Floor));
        }
    }

    #[test]
    fn test_hint_cells_stop_the_cascade() {
        // Column 4 borders the monster, so it is revealed but not expanded.
        let mut grid = board(&["#######", "#....##", "#....M#", "#....##", "#######"]);

        RevealEngine::reveal(&mut grid, Position::new(1, 2));

        assert_eq!(
            grid.get(Position::new(4, 2)).unwrap().state,
            CellState::Revealed
        );
        assert_eq!(grid.get(Position::new(4, 2)).unwrap().adjacent_count, 1);
        assert_eq!(
            grid.get(Position::new(5, 2)).unwrap().state,
            CellState::Hidden
        );
        assert_eq!(grid.count_state(CellState::Revealed), 12);
    }

    #[test]
    fn test_doors_are_revealed_but_do_not_propagate() {
        let mut grid = board(&["#######", "#..+..#", "#######"]);

        RevealEngine::reveal(&mut grid, Position::new(1, 1));

        assert_eq!(grid.get(Position::new(3, 1)).unwrap().state, CellState::Revealed);
        assert_eq!(grid.get(Position::new(4, 1)).unwrap().state, CellState::Hidden);
        assert_eq!(grid.get(Position::new(5, 1)).unwrap().state, CellState::Hidden);
    }

    #[test]
    fn test_direct_click_on_content_reveals_only_that_cell() {
        let mut grid = board(&["#####", "#.T.#", "#####"]);

        assert_eq!(RevealEngine::reveal(&mut grid, Position::new(2, 1)), 1);
        assert_eq!(revealed(&grid), vec![Position::new(2, 1)]);
    }

    #[test]
    fn test_flagged_cells_are_left_alone() {
        let mut grid = board(&["#####", "#...#", "#####"]);
        grid.set_state(Position::new(3, 1), CellState::Flagged).unwrap();

        RevealEngine::reveal(&mut grid, Position::new(1, 1));

        assert_eq!(grid.get(Position::new(3, 1)).unwrap().state, CellState::Flagged);
        assert_eq!(RevealEngine::reveal(&mut grid, Position::new(3, 1)), 0);
    }

    #[test]
    fn test_large_open_area_does_not_recurse() {
        let mut grid = Grid::new(400, 400);
        for pos in grid.positions().collect::<Vec<_>>() {
            grid.set_cell_type(pos, CellType::Floor).unwrap();
        }
        adjacency::compute_adjacency(&mut grid).unwrap();

        assert_eq!(RevealEngine::reveal(&mut grid, Position::new(0, 0)), 160_000);
    }
}
