//! # Adjacency Hints
//!
//! Computes the hint number of every floor cell: how many of its (up to 8)
//! neighbours hold a monster or treasure. Runs once, after all terrain is
//! final.

use crate::{CellType, Grid, Position, SweeperResult};

/// Counts the monster/treasure neighbours of a position, clipped to the grid.
pub fn count_adjacent_content(grid: &Grid, pos: Position) -> u8 {
    grid.neighbors(pos)
        .filter(|&neighbor| grid.cell_type(neighbor).is_some_and(CellType::is_content))
        .count() as u8
}

/// Stores the hint number on every floor cell and clears it everywhere else.
///
/// Idempotent: running it again on unchanged terrain produces the same counts.
pub fn compute_adjacency(grid: &mut Grid) -> SweeperResult<()> {
    let counts: Vec<(Position, u8)> = grid
        .iter()
        .map(|(pos, cell)| {
            let count = if cell.cell_type == CellType::Floor {
                count_adjacent_content(grid, pos)
            } else {
                0
            };
            (pos, count)
        })
        .collect();

    for (pos, count) in counts {
        grid.set_adjacent_count(pos, count)?;
    }
    Ok(())
}
