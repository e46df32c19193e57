//! Reveal behaviour through the public `Dungeon` surface.

use dnd_sweeper::{CellState, CellType, Dungeon, GenerationConfig, Grid, Position};
use proptest::prelude::*;

fn dungeon(rows: &[&str]) -> Dungeon {
    Dungeon::from_grid(Grid::from_ascii(rows).unwrap()).unwrap()
}

/// Zero-hint floor that is uncovered must have uncovered every open neighbour.
fn assert_flood_closed(dungeon: &Dungeon) {
    let grid = dungeon.grid();
    for (pos, cell) in grid.iter() {
        if cell.state != CellState::Revealed
            || cell.cell_type != CellType::Floor
            || cell.adjacent_count != 0
        {
            continue;
        }
        for neighbor in grid.neighbors(pos) {
            let next = grid.get(neighbor).unwrap();
            if next.cell_type != CellType::Wall {
                assert_eq!(
                    next.state,
                    CellState::Revealed,
                    "({}, {}) stopped short of ({}, {})",
                    pos.x,
                    pos.y,
                    neighbor.x,
                    neighbor.y
                );
            }
        }
    }
}

#[test]
fn test_open_room_reveals_in_one_click() {
    let mut dungeon = dungeon(&["#####", "#...#", "#...#", "#...#", "#####"]);

    assert_eq!(dungeon.reveal(2, 2), 9);
    for y in 1..=3 {
        for x in 1..=3 {
            assert_eq!(dungeon.query_cell(x, y).unwrap().state, CellState::Revealed);
        }
    }
    assert_eq!(dungeon.query_cell(0, 0).unwrap().state, CellState::Hidden);
    assert_eq!(dungeon.revealed_count(), 9);
}

#[test]
fn test_out_of_bounds_reveals_are_no_ops() {
    let mut dungeon = dungeon(&["#####", "#...#", "#####"]);
    let before = dungeon.grid().clone();

    assert_eq!(dungeon.reveal(-1, 0), 0);
    assert_eq!(dungeon.reveal(5, 0), 0);
    assert_eq!(dungeon.reveal(0, 3), 0);
    assert_eq!(dungeon.reveal(0, -1), 0);
    assert_eq!(dungeon.reveal(i32::MAX, i32::MIN), 0);

    assert_eq!(dungeon.grid(), &before);
}

#[test]
fn test_reveal_is_idempotent() {
    let mut dungeon = dungeon(&["######", "#....#", "#..M.#", "######"]);

    let first = dungeon.reveal(1, 1);
    let snapshot = dungeon.grid().clone();

    assert!(first > 0);
    assert_eq!(dungeon.reveal(1, 1), 0);
    assert_eq!(dungeon.grid(), &snapshot);
}

#[test]
fn test_hint_cells_fence_in_the_cascade() {
    // The right half is only reachable through cells next to the monster.
    let mut dungeon = dungeon(&[
        "#########",
        "#...#...#",
        "#...M...#",
        "#...#...#",
        "#########",
    ]);

    dungeon.reveal(1, 2);

    assert_eq!(dungeon.query_cell(3, 2).unwrap().state, CellState::Revealed);
    assert_eq!(dungeon.query_cell(3, 2).unwrap().adjacent_count, 1);
    assert_eq!(dungeon.query_cell(4, 2).unwrap().state, CellState::Hidden);
    assert_eq!(dungeon.query_cell(6, 2).unwrap().state, CellState::Hidden);
    assert_flood_closed(&dungeon);
}

#[test]
fn test_clicking_content_reveals_one_cell() {
    let mut dungeon = dungeon(&["#####", "#.T.#", "#####"]);

    assert_eq!(dungeon.reveal(2, 1), 1);
    assert_eq!(dungeon.query_cell(2, 1).unwrap().cell_type, CellType::Treasure);
    assert_eq!(dungeon.query_cell(1, 1).unwrap().state, CellState::Hidden);
}

#[test]
fn test_generated_board_reveals_from_empty_floor() {
    let config = GenerationConfig::for_testing(8);
    let pristine = Dungeon::generate(&config).unwrap();

    let starts: Vec<Position> = pristine
        .grid()
        .iter()
        .filter(|(_, cell)| cell.cell_type == CellType::Floor && cell.adjacent_count == 0)
        .map(|(pos, _)| pos)
        .take(10)
        .collect();

    for start in starts {
        let mut dungeon = pristine.clone();
        let revealed = dungeon.reveal(start.x, start.y);

        assert!(revealed >= 1);
        assert_eq!(dungeon.revealed_count(), revealed);
        assert_flood_closed(&dungeon);
        assert!(dungeon
            .grid()
            .iter()
            .all(|(_, cell)| cell.state == CellState::Hidden || cell.cell_type != CellType::Wall));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn clicks_anywhere_keep_the_flood_closed(
        seed in any::<u64>(),
        clicks in prop::collection::vec((-2i32..32, -2i32..22), 1..8)
    ) {
        let mut dungeon = Dungeon::generate(&GenerationConfig::for_testing(seed)).unwrap();
        let mut total = 0;

        for &(x, y) in &clicks {
            let before = dungeon.revealed_count();
            let revealed = dungeon.reveal(x, y);
            prop_assert_eq!(dungeon.revealed_count(), before + revealed);
            total += revealed;
        }

        prop_assert_eq!(dungeon.revealed_count(), total);
        prop_assert_eq!(dungeon.revealed_count() + dungeon.hidden_count(), 30 * 20);
        assert_flood_closed(&dungeon);

        let snapshot = dungeon.grid().clone();
        for &(x, y) in &clicks {
            prop_assert_eq!(dungeon.reveal(x, y), 0);
        }
        prop_assert_eq!(dungeon.grid(), &snapshot);
    }
}
