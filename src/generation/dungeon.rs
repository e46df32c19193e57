//! # Dungeon Generation
//!
//! The full generation pipeline for a sweeper board.
//!
//! This generator creates dungeons by:
//! 1. Placing typed rooms sector by sector with adaptive sizing
//! 2. Joining each room type into its own corridor network
//! 3. Computing the hint number of every floor cell
//! 4. Checking the result before handing it out

use crate::generation::{adjacency, RoomNetworkConnector, RoomPlacer};
use crate::{
    CellType, GeneratedLayout, GenerationConfig, GenerationSummary, Generator, Grid, Position,
    Room, RoomType, SweeperError, SweeperResult,
};
use log::info;
use pathfinding::prelude::bfs_reach;
use rand::rngs::StdRng;
use std::collections::HashSet;

/// Sector-based room-and-corridor generator for sweeper boards.
#[derive(Debug, Clone)]
pub struct SectorDungeonGenerator {
    /// Whether to run [`Generator::validate`] before returning a layout
    pub verify_output: bool,
}

impl SectorDungeonGenerator {
    /// Creates a generator that verifies its output.
    ///
    /// # Examples
    ///
    /// ```
    /// use dnd_sweeper::{generation::utils, GenerationConfig, Generator, SectorDungeonGenerator};
    ///
    /// let config = GenerationConfig::for_testing(3);
    /// let mut rng = utils::create_rng(&config);
    /// let layout = SectorDungeonGenerator::new().generate(&config, &mut rng).unwrap();
    /// assert_eq!(layout.grid.width(), config.width);
    /// ```
    pub fn new() -> Self {
        Self {
            verify_output: true,
        }
    }

    /// Checks that every room of a type is reachable from every other room
    /// of that type through open cells.
    pub fn check_networks(grid: &Grid, rooms: &[Room]) -> SweeperResult<()> {
        for room_type in RoomType::ALL {
            let mut members = rooms.iter().filter(|room| room.room_type == room_type);
            let Some(first) = members.next() else {
                continue;
            };

            let reachable: HashSet<Position> = bfs_reach(first.center(), |&pos: &Position| {
                pos.cardinal_adjacent_positions()
                    .into_iter()
                    .filter(|&next| grid.cell_type(next).is_some_and(CellType::is_open))
                    .collect::<Vec<_>>()
            })
            .collect();

            for room in members {
                if !reachable.contains(&room.center()) {
                    return Err(SweeperError::GenerationFailed(format!(
                        "{:?} room {} is not reachable from room {}",
                        room_type, room.id, first.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Checks every floor cell's hint number against a fresh recount.
    pub fn check_adjacency(grid: &Grid) -> SweeperResult<()> {
        for (pos, cell) in grid.iter() {
            if cell.cell_type != CellType::Floor {
                continue;
            }
            let expected = adjacency::count_adjacent_content(grid, pos);
            if cell.adjacent_count != expected {
                return Err(SweeperError::GenerationFailed(format!(
                    "floor at ({}, {}) hints {} but has {} neighbours with content",
                    pos.x, pos.y, cell.adjacent_count, expected
                )));
            }
        }
        Ok(())
    }
}

impl Generator<GeneratedLayout> for SectorDungeonGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> SweeperResult<GeneratedLayout> {
        config.validate()?;

        let mut grid = Grid::new(config.width, config.height);

        let placement = RoomPlacer::new(config).place_rooms(&mut grid, rng)?;
        let mut rooms = placement.rooms;

        let corridors = RoomNetworkConnector::connect_all(&mut grid, &mut rooms)?;

        adjacency::compute_adjacency(&mut grid)?;

        let count_type = |room_type: RoomType| {
            rooms
                .iter()
                .filter(|room| room.room_type == room_type)
                .count() as u32
        };
        let summary = GenerationSummary {
            target_rooms: placement.target_rooms,
            monster_rooms: count_type(RoomType::Monster),
            treasure_rooms: count_type(RoomType::Treasure),
            attempts: placement.attempts,
            corridors,
        };

        info!(
            "Generated {}x{} dungeon (seed {}): {} monster rooms, {} treasure rooms of {} targeted, {} corridors, {} attempts",
            config.width,
            config.height,
            config.seed,
            summary.monster_rooms,
            summary.treasure_rooms,
            summary.target_rooms,
            summary.corridors,
            summary.attempts
        );

        let layout = GeneratedLayout {
            grid,
            rooms,
            summary,
        };

        if self.verify_output {
            self.validate(&layout, config)?;
        }

        Ok(layout)
    }

    fn validate(&self, layout: &GeneratedLayout, config: &GenerationConfig) -> SweeperResult<()> {
        if layout.grid.width() != config.width || layout.grid.height() != config.height {
            return Err(SweeperError::GenerationFailed(format!(
                "grid is {}x{}, expected {}x{}",
                layout.grid.width(),
                layout.grid.height(),
                config.width,
                config.height
            )));
        }

        if let Some(room) = layout.rooms.iter().find(|room| !room.connected) {
            return Err(SweeperError::GenerationFailed(format!(
                "room {} was never connected to its network",
                room.id
            )));
        }

        Self::check_networks(&layout.grid, &layout.rooms)?;
        Self::check_adjacency(&layout.grid)
    }

    fn generator_type(&self) -> &'static str {
        "SectorDungeonGenerator"
    }
}

impl Default for SectorDungeonGenerator {
    fn default() -> Self {
        Self::new()
    }
}
