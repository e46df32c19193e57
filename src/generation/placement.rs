//! # Room Placement
//!
//! Proposes, validates, and stamps rectangular rooms into the grid.
//!
//! The interior of the grid (inside the rock margin) is split into a fixed
//! grid of sectors that are visited in shuffled order, so rooms spread over
//! the whole board instead of piling up wherever placement starts. Candidates
//! may bleed a little past their sector, which lets neighbouring same-type
//! rooms merge into larger complexes.
//!
//! Failed placements are normal. After a run of consecutive failures the
//! maximum room size shrinks by one; every success lets it grow back by one.
//! Placement stops at the target room count or when the attempt budget runs
//! out, whichever comes first.

use crate::{CellType, GenerationConfig, Grid, Position, Room, RoomType, SweeperResult};
use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// A rectangular slice of the grid interior that rooms are proposed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sector {
    pub top_left: Position,
    pub width: u32,
    pub height: u32,
}

/// Rooms produced by a placement run.
#[derive(Debug, Clone)]
pub struct PlacementOutcome {
    pub rooms: Vec<Room>,
    pub target_rooms: u32,
    pub attempts: u32,
}

/// Places typed rooms according to a [`GenerationConfig`].
#[derive(Debug, Clone)]
pub struct RoomPlacer<'a> {
    config: &'a GenerationConfig,
}

impl<'a> RoomPlacer<'a> {
    pub fn new(config: &'a GenerationConfig) -> Self {
        Self { config }
    }

    /// Splits the grid interior into `sector_columns x sector_rows` sectors.
    ///
    /// The last column and row absorb any remainder so the sectors tile the
    /// whole interior.
    pub fn sectors(&self) -> Vec<Sector> {
        let margin = self.config.border_margin;
        let interior_width = self.config.width.saturating_sub(margin.saturating_mul(2));
        let interior_height = self.config.height.saturating_sub(margin.saturating_mul(2));
        let columns = self.config.sector_columns;
        let rows = self.config.sector_rows;
        let sector_width = interior_width / columns;
        let sector_height = interior_height / rows;

        let mut sectors = Vec::with_capacity((columns * rows) as usize);
        for row in 0..rows {
            for column in 0..columns {
                let width = if column + 1 == columns {
                    interior_width - sector_width * column
                } else {
                    sector_width
                };
                let height = if row + 1 == rows {
                    interior_height - sector_height * row
                } else {
                    sector_height
                };
                sectors.push(Sector {
                    top_left: Position::new(
                        (margin + column * sector_width) as i32,
                        (margin + row * sector_height) as i32,
                    ),
                    width,
                    height,
                });
            }
        }
        sectors
    }

    /// Runs placement until the target count or the attempt budget is hit.
    pub fn place_rooms(&self, grid: &mut Grid, rng: &mut StdRng) -> SweeperResult<PlacementOutcome> {
        let config = self.config;
        let target_rooms = rng.gen_range(config.min_rooms..=config.max_rooms);
        let mut rooms: Vec<Room> =
            Vec::with_capacity(target_rooms.min(config.max_placement_attempts) as usize);

        let mut order = self.sectors();
        order.shuffle(rng);
        let mut cursor = 0;

        let mut attempts = 0;
        let mut consecutive_failures = 0;
        let mut current_max_size = config.max_room_size;
        let mut monsters = 0;
        let mut treasures = 0;

        while (rooms.len() as u32) < target_rooms && attempts < config.max_placement_attempts {
            attempts += 1;

            if cursor == order.len() {
                order.shuffle(rng);
                cursor = 0;
            }
            let sector = order[cursor];
            cursor += 1;

            let room_type = next_room_type(config, monsters, treasures);
            let candidate = self.propose(sector, current_max_size, room_type, rooms.len() as u32, rng);

            let placed = self.placement_is_valid(&candidate, &rooms);
            let previous_max_size = current_max_size;
            (current_max_size, consecutive_failures) =
                adapt_max_size(config, current_max_size, consecutive_failures, placed);
            if !placed {
                if current_max_size < previous_max_size {
                    debug!("Placement pressure: max room size shrinks to {}", current_max_size);
                }
                continue;
            }

            self.stamp_room(grid, &candidate, rng)?;
            trace!(
                "Placed {:?} room {} at ({}, {}) size {}x{}",
                candidate.room_type,
                candidate.id,
                candidate.top_left.x,
                candidate.top_left.y,
                candidate.width,
                candidate.height
            );
            match room_type {
                RoomType::Monster => monsters += 1,
                RoomType::Treasure => treasures += 1,
            }
            rooms.push(candidate);
        }

        if (rooms.len() as u32) < target_rooms {
            warn!(
                "Attempt budget of {} exhausted with {} of {} rooms placed",
                config.max_placement_attempts,
                rooms.len(),
                target_rooms
            );
        }

        Ok(PlacementOutcome {
            rooms,
            target_rooms,
            attempts,
        })
    }

    /// Builds a random candidate room inside (or bleeding out of) a sector.
    fn propose(
        &self,
        sector: Sector,
        max_size: u32,
        room_type: RoomType,
        id: u32,
        rng: &mut StdRng,
    ) -> Room {
        let min_size = self.config.min_room_size;
        let width = rng.gen_range(min_size..=max_size.max(min_size));
        let height = rng.gen_range(min_size..=max_size.max(min_size));

        let padding = self.config.sector_padding as i32;
        let slack_x = (sector.width as i32 - width as i32).max(0);
        let slack_y = (sector.height as i32 - height as i32).max(0);
        let x = sector.top_left.x + rng.gen_range(-padding..=slack_x + padding);
        let y = sector.top_left.y + rng.gen_range(-padding..=slack_y + padding);

        Room::new(id, Position::new(x, y), width, height, room_type)
    }

    /// Checks a candidate against the margin and the rooms placed so far.
    ///
    /// A candidate is rejected when it leaves the interior, or when it (grown
    /// by one cell on every side) touches a room it may not share footprint
    /// with.
    pub fn placement_is_valid(&self, candidate: &Room, existing: &[Room]) -> bool {
        let margin = self.config.border_margin as i64;
        let left = candidate.top_left.x as i64;
        let top = candidate.top_left.y as i64;
        let right = left + candidate.width as i64;
        let bottom = top + candidate.height as i64;

        if left < margin
            || top < margin
            || right > self.config.width as i64 - margin
            || bottom > self.config.height as i64 - margin
        {
            return false;
        }

        existing.iter().all(|room| {
            candidate.room_type.can_share_footprint(room.room_type)
                || !candidate.overlaps_with_border(room, 1)
        })
    }

    /// Carves a room's footprint and scatters its content.
    ///
    /// Only rock is turned into floor, and content only lands on floor, so a
    /// room that merges into an earlier same-type room keeps that room's
    /// content intact.
    pub fn stamp_room(&self, grid: &mut Grid, room: &Room, rng: &mut StdRng) -> SweeperResult<()> {
        let mut open_floor = Vec::with_capacity(room.area() as usize);
        for pos in room.positions() {
            match grid.cell_type(pos) {
                Some(CellType::Wall) => {
                    grid.set_cell_type(pos, CellType::Floor)?;
                    open_floor.push(pos);
                }
                Some(CellType::Floor) => open_floor.push(pos),
                _ => {}
            }
        }

        let content_count = content_count(self.config, room.area()).min(open_floor.len() as u32);
        let content_cell = room.room_type.content_cell();
        let chosen: Vec<Position> = open_floor
            .choose_multiple(rng, content_count as usize)
            .copied()
            .collect();
        for pos in chosen {
            grid.set_cell_type(pos, content_cell)?;
        }

        Ok(())
    }
}

/// Number of content cells a room of the given area receives.
pub fn content_count(config: &GenerationConfig, area: u32) -> u32 {
    (area / config.content_divisor).max(config.min_content)
}

/// Updates the adaptive maximum room size after one placement attempt.
///
/// Returns the new maximum and the new count of consecutive failures. A
/// success grows the maximum by one up to `max_room_size`; a run of
/// `shrink_after_failures` failures shrinks it by one, never below
/// `min_room_size`, and starts a new run.
pub fn adapt_max_size(
    config: &GenerationConfig,
    current_max_size: u32,
    consecutive_failures: u32,
    placed: bool,
) -> (u32, u32) {
    if placed {
        return ((current_max_size + 1).min(config.max_room_size), 0);
    }

    let failures = consecutive_failures.saturating_add(1);
    if failures >= config.shrink_after_failures && current_max_size > config.min_room_size {
        (current_max_size - 1, 0)
    } else {
        (current_max_size, failures)
    }
}

/// Decides the type of the next room from the counts placed so far.
///
/// The configured minimums are filled first; after that rooms follow the
/// monster-to-treasure ratio, which with the defaults yields the repeating
/// pattern monster, monster, treasure.
///
/// # Examples
///
/// ```
/// use dnd_sweeper::{generation::next_room_type, GenerationConfig, RoomType};
///
/// let config = GenerationConfig::default();
/// assert_eq!(next_room_type(&config, 0, 0), RoomType::Monster);
/// assert_eq!(next_room_type(&config, 2, 0), RoomType::Treasure);
/// ```
pub fn next_room_type(config: &GenerationConfig, monsters: u32, treasures: u32) -> RoomType {
    let needs_monster = monsters < config.min_monster_rooms;
    let needs_treasure = treasures < config.min_treasure_rooms;

    match (needs_monster, needs_treasure) {
        (true, false) => RoomType::Monster,
        (false, true) => RoomType::Treasure,
        _ => {
            if monsters >= treasures.saturating_add(1).saturating_mul(config.monsters_per_treasure) {
                RoomType::Treasure
            } else {
                RoomType::Monster
            }
        }
    }
}
