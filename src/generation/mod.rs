//! # Generation Module
//!
//! Procedural dungeon generation for the sweeper board.
//!
//! Generation runs as a fixed pipeline over one grid:
//! room placement, per-type room networks, then the adjacency hint pass.
//! Rooms only exist during generation; once the pipeline finishes the grid's
//! cell types are the durable record.

pub mod adjacency;
pub mod dungeon;
pub mod network;
pub mod placement;

pub use adjacency::*;
pub use dungeon::*;
pub use network::*;
pub use placement::*;

use crate::{CellType, Grid, Position, SweeperError, SweeperResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted grid width or height, in cells.
pub const MAX_GRID_SIDE: u32 = 4096;

/// Largest accepted monster-to-treasure room ratio.
pub const MAX_MONSTERS_PER_TREASURE: u32 = 1000;

/// Configuration for procedural generation.
///
/// Every field has a default, so a JSON file only needs to name the values
/// it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Grid width in cells
    pub width: u32,
    /// Grid height in cells
    pub height: u32,
    /// Minimum number of rooms to aim for
    pub min_rooms: u32,
    /// Maximum number of rooms to aim for
    pub max_rooms: u32,
    /// Minimum room side length
    pub min_room_size: u32,
    /// Maximum room side length
    pub max_room_size: u32,
    /// Number of sector columns the interior is split into
    pub sector_columns: u32,
    /// Number of sector rows the interior is split into
    pub sector_rows: u32,
    /// Rock border around the grid that rooms may not enter
    pub border_margin: u32,
    /// How far a room may bleed past its sector on each side
    pub sector_padding: u32,
    /// Global budget of placement attempts
    pub max_placement_attempts: u32,
    /// Consecutive failures before the maximum room size shrinks
    pub shrink_after_failures: u32,
    /// Monster rooms placed per treasure room
    pub monsters_per_treasure: u32,
    /// Monster rooms guaranteed among the first rooms placed
    pub min_monster_rooms: u32,
    /// Treasure rooms guaranteed among the first rooms placed
    pub min_treasure_rooms: u32,
    /// One content cell per this many floor cells
    pub content_divisor: u32,
    /// Minimum content cells per room
    pub min_content: u32,
}

impl GenerationConfig {
    /// Creates the default generation configuration with the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use dnd_sweeper::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!(config.seed, 7);
    /// assert!(config.max_room_size >= config.min_room_size);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: 80,
            height: 60,
            min_rooms: 40,
            max_rooms: 60,
            min_room_size: 3,
            max_room_size: 12,
            sector_columns: 4,
            sector_rows: 3,
            border_margin: 2,
            sector_padding: 2,
            max_placement_attempts: 1000,
            shrink_after_failures: 8,
            monsters_per_treasure: 2,
            min_monster_rooms: 6,
            min_treasure_rooms: 3,
            content_divisor: 20,
            min_content: 1,
        }
    }

    /// Creates a configuration for testing with a small board and few rooms.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            width: 30,
            height: 20,
            min_rooms: 4,
            max_rooms: 8,
            min_room_size: 2,
            max_room_size: 6,
            sector_columns: 3,
            sector_rows: 2,
            border_margin: 2,
            sector_padding: 1,
            max_placement_attempts: 400,
            shrink_after_failures: 6,
            monsters_per_treasure: 2,
            min_monster_rooms: 2,
            min_treasure_rooms: 1,
            content_divisor: 10,
            min_content: 1,
        }
    }

    /// Loads a configuration from a JSON file and validates it.
    pub fn from_json_file(path: impl AsRef<Path>) -> SweeperResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the parameters describe a generatable board.
    pub fn validate(&self) -> SweeperResult<()> {
        let invalid = |message: String| Err(SweeperError::InvalidConfig(message));

        if self.min_rooms > self.max_rooms {
            return invalid(format!(
                "min_rooms ({}) exceeds max_rooms ({})",
                self.min_rooms, self.max_rooms
            ));
        }
        if self.min_room_size == 0 || self.min_room_size > self.max_room_size {
            return invalid(format!(
                "room size range {}..={} is empty",
                self.min_room_size, self.max_room_size
            ));
        }
        if self.sector_columns == 0 || self.sector_rows == 0 {
            return invalid("sector grid needs at least one row and one column".to_string());
        }
        if self.width > MAX_GRID_SIDE || self.height > MAX_GRID_SIDE {
            return invalid(format!(
                "{}x{} grid exceeds the {} cell side limit",
                self.width, self.height, MAX_GRID_SIDE
            ));
        }
        let margins = self.border_margin.saturating_mul(2);
        if self.width <= margins || self.height <= margins {
            return invalid(format!(
                "{}x{} grid has no interior inside a margin of {}",
                self.width, self.height, self.border_margin
            ));
        }
        let oversized = [
            ("max_room_size", self.max_room_size),
            ("sector_columns", self.sector_columns),
            ("sector_rows", self.sector_rows),
            ("sector_padding", self.sector_padding),
        ];
        if let Some((name, value)) = oversized.iter().find(|(_, value)| *value > MAX_GRID_SIDE) {
            return invalid(format!("{} {} exceeds {}", name, value, MAX_GRID_SIDE));
        }
        if self.monsters_per_treasure == 0 || self.content_divisor == 0 {
            return invalid(
                "monsters_per_treasure and content_divisor must be positive".to_string(),
            );
        }
        if self.monsters_per_treasure > MAX_MONSTERS_PER_TREASURE {
            return invalid(format!(
                "monsters_per_treasure {} exceeds {}",
                self.monsters_per_treasure, MAX_MONSTERS_PER_TREASURE
            ));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Kind of room, which decides what content it holds.
///
/// Rooms of the same kind may share footprint and merge into one complex;
/// rooms of different kinds must stay apart. [`RoomType::can_share_footprint`]
/// is the single place that rule lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// Lair holding monsters
    Monster,
    /// Vault holding treasure
    Treasure,
}

impl RoomType {
    /// All room types, in network-building order.
    pub const ALL: [RoomType; 2] = [RoomType::Monster, RoomType::Treasure];

    /// Gets the cell type this room's content is stamped as.
    pub fn content_cell(self) -> CellType {
        match self {
            RoomType::Monster => CellType::Monster,
            RoomType::Treasure => CellType::Treasure,
        }
    }

    /// Whether a room of this type may overlap or touch a room of `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dnd_sweeper::RoomType;
    ///
    /// assert!(RoomType::Monster.can_share_footprint(RoomType::Monster));
    /// assert!(!RoomType::Monster.can_share_footprint(RoomType::Treasure));
    /// ```
    pub fn can_share_footprint(self, other: RoomType) -> bool {
        self == other
    }
}

/// Rectangular room record, alive only during generation.
///
/// The rectangle is the room's floor footprint; the surrounding rock is not
/// part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Index of this room in placement order
    pub id: u32,
    /// Top-left corner of the footprint
    pub top_left: Position,
    /// Footprint width
    pub width: u32,
    /// Footprint height
    pub height: u32,
    /// Type/purpose of this room
    pub room_type: RoomType,
    /// Whether the network connector has linked this room to its network
    pub connected: bool,
    /// Corridor cells that open onto this room
    pub doors: Vec<Position>,
}

impl Room {
    /// Creates a new, unconnected room.
    ///
    /// # Examples
    ///
    /// ```
    /// use dnd_sweeper::{Position, Room, RoomType};
    ///
    /// let room = Room::new(1, Position::new(5, 5), 10, 8, RoomType::Monster);
    /// assert_eq!(room.id, 1);
    /// assert_eq!(room.area(), 80);
    /// assert!(!room.connected);
    /// ```
    pub fn new(id: u32, top_left: Position, width: u32, height: u32, room_type: RoomType) -> Self {
        Self {
            id,
            top_left,
            width,
            height,
            room_type,
            connected: false,
            doors: Vec::new(),
        }
    }

    /// Gets the bottom-right corner of the footprint (inclusive).
    pub fn bottom_right(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 - 1,
            self.top_left.y + self.height as i32 - 1,
        )
    }

    /// Gets the center position of the room.
    pub fn center(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 / 2,
            self.top_left.y + self.height as i32 / 2,
        )
    }

    /// Gets the area of the room in cells.
    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Checks if a position is inside the footprint.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.top_left.x
            && pos.y >= self.top_left.y
            && pos.x < self.top_left.x + self.width as i32
            && pos.y < self.top_left.y + self.height as i32
    }

    /// Checks if this room's footprint, grown by `border` cells on every side,
    /// intersects another room's footprint.
    pub fn overlaps_with_border(&self, other: &Room, border: i32) -> bool {
        !(self.top_left.x - border >= other.top_left.x + other.width as i32
            || other.top_left.x >= self.top_left.x + self.width as i32 + border
            || self.top_left.y - border >= other.top_left.y + other.height as i32
            || other.top_left.y >= self.top_left.y + self.height as i32 + border)
    }

    /// Gets all positions within the footprint.
    pub fn positions(&self) -> Vec<Position> {
        let mut positions = Vec::with_capacity(self.area() as usize);

        for y in self.top_left.y..(self.top_left.y + self.height as i32) {
            for x in self.top_left.x..(self.top_left.x + self.width as i32) {
                positions.push(Position::new(x, y));
            }
        }

        positions
    }

    /// Records a door cell, ignoring duplicates.
    pub fn add_door(&mut self, pos: Position) {
        if !self.doors.contains(&pos) {
            self.doors.push(pos);
        }
    }
}

/// Statistics about one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Number of rooms the run aimed for
    pub target_rooms: u32,
    /// Monster rooms actually placed
    pub monster_rooms: u32,
    /// Treasure rooms actually placed
    pub treasure_rooms: u32,
    /// Placement attempts spent
    pub attempts: u32,
    /// Corridors carved by the network connector
    pub corridors: u32,
}

impl GenerationSummary {
    /// Total rooms placed.
    pub fn rooms_placed(&self) -> u32 {
        self.monster_rooms + self.treasure_rooms
    }

    /// Whether fewer rooms were placed than targeted.
    pub fn is_partial(&self) -> bool {
        self.rooms_placed() < self.target_rooms
    }
}

/// Output of a generation run: the finished grid plus the room records that
/// produced it.
#[derive(Debug, Clone)]
pub struct GeneratedLayout {
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub summary: GenerationSummary,
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> SweeperResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> SweeperResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!((config.width, config.height), (80, 60));
        assert_eq!((config.min_rooms, config.max_rooms), (40, 60));
        assert_eq!((config.sector_columns, config.sector_rows), (4, 3));
        assert!(config.validate().is_ok());
        assert!(GenerationConfig::for_testing(1).validate().is_ok());
    }

    #[test]
    fn test_config_validation_rejects_nonsense() {
        let mut config = GenerationConfig::new(1);
        config.min_rooms = 70;
        assert!(matches!(config.validate(), Err(SweeperError::InvalidConfig(_))));

        let mut config = GenerationConfig::new(1);
        config.min_room_size = 0;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::new(1);
        config.sector_rows = 0;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::new(1);
        config.width = 4;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::new(1);
        config.monsters_per_treasure = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_extreme_values() {
        let extremes: [fn(&mut GenerationConfig); 7] = [
            |c| c.border_margin = 1 << 31,
            |c| c.border_margin = u32::MAX,
            |c| c.monsters_per_treasure = 1 << 31,
            |c| c.sector_padding = u32::MAX,
            |c| c.max_room_size = u32::MAX,
            |c| c.sector_columns = u32::MAX,
            |c| c.width = u32::MAX,
        ];

        for apply in extremes {
            let mut config = GenerationConfig::for_testing(1);
            apply(&mut config);
            assert!(matches!(config.validate(), Err(SweeperError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_config_validation_accepts_limits() {
        let mut config = GenerationConfig::for_testing(1);
        config.monsters_per_treasure = MAX_MONSTERS_PER_TREASURE;
        config.sector_padding = MAX_GRID_SIDE;
        config.max_room_size = MAX_GRID_SIDE;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_json_uses_defaults_for_missing_fields() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{ "seed": 9, "width": 40 }"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.width, 40);
        assert_eq!(config.height, GenerationConfig::default().height);
    }

    #[test]
    fn test_room_geometry() {
        let room = Room::new(1, Position::new(5, 5), 10, 8, RoomType::Monster);

        assert_eq!(room.bottom_right(), Position::new(14, 12));
        assert_eq!(room.center(), Position::new(10, 9));

        assert!(room.contains(Position::new(5, 5)));
        assert!(room.contains(Position::new(14, 12)));
        assert!(!room.contains(Position::new(4, 5)));
        assert!(!room.contains(Position::new(15, 12)));

        let positions: HashSet<_> = room.positions().into_iter().collect();
        assert_eq!(positions.len(), 80);
    }

    #[test]
    fn test_room_overlap_with_border() {
        let room1 = Room::new(1, Position::new(5, 5), 4, 4, RoomType::Monster);
        let touching = Room::new(2, Position::new(9, 5), 3, 3, RoomType::Treasure);
        let one_gap = Room::new(3, Position::new(10, 5), 3, 3, RoomType::Treasure);
        let overlapping = Room::new(4, Position::new(7, 7), 3, 3, RoomType::Treasure);

        // Sharing an edge only shows up once the border is included.
        assert!(!room1.overlaps_with_border(&touching, 0));
        assert!(room1.overlaps_with_border(&touching, 1));
        assert!(touching.overlaps_with_border(&room1, 1));

        // A single rock column between them keeps them apart.
        assert!(!room1.overlaps_with_border(&one_gap, 1));

        assert!(room1.overlaps_with_border(&overlapping, 0));
        assert!(overlapping.overlaps_with_border(&room1, 0));
    }

    #[test]
    fn test_room_type_compatibility() {
        for a in RoomType::ALL {
            for b in RoomType::ALL {
                assert_eq!(a.can_share_footprint(b), a == b);
            }
        }
        assert_eq!(RoomType::Monster.content_cell(), CellType::Monster);
        assert_eq!(RoomType::Treasure.content_cell(), CellType::Treasure);
    }

    #[test]
    fn test_room_doors_are_unique() {
        let mut room = Room::new(1, Position::new(5, 5), 4, 4, RoomType::Treasure);
        room.add_door(Position::new(4, 6));
        room.add_door(Position::new(4, 6));
        room.add_door(Position::new(9, 6));
        assert_eq!(room.doors.len(), 2);
    }

    #[test]
    fn test_summary_partial() {
        let summary = GenerationSummary {
            target_rooms: 10,
            monster_rooms: 5,
            treasure_rooms: 3,
            ..GenerationSummary::default()
        };
        assert_eq!(summary.rooms_placed(), 8);
        assert!(summary.is_partial());
    }
}
