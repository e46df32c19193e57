//! # Room Networks
//!
//! Links every room to the other rooms of its own type.
//!
//! Each type's rooms are joined with a greedy Prim's-style spanning tree over
//! room centers: starting from the first room, the closest (connected,
//! unconnected) pair by Manhattan distance is joined with an L-shaped corridor
//! until no room of that type is left out. Monster and treasure networks are
//! built independently.
//!
//! Corridors are carved as door cells, never floor, so carved passages stay
//! distinguishable from room interiors.

use crate::{CellType, Grid, Position, Room, RoomType, SweeperResult};
use log::{debug, trace};

/// Carves corridors between same-type rooms.
pub struct RoomNetworkConnector;

impl RoomNetworkConnector {
    /// Builds the network for every room type. Returns the corridor count.
    pub fn connect_all(grid: &mut Grid, rooms: &mut [Room]) -> SweeperResult<u32> {
        let mut corridors = 0;
        for room_type in RoomType::ALL {
            corridors += Self::connect_type(grid, rooms, room_type)?;
        }
        Ok(corridors)
    }

    /// Builds the network for one room type. Returns the corridor count.
    ///
    /// Ties on distance go to the lowest connected room index, then the
    /// lowest unconnected room index.
    pub fn connect_type(
        grid: &mut Grid,
        rooms: &mut [Room],
        room_type: RoomType,
    ) -> SweeperResult<u32> {
        let members: Vec<usize> = rooms
            .iter()
            .enumerate()
            .filter(|(_, room)| room.room_type == room_type)
            .map(|(index, _)| index)
            .collect();

        let Some(&seed) = members.first() else {
            return Ok(0);
        };
        rooms[seed].connected = true;

        let mut corridors = 0;
        while let Some((from, to)) = Self::closest_pair(rooms, &members) {
            let start = rooms[from].center();
            let end = rooms[to].center();
            let carved = Self::carve_corridor(grid, start, end)?;
            trace!(
                "{:?} corridor from room {} to room {} carved {} cells",
                room_type,
                rooms[from].id,
                rooms[to].id,
                carved.len()
            );

            for pos in carved {
                for index in [from, to] {
                    if pos
                        .cardinal_adjacent_positions()
                        .iter()
                        .any(|&next| rooms[index].contains(next))
                    {
                        rooms[index].add_door(pos);
                    }
                }
            }

            rooms[to].connected = true;
            corridors += 1;
        }

        debug!(
            "{:?} network joins {} rooms with {} corridors",
            room_type,
            members.len(),
            corridors
        );
        Ok(corridors)
    }

    /// Finds the closest (connected, unconnected) pair among `members`.
    fn closest_pair(rooms: &[Room], members: &[usize]) -> Option<(usize, usize)> {
        let mut best: Option<(u32, usize, usize)> = None;

        for &from in members.iter().filter(|&&index| rooms[index].connected) {
            for &to in members.iter().filter(|&&index| !rooms[index].connected) {
                let distance = rooms[from].center().manhattan_distance(rooms[to].center());
                if best.map_or(true, |(best_distance, _, _)| distance < best_distance) {
                    best = Some((distance, from, to));
                }
            }
        }

        best.map(|(_, from, to)| (from, to))
    }

    /// Carves an L-shaped corridor, horizontal leg first.
    ///
    /// Every wall cell on the path becomes a door; other cells are left as
    /// they are. Returns the cells that were converted.
    ///
    /// # Examples
    ///
    /// ```
    /// use dnd_sweeper::{generation::RoomNetworkConnector, CellType, Grid, Position};
    ///
    /// let mut grid = Grid::new(6, 6);
    /// let carved = RoomNetworkConnector::carve_corridor(
    ///     &mut grid,
    ///     Position::new(1, 1),
    ///     Position::new(4, 3),
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(carved.len(), 6);
    /// assert_eq!(grid.cell_type(Position::new(4, 1)), Some(CellType::Door));
    /// assert_eq!(grid.cell_type(Position::new(1, 3)), Some(CellType::Wall));
    /// ```
    pub fn carve_corridor(
        grid: &mut Grid,
        start: Position,
        end: Position,
    ) -> SweeperResult<Vec<Position>> {
        let mut carved = Vec::new();
        let mut pos = start;
        Self::dig(grid, pos, &mut carved)?;

        while pos.x != end.x {
            pos = pos.step_towards(Position::new(end.x, pos.y));
            Self::dig(grid, pos, &mut carved)?;
        }
        while pos.y != end.y {
            pos = pos.step_towards(Position::new(pos.x, end.y));
            Self::dig(grid, pos, &mut carved)?;
        }

        Ok(carved)
    }

    fn dig(grid: &mut Grid, pos: Position, carved: &mut Vec<Position>) -> SweeperResult<()> {
        if grid.cell_type(pos) == Some(CellType::Wall) {
            grid.set_cell_type(pos, CellType::Door)?;
            carved.push(pos);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp(grid: &mut Grid, room: &Room) {
        for pos in room.positions() {
            grid.set_cell_type(pos, CellType::Floor).unwrap();
        }
    }

    #[test]
    fn test_corridor_goes_horizontal_then_vertical() {
        let mut grid = Grid::new(10, 10);
        let carved =
            RoomNetworkConnector::carve_corridor(&mut grid, Position::new(7, 2), Position::new(3, 6))
                .unwrap();

        let expected: Vec<Position> = (3..=7)
            .rev()
            .map(|x| Position::new(x, 2))
            .chain((3..=6).map(|y| Position::new(3, y)))
            .collect();
        assert_eq!(carved, expected);
        assert_eq!(grid.count(CellType::Door), 9);
        assert_eq!(grid.count(CellType::Floor), 0);
    }

    #[test]
    fn test_corridor_keeps_existing_open_cells() {
        let mut grid = Grid::from_ascii(&["#######", "#.M...#", "#######"]).unwrap();
        let carved =
            RoomNetworkConnector::carve_corridor(&mut grid, Position::new(0, 1), Position::new(6, 1))
                .unwrap();

        assert_eq!(carved, vec![Position::new(0, 1), Position::new(6, 1)]);
        assert_eq!(grid.cell_type(Position::new(2, 1)), Some(CellType::Monster));
    }

    #[test]
    fn test_networks_are_built_per_type() {
        let mut grid = Grid::new(40, 20);
        let mut rooms = vec![
            Room::new(0, Position::new(2, 2), 4, 4, RoomType::Monster),
            Room::new(1, Position::new(30, 2), 4, 4, RoomType::Monster),
            Room::new(2, Position::new(16, 12), 4, 4, RoomType::Treasure),
        ];
        for room in &rooms {
            stamp(&mut grid, room);
        }

        let corridors = RoomNetworkConnector::connect_all(&mut grid, &mut rooms).unwrap();

        assert_eq!(corridors, 1);
        assert!(rooms.iter().all(|room| room.connected));
        assert!(rooms[2].doors.is_empty());
        assert_eq!(rooms[0].doors, vec![Position::new(6, 4)]);
        assert_eq!(rooms[1].doors, vec![Position::new(29, 4)]);

        // The monster corridor runs along row 4 and never drops towards the
        // treasure room.
        for x in 6..30 {
            assert_eq!(grid.cell_type(Position::new(x, 4)), Some(CellType::Door));
        }
        assert_eq!(grid.count(CellType::Door), 24);
    }

    #[test]
    fn test_prim_picks_nearest_unconnected_room() {
        let mut grid = Grid::new(60, 10);
        let mut rooms = vec![
            Room::new(0, Position::new(2, 2), 3, 3, RoomType::Treasure),
            Room::new(1, Position::new(40, 2), 3, 3, RoomType::Treasure),
            Room::new(2, Position::new(10, 2), 3, 3, RoomType::Treasure),
        ];
        for room in &rooms {
            stamp(&mut grid, room);
        }

        let corridors =
            RoomNetworkConnector::connect_type(&mut grid, &mut rooms, RoomType::Treasure).unwrap();

        assert_eq!(corridors, 2);
        // Room 0 links to room 2 first, then room 2 (not room 0) links on to room 1.
        assert_eq!(rooms[0].doors, vec![Position::new(5, 3)]);
        assert_eq!(rooms[2].doors, vec![Position::new(9, 3), Position::new(13, 3)]);
        assert_eq!(rooms[1].doors, vec![Position::new(39, 3)]);
        assert_eq!(grid.count(CellType::Door), 5 + 27);
    }

    #[test]
    fn test_equal_distances_prefer_lowest_index() {
        let mut grid = Grid::new(30, 30);
        let mut rooms = vec![
            Room::new(0, Position::new(12, 12), 3, 3, RoomType::Monster),
            Room::new(1, Position::new(20, 12), 3, 3, RoomType::Monster),
            Room::new(2, Position::new(4, 12), 3, 3, RoomType::Monster),
        ];
        for room in &rooms {
            stamp(&mut grid, room);
        }

        rooms[0].connected = true;
        assert_eq!(
            RoomNetworkConnector::closest_pair(&rooms, &[0, 1, 2]),
            Some((0, 1))
        );

        RoomNetworkConnector::connect_type(&mut grid, &mut rooms, RoomType::Monster).unwrap();
        assert!(rooms.iter().all(|room| room.connected));
        assert_eq!(
            rooms[0].doors,
            vec![Position::new(15, 13), Position::new(11, 13)]
        );
    }

    #[test]
    fn test_empty_and_single_room_networks() {
        let mut grid = Grid::new(10, 10);
        let mut rooms = vec![Room::new(0, Position::new(2, 2), 3, 3, RoomType::Monster)];

        assert_eq!(
            RoomNetworkConnector::connect_type(&mut grid, &mut rooms, RoomType::Treasure).unwrap(),
            0
        );
        assert!(!rooms[0].connected);

        assert_eq!(
            RoomNetworkConnector::connect_type(&mut grid, &mut rooms, RoomType::Monster).unwrap(),
            0
        );
        assert!(rooms[0].connected);
        assert_eq!(grid.count(CellType::Door), 0);
    }
}
