use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

pub const ROOM_COUNT: u8 = 12;

/// Lobby entry a player picks a game from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: u8,
    pub name: String,
    pub difficulty: Difficulty,
    pub locked: bool,
}

impl Room {
    /// Difficulty cycles easy, medium, hard; only the first room is open.
    pub fn new(id: u8) -> Self {
        Self {
            id,
            name: format!("Room {}", u16::from(id) + 1),
            difficulty: Difficulty::ALL[usize::from(id) % Difficulty::ALL.len()],
            locked: id > 0,
        }
    }

    /// Difficulty to start this room with, rejecting locked rooms.
    pub fn enter(&self) -> Result<Difficulty> {
        if self.locked {
            log::debug!("refusing to enter locked {}", self.name);
            return Err(GameError::RoomLocked);
        }
        Ok(self.difficulty)
    }
}

pub fn rooms() -> Vec<Room> {
    (0..ROOM_COUNT).map(Room::new).collect()
}

pub fn room(id: u8) -> Option<Room> {
    (id < ROOM_COUNT).then(|| Room::new(id))
}
