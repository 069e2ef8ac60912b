use std::collections::HashMap;

use super::models::Game;

/// Owns the one [`Game`] of every room
#[derive(Debug, Default)]
pub struct RoomRegistry {
    games: HashMap<String, Game>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup and creation are a single map entry operation, two joins to a new room can
    /// never end up with two games
    pub fn find_or_create(&mut self, room: &str) -> &mut Game {
        self.games.entry(room.to_string()).or_insert_with(|| {
            tracing::info!(room, "Room not found, creating a new game");
            Game::new(room.to_string())
        })
    }

    pub fn get(&self, room: &str) -> Option<&Game> {
        self.games.get(room)
    }

    pub fn get_mut(&mut self, room: &str) -> Option<&mut Game> {
        self.games.get_mut(room)
    }

    pub fn remove(&mut self, room: &str) -> Option<Game> {
        self.games.remove(room)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_room_yields_same_game() {
        let mut registry = RoomRegistry::new();

        registry.find_or_create("R1").add_player("A");
        registry.find_or_create("R1").add_player("B");

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("R1").unwrap().players(), ["B", "A"]);
    }

    #[test]
    fn rooms_are_independent() {
        let mut registry = RoomRegistry::new();

        registry.find_or_create("R1").add_player("A");
        registry.find_or_create("R2").add_player("A");

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("R2").unwrap().room(), "R2");
    }

    #[test]
    fn removed_room_starts_fresh() {
        let mut registry = RoomRegistry::new();
        registry.find_or_create("R1").add_player("A");

        let removed = registry.remove("R1").unwrap();
        assert_eq!(removed.players(), ["A"]);
        assert!(registry.is_empty());

        assert!(registry.find_or_create("R1").players().is_empty());
    }
}
