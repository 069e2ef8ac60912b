use super::words::WordSource;
use crate::app::server::errors::WordSourceError;

/// State of a single room
#[derive(Clone, Debug)]
pub struct Game {
    round: u64,
    room: String,
    guesser: Option<String>,
    players: Vec<String>,
    word: Option<String>,
    hints: Vec<String>,
    guesses: Vec<String>,
}

/// Whether the current guesser is still part of the room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuesserStatus {
    /// No round has been started yet
    Unassigned,
    Active,
    /// The guesser left after being chosen, until the next round starts
    Stale,
}

/// Everything a client is told about a game
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameSnapshot {
    pub round: u64,
    pub room: String,
    pub guesser: Option<String>,
    pub players: Vec<String>,
    pub word: Option<String>,
    pub hints: Vec<String>,
    pub guesses: Vec<String>,
}

impl Game {
    pub fn new(room: String) -> Self {
        Self {
            round: 1,
            room,
            guesser: None,
            players: vec![],
            word: None,
            hints: vec![],
            guesses: vec![],
        }
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn guesser(&self) -> Option<&str> {
        self.guesser.as_deref()
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    pub fn has_player(&self, name: &str) -> bool {
        self.players.iter().any(|player| player == name)
    }

    /// Newest players go first. Returns `false` if the name was already taken
    pub fn add_player(&mut self, name: &str) -> bool {
        if self.has_player(name) {
            return false;
        }

        self.players.insert(0, name.to_string());
        tracing::info!(room = %self.room, player = name, "Player added to room");
        true
    }

    /// The guesser is kept even when it is the one leaving, see [`GuesserStatus::Stale`]
    pub fn remove_player(&mut self, name: &str) -> bool {
        let position = self.players.iter().position(|player| player == name);

        match position {
            Some(index) => {
                self.players.remove(index);
                tracing::info!(room = %self.room, player = name, "Player removed from room");
                true
            }
            None => false,
        }
    }

    pub fn guesser_status(&self) -> GuesserStatus {
        match &self.guesser {
            None => GuesserStatus::Unassigned,
            Some(guesser) if self.has_player(guesser) => GuesserStatus::Active,
            Some(_) => GuesserStatus::Stale,
        }
    }

    /// Start the next round.
    ///
    /// Returns `Ok(false)` and leaves everything untouched when nobody is in the room.
    /// The guesser is `players[(round mod n) - 1]`, where a remainder of zero picks the last
    /// player. The player count is read at call time, so joins and leaves between rounds
    /// shift the rotation.
    ///
    /// A word source failure is returned before any state changes.
    pub fn start<W>(&mut self, words: &W) -> Result<bool, WordSourceError>
    where
        W: WordSource + ?Sized,
    {
        if self.players.is_empty() {
            return Ok(false);
        }

        let word = words.next_word()?;

        let player_count = self.players.len();
        let rotation = (self.round % player_count as u64) as usize;
        let guesser_index = (rotation + player_count - 1) % player_count;

        self.word = Some(word);
        self.guesser = Some(self.players[guesser_index].clone());
        self.round += 1;
        self.hints.clear();
        self.guesses.clear();

        Ok(true)
    }

    /// Answers from the guesser are guesses, from anyone else hints
    pub fn record_answer(&mut self, name: &str, text: String) {
        if self.guesser.as_deref() == Some(name) {
            self.guesses.push(text);
        } else {
            self.hints.push(text);
        }
    }
}

/// Build what gets sent to the room.
///
/// Every recipient gets the same view, the guesser included.
pub fn build_snapshot(game: &Game) -> GameSnapshot {
    GameSnapshot {
        round: game.round,
        room: game.room.clone(),
        guesser: game.guesser.clone(),
        players: game.players.clone(),
        word: game.word.clone(),
        hints: game.hints.clone(),
        guesses: game.guesses.clone(),
    }
}
