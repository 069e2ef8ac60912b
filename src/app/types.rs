#[derive(serde::Deserialize, Clone, Debug, Default)]
pub struct ServerConfig {
    pub server: Option<Server>,
    pub words: Option<WordsConfig>,
    pub game: Option<GameConfig>,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Server {
    pub host: String,
    pub port: String,
    /// Capacity of the queue feeding the game event loop
    #[serde(default = "default_event_queue_size")]
    pub event_queue_size: usize,
}

fn default_event_queue_size() -> usize {
    1024
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: "6969".to_string(),
            event_queue_size: default_event_queue_size(),
        }
    }
}

impl Server {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct WordsConfig {
    /// Line oriented word list, one word per line
    pub path: String,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            path: "config/words.txt".to_string(),
        }
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct GameConfig {
    /// Drop a room once no connection is bound to it anymore
    pub expire_empty_rooms: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            expire_empty_rooms: true,
        }
    }
}
