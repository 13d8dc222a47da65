// Session configuration.
//
// `SessionConfig` is immutable once handed to the controller and is read on
// every room evaluation. There is no file or CLI surface — callers build a
// config (usually from `Default`) and pass it at construction time.

/// Configuration for a matchmaking session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Room capacity. When a room is full it is closed to new joins, so
    /// later clients end up creating fresh rooms.
    pub max_players_per_room: u32,
    /// How many players must be present before the match starts.
    pub minimum_players_needed: u32,
    /// Client build version. The backend only matches clients reporting the
    /// same version string.
    pub game_version: String,
    /// Level to load when the room reaches the start threshold.
    pub match_level_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_players_per_room: 4,
            minimum_players_needed: 2,
            game_version: "1".into(),
            match_level_name: "MazeLvl".into(),
        }
    }
}

/// Configuration invariant violations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("max_players_per_room must be at least 1")]
    ZeroCapacity,
    #[error("minimum_players_needed must be at least 1")]
    ZeroMinimum,
    #[error("minimum_players_needed ({minimum}) exceeds max_players_per_room ({max})")]
    MinimumExceedsCapacity { minimum: u32, max: u32 },
}

impl SessionConfig {
    /// Check the invariant `1 <= minimum_players_needed <= max_players_per_room`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_players_per_room == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.minimum_players_needed == 0 {
            return Err(ConfigError::ZeroMinimum);
        }
        if self.minimum_players_needed > self.max_players_per_room {
            return Err(ConfigError::MinimumExceedsCapacity {
                minimum: self.minimum_players_needed,
                max: self.max_players_per_room,
            });
        }
        Ok(())
    }
}
