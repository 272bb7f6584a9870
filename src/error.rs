use std::path::PathBuf;

/// Why a command was rejected by the game. A rejected command leaves the game
/// exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum GameError {
    #[error("move is not allowed by the rules")]
    InvalidMove,

    #[error("source point is not on the board")]
    InvalidFromColumn,

    #[error("destination point is not on the board")]
    InvalidToColumn,

    #[error("checker does not belong to the player on turn")]
    NotCurrentPlayer,

    #[error("dice have not been rolled")]
    DiceNotRolled,

    #[error("no legal move exists for the current dice")]
    NoAvailableMoves,

    #[error("cannot bear off while checkers are outside the home board")]
    CannotBearOff,

    #[error("destination is blocked by two or more opposing checkers")]
    BlockedByOpponent,

    #[error("game is not in progress")]
    GameNotStarted,

    #[error("game is already over")]
    GameAlreadyOver,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_error_display() {
        assert_eq!(
            GameError::BlockedByOpponent.to_string(),
            "destination is blocked by two or more opposing checkers"
        );
        assert_eq!(GameError::DiceNotRolled.to_string(), "dice have not been rolled");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("runner.games must be > 0".to_string());
        assert_eq!(err.to_string(), "config validation error: runner.games must be > 0");
    }
}
