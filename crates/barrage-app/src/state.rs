//! Messages exchanged with the game loop thread.

use barrage_core::commands::PlayerCommand;
use barrage_core::config::LevelConfig;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    Command(PlayerCommand),
    /// Abandon the current level and start another.
    StartLevel(Box<LevelConfig>),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

impl From<PlayerCommand> for GameLoopCommand {
    fn from(command: PlayerCommand) -> Self {
        GameLoopCommand::Command(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::types::PlayerId;

    #[test]
    fn test_player_command_converts() {
        let cmd: GameLoopCommand = PlayerCommand::Fire {
            player: PlayerId(1),
        }
        .into();
        assert!(matches!(
            cmd,
            GameLoopCommand::Command(PlayerCommand::Fire { .. })
        ));
    }
}
