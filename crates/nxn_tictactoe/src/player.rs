//! Players: a name, a marker, and a running win total.

use crate::board::SpaceValue;
use crate::error::{GameError, GameErrorKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A participant in a game session.
///
/// Identity (name and marker) is fixed at construction. The win total
/// survives new games and is only cleared explicitly.
///
/// Deserialization goes through [`Player::new`], so an empty name or the
/// `Available` marker is rejected there too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PlayerRecord")]
pub struct Player {
    name: String,
    marker: SpaceValue,
    total_wins: u32,
}

/// Unchecked wire form of a [`Player`].
#[derive(Deserialize)]
struct PlayerRecord {
    name: String,
    marker: SpaceValue,
    #[serde(default)]
    total_wins: u32,
}

impl TryFrom<PlayerRecord> for Player {
    type Error = GameError;

    fn try_from(record: PlayerRecord) -> Result<Self, Self::Error> {
        let mut player = Player::new(&record.name, record.marker)?;
        player.total_wins = record.total_wins;
        Ok(player)
    }
}

impl Player {
    /// Creates a player with zero wins.
    ///
    /// # Errors
    ///
    /// - [`GameErrorKind::NullArgument`] if `name` is empty.
    /// - [`GameErrorKind::MarkerReservedValue`] if `marker` is `Available`.
    #[instrument(skip(name), fields(name = %name.as_ref()))]
    pub fn new(name: impl AsRef<str>, marker: SpaceValue) -> Result<Self, GameError> {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(GameError::new(GameErrorKind::NullArgument, "player name is empty"));
        }
        if !marker.is_marker() {
            return Err(GameError::new(
                GameErrorKind::MarkerReservedValue,
                format!("player {} cannot use {:?}", name, marker),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            marker,
            total_wins: 0,
        })
    }

    /// Returns the player's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the marker this player places.
    pub fn marker(&self) -> SpaceValue {
        self.marker
    }

    /// Returns how many games this player has won.
    pub fn total_wins(&self) -> u32 {
        self.total_wins
    }

    /// Records a win.
    #[instrument(skip(self), fields(player = %self.name))]
    pub fn won_game(&mut self) {
        self.total_wins += 1;
        debug!(total_wins = self.total_wins, "Recorded win");
    }

    /// Resets the win total to zero.
    pub fn clear_total_wins(&mut self) {
        self.total_wins = 0;
    }

    /// True if `other` has the same name and marker, regardless of wins.
    pub fn same_identity(&self, other: &Player) -> bool {
        self.name == other.name && self.marker == other.marker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_has_no_wins() {
        let player = Player::new("Ada", SpaceValue::MarkerA).unwrap();
        assert_eq!(player.name(), "Ada");
        assert_eq!(player.marker(), SpaceValue::MarkerA);
        assert_eq!(player.total_wins(), 0);
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = Player::new("", SpaceValue::MarkerA).unwrap_err();
        assert_eq!(err.kind(), GameErrorKind::NullArgument);
    }

    #[test]
    fn test_available_marker_rejected() {
        let err = Player::new("Ada", SpaceValue::Available).unwrap_err();
        assert_eq!(err.kind(), GameErrorKind::MarkerReservedValue);
    }

    #[test]
    fn test_wins_count_and_clear() {
        let mut player = Player::new("Ada", SpaceValue::MarkerB).unwrap();
        player.won_game();
        player.won_game();
        assert_eq!(player.total_wins(), 2);
        player.clear_total_wins();
        assert_eq!(player.total_wins(), 0);
    }

    #[test]
    fn test_deserialize_keeps_wins() {
        let player: Player =
            serde_json::from_str(r#"{"name":"Ada","marker":"MarkerB","total_wins":3}"#).unwrap();
        assert_eq!(player.name(), "Ada");
        assert_eq!(player.marker(), SpaceValue::MarkerB);
        assert_eq!(player.total_wins(), 3);
    }

    #[test]
    fn test_deserialize_rejects_invalid_player() {
        let available = r#"{"name":"Ghost","marker":"Available","total_wins":0}"#;
        let err = serde_json::from_str::<Player>(available).unwrap_err();
        assert!(err.to_string().contains("available is not a player marker"));

        let unnamed = r#"{"name":"","marker":"MarkerA","total_wins":0}"#;
        let err = serde_json::from_str::<Player>(unnamed).unwrap_err();
        assert!(err.to_string().contains("required argument missing"));
    }

    #[test]
    fn test_identity_ignores_wins() {
        let mut a = Player::new("Ada", SpaceValue::MarkerA).unwrap();
        let b = a.clone();
        a.won_game();
        assert!(a.same_identity(&b));
        assert_ne!(a, b);
    }
}
