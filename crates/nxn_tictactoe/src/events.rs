//! Game-state-changed notifications.
//!
//! Listeners are called in-line, in registration order, before the
//! triggering `new_game` or `make_move` call returns.

use crate::board::{Coordinate, SpaceValue};
use crate::rules::GameState;
use serde::{Deserialize, Serialize};

/// Payload delivered to every listener when the game state changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateChanged {
    /// Classification after the change.
    pub state: GameState,
    /// Name of the player whose turn it now is.
    pub current_player: String,
    /// Marker of the player whose turn it now is.
    pub current_marker: SpaceValue,
    /// Space taken by the move that caused the change; `None` for a new game.
    pub last_move: Option<Coordinate>,
}

/// Receives game-state-changed notifications.
///
/// Implemented for any `FnMut(&GameStateChanged)` closure.
pub trait GameStateListener {
    /// Called once per change.
    fn game_state_changed(&mut self, change: &GameStateChanged);
}

impl<F> GameStateListener for F
where
    F: FnMut(&GameStateChanged),
{
    fn game_state_changed(&mut self, change: &GameStateChanged) {
        self(change)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

/// Ordered list of registered listeners.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Box<dyn GameStateListener>)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Box<dyn GameStateListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(&mut self, change: &GameStateChanged) {
        for (_, listener) in self.entries.iter_mut() {
            listener.game_state_changed(change);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
