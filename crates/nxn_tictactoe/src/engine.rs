//! Turn sequencing for a two-player N×N game.
//!
//! The engine owns the current board and replaces it wholesale on every
//! accepted move. A rejected move leaves the board, the current player,
//! and the game state exactly as they were.

use crate::board::{BoardState, Coordinate, SpaceValue};
use crate::error::{GameError, GameErrorKind};
use crate::events::{GameStateChanged, GameStateListener, ListenerId, Listeners};
use crate::player::Player;
use crate::rules::{GameState, GameStateChecker};
use crate::segments::{Segment, ShapeFlags, WinPatternCatalog};
use crate::validator::MoveValidator;
use crate::{DEFAULT_BOARD_SIZE, MINIMUM_BOARD_SIZE};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// One of the two player slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    /// The first configured player.
    #[default]
    Player1,
    /// The second configured player.
    Player2,
}

impl Seat {
    /// Returns the other seat.
    pub fn other(self) -> Self {
        match self {
            Seat::Player1 => Seat::Player2,
            Seat::Player2 => Seat::Player1,
        }
    }

    fn index(self) -> usize {
        match self {
            Seat::Player1 => 0,
            Seat::Player2 => 1,
        }
    }
}

/// Collects construction parameters for a [`GameEngine`].
#[derive(Debug, Clone)]
pub struct GameEngineBuilder {
    player1: Option<Player>,
    player2: Option<Player>,
    starting_player: Option<Player>,
    board_size: usize,
    flags: ShapeFlags,
}

impl Default for GameEngineBuilder {
    fn default() -> Self {
        Self {
            player1: None,
            player2: None,
            starting_player: None,
            board_size: DEFAULT_BOARD_SIZE,
            flags: ShapeFlags::LINES_ONLY,
        }
    }
}

impl GameEngineBuilder {
    /// Sets the first player.
    pub fn player1(mut self, player: Player) -> Self {
        self.player1 = Some(player);
        self
    }

    /// Sets the second player.
    pub fn player2(mut self, player: Player) -> Self {
        self.player2 = Some(player);
        self
    }

    /// Sets who moves first. Defaults to the first player.
    pub fn starting_player(mut self, player: Player) -> Self {
        self.starting_player = Some(player);
        self
    }

    /// Sets the board size. Defaults to [`DEFAULT_BOARD_SIZE`].
    pub fn board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    /// Enables or disables diamond shapes.
    pub fn include_diamonds(mut self, include: bool) -> Self {
        self.flags.include_diamonds = include;
        self
    }

    /// Enables or disables square shapes.
    pub fn include_squares(mut self, include: bool) -> Self {
        self.flags.include_squares = include;
        self
    }

    /// Sets both shape flags at once.
    pub fn shapes(mut self, flags: ShapeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Validates the parameters and starts a new game.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - [`GameErrorKind::NullArgument`] if either player is missing.
    /// - [`GameErrorKind::DuplicateMarker`] if both players share a marker.
    /// - [`GameErrorKind::DuplicateName`] if both players share a name.
    /// - [`GameErrorKind::InvalidSize`] if the board size is below [`MINIMUM_BOARD_SIZE`].
    /// - [`GameErrorKind::InvalidStartingPlayer`] if the starting player is
    ///   neither configured player.
    #[instrument(skip(self), fields(board_size = self.board_size, flags = ?self.flags))]
    pub fn build(self) -> Result<GameEngine, GameError> {
        let player1 = self
            .player1
            .ok_or_else(|| GameError::new(GameErrorKind::NullArgument, "player1 is required"))?;
        let player2 = self
            .player2
            .ok_or_else(|| GameError::new(GameErrorKind::NullArgument, "player2 is required"))?;

        if player1.marker() == player2.marker() {
            return Err(GameError::new(
                GameErrorKind::DuplicateMarker,
                format!("both players use {:?}", player1.marker()),
            ));
        }
        if player1.name() == player2.name() {
            return Err(GameError::new(
                GameErrorKind::DuplicateName,
                format!("both players are named {}", player1.name()),
            ));
        }
        if self.board_size < MINIMUM_BOARD_SIZE {
            return Err(GameError::new(
                GameErrorKind::InvalidSize,
                format!(
                    "board size must be at least {}, got {}",
                    MINIMUM_BOARD_SIZE, self.board_size
                ),
            ));
        }

        let current = match &self.starting_player {
            None => Seat::Player1,
            Some(p) if p.same_identity(&player1) => Seat::Player1,
            Some(p) if p.same_identity(&player2) => Seat::Player2,
            Some(p) => {
                return Err(GameError::new(
                    GameErrorKind::InvalidStartingPlayer,
                    format!("{} is not playing", p.name()),
                ));
            }
        };

        let empty = BoardState::new(self.board_size)?;
        let mut engine = GameEngine {
            board: empty.clone(),
            empty,
            checker: GameStateChecker::new(self.board_size, self.flags)?,
            validator: MoveValidator::new(self.board_size)?,
            board_size: self.board_size,
            players: [player1, player2],
            current,
            state: GameState::New,
            winning: None,
            listeners: Listeners::default(),
        };

        info!(
            player1 = engine.players[0].name(),
            player2 = engine.players[1].name(),
            starting = engine.current_player().name(),
            "Created game engine"
        );

        engine.new_game();
        Ok(engine)
    }
}

/// Serializable view of an engine for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Side length of the board.
    pub board_size: usize,
    /// Space values in row-major order.
    pub values: Vec<SpaceValue>,
    /// Current classification.
    pub state: GameState,
    /// Seat whose turn it is.
    pub current: Seat,
    /// Both players, including win totals.
    pub players: [Player; 2],
}

/// Orchestrates turns, win detection, and notifications for one session.
///
/// Not meant for concurrent use: callers serialize `make_move` and
/// `new_game`. Boards handed out by [`GameEngine::board`] are immutable and
/// may be cloned and shared freely.
#[derive(Debug)]
pub struct GameEngine {
    players: [Player; 2],
    current: Seat,
    board_size: usize,
    board: BoardState,
    empty: BoardState,
    checker: GameStateChecker,
    validator: MoveValidator,
    state: GameState,
    winning: Option<Segment>,
    listeners: Listeners,
}

impl GameEngine {
    /// Starts building an engine.
    pub fn builder() -> GameEngineBuilder {
        GameEngineBuilder::default()
    }

    /// Creates an engine with player1 moving first and lines-only shapes.
    ///
    /// # Errors
    ///
    /// See [`GameEngineBuilder::build`].
    pub fn new(player1: Player, player2: Player, board_size: usize) -> Result<Self, GameError> {
        Self::builder()
            .player1(player1)
            .player2(player2)
            .board_size(board_size)
            .build()
    }

    /// Clears the board and sets the state to `New`.
    ///
    /// The current player carries over from the previous game, and win
    /// totals are kept.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.board = self.empty.clone();
        self.state = GameState::New;
        self.winning = None;
        info!(current = self.current_player().name(), "New game");
        self.notify(None);
    }

    /// Places the current player's marker at `(x, y)`.
    ///
    /// On success the board is replaced and classified. If the game is
    /// still in play the turn passes to the other player; on a win the
    /// mover keeps the turn and gains a win; on a cats game the mover keeps
    /// the turn. Listeners are notified before this returns.
    ///
    /// Moves are not refused in terminal states; gating them is up to the
    /// caller.
    ///
    /// # Errors
    ///
    /// - [`GameErrorKind::InvalidMove`] if the space is taken or the
    ///   resulting board fails transition validation.
    /// - [`GameErrorKind::OutOfRange`] if `(x, y)` is off the board.
    #[instrument(skip(self), fields(player = self.current_player().name()))]
    pub fn make_move(&mut self, x: usize, y: usize) -> Result<(), GameError> {
        let marker = self.current_player().marker();

        let next = self.board.take_space(marker, x, y).map_err(|e| {
            if e.is(GameErrorKind::SpaceNotAvailable) {
                warn!(x, y, "Space already taken");
                GameError::new(
                    GameErrorKind::InvalidMove,
                    format!("space ({}, {}) is already taken", x, y),
                )
            } else {
                e
            }
        })?;

        if !self.validator.move_was_valid(&self.board, &next)? {
            warn!(x, y, "Move failed transition validation");
            return Err(GameError::new(
                GameErrorKind::InvalidMove,
                format!("move at ({}, {}) is not a valid transition", x, y),
            ));
        }

        let (state, winning) = self.checker.classify(&next)?;
        self.winning = winning.cloned();
        self.board = next;
        self.state = state;

        match &self.state {
            GameState::Won(label) => {
                info!(winner = self.current_player().name(), segment = %label, "Game won");
                self.players[self.current.index()].won_game();
            }
            GameState::Cats => {
                info!("Cats game");
            }
            GameState::InPlay | GameState::New => {
                self.current = self.current.other();
                debug!(next = self.current_player().name(), "Turn passed");
            }
        }

        self.notify(Some(Coordinate::new(x, y)));
        Ok(())
    }

    /// Registers a listener; returns a handle for [`GameEngine::unsubscribe`].
    pub fn subscribe(&mut self, listener: impl GameStateListener + 'static) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    /// Returns the seat whose turn it is.
    pub fn current_seat(&self) -> Seat {
        self.current
    }

    /// Returns the first player.
    pub fn player1(&self) -> &Player {
        self.player(Seat::Player1)
    }

    /// Returns the second player.
    pub fn player2(&self) -> &Player {
        self.player(Seat::Player2)
    }

    /// Returns the player in `seat`.
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    /// Resets both players' win totals.
    pub fn clear_win_totals(&mut self) {
        for player in self.players.iter_mut() {
            player.clear_total_wins();
        }
    }

    /// Returns the board side length.
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Returns the current classification.
    pub fn current_game_state(&self) -> &GameState {
        &self.state
    }

    /// Returns the current board.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Iterates the current board's values in row-major order.
    pub fn board_values(&self) -> impl Iterator<Item = SpaceValue> + '_ {
        self.board.values()
    }

    /// Returns true if `(x, y)` is available on the current board.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::OutOfRange`] if `(x, y)` is off the board.
    pub fn space_available(&self, x: usize, y: usize) -> Result<bool, GameError> {
        self.board.is_available(x, y)
    }

    /// Returns the winning-segment catalog for this session.
    pub fn catalog(&self) -> &WinPatternCatalog {
        self.checker.catalog()
    }

    /// Labels of every segment covering `(x, y)`, in catalog order.
    pub fn segment_labels_containing(&self, x: usize, y: usize) -> Vec<&str> {
        self.catalog().segment_labels_containing(x, y)
    }

    /// The segment that won the current game, if any.
    pub fn winning_segment(&self) -> Option<&Segment> {
        self.winning.as_ref()
    }

    /// Coordinates of the winning segment, when the game is won.
    pub fn winning_coordinates(&self) -> Option<&[Coordinate]> {
        self.winning.as_ref().map(Segment::coordinates)
    }

    /// True if `(x, y)` belongs to the winning segment.
    pub fn is_winning_space(&self, x: usize, y: usize) -> bool {
        self.winning
            .as_ref()
            .is_some_and(|segment| segment.contains(x, y))
    }

    /// Captures a serializable view of the session.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board_size: self.board_size,
            values: self.board.values().collect(),
            state: self.state.clone(),
            current: self.current,
            players: self.players.clone(),
        }
    }

    fn notify(&mut self, last_move: Option<Coordinate>) {
        let current = self.current_player();
        let change = GameStateChanged {
            state: self.state.clone(),
            current_player: current.name().to_string(),
            current_marker: current.marker(),
            last_move,
        };
        debug!(listeners = self.listeners.len(), state = %change.state, "Notifying listeners");
        self.listeners.notify(&change);
    }
}
