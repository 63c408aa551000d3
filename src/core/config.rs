/// Number of aligned tokens needed to win.
pub const WIN_TARGET: usize = 4;

/// Marker the lobby server uses for an unoccupied cell.
pub const EMPTY_CELL: &str = " ";

/// Board height the lobby server allocates for a new lobby.
pub const DEFAULT_ROWS: usize = 15;
/// Board width the lobby server allocates for a new lobby.
pub const DEFAULT_COLS: usize = 15;

/// Time a player has to move before the turn passes, in milliseconds.
pub const MOVE_TIMEOUT_MS: u64 = 30_000;

/// Number of players that start a game; later joiners spectate.
pub const PLAYERS_PER_GAME: usize = 2;

/// Length of a client generated user id.
pub const USER_ID_LEN: usize = 8;
/// Characters a user id is drawn from.
pub const USER_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
