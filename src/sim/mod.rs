//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Per-tick collision batches, resolved before the next step
//! - No rendering or platform dependencies

pub mod arena;
pub mod collision;
pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use input::{InputTracker, Key, MoveDir, TickInput};
pub use spawn::spawn_next;
pub use state::{ActivePiece, GameEvent, GamePhase, GameState};
pub use tick::tick;
