//! Input controller: key events in, per-tick commands out.
//!
//! Key-down/key-up events arrive asynchronously; the tracker folds them
//! into a held-direction state that the tick loop samples once per step.
//! This replaces the original timer-per-direction scheme with one canonical
//! repeat rate for both directions.

/// Horizontal steering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDir {
    Left,
    Right,
}

/// The three keys the game listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Drop,
}

/// Input commands for a single tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Direction held this tick, if any.
    pub held: Option<MoveDir>,
    /// Release the active piece (one-shot).
    pub drop: bool,
}

/// Folds key events into per-tick input. First direction key wins: a second
/// direction pressed while one is held is ignored until the first is
/// released.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputTracker {
    held: Option<MoveDir>,
    drop_pending: bool,
}

impl InputTracker {
    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => {
                if self.held.is_none() {
                    self.held = Some(MoveDir::Left);
                }
            }
            Key::Right => {
                if self.held.is_none() {
                    self.held = Some(MoveDir::Right);
                }
            }
            Key::Drop => self.drop_pending = true,
        }
    }

    /// Unconditionally safe: releasing a key that is not held is a no-op.
    pub fn key_up(&mut self, key: Key) {
        match (key, self.held) {
            (Key::Left, Some(MoveDir::Left)) | (Key::Right, Some(MoveDir::Right)) => {
                self.held = None;
            }
            _ => {}
        }
    }

    /// Sample the input for one tick, consuming the drop one-shot.
    pub fn tick_input(&mut self) -> TickInput {
        let input = TickInput {
            held: self.held,
            drop: self.drop_pending,
        };
        self.drop_pending = false;
        input
    }
}
