//! The fruit catalog: the game's merge-order reference.
//!
//! Ranks are contiguous indices into a fixed table ordered by strictly
//! increasing radius. Merging two pieces of rank `r` produces one piece of
//! rank `r + 1`; the last entry is terminal and never grows.

/// One catalog entry. Defined once at startup, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FruitSpec {
    /// Index into [`FRUITS`].
    pub rank: u8,
    /// Collision radius in pixels.
    pub radius: f32,
    /// Visual identity, used to derive the sprite name.
    pub name: &'static str,
}

impl FruitSpec {
    /// Sprite file name for the presentation layer.
    pub fn texture(&self) -> String {
        format!("{}.png", self.name)
    }
}

/// The full merge chain, smallest to largest.
pub const FRUITS: [FruitSpec; 11] = [
    FruitSpec { rank: 0, radius: 16.5, name: "cherry" },
    FruitSpec { rank: 1, radius: 24.0, name: "strawberry" },
    FruitSpec { rank: 2, radius: 30.5, name: "grape" },
    FruitSpec { rank: 3, radius: 34.5, name: "dekopon" },
    FruitSpec { rank: 4, radius: 44.5, name: "apple" },
    FruitSpec { rank: 5, radius: 57.0, name: "pear" },
    FruitSpec { rank: 6, radius: 64.5, name: "peach" },
    FruitSpec { rank: 7, radius: 78.0, name: "pineapple" },
    FruitSpec { rank: 8, radius: 88.5, name: "melon" },
    FruitSpec { rank: 9, radius: 110.0, name: "whole_melon" },
    FruitSpec { rank: 10, radius: 129.5, name: "watermelon" },
];

/// Look up a rank. `None` past the end of the table is the terminal
/// "biggest fruit" signal, not an error.
pub fn get(rank: u8) -> Option<&'static FruitSpec> {
    FRUITS.get(rank as usize)
}

/// The highest defined rank.
pub fn max_rank() -> u8 {
    (FRUITS.len() - 1) as u8
}

/// Whether merging at this rank stops growing. Derived from the true table
/// length so it can never drift out of sync with [`FRUITS`].
pub fn is_max_rank(rank: u8) -> bool {
    rank as usize == FRUITS.len() - 1
}
