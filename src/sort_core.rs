use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A unit's color. 0-based and dense up to the configured color count.
pub type ColorId = u8;

/// An ordered stack of colored units. The last element is the top of the
/// tube, the only end units are removed from or added onto.
pub type Tube = Vec<ColorId>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("tubeHeight must be at least 1")]
    ZeroTubeHeight,
    #[error("colorCount {0} exceeds the 256 distinct colors a unit can encode")]
    TooManyColors(usize),
    #[error("tubeCount {tube_count} is less than colorCount + emptyTubes ({required})")]
    TooFewTubes { tube_count: usize, required: usize },
}

/// Fixed shape of one puzzle. Immutable for the lifetime of a level; every
/// color is guaranteed exactly `tube_height` units across the puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    pub tube_count: usize,
    pub tube_height: usize,
    pub color_count: usize,
    pub empty_tubes: usize,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            tube_count: 8,
            tube_height: 4,
            color_count: 6,
            empty_tubes: 2,
        }
    }
}

impl LevelConfig {
    /// Check the configuration invariants before handing the config to the
    /// generator. Tubes beyond `color_count + empty_tubes` are legal and
    /// become extra empty tubes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tube_height == 0 {
            return Err(ConfigError::ZeroTubeHeight);
        }
        if self.color_count > ColorId::MAX as usize + 1 {
            return Err(ConfigError::TooManyColors(self.color_count));
        }
        let required = self.color_count.saturating_add(self.empty_tubes);
        if self.tube_count < required {
            return Err(ConfigError::TooFewTubes {
                tube_count: self.tube_count,
                required,
            });
        }
        Ok(())
    }
}

/// Whether transferring the top unit of `from` onto `to` is a legal player
/// move: distinct in-range tubes, non-empty source, destination below
/// capacity, and destination empty or matching the source's top color.
///
/// Total over all inputs; out-of-range indices evaluate false.
pub fn can_move(state: &[Tube], from: usize, to: usize, tube_height: usize) -> bool {
    if from == to {
        return false;
    }
    let (Some(src), Some(dst)) = (state.get(from), state.get(to)) else {
        return false;
    };
    let Some(&unit) = src.last() else {
        return false;
    };
    if dst.len() >= tube_height {
        return false;
    }
    match dst.last() {
        None => true,
        Some(&top) => top == unit,
    }
}

/// Transfer the top unit of `from` onto `to`. Legality is the caller's
/// responsibility; an empty source or out-of-range index is a no-op.
pub fn apply_move(state: &mut [Tube], from: usize, to: usize) {
    if from >= state.len() || to >= state.len() {
        return;
    }
    let Some(unit) = state[from].pop() else {
        return;
    };
    state[to].push(unit);
}

/// A puzzle is solved when every tube is empty or a uniform-color run of
/// exactly `tube_height` units.
pub fn is_solved(state: &[Tube], tube_height: usize) -> bool {
    state.iter().all(|tube| {
        tube.is_empty() || (tube.len() == tube_height && tube.iter().all(|&unit| unit == tube[0]))
    })
}

/// A fully independent copy sharing no tube buffers with the original, for
/// undo/history snapshots.
pub fn deep_clone(state: &[Tube]) -> Vec<Tube> {
    state.to_vec()
}
