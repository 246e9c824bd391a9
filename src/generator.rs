use serde::{Deserialize, Serialize};

use crate::sort_core::{ColorId, ConfigError, LevelConfig, Tube, apply_move};

pub const DEFAULT_SHUFFLE_MOVES: u32 = 250;

/// Reverse-move destinations are capped at this many units regardless of
/// tube height, limiting how deep any single tube gets scrambled before it
/// is revisited. Short tubes are additionally clamped to their capacity.
pub const SCRAMBLE_DEPTH_CAP: usize = 4;

/// One scrambling transfer applied by the generator, recorded in apply
/// order. Undoing the steps last-to-first restores the solved state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShuffleStep {
    pub from: usize,
    pub to: usize,
}

/// Builds guaranteed-solvable levels: start from the solved state and
/// scramble it with randomized reverse moves. Seeded, so the same seed,
/// config and shuffle budget always produce the same level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelGenerator {
    rng: Rng,
}

impl LevelGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::new(seed),
        }
    }

    pub fn generate(
        &mut self,
        cfg: &LevelConfig,
        shuffle_moves: u32,
    ) -> Result<Vec<Tube>, ConfigError> {
        self.generate_with_log(cfg, shuffle_moves)
            .map(|(state, _)| state)
    }

    /// Like [`Self::generate`], but also returns the applied shuffle steps.
    /// Transferring the top of `step.to` back onto `step.from`, last step
    /// first, replays the level back to solved.
    pub fn generate_with_log(
        &mut self,
        cfg: &LevelConfig,
        shuffle_moves: u32,
    ) -> Result<(Vec<Tube>, Vec<ShuffleStep>), ConfigError> {
        cfg.validate()?;
        let mut state = solved_state(cfg);
        let mut log = Vec::new();
        for _ in 0..shuffle_moves {
            // A step without candidates is skipped, not an error; it still
            // consumes shuffle budget.
            if let Some(step) = self.pick_reverse_move(&state, cfg.tube_height) {
                apply_move(&mut state, step.from, step.to);
                log.push(step);
            }
        }
        Ok((state, log))
    }

    /// Select one reverse move: a source whose top unit could plausibly
    /// have just been placed there by a player move (single unit, or top
    /// two units sharing a color), and any destination below the scramble
    /// depth cap. Both drawn uniformly from their candidate sets; the
    /// draws are independent, so source and destination may coincide.
    fn pick_reverse_move(&mut self, state: &[Tube], tube_height: usize) -> Option<ShuffleStep> {
        let depth_cap = SCRAMBLE_DEPTH_CAP.min(tube_height);
        let mut sources = Vec::new();
        let mut dests = Vec::new();
        for (index, tube) in state.iter().enumerate() {
            match tube.len() {
                1 => sources.push(index),
                n if n >= 2 && tube[n - 1] == tube[n - 2] => sources.push(index),
                _ => {}
            }
            if tube.len() < depth_cap {
                dests.push(index);
            }
        }
        if sources.is_empty() || dests.is_empty() {
            return None;
        }
        let from = sources[self.rng.pick(sources.len())];
        let to = dests[self.rng.pick(dests.len())];
        Some(ShuffleStep { from, to })
    }
}

/// The solved configuration: one fully-filled tube per color, then the
/// configured empty tubes, padded with further empties up to `tube_count`.
pub fn solved_state(cfg: &LevelConfig) -> Vec<Tube> {
    let mut state: Vec<Tube> = Vec::with_capacity(cfg.tube_count.max(cfg.color_count));
    for color in 0..cfg.color_count {
        state.push(vec![color as ColorId; cfg.tube_height]);
    }
    for _ in 0..cfg.empty_tubes {
        state.push(Tube::new());
    }
    while state.len() < cfg.tube_count {
        state.push(Tube::new());
    }
    state
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        let seed = if seed == 0 {
            0x9E37_79B9_7F4A_7C15
        } else {
            seed
        };
        Self { state: seed }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        (x.wrapping_mul(0x2545_F491_4F6C_DD1D) >> 32) as u32
    }

    fn pick(&mut self, upper: usize) -> usize {
        if upper == 0 {
            0
        } else {
            self.next_u32() as usize % upper
        }
    }
}
