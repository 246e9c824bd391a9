use serde::{Deserialize, Serialize};

use crate::sort_core::{LevelConfig, Tube, apply_move, can_move, deep_clone, is_solved};

/// One puzzle in play: the tubes plus the undo history and move counter
/// the interaction layer reads. Owns its state exclusively; snapshots are
/// value copies, so undo never aliases live tubes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    config: LevelConfig,
    tubes: Vec<Tube>,
    history: Vec<Vec<Tube>>,
    moves: u32,
}

impl GameSession {
    pub fn new(config: LevelConfig, tubes: Vec<Tube>) -> Self {
        Self {
            config,
            tubes,
            history: Vec::new(),
            moves: 0,
        }
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn tubes(&self) -> &[Tube] {
        &self.tubes
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    pub fn can_move(&self, from: usize, to: usize) -> bool {
        can_move(&self.tubes, from, to, self.config.tube_height)
    }

    /// Apply a player move if legal. Snapshots the pre-move state for undo
    /// before mutating; an illegal request leaves everything untouched.
    pub fn try_move(&mut self, from: usize, to: usize) -> bool {
        if !self.can_move(from, to) {
            return false;
        }
        self.history.push(deep_clone(&self.tubes));
        apply_move(&mut self.tubes, from, to);
        self.moves = self.moves.saturating_add(1);
        true
    }

    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.history.pop() else {
            return false;
        };
        self.tubes = prev;
        self.moves = self.moves.saturating_sub(1);
        true
    }

    pub fn is_solved(&self) -> bool {
        is_solved(&self.tubes, self.config.tube_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_color_session() -> GameSession {
        let config = LevelConfig {
            tube_count: 4,
            tube_height: 4,
            color_count: 2,
            empty_tubes: 2,
        };
        let tubes = vec![vec![0, 0, 0, 1], vec![1, 1, 1, 0], vec![], vec![]];
        GameSession::new(config, tubes)
    }

    #[test]
    fn legal_move_is_applied_and_counted() {
        let mut session = two_color_session();
        assert!(session.try_move(0, 2));
        assert_eq!(session.tubes()[0], vec![0, 0, 0]);
        assert_eq!(session.tubes()[2], vec![1]);
        assert_eq!(session.moves(), 1);
        assert_eq!(session.history_depth(), 1);
    }

    #[test]
    fn illegal_move_leaves_session_untouched() {
        let mut session = two_color_session();
        assert!(!session.try_move(0, 0));
        assert!(!session.try_move(2, 3));
        assert!(!session.try_move(0, 1));
        assert_eq!(session.tubes()[0], vec![0, 0, 0, 1]);
        assert_eq!(session.moves(), 0);
        assert_eq!(session.history_depth(), 0);
    }

    #[test]
    fn undo_restores_previous_snapshot() {
        let mut session = two_color_session();
        let before = session.tubes().to_vec();
        assert!(session.try_move(0, 2));
        assert!(session.try_move(1, 2));
        assert_eq!(session.moves(), 2);

        assert!(session.undo());
        assert_eq!(session.tubes()[2], vec![1]);
        assert!(session.undo());
        assert_eq!(session.tubes(), before.as_slice());
        assert_eq!(session.moves(), 0);
        assert!(!session.undo());
    }

    #[test]
    fn solving_move_is_detected() {
        let config = LevelConfig {
            tube_count: 3,
            tube_height: 2,
            color_count: 1,
            empty_tubes: 2,
        };
        let mut session = GameSession::new(config, vec![vec![0], vec![0], vec![]]);
        assert!(!session.is_solved());
        assert!(session.try_move(1, 0));
        assert!(session.is_solved());
    }
}
