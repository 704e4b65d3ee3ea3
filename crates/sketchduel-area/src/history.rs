//! Finished-match log and the leaderboard derived from it.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use sketchduel_game::GameSession;
use sketchduel_protocol::{Difficulty, HistoryEntry, PlayerId, PlayerScore, SessionId};

// ---------------------------------------------------------------------------
// MatchHistory
// ---------------------------------------------------------------------------

/// Append-only log with at most one entry per session id.
#[derive(Debug, Clone, Default)]
pub struct MatchHistory {
    entries: Vec<HistoryEntry>,
    recorded: HashSet<SessionId>,
}

impl MatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, session_id: SessionId) -> bool {
        self.recorded.contains(&session_id)
    }

    /// Appends the result of `session` if it is over and not yet recorded.
    /// Returns whether an entry was added.
    ///
    /// `name_of` resolves display names. A seat whose accuracy was never
    /// computed (the match ended by a leave) is recorded as `0.0`. Two
    /// participants sharing a display name collapse into one score.
    pub fn record(&mut self, session: &GameSession, name_of: impl Fn(PlayerId) -> String) -> bool {
        if !session.is_over() || self.contains(session.id()) {
            return false;
        }

        let mut scores = BTreeMap::new();
        let seats = [
            (session.player1(), session.player1_accuracy()),
            (session.player2(), session.player2_accuracy()),
        ];
        for (player, accuracy) in seats {
            let Some(player) = player else { continue };
            let score = PlayerScore {
                win: u8::from(session.winner() == Some(player)),
                accuracy: accuracy.unwrap_or(0.0),
            };
            scores.insert(name_of(player), score);
        }

        self.recorded.insert(session.id());
        self.entries.push(HistoryEntry {
            session_id: session.id(),
            difficulty: session.difficulty(),
            scores,
        });
        tracing::info!(session_id = %session.id(), entries = self.entries.len(), "match recorded");
        true
    }
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

/// One participant's record at one difficulty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub name: String,
    pub difficulty: Difficulty,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub best_accuracy: f64,
}

/// Aggregates `entries` per (display name, difficulty).
///
/// Rows are ordered by wins, most first, then by name and difficulty. An
/// entry in which nobody won counts as a tie for everyone in it.
pub fn leaderboard(entries: &[HistoryEntry]) -> Vec<LeaderboardRow> {
    let mut rows: BTreeMap<(String, Difficulty), LeaderboardRow> = BTreeMap::new();

    for entry in entries {
        let decided = entry.scores.values().any(|score| score.win > 0);
        for (name, score) in &entry.scores {
            let row = rows
                .entry((name.clone(), entry.difficulty))
                .or_insert_with(|| LeaderboardRow {
                    name: name.clone(),
                    difficulty: entry.difficulty,
                    wins: 0,
                    losses: 0,
                    ties: 0,
                    best_accuracy: score.accuracy,
                });
            match (decided, score.win > 0) {
                (false, _) => row.ties += 1,
                (true, true) => row.wins += 1,
                (true, false) => row.losses += 1,
            }
            row.best_accuracy = row.best_accuracy.max(score.accuracy);
        }
    }

    let mut rows: Vec<_> = rows.into_values().collect();
    // BTreeMap order already sorts by name then difficulty; stable sort keeps it.
    rows.sort_by(|a, b| b.wins.cmp(&a.wins));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchduel_game::{DifficultyCatalog, ShapeDealer, StaticShapeLibrary};
    use sketchduel_protocol::{Pixel, ShapeTitle};

    fn pid(id: u64) -> PlayerId {
        PlayerId(id)
    }

    fn names(player: PlayerId) -> String {
        match player.0 {
            1 => "Alice".to_string(),
            2 => "Bob".to_string(),
            _ => player.to_string(),
        }
    }

    fn dealer() -> ShapeDealer {
        let library = StaticShapeLibrary::new().with(
            ShapeTitle::Circle,
            [Pixel::new(0, 0), Pixel::new(1, 1), Pixel::new(2, 2)],
        );
        ShapeDealer::new(DifficultyCatalog::default(), library, |t: &[ShapeTitle]| t[0])
    }

    /// Two seated players; player 2 forfeits.
    fn forfeited(id: u64) -> GameSession {
        let mut d = dealer();
        let mut session = GameSession::new(SessionId(id), 10.0);
        session.join(pid(1), &mut d).unwrap();
        session.join(pid(2), &mut d).unwrap();
        session.leave(pid(2)).unwrap();
        session
    }

    fn entry(difficulty: Difficulty, scores: &[(&str, u8, f64)]) -> HistoryEntry {
        HistoryEntry {
            session_id: SessionId(0),
            difficulty,
            scores: scores
                .iter()
                .map(|(name, win, accuracy)| {
                    (name.to_string(), PlayerScore { win: *win, accuracy: *accuracy })
                })
                .collect(),
        }
    }

    // =====================================================================
    // MatchHistory
    // =====================================================================

    #[test]
    fn test_record_forfeit_uses_zero_accuracy() {
        let mut history = MatchHistory::new();

        assert!(history.record(&forfeited(1), names));

        let recorded = &history.entries()[0];
        assert_eq!(recorded.session_id, SessionId(1));
        assert_eq!(recorded.difficulty, Difficulty::Easy);
        assert_eq!(recorded.scores["Alice"], PlayerScore { win: 1, accuracy: 0.0 });
        assert_eq!(recorded.scores["Bob"], PlayerScore { win: 0, accuracy: 0.0 });
    }

    #[test]
    fn test_record_same_session_twice_appends_once() {
        let mut history = MatchHistory::new();
        let session = forfeited(1);

        assert!(history.record(&session, names));
        assert!(!history.record(&session, names));

        assert_eq!(history.len(), 1);
        assert!(history.contains(SessionId(1)));
    }

    #[test]
    fn test_record_unfinished_session_ignored() {
        let mut history = MatchHistory::new();
        let mut d = dealer();
        let mut session = GameSession::new(SessionId(1), 10.0);
        session.join(pid(1), &mut d).unwrap();

        assert!(!history.record(&session, names));
        assert!(history.is_empty());
        assert!(!history.contains(SessionId(1)));
    }

    #[test]
    fn test_record_falls_back_to_id_text() {
        let mut history = MatchHistory::new();
        let mut d = dealer();
        let mut session = GameSession::new(SessionId(4), 10.0);
        session.join(pid(7), &mut d).unwrap();
        session.join(pid(1), &mut d).unwrap();
        session.leave(pid(7)).unwrap();

        history.record(&session, names);

        let scores = &history.entries()[0].scores;
        assert_eq!(scores["P-7"].win, 0);
        assert_eq!(scores["Alice"].win, 1);
    }

    // =====================================================================
    // leaderboard()
    // =====================================================================

    #[test]
    fn test_leaderboard_counts_wins_losses_and_best_accuracy() {
        let entries = [
            entry(Difficulty::Easy, &[("Alice", 1, 0.5), ("Bob", 0, 0.25)]),
            entry(Difficulty::Easy, &[("Alice", 0, 0.75), ("Bob", 1, 0.9)]),
            entry(Difficulty::Easy, &[("Alice", 1, -0.5), ("Bob", 0, -1.0)]),
        ];

        let rows = leaderboard(&entries);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Alice");
        assert_eq!((rows[0].wins, rows[0].losses, rows[0].ties), (2, 1, 0));
        assert_eq!(rows[0].best_accuracy, 0.75);
        assert_eq!(rows[1].name, "Bob");
        assert_eq!((rows[1].wins, rows[1].losses, rows[1].ties), (1, 2, 0));
        assert_eq!(rows[1].best_accuracy, 0.9);
    }

    #[test]
    fn test_leaderboard_splits_by_difficulty() {
        let entries = [
            entry(Difficulty::Easy, &[("Alice", 1, 1.0), ("Bob", 0, 0.0)]),
            entry(Difficulty::Hard, &[("Alice", 0, 0.1), ("Bob", 1, 0.2)]),
        ];

        let rows = leaderboard(&entries);

        assert_eq!(rows.len(), 4);
        let alice_hard = rows
            .iter()
            .find(|r| r.name == "Alice" && r.difficulty == Difficulty::Hard)
            .unwrap();
        assert_eq!((alice_hard.wins, alice_hard.losses), (0, 1));
    }

    #[test]
    fn test_leaderboard_no_winner_is_tie() {
        let entries = [entry(Difficulty::Medium, &[("Alice", 0, 0.3), ("Bob", 0, 0.3)])];

        let rows = leaderboard(&entries);

        assert!(rows.iter().all(|r| r.ties == 1 && r.wins == 0 && r.losses == 0));
    }

    #[test]
    fn test_leaderboard_orders_by_wins_then_name() {
        let entries = [
            entry(Difficulty::Easy, &[("Zoe", 1, 0.0), ("Bob", 0, 0.0)]),
            entry(Difficulty::Easy, &[("Zoe", 1, 0.0), ("Amy", 0, 0.0)]),
        ];

        let names: Vec<_> = leaderboard(&entries).into_iter().map(|r| r.name).collect();

        assert_eq!(names, vec!["Zoe", "Amy", "Bob"]);
    }

    #[test]
    fn test_leaderboard_empty_history() {
        assert!(leaderboard(&[]).is_empty());
    }
}
