//! Final standings and game result.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Team, TeamId};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single team with the top score.
    Winner(TeamId),
    /// Several teams share the top score.
    Tie(Vec<TeamId>),
}

impl GameResult {
    /// Check if a team won (alone or shared).
    #[must_use]
    pub fn is_winner(&self, team: TeamId) -> bool {
        match self {
            GameResult::Winner(t) => *t == team,
            GameResult::Tie(ts) => ts.contains(&team),
        }
    }
}

/// One row of the ranking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based competition rank; equal scores share a rank.
    pub rank: usize,
    /// The team at this position.
    pub team: Team,
}

/// Teams ordered by score, highest first.
///
/// Ties keep turn order and share a rank; the following rank skips
/// (1, 1, 3).
#[must_use]
pub fn standings(teams: &Vector<Team>) -> Vec<Standing> {
    let mut sorted: Vec<Team> = teams.iter().cloned().collect();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));

    let mut out: Vec<Standing> = Vec::with_capacity(sorted.len());
    for (position, team) in sorted.into_iter().enumerate() {
        let rank = match out.last() {
            Some(prev) if prev.team.score == team.score => prev.rank,
            _ => position + 1,
        };
        out.push(Standing { rank, team });
    }
    out
}

/// Decide the winner from final scores. `None` when there are no teams.
#[must_use]
pub fn decide(teams: &Vector<Team>) -> Option<GameResult> {
    let best = teams.iter().map(|t| t.score).max()?;
    let mut leaders: Vec<TeamId> = teams
        .iter()
        .filter(|t| t.score == best)
        .map(|t| t.id)
        .collect();

    if leaders.len() == 1 {
        leaders.pop().map(GameResult::Winner)
    } else {
        Some(GameResult::Tie(leaders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams(scores: &[i64]) -> Vector<Team> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &s)| Team::new(TeamId::new(i as u32), format!("T{}", i)).with_score(s))
            .collect()
    }

    #[test]
    fn test_standings_order() {
        let rows = standings(&teams(&[3, 9, -1]));

        let ids: Vec<_> = rows.iter().map(|r| r.team.id.raw()).collect();
        let ranks: Vec<_> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ids, vec![1, 0, 2]);
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_standings_ties_share_rank() {
        let rows = standings(&teams(&[5, 7, 5, 7, 1]));

        let ids: Vec<_> = rows.iter().map(|r| r.team.id.raw()).collect();
        let ranks: Vec<_> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ids, vec![1, 3, 0, 2, 4]);
        assert_eq!(ranks, vec![1, 1, 3, 3, 5]);
    }

    #[test]
    fn test_decide_winner() {
        let result = decide(&teams(&[2, 8, 4])).unwrap();
        assert_eq!(result, GameResult::Winner(TeamId::new(1)));
        assert!(result.is_winner(TeamId::new(1)));
        assert!(!result.is_winner(TeamId::new(0)));
    }

    #[test]
    fn test_decide_tie() {
        let result = decide(&teams(&[6, 1, 6])).unwrap();
        assert_eq!(result, GameResult::Tie(vec![TeamId::new(0), TeamId::new(2)]));
        assert!(result.is_winner(TeamId::new(2)));
        assert!(!result.is_winner(TeamId::new(1)));
    }

    #[test]
    fn test_decide_empty() {
        assert_eq!(decide(&Vector::new()), None);
        assert!(standings(&Vector::new()).is_empty());
    }
}
