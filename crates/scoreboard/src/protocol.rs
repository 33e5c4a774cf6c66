//! JSON bodies exchanged with the scoreboard service.

use serde::{Deserialize, Serialize};

/// Body of `POST /submit-score`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    #[serde(rename = "playerName")]
    pub player_name: String,
    pub score: u32,
}

/// One row of `GET /scoreboard`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreboardEntry {
    pub name: String,
    pub score: u32,
}

/// One row of `GET /leaderboard`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub name: String,
    pub score: u32,
    pub rank: u32,
}

/// Assign competition ranks to entries already sorted best first.
///
/// Equal scores share a rank; the next distinct score is ranked by its
/// 1-based position (100, 90, 90, 80 -> 1, 2, 2, 4).
pub fn rank_entries(entries: &[ScoreboardEntry]) -> Vec<RankedEntry> {
    let mut ranked = Vec::with_capacity(entries.len());
    let mut last: Option<(u32, u32)> = None;

    for (i, entry) in entries.iter().enumerate() {
        let rank = match last {
            Some((score, rank)) if score == entry.score => rank,
            _ => i as u32 + 1,
        };
        last = Some((entry.score, rank));
        ranked.push(RankedEntry {
            name: entry.name.clone(),
            score: entry.score,
            rank,
        });
    }

    ranked
}

/// Where a submitted score landed on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub name: String,
    pub score: u32,
    /// Competition rank, 1 is best
    pub rank: u32,
    pub total: u32,
    /// Share of the board at or below this rank, 100 for first place
    pub percentile: f64,
}

impl Placement {
    /// Locate `score` among `entries` (sorted best first).
    ///
    /// Returns None when the board is empty.
    pub fn locate(entries: &[ScoreboardEntry], name: &str, score: u32) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        let total = entries.len() as u32;
        let rank = entries.iter().filter(|e| e.score > score).count() as u32 + 1;
        let percentile = (1.0 - f64::from(rank - 1) / f64::from(total)) * 100.0;

        Some(Self {
            name: name.to_string(),
            score,
            rank,
            total,
            percentile,
        })
    }

    pub fn message(&self) -> String {
        format!(
            "Congrats {}, you are in the top {:.2}%, rank {} of {}",
            self.name, self.percentile, self.rank, self.total
        )
    }
}

/// Slice out 1-based page `page` of `page_size` rows (empty past the end)
pub fn page_of<T: Clone>(rows: &[T], page: usize, page_size: usize) -> Vec<T> {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size);
    rows.iter().skip(start).take(page_size).cloned().collect()
}

/// Parse a `page` query value; missing, non-numeric or < 1 means page 1
pub fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&p| p >= 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u32) -> ScoreboardEntry {
        ScoreboardEntry {
            name: name.to_string(),
            score,
        }
    }

    #[test]
    fn submission_uses_camel_case_name() {
        let json = serde_json::to_string(&ScoreSubmission {
            player_name: "ada".to_string(),
            score: 300,
        })
        .unwrap();
        assert_eq!(json, r#"{"playerName":"ada","score":300}"#);
    }

    #[test]
    fn competition_ranking() {
        let ranked = rank_entries(&[
            entry("a", 100),
            entry("b", 90),
            entry("c", 90),
            entry("d", 80),
        ]);
        let ranks: Vec<u32> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 2, 4]);
    }

    #[test]
    fn placement_rank_and_percentile() {
        let board = [entry("a", 500), entry("b", 300), entry("c", 300), entry("d", 100)];

        let top = Placement::locate(&board, "a", 500).unwrap();
        assert_eq!((top.rank, top.total), (1, 4));
        assert_eq!(top.percentile, 100.0);

        let tied = Placement::locate(&board, "c", 300).unwrap();
        assert_eq!(tied.rank, 2);
        assert_eq!(tied.percentile, 75.0);
        assert_eq!(tied.message(), "Congrats c, you are in the top 75.00%, rank 2 of 4");

        let last = Placement::locate(&board, "d", 100).unwrap();
        assert_eq!(last.rank, 4);
        assert_eq!(last.percentile, 25.0);
    }

    #[test]
    fn placement_needs_entries() {
        assert_eq!(Placement::locate(&[], "ada", 100), None);
    }

    #[test]
    fn paging() {
        let rows: Vec<u32> = (1..=12).collect();
        assert_eq!(page_of(&rows, 1, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_of(&rows, 3, 5), vec![11, 12]);
        assert!(page_of(&rows, 4, 5).is_empty());
        assert_eq!(page_of(&rows, 0, 5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn page_parsing() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-2")), 1);
        assert_eq!(parse_page(Some("3")), 3);
    }
}
