//! Fixed-size category frequency table.
//!
//! The vocabulary is closed and small, so a multiset of [`LogicToken`]s is an
//! array of counters indexed by [`LogicToken::index`]. No hashing and no
//! allocation.

use logic::LogicToken;

/// Per-category token counts (a multiset of [`LogicToken`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenCounts([usize; LogicToken::COUNT]);

impl TokenCounts {
    pub fn from_tokens(tokens: &[LogicToken]) -> Self {
        tokens.iter().copied().collect()
    }

    pub fn get(&self, token: LogicToken) -> usize {
        self.0[token.index()]
    }

    pub fn add(&mut self, token: LogicToken) {
        self.0[token.index()] += 1;
    }

    /// Consume one unit of `token` if any is left. Returns whether it did.
    pub fn take(&mut self, token: LogicToken) -> bool {
        let slot = &mut self.0[token.index()];
        if *slot > 0 {
            *slot -= 1;
            true
        } else {
            false
        }
    }

    /// Total number of tokens counted.
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// Σ min(self, other) over all categories.
    pub fn intersection_size(&self, other: &Self) -> usize {
        self.0.iter().zip(other.0.iter()).map(|(&a, &b)| a.min(b)).sum()
    }

    /// Σ max(self, other) over all categories.
    pub fn union_size(&self, other: &Self) -> usize {
        self.0.iter().zip(other.0.iter()).map(|(&a, &b)| a.max(b)).sum()
    }

    /// Categories with a non-zero count, in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (LogicToken, usize)> + '_ {
        LogicToken::ALL
            .iter()
            .map(|&t| (t, self.get(t)))
            .filter(|&(_, c)| c > 0)
    }
}

impl FromIterator<LogicToken> for TokenCounts {
    fn from_iter<I: IntoIterator<Item = LogicToken>>(iter: I) -> Self {
        let mut counts = TokenCounts::default();
        for token in iter {
            counts.add(token);
        }
        counts
    }
}
