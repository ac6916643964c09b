//! Ranking: order analysed assets by score and keep the top N.

use crate::domain::Signal;

/// Anything that can be ordered by a signal score.
pub trait Ranked {
    fn rank_score(&self) -> i32;
}

impl Ranked for Signal {
    fn rank_score(&self) -> i32 {
        self.score
    }
}

/// Sort by descending score and truncate to `top_n`.
///
/// The sort is stable: equal scores keep their input order.
pub fn rank<T: Ranked>(mut items: Vec<T>, top_n: usize) -> Vec<T> {
    items.sort_by_key(|item| std::cmp::Reverse(item.rank_score()));
    items.truncate(top_n);
    items
}
