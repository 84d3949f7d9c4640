// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::grouping::CountBucket;

/// Orders items by a count, descending, and keeps at most `limit` of them.
///
/// The sort is stable: items with equal counts keep their original order,
/// so ranking an already-ranked list leaves it unchanged.
#[must_use]
pub fn rank_by<T, F>(mut items: Vec<T>, count_of: F, limit: Option<usize>) -> Vec<T>
where
    F: Fn(&T) -> usize,
{
    items.sort_by(|a, b| count_of(b).cmp(&count_of(a)));
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}

/// Ranks grouped counts, highest count first.
#[must_use]
pub fn rank_by_count(buckets: Vec<CountBucket>, limit: Option<usize>) -> Vec<CountBucket> {
    rank_by(buckets, |b| b.count, limit)
}
