//! Age distribution aggregation over the full stored population.
//!
//! Single pass: each user falls into exactly one of four buckets, then
//! counts become percentages rounded to two decimal places.
//!
//! The bucket boundaries come from the original system and are kept as-is:
//! ages 20 and 40 are both inclusive in the second bucket, so the split is
//! `<20`, `[20,40]`, `(40,60]`, `>60`.

use crate::models::{AgeDistribution, StoredUser};

/// One of the four report buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBucket {
    Under20,
    From20To40,
    From40To60,
    Over60,
}

/// Classify an age into its bucket.
pub fn bucket_for(age: i32) -> AgeBucket {
    if age < 20 {
        AgeBucket::Under20
    } else if age <= 40 {
        AgeBucket::From20To40
    } else if age <= 60 {
        AgeBucket::From40To60
    } else {
        AgeBucket::Over60
    }
}

/// Compute the distribution report over all stored users.
///
/// An empty population yields [`AgeDistribution::empty`] rather than a
/// division by zero.
pub fn age_distribution(users: &[StoredUser]) -> AgeDistribution {
    if users.is_empty() {
        return AgeDistribution::empty();
    }

    let mut lt20 = 0usize;
    let mut between_20_and_40 = 0usize;
    let mut between_40_and_60 = 0usize;
    let mut gt60 = 0usize;

    for user in users {
        match bucket_for(user.age) {
            AgeBucket::Under20 => lt20 += 1,
            AgeBucket::From20To40 => between_20_and_40 += 1,
            AgeBucket::From40To60 => between_40_and_60 += 1,
            AgeBucket::Over60 => gt60 += 1,
        }
    }

    let total = users.len();
    AgeDistribution {
        total_users: total,
        lt20: percentage(lt20, total),
        between_20_and_40: percentage(between_20_and_40, total),
        between_40_and_60: percentage(between_40_and_60, total),
        gt60: percentage(gt60, total),
    }
}

/// count / total * 100, rounded to two decimal places.
fn percentage(count: usize, total: usize) -> f64 {
    let raw = (count as f64 / total as f64) * 100.0;
    (raw * 100.0).round() / 100.0
}
