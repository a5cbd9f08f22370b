//! Domain Services
//!
//! Pure domain rules for ownership and listing order.

use std::cmp::Ordering;

use kernel::id::UserId;

use crate::domain::entities::Feature;

/// Ownership gate: only the recorded creator may mutate a feature
///
/// `owner` must come from the store, never from the request.
pub fn is_owner(requester: UserId, owner: UserId) -> bool {
    requester == owner
}

/// Listing order: vote count desc, then created_at desc, then id desc
///
/// Total: two distinct features never compare equal.
pub fn ranking_order(a: &Feature, b: &Feature) -> Ordering {
    b.vote_count
        .cmp(&a.vote_count)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
}

/// Sort features into listing order
pub fn rank(features: &mut [Feature]) {
    features.sort_by(ranking_order);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn feature(id: i64, votes: i64, minutes: i64) -> Feature {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Feature {
            id: id.into(),
            title: format!("f{id}"),
            description: "d".into(),
            created_by: 1.into(),
            created_by_username: None,
            vote_count: votes,
            created_at: base + Duration::minutes(minutes),
            updated_at: base,
        }
    }

    fn ids(features: &[Feature]) -> Vec<i64> {
        features.iter().map(|f| f.id.as_i64()).collect()
    }

    #[test]
    fn test_is_owner() {
        assert!(is_owner(7.into(), 7.into()));
        assert!(!is_owner(7.into(), 8.into()));
    }

    #[test]
    fn test_more_votes_first() {
        let mut list = vec![feature(1, 0, 0), feature(2, 3, 0), feature(3, 1, 0)];
        rank(&mut list);
        assert_eq!(ids(&list), [2, 3, 1]);
    }

    #[test]
    fn test_newer_first_on_equal_votes() {
        let mut list = vec![feature(1, 2, 0), feature(2, 2, 10), feature(3, 2, 5)];
        rank(&mut list);
        assert_eq!(ids(&list), [2, 3, 1]);
    }

    #[test]
    fn test_id_breaks_exact_ties() {
        let mut list = vec![feature(4, 1, 0), feature(9, 1, 0), feature(6, 1, 0)];
        rank(&mut list);
        assert_eq!(ids(&list), [9, 6, 4]);
    }

    #[test]
    fn test_order_is_total() {
        let a = feature(1, 1, 0);
        let b = feature(2, 1, 0);
        assert_ne!(ranking_order(&a, &b), Ordering::Equal);
        assert_eq!(ranking_order(&a, &a), Ordering::Equal);
    }
}
