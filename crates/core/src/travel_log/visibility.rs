//! Log visibility gating.
//!
//! Friendship storage lives outside this service; callers inject a
//! [`FriendshipOracle`].

use journey_shared::types::UserId;
use std::collections::HashSet;

use crate::travel_log::types::{PrivacyLevel, TravelLog};

/// Answers whether two users are friends.
pub trait FriendshipOracle: Send + Sync {
    /// Returns true if `requester` is a friend of `owner`.
    fn is_friend(&self, owner: UserId, requester: UserId) -> bool;
}

/// Oracle for deployments without a friendship graph. Nobody is a friend.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFriendships;

impl FriendshipOracle for NoFriendships {
    fn is_friend(&self, _owner: UserId, _requester: UserId) -> bool {
        false
    }
}

/// Fixed, symmetric set of friendships.
#[derive(Debug, Clone, Default)]
pub struct StaticFriendships {
    pairs: HashSet<(UserId, UserId)>,
}

impl StaticFriendships {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a friendship in both directions.
    #[must_use]
    pub fn with(mut self, a: UserId, b: UserId) -> Self {
        self.pairs.insert((a, b));
        self.pairs.insert((b, a));
        self
    }
}

impl FriendshipOracle for StaticFriendships {
    fn is_friend(&self, owner: UserId, requester: UserId) -> bool {
        self.pairs.contains(&(owner, requester))
    }
}

/// Returns true if `requester` may read `log`. `None` is an anonymous reader.
pub fn can_view(
    log: &TravelLog,
    requester: Option<UserId>,
    friendships: &dyn FriendshipOracle,
) -> bool {
    match (log.privacy_level, requester) {
        (PrivacyLevel::Public, _) => true,
        (_, None) => false,
        (_, Some(user)) if user == log.author_id => true,
        (PrivacyLevel::Friends, Some(user)) => friendships.is_friend(log.author_id, user),
        (PrivacyLevel::Private, Some(_)) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use journey_shared::types::{TravelLogId, TravelPlanId};
    use rstest::rstest;

    fn log(author: UserId, privacy_level: PrivacyLevel) -> TravelLog {
        TravelLog {
            id: TravelLogId::new(),
            plan_id: TravelPlanId::new(),
            itinerary_id: None,
            author_id: author,
            title: "Day one".to_string(),
            content: "Rain all day".to_string(),
            log_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            privacy_level,
            rating: None,
            location: None,
            latitude: None,
            longitude: None,
            weather: None,
            mood: None,
            images: vec![],
            tags: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[derive(Debug, Clone, Copy)]
    enum Reader {
        Author,
        Friend,
        Stranger,
        Anonymous,
    }

    #[rstest]
    #[case(PrivacyLevel::Private, Reader::Author, true)]
    #[case(PrivacyLevel::Private, Reader::Friend, false)]
    #[case(PrivacyLevel::Private, Reader::Stranger, false)]
    #[case(PrivacyLevel::Private, Reader::Anonymous, false)]
    #[case(PrivacyLevel::Friends, Reader::Author, true)]
    #[case(PrivacyLevel::Friends, Reader::Friend, true)]
    #[case(PrivacyLevel::Friends, Reader::Stranger, false)]
    #[case(PrivacyLevel::Friends, Reader::Anonymous, false)]
    #[case(PrivacyLevel::Public, Reader::Author, true)]
    #[case(PrivacyLevel::Public, Reader::Friend, true)]
    #[case(PrivacyLevel::Public, Reader::Stranger, true)]
    #[case(PrivacyLevel::Public, Reader::Anonymous, true)]
    fn test_visibility_matrix(
        #[case] privacy: PrivacyLevel,
        #[case] reader: Reader,
        #[case] visible: bool,
    ) {
        let author = UserId::new();
        let friend = UserId::new();
        let oracle = StaticFriendships::new().with(author, friend);
        let requester = match reader {
            Reader::Author => Some(author),
            Reader::Friend => Some(friend),
            Reader::Stranger => Some(UserId::new()),
            Reader::Anonymous => None,
        };
        assert_eq!(can_view(&log(author, privacy), requester, &oracle), visible);
    }

    #[test]
    fn test_no_friendships_hides_friends_logs() {
        let author = UserId::new();
        let entry = log(author, PrivacyLevel::Friends);
        assert!(!can_view(&entry, Some(UserId::new()), &NoFriendships));
        assert!(can_view(&entry, Some(author), &NoFriendships));
    }

    #[test]
    fn test_friendship_is_symmetric() {
        let a = UserId::new();
        let b = UserId::new();
        let oracle = StaticFriendships::new().with(a, b);
        assert!(oracle.is_friend(b, a));
        assert!(!oracle.is_friend(a, UserId::new()));
    }
}
