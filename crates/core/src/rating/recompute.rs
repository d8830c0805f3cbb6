//! Recompute target selection for rating mutations.

use uuid::Uuid;

/// Which property aggregates a rating mutation invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecomputeTargets {
    /// The property the rating points at after the mutation.
    pub current: Uuid,
    /// The property the rating pointed at before, when it was moved.
    /// Its aggregate would otherwise go stale until an unrelated write.
    pub previous: Option<Uuid>,
}

impl RecomputeTargets {
    /// Iterates the distinct property ids to recompute.
    pub fn iter(self) -> impl Iterator<Item = Uuid> {
        std::iter::once(self.current).chain(self.previous)
    }
}

/// Determines which properties need their average recomputed after an
/// update that moved a rating from `previous` to `current`.
///
/// When the rating stayed on the same property only that one is
/// returned; when it was reassigned, both old and new are.
#[must_use]
pub fn recompute_targets(previous: Uuid, current: Uuid) -> RecomputeTargets {
    RecomputeTargets {
        current,
        previous: (previous != current).then_some(previous),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_property_single_target() {
        let p = Uuid::new_v4();
        let targets = recompute_targets(p, p);
        assert_eq!(targets.current, p);
        assert_eq!(targets.previous, None);
        assert_eq!(targets.iter().count(), 1);
    }

    #[test]
    fn test_reassigned_rating_hits_both() {
        let old = Uuid::new_v4();
        let new = Uuid::new_v4();
        let targets = recompute_targets(old, new);
        assert_eq!(targets.current, new);
        assert_eq!(targets.previous, Some(old));
        let ids: Vec<Uuid> = targets.iter().collect();
        assert_eq!(ids, vec![new, old]);
    }
}
