//! Assignment validator: membership and capacity checks for a proposed
//! (task, member) pairing.

use std::collections::HashMap;

use crate::core::model::{MemberId, Team};

/// Result of validating a proposed assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The assignment is within capacity (or clears the assignment).
    Accepted,
    /// The member is already at or over capacity. Advisory only: the caller
    /// decides whether to proceed; the engine never blocks on a warning.
    Warning(String),
    /// The member does not belong to the owning team. The only hard failure;
    /// it must block the write.
    Rejected(String),
}

/// Validate a proposed assignment against team membership and capacity.
///
/// `None` (unassigned) is always legal. Loads must be freshly computed by the
/// caller for the same team; stale counts are exactly the drift this engine
/// exists to avoid.
pub fn validate_assignment(
    team: &Team,
    member_id: Option<&MemberId>,
    loads: &HashMap<MemberId, u32>,
) -> Outcome {
    let Some(member_id) = member_id else {
        return Outcome::Accepted;
    };

    let Some(member) = team.member(member_id) else {
        return Outcome::Rejected(format!(
            "member {member_id} is not part of team {}",
            team.id
        ));
    };

    let current = loads.get(member_id).copied().unwrap_or(0);
    if current >= member.capacity {
        return Outcome::Warning(format!(
            "{} has {current} tasks but capacity is {}. Assign anyway?",
            member.name, member.capacity
        ));
    }

    Outcome::Accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Member, OwnerId};

    fn one_member_team(capacity: u32) -> (Team, MemberId) {
        let member = Member::new("Alice", "dev", capacity);
        let id = member.id;
        (Team::new(OwnerId::new(), "core", vec![member]), id)
    }

    #[test]
    fn unassigned_is_always_accepted() {
        let (team, _) = one_member_team(0);
        assert_eq!(validate_assignment(&team, None, &HashMap::new()), Outcome::Accepted);
    }

    #[test]
    fn under_capacity_is_accepted() {
        let (team, id) = one_member_team(2);
        let loads = HashMap::from([(id, 1)]);
        assert_eq!(validate_assignment(&team, Some(&id), &loads), Outcome::Accepted);
    }

    #[test]
    fn at_capacity_warns_with_product_message() {
        let (team, id) = one_member_team(2);
        let loads = HashMap::from([(id, 2)]);
        match validate_assignment(&team, Some(&id), &loads) {
            Outcome::Warning(msg) => {
                assert_eq!(msg, "Alice has 2 tasks but capacity is 2. Assign anyway?");
            }
            other => panic!("expected warning, got {other:?}"),
        }
    }

    #[test]
    fn non_member_is_rejected() {
        let (team, _) = one_member_team(2);
        let stranger = MemberId::new();
        assert!(matches!(
            validate_assignment(&team, Some(&stranger), &HashMap::new()),
            Outcome::Rejected(_)
        ));
    }
}
