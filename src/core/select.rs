//! Auto-assign selector: recommend the best member for an unassigned task.

use std::collections::HashMap;

use crate::core::model::{MemberId, Team};

/// Recommend an assignee for a new task.
///
/// Prefers the member with the lowest current load that is strictly below its
/// own capacity; ties go to the first such member in team order. When nobody
/// has free capacity, falls back to the member with the globally lowest load
/// so a task is always assignable — the fallback may overload, which is the
/// rebalancer's job to resolve. Capacity-0 members never receive tasks, so
/// a team whose members all have capacity 0 (or no members) yields `None`.
///
/// Never mutates state; it only recommends.
pub fn select_assignee(team: &Team, loads: &HashMap<MemberId, u32>) -> Option<MemberId> {
    let load_of = |id: &MemberId| loads.get(id).copied().unwrap_or(0);

    let mut best: Option<(MemberId, u32)> = None;
    for member in team.members.iter().filter(|m| load_of(&m.id) < m.capacity) {
        let load = load_of(&member.id);
        if best.is_none_or(|(_, b)| load < b) {
            best = Some((member.id, load));
        }
    }
    if let Some((id, _)) = best {
        return Some(id);
    }

    // Fallback: everyone is full. Pick the least-loaded member that can hold
    // work at all.
    let mut best: Option<(MemberId, u32)> = None;
    for member in team.members.iter().filter(|m| m.capacity > 0) {
        let load = load_of(&member.id);
        if best.is_none_or(|(_, b)| load < b) {
            best = Some((member.id, load));
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Member, OwnerId};

    fn team_of(members: Vec<Member>) -> Team {
        Team::new(OwnerId::new(), "core", members)
    }

    #[test]
    fn prefers_lowest_load_with_free_capacity() {
        let a = Member::new("Alice", "dev", 3);
        let b = Member::new("Bob", "dev", 3);
        let (a_id, b_id) = (a.id, b.id);
        let team = team_of(vec![a, b]);
        let loads = HashMap::from([(a_id, 2), (b_id, 1)]);

        assert_eq!(select_assignee(&team, &loads), Some(b_id));
    }

    #[test]
    fn ties_break_by_team_order() {
        let a = Member::new("Alice", "dev", 3);
        let b = Member::new("Bob", "dev", 3);
        let (a_id, b_id) = (a.id, b.id);
        let team = team_of(vec![a, b]);
        let loads = HashMap::from([(a_id, 1), (b_id, 1)]);

        assert_eq!(select_assignee(&team, &loads), Some(a_id));
    }

    #[test]
    fn full_member_with_lower_load_is_skipped() {
        // Alice is less loaded but full; Bob still has room.
        let a = Member::new("Alice", "dev", 1);
        let b = Member::new("Bob", "dev", 5);
        let (a_id, b_id) = (a.id, b.id);
        let team = team_of(vec![a, b]);
        let loads = HashMap::from([(a_id, 1), (b_id, 3)]);

        assert_eq!(select_assignee(&team, &loads), Some(b_id));
    }

    #[test]
    fn fallback_picks_globally_lowest_load_when_all_full() {
        let a = Member::new("Alice", "dev", 1);
        let b = Member::new("Bob", "dev", 2);
        let (a_id, b_id) = (a.id, b.id);
        let team = team_of(vec![a, b]);
        let loads = HashMap::from([(a_id, 1), (b_id, 2)]);

        assert_eq!(select_assignee(&team, &loads), Some(a_id));
    }

    #[test]
    fn capacity_zero_members_are_never_selected() {
        let a = Member::new("Alice", "observer", 0);
        let a_id = a.id;
        let team = team_of(vec![a]);
        let loads = HashMap::from([(a_id, 0)]);

        assert_eq!(select_assignee(&team, &loads), None);
    }

    #[test]
    fn empty_team_yields_none() {
        let team = team_of(vec![]);
        assert_eq!(select_assignee(&team, &HashMap::new()), None);
    }
}
