//! Capacity model: derived member loads.
//!
//! Loads are always recomputed from the authoritative task set rather than
//! cached across calls, so counts cannot drift from the tasks they describe.

use std::collections::HashMap;

use crate::core::model::{MemberId, Task, Team};

/// Count each member's active assigned tasks.
///
/// The result has an entry for every member of the team, including members
/// with zero active tasks. `Done` tasks never count; unassigned tasks and
/// tasks referencing unknown or foreign members contribute to nobody.
pub fn compute_loads(team: &Team, tasks: &[Task]) -> HashMap<MemberId, u32> {
    let mut loads: HashMap<MemberId, u32> = team.members.iter().map(|m| (m.id, 0)).collect();
    for task in tasks {
        if !task.is_active() {
            continue;
        }
        if let Some(member_id) = task.assigned_member_id {
            if let Some(count) = loads.get_mut(&member_id) {
                *count += 1;
            }
        }
    }
    loads
}
