//! Rebalancer: move movable tasks off overloaded members onto peers with
//! spare capacity.
//!
//! The pass is pure and deterministic: it reads a team plus its active task
//! set and returns the moves and audit entries it would apply, without
//! touching any store. Committing the moves is the engine's job.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::audit::AuditEntry;
use crate::core::load::compute_loads;
use crate::core::model::{Member, MemberId, Priority, Task, TaskId, Team};

/// One reassignment performed by a rebalance pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// The task that was moved.
    pub task_id: TaskId,
    /// Member the task was taken from.
    pub from: MemberId,
    /// Member the task was given to.
    pub to: MemberId,
}

/// Outcome of a rebalance pass: parallel lists of moves and their audit
/// entries (`entries[i]` describes `moves[i]`).
#[derive(Debug, Clone, Default)]
pub struct RebalancePass {
    /// Reassignments, in the order they were decided.
    pub moves: Vec<Move>,
    /// One audit entry per move.
    pub entries: Vec<AuditEntry>,
}

/// Plan a rebalance pass over one team.
///
/// Members are scanned in team order. A member whose load exceeds capacity
/// donates its movable tasks — active, assigned to it, and not `High`
/// priority — ordered lowest priority first, then oldest first, to the
/// recipient with the lowest live load strictly below its own capacity
/// (ties by team order, source excluded). Donation continues while a
/// recipient exists; recipients are only ever filled up to capacity, so a
/// pass never creates a new overload and a second pass over the result is a
/// no-op.
///
/// `Done` tasks are invisible to the pass; `High`-priority tasks are pinned.
/// A member left over capacity (all movable tasks High, or no recipients)
/// is not an error: the overload stays observable through
/// [`compute_loads`].
pub fn rebalance(team: &Team, tasks: &[Task]) -> RebalancePass {
    let mut loads = compute_loads(team, tasks);
    // Live view of assignments, updated as moves are decided.
    let mut assignee: HashMap<TaskId, MemberId> = tasks
        .iter()
        .filter(|t| t.is_active())
        .filter_map(|t| t.assigned_member_id.map(|m| (t.id, m)))
        .collect();

    let mut pass = RebalancePass::default();

    for member in &team.members {
        let load = loads.get(&member.id).copied().unwrap_or(0);
        if load <= member.capacity {
            continue;
        }
        tracing::debug!(
            member = %member.id,
            load,
            capacity = member.capacity,
            "member overloaded, draining movable tasks"
        );

        let mut movable: Vec<&Task> = tasks
            .iter()
            .filter(|t| {
                t.is_active()
                    && t.priority != Priority::High
                    && assignee.get(&t.id) == Some(&member.id)
            })
            .collect();
        movable.sort_by_key(|t| (t.priority, t.created_at_ms));

        for task in movable {
            let Some(recipient) = pick_recipient(team, &loads, member.id) else {
                tracing::warn!(
                    member = %member.id,
                    "no recipient with spare capacity; overload left unresolved"
                );
                break;
            };

            if let Some(count) = loads.get_mut(&member.id) {
                *count -= 1;
            }
            if let Some(count) = loads.get_mut(&recipient.id) {
                *count += 1;
            }
            assignee.insert(task.id, recipient.id);

            tracing::info!(
                task = %task.id,
                from = %member.id,
                to = %recipient.id,
                "task reassigned"
            );
            pass.entries.push(AuditEntry::new(
                format!(
                    "Task \"{}\" reassigned from {} to {}.",
                    task.title, member.name, recipient.name
                ),
                None,
            ));
            pass.moves.push(Move {
                task_id: task.id,
                from: member.id,
                to: recipient.id,
            });
        }
    }

    pass
}

/// Recipient with the lowest live load strictly below its capacity, excluding
/// the source; ties go to the first such member in team order. The strict `<`
/// means capacity-0 members never receive tasks.
fn pick_recipient<'a>(
    team: &'a Team,
    loads: &HashMap<MemberId, u32>,
    source: MemberId,
) -> Option<&'a Member> {
    let mut best: Option<(&Member, u32)> = None;
    for member in &team.members {
        if member.id == source {
            continue;
        }
        let load = loads.get(&member.id).copied().unwrap_or(0);
        if load < member.capacity && best.is_none_or(|(_, b)| load < b) {
            best = Some((member, load));
        }
    }
    best.map(|(member, _)| member)
}
