//! Aggregator: folds partial updates into the conversation state.
//!
//! Merge rules are declared once in [`MERGE_TABLE`]:
//!
//! | Field | Strategy |
//! |-------|----------|
//! | `profile`, `calendar`, `tasks` | deep merge, later key wins |
//! | `results` | insert by agent name, first entry kept |
//! | `message_history` | append (driver only, never from agents) |

use crate::output::PartialUpdate;
use crate::state::{ConversationState, Message, Record};
use serde_json::Value;

/// Conversation state fields that updates can touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateField {
    MessageHistory,
    Profile,
    Calendar,
    Tasks,
    Results,
}

/// How a field combines with incoming data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Mappings merge key by key, recursively; the later value wins on conflict
    DeepMerge,
    /// Sequences are extended
    Append,
    /// The incoming value replaces the current one
    LastWriteWins,
    /// One entry per agent, keyed by agent name
    InsertByAgent,
}

pub const MERGE_TABLE: &[(StateField, MergeStrategy)] = &[
    (StateField::MessageHistory, MergeStrategy::Append),
    (StateField::Profile, MergeStrategy::DeepMerge),
    (StateField::Calendar, MergeStrategy::DeepMerge),
    (StateField::Tasks, MergeStrategy::DeepMerge),
    (StateField::Results, MergeStrategy::InsertByAgent),
];

pub fn strategy_for(field: StateField) -> MergeStrategy {
    MERGE_TABLE
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, s)| *s)
        .unwrap_or(MergeStrategy::LastWriteWins)
}

/// Recursively merge `fragment` into `base`.
pub fn deep_merge(base: &mut Record, fragment: &Record) {
    for (key, incoming) in fragment {
        match (base.get_mut(key), incoming) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                deep_merge(existing, incoming);
            }
            _ => {
                base.insert(key.clone(), incoming.clone());
            }
        }
    }
}

/// Combine a mapping fragment into a mapping field.
fn merge_record(strategy: MergeStrategy, target: &mut Record, fragment: &Record) {
    if fragment.is_empty() {
        return;
    }
    match strategy {
        MergeStrategy::DeepMerge => deep_merge(target, fragment),
        MergeStrategy::LastWriteWins => *target = fragment.clone(),
        MergeStrategy::Append => {
            for (key, incoming) in fragment {
                match (target.get_mut(key), incoming) {
                    (Some(Value::Array(existing)), Value::Array(items)) => {
                        existing.extend(items.iter().cloned());
                    }
                    _ => {
                        target.insert(key.clone(), incoming.clone());
                    }
                }
            }
        }
        MergeStrategy::InsertByAgent => {
            for (key, incoming) in fragment {
                target.entry(key.clone()).or_insert_with(|| incoming.clone());
            }
        }
    }
}

/// Outputs are never mutated once merged, so an agent's first entry stays.
fn insert_result(strategy: MergeStrategy, state: &mut ConversationState, update: &PartialUpdate) {
    match strategy {
        MergeStrategy::InsertByAgent => {
            state
                .results
                .entry(update.agent)
                .or_insert_with(|| update.output.clone());
        }
        _ => {
            state.results.insert(update.agent, update.output.clone());
        }
    }
}

/// Apply one update to the state.
pub fn apply(state: &mut ConversationState, update: &PartialUpdate) {
    for &(field, strategy) in MERGE_TABLE {
        match field {
            StateField::Profile => merge_record(strategy, &mut state.profile, &update.profile),
            StateField::Calendar => merge_record(strategy, &mut state.calendar, &update.calendar),
            StateField::Tasks => merge_record(strategy, &mut state.tasks, &update.tasks),
            StateField::Results => insert_result(strategy, state, update),
            // Agents never write history
            StateField::MessageHistory => {}
        }
    }
}

/// Merge a batch of updates into `base`.
///
/// Updates are applied in agent-name order regardless of the order they
/// arrive in, so concurrent completion order never changes the result.
pub fn merge(mut base: ConversationState, mut updates: Vec<PartialUpdate>) -> ConversationState {
    updates.sort_by_key(|u| u.agent);
    for update in &updates {
        apply(&mut base, update);
    }
    base
}

/// Append the synthesized reply; the only history write of a turn.
pub fn append_reply(state: &mut ConversationState, reply: impl Into<String>) {
    state.push_message(Message::assistant(reply));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentName;
    use crate::output::{AdviceSet, AgentOutput, FailureKind, RankedAction, SchedulePlan, TimeBlock};
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn planner_update() -> PartialUpdate {
        PartialUpdate::complete(
            AgentName::Planner,
            AgentOutput::Schedule(
                SchedulePlan::new("plan").with_block(TimeBlock::new("09:00", "10:00", "Read")),
            ),
        )
        .with_calendar(record(json!({"planner_analysis": {"free": "Tue PM"}})))
    }

    fn advisor_update() -> PartialUpdate {
        PartialUpdate::complete(
            AgentName::Advisor,
            AgentOutput::Advice(AdviceSet {
                summary: String::new(),
                actions: vec![RankedAction {
                    rank: 1,
                    action: "Sleep".to_string(),
                    rationale: String::new(),
                }],
            }),
        )
        .with_profile(record(json!({"advisor_notes": "rest more"})))
    }

    fn base() -> ConversationState {
        ConversationState::new(
            record(json!({"name": "Ada", "learning_preferences": {"learning_style": "visual"}})),
            record(json!({"events": []})),
            record(json!({"tasks": []})),
        )
    }

    #[test]
    fn test_deep_merge_nested() {
        let mut base = record(json!({"a": {"x": 1, "y": 2}, "b": 1}));
        deep_merge(&mut base, &record(json!({"a": {"y": 3, "z": 4}, "c": [1]})));
        assert_eq!(
            Value::Object(base),
            json!({"a": {"x": 1, "y": 3, "z": 4}, "b": 1, "c": [1]})
        );
    }

    #[test]
    fn test_deep_merge_later_scalar_wins() {
        let mut base = record(json!({"a": {"x": 1}}));
        deep_merge(&mut base, &record(json!({"a": "flat"})));
        assert_eq!(Value::Object(base), json!({"a": "flat"}));
    }

    #[test]
    fn test_merge_inserts_results_and_fragments() {
        let merged = merge(base(), vec![planner_update(), advisor_update()]);
        assert!(merged.results.contains_key(&AgentName::Planner));
        assert!(merged.results.contains_key(&AgentName::Advisor));
        assert!(!merged.results.contains_key(&AgentName::NoteWriter));
        assert_eq!(merged.calendar["planner_analysis"]["free"], "Tue PM");
        assert_eq!(merged.profile["advisor_notes"], "rest more");
        assert_eq!(merged.profile["name"], "Ada");
        assert!(merged.message_history.is_empty());
    }

    #[test]
    fn test_disjoint_updates_commute() {
        let one_then_two = merge(merge(base(), vec![planner_update()]), vec![advisor_update()]);
        let two_then_one = merge(merge(base(), vec![advisor_update()]), vec![planner_update()]);
        assert_eq!(one_then_two, two_then_one);
    }

    #[test]
    fn test_batch_order_does_not_matter() {
        let conflicting = PartialUpdate::degraded(AgentName::NoteWriter, FailureKind::Transient, "x")
            .with_calendar(record(json!({"planner_analysis": {"free": "never"}})));
        let a = merge(base(), vec![planner_update(), conflicting.clone()]);
        let b = merge(base(), vec![conflicting, planner_update()]);
        assert_eq!(a, b);
        // PLANNER sorts after NOTEWRITER, so its fragment is applied last
        assert_eq!(a.calendar["planner_analysis"]["free"], "Tue PM");
    }

    #[test]
    fn test_reapplying_same_update_is_idempotent() {
        let once = merge(base(), vec![planner_update()]);
        let twice = merge(once.clone(), vec![planner_update()]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merged_result_is_not_replaced() {
        let merged = merge(base(), vec![planner_update()]);
        let retry = PartialUpdate::degraded(AgentName::Planner, FailureKind::Transient, "late");
        let merged = merge(merged, vec![retry]);
        assert!(!merged.results[&AgentName::Planner].is_fallback());
        assert_eq!(merged.results.len(), 1);
    }

    #[test]
    fn test_strategy_table() {
        assert_eq!(strategy_for(StateField::Results), MergeStrategy::InsertByAgent);
        assert_eq!(strategy_for(StateField::Profile), MergeStrategy::DeepMerge);
        assert_eq!(strategy_for(StateField::MessageHistory), MergeStrategy::Append);
    }

    #[test]
    fn test_append_and_last_write_wins_records() {
        let mut target = record(json!({"log": [1], "k": "old"}));
        merge_record(MergeStrategy::Append, &mut target, &record(json!({"log": [2]})));
        assert_eq!(target["log"], json!([1, 2]));
        merge_record(MergeStrategy::LastWriteWins, &mut target, &record(json!({"k": "new"})));
        assert_eq!(Value::Object(target), json!({"k": "new"}));
    }

    #[test]
    fn test_append_reply() {
        let mut state = base();
        append_reply(&mut state, "done");
        assert_eq!(state.message_history.len(), 1);
        assert!(!state.message_history[0].is_user());
    }
}
