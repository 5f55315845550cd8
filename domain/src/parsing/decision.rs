//! Coordinator decision parsing.

use super::ParseError;
use super::json_block::extract_json_object;
use crate::agent::AgentName;
use crate::coordination::CoordinatorDecision;
use serde_json::Value;
use std::collections::BTreeMap;

/// Parse the Coordinator's response into a decision. Never fails.
///
/// A JSON object with decision fields wins. Otherwise the ReAct text is
/// scanned for agent keywords: the planner is always included, and when
/// the response carries both `Thought:` and `Decision:` sections, the
/// note writer is added for "NOTEWRITER"/"note" and the advisor for
/// "ADVISOR"/"guidance".
///
/// The full response text becomes `reasoning` unless the JSON supplies one.
pub fn parse_coordinator_response(response: &str) -> CoordinatorDecision {
    if let Some(json) = extract_json_object(response)
        && let Ok(mut decision) = parse_decision_json(&json)
    {
        if decision.reasoning.is_empty() {
            decision.reasoning = response.trim().to_string();
        }
        return decision;
    }

    keyword_decision(response)
}

/// Parse a decision from a JSON object.
///
/// Missing fields are defaulted rather than rejected:
/// - `required_agents` → names from `concurrent_groups`, else `["PLANNER"]`
/// - `priority` → position in `required_agents`
/// - `concurrent_groups` → one group holding every required agent
/// - `reasoning` → empty
///
/// Fields present with the wrong shape are [`ParseError::Invalid`].
pub fn parse_decision_json(json: &Value) -> Result<CoordinatorDecision, ParseError> {
    let obj = json
        .as_object()
        .ok_or(ParseError::NotFound("coordinator decision"))?;

    if !obj.contains_key("required_agents") && !obj.contains_key("concurrent_groups") {
        return Err(ParseError::NotFound("coordinator decision"));
    }

    let groups = match obj.get("concurrent_groups") {
        None | Some(Value::Null) => None,
        Some(Value::Array(groups)) => Some(
            groups
                .iter()
                .map(|g| {
                    g.as_array()
                        .map(|names| string_items(names))
                        .ok_or_else(|| invalid("concurrent_groups must be a list of lists"))
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Some(_) => return Err(invalid("concurrent_groups must be a list")),
    };

    let required_agents = match obj.get("required_agents") {
        None | Some(Value::Null) => match &groups {
            Some(groups) => dedup(groups.iter().flatten().cloned()),
            None => vec![AgentName::Planner.as_str().to_string()],
        },
        Some(Value::Array(names)) => dedup(string_items(names).into_iter()),
        Some(_) => return Err(invalid("required_agents must be a list")),
    };

    let priority = match obj.get("priority").and_then(Value::as_object) {
        Some(map) => map
            .iter()
            .filter_map(|(name, p)| p.as_i64().map(|p| (name.clone(), p)))
            .collect(),
        None => default_priority(&required_agents),
    };

    let concurrent_groups = groups.unwrap_or_else(|| {
        if required_agents.is_empty() {
            Vec::new()
        } else {
            vec![required_agents.clone()]
        }
    });

    let reasoning = obj
        .get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(CoordinatorDecision {
        required_agents,
        priority,
        concurrent_groups,
        reasoning,
    })
}

fn keyword_decision(response: &str) -> CoordinatorDecision {
    let mut agents = vec![AgentName::Planner];

    if response.contains("Thought:") && response.contains("Decision:") {
        let lower = response.to_lowercase();
        if response.contains("NOTEWRITER") || lower.contains("note") {
            agents.push(AgentName::NoteWriter);
        }
        if response.contains("ADVISOR") || lower.contains("guidance") {
            agents.push(AgentName::Advisor);
        }
    }

    CoordinatorDecision::for_agents(&agents, response.trim())
}

fn string_items(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn dedup(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

fn default_priority(agents: &[String]) -> BTreeMap<String, i64> {
    agents
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i as i64 + 1))
        .collect()
}

fn invalid(detail: &str) -> ParseError {
    ParseError::Invalid {
        record: "coordinator decision",
        detail: detail.to_string(),
    }
}
