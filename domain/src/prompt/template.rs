//! Prompt templates for each step of a turn

use super::Prompt;
use crate::profile::{LearningStyle, ProfileAnalysis};

/// Few-shot examples for plan generation
const PLAN_EXAMPLES: &str = r#"Request: "Help with exam prep while managing ADHD and football"
Observation: football match at 6PM, exam tomorrow 9AM
```json
{
  "summary": "ADHD-optimized exam prep around the match",
  "time_blocks": [
    {"start": "2PM", "end": "5PM", "activity": "Exam prep", "focus": "3x20min sprints with movement breaks"},
    {"start": "6PM", "end": "8PM", "activity": "Football match", "focus": "formula review during breaks"},
    {"start": "9PM", "end": "11PM", "activity": "Final review", "focus": "15/5 study/break cycles"}
  ],
  "emergency_protocols": ["Focus lost: jumping jacks", "Overwhelmed: change rooms", "Brain fog: cold shower"]
}
```

Request: "Struggling with multiple deadlines"
Observation: 3 assignments due, lowest grade in Calculus
```json
{
  "summary": "Priority schedule with calculus in the high-focus slot",
  "time_blocks": [
    {"start": "08:00", "end": "10:00", "activity": "Calculus practice", "focus": "timer challenges"},
    {"start": "13:00", "end": "15:00", "activity": "Assignments", "focus": "reward per completion"},
    {"start": "21:00", "end": "21:30", "activity": "Quick review"}
  ],
  "emergency_protocols": ["Falling behind: ask a study buddy to check in"]
}
```"#;

const NOTES_EXAMPLE: &str = r#"Request: "Need to cram Calculus III for tomorrow"
```json
{
  "topic": "Calculus III",
  "notes": "CORE CONCEPTS (80/20):\n- Multiple integrals give volume and area\n- Vector calculus describes flow, force and rotation\n\nCOMMON EXAM PATTERNS:\n- Find critical points\n- Calculate flux and work\n\nQUICKSTART:\n- Always draw the 3D diagram\n- Use symmetry to simplify",
  "key_points": ["Triple integrals in cylindrical/spherical coordinates", "Curl, divergence and gradient relationships", "If stuck, convert coordinates"]
}
```"#;

const ADVICE_EXAMPLE: &str = r#"Request: "Managing multiple deadlines with limited time"
```json
{
  "summary": "Protect the mornings and chunk everything",
  "actions": [
    {"rank": 1, "action": "Draw a visual timeline of every deadline", "rationale": "visual learners plan better when they can see the week"},
    {"rank": 2, "action": "Split each task into 45 minute chunks", "rationale": "small chunks survive interruptions"},
    {"rank": 3, "action": "Use 25/5 Pomodoro for intensive work", "rationale": "keeps energy steady across long days"}
  ]
}
```"#;

/// Templates for generating prompts at each step
pub struct PromptTemplate;

impl PromptTemplate {
    /// Coordinator: decide which agents run, and how they are grouped
    pub fn coordinator(request: &str, context: &str, history: &str) -> Prompt {
        let system = format!(
            r#"You are the Coordinator of an academic support assistant. You use the ReAct pattern to decide which specialist agents should handle a student's request.

AVAILABLE AGENTS:
- PLANNER: scheduling and time management
- NOTEWRITER: study materials and content summaries
- ADVISOR: personalized academic guidance

GROUPING RULES:
1. Agents in the same group run concurrently
2. Groups run in order, one after another
3. Only select agents the request actually needs

CONTEXT:
Request: {request}
Student Context: {context}
Conversation History: {history}

If this is a follow-up question, take the previous conversation into account.

FORMAT YOUR RESPONSE AS:
Thought: [analysis of the request and context]
Action: [agent selection and grouping strategy]
Observation: [expected workflow and dependencies]
Decision: [final deployment plan]

Then finish with a JSON block:
```json
{{
  "required_agents": ["PLANNER", "NOTEWRITER"],
  "priority": {{"PLANNER": 1, "NOTEWRITER": 2}},
  "concurrent_groups": [["PLANNER", "NOTEWRITER"]],
  "reasoning": "one sentence"
}}
```"#
        );
        Prompt::new("coordinator", system)
    }

    /// Profile analyzer: learning style, energy pattern, executive function
    pub fn profile_analyzer(profile: &str) -> Prompt {
        let system = format!(
            r#"You are a Profile Analysis agent. Extract the learning patterns that affect this student's academic success.

PROFILE DATA:
{profile}

ANALYZE:
1. Learning characteristics: primary learning style, attention span
2. Energy management: peak periods, recovery patterns, fatigue signals
3. Executive function: task management, focus limits, break needs

Respond with a JSON block:
```json
{{
  "learning_style": "visual | auditory | kinesthetic | mixed",
  "energy_pattern": {{"morning": "peak focus", "evening": "low"}},
  "executive_function_notes": "short, specific observations"
}}
```"#
        );
        Prompt::new("profile_analyzer", system)
    }

    /// Planner step 1: analyze the upcoming calendar
    pub fn calendar_analysis(events: &str) -> Prompt {
        Prompt::new(
            "planner.calendar",
            r#"Analyze the student's upcoming calendar events (JSON in the user message) and identify:
- Available time blocks and study opportunity windows
- Energy impact of each activity and the recovery needed after it
- Potential conflicts
- Recurring activity patterns

Answer with a concise bullet list."#,
        )
        .with_user(events)
    }

    /// Planner step 2: prioritize the open tasks
    pub fn task_analysis(tasks: &str) -> Prompt {
        Prompt::new(
            "planner.tasks",
            r#"Analyze the student's open tasks (JSON in the user message) and build a priority structure considering:
- Urgency and deadlines
- Complexity and required focus level
- Energy requirements and time estimates
- Dependencies between tasks

Answer with a concise ranked list."#,
        )
        .with_user(tasks)
    }

    /// Planner step 3: combine both analyses into a schedule
    pub fn plan_generation(
        request: &str,
        profile: &ProfileAnalysis,
        calendar_analysis: &str,
        task_analysis: &str,
        history: &str,
    ) -> Prompt {
        let energy = profile
            .energy_pattern
            .iter()
            .map(|(block, level)| format!("{}: {}", block, level))
            .collect::<Vec<_>>()
            .join(", ");

        let system = format!(
            r#"You are a planning assistant building a focused study plan with the ReAct pattern.

INPUT CONTEXT:
- Learning style: {style}
- Energy pattern: {energy}
- Executive function notes: {notes}
- Calendar analysis:
{calendar_analysis}
- Task analysis:
{task_analysis}

CONVERSATION HISTORY:
{history}

EXAMPLES:
{PLAN_EXAMPLES}

ADDRESS: energy optimization, task chunking, focus periods, recovery time, and balance with social and sport activities.
INCLUDE: emergency protocols, quick wins and a reward system.
If this is a follow-up question, build on the previous conversation. Keep the tone informal.

Think it through (Thought / Action / Observation), then give the plan as a JSON block with "summary", "time_blocks" (each with "start", "end", "activity", optional "focus") and "emergency_protocols"."#,
            style = profile.learning_style,
            energy = if energy.is_empty() { "unknown".to_string() } else { energy },
            notes = if profile.executive_function_notes.is_empty() {
                "none"
            } else {
                profile.executive_function_notes.as_str()
            },
        );
        Prompt::new("planner.plan", system).with_user(request)
    }

    /// NoteWriter: notes for one topic, adapted to the learning style
    pub fn note_topic(request: &str, topic: &str, style: LearningStyle, history: &str) -> Prompt {
        let adaptation = match style {
            LearningStyle::Visual => "diagrams described in words, tables, color-coded headings",
            LearningStyle::Auditory => "mnemonics, rhythm, things to say out loud",
            LearningStyle::Kinesthetic => "worked examples, hands-on exercises, things to physically do",
            LearningStyle::Mixed => "a blend of visual structure, spoken summaries and practice problems",
        };

        let system = format!(
            r#"You write concise, high-impact study notes.

TOPIC: {topic}
LEARNING STYLE: {style} (use {adaptation})
REQUEST: {request}

CONVERSATION HISTORY:
{history}

EXAMPLE:
{NOTES_EXAMPLE}

Focus on the essential 20% of concepts that give 80% of the understanding, common exam patterns and emergency tips.
If this is a follow-up question, build on the previous conversation.

Respond with a JSON block with "topic", "notes" (markdown) and "key_points"."#
        );
        Prompt::new("notewriter", system)
    }

    /// Advisor: ranked guidance for the student's situation
    pub fn advisor(request: &str, profile: &str, analysis: &ProfileAnalysis, history: &str) -> Prompt {
        let system = format!(
            r#"You are an academic advisor giving personalized, practical guidance.

PROFILE:
{profile}

LEARNING STYLE: {style}
EXECUTIVE FUNCTION NOTES: {notes}
REQUEST: {request}

CONVERSATION HISTORY:
{history}

EXAMPLE:
{ADVICE_EXAMPLE}

Cover immediate action steps, schedule optimization, energy management, support strategies and emergency protocols.
If this is a follow-up question, build on the previous conversation.

Respond with a JSON block with "summary" and "actions" (each with "rank", "action", "rationale"), most important first."#,
            style = analysis.learning_style,
            notes = if analysis.executive_function_notes.is_empty() {
                "none"
            } else {
                analysis.executive_function_notes.as_str()
            },
        );
        Prompt::new("advisor", system)
    }
}
