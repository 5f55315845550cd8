//! Console output formatter for turn outcomes

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use sage_application::TurnOutcome;
use sage_domain::{AgentBreakdown, CoordinatorDecision, ExecutionPlan};

/// Formats turn outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete turn: request, routing, then one section per agent
    pub fn format(outcome: &TurnOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("SAGE"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Request:".cyan().bold(),
            outcome.state.current_request()
        ));
        if let Some(analysis) = &outcome.state.profile_analysis {
            output.push_str(&format!(
                "{} {}\n",
                "Learning style:".cyan().bold(),
                analysis.learning_style.as_str()
            ));
        }

        output.push_str(&Self::section_header("Routing"));
        output.push_str(&Self::routing(&outcome.decision, &outcome.plan));

        if outcome.reply.is_short_circuit() {
            output.push_str(&Self::section_header("Reply"));
            output.push_str(&format!("\n{}\n", outcome.reply.text));
        } else {
            for section in &outcome.reply.breakdown {
                output.push_str(&Self::agent_section(section));
            }
            let degraded = outcome.reply.degraded_count();
            if degraded > 0 {
                output.push_str(&format!(
                    "\n{}\n",
                    format!("{} agent(s) fell back to a placeholder", degraded).yellow()
                ));
            }
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &TurnOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// The assistant reply only (concise output)
    pub fn format_reply(outcome: &TurnOutcome) -> String {
        format!("{}\n", outcome.reply.text)
    }

    fn routing(decision: &CoordinatorDecision, plan: &ExecutionPlan) -> String {
        let mut output = String::new();

        if plan.is_empty() {
            output.push_str(&format!("\n{}\n", "No agents selected".dimmed()));
        }
        for (index, group) in plan.phases.iter().enumerate() {
            let names = group
                .iter()
                .map(|agent| {
                    match decision.priority.get(agent.as_str()) {
                        Some(priority) => format!("{} (priority {})", agent.display_name(), priority),
                        None => agent.display_name().to_string(),
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            output.push_str(&format!("\n  Group {}: {}", index + 1, names));
        }
        if !plan.phases.is_empty() {
            output.push('\n');
        }

        if !plan.dropped.is_empty() {
            output.push_str(&format!(
                "  {} {}\n",
                "Ignored:".dimmed(),
                plan.dropped.join(", ")
            ));
        }

        if !decision.reasoning.is_empty() {
            output.push_str(&format!(
                "\n{}\n{}\n",
                "Reasoning:".cyan().bold(),
                Self::indent(&decision.reasoning, "  ")
            ));
        }

        output
    }

    fn agent_section(section: &AgentBreakdown) -> String {
        let title = format!("── {} ──", section.agent.display_name());
        let title = if section.degraded {
            format!("{} (fallback)", title).red().bold()
        } else {
            title.yellow().bold()
        };
        format!("\n{}\n{}\n", title, section.output.render())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_full(&self, outcome: &TurnOutcome) -> String {
        Self::format(outcome)
    }

    fn format_json(&self, outcome: &TurnOutcome) -> String {
        Self::format_json(outcome)
    }

    fn format_reply(&self, outcome: &TurnOutcome) -> String {
        Self::format_reply(outcome)
    }
}
