//! Output formatter trait

use sage_application::TurnOutcome;
use sage_domain::OutputFormat;

/// Trait for formatting turn outcomes
pub trait OutputFormatter {
    /// Routing decision plus every agent's section
    fn format_full(&self, outcome: &TurnOutcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &TurnOutcome) -> String;

    /// The assistant reply only
    fn format_reply(&self, outcome: &TurnOutcome) -> String;

    fn render(&self, outcome: &TurnOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format_full(outcome),
            OutputFormat::Reply => self.format_reply(outcome),
            OutputFormat::Json => self.format_json(outcome),
        }
    }
}
