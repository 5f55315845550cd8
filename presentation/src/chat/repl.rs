//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::{OutputConfig, ReplConfig};
use crate::output::formatter::OutputFormatter;
use crate::{ConsoleFormatter, ProgressReporter};
use rustyline::config::Config as EditorConfig;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use sage_application::{ChatSession, LlmGateway, NoProgress, RunTurnUseCase};
use sage_domain::{AgentName, Record};
use std::sync::Arc;
use tracing::debug;

/// What the loop should do after a slash command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Exit,
}

/// Interactive chat REPL
pub struct ChatRepl<G: LlmGateway + 'static> {
    session: ChatSession<G>,
    output: OutputConfig,
    repl: ReplConfig,
}

impl<G: LlmGateway + 'static> ChatRepl<G> {
    /// Create a new ChatRepl
    pub fn new(use_case: Arc<RunTurnUseCase<G>>) -> Self {
        Self {
            session: ChatSession::new(use_case),
            output: OutputConfig::default(),
            repl: ReplConfig::default(),
        }
    }

    /// Student records shared by every turn
    pub fn with_data(mut self, profile: Record, calendar: Record, tasks: Record) -> Self {
        self.session = self.session.with_data(profile, calendar, tasks);
        self
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn with_repl_config(mut self, repl: ReplConfig) -> Self {
        self.repl = repl;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let config = EditorConfig::builder()
            .max_history_size(self.repl.max_history)?
            .auto_add_history(false)
            .build();
        let mut rl = DefaultEditor::with_config(config)?;

        let history_path = self.repl.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if rl.load_history(path).is_err() {
                debug!(path = %path.display(), "No readline history loaded");
            }
        }

        self.print_welcome();

        loop {
            let readline = rl.readline("you> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) == CommandOutcome::Exit {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    self.process_request(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          SAGE - Academic Assistant          │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Model: {}", self.session.use_case().model_name());
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?    - Show this help");
        println!("  /agents          - List the available agents");
        println!("  /history         - Show the conversation so far");
        println!("  /clear           - Forget the conversation");
        println!("  /quit, /exit, /q - Exit chat");
        println!();
    }

    /// Handle a slash command.
    pub fn handle_command(&mut self, cmd: &str) -> CommandOutcome {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                CommandOutcome::Exit
            }
            "/help" | "/h" | "/?" => {
                println!();
                Self::print_help();
                CommandOutcome::Continue
            }
            "/agents" => {
                println!();
                println!("Available agents:");
                for agent in self.session.use_case().agent_names() {
                    println!("  - {}: {}", agent.display_name(), agent.description());
                }
                println!();
                CommandOutcome::Continue
            }
            "/history" => {
                println!();
                if self.session.history().is_empty() {
                    println!("(no messages yet)");
                }
                for message in self.session.history() {
                    println!("{}: {}", message.role.label(), message.content);
                }
                println!();
                CommandOutcome::Continue
            }
            "/clear" => {
                self.session.clear();
                println!("Conversation cleared.");
                CommandOutcome::Continue
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                CommandOutcome::Continue
            }
        }
    }

    /// Run one turn and print its outcome.
    pub async fn process_request(&mut self, request: &str) {
        println!();

        let result = if self.repl.show_progress {
            let progress = ProgressReporter::new();
            self.session.send(request, &progress).await
        } else {
            self.session.send(request, &NoProgress).await
        };

        match result {
            Ok(outcome) => {
                println!("{}", ConsoleFormatter.render(&outcome, self.output.format));
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
    }

    pub fn session(&self) -> &ChatSession<G> {
        &self.session
    }

    /// Agents this REPL can route to
    pub fn agents(&self) -> Vec<AgentName> {
        self.session.use_case().agent_names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sage_application::{ExecutionParams, GatewayError};
    use sage_domain::Prompt;

    /// Answers every coordinator call with an Advisor-only decision.
    struct AdvisorOnly;

    #[async_trait]
    impl LlmGateway for AdvisorOnly {
        async fn generate(&self, prompt: &Prompt) -> Result<String, GatewayError> {
            Ok(match prompt.label {
                "coordinator" => {
                    r#"{"required_agents": ["ADVISOR"], "priority": {"ADVISOR": 1},
                        "concurrent_groups": [["ADVISOR"]], "reasoning": "advice"}"#
                        .to_string()
                }
                "advisor" => {
                    r#"{"summary": "Stay steady", "actions": [{"rank": 1, "action": "Sleep"}]}"#
                        .to_string()
                }
                _ => "{}".to_string(),
            })
        }

        fn model_name(&self) -> &str {
            "fake"
        }
    }

    fn repl() -> ChatRepl<AdvisorOnly> {
        let use_case = RunTurnUseCase::new(Arc::new(AdvisorOnly), ExecutionParams::default());
        ChatRepl::new(Arc::new(use_case)).with_repl_config(ReplConfig {
            show_progress: false,
            ..ReplConfig::default()
        })
    }

    #[test]
    fn test_commands() {
        let mut repl = repl();
        assert_eq!(repl.handle_command("/help"), CommandOutcome::Continue);
        assert_eq!(repl.handle_command("/agents"), CommandOutcome::Continue);
        assert_eq!(repl.handle_command("/nope"), CommandOutcome::Continue);
        assert_eq!(repl.handle_command("/q"), CommandOutcome::Exit);
        assert_eq!(repl.agents().len(), 3);
    }

    #[tokio::test]
    async fn test_turns_accumulate_until_cleared() {
        let mut repl = repl();
        repl.process_request("I feel behind this term").await;
        repl.process_request("What should I do first?").await;
        assert_eq!(repl.session().turn_count(), 2);
        assert_eq!(repl.session().history().len(), 4);

        repl.handle_command("/clear");
        assert!(repl.session().history().is_empty());
    }
}
