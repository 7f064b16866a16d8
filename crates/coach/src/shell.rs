// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `coach shell` command implementation.
//!
//! Interactive readline REPL over one [`ConversationSession`]. Plain lines
//! are answers to the interviewer; lines starting with `/` are commands.
//!
//! Advisory feedback and reply audio arrive in the background. The shell
//! remembers what it is waiting for and prints whatever has resolved before
//! the next prompt.

use std::sync::Arc;

use coach_config::CoachConfig;
use coach_core::{CoachError, Message, MessageId, PersonaId, Role};
use coach_persona::PersonaRegistry;
use coach_session::{
    AudioStatus, ConversationSession, EvaluationSummary, SessionError, Submitted, SwitchOutcome,
    TurnOutcome,
};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::adapters::{build_registry, build_session, Services, SessionStart};

/// A parsed line of shell input.
#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand<'a> {
    Answer(&'a str),
    Personas,
    Switch(&'a str),
    Reset,
    Status,
    Summary,
    Help,
    Quit,
    Unknown(&'a str),
}

impl<'a> ShellCommand<'a> {
    /// Parse one trimmed input line. Returns `None` for blank lines.
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let Some(command) = line.strip_prefix('/') else {
            return Some(ShellCommand::Answer(line));
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };
        Some(match name {
            "personas" => ShellCommand::Personas,
            "switch" if !arg.is_empty() => ShellCommand::Switch(arg),
            "reset" => ShellCommand::Reset,
            "status" => ShellCommand::Status,
            "summary" => ShellCommand::Summary,
            "help" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            _ => ShellCommand::Unknown(line),
        })
    }
}

/// Runs the `coach shell` interactive REPL.
pub async fn run_shell(config: CoachConfig, start: SessionStart) -> Result<(), CoachError> {
    let registry = build_registry(&config)?;
    let services = Services::from_config(&config).inspect_err(|_| {
        eprintln!(
            "error: completion API key required. Set completion.api_key in coach.toml or the {} env var",
            coach_typhoon::API_KEY_ENV
        );
    })?;
    let session = build_session(&config, Arc::clone(&registry), start, services)?;
    let mut shell = Shell::new(session, registry, config.session.max_questions);

    let mut rl = DefaultEditor::new()
        .map_err(|e| CoachError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "coach shell".bold().green());
    println!(
        "Type your answers. {} lists commands, {} exits.\n",
        "/help".yellow(),
        "/quit".yellow()
    );
    if let Some(greeting) = shell.session.transcript().await.last() {
        shell.print_interviewer(&shell.session.active_persona().await, greeting);
    }

    loop {
        shell.print_notices().await;
        let prompt = format!("{}> ", "you".green());
        match rl.readline(&prompt) {
            Ok(line) => {
                let Some(command) = ShellCommand::parse(&line) else {
                    continue;
                };
                let _ = rl.add_history_entry(line.as_str());
                if command == ShellCommand::Quit {
                    break;
                }
                shell.handle(command).await;
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    debug!("shell exited");
    Ok(())
}

/// Background result the shell will print once it resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Notice {
    Feedback(MessageId),
    Audio(MessageId),
}

struct Shell {
    session: ConversationSession,
    registry: Arc<PersonaRegistry>,
    max_questions: u32,
    notices: Vec<Notice>,
}

impl Shell {
    fn new(session: ConversationSession, registry: Arc<PersonaRegistry>, max_questions: u32) -> Self {
        Self {
            session,
            registry,
            max_questions,
            notices: Vec::new(),
        }
    }

    async fn handle(&mut self, command: ShellCommand<'_>) {
        match command {
            ShellCommand::Answer(text) => self.answer(text).await,
            ShellCommand::Personas => self.list_personas().await,
            ShellCommand::Switch(id) => self.switch(id).await,
            ShellCommand::Reset => self.reset().await,
            ShellCommand::Status => {
                self.status().await;
                self.print_notices().await;
            }
            ShellCommand::Summary => match self.session.evaluation_summary().await {
                Some(summary) => println!("{}", format_summary(&summary)),
                None => println!("{}", "no summary yet: the interview is still running".dimmed()),
            },
            ShellCommand::Help => print_help(),
            ShellCommand::Quit => {}
            ShellCommand::Unknown(line) => {
                println!("{} {line} (try /help)", "unknown command:".yellow());
            }
        }
    }

    async fn answer(&mut self, text: &str) {
        let Submitted {
            outcome,
            answer_id,
            evaluation,
            speech,
        } = match self.session.submit(text).await {
            Ok(submitted) => submitted,
            Err(e) => {
                print_session_error(&e);
                return;
            }
        };

        match &outcome {
            TurnOutcome::Reply {
                persona,
                message,
                question_count,
                terminated,
                ..
            } => {
                self.print_interviewer(persona, message);
                println!(
                    "{}",
                    format!("questions: {question_count}/{}", self.max_questions).dimmed()
                );
                if speech.is_some() {
                    self.notices.push(Notice::Audio(message.id.clone()));
                }
                if *terminated {
                    println!("\n{}", "The interview is over.".bold());
                    if let Some(summary) = self.session.evaluation_summary().await {
                        println!("{}", format_summary(&summary));
                    }
                }
            }
            TurnOutcome::Fallback { message, .. } => {
                println!("{}", message.text.yellow());
            }
        }
        if evaluation.is_some() {
            self.notices.push(Notice::Feedback(answer_id));
        }
    }

    /// Print every notice that has resolved and keep the rest.
    async fn print_notices(&mut self) {
        for line in self.take_resolved().await {
            println!("{line}");
        }
    }

    async fn take_resolved(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut waiting = Vec::with_capacity(self.notices.len());
        for notice in std::mem::take(&mut self.notices) {
            match self.resolve(&notice).await {
                Some(Some(line)) => lines.push(line),
                Some(None) => {}
                None => waiting.push(notice),
            }
        }
        self.notices = waiting;
        lines
    }

    /// `None` while still pending; `Some(None)` when resolved with nothing to
    /// show.
    async fn resolve(&self, notice: &Notice) -> Option<Option<String>> {
        match notice {
            Notice::Feedback(answer) => {
                let feedback = self.session.advisory_feedback(answer).await?;
                Some(
                    (!feedback.trim().is_empty())
                        .then(|| format!("{}\n{}", "feedback:".cyan(), feedback.dimmed())),
                )
            }
            Notice::Audio(message) => match self.session.audio_status(message).await {
                Some(AudioStatus::Ready(url)) => Some(Some(format!("{} {url}", "audio:".dimmed()))),
                Some(AudioStatus::Unavailable) => Some(Some("audio unavailable".dimmed().to_string())),
                Some(AudioStatus::Pending) => None,
                None => Some(None),
            },
        }
    }

    async fn list_personas(&self) {
        let active = self.session.active_persona().await;
        for persona in self.registry.list() {
            let marker = if persona.id == active { "*" } else { " " };
            println!("{marker} {}", crate::personas::format_persona(persona));
        }
    }

    async fn switch(&self, id: &str) {
        let id = PersonaId::from(id);
        if !self.registry.contains(&id) {
            println!("{} {id}", "no such persona:".yellow());
            return;
        }
        match self.session.switch_persona(&id).await {
            Ok(SwitchOutcome::Unchanged) => {
                println!("{}", "already talking to that interviewer".dimmed());
            }
            Ok(SwitchOutcome::Resumed) => {
                println!("{}", "resuming the earlier conversation".dimmed());
                if let Some(last) = self.session.transcript().await.last() {
                    match last.role {
                        Role::Interviewer => self.print_interviewer(&id, last),
                        Role::Candidate => println!("{} {}", "you:".green(), last.text),
                    }
                }
            }
            Ok(SwitchOutcome::Greeted(greeting)) => self.print_interviewer(&id, &greeting),
            Err(e) => print_session_error(&e),
        }
    }

    async fn reset(&mut self) {
        match self.session.reset().await {
            Ok(Some(greeting)) => {
                self.notices.clear();
                println!("{}", "interview restarted".dimmed());
                self.print_interviewer(&self.session.active_persona().await, &greeting);
            }
            Ok(None) => println!("{}", "question counter cleared".dimmed()),
            Err(e) => print_session_error(&e),
        }
    }

    async fn status(&self) {
        let persona = self.session.active_persona().await;
        let name = self.persona_name(&persona);
        println!("persona:   {name} [{persona}]");
        println!("phase:     {}", self.session.phase().await);
        println!(
            "questions: {}/{}",
            self.session.question_count().await,
            self.max_questions
        );
        println!("messages:  {}", self.session.transcript().await.len());
    }

    fn persona_name(&self, id: &PersonaId) -> String {
        self.registry
            .lookup(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|_| id.to_string())
    }

    fn print_interviewer(&self, persona: &PersonaId, message: &Message) {
        println!("{}: {}", self.persona_name(persona).blue().bold(), message.text);
    }
}

fn print_session_error(error: &SessionError) {
    let hint = match error {
        SessionError::Terminated => " (use /reset or /switch)",
        SessionError::Busy => " (wait for the interviewer)",
        _ => "",
    };
    println!("{}{hint}", error.to_string().yellow());
}

fn print_help() {
    println!("  /personas     list interviewers (* marks the active one)");
    println!("  /switch <id>  talk to another interviewer");
    println!("  /reset        restart with the current interviewer");
    println!("  /status       show persona, phase and question count");
    println!("  /summary      show the evaluation summary");
    println!("  /quit         leave the shell");
}

/// Render an evaluation summary as a small report.
pub fn format_summary(summary: &EvaluationSummary) -> String {
    let mut out = format!(
        "Evaluation summary ({} questions, {} answers)\n",
        summary.questions_asked, summary.answers_given
    );
    for entry in &summary.scores {
        let score = match entry.score {
            Some(score) => format!("{score:.1}/5"),
            None => "n/a".to_string(),
        };
        out.push_str(&format!("  {:<22} {score}\n", entry.category.to_string()));
    }
    if let Some(overall) = summary.overall() {
        out.push_str(&format!("  {:<22} {overall:.1}/5\n", "Overall"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_core::SpeechAdapter;
    use coach_test_utils::{MockCompletion, MockEvaluator, MockSpeech};

    fn shell_with(evaluator: MockEvaluator, speech: MockSpeech) -> Shell {
        let config = CoachConfig::default();
        let registry = build_registry(&config).unwrap();
        let speech: Arc<dyn SpeechAdapter> = Arc::new(speech);
        let services = Services {
            completion: Arc::new(MockCompletion::with_replies(vec!["ต่อไปครับ?".into()])),
            evaluation: Some(Arc::new(evaluator)),
            speech: Some(speech),
        };
        let start = SessionStart {
            persona: PersonaId::from("1"),
            job_title: "Backend Engineer".to_string(),
            candidate_name: None,
        };
        let session = build_session(&config, Arc::clone(&registry), start, services).unwrap();
        Shell::new(session, registry, config.session.max_questions)
    }

    async fn drain(shell: &mut Shell) -> Vec<String> {
        let mut lines = Vec::new();
        while !shell.notices.is_empty() {
            lines.extend(shell.take_resolved().await);
            tokio::task::yield_now().await;
        }
        lines
    }

    #[tokio::test]
    async fn answer_returns_before_background_results() {
        colored::control::set_override(false);
        let mut shell = shell_with(MockEvaluator::with_feedback("Communication: 5/5"), MockSpeech::new());

        shell.answer("สวัสดีครับ").await;
        assert_eq!(shell.notices.len(), 2);

        let lines = drain(&mut shell).await;
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().any(|l| l.starts_with("audio: https://")));
        assert!(lines.iter().any(|l| l.contains("Communication: 5/5")));
    }

    #[tokio::test]
    async fn failed_background_work_prints_quietly() {
        colored::control::set_override(false);
        let mut shell = shell_with(MockEvaluator::failing(), MockSpeech::failing());

        shell.answer("สวัสดีครับ").await;
        let lines = drain(&mut shell).await;
        assert_eq!(lines, vec!["audio unavailable".to_string()]);
    }

    #[test]
    fn plain_text_is_an_answer() {
        assert_eq!(
            ShellCommand::parse("  ผมทำงานมา 5 ปีครับ  "),
            Some(ShellCommand::Answer("ผมทำงานมา 5 ปีครับ"))
        );
        assert_eq!(ShellCommand::parse("   "), None);
    }

    #[test]
    fn slash_commands_parse() {
        assert_eq!(ShellCommand::parse("/switch 2"), Some(ShellCommand::Switch("2")));
        assert_eq!(ShellCommand::parse("/reset"), Some(ShellCommand::Reset));
        assert_eq!(ShellCommand::parse("/exit"), Some(ShellCommand::Quit));
        assert_eq!(ShellCommand::parse("/summary"), Some(ShellCommand::Summary));
    }

    #[test]
    fn switch_without_id_is_unknown() {
        assert_eq!(
            ShellCommand::parse("/switch"),
            Some(ShellCommand::Unknown("/switch"))
        );
        assert_eq!(ShellCommand::parse("/dance"), Some(ShellCommand::Unknown("/dance")));
    }

    #[test]
    fn summary_lists_every_category() {
        let summary = EvaluationSummary::from_feedback(
            ["Job Relevance: 4/5\nCommunication: 3/5"],
            10,
            10,
        );
        let report = format_summary(&summary);
        assert!(report.starts_with("Evaluation summary (10 questions, 10 answers)"));
        assert!(report.contains("Job Relevance"));
        assert!(report.contains("4.0/5"));
        assert!(report.contains("Problem Solving"));
        assert!(report.contains("n/a"));
        assert!(report.contains("Overall"));
    }
}
