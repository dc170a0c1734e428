//! REPL (Read-Eval-Print Loop) for the board

use super::command::{ReplCommand, prompt_for};
use crate::config::{OutputConfig, ReplConfig};
use crate::output::formatter::formatter_for;
use crate::progress::spinner::FetchSpinner;
use askboard_application::{
    BoardContext, DeleteQuestionUseCase, EditQuestionUseCase, LoadBoardUseCase, SignInUseCase,
    StoreError, SubmitOutcome, SubmitQuestionInput, SubmitQuestionUseCase,
};
use askboard_domain::{AuthFlow, AuthState, BoardVariant, BoardView, OutputFormat, QuestionId};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

/// Use cases the board front ends drive
pub struct BoardServices {
    pub load: LoadBoardUseCase,
    pub submit: SubmitQuestionUseCase,
    pub edit: EditQuestionUseCase,
    pub delete: DeleteQuestionUseCase,
    pub sign_in: SignInUseCase,
}

/// Interactive board
pub struct BoardRepl {
    services: BoardServices,
    variant: BoardVariant,
    title: String,
    config: ReplConfig,
    output: OutputConfig,
    flow: AuthFlow,
    name: Option<String>,
    /// Last submission that failed to save, kept for `/retry`
    pending: Option<SubmitQuestionInput>,
}

impl BoardRepl {
    pub fn new(services: BoardServices, variant: BoardVariant, title: impl Into<String>) -> Self {
        Self {
            services,
            variant,
            title: title.into(),
            config: ReplConfig::default(),
            output: OutputConfig::default(),
            flow: AuthFlow::new(),
            name: None,
            pending: None,
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Board renderings follow `output.format`; spinners follow
    /// `output.spinner_visible()`.
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Pre-set the asker name (open boards)
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name.filter(|n| !n.trim().is_empty());
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(path) = &self.config.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        if self.variant == BoardVariant::Authenticated {
            self.services.sign_in.restore(&mut self.flow);
        }

        self.print_welcome();
        self.show(ReplCommand::Board).await;

        loop {
            let prompt = prompt_for(self.variant, self.flow.state(), self.name.as_deref());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let Some(command) = ReplCommand::parse(&line) else {
                        continue;
                    };
                    // Codes are single use; keep them out of history
                    if !matches!(self.flow.state(), AuthState::CodeSent { .. }) {
                        let _ = rl.add_history_entry(line.trim());
                    }
                    if self.handle(command).await {
                        break;
                    }
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

        if let Some(path) = &self.config.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn context(&self) -> BoardContext {
        BoardContext {
            variant: self.variant,
            user: self.flow.user().cloned(),
        }
    }

    /// Handle one command. Returns true if the REPL should exit.
    async fn handle(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => self.print_help(),
            ReplCommand::Board | ReplCommand::List | ReplCommand::Leaderboard => {
                self.show(command).await
            }
            ReplCommand::Text(text) => self.handle_text(text).await,
            ReplCommand::Name(name) => self.set_name(name),
            ReplCommand::Edit { id, text } => self.edit(&id, &text).await,
            ReplCommand::Delete { id } => self.delete(&id).await,
            ReplCommand::Logout => self.logout().await,
            ReplCommand::Retry => match self.pending.take() {
                Some(input) => self.submit(input).await,
                None => println!("Nothing to retry."),
            },
            ReplCommand::Back => match self.flow.restart() {
                Ok(()) => println!("Enter a different email."),
                Err(_) => println!("No code is pending."),
            },
            ReplCommand::Usage(usage) => println!("Usage: {}", usage),
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    /// A plain line means different things depending on where the
    /// sign-in flow is.
    async fn handle_text(&mut self, text: String) {
        if self.variant == BoardVariant::Open {
            if self.name.is_none() {
                println!("Set your name first: /name <your name>");
                return;
            }
            let asker = self.name.clone().unwrap_or_default();
            self.submit(SubmitQuestionInput::new(text).with_asker(asker))
                .await;
            return;
        }

        match self.flow.state() {
            AuthState::Unauthenticated => {
                match self.services.sign_in.send_code(&mut self.flow, &text).await {
                    Ok(()) => println!(
                        "Code sent. Check your email and enter it below (/back to change email)."
                    ),
                    Err(e) => println!("{}", e.user_message().red()),
                }
            }
            AuthState::CodeSent { .. } => {
                match self.services.sign_in.verify_code(&mut self.flow, &text).await {
                    Ok(user) => println!("{} {}", "Signed in as".green(), user.email),
                    Err(e) => println!("{}", e.user_message().red()),
                }
            }
            AuthState::Authenticated { .. } => {
                self.submit(SubmitQuestionInput::new(text)).await;
            }
        }
    }

    async fn submit(&mut self, input: SubmitQuestionInput) {
        let ctx = self.context();
        match self.services.submit.execute(&ctx, input.clone()).await {
            Ok(SubmitOutcome::Created(question)) => {
                println!("{} {}", "Asked:".green(), question.text());
            }
            Ok(SubmitOutcome::Ignored) => {
                println!("Nothing to submit: a name and a question are both needed.");
            }
            Err(e) if e.is_retryable() => {
                println!("{}", e.to_string().red());
                self.pending = Some(input);
                println!("Your question was kept. Type /retry to try again.");
            }
            Err(e) => {
                println!("{}", e.to_string().red());
                self.pending = None;
            }
        }
    }

    fn set_name(&mut self, name: String) {
        if self.variant == BoardVariant::Authenticated {
            println!("Authenticated boards use your email as your name.");
            return;
        }
        println!("Asking as {}", name.bold());
        self.name = Some(name);
    }

    async fn edit(&mut self, id: &str, text: &str) {
        let ctx = self.context();
        match self
            .services
            .edit
            .execute(&ctx, &QuestionId::from(id), text)
            .await
        {
            Ok(question) => println!("{} {}", "Updated:".green(), question.text()),
            Err(e) => println!("{}", e.to_string().red()),
        }
    }

    async fn delete(&mut self, id: &str) {
        let ctx = self.context();
        match self.services.delete.execute(&ctx, &QuestionId::from(id)).await {
            Ok(question) => println!("{} {}", "Deleted:".green(), question.text()),
            Err(e) => println!("{}", e.to_string().red()),
        }
    }

    async fn logout(&mut self) {
        match self.services.sign_in.sign_out(&mut self.flow).await {
            Ok(()) => println!("Signed out."),
            Err(e) => println!("{}", e.user_message().red()),
        }
    }

    async fn show(&self, what: ReplCommand) {
        let result = self.load().await.map_err(|e| e.to_string());
        println!("{}", render(self.output.format, &self.title, &what, &result));
    }

    async fn load(&self) -> Result<BoardView, StoreError> {
        let spinner = FetchSpinner::start(self.output.spinner_visible());
        let result = self.services.load.execute(&self.context()).await;
        spinner.finish();
        result
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│{:^45}│", self.title);
        println!("╰─────────────────────────────────────────────╯");
        println!();
        match (self.variant, self.flow.user()) {
            (BoardVariant::Authenticated, Some(user)) => println!("Signed in as {}", user.email),
            (BoardVariant::Authenticated, None) => {
                println!("Enter your email to receive a sign-in code.")
            }
            (BoardVariant::Open, _) => {
                if self.name.is_none() {
                    println!("Set your name with /name <your name>, then type a question.");
                }
            }
        }
        println!("Type /help for commands.");
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  <text>                 - Ask a question (or enter email / code when signing in)");
        println!("  /board, /b             - Show the whole board");
        println!("  /list, /ls             - Show the questions");
        println!("  /leaderboard, /top     - Show the leaderboard");
        match self.variant {
            BoardVariant::Open => {
                println!("  /name <name>           - Set the name you ask under");
            }
            BoardVariant::Authenticated => {
                println!("  /edit <id> <text>      - Change one of your questions");
                println!("  /delete <id>           - Delete one of your questions");
                println!("  /back                  - Enter a different email");
                println!("  /logout                - Sign out");
            }
        }
        println!("  /retry                 - Resubmit the last question that failed");
        println!("  /help, /h, /?          - Show this help");
        println!("  /quit, /exit, /q       - Exit");
        println!();
    }
}

/// Text for a board, list or leaderboard command in the chosen format.
fn render(
    format: OutputFormat,
    title: &str,
    what: &ReplCommand,
    result: &Result<BoardView, String>,
) -> String {
    let formatter = formatter_for(format);
    match result {
        Ok(view) => match what {
            ReplCommand::List => formatter.questions(view),
            ReplCommand::Leaderboard => formatter.leaderboard(view),
            _ => formatter.board(title, view),
        },
        Err(message) => formatter.fetch_error(message),
    }
}
