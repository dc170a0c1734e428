//! CLI entrypoint for askboard
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use askboard_application::{
    ActivityLogger, AuthGateway, BehaviorConfig, BoardContext, DeleteQuestionUseCase,
    EditQuestionUseCase, LoadBoardUseCase, NoActivityLogger, NoSessionStore, QuestionStore,
    SessionStore, SignInUseCase, SubmitOutcome, SubmitQuestionInput, SubmitQuestionUseCase,
    WatchBoardUseCase,
};
use askboard_domain::{AuthFlow, BoardVariant, OutputFormat, Question, QuestionId};
use askboard_infrastructure::{
    ConfigLoader, FileConfig, FileSessionStore, JsonlActivityLogger, LocalAuthGateway,
    MemoryQuestionStore, StoreBackend, SystemClock,
};
use askboard_presentation::{
    BoardRepl, BoardServices, Cli, Command, ConsoleBoardListener, FetchSpinner, OutputConfig,
    ReplConfig, formatter_for, join_words,
};
use clap::Parser;
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Wrong codes accepted before `login` gives up
const MAX_CODE_ATTEMPTS: usize = 3;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate()?;

    let _log_guard = init_logging(cli.verbose, config.logging.file.as_deref())?;
    info!("Starting askboard");

    let color = config.output.color && !cli.no_color;
    if !color {
        colored::control::set_override(false);
    }

    let variant = cli
        .variant
        .map(BoardVariant::from)
        .unwrap_or(config.board.variant);
    let output = OutputConfig {
        format: cli
            .output
            .map(OutputFormat::from)
            .or(config.output.format)
            .unwrap_or_default(),
        color,
        show_progress: !cli.quiet,
    };
    let title = config.board.title.clone();

    // === Dependency Injection ===
    let backend = build_backend(&config)?;
    let services = build_services(&config, &backend);

    let mut flow = AuthFlow::new();
    if variant == BoardVariant::Authenticated {
        services.sign_in.restore(&mut flow);
    }
    let ctx = BoardContext {
        variant,
        user: flow.user().cloned(),
    };

    match cli.command() {
        command @ (Command::Board | Command::List | Command::Leaderboard) => {
            return Ok(show(&services, &ctx, &output, &title, &command).await);
        }
        Command::Ask { name, text } => {
            let mut input = SubmitQuestionInput::new(join_words(&text));
            if let Some(name) = name {
                input = input.with_asker(name);
            }
            match services.submit.execute(&ctx, input).await? {
                SubmitOutcome::Created(question) => {
                    print_question(output.format, "Asked:", &question)?
                }
                SubmitOutcome::Ignored => {
                    eprintln!("Nothing submitted: a name and a question are both needed.");
                    if variant == BoardVariant::Open {
                        eprintln!("Pass your name with --name <NAME>.");
                    }
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Edit { id, text } => {
            let question = services
                .edit
                .execute(&ctx, &QuestionId::from(id.as_str()), &join_words(&text))
                .await?;
            print_question(output.format, "Updated:", &question)?;
        }
        Command::Delete { id } => {
            let question = services
                .delete
                .execute(&ctx, &QuestionId::from(id.as_str()))
                .await?;
            print_question(output.format, "Deleted:", &question)?;
        }
        Command::Login { email } => {
            if variant != BoardVariant::Authenticated {
                bail!("Sign-in is only used by authenticated boards (pass --variant authenticated)");
            }
            login(&services.sign_in, &mut flow, &email).await?;
        }
        Command::Logout => match services.sign_in.sign_out(&mut flow).await {
            Ok(()) => println!("Signed out."),
            Err(e) => println!("{}", e.user_message()),
        },
        Command::Watch => {
            let mut listener = ConsoleBoardListener::new(formatter_for(output.format), title);
            if output.format == OutputFormat::Json {
                listener = listener.append_only();
            }

            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    on_interrupt.cancel();
                }
            });

            let delivered = WatchBoardUseCase::new(backend.store.clone())
                .execute(&ctx, &listener, cancel)
                .await?;
            info!(delivered, "Stopped watching");
        }
        Command::Repl { name } => {
            let history_file = config
                .repl
                .history_file
                .as_deref()
                .map(ConfigLoader::expand_path)
                .or_else(|| ConfigLoader::data_dir().map(|dir| dir.join("history.txt")));

            let mut repl = BoardRepl::new(services, variant, title)
                .with_config(ReplConfig { history_file })
                .with_output(output.clone())
                .with_name(name);
            repl.run().await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Initialize tracing; logs go to stderr unless `[logging] file` is set.
fn init_logging(verbose: u8, file: Option<&str>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(file) = file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let path = ConfigLoader::expand_path(file);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let name = path
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", path.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// Store and auth collaborators for the configured backend
struct Backend {
    store: Arc<dyn QuestionStore>,
    auth: Arc<dyn AuthGateway>,
}

fn build_backend(config: &FileConfig) -> Result<Backend> {
    match config.store.backend {
        StoreBackend::Memory => {
            let store = match snapshot_path(config) {
                Some(path) => MemoryQuestionStore::open(&path)
                    .with_context(|| format!("Failed to open {}", path.display()))?,
                None => MemoryQuestionStore::new(),
            };
            // No mail goes out offline; show the code instead
            let auth = LocalAuthGateway::new().with_delivery(|sent| {
                eprintln!(
                    "{} {}: {}",
                    "Sign-in code for".dimmed(),
                    sent.email,
                    sent.code.bold()
                );
            });
            Ok(Backend {
                store: Arc::new(store),
                auth: Arc::new(auth),
            })
        }
        StoreBackend::Hosted => hosted_backend(config),
    }
}

fn snapshot_path(config: &FileConfig) -> Option<PathBuf> {
    config
        .store
        .snapshot_path
        .as_deref()
        .map(ConfigLoader::expand_path)
        .or_else(|| ConfigLoader::data_dir().map(|dir| dir.join("questions.json")))
}

#[cfg(feature = "hosted")]
fn hosted_backend(config: &FileConfig) -> Result<Backend> {
    use askboard_infrastructure::{
        HostedAuthGateway, HostedClient, HostedQuestionStore, HostedSettings,
    };
    use std::time::Duration;

    let app_id = config
        .store
        .app_id
        .clone()
        .context("[store] app_id is required for the hosted backend")?;
    let client = HostedClient::new(HostedSettings {
        api_uri: config.store.api_uri.clone(),
        app_id,
        admin_token: config.store.admin_token.clone(),
        timeout: config.store.timeout_seconds.map(Duration::from_secs),
    })?;
    let poll_interval = Duration::from_millis(config.store.poll_interval_ms);

    Ok(Backend {
        store: Arc::new(HostedQuestionStore::new(client.clone(), poll_interval)),
        auth: Arc::new(HostedAuthGateway::new(client)),
    })
}

#[cfg(not(feature = "hosted"))]
fn hosted_backend(_config: &FileConfig) -> Result<Backend> {
    bail!("This build does not include the hosted backend (rebuild with the `hosted` feature)")
}

fn build_services(config: &FileConfig, backend: &Backend) -> BoardServices {
    let behavior = BehaviorConfig::from_timeout_seconds(config.store.timeout_seconds);

    let activity: Arc<dyn ActivityLogger> = match config.logging.activity_log.as_deref() {
        Some(path) => match JsonlActivityLogger::open(ConfigLoader::expand_path(path)) {
            Some(logger) => Arc::new(logger),
            None => {
                warn!(path, "Could not open activity log; continuing without it");
                Arc::new(NoActivityLogger)
            }
        },
        None => Arc::new(NoActivityLogger),
    };

    // Sessions belong to the backend that issued them
    let session_file = match config.store.backend {
        StoreBackend::Memory => "session.json",
        StoreBackend::Hosted => "session-hosted.json",
    };
    let sessions: Arc<dyn SessionStore> = match ConfigLoader::data_dir() {
        Some(dir) => Arc::new(FileSessionStore::new(dir.join(session_file))),
        None => Arc::new(NoSessionStore),
    };

    BoardServices {
        load: LoadBoardUseCase::new(backend.store.clone()).with_behavior(behavior.clone()),
        submit: SubmitQuestionUseCase::new(backend.store.clone(), Arc::new(SystemClock))
            .with_behavior(behavior.clone())
            .with_activity_logger(activity.clone()),
        edit: EditQuestionUseCase::new(backend.store.clone())
            .with_behavior(behavior.clone())
            .with_activity_logger(activity.clone()),
        delete: DeleteQuestionUseCase::new(backend.store.clone())
            .with_behavior(behavior.clone())
            .with_activity_logger(activity.clone()),
        sign_in: SignInUseCase::new(backend.auth.clone())
            .with_sessions(sessions)
            .with_behavior(behavior)
            .with_activity_logger(activity),
    }
}

async fn show(
    services: &BoardServices,
    ctx: &BoardContext,
    output: &OutputConfig,
    title: &str,
    command: &Command,
) -> ExitCode {
    let formatter = formatter_for(output.format);

    let spinner = FetchSpinner::start(output.spinner_visible());
    let result = services.load.execute(ctx).await;
    spinner.finish();

    match result {
        Ok(view) => {
            let rendered = match command {
                Command::List => formatter.questions(&view),
                Command::Leaderboard => formatter.leaderboard(&view),
                _ => formatter.board(title, &view),
            };
            println!("{}", rendered);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", formatter.fetch_error(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}

fn print_question(format: OutputFormat, label: &str, question: &Question) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(question)?),
        OutputFormat::Text => println!(
            "{} {} ({})",
            label.green(),
            question.text(),
            question.id()
        ),
    }
    Ok(())
}

/// Request a code for `email`, then read it from stdin.
async fn login(sign_in: &SignInUseCase, flow: &mut AuthFlow, email: &str) -> Result<()> {
    if let Some(user) = flow.user() {
        println!("Already signed in as {}. Run `askboard logout` first.", user.email);
        return Ok(());
    }

    sign_in
        .send_code(flow, email)
        .await
        .map_err(|e| anyhow!(e.user_message()))?;
    println!("Code sent. Check your email and enter it below.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    for _ in 0..MAX_CODE_ATTEMPTS {
        print!("code> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            bail!("No code entered");
        };
        match sign_in.verify_code(flow, &line).await {
            Ok(user) => {
                println!("{} {}", "Signed in as".green(), user.email);
                return Ok(());
            }
            Err(e) => eprintln!("{}", e.user_message().red()),
        }
    }

    bail!("Too many invalid codes; run `askboard login` again for a new one")
}
