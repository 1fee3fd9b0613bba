use clap::{Args, Parser, Subcommand};
use hoops::client::ApiClient;
use hoops::columns::ColumnKey;
use hoops::commands;
use hoops::commands::stats::StatEntry;
use hoops::config;
use hoops::data_provider::StatsProvider;
use hoops::session::{Session, SessionStore};
use hoops::sort::SortState;
use hoops::tui;
use hoops::types::{NewPlayer, Role};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "hoops")]
#[command(about = "Basketball team stats CLI", long_about = "Basketball team stats CLI\n\nIf no command is specified, the program starts in interactive mode.")]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// Stats API base URL (overrides config file and HOOPS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Serve built-in fixture data instead of calling the API
    #[cfg(feature = "development")]
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Debug, Default)]
struct SortArgs {
    /// Sort by column (e.g. name, date, pts, reb, fg%, min)
    #[arg(short, long, value_name = "KEY")]
    sort: Option<ColumnKey>,

    /// Sort ascending instead of descending
    #[arg(long, requires = "sort")]
    asc: bool,
}

impl SortArgs {
    fn state(&self) -> SortState<ColumnKey> {
        commands::sort_from_args(self.sort, self.asc)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the session
    Login {
        username: String,

        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show who is logged in
    Whoami,
    /// List the roster, or add/remove players
    #[command(args_conflicts_with_subcommands = true)]
    Players {
        #[command(subcommand)]
        action: Option<PlayersAction>,

        #[command(flatten)]
        sort: SortArgs,
    },
    /// List games, or add/remove games
    #[command(args_conflicts_with_subcommands = true)]
    Games {
        #[command(subcommand)]
        action: Option<GamesAction>,

        #[command(flatten)]
        sort: SortArgs,
    },
    /// Display the box score for a game
    Boxscore {
        game_id: i64,

        #[command(flatten)]
        sort: SortArgs,
    },
    /// Enter or remove a player's stats for a game
    Stat {
        #[command(subcommand)]
        action: StatAction,
    },
    /// Display a player's game log, totals and splits
    Player {
        player_id: i64,

        #[command(flatten)]
        sort: SortArgs,
    },
    /// Display leaders, team totals, splits and the player table
    Analytics {
        /// Entries per leaderboard (defaults to leaders_limit from config)
        #[arg(short, long)]
        limit: Option<u32>,

        /// Show per-game averages instead of totals
        #[arg(short, long)]
        averages: bool,

        #[command(flatten)]
        sort: SortArgs,
    },
    /// Manage user accounts
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Display current configuration
    Config,
}

#[derive(Subcommand)]
enum UsersAction {
    /// Create a user account (admin)
    Add {
        username: String,

        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,

        #[arg(short, long, value_enum, default_value_t = Role::Viewer)]
        role: Role,
    },
}

#[derive(Subcommand)]
enum PlayersAction {
    /// Add a player (admin)
    Add {
        name: String,
        #[arg(short, long)]
        jersey: Option<i64>,
        #[arg(short, long)]
        position: Option<String>,
    },
    /// Remove a player and their stats (admin)
    Rm { player_id: i64 },
}

#[derive(Subcommand)]
enum GamesAction {
    /// Schedule a game (admin)
    Add {
        /// Date in YYYY-MM-DD format
        date: String,
        opponent: String,
        /// Away game (default is home)
        #[arg(long)]
        away: bool,
    },
    /// Remove a game and its stats (admin)
    Rm { game_id: i64 },
}

#[derive(Subcommand)]
enum StatAction {
    /// Create or replace a player's line for a game (admin)
    Set {
        game_id: i64,
        player_id: i64,
        /// Minutes played, as M:SS or M
        #[arg(long)]
        min: Option<String>,
        #[arg(long, default_value_t = 0)]
        pts: u32,
        #[arg(long, default_value_t = 0)]
        reb: u32,
        #[arg(long, default_value_t = 0)]
        ast: u32,
        #[arg(long, default_value_t = 0)]
        stl: u32,
        #[arg(long, default_value_t = 0)]
        blk: u32,
        #[arg(long, default_value_t = 0)]
        tov: u32,
        #[arg(long, default_value_t = 0)]
        fls: u32,
        #[arg(long, default_value_t = 0)]
        fg: u32,
        #[arg(long, default_value_t = 0)]
        fga: u32,
        #[arg(long, default_value_t = 0)]
        fg3: u32,
        #[arg(long, default_value_t = 0)]
        fga3: u32,
        #[arg(long, default_value_t = 0)]
        ft: u32,
        #[arg(long, default_value_t = 0)]
        fta: u32,
        /// Plus/minus
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        pm: i64,
        #[arg(long)]
        starter: bool,
    },
    /// Remove a player's line for a game (admin)
    Rm { game_id: i64, player_id: i64 },
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Handle the config command - display current configuration
fn handle_config_command(cfg: &config::Config, store: &SessionStore) {
    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!("Configuration File: {} (Exists: {})", path_str, if exists { "yes" } else { "no" });
    match store.path() {
        Some(path) => println!("Session File: {}", path.display()),
        None => println!("Session File: (no state directory)"),
    }
    println!("Session: {}", store.load().describe());
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!("api_base_url: {}", cfg.api_base_url);
    println!("refresh_interval: {} seconds", cfg.refresh_interval);
    println!("leaders_limit: {}", cfg.leaders_limit);
    println!("time_format: {}", cfg.time_format);
    println!();
    println!("[display]");
    println!("use_unicode: {}", cfg.display.use_unicode);
    println!();
    println!("[theme]");
    println!("selection_fg: {:?}", cfg.theme.selection_fg);
    println!("header_fg: {:?}", cfg.theme.header_fg);
    println!("error_fg: {:?}", cfg.theme.error_fg);
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

fn create_client(
    cli: &Cli,
    config: &config::Config,
    session: &Session,
    store: &SessionStore,
) -> anyhow::Result<Arc<dyn StatsProvider>> {
    #[cfg(feature = "development")]
    if cli.mock {
        tracing::info!("Using mock data");
        return Ok(Arc::new(hoops::dev::MockClient::new()));
    }
    #[cfg(not(feature = "development"))]
    let _ = cli;

    let client = ApiClient::new(&config.api_base_url)?
        .with_token(session.token.clone())
        .with_session_store(store.clone());
    Ok(Arc::new(client))
}

/// Execute a CLI command by routing it to the appropriate command handler
async fn execute_command(
    client: &dyn StatsProvider,
    command: Commands,
    config: &config::Config,
    session: &Session,
    store: &SessionStore,
) -> anyhow::Result<()> {
    match command {
        Commands::Config => unreachable!("Config command should be handled before execute_command"),
        Commands::Login { username, password } => {
            commands::auth::run_login(client, store, &username, password).await
        }
        Commands::Logout => commands::auth::logout(store),
        Commands::Whoami => commands::auth::whoami(client, store).await,
        Commands::Users {
            action: UsersAction::Add { username, password, role },
        } => commands::users::run_add(client, session, &username, password, role).await,
        Commands::Players { action, sort } => match action {
            None => commands::players::run(client, sort.state(), config).await,
            Some(PlayersAction::Add { name, jersey, position }) => {
                let player = NewPlayer { name, jersey_number: jersey, position };
                commands::players::add(client, session, player).await
            }
            Some(PlayersAction::Rm { player_id }) => {
                commands::players::remove(client, session, player_id).await
            }
        },
        Commands::Games { action, sort } => match action {
            None => commands::games::run(client, sort.state(), config).await,
            Some(GamesAction::Add { date, opponent, away }) => {
                commands::games::add(client, session, &date, &opponent, away).await
            }
            Some(GamesAction::Rm { game_id }) => {
                commands::games::remove(client, session, game_id).await
            }
        },
        Commands::Boxscore { game_id, sort } => {
            commands::boxscore::run(client, game_id, sort.state(), config).await
        }
        Commands::Stat { action } => match action {
            StatAction::Set {
                game_id,
                player_id,
                min,
                pts,
                reb,
                ast,
                stl,
                blk,
                tov,
                fls,
                fg,
                fga,
                fg3,
                fga3,
                ft,
                fta,
                pm,
                starter,
            } => {
                let entry = StatEntry {
                    minutes: min,
                    points: pts,
                    rebounds: reb,
                    assists: ast,
                    steals: stl,
                    blocks: blk,
                    turnovers: tov,
                    fouls: fls,
                    fg,
                    fga,
                    fg3,
                    fga3,
                    ft,
                    fta,
                    plus_minus: pm,
                    starter,
                };
                commands::stats::set(client, session, game_id, player_id, &entry).await
            }
            StatAction::Rm { game_id, player_id } => {
                commands::stats::remove(client, session, game_id, player_id).await
            }
        },
        Commands::Player { player_id, sort } => {
            commands::player::run(client, player_id, sort.state(), config).await
        }
        Commands::Analytics { limit, averages, sort } => {
            commands::analytics::run(client, limit, averages, sort.state(), config).await
        }
    }
}

#[tokio::main]
async fn main() {
    let mut config = config::read();
    let mut cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    if let Some(url) = cli.api_url.as_deref() {
        config.api_base_url = url.trim_end_matches('/').to_string();
    }

    let store = SessionStore::default_location();

    // Handle Config command separately (doesn't need a client)
    if let Some(Commands::Config) = cli.command {
        handle_config_command(&config, &store);
        return;
    }

    let session = store.load();
    let client = match create_client(&cli, &config, &session, &store) {
        Ok(client) => client,
        Err(e) => {
            let error_msg = format!("Failed to create API client: {:#}", e);
            tracing::error!("{}", error_msg);
            eprintln!("{}", error_msg);
            std::process::exit(1);
        }
    };

    // If no subcommand, run TUI
    let Some(command) = cli.command.take() else {
        if let Err(e) = tui::run(client, config, session).await {
            eprintln!("Error running TUI: {}", e);
            std::process::exit(1);
        }
        return;
    };

    if let Err(e) = execute_command(client.as_ref(), command, &config, &session, &store).await {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
