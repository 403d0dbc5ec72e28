//! HelpMeIUD CLI (`hm`)
//!
//! 사건 신고와 관리자용 사건/범죄 유형 관리를 명령행에서 수행합니다.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod context;

use commands::casos::CasoEdit;
use commands::output::OutputFormat;
use commands::report::ReportArgs;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "hm")]
#[command(author, version, about = "HelpMeIUD CLI - report and manage incidents", long_about = None)]
struct Cli {
    /// API base URL (overrides config)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    // ─────────────────────────────────────────────────────────────────────────
    // Auth
    // ─────────────────────────────────────────────────────────────────────────
    /// Login to HelpMeIUD
    Login {
        #[arg(long)]
        username: String,

        /// Password (prompted when omitted)
        #[arg(long, env = "HELPME_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Logout and remove the stored session
    Logout,

    /// Show current user
    Whoami,

    // ─────────────────────────────────────────────────────────────────────────
    // Config
    // ─────────────────────────────────────────────────────────────────────────
    /// Manage CLI config
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Records
    // ─────────────────────────────────────────────────────────────────────────
    /// Report an incident
    Report(ReportArgs),

    /// Manage reported incidents (admin)
    Casos {
        #[command(subcommand)]
        action: CasosAction,
    },

    /// List crime types, manage them (admin)
    Delitos {
        #[command(subcommand)]
        action: DelitosAction,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Subcommand enums
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum ConfigAction {
    /// Set config values (base URL via the global --base-url)
    Set {
        #[arg(long)]
        login_path: Option<String>,
        #[arg(long)]
        admin_role: Option<String>,
    },
    /// Show current config
    Show,
}

#[derive(Subcommand)]
enum CasosAction {
    /// List incidents
    List,
    /// Update an incident
    Update {
        id: i64,
        #[command(flatten)]
        edit: CasoEdit,
    },
    /// Delete an incident
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum DelitosAction {
    /// List crime types (no admin needed)
    List,
    /// Create a crime type
    Create {
        #[arg(long)]
        nombre: String,
        #[arg(long, default_value = "")]
        descripcion: String,
    },
    /// Update a crime type
    Update {
        id: i64,
        #[arg(long)]
        nombre: Option<String>,
        #[arg(long)]
        descripcion: Option<String>,
    },
    /// Delete a crime type
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hm=info,helpme_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = run(cli).await;
    if let Err(err) = &result {
        commands::output::report_error(err);
    }
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // 서버가 필요 없는 명령
    match &cli.command {
        Commands::Logout => return commands::auth::logout(),
        Commands::Config { action } => {
            return match action {
                ConfigAction::Set {
                    login_path,
                    admin_role,
                } => commands::config::set(
                    cli.base_url.clone(),
                    login_path.clone(),
                    admin_role.clone(),
                ),
                ConfigAction::Show => commands::config::show(),
            };
        }
        _ => {}
    }

    // 설정 로드
    let config = CliConfig::load()?;

    // 컨텍스트 결정 (CLI 옵션 > 설정 파일 > 환경변수)
    let ctx = context::resolve_context(&config, cli.base_url.as_deref(), cli.format)?;

    // 명령 실행
    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&ctx, &username, password).await
        }
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Report(args) => commands::report::report(&ctx, args).await,

        Commands::Casos { action } => match action {
            CasosAction::List => commands::casos::list(&ctx).await,
            CasosAction::Update { id, edit } => commands::casos::update(&ctx, id, edit).await,
            CasosAction::Delete { id } => commands::casos::delete(&ctx, id).await,
        },

        Commands::Delitos { action } => match action {
            DelitosAction::List => commands::delitos::list(&ctx).await,
            DelitosAction::Create {
                nombre,
                descripcion,
            } => commands::delitos::create(&ctx, &nombre, &descripcion).await,
            DelitosAction::Update {
                id,
                nombre,
                descripcion,
            } => commands::delitos::update(&ctx, id, nombre, descripcion).await,
            DelitosAction::Delete { id } => commands::delitos::delete(&ctx, id).await,
        },

        Commands::Logout | Commands::Config { .. } => Ok(()),
    }
}
