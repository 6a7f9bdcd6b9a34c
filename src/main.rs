use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::process::ExitCode;

use opsdesk::commands::{
    CreateOptions, FaqEditOptions, LsOptions, SetOptions, cmd_config_get, cmd_config_set,
    cmd_config_show, cmd_create, cmd_dashboard, cmd_faq_add, cmd_faq_edit, cmd_faq_ls, cmd_faq_rm,
    cmd_ls, cmd_reply, cmd_set, cmd_show, cmd_watch,
};
use opsdesk::filter::{ChannelFilter, ViewPreset};
use opsdesk::types::{
    Language, RequestType, TicketPriority, TicketStatus, VALID_CHANNELS, VALID_LANGUAGES,
    VALID_PRIORITIES, VALID_REQUEST_TYPES, VALID_STATUSES,
};
use opsdesk::{ApiClient, Config};

#[derive(Parser)]
#[command(name = "opsdesk")]
#[command(about = "Terminal operator console for the helpdesk platform")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with tickets
    #[command(visible_alias = "t")]
    Tickets {
        #[command(subcommand)]
        action: TicketAction,
    },

    /// Live view of the ticket list or one ticket, refreshed in the background
    Watch {
        /// Watch a single ticket's thread instead of the list
        #[arg(long)]
        ticket: Option<u64>,

        /// View preset for the list: active, closed, all
        #[arg(long, default_value = "active", value_parser = parse_view)]
        view: ViewPreset,
    },

    /// Manage knowledge-base articles
    Faq {
        #[command(subcommand)]
        action: FaqAction,
    },

    /// Show the analytics overview
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for [possible values: bash, zsh, fish, powershell, elvish]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum TicketAction {
    /// List tickets
    Ls {
        /// View preset: active, closed, all
        #[arg(long, default_value = "active", value_parser = parse_view)]
        view: ViewPreset,

        /// Filter by status, can be repeated; overrides --view
        #[arg(long = "status", value_parser = parse_status)]
        statuses: Vec<TicketStatus>,

        /// Filter by priority, can be repeated
        #[arg(long = "priority", value_parser = parse_priority)]
        priorities: Vec<TicketPriority>,

        /// Filter by channel (telegram, email, portal, all)
        #[arg(long, default_value = "all", value_parser = parse_channel_filter)]
        channel: ChannelFilter,

        /// Filter by department code (default from config)
        #[arg(long)]
        department: Option<String>,

        /// Free-text search over subject and customer contacts
        #[arg(long)]
        search: Option<String>,

        /// Show only open P4 tickets
        #[arg(long)]
        attention: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display a ticket with its message thread
    Show {
        /// Ticket ID
        id: u64,

        /// Also fetch the AI thread summary
        #[arg(long)]
        summary: bool,

        /// Also fetch AI reply suggestions
        #[arg(long)]
        suggest: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a portal ticket on the customer's behalf
    Create {
        /// Ticket subject
        subject: String,

        /// Description text (reads from stdin if not provided)
        #[arg(short, long)]
        description: Option<String>,

        /// Customer language (ru, kk)
        #[arg(long, default_value = "ru", value_parser = parse_language)]
        language: Language,

        /// Customer email
        #[arg(long)]
        email: Option<String>,

        /// Customer username
        #[arg(long)]
        username: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Post an agent reply to a ticket
    Reply {
        /// Ticket ID
        id: u64,

        /// Reply text (reads from stdin if not provided)
        body: Option<String>,
    },

    /// Update a ticket's status and related fields
    Set {
        /// Ticket ID
        id: u64,

        /// New status (new, in_progress, closed, auto_closed)
        #[arg(value_parser = parse_status)]
        status: TicketStatus,

        /// New priority
        #[arg(long, value_parser = parse_priority)]
        priority: Option<TicketPriority>,

        /// New request type classification
        #[arg(long = "type", value_parser = parse_request_type)]
        request_type: Option<RequestType>,

        /// Disable AI replies on this ticket
        #[arg(long, conflicts_with = "ai_on")]
        ai_off: bool,

        /// Re-enable AI replies on this ticket
        #[arg(long)]
        ai_on: bool,
    },
}

#[derive(Subcommand)]
enum FaqAction {
    /// List articles
    Ls {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an article
    Add {
        /// Question text
        question: String,

        /// Answer text
        answer: String,

        /// Article language (ru, kk)
        #[arg(long, default_value = "ru", value_parser = parse_language)]
        language: Language,

        /// Main category (request type, e.g. problem)
        #[arg(long = "category")]
        category_main: Option<String>,

        /// Machine sub-code (e.g. CONNECTION_WIFI)
        #[arg(long = "code")]
        category_sub: Option<String>,

        /// Allow the AI to auto-resolve tickets with this article
        #[arg(long)]
        auto: bool,
    },

    /// Edit an article; unset flags keep stored values
    Edit {
        /// Article ID
        id: u64,

        /// New question text
        #[arg(long)]
        question: Option<String>,

        /// New answer text
        #[arg(long)]
        answer: Option<String>,

        /// New language (ru, kk)
        #[arg(long, value_parser = parse_language)]
        language: Option<Language>,

        /// New main category (empty string clears it)
        #[arg(long = "category")]
        category_main: Option<String>,

        /// New machine sub-code (empty string clears the whole code)
        #[arg(long = "code")]
        category_sub: Option<String>,

        /// Toggle AI auto-resolution
        #[arg(long)]
        auto: Option<bool>,
    },

    /// Delete an article
    Rm {
        /// Article ID
        id: u64,

        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (api_url, default_department)
        key: String,
        /// Value to set
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key (api_url, default_department)
        key: String,
    },
}

fn parse_status(s: &str) -> Result<TicketStatus, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid status. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )
    })
}

fn parse_priority(s: &str) -> Result<TicketPriority, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid priority. Must be one of: {}",
            VALID_PRIORITIES.join(", ")
        )
    })
}

fn parse_channel_filter(s: &str) -> Result<ChannelFilter, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid channel. Must be 'all' or one of: {}",
            VALID_CHANNELS.join(", ")
        )
    })
}

fn parse_language(s: &str) -> Result<Language, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid language. Must be one of: {}",
            VALID_LANGUAGES.join(", ")
        )
    })
}

fn parse_request_type(s: &str) -> Result<RequestType, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid request type. Must be one of: {}",
            VALID_REQUEST_TYPES.join(", ")
        )
    })
}

fn parse_view(s: &str) -> Result<ViewPreset, String> {
    s.parse()
        .map_err(|_| "Invalid view. Must be one of: active, closed, all".to_string())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "opsdesk", &mut io::stdout());
}

async fn run(command: Commands) -> opsdesk::Result<()> {
    // Completions and config run without touching the API
    let command = match command {
        Commands::Completions { shell } => {
            generate_completions(shell);
            return Ok(());
        }
        Commands::Config { action } => {
            return match action {
                ConfigAction::Show => cmd_config_show(),
                ConfigAction::Set { key, value } => cmd_config_set(&key, &value),
                ConfigAction::Get { key } => cmd_config_get(&key),
            };
        }
        other => other,
    };

    let config = Config::load()?;
    let client = ApiClient::from_config(&config)?;

    match command {
        Commands::Tickets { action } => match action {
            TicketAction::Ls {
                view,
                statuses,
                priorities,
                channel,
                department,
                search,
                attention,
                json,
            } => {
                cmd_ls(
                    &client,
                    LsOptions {
                        view,
                        statuses,
                        priorities,
                        channel,
                        department: department.or(config.default_department),
                        search,
                        attention_only: attention,
                        json,
                    },
                )
                .await
            }
            TicketAction::Show {
                id,
                summary,
                suggest,
                json,
            } => cmd_show(&client, id, summary, suggest, json).await,
            TicketAction::Create {
                subject,
                description,
                language,
                email,
                username,
                json,
            } => {
                cmd_create(
                    &client,
                    CreateOptions {
                        subject,
                        description,
                        language,
                        email,
                        username,
                        json,
                    },
                )
                .await
            }
            TicketAction::Reply { id, body } => cmd_reply(&client, id, body).await,
            TicketAction::Set {
                id,
                status,
                priority,
                request_type,
                ai_off,
                ai_on,
            } => {
                let ai_disabled = match (ai_off, ai_on) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                };
                cmd_set(
                    &client,
                    id,
                    SetOptions {
                        status,
                        priority,
                        request_type,
                        ai_disabled,
                    },
                )
                .await
            }
        },

        Commands::Watch { ticket, view } => cmd_watch(&client, ticket, view).await,

        Commands::Faq { action } => match action {
            FaqAction::Ls { json } => cmd_faq_ls(&client, json).await,
            FaqAction::Add {
                question,
                answer,
                language,
                category_main,
                category_sub,
                auto,
            } => {
                cmd_faq_add(
                    &client,
                    question,
                    answer,
                    language,
                    category_main,
                    category_sub,
                    auto,
                )
                .await
            }
            FaqAction::Edit {
                id,
                question,
                answer,
                language,
                category_main,
                category_sub,
                auto,
            } => {
                cmd_faq_edit(
                    &client,
                    id,
                    FaqEditOptions {
                        question,
                        answer,
                        language,
                        category_main,
                        category_sub,
                        auto_resolvable: auto,
                    },
                )
                .await
            }
            FaqAction::Rm { id, force } => cmd_faq_rm(&client, id, force).await,
        },

        Commands::Dashboard { json } => cmd_dashboard(&client, json).await,

        // Handled before client construction
        Commands::Config { .. } | Commands::Completions { .. } => Ok(()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
