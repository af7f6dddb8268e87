//! CLI command definitions and handlers
//!
//! Each handler drives one service the way a page would: invoke, then render
//! the resulting `LoadState`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use super::config::ConfigSubcommand;
use super::output::render;
use crate::api::SchoolApi;
use crate::config::{Config, OutputFormat};
use crate::models::{AttendancePeriod, Credentials, NewAnnouncement, NewClass, SettingsDocument};
use crate::operation::LoadState;
use crate::services::{AccountService, AnalyticsService, CommunicationService, DirectoryService};

/// schoolboard - command-line client for the school management API
#[derive(Parser, Debug)]
#[command(name = "schoolboard")]
#[command(about = "Command-line client for the school management API", long_about = None)]
pub struct Args {
    /// Enable debug logging (stderr)
    #[arg(long, short = 'd', global = true)]
    pub debug: bool,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format: json, yaml or table
    #[arg(long, short = 'o', global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

/// Main commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse and manage classes
    Classes {
        #[command(subcommand)]
        cmd: ClassesCommand,
    },
    /// Browse teachers
    Teachers {
        #[command(subcommand)]
        cmd: LookupCommand,
    },
    /// Browse subjects
    Subjects {
        #[command(subcommand)]
        cmd: LookupCommand,
    },
    /// Read and post announcements
    Announcements {
        #[command(subcommand)]
        cmd: AnnouncementsCommand,
    },
    /// Conversations and messages
    Messages {
        #[command(subcommand)]
        cmd: MessagesCommand,
    },
    /// Chart data
    Analytics {
        #[command(subcommand)]
        cmd: AnalyticsCommand,
    },
    /// General and user settings
    Settings {
        #[command(subcommand)]
        cmd: SettingsCommand,
    },
    /// Authentication
    Auth {
        #[command(subcommand)]
        cmd: AuthCommand,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Show version information
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ClassesCommand {
    /// List classes, optionally filtered by name or teacher
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one class
    Get { id: u64 },
    /// Create a class
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        teacher: String,
        /// Subject id (repeatable)
        #[arg(long = "subject")]
        subjects: Vec<u64>,
        #[arg(long)]
        students: Option<u32>,
    },
    /// Delete a class
    Delete { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum LookupCommand {
    /// List entries, optionally filtered
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one entry
    Get { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum AnnouncementsCommand {
    /// List announcements
    List,
    /// Post an announcement
    Post {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Audience (e.g. All, Parents, Students)
        #[arg(long, default_value = "All")]
        target: String,
        #[arg(long)]
        sender: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum MessagesCommand {
    /// List conversations
    Conversations,
    /// Show the messages of a conversation
    Show { id: u64 },
    /// Send a message
    Send {
        #[arg(long)]
        conversation: u64,
        #[arg(long)]
        sender: u64,
        #[arg(long)]
        content: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AnalyticsCommand {
    /// Score per class
    Performance {
        #[arg(long)]
        class_id: Option<u64>,
    },
    /// Attendance per period bucket
    Attendance {
        #[arg(long, default_value_t = AttendancePeriod::Week)]
        period: AttendancePeriod,
    },
    /// Score per subject
    Subjects,
    /// Class comparison series
    Comparison,
    /// Student performance trends
    Trends {
        #[arg(long)]
        class_id: Option<u64>,
    },
    /// Every chart at once
    Overview {
        #[arg(long)]
        class_id: Option<u64>,
        #[arg(long, default_value_t = AttendancePeriod::Week)]
        period: AttendancePeriod,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SettingsScope {
    General,
    User,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Show general settings
    General,
    /// Show user settings
    User,
    /// Replace settings with a JSON object
    Update {
        #[arg(long, value_enum, default_value_t = SettingsScope::General)]
        scope: SettingsScope,
        /// JSON object, e.g. '{"schoolName":"Springfield"}'
        document: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Show the current user
    Me,
    /// Log in
    Login {
        #[arg(long)]
        email: String,
        /// Environment variable holding the password
        #[arg(long, default_value = "SCHOOLBOARD_PASSWORD")]
        password_env: String,
    },
    /// Log out
    Logout,
}

/// Run an API-backed command
pub async fn run(command: Command, api: &SchoolApi, config: &Config) -> Result<()> {
    let format = config.output.format;
    let policy = config.operations.settle_policy;

    match command {
        Command::Classes { cmd } => {
            let directory = DirectoryService::new(api, policy);
            match cmd {
                ClassesCommand::List { search } => {
                    log_failure(directory.refresh_classes().await);
                    let view = directory.search(search.as_deref().unwrap_or_default());
                    emit(view.classes, format)
                }
                ClassesCommand::Get { id } => print(&directory.class(id).await?, format),
                ClassesCommand::Create {
                    name,
                    teacher,
                    subjects,
                    students,
                } => {
                    let created = directory
                        .add_class(NewClass {
                            name,
                            teacher,
                            subjects,
                            students,
                        })
                        .await?;
                    print(&created, format)
                }
                ClassesCommand::Delete { id } => {
                    directory.remove_class(id).await?;
                    println!("Class {} deleted", id);
                    Ok(())
                }
            }
        }
        Command::Teachers { cmd } => {
            let directory = DirectoryService::new(api, policy);
            match cmd {
                LookupCommand::List { search } => {
                    log_failure(directory.teachers().invoke(()).await);
                    emit(
                        directory.search(search.as_deref().unwrap_or_default()).teachers,
                        format,
                    )
                }
                LookupCommand::Get { id } => print(&directory.teacher(id).await?, format),
            }
        }
        Command::Subjects { cmd } => {
            let directory = DirectoryService::new(api, policy);
            match cmd {
                LookupCommand::List { search } => {
                    log_failure(directory.subjects().invoke(()).await);
                    emit(
                        directory.search(search.as_deref().unwrap_or_default()).subjects,
                        format,
                    )
                }
                LookupCommand::Get { id } => print(&directory.subject(id).await?, format),
            }
        }
        Command::Announcements { cmd } => {
            let comms = CommunicationService::new(api, policy);
            match cmd {
                AnnouncementsCommand::List => {
                    log_failure(comms.load_announcements().await);
                    emit(comms.announcements().load_state(), format)
                }
                AnnouncementsCommand::Post {
                    title,
                    content,
                    target,
                    sender,
                } => {
                    let created = comms
                        .post_announcement(NewAnnouncement {
                            title,
                            content,
                            target,
                            sender,
                        })
                        .await?;
                    print(&created, format)
                }
            }
        }
        Command::Messages { cmd } => {
            let comms = CommunicationService::new(api, policy);
            match cmd {
                MessagesCommand::Conversations => {
                    log_failure(comms.load_conversations().await);
                    emit(comms.conversations().load_state(), format)
                }
                MessagesCommand::Show { id } => {
                    log_failure(comms.open_conversation(id).await);
                    emit(comms.messages().load_state(), format)
                }
                MessagesCommand::Send {
                    conversation,
                    sender,
                    content,
                } => {
                    let sent = comms.send_message(conversation, sender, &content).await?;
                    // The message is out even if reloading the thread failed
                    match comms.messages().load_state() {
                        LoadState::Success(messages) => print(&messages, format),
                        _ => print(&sent, format),
                    }
                }
            }
        }
        Command::Analytics { cmd } => {
            let analytics = AnalyticsService::new(api, policy);
            match cmd {
                AnalyticsCommand::Performance { class_id } => {
                    print(&analytics.performance(class_id).await?, format)
                }
                AnalyticsCommand::Attendance { period } => {
                    print(&analytics.attendance(period).await?, format)
                }
                AnalyticsCommand::Subjects => {
                    print(&analytics.subject_performance().await?, format)
                }
                AnalyticsCommand::Comparison => print(&analytics.class_comparison().await?, format),
                AnalyticsCommand::Trends { class_id } => {
                    print(&analytics.student_trends(class_id).await?, format)
                }
                AnalyticsCommand::Overview { class_id, period } => {
                    let overview = analytics.load_overview(class_id, period).await;
                    emit_section("performance", overview.performance, format)?;
                    emit_section("attendance", overview.attendance, format)?;
                    emit_section("subject performance", overview.subject_performance, format)?;
                    emit_section("class comparison", overview.class_comparison, format)?;
                    emit_section("student trends", overview.student_trends, format)
                }
            }
        }
        Command::Settings { cmd } => {
            let account = AccountService::new(api, policy);
            match cmd {
                SettingsCommand::General => print(&account.general_settings().await?, format),
                SettingsCommand::User => print(&account.user_settings().await?, format),
                SettingsCommand::Update { scope, document } => {
                    let document: SettingsDocument = serde_json::from_str(&document)
                        .context("Settings document must be a JSON object")?;
                    let saved = match scope {
                        SettingsScope::General => account.update_general_settings(document).await?,
                        SettingsScope::User => account.update_user_settings(document).await?,
                    };
                    print(&saved, format)
                }
            }
        }
        Command::Auth { cmd } => {
            let account = AccountService::new(api, policy);
            match cmd {
                AuthCommand::Me => {
                    log_failure(account.current_user().await);
                    emit(account.current_user_state().load_state(), format)
                }
                AuthCommand::Login {
                    email,
                    password_env,
                } => {
                    let password = std::env::var(&password_env).with_context(|| {
                        format!(
                            "Environment variable {} not set (required for login)",
                            password_env
                        )
                    })?;
                    let session = account.login(Credentials { email, password }).await?;
                    print(&session, format)
                }
                AuthCommand::Logout => {
                    account.logout().await?;
                    println!("Logged out");
                    Ok(())
                }
            }
        }
        Command::Config { .. } | Command::Version => {
            anyhow::bail!("command does not use the API")
        }
    }
}

fn print<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

/// Render a settled state; a failed state becomes the command's error
fn emit<T: Serialize>(state: LoadState<T>, format: OutputFormat) -> Result<()> {
    match state {
        LoadState::Success(value) => print(&value, format),
        LoadState::Failed(err) => Err(err.into()),
        LoadState::Empty => {
            println!("No data");
            Ok(())
        }
        LoadState::Pending => {
            println!("Still loading");
            Ok(())
        }
    }
}

fn emit_section<T: Serialize>(
    title: &str,
    state: LoadState<T>,
    format: OutputFormat,
) -> Result<()> {
    println!("== {} ==", title);
    match state {
        LoadState::Failed(err) => {
            println!("Error loading {}: {}", title, err);
            Ok(())
        }
        other => emit(other, format),
    }
}

// The error is already kept in the binding's state, which is what gets rendered
fn log_failure<T, E: std::fmt::Display>(result: Result<T, E>) {
    if let Err(e) = result {
        tracing::debug!("Request failed: {}", e);
    }
}
