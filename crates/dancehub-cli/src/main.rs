use anyhow::{Result, bail};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use dancehub::modules::registrations::state_machine::Actor;
use dancehub_cli::{
    RegistrationScenario, effective, menu, overrides_from_flags, parse_role, registration, route,
};
use dancehub_models::{EventStatus, RegistrationStats, RegistrationStatus};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "dancehub-cli")]
#[command(
    about = "DanceHub CLI - Inspect permissions, menus and registration rules",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OverrideArgs {
    /// Permission code granted on top of the role defaults (repeatable)
    #[arg(long = "grant")]
    grants: Vec<String>,

    /// Permission code revoked from the role defaults (repeatable)
    #[arg(long = "revoke")]
    revokes: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective permission set of a role
    Effective {
        /// admin, academy, teacher or dancer
        #[arg(short = 'r', long)]
        role: String,

        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Print the navigation tree a role sees
    Menu {
        #[arg(short = 'r', long)]
        role: String,

        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Print the route guard decision for an SPA path
    Route {
        /// Location as typed in the browser, e.g. `/events/42?tab=academies`
        path: String,

        /// Omit to evaluate an anonymous visitor
        #[arg(short = 'r', long)]
        role: Option<String>,

        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Print completeness, flags and available actions for a registration
    Registration {
        #[arg(long, value_enum, default_value = "accepted")]
        status: StatusArg,

        #[arg(long, default_value = "0")]
        choreographies: u32,

        #[arg(long, default_value = "0")]
        dancers: u32,

        #[arg(long, default_value = "0")]
        coaches: u32,

        #[arg(long, default_value = "0")]
        apparel: u32,

        /// Backend event status; omitted means derived from dates
        #[arg(long, value_enum)]
        event_status: Option<EventStatusArg>,

        /// Update deadline relative to now, in days (negative for past)
        #[arg(long, allow_hyphen_values = true)]
        deadline_in_days: Option<i64>,

        #[arg(long, value_enum, default_value = "academy")]
        actor: ActorArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Invited,
    Accepted,
    Rejected,
    Registered,
    Completed,
}

impl From<StatusArg> for RegistrationStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Invited => RegistrationStatus::Invited,
            StatusArg::Accepted => RegistrationStatus::Accepted,
            StatusArg::Rejected => RegistrationStatus::Rejected,
            StatusArg::Registered => RegistrationStatus::Registered,
            StatusArg::Completed => RegistrationStatus::Completed,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum EventStatusArg {
    Draft,
    Open,
    Closed,
    Finished,
}

impl From<EventStatusArg> for EventStatus {
    fn from(arg: EventStatusArg) -> Self {
        match arg {
            EventStatusArg::Draft => EventStatus::Draft,
            EventStatusArg::Open => EventStatus::Open,
            EventStatusArg::Closed => EventStatus::Closed,
            EventStatusArg::Finished => EventStatus::Finished,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ActorArg {
    Academy,
    Admin,
}

impl From<ActorArg> for Actor {
    fn from(arg: ActorArg) -> Self {
        match arg {
            ActorArg::Academy => Actor::Academy,
            ActorArg::Admin => Actor::Admin,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Effective { role, overrides } => {
            let role = parse_role(&role)?;
            let overrides = overrides_from_flags(&overrides.grants, &overrides.revokes);
            print_json(&effective(role, &overrides))
        }
        Commands::Menu { role, overrides } => {
            let role = parse_role(&role)?;
            let overrides = overrides_from_flags(&overrides.grants, &overrides.revokes);
            print_json(&menu(role, &overrides))
        }
        Commands::Route {
            path,
            role,
            overrides,
        } => {
            if !path.starts_with('/') {
                bail!("Path must start with `/`, got `{path}`");
            }
            let role = role.as_deref().map(parse_role).transpose()?;
            let overrides = overrides_from_flags(&overrides.grants, &overrides.revokes);
            print_json(&route(&path, role, &overrides))
        }
        Commands::Registration {
            status,
            choreographies,
            dancers,
            coaches,
            apparel,
            event_status,
            deadline_in_days,
            actor,
        } => {
            let scenario = RegistrationScenario {
                status: status.into(),
                stats: RegistrationStats {
                    choreographies,
                    dancers,
                    coaches,
                    apparel,
                },
                event_status: event_status.map(Into::into),
                deadline_in_days,
                actor: actor.into(),
            };
            print_json(&registration(&scenario, Utc::now()))
        }
    }
}
