//! Command line definition

use clap::{Args, Parser, Subcommand};
use shared::lifecycle::{CaseStatus, PackageStatus, PreauthStatus, ResourceState, WorkflowAction};
use shared::models::{CaseType, PolicyTemplate, QuerySource};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "hims", version, about = "Hospital administration console")]
pub struct Cli {
    /// API base URL
    #[arg(long, env = "HIMS_API_URL", global = true)]
    pub base_url: Option<String>,

    /// Bearer token
    #[arg(long, env = "HIMS_API_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Branch for branch-scoped lists
    #[arg(long, env = "HIMS_BRANCH_ID", global = true)]
    pub branch: Option<String>,

    /// Directory for daily rolling log files
    #[arg(long, env = "HIMS_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Insurance cases
    #[command(subcommand)]
    Cases(CaseCommand),
    /// Pre-authorization requests
    #[command(subcommand)]
    Preauth(PreauthCommand),
    /// Infrastructure resources (beds, OT tables, ...)
    #[command(subcommand)]
    Resources(ResourceCommand),
    #[command(subcommand)]
    Rooms(RoomCommand),
    #[command(subcommand)]
    Units(UnitCommand),
    /// Service packages
    #[command(subcommand)]
    Packages(PackageCommand),
    /// Governance policies, templates and packs
    #[command(subcommand)]
    Policies(PolicyCommand),
}

/// Mandatory-in-practice reason; blank is rejected before any request
#[derive(Debug, Args)]
pub struct ReasonArg {
    #[arg(long, default_value = "")]
    pub reason: String,
}

#[derive(Debug, Subcommand)]
pub enum CaseCommand {
    List {
        #[arg(long)]
        q: Option<String>,
        #[arg(long)]
        status: Option<CaseStatus>,
        #[arg(long)]
        payer: Option<String>,
        #[arg(long)]
        case_type: Option<CaseType>,
    },
    /// Move a case to another status
    Transition { id: String, target: CaseStatus },
    /// Transitions offered from a status
    Menu {
        status: CaseStatus,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum PreauthCommand {
    List {
        #[arg(long)]
        q: Option<String>,
        #[arg(long)]
        status: Option<PreauthStatus>,
        #[arg(long)]
        case: Option<String>,
    },
    Submit { id: String },
    Approve {
        id: String,
        /// Approved amount
        amount: String,
        #[arg(long)]
        valid_till: Option<String>,
    },
    Reject {
        id: String,
        #[command(flatten)]
        reason: ReasonArg,
    },
    /// Raise a query
    Query {
        id: String,
        text: String,
        #[arg(long, default_value = "TPA")]
        source: QuerySource,
        #[arg(long)]
        deadline: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ResourceCommand {
    Show { id: String },
    SetState {
        id: String,
        state: ResourceState,
        #[arg(long)]
        reason: Option<String>,
    },
    Deactivate {
        id: String,
        #[command(flatten)]
        reason: ReasonArg,
    },
}

#[derive(Debug, Subcommand)]
pub enum RoomCommand {
    /// Deactivate a room and, unless --no-cascade, its resources
    Deactivate {
        id: String,
        #[command(flatten)]
        reason: ReasonArg,
        /// Leave the room's resources active
        #[arg(long)]
        no_cascade: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum UnitCommand {
    List {
        #[arg(long)]
        q: Option<String>,
        #[arg(long)]
        include_inactive: bool,
    },
    Deactivate {
        id: String,
        #[command(flatten)]
        reason: ReasonArg,
    },
}

#[derive(Debug, Subcommand)]
pub enum PackageCommand {
    List {
        #[arg(long)]
        q: Option<String>,
        #[arg(long)]
        status: Option<PackageStatus>,
        #[arg(long)]
        include_retired: bool,
    },
    /// submit | approve | publish | retire
    Workflow {
        id: String,
        action: WorkflowAction,
        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum PolicyCommand {
    List,
    /// Built-in templates and their default settings
    Templates,
    /// A policy and the settings of its open draft
    Show { code: String },
    /// Create a policy from a template, with a first draft version
    Create {
        template: PolicyTemplate,
        /// Defaults to the template code
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Setting override, e.g. `--set maxRows=100000`
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_setting)]
        settings: Vec<(String, String)>,
        /// Local date-time or RFC 3339
        #[arg(long, default_value = "")]
        effective_at: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Policy packs
    Packs,
    /// Install a pack's policies as draft versions
    InstallPack {
        pack: String,
        /// Install only these templates (default: all of the pack)
        #[arg(long)]
        only: Vec<PolicyTemplate>,
        /// Setting override per template, e.g. `--set BREAK_GLASS.autoExpireMinutes=30`
        #[arg(long = "set", value_name = "TEMPLATE.KEY=VALUE", value_parser = parse_setting)]
        settings: Vec<(String, String)>,
        /// Note added to every draft
        #[arg(long, default_value = "")]
        note: String,
    },
}

/// `KEY=VALUE`; the value may itself contain `=`
pub fn parse_setting(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got {raw:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_transition() {
        let cli = Cli::try_parse_from(["hims", "cases", "transition", "c-1", "POLICY_VERIFIED"])
            .unwrap();
        match cli.command {
            Command::Cases(CaseCommand::Transition { id, target }) => {
                assert_eq!(id, "c-1");
                assert_eq!(target, CaseStatus::PolicyVerified);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_room_cascade_can_be_turned_off() {
        let cli = Cli::try_parse_from([
            "hims", "rooms", "deactivate", "room-1", "--reason", "Flooded", "--no-cascade",
        ])
        .unwrap();
        match cli.command {
            Command::Rooms(RoomCommand::Deactivate {
                id,
                reason,
                no_cascade,
            }) => {
                assert_eq!(id, "room-1");
                assert_eq!(reason.reason, "Flooded");
                assert!(no_cascade);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_policy_create() {
        let cli = Cli::try_parse_from([
            "hims",
            "policies",
            "create",
            "export_guardrails",
            "--set",
            "maxRows=100000",
            "--set",
            "defaultScope=[\"VIEW\"]",
            "--effective-at",
            "2026-04-01T09:00",
        ])
        .unwrap();
        match cli.command {
            Command::Policies(PolicyCommand::Create {
                template,
                code,
                settings,
                effective_at,
                ..
            }) => {
                assert_eq!(template, PolicyTemplate::ExportGuardrails);
                assert!(code.is_none());
                assert_eq!(settings[0], ("maxRows".to_string(), "100000".to_string()));
                assert_eq!(settings[1].1, "[\"VIEW\"]");
                assert_eq!(effective_at, "2026-04-01T09:00");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_install_pack() {
        let cli = Cli::try_parse_from([
            "hims",
            "policies",
            "install-pack",
            "privacy_compliance_strict",
            "--only",
            "BREAK_GLASS",
            "--only",
            "AUDIT_LOGGING",
            "--set",
            "BREAK_GLASS.autoExpireMinutes=30",
        ])
        .unwrap();
        match cli.command {
            Command::Policies(PolicyCommand::InstallPack {
                pack, only, settings, note,
            }) => {
                assert_eq!(pack, "privacy_compliance_strict");
                assert_eq!(only, vec![PolicyTemplate::BreakGlass, PolicyTemplate::AuditLogging]);
                assert_eq!(settings[0].0, "BREAK_GLASS.autoExpireMinutes");
                assert!(note.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_bad_setting_is_rejected() {
        assert!(parse_setting("maxRows").is_err());
        assert!(parse_setting("=5").is_err());
        assert_eq!(parse_setting("a=b=c").unwrap(), ("a".to_string(), "b=c".to_string()));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(Cli::try_parse_from(["hims", "cases", "menu", "NOPE"]).is_err());
    }

    #[test]
    fn test_reason_defaults_blank() {
        let cli = Cli::try_parse_from(["hims", "rooms", "deactivate", "room-1"]).unwrap();
        match cli.command {
            Command::Rooms(RoomCommand::Deactivate {
                reason, no_cascade, ..
            }) => {
                assert!(reason.reason.is_empty());
                assert!(!no_cascade);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
