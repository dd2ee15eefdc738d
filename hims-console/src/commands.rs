//! Subcommand handlers
//!
//! Each handler loads the record(s) it acts on through a [`ListBinder`] so
//! the same local gates apply as in the list pages, then runs the flow.

use crate::cli::{
    CaseCommand, Cli, Command, PackageCommand, PolicyCommand, PreauthCommand, ResourceCommand,
    RoomCommand, UnitCommand,
};
use crate::output::{self, ConsoleNotifier};
use anyhow::{Context as _, anyhow};
use hims_client::api::{PackInstall, PolicyWizard};
use hims_client::{
    ClientConfig, DeactivationFlow, HimsClient, ListBinder, ListSource, NetworkHttpClient, Notice,
    Notifier, PreauthFlow, TransitionFlow, WorkflowFlow,
};
use shared::lifecycle::ActionMenu;
use shared::models::{
    CaseFilter, PackageFilter, PolicyPack, PolicyTemplate, PreauthFilter, UnitFilter,
};
use std::sync::Arc;

struct Context {
    client: HimsClient<NetworkHttpClient>,
    config: ClientConfig,
    notifier: Arc<dyn Notifier>,
}

impl Context {
    fn new(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = ClientConfig::from_env()?;
        if let Some(url) = &cli.base_url {
            config.base_url = url.clone();
        }
        if let Some(token) = &cli.token {
            config = config.with_token(token);
        }
        if let Some(branch) = &cli.branch {
            config = config.with_branch_id(branch);
        }
        tracing::debug!(base_url = %config.base_url, branch = ?config.branch_id, "Console configured");
        let client = HimsClient::from_config(&config).context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            config,
            notifier: Arc::new(ConsoleNotifier),
        })
    }

    /// Binder holding just the record `id`, loaded as the detail
    async fn detail_binder<S: ListSource>(
        &self,
        source: &Arc<S>,
        id: &str,
    ) -> anyhow::Result<ListBinder<S>> {
        let binder = self.client.binder(source, self.notifier.clone());
        binder.open_detail(id).await?;
        Ok(binder)
    }

    async fn list<S: ListSource>(
        &self,
        source: &Arc<S>,
        filter: S::Filter,
        label: &str,
    ) -> anyhow::Result<Vec<S::Row>> {
        let binder = self
            .client
            .binder(source, self.notifier.clone())
            .with_label(label)
            .with_filter(filter)
            .await;
        binder.refresh().await?;
        Ok(binder.rows().await)
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context::new(&cli)?;
    match cli.command {
        Command::Cases(cmd) => cases(&ctx, cmd).await,
        Command::Preauth(cmd) => preauth(&ctx, cmd).await,
        Command::Resources(cmd) => resources(&ctx, cmd).await,
        Command::Rooms(cmd) => rooms(&ctx, cmd).await,
        Command::Units(cmd) => units(&ctx, cmd).await,
        Command::Packages(cmd) => packages(&ctx, cmd).await,
        Command::Policies(cmd) => policies(&ctx, cmd).await,
    }
}

async fn cases(ctx: &Context, cmd: CaseCommand) -> anyhow::Result<()> {
    let api = &ctx.client.cases;
    match cmd {
        CaseCommand::List {
            q,
            status,
            payer,
            case_type,
        } => {
            let filter = CaseFilter {
                q,
                status,
                payer_id: payer,
                case_type,
            };
            for row in ctx.list(api, filter, "insurance cases").await? {
                println!("{}", output::case_line(&row));
            }
        }
        CaseCommand::Transition { id, target } => {
            let binder = ctx.detail_binder(api, &id).await?;
            TransitionFlow::new(api.clone(), ctx.notifier.clone())
                .submit(&binder, &id, target, None)
                .await?;
        }
        CaseCommand::Menu { status, json } => {
            let menu = ActionMenu::for_status(status);
            if json {
                println!("{}", serde_json::to_string_pretty(&menu)?);
            } else {
                for line in output::menu_lines(&menu) {
                    println!("{line}");
                }
            }
        }
    }
    Ok(())
}

async fn preauth(ctx: &Context, cmd: PreauthCommand) -> anyhow::Result<()> {
    let api = &ctx.client.preauth;
    let flow = PreauthFlow::new(api.clone(), ctx.notifier.clone());
    match cmd {
        PreauthCommand::List { q, status, case } => {
            let filter = PreauthFilter {
                q,
                status,
                insurance_case_id: case,
            };
            for row in ctx.list(api, filter, "preauth requests").await? {
                println!("{}", output::preauth_line(&row));
            }
        }
        PreauthCommand::Submit { id } => {
            let binder = ctx.detail_binder(api, &id).await?;
            flow.submit(&binder, &id).await?;
        }
        PreauthCommand::Approve {
            id,
            amount,
            valid_till,
        } => {
            let binder = ctx.detail_binder(api, &id).await?;
            flow.approve(&binder, &id, &amount, valid_till.as_deref())
                .await?;
        }
        PreauthCommand::Reject { id, reason } => {
            let binder = ctx.detail_binder(api, &id).await?;
            flow.reject(&binder, &id, &reason.reason).await?;
        }
        PreauthCommand::Query {
            id,
            text,
            source,
            deadline,
        } => {
            let binder = ctx.detail_binder(api, &id).await?;
            flow.add_query(&binder, &id, &text, source, deadline.as_deref())
                .await?;
        }
    }
    Ok(())
}

async fn resources(ctx: &Context, cmd: ResourceCommand) -> anyhow::Result<()> {
    let api = &ctx.client.resources;
    match cmd {
        ResourceCommand::Show { id } => {
            let resource = api.fetch(&id).await?;
            for line in output::resource_lines(&resource) {
                println!("{line}");
            }
            for line in output::menu_lines(&ActionMenu::for_status(resource.current_state)) {
                println!("  -> {line}");
            }
        }
        ResourceCommand::SetState { id, state, reason } => {
            let binder = ctx.detail_binder(api, &id).await?;
            TransitionFlow::new(api.clone(), ctx.notifier.clone())
                .submit(&binder, &id, state, reason.as_deref())
                .await?;
        }
        ResourceCommand::Deactivate { id, reason } => {
            let binder = ctx.detail_binder(api, &id).await?;
            DeactivationFlow::new(api.clone(), ctx.notifier.clone())
                .deactivate(&binder, &id, &reason.reason)
                .await?;
        }
    }
    Ok(())
}

async fn rooms(ctx: &Context, cmd: RoomCommand) -> anyhow::Result<()> {
    let api = &ctx.client.rooms;
    match cmd {
        RoomCommand::Deactivate {
            id,
            reason,
            no_cascade,
        } => {
            let binder = ctx.detail_binder(api, &id).await?;
            DeactivationFlow::new(api.clone(), ctx.notifier.clone())
                .with_cascade(!no_cascade)
                .deactivate(&binder, &id, &reason.reason)
                .await?;
        }
    }
    Ok(())
}

async fn units(ctx: &Context, cmd: UnitCommand) -> anyhow::Result<()> {
    let api = &ctx.client.units;
    match cmd {
        UnitCommand::List { q, include_inactive } => {
            let filter = UnitFilter {
                branch_id: ctx.config.require_branch()?.to_string(),
                q,
                include_inactive: include_inactive.then_some(true),
                ..UnitFilter::default()
            };
            for row in ctx.list(api, filter, "units").await? {
                println!("{}", output::unit_line(&row));
            }
        }
        UnitCommand::Deactivate { id, reason } => {
            let binder = ctx.detail_binder(api, &id).await?;
            DeactivationFlow::new(api.clone(), ctx.notifier.clone())
                .deactivate(&binder, &id, &reason.reason)
                .await?;
        }
    }
    Ok(())
}

async fn packages(ctx: &Context, cmd: PackageCommand) -> anyhow::Result<()> {
    let api = &ctx.client.packages;
    match cmd {
        PackageCommand::List {
            q,
            status,
            include_retired,
        } => {
            let filter = PackageFilter {
                q,
                status,
                include_retired,
                ..PackageFilter::for_branch(ctx.config.require_branch()?)
            };
            for row in ctx.list(api, filter, "service packages").await? {
                println!("{}", output::package_line(&row));
            }
        }
        PackageCommand::Workflow { id, action, note } => {
            let binder = ctx.detail_binder(api, &id).await?;
            WorkflowFlow::new(api.clone(), ctx.notifier.clone())
                .run(&binder, &id, action, note.as_deref())
                .await?;
        }
    }
    Ok(())
}

async fn policies(ctx: &Context, cmd: PolicyCommand) -> anyhow::Result<()> {
    let api = &ctx.client.governance;
    match cmd {
        PolicyCommand::List => {
            for policy in api.list_policies().await? {
                println!("{}", output::policy_line(&policy));
            }
        }
        PolicyCommand::Templates => {
            for template in PolicyTemplate::ALL {
                for line in output::template_lines(template, &template.defaults()) {
                    println!("{line}");
                }
            }
        }
        PolicyCommand::Show { code } => {
            let detail = api.policy(&code).await?;
            let template = PolicyTemplate::guess(&detail.code, &detail.policy_type);
            println!("{}\t{}\t{}", detail.code, detail.name, detail.policy_type);
            match detail.draft {
                Some(draft) => {
                    let values = template.values_from_payload(&draft.payload.unwrap_or_default());
                    println!("draft {}:", draft.id);
                    for line in values.summary() {
                        println!("  {line}");
                    }
                }
                None => println!("no open draft"),
            }
        }
        PolicyCommand::Create {
            template,
            code,
            name,
            description,
            settings,
            effective_at,
            notes,
        } => {
            let mut wizard = PolicyWizard::new(template);
            wizard.next();
            if let Some(code) = code {
                wizard.code = code;
            }
            if let Some(name) = name {
                wizard.name = name;
            }
            if let Some(description) = description {
                wizard.description = description;
            }
            for (key, value) in &settings {
                wizard.values.set(key, value)?;
            }
            wizard.effective_at = effective_at;
            wizard.notes = notes;
            println!("{}", wizard.next().label());
            for line in wizard.review() {
                println!("  {line}");
            }
            api.create_with_draft(&wizard).await?;
            ctx.notifier.notify(Notice::success(
                "Policy created",
                "Draft created. Open the policy to review and submit for approval.",
            ));
        }
        PolicyCommand::Packs => {
            for pack in PolicyPack::all() {
                println!("{}\t{}\t[{}]", pack.id, pack.name, pack.tag);
                for item in &pack.items {
                    println!("  {}\t{}", item.template(), item.note.unwrap_or("-"));
                }
            }
        }
        PolicyCommand::InstallPack {
            pack,
            only,
            settings,
            note,
        } => {
            let pack = PolicyPack::find(&pack)
                .ok_or_else(|| anyhow!("Unknown policy pack: {pack}"))?;
            let mut install = PackInstall::new(pack);
            if !only.is_empty() {
                install.select_only(&only);
            }
            install.next();
            let pack_name = install.pack().name;
            for (key, value) in &settings {
                let (template, field) = key
                    .split_once('.')
                    .ok_or_else(|| anyhow!("expected TEMPLATE.KEY=VALUE, got {key}"))?;
                let template: PolicyTemplate = template.parse()?;
                install
                    .values_mut(template)
                    .ok_or_else(|| anyhow!("{pack_name} has no {template} policy"))?
                    .set(field, value)?;
            }
            install.install_note = note;
            install.next();
            for item in install.chosen() {
                for line in output::template_lines(item.template(), &item.values) {
                    println!("{line}");
                }
            }
            let count = api.install_pack(&install).await?;
            ctx.notifier.notify(Notice::success(
                "Pack installed as Drafts",
                format!(
                    "Created/updated {count} draft policy versions. You can review and submit later."
                ),
            ));
        }
    }
    Ok(())
}
