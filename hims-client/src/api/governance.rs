//! Governance policies
//!
//! A new policy is created in three calls: the policy itself, an empty
//! draft version for its code, then a PATCH filling the draft. Pack
//! installation repeats this per policy, reusing a policy or draft that
//! already exists.

use super::get_list;
use crate::{ClientError, ClientResult, HttpClient};
use serde_json::Value;
use shared::form::{self, MAX_NAME_LEN};
use shared::models::{
    PackItem, Policy, PolicyCreate, PolicyDetail, PolicyDraft, PolicyPack, PolicyTemplate,
    PolicyVersionUpdate, TemplateValues,
};
use shared::query::segment;
use shared::{AppError, ErrorCode};
use std::sync::Arc;

const POLICIES: &str = "/api/governance/policies";
const VERSIONS: &str = "/api/governance/policy-versions";

/// `/api/governance`
pub struct GovernanceApi<C> {
    http: Arc<C>,
}

impl<C: HttpClient> GovernanceApi<C> {
    pub fn new(http: Arc<C>) -> Self {
        Self { http }
    }

    pub async fn list_policies(&self) -> ClientResult<Vec<Policy>> {
        get_list(self.http.as_ref(), POLICIES).await
    }

    pub async fn policy(&self, code: &str) -> ClientResult<PolicyDetail> {
        let path = format!("{}/{}", POLICIES, segment(code));
        self.http.get(&path).await
    }

    pub async fn create_policy(&self, payload: &PolicyCreate) -> ClientResult<Policy> {
        self.http.post(POLICIES, payload).await
    }

    /// Open an empty draft version for `code`
    pub async fn create_draft(&self, code: &str) -> ClientResult<PolicyDraft> {
        let path = format!("{}/{}/drafts", POLICIES, segment(code));
        self.http.post_empty(&path).await
    }

    pub async fn update_version(
        &self,
        draft_id: &str,
        update: &PolicyVersionUpdate,
    ) -> ClientResult<Value> {
        let path = format!("{}/{}", VERSIONS, segment(draft_id));
        self.http.patch(&path, update).await
    }

    /// Validate the wizard, then create policy, draft and first version
    pub async fn create_with_draft(&self, wizard: &PolicyWizard) -> ClientResult<PolicyDraft> {
        let (create, update) = wizard.validate()?;
        let policy = self.create_policy(&create).await?;
        let draft = self.create_draft(&policy.code).await?;
        self.update_version(&draft.id, &update).await?;
        tracing::info!(code = %policy.code, draft_id = %draft.id, "Governance policy drafted");
        Ok(draft)
    }

    /// Install every selected pack policy as a draft version. Returns the
    /// number of drafts written. Stops at the first failure; drafts already
    /// written stay.
    pub async fn install_pack(&self, install: &PackInstall) -> ClientResult<usize> {
        let drafts = install.plan()?;
        for (template, update) in &drafts {
            self.ensure_policy(*template).await?;
            let draft_id = self.ensure_draft(template.code()).await?;
            self.update_version(&draft_id, update).await?;
            tracing::debug!(code = template.code(), %draft_id, "Pack policy drafted");
        }
        tracing::info!(pack = install.pack().id, count = drafts.len(), "Policy pack installed");
        Ok(drafts.len())
    }

    async fn ensure_policy(&self, template: PolicyTemplate) -> ClientResult<()> {
        if self.policy(template.code()).await.is_ok() {
            return Ok(());
        }
        let create = PolicyCreate {
            code: template.code().to_string(),
            name: template.name().to_string(),
            policy_type: template.policy_type().to_string(),
            description: Some(template.description().to_string()),
        };
        self.create_policy(&create).await?;
        Ok(())
    }

    /// New draft, or the open one when the backend refuses a second draft
    async fn ensure_draft(&self, code: &str) -> ClientResult<String> {
        match self.create_draft(code).await {
            Ok(draft) => Ok(draft.id),
            Err(e) => {
                tracing::debug!(code, error = %e, "Draft not created, loading the open one");
                self.policy(code)
                    .await?
                    .draft
                    .map(|d| d.id)
                    .ok_or_else(|| {
                        ClientError::NotFound(
                            "Draft already exists but could not be loaded.".to_string(),
                        )
                    })
            }
        }
    }
}

// ── Create-policy wizard ────────────────────────────────────────────

/// Steps of the create-policy wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    ChooseTemplate,
    Configure,
    Review,
}

impl WizardStep {
    pub fn next(self) -> Self {
        match self {
            Self::ChooseTemplate => Self::Configure,
            Self::Configure | Self::Review => Self::Review,
        }
    }

    pub fn back(self) -> Self {
        match self {
            Self::ChooseTemplate | Self::Configure => Self::ChooseTemplate,
            Self::Review => Self::Configure,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ChooseTemplate => "1. Choose template",
            Self::Configure => "2. Configure",
            Self::Review => "3. Review",
        }
    }
}

/// Input of the create-policy wizard
///
/// Choosing a template seeds code, name, description and values, and
/// clears the effective date and notes. A blank code falls back to the
/// template's code.
#[derive(Debug, Clone)]
pub struct PolicyWizard {
    step: WizardStep,
    template: PolicyTemplate,
    pub code: String,
    pub name: String,
    pub description: String,
    pub values: TemplateValues,
    /// Local date-time (`2026-03-01T09:30`) or RFC 3339; blank for none
    pub effective_at: String,
    pub notes: String,
}

impl Default for PolicyWizard {
    fn default() -> Self {
        Self::new(PolicyTemplate::ExportGuardrails)
    }
}

impl PolicyWizard {
    pub fn new(template: PolicyTemplate) -> Self {
        Self {
            step: WizardStep::ChooseTemplate,
            template,
            code: template.code().to_string(),
            name: template.name().to_string(),
            description: template.description().to_string(),
            values: template.defaults(),
            effective_at: String::new(),
            notes: String::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn template(&self) -> PolicyTemplate {
        self.template
    }

    /// Switch template and reseed every field from it
    pub fn choose_template(&mut self, template: PolicyTemplate) {
        *self = Self {
            step: self.step,
            ..Self::new(template)
        };
    }

    pub fn next(&mut self) -> WizardStep {
        self.step = self.step.next();
        self.step
    }

    pub fn back(&mut self) -> WizardStep {
        self.step = self.step.back();
        self.step
    }

    /// Lines of the review step
    pub fn review(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{} ({})", self.name.trim(), self.final_code()),
            format!("Type: {}", self.template.policy_type()),
        ];
        lines.extend(self.values.summary());
        if let Some(notes) = form::optional_text(&self.notes) {
            lines.push(format!("Notes: {notes}"));
        }
        lines
    }

    fn final_code(&self) -> String {
        let code = if self.code.is_empty() {
            self.template.code()
        } else {
            self.code.as_str()
        };
        form::normalize_policy_code(code)
    }

    /// Normalised policy and version payloads, or the first validation error
    pub fn validate(&self) -> ClientResult<(PolicyCreate, PolicyVersionUpdate)> {
        let code = self.final_code();
        if code.trim_matches('_').is_empty() {
            return Err(AppError::new(ErrorCode::PolicyCodeRequired).into());
        }
        if form::optional_text(&self.name).is_none() {
            return Err(AppError::new(ErrorCode::PolicyNameRequired).into());
        }
        let name = form::bounded_text(&self.name, "Policy name", MAX_NAME_LEN)?;
        if self.values.template() != self.template {
            return Err(AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("Values do not belong to {}", self.template.name()),
            )
            .into());
        }

        let create = PolicyCreate {
            code,
            name,
            policy_type: self.template.policy_type().to_string(),
            description: form::optional_text(&self.description),
        };
        let mut update = PolicyVersionUpdate::all_branches(self.values.to_payload());
        update.notes = form::optional_text(&self.notes);
        update.effective_at = form::optional_datetime(&self.effective_at, "Effective at")?;
        Ok((create, update))
    }
}

// ── Pack installation ───────────────────────────────────────────────

/// Steps of the pack installer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackStep {
    #[default]
    Select,
    Customize,
    Review,
}

impl PackStep {
    pub fn next(self) -> Self {
        match self {
            Self::Select => Self::Customize,
            Self::Customize | Self::Review => Self::Review,
        }
    }

    pub fn back(self) -> Self {
        match self {
            Self::Select | Self::Customize => Self::Select,
            Self::Review => Self::Customize,
        }
    }
}

/// A pack being installed: which of its policies are chosen, their values
/// and a note added to every draft
#[derive(Debug, Clone)]
pub struct PackInstall {
    pack: PolicyPack,
    selected: Vec<bool>,
    step: PackStep,
    pub install_note: String,
}

impl PackInstall {
    /// Every policy of the pack starts selected
    pub fn new(pack: PolicyPack) -> Self {
        let selected = vec![true; pack.items.len()];
        Self {
            pack,
            selected,
            step: PackStep::Select,
            install_note: String::new(),
        }
    }

    pub fn pack(&self) -> &PolicyPack {
        &self.pack
    }

    pub fn step(&self) -> PackStep {
        self.step
    }

    pub fn next(&mut self) -> PackStep {
        self.step = self.step.next();
        self.step
    }

    pub fn back(&mut self) -> PackStep {
        self.step = self.step.back();
        self.step
    }

    /// Select or deselect a template; false when the pack does not carry it
    pub fn select(&mut self, template: PolicyTemplate, selected: bool) -> bool {
        match self.position(template) {
            Some(i) => {
                self.selected[i] = selected;
                true
            }
            None => false,
        }
    }

    /// Keep only `templates` selected
    pub fn select_only(&mut self, templates: &[PolicyTemplate]) {
        for (item, slot) in self.pack.items.iter().zip(self.selected.iter_mut()) {
            *slot = templates.contains(&item.template());
        }
    }

    pub fn values_mut(&mut self, template: PolicyTemplate) -> Option<&mut TemplateValues> {
        let i = self.position(template)?;
        Some(&mut self.pack.items[i].values)
    }

    pub fn chosen(&self) -> impl Iterator<Item = &PackItem> {
        self.pack
            .items
            .iter()
            .zip(&self.selected)
            .filter(|(_, selected)| **selected)
            .map(|(item, _)| item)
    }

    /// Version update per chosen policy, or an error when none is chosen
    pub fn plan(&self) -> ClientResult<Vec<(PolicyTemplate, PolicyVersionUpdate)>> {
        let install_note = form::optional_text(&self.install_note);
        let drafts: Vec<_> = self
            .chosen()
            .map(|item| {
                let notes: Vec<String> = install_note
                    .iter()
                    .cloned()
                    .chain(item.note.and_then(form::optional_text))
                    .collect();
                let mut update = PolicyVersionUpdate::all_branches(item.values.to_payload());
                if !notes.is_empty() {
                    update.notes = Some(notes.join(" • "));
                }
                (item.template(), update)
            })
            .collect();
        if drafts.is_empty() {
            return Err(AppError::new(ErrorCode::NoPolicySelected).into());
        }
        Ok(drafts)
    }

    fn position(&self, template: PolicyTemplate) -> Option<usize> {
        self.pack.items.iter().position(|i| i.template() == template)
    }
}
