//! Line-oriented output

use hims_client::{Notice, Notifier};
use shared::lifecycle::{ActionMenu, Lifecycle};
use shared::models::{
    InsuranceCase, Policy, PolicyTemplate, PreauthRequest, Resource, ServicePackage,
    TemplateValues, Unit,
};

/// Prints successful outcomes on stdout. Failures are returned as errors and
/// reported once by `main`.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        if notice.is_error() {
            tracing::debug!(%notice, "notice");
        } else {
            println!("{notice}");
        }
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

pub fn case_line(c: &InsuranceCase) -> String {
    let patient = c.patient.as_ref().map(|p| format!("{} ({})", p.name, p.uhid));
    let payer = c.payer.as_ref().map(|p| p.name.as_str());
    format!(
        "{}\t{}\t{}\t{}\t{}",
        c.id,
        c.case_number,
        c.status,
        or_dash(patient.as_deref()),
        or_dash(payer)
    )
}

pub fn preauth_line(p: &PreauthRequest) -> String {
    let approved = p.approved_amount.map(|a| a.to_string());
    format!(
        "{}\t{}\t{}\trequested={}\tapproved={}",
        p.id,
        p.request_number,
        p.status,
        p.requested_amount.map(|a| a.to_string()).as_deref().unwrap_or("-"),
        or_dash(approved.as_deref())
    )
}

pub fn resource_lines(r: &Resource) -> Vec<String> {
    let mut lines = vec![
        format!("id:       {}", r.id),
        format!("code:     {}", r.code),
        format!("name:     {}", r.name),
        format!("type:     {}", r.resource_type),
        format!("state:    {}", r.current_state),
        format!("active:   {}", r.is_active),
    ];
    if let Some(reason) = r.state_reason() {
        lines.push(format!("reason:   {reason}"));
    }
    lines
}

pub fn unit_line(u: &Unit) -> String {
    let state = if u.is_active { "active" } else { "inactive" };
    format!("{}\t{}\t{}\t{}", u.id, u.code, u.name, state)
}

pub fn package_line(p: &ServicePackage) -> String {
    format!(
        "{}\t{}\t{}\t{}\tv{}\t{} components",
        p.id,
        p.code,
        p.name,
        p.status,
        p.version,
        p.active_components().count()
    )
}

pub fn policy_line(p: &Policy) -> String {
    format!("{}\t{}\t{}\t{}", p.id, p.code, p.name, p.policy_type)
}

/// Template heading followed by its settings in plain language
pub fn template_lines(template: PolicyTemplate, values: &TemplateValues) -> Vec<String> {
    let mut lines = vec![format!(
        "{}\t{}\t{}\t(type {})",
        template,
        template.name(),
        template.category(),
        template.policy_type()
    )];
    lines.extend(values.summary().into_iter().map(|line| format!("  {line}")));
    lines
}

pub fn menu_lines<S: Lifecycle>(menu: &ActionMenu<S>) -> Vec<String> {
    menu.items
        .iter()
        .map(|item| match item.target {
            Some(target) if item.requires_reason => {
                format!("{target}\t{} (reason required)", item.label)
            }
            Some(target) => format!("{target}\t{}", item.label),
            None => item.label.clone(),
        })
        .collect()
}
