use anyhow::Result;
use crate::istioctl::{Istioctl, RuleAction};

pub struct RuleCommand {
    action: RuleAction,
    rule: String,
}

impl RuleCommand {
    pub fn new(action: RuleAction, rule: String) -> Self {
        RuleCommand { action, rule }
    }

    pub fn execute(&self, istioctl: &mut Istioctl) -> Result<()> {
        super::ensure_installed(istioctl)?;

        tracing::info!("{} {} in namespace {}", self.action, self.rule, istioctl.namespace());
        match self.action {
            RuleAction::Create => istioctl.create_rule(&self.rule)?,
            RuleAction::Replace => istioctl.replace_rule(&self.rule)?,
            RuleAction::Delete => istioctl.delete_rule(&self.rule)?,
        }
        println!("✓ {} {}", self.action, self.rule);
        Ok(())
    }
}
