use super::{title_case, Renderer};
use crate::analysis::{AnalysisResult, RuleGroup};
use crate::config::PlanConfig;
use crate::taxonomy::Priority;

/// Ordered remediation plan: one phase per actionable priority, with a
/// suggested fix command for every rule.
///
/// Unclassified rules get no phase since there is no prescribed fix for them.
pub struct RemediationPlan<'a> {
    config: &'a PlanConfig,
}

impl<'a> RemediationPlan<'a> {
    pub fn new(config: &'a PlanConfig) -> Self {
        Self { config }
    }

    /// Fix command for one rule: explicit files when there are few of them,
    /// otherwise the configured top-level directories.
    fn fix_command(&self, rule: &RuleGroup<'_>) -> String {
        let command = &self.config.command;
        if rule.files.len() <= self.config.explicit_file_limit {
            format!(
                "# Check specific files\n{} check --write {}\n",
                command,
                rule.files.join(" ")
            )
        } else {
            format!(
                "# Too many files, check by directory\n{} check --write {}\n",
                command,
                self.config.fallback_dirs.join(" ")
            )
        }
    }

    fn write_quick_commands(&self, md: &mut String) {
        let command = &self.config.command;
        md.push_str("## Quick Commands\n\n");
        md.push_str("```bash\n");
        md.push_str("# Apply all safe fixes\n");
        md.push_str(&format!("{} check --write .\n\n", command));
        md.push_str("# Apply unsafe fixes (use with caution)\n");
        md.push_str(&format!("{} check --write --unsafe .\n\n", command));
        md.push_str("# Check specific rule category\n");
        md.push_str(&format!("{} lint --write .\n\n", command));
        md.push_str("# Format only\n");
        md.push_str(&format!("{} format --write .\n", command));
        md.push_str("```\n");
    }
}

impl Renderer for RemediationPlan<'_> {
    fn name(&self) -> &str {
        "remediation plan"
    }

    fn render(&self, result: &AnalysisResult) -> String {
        let mut md = String::new();
        md.push_str("# Biome Issues Remediation Plan\n\n");
        md.push_str("## Recommended Action Sequence\n\n");
        md.push_str("Address issues in this order for maximum impact:\n\n");

        // Phase numbers belong to the priority, so an empty priority leaves a gap.
        for (phase, priority) in (1..).zip(Priority::ACTIONABLE) {
            let Some(group) = result.priority(priority) else {
                continue;
            };
            md.push_str(&format!(
                "### Phase {}: {} Priority Issues ({} issues)\n\n",
                phase,
                group.priority,
                group.total()
            ));

            for category in &group.categories {
                md.push_str(&format!("#### {} Issues\n\n", title_case(category.category)));
                for rule in result.rule_groups(category) {
                    md.push_str(&format!(
                        "**Fix {}** ({} occurrences)\n\n",
                        rule.rule,
                        rule.issues.len()
                    ));
                    md.push_str("```bash\n");
                    md.push_str(&self.fix_command(&rule));
                    md.push_str("```\n\n");
                    md.push_str(&format!("Description: {}\n\n", rule.first().description));
                }
                md.push('\n');
            }
        }

        self.write_quick_commands(&mut md);
        md
    }
}
