use super::{title_case, Renderer};
use crate::analysis::{AnalysisResult, RuleGroup};
use crate::config::ReportConfig;
use crate::taxonomy::{Priority, Taxonomy};

/// Categorized issue summary: run counters, a per-priority breakdown,
/// the most problematic files and the most frequent rules.
pub struct IssueReport<'a> {
    config: &'a ReportConfig,
    taxonomy: &'a Taxonomy,
}

impl<'a> IssueReport<'a> {
    pub fn new(config: &'a ReportConfig, taxonomy: &'a Taxonomy) -> Self {
        Self { config, taxonomy }
    }

    fn write_summary(&self, md: &mut String, result: &AnalysisResult) {
        let summary = &result.summary;
        md.push_str("## Summary\n\n");
        md.push_str(&format!("- **Total Issues**: {}\n", result.total_issues));
        md.push_str(&format!("- **Errors**: {}\n", summary.errors));
        md.push_str(&format!("- **Warnings**: {}\n", summary.warnings));
        md.push_str(&format!("- **Files Scanned**: {}\n", summary.unchanged));
        md.push_str(&format!("- **Scan Duration**: {}s\n\n", summary.duration.secs));
    }

    fn write_priorities(&self, md: &mut String, result: &AnalysisResult) {
        md.push_str("## Issues by Priority\n\n");

        for priority in Priority::ALL {
            let Some(group) = result.priority(priority) else {
                continue;
            };
            md.push_str(&format!(
                "### {} Priority ({} issues)\n\n",
                priority,
                group.total()
            ));

            for category in &group.categories {
                md.push_str(&format!(
                    "#### {} ({} issues)\n\n",
                    title_case(category.category),
                    category.issues.len()
                ));
                for rule in result.rule_groups(category) {
                    self.write_rule(md, &rule);
                }
                md.push('\n');
            }
        }
    }

    fn write_rule(&self, md: &mut String, rule: &RuleGroup<'_>) {
        let first = rule.first();
        md.push_str(&format!(
            "**{}** ({} occurrences)\n",
            rule.rule,
            rule.issues.len()
        ));
        md.push_str(&format!("- Description: {}\n", first.description));
        md.push_str(&format!("- Severity: {}\n", first.severity));

        let shown = self.config.files_shown;
        if rule.files.len() <= shown {
            md.push_str(&format!("- Files: {}\n", rule.files.join(", ")));
        } else {
            md.push_str(&format!(
                "- Files: {} and {} more\n",
                rule.files[..shown].join(", "),
                rule.files.len() - shown
            ));
        }
        md.push('\n');
    }

    fn write_top_files(&self, md: &mut String, result: &AnalysisResult) {
        md.push_str("## Most Problematic Files\n\n");
        for (file, count) in result.top_files(self.config.top_files) {
            md.push_str(&format!("- **{}**: {} issues\n", file, count));
        }
        md.push('\n');
    }

    fn write_top_rules(&self, md: &mut String, result: &AnalysisResult) {
        md.push_str("## Most Common Rules\n\n");
        for rule in result.top_rules(self.config.top_rules) {
            let class = self.taxonomy.classify(&rule.rule);
            md.push_str(&format!(
                "- **{}**: {} occurrences ({} priority, {})\n",
                rule.rule, rule.count, class.priority, class.category
            ));
        }
    }
}

impl Renderer for IssueReport<'_> {
    fn name(&self) -> &str {
        "issue report"
    }

    fn render(&self, result: &AnalysisResult) -> String {
        let mut md = String::new();
        md.push_str("# Biome Code Quality Report\n\n");
        self.write_summary(&mut md, result);
        self.write_priorities(&mut md, result);
        self.write_top_files(&mut md, result);
        self.write_top_rules(&mut md, result);
        md
    }
}
