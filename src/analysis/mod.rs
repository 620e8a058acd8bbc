pub mod types;

pub use types::{
    AnalysisResult, CategoryIssues, Diagnostic, FileIssues, PriorityIssues, RuleCount, RuleGroup,
};

use std::collections::{BTreeMap, HashMap, HashSet};

use serde_json::Value;
use tracing::{debug, instrument};

use crate::diagnostics::ScanSummary;
use crate::taxonomy::{Priority, Taxonomy};

const DEFAULT_FILE: &str = "unknown";
const DEFAULT_SEVERITY: &str = "info";

/// Classify every diagnostic and build the priority, file and rule indices.
///
/// Fields missing from a diagnostic fall back to defaults; nothing here fails.
#[instrument(skip_all, fields(diagnostics = diagnostics.len()))]
pub fn aggregate(summary: ScanSummary, diagnostics: &[Value], taxonomy: &Taxonomy) -> AnalysisResult {
    let mut builder = AnalysisBuilder::default();
    for raw in diagnostics {
        let diagnostic = extract_diagnostic(raw, taxonomy);
        if diagnostic.priority == Priority::Unknown {
            debug!(category = %diagnostic.category_full, "rule not in taxonomy");
        }
        builder.push(diagnostic);
    }
    let result = builder.finish(summary);
    debug!(
        total = result.total_issues,
        files = result.by_file.len(),
        rules = result.rule_counts.len(),
        "aggregation complete"
    );
    result
}

/// Build a classified [`Diagnostic`] from one raw JSON entry.
fn extract_diagnostic(raw: &Value, taxonomy: &Taxonomy) -> Diagnostic {
    let category_full = string_at(raw, "/category").unwrap_or_default();
    let rule = rule_name(category_full).to_string();
    let classification = taxonomy.classify(&rule);

    Diagnostic {
        file: string_at(raw, "/location/path/file")
            .unwrap_or(DEFAULT_FILE)
            .to_string(),
        severity: string_at(raw, "/severity")
            .unwrap_or(DEFAULT_SEVERITY)
            .to_string(),
        description: string_at(raw, "/description")
            .unwrap_or_default()
            .to_string(),
        category_full: category_full.to_string(),
        rule,
        priority: classification.priority,
        category: classification.category,
    }
}

fn string_at<'a>(raw: &'a Value, pointer: &str) -> Option<&'a str> {
    raw.pointer(pointer).and_then(Value::as_str)
}

/// The rule identifier is the final `/` segment of the category.
fn rule_name(category: &str) -> &str {
    category.rsplit('/').next().unwrap_or(category)
}

/// Grow-on-demand indices for a single `aggregate` call.
#[derive(Default)]
struct AnalysisBuilder {
    issues: Vec<Diagnostic>,
    by_priority: BTreeMap<Priority, Vec<CategoryIssues>>,
    by_file: Vec<FileIssues>,
    file_slots: HashMap<String, usize>,
    rule_counts: Vec<RuleCount>,
    rule_slots: HashMap<String, usize>,
}

impl AnalysisBuilder {
    fn push(&mut self, diagnostic: Diagnostic) {
        let index = self.issues.len();

        let categories = self.by_priority.entry(diagnostic.priority).or_default();
        match categories
            .iter_mut()
            .find(|c| c.category == diagnostic.category)
        {
            Some(bucket) => bucket.issues.push(index),
            None => categories.push(CategoryIssues {
                category: diagnostic.category,
                issues: vec![index],
            }),
        }

        match self.file_slots.get(&diagnostic.file) {
            Some(&slot) => self.by_file[slot].issues.push(index),
            None => {
                self.file_slots
                    .insert(diagnostic.file.clone(), self.by_file.len());
                self.by_file.push(FileIssues {
                    file: diagnostic.file.clone(),
                    issues: vec![index],
                });
            }
        }

        match self.rule_slots.get(&diagnostic.rule) {
            Some(&slot) => self.rule_counts[slot].count += 1,
            None => {
                self.rule_slots
                    .insert(diagnostic.rule.clone(), self.rule_counts.len());
                self.rule_counts.push(RuleCount {
                    rule: diagnostic.rule.clone(),
                    count: 1,
                });
            }
        }

        self.issues.push(diagnostic);
    }

    fn finish(self, summary: ScanSummary) -> AnalysisResult {
        let by_priority = self
            .by_priority
            .into_iter()
            .map(|(priority, categories)| PriorityIssues {
                priority,
                categories,
            })
            .collect();

        AnalysisResult {
            total_issues: self.issues.len(),
            issues: self.issues,
            by_priority,
            by_file: self.by_file,
            rule_counts: self.rule_counts,
            summary,
        }
    }
}

impl AnalysisResult {
    /// Issues of one priority, or `None` when it has none.
    pub fn priority(&self, priority: Priority) -> Option<&PriorityIssues> {
        self.by_priority.iter().find(|p| p.priority == priority)
    }

    pub fn priority_count(&self, priority: Priority) -> usize {
        self.priority(priority).map_or(0, PriorityIssues::total)
    }

    /// Group a category's issues by rule, keeping first-seen rule order.
    pub fn rule_groups(&self, category: &CategoryIssues) -> Vec<RuleGroup<'_>> {
        let mut groups: Vec<RuleGroup<'_>> = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut seen_files: Vec<HashSet<&str>> = Vec::new();

        for &index in &category.issues {
            let issue = &self.issues[index];
            let slot = *slots.entry(issue.rule.as_str()).or_insert_with(|| {
                groups.push(RuleGroup {
                    rule: &issue.rule,
                    issues: Vec::new(),
                    files: Vec::new(),
                });
                seen_files.push(HashSet::new());
                groups.len() - 1
            });

            let group = &mut groups[slot];
            group.issues.push(issue);
            if seen_files[slot].insert(issue.file.as_str()) {
                group.files.push(&issue.file);
            }
        }
        groups
    }

    /// Files ranked by issue count, descending. Ties keep first-seen order.
    pub fn top_files(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .by_file
            .iter()
            .map(|f| (f.file.as_str(), f.issues.len()))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }

    /// Rules ranked by occurrence count, descending. Ties keep first-seen order.
    pub fn top_rules(&self, limit: usize) -> Vec<&RuleCount> {
        let mut ranked: Vec<&RuleCount> = self.rule_counts.iter().collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// Helper to build a raw Biome diagnostic entry.
    pub fn raw_diagnostic(rule: &str, file: &str) -> Value {
        json!({
            "category": format!("lint/group/{rule}"),
            "severity": "error",
            "description": format!("{rule} violated"),
            "location": { "path": { "file": file } },
        })
    }

    pub fn analyze(diagnostics: &[Value]) -> AnalysisResult {
        aggregate(ScanSummary::default(), diagnostics, Taxonomy::builtin())
    }

    #[test]
    fn test_rule_name_is_last_segment() {
        assert_eq!(rule_name("lint/correctness/noUnreachable"), "noUnreachable");
        assert_eq!(rule_name("noUnreachable"), "noUnreachable");
        assert_eq!(rule_name(""), "");
        assert_eq!(rule_name("lint/"), "");
    }

    #[test]
    fn test_extract_classifies_unreachable_as_critical() {
        let raw = json!({ "category": "lint/correctness/noUnreachable" });
        let diagnostic = extract_diagnostic(&raw, Taxonomy::builtin());
        assert_eq!(diagnostic.rule, "noUnreachable");
        assert_eq!(diagnostic.priority, Priority::Critical);
        assert_eq!(diagnostic.category, "logic_errors");
    }

    #[test]
    fn test_extract_defaults_missing_fields() {
        let diagnostic = extract_diagnostic(&json!({}), Taxonomy::builtin());
        assert_eq!(diagnostic.rule, "");
        assert_eq!(diagnostic.file, "unknown");
        assert_eq!(diagnostic.severity, "info");
        assert_eq!(diagnostic.description, "");
        assert_eq!(diagnostic.priority, Priority::Unknown);
        assert_eq!(diagnostic.category, "unknown");
    }

    #[test]
    fn test_extract_defaults_wrongly_typed_fields() {
        let raw = json!({
            "category": 12,
            "severity": null,
            "location": { "path": "src/a.ts" },
        });
        let diagnostic = extract_diagnostic(&raw, Taxonomy::builtin());
        assert_eq!(diagnostic.rule, "");
        assert_eq!(diagnostic.file, "unknown");
        assert_eq!(diagnostic.severity, "info");

        let diagnostic = extract_diagnostic(&json!("not an object"), Taxonomy::builtin());
        assert_eq!(diagnostic.file, "unknown");
    }

    #[test]
    fn test_aggregate_empty() {
        let result = analyze(&[]);
        assert_eq!(result.total_issues, 0);
        assert!(result.by_priority.is_empty());
        assert!(result.by_file.is_empty());
        assert!(result.rule_counts.is_empty());
    }

    #[test]
    fn test_aggregate_counts_are_consistent() {
        let diagnostics = vec![
            raw_diagnostic("noUnreachable", "a.ts"),
            raw_diagnostic("noExplicitAny", "b.ts"),
            raw_diagnostic("someNewRule", "a.ts"),
            raw_diagnostic("noExplicitAny", "c.ts"),
            raw_diagnostic("noConsoleLog", "a.ts"),
            json!({}),
        ];
        let result = analyze(&diagnostics);

        assert_eq!(result.total_issues, 6);
        let by_priority: usize = result.by_priority.iter().map(PriorityIssues::total).sum();
        assert_eq!(by_priority, result.total_issues);
        let by_rule: usize = result.rule_counts.iter().map(|r| r.count).sum();
        assert_eq!(by_rule, result.total_issues);
        let by_file: usize = result.by_file.iter().map(|f| f.issues.len()).sum();
        assert_eq!(by_file, result.total_issues);
    }

    #[test]
    fn test_aggregate_orders_priorities_and_categories() {
        let diagnostics = vec![
            raw_diagnostic("noConsoleLog", "a.ts"),
            raw_diagnostic("someNewRule", "a.ts"),
            raw_diagnostic("noExplicitAny", "a.ts"),
            raw_diagnostic("useAltText", "a.ts"),
            raw_diagnostic("noArrayIndexKey", "a.ts"),
            raw_diagnostic("noGlobalEval", "a.ts"),
        ];
        let result = analyze(&diagnostics);

        let priorities: Vec<Priority> = result.by_priority.iter().map(|p| p.priority).collect();
        assert_eq!(
            priorities,
            vec![Priority::Critical, Priority::High, Priority::Medium, Priority::Unknown]
        );

        let high = result.priority(Priority::High).unwrap();
        let categories: Vec<&str> = high.categories.iter().map(|c| c.category).collect();
        assert_eq!(categories, vec!["type_safety", "accessibility", "performance"]);
        assert!(result.priority(Priority::Low).is_none());
        assert_eq!(result.priority_count(Priority::Low), 0);
        assert_eq!(result.priority_count(Priority::High), 3);
    }

    #[test]
    fn test_aggregate_preserves_input_order_in_buckets() {
        let diagnostics = vec![
            raw_diagnostic("noExplicitAny", "b.ts"),
            raw_diagnostic("noExplicitAny", "a.ts"),
            raw_diagnostic("noExplicitAny", "b.ts"),
        ];
        let result = analyze(&diagnostics);

        let category = &result.priority(Priority::High).unwrap().categories[0];
        assert_eq!(category.issues, vec![0, 1, 2]);
        assert_eq!(result.by_file[0].file, "b.ts");
        assert_eq!(result.by_file[0].issues, vec![0, 2]);
        assert_eq!(result.by_file[1].file, "a.ts");
        assert_eq!(result.rule_counts, vec![RuleCount { rule: "noExplicitAny".to_string(), count: 3 }]);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let diagnostics = vec![
            raw_diagnostic("noUnreachable", "a.ts"),
            raw_diagnostic("someNewRule", "b.ts"),
            raw_diagnostic("noUnreachable", "b.ts"),
        ];
        assert_eq!(analyze(&diagnostics), analyze(&diagnostics));
    }

    #[test]
    fn test_aggregate_passes_summary_through() {
        let summary = ScanSummary {
            errors: 4u64.into(),
            warnings: 2u64.into(),
            unchanged: 90u64.into(),
            duration: crate::diagnostics::types::ScanDuration { secs: 3u64.into() },
        };
        let result = aggregate(summary.clone(), &[], Taxonomy::builtin());
        assert_eq!(result.summary, summary);
    }

    #[test]
    fn test_rule_groups_collect_distinct_files() {
        let diagnostics = vec![
            raw_diagnostic("noUnreachable", "b.ts"),
            raw_diagnostic("noUnusedLabels", "a.ts"),
            raw_diagnostic("noUnreachable", "a.ts"),
            raw_diagnostic("noUnreachable", "b.ts"),
        ];
        let result = analyze(&diagnostics);
        let category = &result.priority(Priority::Critical).unwrap().categories[0];
        let groups = result.rule_groups(category);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].rule, "noUnreachable");
        assert_eq!(groups[0].issues.len(), 3);
        assert_eq!(groups[0].files, vec!["b.ts", "a.ts"]);
        assert_eq!(groups[0].first().file, "b.ts");
        assert_eq!(groups[1].rule, "noUnusedLabels");
    }

    #[test]
    fn test_rule_groups_interleaved_rules_keep_first_seen_order() {
        let mut diagnostics = Vec::new();
        for i in 0..200 {
            diagnostics.push(raw_diagnostic("noExplicitAny", &format!("f{}.ts", i % 7)));
            diagnostics.push(raw_diagnostic("noNonNullAssertion", &format!("g{}.ts", i % 3)));
        }
        let result = analyze(&diagnostics);
        let category = &result.priority(Priority::High).unwrap().categories[0];
        let groups = result.rule_groups(category);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].rule, "noExplicitAny");
        assert_eq!(groups[0].issues.len(), 200);
        assert_eq!(
            groups[0].files,
            vec!["f0.ts", "f1.ts", "f2.ts", "f3.ts", "f4.ts", "f5.ts", "f6.ts"]
        );
        assert_eq!(groups[1].rule, "noNonNullAssertion");
        assert_eq!(groups[1].files, vec!["g0.ts", "g1.ts", "g2.ts"]);
    }

    #[test]
    fn test_top_files_stable_on_ties() {
        let mut diagnostics = Vec::new();
        for _ in 0..7 {
            diagnostics.push(raw_diagnostic("noConsoleLog", "first-seven.ts"));
        }
        for _ in 0..10 {
            diagnostics.push(raw_diagnostic("noConsoleLog", "ten.ts"));
        }
        for _ in 0..7 {
            diagnostics.push(raw_diagnostic("noConsoleLog", "second-seven.ts"));
        }
        let result = analyze(&diagnostics);

        assert_eq!(
            result.top_files(10),
            vec![("ten.ts", 10), ("first-seven.ts", 7), ("second-seven.ts", 7)]
        );
        assert_eq!(result.top_files(1), vec![("ten.ts", 10)]);
    }

    #[test]
    fn test_top_rules_ranked_by_count() {
        let diagnostics = vec![
            raw_diagnostic("noConsoleLog", "a.ts"),
            raw_diagnostic("noExplicitAny", "a.ts"),
            raw_diagnostic("noExplicitAny", "b.ts"),
            raw_diagnostic("useAltText", "a.ts"),
        ];
        let result = analyze(&diagnostics);
        let rules: Vec<(&str, usize)> = result
            .top_rules(15)
            .iter()
            .map(|r| (r.rule.as_str(), r.count))
            .collect();
        assert_eq!(
            rules,
            vec![("noExplicitAny", 2), ("noConsoleLog", 1), ("useAltText", 1)]
        );
    }
}
