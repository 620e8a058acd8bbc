use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Triage priority assigned to a rule.
///
/// Declaration order is the triage order: `Critical` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
    Unknown,
}

impl Priority {
    /// Every priority, in report order.
    pub const ALL: [Priority; 5] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
        Priority::Unknown,
    ];

    /// Priorities that carry a remediation phase. Unclassified rules have no prescribed fix.
    pub const ACTIONABLE: [Priority; 4] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Critical => write!(f, "CRITICAL"),
            Priority::High => write!(f, "HIGH"),
            Priority::Medium => write!(f, "MEDIUM"),
            Priority::Low => write!(f, "LOW"),
            Priority::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Category given to rules missing from the taxonomy.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// The (priority, category) pair a rule maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub priority: Priority,
    pub category: &'static str,
}

impl Classification {
    pub const UNKNOWN: Classification = Classification {
        priority: Priority::Unknown,
        category: UNKNOWN_CATEGORY,
    };
}

type CategoryRules = (&'static str, &'static [&'static str]);

/// Declared rule table: priority -> category -> rule identifiers.
const RULES: &[(Priority, &[CategoryRules])] = &[
    (
        Priority::Critical,
        &[
            (
                "security",
                &[
                    "noDangerouslySetInnerHtml",
                    "noDocumentCookie",
                    "noGlobalEval",
                    "noInnerDeclarations",
                ],
            ),
            (
                "logic_errors",
                &[
                    "noShadowRestrictedNames",
                    "noUndeclaredVariables",
                    "noUnreachable",
                    "noUnusedLabels",
                    "useValidForDirection",
                ],
            ),
        ],
    ),
    (
        Priority::High,
        &[
            (
                "accessibility",
                &[
                    "useButtonType",
                    "useHtmlLang",
                    "useValidAnchor",
                    "useValidAriaProps",
                    "useKeyWithClickEvents",
                    "useAltText",
                ],
            ),
            (
                "performance",
                &[
                    "noArrayIndexKey",
                    "useExhaustiveDependencies",
                    "noFloatingPromises",
                ],
            ),
            (
                "type_safety",
                &[
                    "noNonNullAssertion",
                    "noExplicitAny",
                    "useUniqueElementIds",
                ],
            ),
        ],
    ),
    (
        Priority::Medium,
        &[
            (
                "code_quality",
                &[
                    "useBlockStatements",
                    "noUnusedFunctionParameters",
                    "noImportCycles",
                    "noPrivateImports",
                ],
            ),
            (
                "maintainability",
                &[
                    "useImportExtensions",
                    "noConsoleLog",
                    "useConsistentObjectDefinition",
                ],
            ),
        ],
    ),
    (
        Priority::Low,
        &[(
            "style",
            &[
                "noUselessFragments",
                "useShorthandArrayType",
                "useSingleVarDeclarator",
                "useNumberNamespace",
                "noInferrableTypes",
            ],
        )],
    ),
];

/// Flat rule lookup built from a declared priority/category table.
///
/// Lookups are constant time. When a rule is declared more than once the
/// first declaration (in priority, then category order) wins and the
/// later ones are recorded as duplicates.
#[derive(Debug)]
pub struct Taxonomy {
    lookup: HashMap<&'static str, Classification>,
    duplicates: Vec<&'static str>,
}

impl Taxonomy {
    fn from_table(table: &[(Priority, &[CategoryRules])]) -> Self {
        let mut lookup = HashMap::new();
        let mut duplicates = Vec::new();

        for (priority, categories) in table {
            for (category, rules) in categories.iter() {
                for rule in rules.iter() {
                    if let Some(existing) = lookup.get(rule) {
                        let existing: Classification = *existing;
                        warn!(
                            rule,
                            kept = %existing.priority,
                            kept_category = existing.category,
                            ignored = %priority,
                            ignored_category = *category,
                            "rule declared twice in taxonomy"
                        );
                        duplicates.push(*rule);
                        continue;
                    }
                    lookup.insert(
                        *rule,
                        Classification {
                            priority: *priority,
                            category: *category,
                        },
                    );
                }
            }
        }

        debug!(rules = lookup.len(), duplicates = duplicates.len(), "built taxonomy lookup");
        Self { lookup, duplicates }
    }

    /// The built-in Biome rule taxonomy, built on first use.
    pub fn builtin() -> &'static Taxonomy {
        static BUILTIN: OnceLock<Taxonomy> = OnceLock::new();
        BUILTIN.get_or_init(|| Taxonomy::from_table(RULES))
    }

    /// Map a rule identifier to its priority and category.
    /// Rules not in the table map to `UNKNOWN`/`unknown`.
    pub fn classify(&self, rule: &str) -> Classification {
        self.lookup
            .get(rule)
            .copied()
            .unwrap_or(Classification::UNKNOWN)
    }

    /// Rule identifiers that were declared in more than one category.
    pub fn duplicates(&self) -> &[&'static str] {
        &self.duplicates
    }

    pub fn rule_count(&self) -> usize {
        self.lookup.len()
    }
}
