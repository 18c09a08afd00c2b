// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

//! Property-form field definitions and validation.
//!
//! Validation is a form-level concern layered on top of the store: issues are
//! collected per field for display and block save only in the form. The store
//! itself never rejects a mutation over field values.

use std::fmt;

use crate::model::node::JsonMap;
use crate::registry::NodeType;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Number {
        min: Option<f64>,
        max: Option<f64>,
    },
    Boolean,
    Select {
        options: &'static [&'static str],
    },
    /// Soft reference to a person id.
    PersonRef,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub kind: IssueKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    MissingRequired,
    NotANumber { actual: String },
    OutOfRange { min: Option<f64>, max: Option<f64>, actual: f64 },
    UnknownOption { options: &'static [&'static str], actual: String },
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::MissingRequired => write!(f, "'{}' is required", self.field),
            IssueKind::NotANumber { actual } => {
                write!(f, "'{}' must be a number (got {actual})", self.field)
            }
            IssueKind::OutOfRange { min, max, actual } => write!(
                f,
                "'{}' = {actual} is outside [{}, {}]",
                self.field,
                min.map_or("-inf".to_owned(), |v| v.to_string()),
                max.map_or("inf".to_owned(), |v| v.to_string()),
            ),
            IssueKind::UnknownOption { options, actual } => write!(
                f,
                "'{}' must be one of {options:?} (got '{actual}')",
                self.field
            ),
        }
    }
}

/// Checks node data against the type's field definitions, collecting every
/// issue instead of stopping at the first one.
pub fn validate_node_data(node_type: NodeType, data: &JsonMap) -> Vec<FieldIssue> {
    let mut issues = Vec::new();

    for field in node_type.config().fields {
        let value = data.get(field.name);

        let Some(value) = value else {
            if field.required {
                issues.push(FieldIssue {
                    field: field.name,
                    kind: IssueKind::MissingRequired,
                });
            }
            continue;
        };

        if field.required && value.as_str().is_some_and(str::is_empty) {
            issues.push(FieldIssue {
                field: field.name,
                kind: IssueKind::MissingRequired,
            });
            continue;
        }

        match field.kind {
            FieldKind::Number { min, max } => match value.as_f64() {
                Some(actual) => {
                    let below = min.is_some_and(|min| actual < min);
                    let above = max.is_some_and(|max| actual > max);
                    if below || above {
                        issues.push(FieldIssue {
                            field: field.name,
                            kind: IssueKind::OutOfRange { min, max, actual },
                        });
                    }
                }
                None => issues.push(FieldIssue {
                    field: field.name,
                    kind: IssueKind::NotANumber {
                        actual: value.to_string(),
                    },
                }),
            },
            FieldKind::Select { options } => {
                if let Some(actual) = value.as_str() {
                    if !options.contains(&actual) {
                        issues.push(FieldIssue {
                            field: field.name,
                            kind: IssueKind::UnknownOption {
                                options,
                                actual: actual.to_owned(),
                            },
                        });
                    }
                }
            }
            FieldKind::Text | FieldKind::Boolean | FieldKind::PersonRef => {}
        }
    }

    issues
}

pub(crate) const START_FIELDS: &[FieldDefinition] = &[FieldDefinition {
    name: "trigger_mode",
    label: "Trigger mode",
    kind: FieldKind::Select {
        options: &["manual", "hook"],
    },
    required: false,
}];

pub(crate) const PERSON_JOB_FIELDS: &[FieldDefinition] = &[
    FieldDefinition {
        name: "person",
        label: "Person",
        kind: FieldKind::PersonRef,
        required: false,
    },
    FieldDefinition {
        name: "default_prompt",
        label: "Prompt",
        kind: FieldKind::Text,
        required: true,
    },
    FieldDefinition {
        name: "max_iteration",
        label: "Max iterations",
        kind: FieldKind::Number {
            min: Some(1.0),
            max: Some(100.0),
        },
        required: true,
    },
];

pub(crate) const PERSON_BATCH_JOB_FIELDS: &[FieldDefinition] = &[
    FieldDefinition {
        name: "person",
        label: "Person",
        kind: FieldKind::PersonRef,
        required: false,
    },
    FieldDefinition {
        name: "default_prompt",
        label: "Prompt",
        kind: FieldKind::Text,
        required: true,
    },
    FieldDefinition {
        name: "batch_key",
        label: "Batch key",
        kind: FieldKind::Text,
        required: true,
    },
];

pub(crate) const CONDITION_FIELDS: &[FieldDefinition] = &[
    FieldDefinition {
        name: "condition_type",
        label: "Condition type",
        kind: FieldKind::Select {
            options: &["expression", "detect_max_iterations"],
        },
        required: true,
    },
    FieldDefinition {
        name: "expression",
        label: "Expression",
        kind: FieldKind::Text,
        required: false,
    },
];

pub(crate) const CODE_JOB_FIELDS: &[FieldDefinition] = &[
    FieldDefinition {
        name: "language",
        label: "Language",
        kind: FieldKind::Select {
            options: &["python", "typescript", "bash"],
        },
        required: true,
    },
    FieldDefinition {
        name: "code",
        label: "Code",
        kind: FieldKind::Text,
        required: true,
    },
];

pub(crate) const API_JOB_FIELDS: &[FieldDefinition] = &[
    FieldDefinition {
        name: "url",
        label: "URL",
        kind: FieldKind::Text,
        required: true,
    },
    FieldDefinition {
        name: "method",
        label: "Method",
        kind: FieldKind::Select {
            options: &["GET", "POST", "PUT", "DELETE"],
        },
        required: true,
    },
    FieldDefinition {
        name: "timeout",
        label: "Timeout (s)",
        kind: FieldKind::Number {
            min: Some(0.0),
            max: Some(300.0),
        },
        required: false,
    },
];

pub(crate) const ENDPOINT_FIELDS: &[FieldDefinition] = &[
    FieldDefinition {
        name: "save_to_file",
        label: "Save to file",
        kind: FieldKind::Boolean,
        required: false,
    },
    FieldDefinition {
        name: "file_path",
        label: "File path",
        kind: FieldKind::Text,
        required: false,
    },
];

pub(crate) const DB_FIELDS: &[FieldDefinition] = &[
    FieldDefinition {
        name: "sub_type",
        label: "Sub type",
        kind: FieldKind::Select {
            options: &["fixed_prompt", "file", "code"],
        },
        required: true,
    },
    FieldDefinition {
        name: "operation",
        label: "Operation",
        kind: FieldKind::Select {
            options: &["read", "write", "append"],
        },
        required: true,
    },
];

pub(crate) const USER_RESPONSE_FIELDS: &[FieldDefinition] = &[
    FieldDefinition {
        name: "prompt",
        label: "Prompt",
        kind: FieldKind::Text,
        required: true,
    },
    FieldDefinition {
        name: "timeout",
        label: "Timeout (s)",
        kind: FieldKind::Number {
            min: Some(0.0),
            max: Some(3600.0),
        },
        required: false,
    },
];

pub(crate) const HOOK_FIELDS: &[FieldDefinition] = &[
    FieldDefinition {
        name: "hook_type",
        label: "Hook type",
        kind: FieldKind::Select {
            options: &["shell", "webhook", "python"],
        },
        required: true,
    },
    FieldDefinition {
        name: "command",
        label: "Command",
        kind: FieldKind::Text,
        required: false,
    },
];

pub(crate) const TEMPLATE_JOB_FIELDS: &[FieldDefinition] = &[
    FieldDefinition {
        name: "template_path",
        label: "Template path",
        kind: FieldKind::Text,
        required: true,
    },
    FieldDefinition {
        name: "output_path",
        label: "Output path",
        kind: FieldKind::Text,
        required: false,
    },
];

pub(crate) const SUB_DIAGRAM_FIELDS: &[FieldDefinition] = &[FieldDefinition {
    name: "diagram_name",
    label: "Diagram",
    kind: FieldKind::Text,
    required: true,
}];
