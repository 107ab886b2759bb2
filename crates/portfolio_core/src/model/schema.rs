//! Field schema table for career collections.
//!
//! # Responsibility
//! - Describe the editable fields of every collection in one table.
//! - Validate full records and partial patches against that table.
//!
//! # Invariants
//! - Validation is advisory: controllers accept any field bag, callers run
//!   validation before submitting edits.
//! - A patch is only checked for the keys it carries.

use crate::model::collection::CollectionKind;
use crate::model::record::Fields;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

static MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("valid month regex"));
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid date regex")
});

/// Input kind of one editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    /// `YYYY-MM`.
    Month,
    /// `YYYY-MM-DD`.
    Date,
    /// One of [`FieldConfig::options`].
    Select,
}

/// One row of a collection's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldConfig {
    pub name: &'static str,
    pub label: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub options: &'static [&'static str],
}

const fn field(name: &'static str, label: &'static str, field_type: FieldType) -> FieldConfig {
    FieldConfig {
        name,
        label,
        field_type,
        required: false,
        options: &[],
    }
}

const fn required(name: &'static str, label: &'static str, field_type: FieldType) -> FieldConfig {
    FieldConfig {
        name,
        label,
        field_type,
        required: true,
        options: &[],
    }
}

const fn select(
    name: &'static str,
    label: &'static str,
    options: &'static [&'static str],
) -> FieldConfig {
    FieldConfig {
        name,
        label,
        field_type: FieldType::Select,
        required: true,
        options,
    }
}

use FieldType::{Date, Month, Number, Text, Textarea};

const POSITION_FIELDS: &[FieldConfig] = &[
    required("company", "Company", Text),
    required("title", "Title", Text),
    field("description", "Description", Textarea),
    field("location", "Location", Text),
    required("startDate", "Start", Month),
    field("endDate", "End", Month),
];

const EDUCATION_FIELDS: &[FieldConfig] = &[
    required("school", "School", Text),
    required("degree", "Degree", Text),
    required("field", "Major", Text),
    required("startYear", "Entered", Number),
    required("endYear", "Graduated", Number),
    field("notes", "Notes", Text),
    field("gpa", "GPA", Text),
    field("honors", "Honors", Text),
];

const CERTIFICATION_FIELDS: &[FieldConfig] = &[
    required("name", "Certification", Text),
    required("authority", "Issuer", Text),
    required("date", "Acquired", Month),
    field("licenseNumber", "License number", Text),
    field("url", "URL", Text),
];

const PUBLICATION_FIELDS: &[FieldConfig] = &[
    required("title", "Title", Text),
    required("publishedDate", "Published", Text),
    required("publisher", "Publisher", Text),
    select("type", "Type", &["논문", "단행본", "학술발표"]),
    field("authors", "Authors", Text),
    field("description", "Description", Textarea),
    field("url", "URL", Text),
];

const SKILL_FIELDS: &[FieldConfig] = &[
    required("name", "Skill", Text),
    select("category", "Category", &["technical", "domain", "soft"]),
];

const AWARD_FIELDS: &[FieldConfig] = &[
    required("title", "Award", Text),
    required("organization", "Organization", Text),
    required("date", "Awarded", Month),
];

const ACADEMIC_PROJECT_FIELDS: &[FieldConfig] = &[
    required("title", "Project", Text),
    required("organization", "Organization", Text),
    required("startDate", "Start", Month),
    required("endDate", "End", Month),
    required("description", "Description", Textarea),
];

const TEACHING_FIELDS: &[FieldConfig] = &[
    required("subject", "Subject", Text),
    required("institution", "Institution", Text),
    field("description", "Description", Textarea),
    required("period", "Period", Text),
];

const PART_TIME_JOB_FIELDS: &[FieldConfig] = &[
    required("title", "Role", Text),
    required("organization", "Organization", Text),
    required("startDate", "Start", Month),
    required("endDate", "End", Month),
    required("description", "Description", Textarea),
];

const GROUP_ACTIVITY_FIELDS: &[FieldConfig] = &[
    required("title", "Activity", Text),
    required("date", "Period", Text),
    required("description", "Description", Textarea),
];

const MENTORING_FIELDS: &[FieldConfig] = &[
    required("title", "Program", Text),
    required("organization", "Organization", Text),
    required("period", "Period", Text),
    field("description", "Description", Textarea),
];

const RESEARCH_EXCHANGE_FIELDS: &[FieldConfig] = &[
    required("institution", "Institution", Text),
    required("program", "Program", Text),
    required("date", "Date", Month),
];

const WORK_PROJECT_FIELDS: &[FieldConfig] = &[
    required("year", "Year", Number),
    required("month", "Month", Number),
    select(
        "category",
        "Category",
        &[
            "진단",
            "리더십",
            "채용/퇴직",
            "SERI CEO",
            "CEO/HR브리프",
            "분석방법론",
            "강의",
            "교육이수",
            "제도",
            "기타",
        ],
    ),
    required("title", "Title", Text),
    select("duration", "Duration", &["단기", "장기"]),
    select("type", "Type", &["지원", "연구"]),
    select("format", "Format", &["보고서", "강의", "자격증", "책"]),
    field("description", "Description", Textarea),
    field("url", "URL", Text),
];

/// Returns the field table of a collection.
pub fn field_configs(kind: CollectionKind) -> &'static [FieldConfig] {
    match kind {
        CollectionKind::Positions => POSITION_FIELDS,
        CollectionKind::Education => EDUCATION_FIELDS,
        CollectionKind::Certifications => CERTIFICATION_FIELDS,
        CollectionKind::Publications => PUBLICATION_FIELDS,
        CollectionKind::Skills => SKILL_FIELDS,
        CollectionKind::Awards => AWARD_FIELDS,
        CollectionKind::AcademicProjects => ACADEMIC_PROJECT_FIELDS,
        CollectionKind::Teaching => TEACHING_FIELDS,
        CollectionKind::PartTimeJobs => PART_TIME_JOB_FIELDS,
        CollectionKind::GroupActivities => GROUP_ACTIVITY_FIELDS,
        CollectionKind::Mentoring => MENTORING_FIELDS,
        CollectionKind::ResearchExchange => RESEARCH_EXCHANGE_FIELDS,
        CollectionKind::WorkProjects => WORK_PROJECT_FIELDS,
    }
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// Required field absent, null or blank.
    MissingField(&'static str),
    /// Number field holds a value that is not numeric.
    InvalidNumber { field: &'static str, value: String },
    /// Month field does not match `YYYY-MM`.
    InvalidMonth { field: &'static str, value: String },
    /// Date field does not match `YYYY-MM-DD`.
    InvalidDate { field: &'static str, value: String },
    /// Select field holds a value outside its options.
    InvalidOption { field: &'static str, value: String },
    /// Text-like field holds a non-string value.
    NotText { field: &'static str },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is missing"),
            Self::InvalidNumber { field, value } => {
                write!(f, "field `{field}` must be a number, got `{value}`")
            }
            Self::InvalidMonth { field, value } => {
                write!(f, "field `{field}` must be YYYY-MM, got `{value}`")
            }
            Self::InvalidDate { field, value } => {
                write!(f, "field `{field}` must be YYYY-MM-DD, got `{value}`")
            }
            Self::InvalidOption { field, value } => {
                write!(f, "field `{field}` does not allow `{value}`")
            }
            Self::NotText { field } => write!(f, "field `{field}` must be text"),
        }
    }
}

impl Error for RecordValidationError {}

/// Validates a full record for `kind`.
///
/// Unknown fields are allowed; seed records carry display-only extras such as
/// `highlights`.
pub fn validate_record(kind: CollectionKind, fields: &Fields) -> Result<(), RecordValidationError> {
    for config in field_configs(kind) {
        match fields.get(config.name) {
            None | Some(Value::Null) => {
                if config.required {
                    return Err(RecordValidationError::MissingField(config.name));
                }
            }
            Some(value) => validate_value(config, value)?,
        }
    }
    Ok(())
}

/// Validates only the fields present in `patch`.
pub fn validate_patch(kind: CollectionKind, patch: &Fields) -> Result<(), RecordValidationError> {
    for config in field_configs(kind) {
        match patch.get(config.name) {
            None => {}
            Some(Value::Null) if config.required => {
                return Err(RecordValidationError::MissingField(config.name));
            }
            Some(Value::Null) => {}
            Some(value) => validate_value(config, value)?,
        }
    }
    Ok(())
}

fn validate_value(config: &FieldConfig, value: &Value) -> Result<(), RecordValidationError> {
    if config.field_type == FieldType::Number {
        return match value {
            Value::Number(_) => Ok(()),
            Value::String(text) if text.trim().parse::<f64>().is_ok() => Ok(()),
            Value::String(text) if text.trim().is_empty() && config.required => {
                Err(RecordValidationError::MissingField(config.name))
            }
            other => Err(RecordValidationError::InvalidNumber {
                field: config.name,
                value: other.to_string(),
            }),
        };
    }

    let Value::String(text) = value else {
        return Err(RecordValidationError::NotText { field: config.name });
    };
    let text = text.trim();
    if text.is_empty() {
        if config.required {
            return Err(RecordValidationError::MissingField(config.name));
        }
        return Ok(());
    }

    match config.field_type {
        FieldType::Month if !MONTH_RE.is_match(text) => Err(RecordValidationError::InvalidMonth {
            field: config.name,
            value: text.to_string(),
        }),
        FieldType::Date if !DATE_RE.is_match(text) => Err(RecordValidationError::InvalidDate {
            field: config.name,
            value: text.to_string(),
        }),
        FieldType::Select if !config.options.contains(&text) => {
            Err(RecordValidationError::InvalidOption {
                field: config.name,
                value: text.to_string(),
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{field_configs, validate_patch, validate_record, RecordValidationError};
    use crate::model::collection::CollectionKind;
    use serde_json::json;

    #[test]
    fn every_collection_has_at_least_one_required_field() {
        for kind in CollectionKind::ALL {
            assert!(
                field_configs(kind).iter().any(|config| config.required),
                "{kind} has no required field"
            );
        }
    }

    #[test]
    fn month_fields_reject_free_text() {
        let fields = json!({"title": "Best paper", "organization": "KSA", "date": "spring"});
        let err = validate_record(CollectionKind::Awards, fields.as_object().unwrap())
            .expect_err("free text month must be rejected");
        assert!(matches!(err, RecordValidationError::InvalidMonth { field: "date", .. }));
    }

    #[test]
    fn patch_checks_only_present_keys() {
        let patch = json!({"category": "soft"});
        validate_patch(CollectionKind::Skills, patch.as_object().unwrap())
            .expect("partial patch without required name should pass");

        let patch = json!({"category": "magic"});
        let err = validate_patch(CollectionKind::Skills, patch.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, RecordValidationError::InvalidOption { field: "category", .. }));
    }
}
