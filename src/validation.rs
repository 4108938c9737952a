//! Field-level validation for creating and editing income sources.
//!
//! Validation never panics and never throws: each operation checks every
//! field and either returns the resulting record or the full list of field
//! errors, leaving the caller's data unchanged.

use std::{fmt::Display, sync::LazyLock};

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    month::MonthLabel,
    reconcile::EarningsForm,
    source::{IncomeSource, SourceId, SourceKind},
};

/// The largest income accepted for a single month.
pub const MAX_INCOME: f64 = 10_000_000.0;

const NAME_MIN_GRAPHEMES: usize = 2;
const NAME_MAX_GRAPHEMES: usize = 50;
const TAG_MIN_GRAPHEMES: usize = 2;
const TAG_MAX_GRAPHEMES: usize = 20;
const NOTES_MAX_GRAPHEMES: usize = 200;
const LOGO_MAX_GRAPHEMES: usize = 100;

/// Matches a number with at most two decimal places. Income precision is
/// enforced on the raw field text, not by rounding the parsed value.
static INCOME_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d{1,2})?$").expect("income format regex is valid"));

/// Matches an HTML tag, including an unterminated one at end of input.
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>?").expect("html tag regex is valid"));

/// Strips HTML tags from free-text input before it is stored.
pub fn sanitize(input: &str) -> String {
    HTML_TAG.replace_all(input, "").into_owned()
}

/// The form field a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The source name field.
    Name,
    /// The current-month income field.
    Income,
    /// The notes field.
    Notes,
    /// The logo field.
    Logo,
    /// The tag list.
    Tags,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The field the message belongs to.
    pub field: Field,
    /// The message to surface next to the field.
    pub message: String,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.field, self.message)
    }
}

/// Every field error found while validating one submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: Field, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Whether any field failed validation.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The field errors in the order the fields were checked.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The first error message for `field`, if that field failed.
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

/// The raw, user-entered fields for a source.
///
/// Income is kept as the raw field text so that the two-decimal format rule
/// can be checked on what the user typed.
#[derive(Debug, Clone)]
pub struct SourceDraft {
    /// The entered name.
    pub name: String,
    /// The raw text of the income field.
    pub income: String,
    /// The entered notes, if any.
    pub notes: Option<String>,
    /// The entered tags.
    pub tags: Vec<String>,
    /// The chosen display color.
    pub color: Option<String>,
    /// The entered emoji or image URL.
    pub logo: Option<String>,
    /// Whether the source is catalog-backed or manual.
    pub kind: SourceKind,
}

/// Validates a draft and builds a new income source from it.
///
/// `earnings` holds the form's current-month value and editable prior
/// months; its prior months become the stored history with any current-month
/// entry stripped. `existing_names` is the set of names already held, used
/// for the add-time uniqueness check.
///
/// # Errors
/// Returns the full list of field errors when any field is invalid. The
/// income field text in `draft` is authoritative for format checks;
/// `earnings.current_income` is ignored in favor of the parsed value.
pub fn validate_new(
    id: SourceId,
    draft: &SourceDraft,
    earnings: &EarningsForm,
    existing_names: &[String],
    current_month: MonthLabel,
) -> Result<IncomeSource, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = validate_name(&draft.name, &mut errors);

    if let Some(ref name) = name
        && existing_names.iter().any(|existing| existing == name)
    {
        errors.push(Field::Name, "A source with this name already exists");
    }

    let income = validate_income(&draft.income, &mut errors);
    let notes = validate_notes(draft.notes.as_deref(), &mut errors);
    validate_logo(draft.logo.as_deref(), &mut errors);
    validate_tags(&draft.tags, false, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    // All fields checked above, so the unwraps cannot be reached.
    let current_income = income.unwrap_or_default();

    Ok(IncomeSource {
        id,
        name: name.unwrap_or_default(),
        current_income,
        tags: draft.tags.clone(),
        color: draft.color.clone(),
        logo: draft.logo.clone(),
        notes,
        kind: draft.kind,
        historical_earnings: earnings.prior_months_at_rest(current_month),
    })
}

/// Validates a draft and applies it to an existing source.
///
/// Edit-time validation additionally requires at least one tag. The id and
/// kind of the original record are kept.
///
/// # Errors
/// Returns the full list of field errors when any field is invalid.
pub fn validate_edit(
    source: &IncomeSource,
    draft: &SourceDraft,
    earnings: &EarningsForm,
    current_month: MonthLabel,
) -> Result<IncomeSource, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = validate_name(&draft.name, &mut errors);
    let income = validate_income(&draft.income, &mut errors);
    let notes = validate_notes(draft.notes.as_deref(), &mut errors);
    validate_logo(draft.logo.as_deref(), &mut errors);
    validate_tags(&draft.tags, true, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    let current_income = income.unwrap_or_default();

    Ok(IncomeSource {
        id: source.id.clone(),
        name: name.unwrap_or_default(),
        current_income,
        tags: draft.tags.clone(),
        color: draft.color.clone(),
        logo: draft.logo.clone(),
        notes,
        kind: source.kind,
        historical_earnings: earnings.prior_months_at_rest(current_month),
    })
}

fn validate_name(name: &str, errors: &mut ValidationErrors) -> Option<String> {
    let name = name.trim();
    let length = name.graphemes(true).count();

    if name.is_empty() {
        errors.push(Field::Name, "Name is required");
        None
    } else if length < NAME_MIN_GRAPHEMES {
        errors.push(Field::Name, "Name must be at least 2 characters");
        None
    } else if length > NAME_MAX_GRAPHEMES {
        errors.push(Field::Name, "Name must be at most 50 characters");
        None
    } else {
        Some(name.to_string())
    }
}

fn validate_income(income: &str, errors: &mut ValidationErrors) -> Option<f64> {
    let income = income.trim();

    let Ok(value) = income.parse::<f64>() else {
        errors.push(Field::Income, "Please enter a valid number");
        return None;
    };

    if !INCOME_FORMAT.is_match(income) {
        errors.push(
            Field::Income,
            "Income must be a valid number with up to 2 decimals",
        );
        None
    } else if value <= 0.0 {
        errors.push(Field::Income, "Income must be greater than 0");
        None
    } else if value > MAX_INCOME {
        errors.push(Field::Income, "Income is too large");
        None
    } else {
        Some(value)
    }
}

fn validate_notes(notes: Option<&str>, errors: &mut ValidationErrors) -> Option<String> {
    let notes = notes.map(|notes| sanitize(notes.trim())).filter(|notes| !notes.is_empty());

    if let Some(ref notes) = notes
        && notes.graphemes(true).count() > NOTES_MAX_GRAPHEMES
    {
        errors.push(Field::Notes, "Notes must be at most 200 characters");
        return None;
    }

    notes
}

fn validate_logo(logo: Option<&str>, errors: &mut ValidationErrors) {
    if let Some(logo) = logo
        && logo.graphemes(true).count() > LOGO_MAX_GRAPHEMES
    {
        errors.push(Field::Logo, "Logo must be at most 100 characters");
    }
}

fn validate_tags(tags: &[String], require_non_empty: bool, errors: &mut ValidationErrors) {
    if require_non_empty && tags.is_empty() {
        errors.push(Field::Tags, "At least one tag is required");
        return;
    }

    let out_of_range = tags.iter().any(|tag| {
        let length = tag.graphemes(true).count();
        length < TAG_MIN_GRAPHEMES || length > TAG_MAX_GRAPHEMES
    });

    if out_of_range {
        errors.push(Field::Tags, "Each tag must be 2-20 characters");
    }
}
