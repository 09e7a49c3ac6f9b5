//! Research request form: two comma-separated lists, validated on submit.
//!
//! The rules live in free functions ([`validate`], [`evaluate_submit`]) so the
//! iocraft component and the headless [`InputForm`] share one implementation.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, info};

use crate::core::notify::Notifier;

/// Maximum number of comma-separated segments per field.
pub const MAX_SEGMENTS: usize = 5;

/// Toast shown when a submit attempt fails validation.
pub const INVALID_FORM_MESSAGE: &str = "Please fix the errors in the form";

pub const IDLE_CAPTION: &str = "Start research";
pub const BUSY_CAPTION: &str = "Processing...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Technologies,
    BusinessAreas,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Technologies, Field::BusinessAreas];

    /// Stable identifier of the input.
    pub fn name(self) -> &'static str {
        match self {
            Field::Technologies => "technologies",
            Field::BusinessAreas => "businessAreas",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Technologies => "Technologies (comma separated)",
            Field::BusinessAreas => "Business areas (comma separated)",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Technologies => "e.g. AI, Machine Learning, Blockchain",
            Field::BusinessAreas => "e.g. Healthcare, Finance, Education",
        }
    }

    /// Text shown under the input for the given error.
    pub fn error_message(self, error: FieldError) -> &'static str {
        match (self, error) {
            (Field::Technologies, FieldError::Required) => "Technologies are required",
            (Field::Technologies, FieldError::TooMany) => "At most 5 technologies allowed",
            (Field::BusinessAreas, FieldError::Required) => "Business areas are required",
            (Field::BusinessAreas, FieldError::TooMany) => "At most 5 business areas allowed",
        }
    }

    /// The other field; focus cycles between the two.
    pub fn next(self) -> Field {
        match self {
            Field::Technologies => Field::BusinessAreas,
            Field::BusinessAreas => Field::Technologies,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a field failed; rendered per field by [`Field::error_message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    TooMany,
}

/// Checks one raw field value. Emptiness wins over the segment count.
///
/// Segments are counted before trimming, so `"a,,,,,"` is `TooMany` even
/// though it parses to a single entry.
pub fn validate_field(raw: &str) -> Option<FieldError> {
    if raw.trim().is_empty() {
        Some(FieldError::Required)
    } else if raw.split(',').count() > MAX_SEGMENTS {
        Some(FieldError::TooMany)
    } else {
        None
    }
}

/// Split on commas, trim, drop empties. Order and duplicates are kept.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Raw text of both inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub technologies: String,
    pub business_areas: String,
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Technologies => &self.technologies,
            Field::BusinessAreas => &self.business_areas,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Technologies => &mut self.technologies,
            Field::BusinessAreas => &mut self.business_areas,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }
}

/// Per-field errors from the latest submit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.get(field).map(|e| field.error_message(e))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.0.iter().map(|(f, e)| (*f, *e))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, err)| format!("{field}: {}", field.error_message(err)))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Parsed lists handed to the form's owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchQuery {
    pub technologies: Vec<String>,
    pub business_areas: Vec<String>,
}

/// Validate both fields; parsed lists are only produced when both pass.
pub fn validate(values: &FormValues) -> Result<ResearchQuery, ValidationErrors> {
    let mut errors = BTreeMap::new();
    for field in Field::ALL {
        if let Some(err) = validate_field(values.get(field)) {
            errors.insert(field, err);
        }
    }

    if !errors.is_empty() {
        return Err(ValidationErrors(errors));
    }

    Ok(ResearchQuery {
        technologies: parse_list(&values.technologies),
        business_areas: parse_list(&values.business_areas),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Busy,
}

impl FormState {
    pub fn from_loading(is_loading: bool) -> Self {
        if is_loading {
            FormState::Busy
        } else {
            FormState::Idle
        }
    }

    pub fn submit_caption(self) -> &'static str {
        match self {
            FormState::Idle => IDLE_CAPTION,
            FormState::Busy => BUSY_CAPTION,
        }
    }

    /// Inputs and the submit control are disabled while busy.
    pub fn is_disabled(self) -> bool {
        self == FormState::Busy
    }
}

/// What a submit attempt decided, before anyone acts on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Ready(ResearchQuery),
    Rejected(ValidationErrors),
    Busy,
}

/// Shared submit step: refuses while busy, otherwise validates and sends the
/// failure toast when validation does not pass.
pub fn evaluate_submit(values: &FormValues, is_loading: bool, notifier: &dyn Notifier) -> Submission {
    if is_loading {
        debug!("submit ignored while loading");
        return Submission::Busy;
    }

    match validate(values) {
        Ok(query) => Submission::Ready(query),
        Err(errors) => {
            debug!(%errors, "form rejected");
            notifier.notify(INVALID_FORM_MESSAGE);
            Submission::Rejected(errors)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    Rejected(ValidationErrors),
    Busy,
}

/// Headless form component. The owner supplies the submit callback and drives
/// the loading flag; the form only keeps text values and errors.
pub struct InputForm<F, N> {
    values: FormValues,
    errors: ValidationErrors,
    is_loading: bool,
    on_submit: F,
    notifier: N,
}

impl<F, N> InputForm<F, N>
where
    F: FnMut(Vec<String>, Vec<String>),
    N: Notifier,
{
    pub fn new(on_submit: F, is_loading: bool, notifier: N) -> Self {
        Self {
            values: FormValues::default(),
            errors: ValidationErrors::default(),
            is_loading,
            on_submit,
            notifier,
        }
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn state(&self) -> FormState {
        FormState::from_loading(self.is_loading)
    }

    pub fn submit_caption(&self) -> &'static str {
        self.state().submit_caption()
    }

    pub fn inputs_disabled(&self) -> bool {
        self.state().is_disabled()
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    /// Replace a field's text. Returns false (and changes nothing) while busy.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) -> bool {
        if self.inputs_disabled() {
            return false;
        }
        self.values.set(field, value);
        true
    }

    pub fn error(&self, field: Field) -> Option<FieldError> {
        self.errors.get(field)
    }

    pub fn error_message(&self, field: Field) -> Option<&'static str> {
        self.errors.message(field)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        match evaluate_submit(&self.values, self.is_loading, &self.notifier) {
            Submission::Busy => SubmitOutcome::Busy,
            Submission::Rejected(errors) => {
                self.errors = errors.clone();
                SubmitOutcome::Rejected(errors)
            }
            Submission::Ready(query) => {
                self.errors = ValidationErrors::default();
                info!(
                    technologies = query.technologies.len(),
                    business_areas = query.business_areas.len(),
                    "form submitted"
                );
                (self.on_submit)(query.technologies, query.business_areas);
                SubmitOutcome::Submitted
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(tech: &str, areas: &str) -> FormValues {
        FormValues {
            technologies: tech.to_string(),
            business_areas: areas.to_string(),
        }
    }

    #[test]
    fn empty_or_blank_is_required() {
        assert_eq!(validate_field(""), Some(FieldError::Required));
        assert_eq!(validate_field("   \t"), Some(FieldError::Required));
    }

    #[test]
    fn more_than_five_segments_is_too_many() {
        assert_eq!(validate_field("a,b,c,d,e"), None);
        assert_eq!(validate_field("a,b,c,d,e,f"), Some(FieldError::TooMany));
    }

    #[test]
    fn segments_are_counted_before_trimming() {
        assert_eq!(validate_field("a,,,,,"), Some(FieldError::TooMany));
        assert_eq!(parse_list("a,,,,,"), vec!["a"]);
    }

    #[test]
    fn commas_only_is_too_many_not_required() {
        // non-blank after trim, so the count rule applies
        assert_eq!(validate_field(",,,,,"), Some(FieldError::TooMany));
        assert_eq!(validate_field(",,"), None);
    }

    #[test]
    fn parse_trims_drops_empties_keeps_order_and_duplicates() {
        assert_eq!(
            parse_list(" AI, ML,  , AI ,Blockchain"),
            vec!["AI", "ML", "AI", "Blockchain"]
        );
    }

    #[test]
    fn validate_reports_each_failing_field() {
        let errors = validate(&values("", "a,b,c,d,e,f")).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(Field::Technologies), Some(FieldError::Required));
        assert_eq!(errors.get(Field::BusinessAreas), Some(FieldError::TooMany));
        assert_eq!(
            errors.message(Field::BusinessAreas),
            Some("At most 5 business areas allowed")
        );
    }

    #[test]
    fn validate_produces_parsed_query() {
        let query = validate(&values("AI, ML,  , Blockchain", "Healthcare,Finance")).unwrap();
        assert_eq!(query.technologies, vec!["AI", "ML", "Blockchain"]);
        assert_eq!(query.business_areas, vec!["Healthcare", "Finance"]);
    }

    #[test]
    fn errors_display_names_fields() {
        let errors = validate(&values("", "x")).unwrap_err();
        assert_eq!(errors.to_string(), "technologies: Technologies are required");
    }

    #[derive(Default)]
    struct CountingNotifier(std::cell::Cell<usize>);

    impl Notifier for CountingNotifier {
        fn notify(&self, _message: &str) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn evaluate_submit_refuses_while_loading_without_validating() {
        let notifier = CountingNotifier::default();
        // invalid input would otherwise toast
        assert_eq!(evaluate_submit(&values("", ""), true, &notifier), Submission::Busy);
        assert_eq!(
            evaluate_submit(&values("AI", "Finance"), true, &notifier),
            Submission::Busy
        );
        assert_eq!(notifier.0.get(), 0);

        assert!(matches!(
            evaluate_submit(&values("", ""), false, &notifier),
            Submission::Rejected(_)
        ));
        assert_eq!(notifier.0.get(), 1);
    }

    #[test]
    fn state_follows_loading_flag() {
        assert_eq!(FormState::from_loading(false).submit_caption(), IDLE_CAPTION);
        assert_eq!(FormState::from_loading(true).submit_caption(), BUSY_CAPTION);
        assert!(FormState::Busy.is_disabled());
        assert!(!FormState::Idle.is_disabled());
    }

    #[test]
    fn field_names_are_stable() {
        assert_eq!(Field::Technologies.name(), "technologies");
        assert_eq!(Field::BusinessAreas.name(), "businessAreas");
        assert_eq!(Field::Technologies.next(), Field::BusinessAreas);
        assert_eq!(Field::BusinessAreas.next(), Field::Technologies);
    }
}
