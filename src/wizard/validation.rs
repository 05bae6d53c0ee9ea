//! Step validators.
//!
//! Each validator returns a [`ValidationReport`] listing every violated rule;
//! whether the report is shown to the user is up to the caller.

use std::fmt;

use chrono::NaiveDate;

use crate::config::FormConfig;
use crate::domain::{GroupDraft, TagList};
use crate::utils::char_len;
use crate::wizard::step::Step;

/// A single violated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub step: Step,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new(step: Step) -> Self {
        Self {
            step,
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(ValidationError::new(message));
    }

    /// Title of the blocking dialog for this step's failures.
    pub fn title(&self) -> &'static str {
        match self.step {
            Step::Location => "Punto de encuentro inválido",
            Step::Info | Step::Itinerary => "Errores en el formulario",
        }
    }

    /// All messages, one per line.
    pub fn body(&self) -> String {
        self.errors
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn contains(&self, fragment: &str) -> bool {
        self.errors
            .iter()
            .any(|error| error.message.contains(fragment))
    }
}

/// Everything the validators need to read.
pub struct ValidationInput<'a> {
    pub draft: &'a GroupDraft,
    pub tags: &'a TagList,
    pub today: NaiveDate,
    pub config: &'a FormConfig,
}

pub fn validate_step(step: Step, input: &ValidationInput<'_>) -> ValidationReport {
    match step {
        Step::Info => validate_info(input),
        Step::Location => validate_location(input),
        // The itinerary carries no mandatory content.
        Step::Itinerary => ValidationReport::new(Step::Itinerary),
    }
}

pub fn validate_info(input: &ValidationInput<'_>) -> ValidationReport {
    let draft = input.draft;
    let config = input.config;
    let mut report = ValidationReport::new(Step::Info);

    if char_len(&draft.nombre_viaje) < config.min_trip_name_len {
        report.push(format!(
            "El nombre del viaje debe tener al menos {} caracteres",
            config.min_trip_name_len
        ));
    }

    if char_len(&draft.destino_principal) < config.min_destination_len {
        report.push(format!(
            "El destino principal debe tener al menos {} caracteres",
            config.min_destination_len
        ));
    }

    match (draft.start_date(), draft.end_date()) {
        (Some(start), Some(end)) => {
            if start < input.today {
                report.push("La fecha de inicio debe ser en el futuro");
            }
            if end < start {
                report.push("La fecha de fin debe ser posterior a la fecha de inicio");
            }
        }
        _ => report.push("Las fechas de inicio y fin son obligatorias"),
    }

    if char_len(&draft.descripcion) < config.min_description_len {
        report.push(format!(
            "La descripción debe tener al menos {} caracteres",
            config.min_description_len
        ));
    }

    if draft.max_participantes.is_empty() {
        report.push("Debe seleccionar el número máximo de participantes");
    }

    if input.tags.is_empty() {
        report.push("Debe agregar al menos una etiqueta");
    }

    if let (Some(min), Some(max)) = (draft.age_min(), draft.age_max()) {
        if min > max {
            report.push("La edad máxima debe ser mayor o igual a la edad mínima");
        }
    }

    if !draft.imagen_destacada.is_empty() && !is_http_url(&draft.imagen_destacada) {
        report.push("La URL de la imagen debe comenzar con http:// o https://");
    }

    report
}

pub fn validate_location(input: &ValidationInput<'_>) -> ValidationReport {
    let mut report = ValidationReport::new(Step::Location);
    if char_len(&input.draft.punto_encuentro) < input.config.min_meeting_point_len {
        report.push(format!(
            "El punto de encuentro debe tener al menos {} caracteres",
            input.config.min_meeting_point_len
        ));
    }
    report
}

/// `http://` or `https://` followed by at least one character.
fn is_http_url(value: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        value
            .strip_prefix(scheme)
            .is_some_and(|rest| !rest.is_empty())
    })
}

/// Non-blocking feedback for the linked age inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBound {
    Min,
    Max,
}

/// Warning to show after editing one side of the age range, if the range is
/// inverted.
pub fn age_range_warning(draft: &GroupDraft, edited: AgeBound) -> Option<&'static str> {
    let (min, max) = (draft.age_min()?, draft.age_max()?);
    match edited {
        AgeBound::Min if min > max => Some("La edad mínima no puede ser mayor a la edad máxima"),
        AgeBound::Max if max < min => Some("La edad máxima no puede ser menor a la edad mínima"),
        _ => None,
    }
}

pub const AGE_RANGE_WARNING_TITLE: &str = "Rango de edad inválido";
