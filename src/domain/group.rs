use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::FormConfig;

/// Whether the page creates a new group or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    /// Edit pages are served under a path containing the configured marker
    /// (`/editar/` by default).
    pub fn from_path(path: &str, config: &FormConfig) -> Self {
        if path.contains(config.edit_path_marker.as_str()) {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }

    pub fn is_edit(self) -> bool {
        matches!(self, FormMode::Edit)
    }
}

/// Plain inputs of the group form, addressed by their form field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    TripName,
    Destination,
    StartDate,
    EndDate,
    MaxParticipants,
    Description,
    MeetingPoint,
    ImageUrl,
    AgeMin,
    AgeMax,
    TagInput,
}

impl FieldId {
    pub const ALL: [FieldId; 11] = [
        FieldId::TripName,
        FieldId::Destination,
        FieldId::StartDate,
        FieldId::EndDate,
        FieldId::MaxParticipants,
        FieldId::Description,
        FieldId::MeetingPoint,
        FieldId::ImageUrl,
        FieldId::AgeMin,
        FieldId::AgeMax,
        FieldId::TagInput,
    ];

    pub fn form_name(self) -> &'static str {
        match self {
            FieldId::TripName => "nombreViaje",
            FieldId::Destination => "destinoPrincipal",
            FieldId::StartDate => "fechaInicio",
            FieldId::EndDate => "fechaFin",
            FieldId::MaxParticipants => "maxParticipantes",
            FieldId::Description => "descripcion",
            FieldId::MeetingPoint => "puntoEncuentro",
            FieldId::ImageUrl => "imagenDestacada",
            FieldId::AgeMin => "rangoEdadMin",
            FieldId::AgeMax => "rangoEdadMax",
            FieldId::TagInput => "etiquetasInput",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_name())
    }
}

impl FromStr for FieldId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        FieldId::ALL
            .iter()
            .copied()
            .find(|field| field.form_name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown field `{}`", needle))
    }
}

/// Raw values of the form inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupDraft {
    pub nombre_viaje: String,
    pub destino_principal: String,
    pub fecha_inicio: String,
    pub fecha_fin: String,
    pub max_participantes: String,
    pub descripcion: String,
    pub punto_encuentro: String,
    pub imagen_destacada: String,
    pub rango_edad_min: String,
    pub rango_edad_max: String,
}

impl GroupDraft {
    pub fn with_defaults(config: &FormConfig) -> Self {
        Self {
            rango_edad_min: config.default_age_min.to_string(),
            rango_edad_max: config.default_age_max.to_string(),
            ..Self::default()
        }
    }

    /// Returns the raw value of `field`. The tag input is not part of the
    /// draft and always reads empty here.
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::TripName => &self.nombre_viaje,
            FieldId::Destination => &self.destino_principal,
            FieldId::StartDate => &self.fecha_inicio,
            FieldId::EndDate => &self.fecha_fin,
            FieldId::MaxParticipants => &self.max_participantes,
            FieldId::Description => &self.descripcion,
            FieldId::MeetingPoint => &self.punto_encuentro,
            FieldId::ImageUrl => &self.imagen_destacada,
            FieldId::AgeMin => &self.rango_edad_min,
            FieldId::AgeMax => &self.rango_edad_max,
            FieldId::TagInput => "",
        }
    }

    /// Stores `value` for `field`. Returns `false` for fields the draft does
    /// not own.
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) -> bool {
        let slot = match field {
            FieldId::TripName => &mut self.nombre_viaje,
            FieldId::Destination => &mut self.destino_principal,
            FieldId::StartDate => &mut self.fecha_inicio,
            FieldId::EndDate => &mut self.fecha_fin,
            FieldId::MaxParticipants => &mut self.max_participantes,
            FieldId::Description => &mut self.descripcion,
            FieldId::MeetingPoint => &mut self.punto_encuentro,
            FieldId::ImageUrl => &mut self.imagen_destacada,
            FieldId::AgeMin => &mut self.rango_edad_min,
            FieldId::AgeMax => &mut self.rango_edad_max,
            FieldId::TagInput => return false,
        };
        *slot = value.into();
        true
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        parse_date(&self.fecha_inicio)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        parse_date(&self.fecha_fin)
    }

    pub fn age_min(&self) -> Option<i64> {
        parse_age(&self.rango_edad_min)
    }

    pub fn age_max(&self) -> Option<i64> {
        parse_age(&self.rango_edad_max)
    }

    /// `(name, value)` pairs in form order, used to build the submission.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        FieldId::ALL
            .iter()
            .filter(|field| **field != FieldId::TagInput)
            .map(|field| (field.form_name(), self.get(*field)))
            .collect()
    }
}

/// Date inputs carry `YYYY-MM-DD`; anything else counts as missing.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Leading integer of the input, so `"18 años"` reads as 18. Trailing text is
/// ignored; no leading digits means no value.
fn parse_age(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    let sign_len = trimmed.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }
    let digits_len = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits_len == 0 {
        return None;
    }
    trimmed[..sign_len + digits_len].parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_mode_detected_from_path() {
        let config = FormConfig::default();
        assert_eq!(
            FormMode::from_path("/grupos/editar/42", &config),
            FormMode::Edit
        );
        assert_eq!(FormMode::from_path("/grupos/crear", &config), FormMode::Create);
    }

    #[test]
    fn field_ids_parse_case_insensitively() {
        assert_eq!("nombreviaje".parse::<FieldId>(), Ok(FieldId::TripName));
        assert_eq!(" fechaFin ".parse::<FieldId>(), Ok(FieldId::EndDate));
        assert!("unknown".parse::<FieldId>().is_err());
    }

    #[test]
    fn unparseable_dates_read_as_missing() {
        let mut draft = GroupDraft::default();
        draft.set(FieldId::StartDate, "2025-13-40");
        draft.set(FieldId::EndDate, "2025-06-03");
        assert_eq!(draft.start_date(), None);
        assert_eq!(draft.end_date(), NaiveDate::from_ymd_opt(2025, 6, 3));
    }

    #[test]
    fn defaults_seed_age_range() {
        let draft = GroupDraft::with_defaults(&FormConfig::default());
        assert_eq!(draft.age_min(), Some(18));
        assert_eq!(draft.age_max(), Some(60));
    }

    #[test]
    fn tag_input_is_not_a_draft_field() {
        let mut draft = GroupDraft::default();
        assert!(!draft.set(FieldId::TagInput, "x"));
        assert!(draft.entries().iter().all(|(name, _)| *name != "etiquetasInput"));
    }

    #[test]
    fn age_reads_leading_integer() {
        assert_eq!(parse_age("18 años"), Some(18));
        assert_eq!(parse_age("  40"), Some(40));
        assert_eq!(parse_age("-3x"), Some(-3));
        assert_eq!(parse_age("+7"), Some(7));
        assert_eq!(parse_age("21.5"), Some(21));
        assert_eq!(parse_age("años 18"), None);
        assert_eq!(parse_age("--4"), None);
        assert_eq!(parse_age(""), None);
    }
}
