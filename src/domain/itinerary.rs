//! Day-by-day itinerary derived from the trip's date range.
//!
//! The sequence always holds one record per calendar day between the start and
//! end date (both inclusive). Records keep whatever the organizer typed as long
//! as the number of days stays the same; a change in length rebuilds the list
//! with fresh defaults.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

/// Fixed choices offered for a day's estimated duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EstimatedDuration {
    #[default]
    Unset,
    TwoHours,
    FourHours,
    SixHours,
    EightHours,
    FullDay,
}

impl EstimatedDuration {
    pub const CHOICES: [EstimatedDuration; 5] = [
        EstimatedDuration::TwoHours,
        EstimatedDuration::FourHours,
        EstimatedDuration::SixHours,
        EstimatedDuration::EightHours,
        EstimatedDuration::FullDay,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EstimatedDuration::Unset => "",
            EstimatedDuration::TwoHours => "2 horas",
            EstimatedDuration::FourHours => "4 horas",
            EstimatedDuration::SixHours => "6 horas",
            EstimatedDuration::EightHours => "8 horas",
            EstimatedDuration::FullDay => "Todo el día",
        }
    }

    /// Maps a select value onto a choice; unknown values read as unset.
    pub fn from_value(value: &str) -> Self {
        Self::CHOICES
            .iter()
            .copied()
            .find(|choice| choice.as_str() == value.trim())
            .unwrap_or(EstimatedDuration::Unset)
    }
}

impl From<String> for EstimatedDuration {
    fn from(value: String) -> Self {
        Self::from_value(&value)
    }
}

impl From<EstimatedDuration> for String {
    fn from(value: EstimatedDuration) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for EstimatedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One editable day of the itinerary. Field names on the wire follow the
/// server's DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryDay {
    #[serde(rename = "diaNumero", default)]
    pub day_number: u32,
    #[serde(rename = "titulo", default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "descripcion", default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "puntoPartida", default, deserialize_with = "null_as_default")]
    pub start_point: String,
    #[serde(rename = "puntoLlegada", default, deserialize_with = "null_as_default")]
    pub end_point: String,
    #[serde(
        rename = "duracionEstimada",
        default,
        deserialize_with = "null_as_default"
    )]
    pub estimated_duration: EstimatedDuration,
}

impl ItineraryDay {
    /// Blank record for the 1-based `day_number`.
    pub fn blank(day_number: u32) -> Self {
        Self {
            day_number,
            title: default_day_title(day_number),
            description: String::new(),
            start_point: String::new(),
            end_point: String::new(),
            estimated_duration: EstimatedDuration::Unset,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub fn default_day_title(day_number: u32) -> String {
    format!("Día {}", day_number)
}

/// UI field categories of a day card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayField {
    Title,
    Description,
    StartPoint,
    EndPoint,
    Duration,
}

impl DayField {
    pub const ALL: [DayField; 5] = [
        DayField::Title,
        DayField::Description,
        DayField::StartPoint,
        DayField::EndPoint,
        DayField::Duration,
    ];

    pub fn key(self) -> &'static str {
        match self {
            DayField::Title => "title",
            DayField::Description => "description",
            DayField::StartPoint => "start",
            DayField::EndPoint => "end",
            DayField::Duration => "duration",
        }
    }
}

impl FromStr for DayField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let key = key.strip_prefix("day-").unwrap_or(&key);
        match key {
            "title" => Ok(DayField::Title),
            "description" => Ok(DayField::Description),
            "start" => Ok(DayField::StartPoint),
            "end" => Ok(DayField::EndPoint),
            "duration" => Ok(DayField::Duration),
            other => Err(format!(
                "unknown day field `{}` (use title, description, start, end or duration)",
                other
            )),
        }
    }
}

/// Where the itinerary section stands after the last recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItineraryStatus {
    /// At least one date is missing; the section is hidden.
    MissingDates,
    /// Start is after end; the section is hidden until the dates are fixed.
    InvalidRange,
    /// The section is visible with `day_count` days starting at `start`.
    Ready { start: NaiveDate, day_count: u32 },
}

impl ItineraryStatus {
    pub fn is_visible(self) -> bool {
        matches!(self, ItineraryStatus::Ready { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecomputeOutcome {
    pub status: ItineraryStatus,
    pub regenerated: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItinerarySequence {
    days: Vec<ItineraryDay>,
}

impl ItinerarySequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the sequence from the serialized hidden field. Malformed
    /// content yields an empty sequence.
    pub fn from_hidden(raw: &str) -> Self {
        Self::parse_hidden(raw).unwrap_or_default()
    }

    /// Like [`from_hidden`](Self::from_hidden), but `None` when the field is
    /// blank or is not a JSON array of days. `Some` may hold zero days.
    pub fn parse_hidden(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<Vec<ItineraryDay>>(raw) {
            Ok(days) => Some(Self { days }),
            Err(err) => {
                tracing::error!(error = %err, "failed to load existing itinerary");
                None
            }
        }
    }

    pub fn days(&self) -> &[ItineraryDay] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.days).unwrap_or_else(|_| "[]".into())
    }

    /// Brings the sequence in line with the date range.
    ///
    /// An impossible range leaves the sequence untouched. A valid range
    /// regenerates blank days only when the day count differs from the current
    /// length.
    pub fn recompute(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> RecomputeOutcome {
        let (Some(start), Some(end)) = (start, end) else {
            return RecomputeOutcome {
                status: ItineraryStatus::MissingDates,
                regenerated: false,
            };
        };
        let Some(day_count) = day_count(start, end) else {
            return RecomputeOutcome {
                status: ItineraryStatus::InvalidRange,
                regenerated: false,
            };
        };

        let regenerated = self.days.len() != day_count as usize;
        if regenerated {
            tracing::debug!(
                previous = self.days.len(),
                day_count,
                "regenerating itinerary days"
            );
            self.days = (1..=day_count).map(ItineraryDay::blank).collect();
        }

        RecomputeOutcome {
            status: ItineraryStatus::Ready { start, day_count },
            regenerated,
        }
    }

    /// Writes `value` into the given field of day `index` (0-based). Returns
    /// `false` when the index is out of range.
    pub fn edit(&mut self, index: usize, field: DayField, value: &str) -> bool {
        let Some(day) = self.days.get_mut(index) else {
            return false;
        };
        match field {
            DayField::Title => day.title = value.to_string(),
            DayField::Description => day.description = value.to_string(),
            DayField::StartPoint => day.start_point = value.to_string(),
            DayField::EndPoint => day.end_point = value.to_string(),
            DayField::Duration => day.estimated_duration = EstimatedDuration::from_value(value),
        }
        true
    }
}

/// Inclusive number of calendar days from `start` to `end`, or `None` when
/// `start` is after `end`.
pub fn day_count(start: NaiveDate, end: NaiveDate) -> Option<u32> {
    if start > end {
        return None;
    }
    let span = (end - start).num_days();
    u32::try_from(span + 1).ok()
}

pub fn trip_length_label(day_count: u32) -> String {
    format!("{} días de viaje", day_count)
}

/// Date of the `offset`-th day (0-based) of a trip starting on `start`.
pub fn date_of_day(start: NaiveDate, offset: usize) -> NaiveDate {
    start + Duration::days(offset as i64)
}

/// Spanish long label: weekday, day number and month, e.g.
/// `domingo, 1 de junio`.
pub fn spanish_date_label(date: NaiveDate) -> String {
    format!(
        "{}, {} de {}",
        weekday_name(date.weekday()),
        date.day(),
        month_name(date.month())
    )
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

fn month_name(month: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ];
    MONTHS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("")
}
