//! Pure description of what the form should display for a given state.
//!
//! [`render`] never touches a UI; a [`ViewApplier`] turns the description into
//! actual output.

use crate::config::FormConfig;
use crate::domain::itinerary::{date_of_day, spanish_date_label, trip_length_label};
use crate::domain::{EstimatedDuration, ItineraryDay, ItineraryStatus};
use crate::wizard::state::{FormState, HiddenFields};
use crate::wizard::step::{IndicatorIcon, Step};

pub const MISSING_DATES_NOTICE: &str =
    "Selecciona las fechas de inicio y fin para planificar el itinerario.";
pub const INVALID_RANGE_NOTICE: &str =
    "La fecha de inicio no puede ser posterior a la fecha de fin.";
pub const DURATION_PLACEHOLDER: &str = "Seleccionar duración";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub tabs: Vec<TabView>,
    pub tags: TagEditorView,
    pub itinerary: ItineraryView,
    pub age_range: AgeRangeView,
    pub hidden: HiddenFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub step: Step,
    pub title: &'static str,
    pub icon: IndicatorIcon,
    pub locked: bool,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEditorView {
    pub chips: Vec<String>,
    pub input: String,
    pub capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItineraryView {
    Hidden { notice: &'static str },
    Visible {
        trip_length: String,
        days: Vec<DayCardView>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCardView {
    pub index: usize,
    pub badge: String,
    pub date_label: String,
    pub expanded: bool,
    pub title: String,
    pub description: String,
    pub start_point: String,
    pub end_point: String,
    pub duration_options: Vec<DurationOption>,
}

impl DayCardView {
    pub fn selected_duration(&self) -> Option<&DurationOption> {
        self.duration_options.iter().find(|option| option.selected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeRangeView {
    pub min_label: String,
    pub max_label: String,
}

/// Applies a rendered view to some output surface.
pub trait ViewApplier {
    fn apply(&mut self, view: &FormView);
}

pub fn render(state: &FormState, config: &FormConfig) -> FormView {
    FormView {
        tabs: render_tabs(state),
        tags: TagEditorView {
            chips: state.tags().iter().map(|tag| tag.to_string()).collect(),
            input: state.tag_input().to_string(),
            capacity: config.max_tags,
        },
        itinerary: render_itinerary(state),
        age_range: render_age_range(state, config),
        hidden: state.hidden().clone(),
    }
}

pub fn render_tabs(state: &FormState) -> Vec<TabView> {
    Step::ALL
        .iter()
        .map(|step| TabView {
            step: *step,
            title: step.title(),
            icon: IndicatorIcon::for_validity(state.is_valid(*step)),
            locked: state.is_locked(*step),
            active: state.active_step() == *step,
        })
        .collect()
}

pub fn render_itinerary(state: &FormState) -> ItineraryView {
    match state.itinerary_status() {
        ItineraryStatus::MissingDates => ItineraryView::Hidden {
            notice: MISSING_DATES_NOTICE,
        },
        ItineraryStatus::InvalidRange => ItineraryView::Hidden {
            notice: INVALID_RANGE_NOTICE,
        },
        ItineraryStatus::Ready { start, day_count } => {
            let days = state
                .itinerary()
                .days()
                .iter()
                .take(day_count as usize)
                .enumerate()
                .map(|(index, day)| day_card(index, day, spanish_date_label(date_of_day(start, index))))
                .collect();
            ItineraryView::Visible {
                trip_length: trip_length_label(day_count),
                days,
            }
        }
    }
}

fn day_card(index: usize, day: &ItineraryDay, date_label: String) -> DayCardView {
    let mut duration_options = vec![DurationOption {
        value: EstimatedDuration::Unset.as_str(),
        label: DURATION_PLACEHOLDER,
        selected: day.estimated_duration == EstimatedDuration::Unset,
    }];
    duration_options.extend(EstimatedDuration::CHOICES.iter().map(|choice| DurationOption {
        value: choice.as_str(),
        label: choice.as_str(),
        selected: day.estimated_duration == *choice,
    }));

    DayCardView {
        index,
        badge: format!("Día {}", index + 1),
        date_label,
        expanded: index == 0,
        title: day.title.clone(),
        description: day.description.clone(),
        start_point: day.start_point.clone(),
        end_point: day.end_point.clone(),
        duration_options,
    }
}

fn render_age_range(state: &FormState, config: &FormConfig) -> AgeRangeView {
    let draft = state.draft();
    let label = |value: &str, fallback: u32| {
        if value.is_empty() {
            fallback.to_string()
        } else {
            value.to_string()
        }
    };
    AgeRangeView {
        min_label: label(&draft.rango_edad_min, config.default_age_min),
        max_label: label(&draft.rango_edad_max, config.default_age_max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayField, FieldId, FormMode};
    use crate::wizard::state::InitialData;

    fn state_with_dates(start: &str, end: &str) -> FormState {
        let config = FormConfig::default();
        let mut state = FormState::new(FormMode::Create, InitialData::default(), &config);
        state.set_field(FieldId::StartDate, start);
        state.set_field(FieldId::EndDate, end);
        state.recompute_itinerary();
        state
    }

    #[test]
    fn visible_itinerary_lists_dated_cards() {
        let mut state = state_with_dates("2025-06-01", "2025-06-03");
        state.edit_day(1, DayField::Duration, "4 horas");
        let view = render(&state, &FormConfig::default());

        let ItineraryView::Visible { trip_length, days } = view.itinerary else {
            panic!("itinerary should be visible");
        };
        assert_eq!(trip_length, "3 días de viaje");
        assert_eq!(days.len(), 3);
        assert!(days[0].expanded);
        assert!(!days[1].expanded);
        assert_eq!(days[0].badge, "Día 1");
        assert_eq!(days[2].date_label, "martes, 3 de junio");
        assert_eq!(days[1].selected_duration().unwrap().value, "4 horas");
        assert_eq!(days[0].selected_duration().unwrap().label, DURATION_PLACEHOLDER);
        assert_eq!(days[0].duration_options.len(), 6);
    }

    #[test]
    fn inverted_dates_hide_itinerary_with_notice() {
        let state = state_with_dates("2025-06-05", "2025-06-01");
        let view = render(&state, &FormConfig::default());
        assert_eq!(
            view.itinerary,
            ItineraryView::Hidden {
                notice: INVALID_RANGE_NOTICE
            }
        );
    }

    #[test]
    fn rendering_is_idempotent() {
        let state = state_with_dates("2025-06-01", "2025-06-02");
        let config = FormConfig::default();
        assert_eq!(render(&state, &config), render(&state, &config));
    }

    #[test]
    fn tabs_reflect_locks_and_validity() {
        let state = state_with_dates("", "");
        let tabs = render_tabs(&state);
        assert!(tabs[0].active);
        assert!(!tabs[0].locked);
        assert!(tabs[1].locked && tabs[2].locked);
        assert!(tabs.iter().all(|tab| tab.icon == IndicatorIcon::Neutral));
    }

    #[test]
    fn empty_age_inputs_fall_back_to_defaults() {
        let config = FormConfig::default();
        let mut state = FormState::new(FormMode::Create, InitialData::default(), &config);
        state.set_field(FieldId::AgeMin, "");
        state.set_field(FieldId::AgeMax, "45");
        let view = render(&state, &config);
        assert_eq!(view.age_range.min_label, "18");
        assert_eq!(view.age_range.max_label, "45");
    }
}
