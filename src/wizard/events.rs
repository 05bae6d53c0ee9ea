use std::collections::HashMap;

use crate::domain::{DayField, FieldId, FormMode};
use crate::wizard::step::Step;
use crate::wizard::validation::AgeBound;

/// How a tag entry was committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagTrigger {
    /// Confirmation key pressed on the tag input.
    Enter,
    /// Tag input lost focus.
    Blur,
}

/// Previous/next buttons at the bottom of each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavButton {
    ToLocation,
    BackToInfo,
    ToItinerary,
    BackToLocation,
}

impl NavButton {
    /// `(from, to)` steps of the button.
    pub fn route(self) -> (Step, Step) {
        match self {
            NavButton::ToLocation => (Step::Info, Step::Location),
            NavButton::BackToInfo => (Step::Location, Step::Info),
            NavButton::ToItinerary => (Step::Location, Step::Itinerary),
            NavButton::BackToLocation => (Step::Itinerary, Step::Location),
        }
    }

    pub fn forward_from(step: Step) -> Option<Self> {
        match step {
            Step::Info => Some(NavButton::ToLocation),
            Step::Location => Some(NavButton::ToItinerary),
            Step::Itinerary => None,
        }
    }

    pub fn backward_from(step: Step) -> Option<Self> {
        match step {
            Step::Info => None,
            Step::Location => Some(NavButton::BackToInfo),
            Step::Itinerary => Some(NavButton::BackToLocation),
        }
    }
}

/// Everything the page can report to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    FieldInput { field: FieldId, value: String },
    TagCommit(TagTrigger),
    TagRemove(String),
    Nav(NavButton),
    TabClick(Step),
    DayFieldInput {
        day: usize,
        field: DayField,
        value: String,
    },
    Submit,
}

/// Follow-up work attached to a field change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    RevalidateInfo,
    RevalidateLocation,
    /// Rebuild the itinerary, but only while its step is on screen.
    RecomputeItineraryIfActive,
    AgeRangeCheck(AgeBound),
}

/// Field → reactions table, built once per page.
#[derive(Debug, Clone, Default)]
pub struct EventTable {
    reactions: HashMap<FieldId, Vec<Reaction>>,
}

impl EventTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live revalidation is wired only for new groups; edit mode starts with
    /// every step valid and stays that way.
    pub fn for_mode(mode: FormMode) -> Self {
        let mut table = Self::new();

        if !mode.is_edit() {
            for field in [
                FieldId::TripName,
                FieldId::Destination,
                FieldId::StartDate,
                FieldId::EndDate,
                FieldId::MaxParticipants,
                FieldId::Description,
            ] {
                table.register(field, Reaction::RevalidateInfo);
            }
            table.register(FieldId::MeetingPoint, Reaction::RevalidateLocation);
        }

        table.register(FieldId::StartDate, Reaction::RecomputeItineraryIfActive);
        table.register(FieldId::EndDate, Reaction::RecomputeItineraryIfActive);
        table.register(FieldId::AgeMin, Reaction::AgeRangeCheck(AgeBound::Min));
        table.register(FieldId::AgeMax, Reaction::AgeRangeCheck(AgeBound::Max));

        if !mode.is_edit() {
            table.register(FieldId::AgeMin, Reaction::RevalidateInfo);
            table.register(FieldId::AgeMax, Reaction::RevalidateInfo);
        }

        table
    }

    pub fn register(&mut self, field: FieldId, reaction: Reaction) {
        let entry = self.reactions.entry(field).or_default();
        if !entry.contains(&reaction) {
            entry.push(reaction);
        }
    }

    pub fn reactions(&self, field: FieldId) -> &[Reaction] {
        self.reactions
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_mode_revalidates_before_recomputing_dates() {
        let table = EventTable::for_mode(FormMode::Create);
        assert_eq!(
            table.reactions(FieldId::StartDate),
            &[Reaction::RevalidateInfo, Reaction::RecomputeItineraryIfActive]
        );
        assert_eq!(
            table.reactions(FieldId::MeetingPoint),
            &[Reaction::RevalidateLocation]
        );
        assert_eq!(
            table.reactions(FieldId::AgeMax),
            &[
                Reaction::AgeRangeCheck(AgeBound::Max),
                Reaction::RevalidateInfo
            ]
        );
    }

    #[test]
    fn edit_mode_has_no_live_revalidation() {
        let table = EventTable::for_mode(FormMode::Edit);
        assert!(table.reactions(FieldId::TripName).is_empty());
        assert_eq!(
            table.reactions(FieldId::EndDate),
            &[Reaction::RecomputeItineraryIfActive]
        );
    }

    #[test]
    fn image_url_has_no_reactions() {
        let table = EventTable::for_mode(FormMode::Create);
        assert!(table.reactions(FieldId::ImageUrl).is_empty());
    }

    #[test]
    fn registering_twice_is_ignored() {
        let mut table = EventTable::new();
        table.register(FieldId::TripName, Reaction::RevalidateInfo);
        table.register(FieldId::TripName, Reaction::RevalidateInfo);
        assert_eq!(table.reactions(FieldId::TripName).len(), 1);
    }

    #[test]
    fn nav_buttons_follow_step_order() {
        assert_eq!(NavButton::forward_from(Step::Info), Some(NavButton::ToLocation));
        assert_eq!(NavButton::backward_from(Step::Info), None);
        assert_eq!(
            NavButton::ToItinerary.route(),
            (Step::Location, Step::Itinerary)
        );
    }
}
