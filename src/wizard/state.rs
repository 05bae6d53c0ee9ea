use crate::config::FormConfig;
use crate::domain::{
    DayField, FieldId, FormMode, GroupDraft, ItinerarySequence, ItineraryStatus,
    RecomputeOutcome, Tag, TagError, TagList,
};
use crate::wizard::step::{Step, TabValidity};

pub const TAGS_FIELD: &str = "etiquetas";
pub const ITINERARY_FIELD: &str = "diasItinerarioJson";

/// Serialized mirrors of the tag list and itinerary sent with the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenFields {
    pub etiquetas: String,
    pub dias_itinerario_json: String,
}

impl Default for HiddenFields {
    fn default() -> Self {
        Self {
            etiquetas: "[]".into(),
            dias_itinerario_json: "[]".into(),
        }
    }
}

/// Server-rendered content available when the page loads.
#[derive(Debug, Clone, Default)]
pub struct InitialData {
    pub draft: Option<GroupDraft>,
    pub tags_json: Option<String>,
    pub itinerary_json: Option<String>,
}

/// The single state object shared by the tab gate, tag editor and itinerary
/// generator. Mutation goes through methods so the hidden fields never drift
/// from the data they mirror.
#[derive(Debug, Clone)]
pub struct FormState {
    mode: FormMode,
    active_step: Step,
    validity: TabValidity,
    draft: GroupDraft,
    tags: TagList,
    tag_input: String,
    itinerary: ItinerarySequence,
    stored_itinerary: bool,
    itinerary_status: ItineraryStatus,
    hidden: HiddenFields,
}

impl FormState {
    pub fn new(mode: FormMode, initial: InitialData, config: &FormConfig) -> Self {
        let draft = initial
            .draft
            .unwrap_or_else(|| GroupDraft::with_defaults(config));

        // Stored collections only count when editing an existing group.
        let (tags, stored) = if mode.is_edit() {
            (
                initial
                    .tags_json
                    .as_deref()
                    .map(|raw| TagList::from_hidden(raw, config))
                    .unwrap_or_else(|| TagList::new(config)),
                initial
                    .itinerary_json
                    .as_deref()
                    .and_then(ItinerarySequence::parse_hidden),
            )
        } else {
            (TagList::new(config), None)
        };
        let stored_itinerary = stored.is_some();
        let itinerary = stored.unwrap_or_default();

        let validity = if mode.is_edit() {
            TabValidity::all_valid()
        } else {
            TabValidity::default()
        };

        let mut state = Self {
            mode,
            active_step: Step::Info,
            validity,
            draft,
            tags,
            tag_input: String::new(),
            itinerary,
            stored_itinerary,
            itinerary_status: ItineraryStatus::MissingDates,
            hidden: HiddenFields::default(),
        };
        state.sync_tags();
        state.sync_itinerary();
        state
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn active_step(&self) -> Step {
        self.active_step
    }

    pub fn validity(&self) -> TabValidity {
        self.validity
    }

    pub fn is_valid(&self, step: Step) -> bool {
        self.validity.get(step)
    }

    pub fn draft(&self) -> &GroupDraft {
        &self.draft
    }

    pub fn tags(&self) -> &TagList {
        &self.tags
    }

    pub fn tag_input(&self) -> &str {
        &self.tag_input
    }

    pub fn itinerary(&self) -> &ItinerarySequence {
        &self.itinerary
    }

    /// Whether an edited group arrived with a readable itinerary, even an
    /// empty one.
    pub fn has_stored_itinerary(&self) -> bool {
        self.stored_itinerary
    }

    pub fn itinerary_status(&self) -> ItineraryStatus {
        self.itinerary_status
    }

    pub fn hidden(&self) -> &HiddenFields {
        &self.hidden
    }

    /// A step is reachable when every prior step is valid; edit mode opens
    /// every step.
    pub fn is_reachable(&self, step: Step) -> bool {
        self.mode.is_edit() || self.validity.first_unmet_before(step).is_none()
    }

    pub fn is_locked(&self, step: Step) -> bool {
        !self.is_reachable(step)
    }

    pub(crate) fn set_active_step(&mut self, step: Step) {
        self.active_step = step;
    }

    pub(crate) fn set_validity(&mut self, step: Step, valid: bool) {
        self.validity.set(step, valid);
    }

    /// Stores a raw input value; the tag input is kept apart from the draft.
    pub(crate) fn set_field(&mut self, field: FieldId, value: &str) {
        if field == FieldId::TagInput {
            self.tag_input = value.to_string();
        } else {
            self.draft.set(field, value);
        }
    }

    pub(crate) fn add_tag(&mut self, raw: &str) -> Result<Tag, TagError> {
        let tag = self.tags.add(raw)?;
        self.tag_input.clear();
        self.sync_tags();
        Ok(tag)
    }

    pub(crate) fn remove_tag(&mut self, tag: &str) -> bool {
        let removed = self.tags.remove(tag);
        if removed {
            self.sync_tags();
        }
        removed
    }

    pub(crate) fn recompute_itinerary(&mut self) -> RecomputeOutcome {
        let outcome = self
            .itinerary
            .recompute(self.draft.start_date(), self.draft.end_date());
        self.itinerary_status = outcome.status;
        if outcome.status.is_visible() {
            self.sync_itinerary();
        }
        outcome
    }

    pub(crate) fn edit_day(&mut self, index: usize, field: DayField, value: &str) -> bool {
        let changed = self.itinerary.edit(index, field, value);
        if changed {
            self.sync_itinerary();
        }
        changed
    }

    fn sync_tags(&mut self) {
        self.hidden.etiquetas = self.tags.to_json();
    }

    fn sync_itinerary(&mut self) {
        self.hidden.dias_itinerario_json = self.itinerary.to_json();
    }
}
