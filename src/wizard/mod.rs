//! Multi-step group form: step gating, validation, tag and itinerary upkeep,
//! and the final submission gate.

pub mod collaborators;
pub mod controller;
pub mod events;
pub mod state;
pub mod step;
pub mod validation;
pub mod view;

pub use collaborators::{
    ConfirmPrompt, Decision, Dialogs, FormSubmitter, FormUi, NoticeKind, SubmissionPayload,
    TabWidget,
};
pub use controller::{EventOutcome, Navigation, SubmitOutcome, WizardController};
pub use events::{EventTable, FormEvent, NavButton, Reaction, TagTrigger};
pub use state::{FormState, HiddenFields, InitialData, ITINERARY_FIELD, TAGS_FIELD};
pub use step::{IndicatorIcon, Step, TabValidity};
pub use validation::{ValidationError, ValidationReport};
pub use view::{FormView, ViewApplier};
