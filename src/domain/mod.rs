pub mod group;
pub mod itinerary;
pub mod tags;

pub use group::{FieldId, FormMode, GroupDraft};
pub use itinerary::{
    DayField, EstimatedDuration, ItineraryDay, ItinerarySequence, ItineraryStatus,
    RecomputeOutcome,
};
pub use tags::{Tag, TagError, TagList};
