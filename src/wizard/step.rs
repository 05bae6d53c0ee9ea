use std::fmt;
use std::str::FromStr;

/// The three ordered steps of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    Info,
    Location,
    Itinerary,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Info, Step::Location, Step::Itinerary];

    pub fn index(self) -> usize {
        match self {
            Step::Info => 0,
            Step::Location => 1,
            Step::Itinerary => 2,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Step::Info => "info",
            Step::Location => "location",
            Step::Itinerary => "itinerary",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Info => "Información",
            Step::Location => "Punto de encuentro",
            Step::Itinerary => "Itinerario",
        }
    }

    pub fn next(self) -> Option<Step> {
        Step::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(self) -> Option<Step> {
        self.index().checked_sub(1).and_then(|i| Step::ALL.get(i).copied())
    }

    /// Steps strictly before this one.
    pub fn predecessors(self) -> &'static [Step] {
        &Step::ALL[..self.index()]
    }

    /// Steps strictly after this one.
    pub fn successors(self) -> &'static [Step] {
        &Step::ALL[self.index() + 1..]
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Step::Info),
            "location" => Ok(Step::Location),
            "itinerary" => Ok(Step::Itinerary),
            other => Err(format!(
                "unknown step `{}` (use info, location or itinerary)",
                other
            )),
        }
    }
}

/// Per-step validity flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabValidity {
    flags: [bool; 3],
}

impl TabValidity {
    pub fn all_valid() -> Self {
        Self { flags: [true; 3] }
    }

    pub fn get(&self, step: Step) -> bool {
        self.flags[step.index()]
    }

    pub fn set(&mut self, step: Step, valid: bool) {
        self.flags[step.index()] = valid;
    }

    /// First step before `step` that is not valid yet.
    pub fn first_unmet_before(&self, step: Step) -> Option<Step> {
        step.predecessors()
            .iter()
            .copied()
            .find(|prior| !self.get(*prior))
    }
}

/// Icon shown next to a tab title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorIcon {
    Success,
    Neutral,
}

impl IndicatorIcon {
    pub fn for_validity(valid: bool) -> Self {
        if valid {
            IndicatorIcon::Success
        } else {
            IndicatorIcon::Neutral
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            IndicatorIcon::Success => "✓",
            IndicatorIcon::Neutral => "○",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_helpers() {
        assert_eq!(Step::Info.next(), Some(Step::Location));
        assert_eq!(Step::Itinerary.next(), None);
        assert_eq!(Step::Info.previous(), None);
        assert_eq!(Step::Itinerary.predecessors(), &[Step::Info, Step::Location]);
        assert_eq!(Step::Info.successors(), &[Step::Location, Step::Itinerary]);
        assert!(Step::Itinerary.successors().is_empty());
    }

    #[test]
    fn first_unmet_names_earliest_gap() {
        let mut validity = TabValidity::default();
        assert_eq!(validity.first_unmet_before(Step::Itinerary), Some(Step::Info));
        validity.set(Step::Info, true);
        assert_eq!(
            validity.first_unmet_before(Step::Itinerary),
            Some(Step::Location)
        );
        validity.set(Step::Location, true);
        assert_eq!(validity.first_unmet_before(Step::Itinerary), None);
        assert_eq!(validity.first_unmet_before(Step::Info), None);
    }

    #[test]
    fn parses_step_ids() {
        assert_eq!("Location".parse::<Step>(), Ok(Step::Location));
        assert!("review".parse::<Step>().is_err());
    }
}
