mod common;

use common::{controller, fill_info, fill_location, RecordingUi, UiCall};
use venture_form::{
    domain::{FieldId, FormMode},
    wizard::{
        EventOutcome, FormEvent, IndicatorIcon, NavButton, Navigation, NoticeKind, Step,
        TagTrigger,
    },
};

#[test]
fn initialize_locks_later_steps_in_create_mode() {
    let mut ctrl = controller(FormMode::Create);
    let mut ui = RecordingUi::default();
    ctrl.initialize(&mut ui);

    assert!(ui.calls.contains(&UiCall::Lock(Step::Info, false)));
    assert!(ui.calls.contains(&UiCall::Lock(Step::Location, true)));
    assert!(ui.calls.contains(&UiCall::Lock(Step::Itinerary, true)));
    assert_eq!(ui.last_shown(), Some(Step::Info));
}

#[test]
fn full_create_walkthrough_reaches_itinerary() {
    let mut ctrl = controller(FormMode::Create);
    let mut ui = RecordingUi::default();
    ctrl.initialize(&mut ui);
    fill_info(&mut ctrl, &mut ui);

    let outcome = ctrl
        .handle(FormEvent::Nav(NavButton::ToLocation), &mut ui)
        .unwrap();
    assert_eq!(
        outcome,
        EventOutcome::Navigation(Navigation::Switched(Step::Location))
    );

    fill_location(&mut ctrl, &mut ui);
    let outcome = ctrl
        .handle(FormEvent::Nav(NavButton::ToItinerary), &mut ui)
        .unwrap();
    assert_eq!(
        outcome,
        EventOutcome::Navigation(Navigation::Switched(Step::Itinerary))
    );
    assert_eq!(ctrl.state().active_step(), Step::Itinerary);
    assert_eq!(ctrl.state().itinerary().len(), 3);
    assert!(ui.notices().is_empty());
}

#[test]
fn blocked_advance_lists_every_problem() {
    let mut ctrl = controller(FormMode::Create);
    let mut ui = RecordingUi::default();
    ctrl.set_field(FieldId::TripName, "Ru", &mut ui);

    let nav = ctrl.attempt_advance(Step::Info, Step::Location, &mut ui);
    assert_eq!(nav, Navigation::Blocked(Step::Info));

    let notices = ui.notices();
    let (kind, title, body) = notices.last().unwrap();
    assert_eq!(*kind, NoticeKind::Error);
    assert_eq!(title, "Errores en el formulario");
    assert!(body.contains("El nombre del viaje debe tener al menos 3 caracteres"));
    assert!(body.contains("Debe agregar al menos una etiqueta"));
    assert!(body.lines().count() > 2);
}

#[test]
fn invalid_meeting_point_uses_its_own_title() {
    let mut ctrl = controller(FormMode::Create);
    let mut ui = RecordingUi::default();
    fill_info(&mut ctrl, &mut ui);
    ctrl.attempt_advance(Step::Info, Step::Location, &mut ui);
    ctrl.set_field(FieldId::MeetingPoint, "Casa", &mut ui);

    let nav = ctrl.attempt_advance(Step::Location, Step::Itinerary, &mut ui);
    assert_eq!(nav, Navigation::Blocked(Step::Location));
    let notices = ui.notices();
    assert_eq!(notices.last().unwrap().1, "Punto de encuentro inválido");
}

#[test]
fn locked_tabs_explain_what_is_missing() {
    let mut ctrl = controller(FormMode::Create);
    let mut ui = RecordingUi::default();
    ctrl.initialize(&mut ui);

    let nav = ctrl.click_tab(Step::Location, &mut ui);
    assert_eq!(nav, Navigation::Rejected(Step::Location));
    let notices = ui.notices();
    let (kind, title, body) = notices.last().unwrap();
    assert_eq!(*kind, NoticeKind::Warning);
    assert_eq!(title, "Pestaña bloqueada");
    assert_eq!(body, "Primero debes completar la información básica");
    assert_eq!(ctrl.state().active_step(), Step::Info);
}

#[test]
fn indicators_follow_live_validity() {
    let mut ctrl = controller(FormMode::Create);
    let mut ui = RecordingUi::default();
    fill_info(&mut ctrl, &mut ui);
    assert!(ui
        .calls
        .contains(&UiCall::Indicator(Step::Info, IndicatorIcon::Success)));

    ui.clear();
    ctrl.set_field(FieldId::Description, "corta", &mut ui);
    assert!(ui
        .calls
        .contains(&UiCall::Indicator(Step::Info, IndicatorIcon::Neutral)));
    assert!(ui.calls.contains(&UiCall::Lock(Step::Location, true)));
}

#[test]
fn unchanged_validity_pushes_no_updates() {
    let mut ctrl = controller(FormMode::Create);
    let mut ui = RecordingUi::default();
    fill_info(&mut ctrl, &mut ui);

    ui.clear();
    ctrl.set_field(FieldId::Destination, "Cusco y Machu Picchu", &mut ui);
    assert!(ui.calls.is_empty());
}

#[test]
fn regressing_info_invalidates_location() {
    let mut ctrl = controller(FormMode::Create);
    let mut ui = RecordingUi::default();
    fill_info(&mut ctrl, &mut ui);
    fill_location(&mut ctrl, &mut ui);
    assert!(ctrl.state().is_valid(Step::Location));

    ctrl.remove_tag("montaña", &mut ui);
    assert!(!ctrl.state().is_valid(Step::Info));
    assert!(!ctrl.state().is_valid(Step::Location));
    assert!(ctrl.state().is_locked(Step::Location));
    assert!(ctrl.state().is_locked(Step::Itinerary));
}

#[test]
fn meeting_point_input_does_not_unlock_itinerary_without_info() {
    let mut ctrl = controller(FormMode::Create);
    let mut ui = RecordingUi::default();
    fill_location(&mut ctrl, &mut ui);

    assert!(ctrl.state().is_valid(Step::Location));
    assert!(ctrl.state().is_locked(Step::Itinerary));
    assert_eq!(
        ctrl.click_tab(Step::Itinerary, &mut ui),
        Navigation::Rejected(Step::Itinerary)
    );
    assert_eq!(
        ui.notices().last().unwrap().2,
        "Primero debes completar la información básica"
    );
}

#[test]
fn tag_blur_commits_pending_input() {
    let mut ctrl = controller(FormMode::Create);
    let mut ui = RecordingUi::default();
    ctrl.set_field(FieldId::TagInput, "  Aventura ", &mut ui);

    let outcome = ctrl
        .handle(FormEvent::TagCommit(TagTrigger::Blur), &mut ui)
        .unwrap();
    assert!(matches!(outcome, EventOutcome::Tag(Ok(_))));
    assert!(ctrl.state().tags().contains("aventura"));
    assert_eq!(ctrl.state().tag_input(), "");
}

#[test]
fn age_edits_warn_without_blocking_typing() {
    let mut ctrl = controller(FormMode::Create);
    let mut ui = RecordingUi::default();
    ctrl.set_field(FieldId::AgeMin, "70", &mut ui);

    let notices = ui.notices();
    let (kind, title, body) = notices.last().unwrap();
    assert_eq!(*kind, NoticeKind::Warning);
    assert_eq!(title, "Rango de edad inválido");
    assert_eq!(body, "La edad mínima no puede ser mayor a la edad máxima");
    assert_eq!(ctrl.state().draft().get(FieldId::AgeMin), "70");
}

#[test]
fn ages_with_trailing_text_are_compared_by_number() {
    let mut ctrl = controller(FormMode::Create);
    let mut ui = RecordingUi::default();
    ctrl.set_field(FieldId::AgeMax, "30", &mut ui);
    ui.clear();
    ctrl.set_field(FieldId::AgeMin, "50 años", &mut ui);

    let notices = ui.notices();
    let (_, title, body) = notices.last().unwrap();
    assert_eq!(title, "Rango de edad inválido");
    assert_eq!(body, "La edad mínima no puede ser mayor a la edad máxima");
    assert_eq!(ctrl.state().draft().age_min(), Some(50));
}

#[test]
fn image_url_edits_do_not_revalidate() {
    let mut ctrl = controller(FormMode::Create);
    let mut ui = RecordingUi::default();
    fill_info(&mut ctrl, &mut ui);

    ui.clear();
    ctrl.set_field(FieldId::ImageUrl, "ftp://nope", &mut ui);
    assert!(ui.calls.is_empty());
    assert!(ctrl.state().is_valid(Step::Info));
    assert_eq!(
        ctrl.attempt_advance(Step::Info, Step::Location, &mut ui),
        Navigation::Blocked(Step::Info)
    );
}
