//! Scripted answers for confirmation prompts, used by script-mode runs and
//! integration tests.

use once_cell::sync::Lazy;
use std::{
    collections::VecDeque,
    env,
    sync::{Mutex, MutexGuard},
};

pub const CONFIRM_ENV: &str = "VENTURE_FORM_TEST_CONFIRM";

struct ConfirmQueue {
    enabled: bool,
    answers: VecDeque<bool>,
}

impl ConfirmQueue {
    fn from_env() -> Self {
        match env::var(CONFIRM_ENV) {
            Ok(raw) => Self {
                enabled: true,
                answers: parse_answers(&raw),
            },
            Err(_) => Self::new(),
        }
    }

    fn new() -> Self {
        Self {
            enabled: false,
            answers: VecDeque::new(),
        }
    }
}

static CONFIRM_ANSWERS: Lazy<Mutex<ConfirmQueue>> =
    Lazy::new(|| Mutex::new(ConfirmQueue::from_env()));

fn queue() -> MutexGuard<'static, ConfirmQueue> {
    CONFIRM_ANSWERS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Next scripted answer, or `None` when no script is installed. An exhausted
/// script answers "no".
pub fn next_confirm(label: &str) -> Option<bool> {
    let mut guard = queue();
    if !guard.enabled {
        return None;
    }
    let answer = guard.answers.pop_front().unwrap_or_else(|| {
        tracing::warn!(prompt = label, "scripted confirmations exhausted");
        false
    });
    Some(answer)
}

fn parse_answer(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "yes" | "y" | "si" | "sí" | "true" => Some(true),
        "no" | "n" | "false" => Some(false),
        _ => None,
    }
}

fn parse_answers(raw: &str) -> VecDeque<bool> {
    raw.split('|')
        .filter_map(|token| parse_answer(token.trim()))
        .collect()
}

pub fn install_confirm_answers(answers: Vec<bool>) {
    let mut guard = queue();
    guard.enabled = true;
    guard.answers = answers.into();
}

pub fn reset_confirm_answers() {
    let mut guard = queue();
    guard.enabled = false;
    guard.answers.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_answer_tokens() {
        let answers = parse_answers("yes| NO |maybe|sí");
        assert_eq!(answers, VecDeque::from(vec![true, false, true]));
    }

    #[test]
    fn installed_answers_drain_then_refuse() {
        install_confirm_answers(vec![true]);
        assert_eq!(next_confirm("first"), Some(true));
        assert_eq!(next_confirm("second"), Some(false));
        reset_confirm_answers();
        assert_eq!(next_confirm("third"), None);
    }
}
