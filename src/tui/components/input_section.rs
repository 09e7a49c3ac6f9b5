use iocraft::prelude::*;

use crate::core::form::{
    self, Field, FormState, FormValues, Submission, ValidationErrors,
};
use crate::tui::{AppContext, AppMessage, ToastNotifier};

#[derive(Default, Props)]
pub struct InputSectionProps {
    /// Owned by the app; disables editing and submit while a job runs.
    pub is_loading: bool,
}

/// Apply an editing key to the focused field. Inputs are read-only while loading.
fn edit_values(values: &FormValues, field: Field, code: KeyCode, is_loading: bool) -> FormValues {
    let mut next = values.clone();
    if is_loading {
        return next;
    }
    match code {
        KeyCode::Char(c) => next.get_mut(field).push(c),
        KeyCode::Backspace => {
            next.get_mut(field).pop();
        }
        KeyCode::Esc => next.set(field, String::new()),
        _ => {}
    }
    next
}

/// Research form: technologies and business areas inputs plus a submit button.
/// Valid submissions are reported as `AppMessage::ResearchRequested`.
#[component]
pub fn InputSection(props: &InputSectionProps, mut hooks: Hooks) -> impl Into<AnyElement<'static>> {
    let values = hooks.use_state(FormValues::default);
    let errors = hooks.use_state(ValidationErrors::default);
    let focus = hooks.use_state(|| Field::Technologies);
    let mut loading = hooks.use_state(|| false);
    let (width, _) = hooks.use_terminal_size();

    let app_ctx = hooks.use_context::<AppContext>();
    let ui_sender = app_ctx.ui_sender.clone();

    // Mirror the prop into state so the key handler sees the current value.
    let loading_now = *loading.read();
    if loading_now != props.is_loading {
        loading.set(props.is_loading);
    }

    // Handle keyboard events.
    hooks.use_terminal_events({
        let mut values = values;
        let mut errors = errors;
        let mut focus = focus;
        let notifier = ToastNotifier::new(ui_sender.clone());
        move |event| {
            let TerminalEvent::Key(key) = event else {
                return;
            };
            if key.kind != KeyEventKind::Press {
                return;
            }

            let is_loading = *loading.read();
            let field = *focus.read();

            match key.code {
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                    focus.set(field.next());
                }
                KeyCode::Enter => {
                    let snapshot = values.read().clone();
                    match form::evaluate_submit(&snapshot, is_loading, &notifier) {
                        Submission::Ready(query) => {
                            errors.set(ValidationErrors::default());
                            let _ = ui_sender.send(AppMessage::ResearchRequested(query));
                        }
                        Submission::Rejected(found) => errors.set(found),
                        Submission::Busy => {}
                    }
                }
                code => {
                    let current = values.read().clone();
                    let next = edit_values(&current, field, code, is_loading);
                    if next != current {
                        values.set(next);
                    }
                }
            }
        }
    });

    let state = FormState::from_loading(props.is_loading);
    let current = values.read().clone();
    let current_errors = errors.read().clone();
    let focused = *focus.read();

    let input_width = if width > 6 { width - 4 } else { 76 };

    let fields: Vec<AnyElement<'static>> = Field::ALL
        .iter()
        .map(|&field| {
            let raw = current.get(field).to_string();
            let message = current_errors.message(field);
            let is_focused = field == focused && !state.is_disabled();

            let (content, text_color) = match (raw.is_empty(), is_focused) {
                (true, true) => (format!("│{}", field.placeholder()), Color::DarkGrey),
                (true, false) => (field.placeholder().to_string(), Color::DarkGrey),
                (false, true) => (format!("{}│", raw), Color::White),
                (false, false) => (raw, Color::Grey),
            };

            let border_color = if message.is_some() {
                Color::Red
            } else if state.is_disabled() {
                Color::DarkGrey
            } else if is_focused {
                Color::Yellow
            } else {
                Color::Grey
            };

            let error_line = message.map(|msg| {
                element! {
                    Text(content: msg, color: Color::Red)
                }
                .into_any()
            });

            element! {
                View(flex_direction: FlexDirection::Column, margin_bottom: 1) {
                    Text(content: field.label(), weight: Weight::Bold)
                    View(
                        border_style: BorderStyle::Round,
                        border_color: border_color,
                        padding_left: 1,
                        padding_right: 1,
                    ) {
                        Text(content: content, color: text_color)
                    }
                    #(error_line)
                }
            }
            .into_any()
        })
        .collect();

    let (button_fg, button_bg) = if state.is_disabled() {
        (Color::Grey, Color::DarkGrey)
    } else {
        (Color::White, Color::Blue)
    };

    element! {
        View(
            flex_direction: FlexDirection::Column,
            width: input_width,
        ) {
            #(fields)
            View(
                background_color: button_bg,
                justify_content: JustifyContent::Center,
                padding_left: 2,
                padding_right: 2,
            ) {
                Text(content: state.submit_caption(), color: button_fg, weight: Weight::Bold)
            }
        }
    }
}
