use reminders_core::ItemsState;
use std::fmt::Write;

/// Renders the item list as plain text, followed by the error banner if any.
pub fn render(state: &ItemsState) -> String {
    let mut out = String::new();

    if state.items.is_empty() {
        out.push_str("No items yet.\n");
    }
    for item in &state.items {
        let mark = if item.completed { 'x' } else { ' ' };
        let _ = writeln!(out, "[{}] {:>4}  {}", mark, item.id, item.text);
    }

    if let Some(error) = &state.error {
        let _ = writeln!(out, "error: {}", error);
    }

    out
}
