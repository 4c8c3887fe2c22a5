//! Plain-text rendering of form views and catalog listings.

use crate::app::commands::modes::ModeSummary;
use crate::domain::FormView;

pub fn render_view(view: &FormView) -> String {
    let mut out = String::new();
    out.push_str(&format!("Mode: {} ({})\n", view.mode_title, view.mode));
    out.push_str(&format!(
        "Step {}/{}: {} [{}]\n",
        view.step, view.total_steps, view.step_title, view.step_type
    ));

    for field in &view.fields {
        out.push_str(&format!("\n{} ({})\n", field.label, field.id));
        if field.value.is_empty() {
            out.push_str("  (empty)\n");
        } else {
            for line in field.value.lines() {
                out.push_str(&format!("  {}\n", line));
            }
        }
    }

    if !view.actions.is_empty() {
        out.push_str("\nActions:\n");
        for action in &view.actions {
            let marker = if action.enabled { "enabled" } else { "disabled" };
            out.push_str(&format!("  [{}] {}: {}\n", marker, action.id, action.label));
        }
    }

    let mut navigation = Vec::new();
    if view.can_go_previous {
        navigation.push("prev");
    }
    if view.can_go_next {
        navigation.push("next");
    }
    if !navigation.is_empty() {
        out.push_str(&format!("\nNavigation: {}\n", navigation.join(", ")));
    }
    out
}

pub fn render_modes(modes: &[ModeSummary]) -> String {
    let mut out = String::new();
    for mode in modes {
        out.push_str(&format!("{}  {}\n", mode.id, mode.title));
        for step in &mode.steps {
            out.push_str(&format!("  {}. {}  {}\n", step.number, step.step_type, step.title));
            if !step.fields.is_empty() {
                let fields: Vec<&str> = step.fields.iter().map(|f| f.as_str()).collect();
                out.push_str(&format!("     fields: {}\n", fields.join(", ")));
            }
            for action in &step.actions {
                let note = if action.has_template { "" } else { " (no template)" };
                out.push_str(&format!("     action: {}{}\n", action.id, note));
            }
        }
    }
    out
}
