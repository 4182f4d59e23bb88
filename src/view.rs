//! Terminal rendering of the catalog and the timer page

use std::fmt::Write;

use crate::{
    catalog::{Catalog, CookingMethod},
    engine::TimerSnapshot,
    state::TimerPhase,
};

const BAR_WIDTH: usize = 24;

/// The method list shown by `egg-timer list`
pub fn render_method_list(methods: &[CookingMethod]) -> String {
    let mut out = String::from("🥚 Egg Timer - Perfect eggs every time!\n\n");
    for method in methods {
        let _ = writeln!(
            out,
            "  {} {:<14} {:<38} ⏱️  {:<13} [{}]",
            method.icon,
            method.name,
            method.summary,
            method.duration_label(),
            method.key
        );
    }
    out.push_str("\nSelect a cooking method to start your timer: egg-timer run <method>");
    out
}

/// Options of a method, marking the selected one
pub fn render_options(method: &CookingMethod, selected: Option<usize>) -> String {
    let mut out = String::from("Cooking Options\n");
    for (index, option) in method.options.iter().enumerate() {
        let marker = if selected == Some(index) { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {}. {:<14} {:>2} minutes  {}",
            marker,
            index + 1,
            option.name,
            option.duration_minutes,
            option.description
        );
    }
    out.pop();
    out
}

pub fn render_tips(method: &CookingMethod) -> String {
    let mut out = String::from("Cooking Tips\n");
    for (index, tip) in method.tips.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, tip);
    }
    out.pop();
    out
}

/// Header, options and tips for `egg-timer show`
pub fn render_method_details(method: &CookingMethod, selected: Option<usize>) -> String {
    format!(
        "{} {}\n{}\n\n{}\n\n{}",
        method.icon,
        method.name,
        method.summary,
        render_options(method, selected),
        render_tips(method)
    )
}

/// Fallback for an unknown method key
pub fn render_not_found(key: &str) -> String {
    let keys: Vec<&str> = Catalog::keys().collect();
    format!("Method not found: {}\nAvailable methods: {}", key, keys.join(", "))
}

pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// One status line for the timer page
pub fn render_status(snapshot: &TimerSnapshot) -> String {
    let phase = match snapshot.phase {
        TimerPhase::Idle => "Ready",
        TimerPhase::Running => "Running",
        TimerPhase::Complete => "Done",
    };
    let mut line = format!(
        "{:<7} {} {} {:>3.0}%  {}  {}",
        phase,
        snapshot.display,
        progress_bar(snapshot.progress, BAR_WIDTH),
        snapshot.progress * 100.0,
        snapshot.option,
        if snapshot.sound_enabled { "🔔" } else { "🔕" },
    );
    if let Some(ready_at) = snapshot.ready_at {
        let _ = write!(line, "  ready at {}", ready_at.format("%H:%M:%S"));
    }
    line
}

pub fn render_complete(option_name: &str) -> String {
    format!(
        "🎉 Your {} is ready!\nTime to enjoy your perfectly cooked egg!",
        option_name.to_lowercase()
    )
}
