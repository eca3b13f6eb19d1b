//! Text rendering of progress for the terminal.

use std::fmt::Write;

use ninex_core::{
    catalog, Experiment, ExperimentId, ExperimentSlot, ExperimentStatus, ProgressState,
    DAYS_PER_EXPERIMENT, EXPERIMENT_COUNT,
};
use ninex_progress::Celebration;

fn status_label(status: ExperimentStatus) -> &'static str {
    match status {
        ExperimentStatus::Locked => "LOCKED",
        ExperimentStatus::Available => "AVAILABLE",
        ExperimentStatus::InProgress => "IN PROGRESS",
        ExperimentStatus::Completed => "COMPLETED",
    }
}

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0)) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn day_marks(slot: &ExperimentSlot) -> String {
    (1..=DAYS_PER_EXPERIMENT as u32)
        .map(|d| if slot.has_completed_day(d) { "x" } else { "." })
        .collect()
}

/// Overall progress, one line per experiment, then the reward state.
pub fn overview(state: &ProgressState) -> String {
    let mut out = String::new();
    let pct = state.completion_percentage();

    let _ = writeln!(out, "The 9 Experiments");
    let _ = writeln!(
        out,
        "  {} {}% ({}/{} completed)",
        progress_bar(f64::from(pct) / 100.0, 20),
        pct,
        state.total_completed,
        EXPERIMENT_COUNT
    );
    if state.current_streak > 0 {
        let _ = writeln!(out, "  {} day streak", state.current_streak);
    }
    let _ = writeln!(out);

    for slot in &state.experiments {
        let title = catalog::experiment(slot.experiment_id)
            .map(|e| e.title)
            .unwrap_or("?");
        let _ = writeln!(
            out,
            "  {} {:<22} {:<12} {}",
            slot.experiment_id,
            title,
            status_label(slot.status),
            day_marks(slot)
        );
    }
    let _ = writeln!(out);

    if state.reward_unlocked {
        let _ = writeln!(out, "Congratulations! You've unlocked all transformation rewards:");
        for reward in catalog::rewards() {
            let _ = writeln!(out, "  * {} - {}", reward.title, reward.description);
        }
    } else {
        let remaining = EXPERIMENT_COUNT as u32 - state.total_completed.min(EXPERIMENT_COUNT as u32);
        let _ = writeln!(out, "{} more experiments to unlock rewards", remaining);
    }
    out
}

/// Catalog listing with the status of each experiment.
pub fn experiment_list(state: &ProgressState) -> String {
    let mut out = String::new();
    for experiment in catalog::experiments() {
        let status = state
            .slot(experiment.id)
            .map(|s| status_label(s.status))
            .unwrap_or("UNKNOWN");
        let _ = writeln!(
            out,
            "{} | {:<11} | {:<9} | {:<11} | {}",
            experiment.id, status, experiment.days_range, experiment.category, experiment.title
        );
    }
    out
}

/// Full description of one experiment and its recorded progress.
pub fn experiment_detail(experiment: &Experiment, slot: Option<&ExperimentSlot>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Experiment {}: {}", experiment.id, experiment.title);
    let _ = writeln!(out, "  {}", experiment.description);
    let _ = writeln!(
        out,
        "  {} | {} | {} | {}",
        experiment.category, experiment.duration, experiment.days_range, experiment.estimated_time
    );
    let _ = writeln!(out, "  Instructions:");
    for (i, step) in experiment.instructions.iter().enumerate() {
        let _ = writeln!(out, "    {}. {}", i + 1, step);
    }

    let Some(slot) = slot else {
        return out;
    };
    let _ = writeln!(out, "  Status: {}", status_label(slot.status));
    if slot.status == ExperimentStatus::InProgress {
        let next = slot.next_day().map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "  Progress: {} Day {} of {}",
            progress_bar(slot.progress_fraction(), 12),
            next,
            DAYS_PER_EXPERIMENT
        );
    }
    let _ = writeln!(out, "  Days: {}", day_marks(slot));
    if let Some(started) = slot.started_at {
        let _ = writeln!(out, "  Started: {}", started.format("%Y-%m-%d %H:%M"));
    }
    if let Some(completed) = slot.completed_at {
        let _ = writeln!(out, "  Completed: {}", completed.format("%Y-%m-%d %H:%M"));
    }
    if let Some(notes) = slot.notes.as_ref().filter(|n| !n.is_empty()) {
        let _ = writeln!(out, "  Notes:");
        for (day, text) in notes {
            let _ = writeln!(out, "    Day {}: {}", day, text);
        }
    }
    out
}

/// Outcome line for `start`.
pub fn start_result(before: &ProgressState, after: &ProgressState, id: ExperimentId) -> String {
    match (before.slot(id), after.slot(id)) {
        (Some(b), Some(a)) if b.status != a.status => {
            format!("Started experiment {}\n", id)
        }
        (Some(b), Some(_)) => {
            format!("Experiment {} is {}; nothing to start\n", id, status_label(b.status))
        }
        _ => format!("No experiment with ID {}\n", id),
    }
}

/// Outcome line for `complete`.
pub fn day_result(before: &ProgressState, after: &ProgressState, id: ExperimentId, day: u32) -> String {
    let (Some(b), Some(a)) = (before.slot(id), after.slot(id)) else {
        return format!("No experiment with ID {}\n", id);
    };
    if b.completed_days == a.completed_days {
        if a.has_completed_day(day) {
            format!("Day {} of experiment {} was already done\n", day, id)
        } else {
            format!("Day {} was not recorded (days run 1-{})\n", day, DAYS_PER_EXPERIMENT)
        }
    } else {
        format!(
            "Marked day {} of experiment {} done ({}/{})\n",
            day,
            id,
            a.completed_days.len(),
            DAYS_PER_EXPERIMENT
        )
    }
}

/// Message printed when an experiment has just been completed.
pub fn celebration(c: &Celebration) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "Experiment complete: {}!", c.title);
    let _ = writeln!(
        out,
        "  {}/{} experiments done ({}%)",
        c.total_completed, EXPERIMENT_COUNT, c.percentage
    );
    if c.reward_unlocked {
        let _ = writeln!(out, "  All nine finished. Your rewards are unlocked:");
        for reward in catalog::rewards() {
            let _ = writeln!(out, "    * {}", reward.title);
        }
    }
    out
}
