//! Application state management for the terminal Pomodoro timer.
//!
//! This module contains the TUI shell state and mode management wrapped
//! around the cycle store.

use chrono::{DateTime, Utc};

use crate::application::store::{CyclesStore, NewCycleData};

/// Represents the current mode of the application.
///
/// The application can be in different modes that determine how user input
/// is interpreted and what UI elements are displayed.
#[derive(Debug)]
pub enum AppMode {
    /// Normal mode - timer view, shortcuts available
    Normal,
    /// New-cycle form is open - user is typing a task and duration
    NewCycle,
    /// Help screen is displayed
    Help,
}

/// Field focus inside the new-cycle form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Task,
    Minutes,
}

/// Main application state containing the cycle store and UI state.
///
/// This structure holds all the data needed to render the terminal UI
/// and manage user interactions with the timer.
pub struct App {
    /// The cycle store (state, persistence, elapsed counter)
    pub store: CyclesStore,
    /// Current application mode
    pub mode: AppMode,
    /// Task label input buffer (new-cycle form)
    pub task_input: String,
    /// Duration-in-minutes input buffer (new-cycle form)
    pub minutes_input: String,
    /// Which form field currently has focus
    pub form_field: FormField,
    /// Cursor position within the focused input buffer
    pub cursor_position: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Scroll offset into the history list
    pub history_scroll: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
}

impl App {
    pub fn new(store: CyclesStore) -> Self {
        Self {
            store,
            mode: AppMode::Normal,
            task_input: String::new(),
            minutes_input: String::new(),
            form_field: FormField::Task,
            cursor_position: 0,
            status_message: None,
            history_scroll: 0,
            help_scroll: 0,
        }
    }

    /// Seconds left on the active cycle's countdown, derived from the target
    /// duration and the latest elapsed count.
    pub fn remaining_seconds(&self) -> u64 {
        match self.store.active_cycle() {
            Some(active) => active
                .total_seconds()
                .saturating_sub(self.store.amount_seconds_passed()),
            None => 0,
        }
    }

    /// Opens the new-cycle form with the conventional 25-minute default.
    pub fn start_new_cycle_form(&mut self) {
        self.mode = AppMode::NewCycle;
        self.task_input.clear();
        self.minutes_input = "25".to_string();
        self.form_field = FormField::Task;
        self.cursor_position = 0;
        self.status_message = None;
    }

    /// Cancels the form and returns to normal mode without starting a cycle.
    pub fn cancel_new_cycle_form(&mut self) {
        self.mode = AppMode::Normal;
        self.task_input.clear();
        self.minutes_input.clear();
        self.form_field = FormField::Task;
        self.cursor_position = 0;
    }

    /// Submits the form and starts a new cycle.
    ///
    /// No validation happens here: a blank task is accepted and minutes that
    /// fail to parse become 0, which produces a cycle that finishes on the
    /// next tick.
    pub fn submit_new_cycle_form(&mut self) {
        let task = self.task_input.clone();
        let minutes_amount = self.minutes_input.trim().parse().unwrap_or(0);

        match self.store.create_new_cycle(NewCycleData {
            task: task.clone(),
            minutes_amount,
        }) {
            Ok(()) => {
                self.status_message = Some(format!("Started '{}' ({} min)", task, minutes_amount));
            }
            Err(error) => {
                self.status_message = Some(format!("Save failed: {}", error));
            }
        }

        self.mode = AppMode::Normal;
        self.task_input.clear();
        self.minutes_input.clear();
        self.form_field = FormField::Task;
        self.cursor_position = 0;
    }

    /// Interrupts the running cycle, if there is one.
    ///
    /// Guarded against a finished cycle still sitting behind the active
    /// pointer: finishing stamps the date without clearing the pointer, and a
    /// finished cycle must not pick up an interruption on top.
    pub fn interrupt_active_cycle(&mut self) {
        let Some(active) = self.store.active_cycle() else {
            return;
        };
        if active.is_terminal() {
            return;
        }
        let task = active.task.clone();

        match self.store.interrupt_current_cycle() {
            Ok(()) => {
                self.status_message = Some(format!("Interrupted '{}'", task));
            }
            Err(error) => {
                self.status_message = Some(format!("Save failed: {}", error));
            }
        }
    }

    /// One tick of the countdown: recomputes elapsed seconds from the wall
    /// clock and finishes the cycle once the target duration has passed.
    ///
    /// Terminal cycles are skipped, so the finish is stamped exactly once
    /// even though the active pointer keeps referring to the cycle afterwards.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        let Some(active) = self.store.active_cycle() else {
            return;
        };
        if active.is_terminal() {
            return;
        }

        let task = active.task.clone();
        let total = active.total_seconds();
        let elapsed = active.elapsed_seconds_at(now);

        if elapsed >= total {
            self.store.set_seconds_passed(total);
            match self.store.mark_current_cycle_as_finished() {
                Ok(()) => {
                    self.status_message = Some(format!("Completed '{}'", task));
                }
                Err(error) => {
                    self.status_message = Some(format!("Save failed: {}", error));
                }
            }
        } else {
            self.store.set_seconds_passed(elapsed);
        }
    }

    /// Switches focus between the form fields, placing the cursor at the end
    /// of the newly focused buffer.
    pub fn switch_form_field(&mut self) {
        self.form_field = match self.form_field {
            FormField::Task => FormField::Minutes,
            FormField::Minutes => FormField::Task,
        };
        self.cursor_position = self.focused_input().len();
    }

    pub fn focused_input(&self) -> &String {
        match self.form_field {
            FormField::Task => &self.task_input,
            FormField::Minutes => &self.minutes_input,
        }
    }

    pub fn focused_input_mut(&mut self) -> &mut String {
        match self.form_field {
            FormField::Task => &mut self.task_input,
            FormField::Minutes => &mut self.minutes_input,
        }
    }

    pub fn scroll_history_up(&mut self) {
        self.history_scroll = self.history_scroll.saturating_sub(1);
    }

    pub fn scroll_history_down(&mut self) {
        if self.history_scroll + 1 < self.store.cycles().len() {
            self.history_scroll += 1;
        }
    }
}
