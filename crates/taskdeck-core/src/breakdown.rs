//! Simulated AI task breakdown.
//!
//! No model is called. After a fixed delay the simulator returns the same
//! five-step plan for any description; only the presence of a description
//! is checked.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dice::Candidate;
use crate::error::ValidationError;
use crate::notice::Notice;
use crate::task::Priority;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownStep {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub estimated_time: String,
    pub priority: Priority,
}

impl Candidate for BreakdownStep {
    fn candidate_id(&self) -> &str {
        &self.id
    }

    fn candidate_label(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub task: String,
    pub steps: Vec<BreakdownStep>,
}

impl Breakdown {
    /// Build the plan for `task` without waiting.
    ///
    /// # Errors
    ///
    /// `MissingField("task")` when the description is blank.
    pub fn plan(task: &str) -> Result<Self, ValidationError> {
        let task = task.trim();
        if task.is_empty() {
            return Err(ValidationError::MissingField("task".into()));
        }
        Ok(Self {
            task: task.to_string(),
            steps: mock_steps(),
        })
    }

    /// Flip a step's completed flag. Returns the new value.
    pub fn toggle_step(&mut self, id: &str) -> Result<bool, ValidationError> {
        let step = self
            .steps
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ValidationError::not_found("step", id))?;
        step.completed = !step.completed;
        Ok(step.completed)
    }

    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }

    /// Share of completed steps, 0.0 ..= 100.0. Zero for an empty plan.
    pub fn progress_pct(&self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        self.completed_count() as f64 / self.steps.len() as f64 * 100.0
    }

    /// Steps not yet done, for the dice roller.
    pub fn open_steps(&self) -> Vec<BreakdownStep> {
        self.steps.iter().filter(|s| !s.completed).cloned().collect()
    }

    /// Confirmation shown when a step is put on the calendar.
    pub fn schedule_step(&self, id: &str) -> Result<Notice, ValidationError> {
        let step = self
            .steps
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ValidationError::not_found("step", id))?;
        Ok(Notice::info(
            "Added to calendar",
            format!("\"{}\" has been scheduled.", step.title),
        ))
    }

    pub fn generated_notice(&self) -> Notice {
        Notice::info(
            "Task breakdown generated!",
            format!("Created {} actionable steps for your task.", self.steps.len()),
        )
    }
}

/// Produces breakdowns after a simulated processing delay.
#[derive(Debug, Clone, Copy)]
pub struct BreakdownSimulator {
    delay: Duration,
}

impl Default for BreakdownSimulator {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(2000),
        }
    }
}

impl BreakdownSimulator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Validate, wait out the delay, then return the plan.
    ///
    /// Blank descriptions fail immediately without waiting.
    pub async fn generate(&self, task: &str) -> Result<Breakdown, ValidationError> {
        let breakdown = Breakdown::plan(task)?;
        tokio::time::sleep(self.delay).await;
        info!(steps = breakdown.steps.len(), "breakdown generated");
        Ok(breakdown)
    }
}

fn step(id: &str, title: &str, description: &str, estimated_time: &str, priority: Priority) -> BreakdownStep {
    BreakdownStep {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        completed: false,
        estimated_time: estimated_time.into(),
        priority,
    }
}

fn mock_steps() -> Vec<BreakdownStep> {
    vec![
        step(
            "1",
            "Research and Planning",
            "Gather requirements, research best practices, and create a detailed plan",
            "2-3 hours",
            Priority::High,
        ),
        step(
            "2",
            "Setup and Configuration",
            "Set up necessary tools, environments, and initial configurations",
            "1 hour",
            Priority::Medium,
        ),
        step(
            "3",
            "Core Implementation",
            "Implement the main functionality and core features",
            "4-6 hours",
            Priority::High,
        ),
        step(
            "4",
            "Testing and Validation",
            "Test the implementation thoroughly and validate against requirements",
            "1-2 hours",
            Priority::Medium,
        ),
        step(
            "5",
            "Documentation and Cleanup",
            "Document the work done and clean up any temporary files or code",
            "30 minutes",
            Priority::Low,
        ),
    ]
}
