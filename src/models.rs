//models.rs
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use thiserror::Error;

/// Field-level form checks. Submission is blocked and the message shown
/// inline; no request leaves the client while one of these is raised.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Username is required")]
    UsernameRequired,
    #[error("Username must be at least 3 characters long")]
    UsernameTooShort,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
    #[error("Please select a workout type")]
    WorkoutTypeRequired,
    #[error("Duration must be a positive number")]
    DurationInvalid,
    #[error("Calories must be a positive number")]
    CaloriesInvalid,
    #[error("Target must be a positive number")]
    TargetInvalid,
}

fn parse_positive(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum WorkoutType {
    Running,
    WeightTraining,
    Yoga,
    Cycling,
    Swimming,
}

impl WorkoutType {
    pub const ALL: [WorkoutType; 5] = [
        WorkoutType::Running,
        WorkoutType::WeightTraining,
        WorkoutType::Yoga,
        WorkoutType::Cycling,
        WorkoutType::Swimming,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::WeightTraining => "Weight Training",
            WorkoutType::Yoga => "Yoga",
            WorkoutType::Cycling => "Cycling",
            WorkoutType::Swimming => "Swimming",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Workout {
    pub id: u32,
    pub kind: WorkoutType,
    pub duration_min: u32,
    pub calories: u32,
    pub date: NaiveDate,
}

/// Raw form fields for a workout entry, as typed by the user.
#[derive(Clone, Debug)]
pub struct WorkoutDraft {
    pub kind: Option<WorkoutType>,
    pub duration: String,
    pub calories: String,
    pub date: NaiveDate,
}

impl WorkoutDraft {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            kind: None,
            duration: String::new(),
            calories: String::new(),
            date,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WeeklySummary {
    pub total_workouts: usize,
    pub total_calories: u32,
    pub total_duration: u32,
}

/// Ordered workout history. Ids come from a counter that only moves
/// forward, so deleting entries can never make a later id collide.
#[derive(Debug)]
pub struct WorkoutLog {
    workouts: Vec<Workout>,
    next_id: u32,
}

impl WorkoutLog {
    pub fn new() -> Self {
        Self {
            workouts: Vec::new(),
            next_id: 1,
        }
    }

    /// Sample entries shown before the user has logged anything.
    pub fn seeded(today: NaiveDate) -> Self {
        let mut log = Self::new();
        let samples = [
            (WorkoutType::Running, 30, 300, 1),
            (WorkoutType::WeightTraining, 45, 250, 2),
            (WorkoutType::Yoga, 60, 200, 3),
        ];
        for (kind, duration_min, calories, days_ago) in samples {
            let id = log.next_id;
            log.next_id += 1;
            log.workouts.push(Workout {
                id,
                kind,
                duration_min,
                calories,
                date: today - Duration::days(days_ago),
            });
        }
        log
    }

    pub fn add(&mut self, draft: &WorkoutDraft) -> Result<u32, ValidationError> {
        let kind = draft.kind.ok_or(ValidationError::WorkoutTypeRequired)?;
        let duration_min = parse_positive(&draft.duration).ok_or(ValidationError::DurationInvalid)?;
        let calories = parse_positive(&draft.calories).ok_or(ValidationError::CaloriesInvalid)?;
        let id = self.next_id;
        self.next_id += 1;
        self.workouts.push(Workout {
            id,
            kind,
            duration_min,
            calories,
            date: draft.date,
        });
        Ok(id)
    }

    pub fn remove(&mut self, id: u32) {
        self.workouts.retain(|w| w.id != id);
    }

    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    /// First three entries in insertion order.
    pub fn recent(&self) -> &[Workout] {
        &self.workouts[..self.workouts.len().min(3)]
    }

    /// Totals over entries dated within the last seven days.
    pub fn weekly_summary(&self, today: NaiveDate) -> WeeklySummary {
        let cutoff = today - Duration::days(7);
        let mut summary = WeeklySummary::default();
        for workout in self.workouts.iter().filter(|w| w.date >= cutoff) {
            summary.total_workouts += 1;
            summary.total_calories += workout.calories;
            summary.total_duration += workout.duration_min;
        }
        summary
    }

    /// Minutes per weekday (Mon..Sun) over the same seven-day window,
    /// for the weekly chart.
    pub fn weekday_durations(&self, today: NaiveDate) -> [u32; 7] {
        let cutoff = today - Duration::days(7);
        let mut minutes = [0u32; 7];
        for workout in self.workouts.iter().filter(|w| w.date >= cutoff) {
            minutes[workout.date.weekday().num_days_from_monday() as usize] += workout.duration_min;
        }
        minutes
    }
}

impl Default for WorkoutLog {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GoalType {
    Weight,
    Running,
    Strength,
    Flexibility,
}

impl GoalType {
    pub const ALL: [GoalType; 4] = [
        GoalType::Weight,
        GoalType::Running,
        GoalType::Strength,
        GoalType::Flexibility,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GoalType::Weight => "Weight Loss",
            GoalType::Running => "Running Distance",
            GoalType::Strength => "Strength Training",
            GoalType::Flexibility => "Flexibility",
        }
    }

    /// Short uppercase tag used in goal card headings.
    pub fn tag(self) -> &'static str {
        match self {
            GoalType::Weight => "WEIGHT",
            GoalType::Running => "RUNNING",
            GoalType::Strength => "STRENGTH",
            GoalType::Flexibility => "FLEXIBILITY",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Goal {
    pub id: u32,
    pub kind: GoalType,
    pub target: u32,
    pub current: f64,
    pub deadline: NaiveDate,
    pub completed: bool,
}

impl Goal {
    /// Share of the target covered by the creation-time snapshot,
    /// clamped to 100. Targets are at least 1 by validation.
    pub fn percent(&self) -> f64 {
        (self.current / f64::from(self.target) * 100.0).min(100.0)
    }
}

#[derive(Clone, Debug)]
pub struct GoalDraft {
    pub kind: GoalType,
    pub target: String,
    pub deadline: NaiveDate,
}

impl GoalDraft {
    pub fn new(deadline: NaiveDate) -> Self {
        Self {
            kind: GoalType::Weight,
            target: String::new(),
            deadline,
        }
    }
}

/// Body metrics the user maintains by hand. Overwritten wholesale per
/// field, no bounds checks.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Progress {
    pub weight: f64,
    pub body_fat: f64,
    pub muscle_mass: f64,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            weight: 75.0,
            body_fat: 18.0,
            muscle_mass: 45.0,
        }
    }
}

impl Progress {
    /// Starting value for a new goal. Only weight goals have a matching
    /// metric; everything else starts from zero.
    pub fn snapshot_for(&self, kind: GoalType) -> f64 {
        match kind {
            GoalType::Weight => self.weight,
            _ => 0.0,
        }
    }
}

/// Goals are only ever appended and marked complete, never deleted.
#[derive(Debug)]
pub struct GoalBoard {
    goals: Vec<Goal>,
    next_id: u32,
}

impl GoalBoard {
    pub fn new() -> Self {
        Self {
            goals: Vec::new(),
            next_id: 1,
        }
    }

    /// Sample goals matching the seeded workout history.
    pub fn seeded(today: NaiveDate, progress: &Progress) -> Self {
        let mut board = Self::new();
        board.push(Goal {
            id: 0,
            kind: GoalType::Weight,
            target: 70,
            current: progress.snapshot_for(GoalType::Weight),
            deadline: today + Duration::days(45),
            completed: false,
        });
        board.push(Goal {
            id: 0,
            kind: GoalType::Running,
            target: 5,
            current: 3.0,
            deadline: today + Duration::days(17),
            completed: false,
        });
        board
    }

    fn push(&mut self, mut goal: Goal) {
        goal.id = self.next_id;
        self.next_id += 1;
        self.goals.push(goal);
    }

    /// `current` is a snapshot of the matching progress metric taken now;
    /// later edits to the metric do not touch it.
    pub fn add(&mut self, draft: &GoalDraft, progress: &Progress) -> Result<u32, ValidationError> {
        let target = parse_positive(&draft.target).ok_or(ValidationError::TargetInvalid)?;
        let id = self.next_id;
        self.push(Goal {
            id: 0,
            kind: draft.kind,
            target,
            current: progress.snapshot_for(draft.kind),
            deadline: draft.deadline,
            completed: false,
        });
        Ok(id)
    }

    pub fn complete(&mut self, id: u32) {
        if let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) {
            goal.completed = true;
        }
    }

    pub fn all(&self) -> &[Goal] {
        &self.goals
    }

    pub fn active(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter().filter(|g| !g.completed)
    }

    pub fn finished(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter().filter(|g| g.completed)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }
}

impl Default for GoalBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(kind: WorkoutType, duration: &str, calories: &str, date: NaiveDate) -> WorkoutDraft {
        WorkoutDraft {
            kind: Some(kind),
            duration: duration.to_string(),
            calories: calories.to_string(),
            date,
        }
    }

    #[test]
    fn weekly_summary_counts_only_last_seven_days() {
        let mut log = WorkoutLog::new();
        log.add(&draft(WorkoutType::Running, "30", "300", date(2024, 1, 15)))
            .unwrap();
        log.add(&draft(WorkoutType::Yoga, "10", "5", date(2020, 1, 1)))
            .unwrap();

        let summary = log.weekly_summary(date(2024, 1, 16));
        assert_eq!(
            summary,
            WeeklySummary {
                total_workouts: 1,
                total_calories: 300,
                total_duration: 30,
            }
        );
    }

    #[test]
    fn remove_is_idempotent() {
        let mut log = WorkoutLog::new();
        let id = log
            .add(&draft(WorkoutType::Cycling, "20", "150", date(2024, 1, 10)))
            .unwrap();
        log.remove(id);
        assert!(log.all().is_empty());
        log.remove(id);
        assert!(log.all().is_empty());
    }

    #[test]
    fn ids_survive_deletions_without_colliding() {
        let mut log = WorkoutLog::new();
        let first = log
            .add(&draft(WorkoutType::Running, "30", "300", date(2024, 1, 10)))
            .unwrap();
        let second = log
            .add(&draft(WorkoutType::Yoga, "40", "100", date(2024, 1, 11)))
            .unwrap();
        log.remove(second);
        let third = log
            .add(&draft(WorkoutType::Swimming, "25", "200", date(2024, 1, 12)))
            .unwrap();
        assert_ne!(third, first);
        assert_ne!(third, second);
    }

    #[test]
    fn recent_is_first_three_in_insertion_order() {
        let today = date(2024, 1, 15);
        let mut log = WorkoutLog::new();
        for (i, kind) in [
            WorkoutType::Running,
            WorkoutType::Yoga,
            WorkoutType::Cycling,
            WorkoutType::Swimming,
        ]
        .into_iter()
        .enumerate()
        {
            log.add(&draft(kind, "30", "100", today - Duration::days(i as i64)))
                .unwrap();
        }
        let recent: Vec<WorkoutType> = log.recent().iter().map(|w| w.kind).collect();
        assert_eq!(
            recent,
            vec![WorkoutType::Running, WorkoutType::Yoga, WorkoutType::Cycling]
        );
    }

    #[test]
    fn workout_draft_rejects_missing_type_and_bad_numbers() {
        let mut log = WorkoutLog::new();
        let today = date(2024, 1, 15);

        let mut missing_type = draft(WorkoutType::Running, "30", "300", today);
        missing_type.kind = None;
        assert_eq!(
            log.add(&missing_type),
            Err(ValidationError::WorkoutTypeRequired)
        );

        assert_eq!(
            log.add(&draft(WorkoutType::Running, "0", "300", today)),
            Err(ValidationError::DurationInvalid)
        );
        assert_eq!(
            log.add(&draft(WorkoutType::Running, "30", "abc", today)),
            Err(ValidationError::CaloriesInvalid)
        );
        assert!(log.all().is_empty());
    }

    #[test]
    fn complete_is_monotonic_and_idempotent() {
        let mut board = GoalBoard::new();
        let progress = Progress::default();
        let id = board
            .add(
                &GoalDraft {
                    kind: GoalType::Weight,
                    target: "70".to_string(),
                    deadline: date(2024, 3, 1),
                },
                &progress,
            )
            .unwrap();
        board.complete(id);
        assert!(board.all()[0].completed);
        board.complete(id);
        assert!(board.all()[0].completed);
        // Unknown ids are a no-op.
        board.complete(999);
        assert_eq!(board.all().len(), 1);
    }

    #[test]
    fn goal_snapshot_is_fixed_at_creation() {
        let mut board = GoalBoard::new();
        let mut progress = Progress::default();
        assert_eq!(progress.weight, 75.0);
        board
            .add(
                &GoalDraft {
                    kind: GoalType::Weight,
                    target: "70".to_string(),
                    deadline: date(2024, 3, 1),
                },
                &progress,
            )
            .unwrap();
        progress.weight = 70.0;
        assert_eq!(board.all()[0].current, 75.0);
    }

    #[test]
    fn goal_snapshot_falls_back_to_zero_without_matching_metric() {
        let mut board = GoalBoard::new();
        let progress = Progress::default();
        board
            .add(
                &GoalDraft {
                    kind: GoalType::Strength,
                    target: "100".to_string(),
                    deadline: date(2024, 3, 1),
                },
                &progress,
            )
            .unwrap();
        assert_eq!(board.all()[0].current, 0.0);
    }

    #[test]
    fn goal_target_must_be_positive() {
        let mut board = GoalBoard::new();
        let progress = Progress::default();
        let zero = GoalDraft {
            kind: GoalType::Weight,
            target: "0".to_string(),
            deadline: date(2024, 3, 1),
        };
        assert_eq!(
            board.add(&zero, &progress),
            Err(ValidationError::TargetInvalid)
        );
        assert!(board.all().is_empty());
    }

    #[test]
    fn percent_clamps_at_one_hundred() {
        let goal = Goal {
            id: 1,
            kind: GoalType::Weight,
            target: 50,
            current: 75.0,
            deadline: date(2024, 3, 1),
            completed: false,
        };
        assert_eq!(goal.percent(), 100.0);

        let partial = Goal {
            current: 3.0,
            target: 5,
            ..goal
        };
        assert_eq!(partial.percent(), 60.0);
    }

    #[test]
    fn weekday_durations_bucket_by_weekday() {
        let mut log = WorkoutLog::new();
        // 2024-01-15 is a Monday.
        let monday = date(2024, 1, 15);
        log.add(&draft(WorkoutType::Running, "30", "300", monday))
            .unwrap();
        log.add(&draft(WorkoutType::Yoga, "15", "80", monday)).unwrap();
        log.add(&draft(WorkoutType::Cycling, "20", "150", date(2024, 1, 14)))
            .unwrap();

        let minutes = log.weekday_durations(monday);
        assert_eq!(minutes[0], 45); // Monday
        assert_eq!(minutes[6], 20); // Sunday
    }
}
