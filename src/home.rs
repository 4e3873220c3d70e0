//home.rs
use chrono::NaiveDate;
use eframe::egui::{self, Color32, Context, ProgressBar, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::models::{
    GoalBoard, GoalDraft, GoalType, Progress, WorkoutDraft, WorkoutLog, WorkoutType,
};
use crate::session::Session;

#[derive(Clone, Copy, PartialEq, Eq)]
enum HomeTab {
    Dashboard,
    Workouts,
    Goals,
    Progress,
}

pub enum HomeAction {
    Logout,
}

/// Authenticated dashboard. Owns all domain state for the signed-in
/// user; everything here lives in memory only and dies with the screen.
pub struct HomeView {
    tab: HomeTab,
    workouts: WorkoutLog,
    goals: GoalBoard,
    progress: Progress,
    workout_draft: WorkoutDraft,
    goal_draft: GoalDraft,
    workout_error: Option<String>,
    goal_error: Option<String>,
    weight_input: String,
    body_fat_input: String,
    muscle_mass_input: String,
}

impl HomeView {
    pub fn new(today: NaiveDate) -> Self {
        let progress = Progress::default();
        Self {
            tab: HomeTab::Dashboard,
            workouts: WorkoutLog::seeded(today),
            goals: GoalBoard::seeded(today, &progress),
            progress,
            workout_draft: WorkoutDraft::new(today),
            goal_draft: GoalDraft::new(today),
            workout_error: None,
            goal_error: None,
            weight_input: String::new(),
            body_fat_input: String::new(),
            muscle_mass_input: String::new(),
        }
    }

    pub fn show(&mut self, ctx: &Context, session: &Session, today: NaiveDate) -> Option<HomeAction> {
        let mut action = None;

        egui::TopBottomPanel::top("home_header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("FitTrack").heading().strong());
                ui.separator();
                for (tab, label) in [
                    (HomeTab::Dashboard, "Dashboard"),
                    (HomeTab::Workouts, "Workouts"),
                    (HomeTab::Goals, "Goals"),
                    (HomeTab::Progress, "Progress"),
                ] {
                    if ui.selectable_label(self.tab == tab, label).clicked() {
                        self.tab = tab;
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.menu_button(format!("Welcome, {}!", session.username), |ui| {
                        if ui.button("Logout").clicked() {
                            action = Some(HomeAction::Logout);
                            ui.close_menu();
                        }
                    });
                });
            });
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| match self.tab {
                HomeTab::Dashboard => self.show_dashboard(ui, today),
                HomeTab::Workouts => self.show_workouts(ui, today),
                HomeTab::Goals => self.show_goals(ui, today),
                HomeTab::Progress => self.show_progress(ui, today),
            });
        });

        action
    }

    fn show_dashboard(&mut self, ui: &mut Ui, today: NaiveDate) {
        ui.label(RichText::new("Dashboard").heading().strong());
        ui.add_space(10.0);

        let summary = self.workouts.weekly_summary(today);
        ui.columns(4, |columns| {
            let stats = [
                ("Calories Burned", summary.total_calories.to_string(), "This Week"),
                ("Workout Time", format!("{}m", summary.total_duration), "This Week"),
                ("Workouts", summary.total_workouts.to_string(), "This Week"),
                ("Active Goals", self.goals.active_count().to_string(), "In Progress"),
            ];
            for (column, (title, value, caption)) in columns.iter_mut().zip(stats) {
                column.group(|ui| {
                    ui.with_layout(egui::Layout::top_down(egui::Align::Center), |ui| {
                        ui.label(RichText::new(title).strong());
                        ui.label(RichText::new(value).size(28.0).strong());
                        ui.label(RichText::new(caption).weak());
                    });
                });
            }
        });

        ui.add_space(16.0);
        let mut to_complete = None;
        ui.columns(2, |columns| {
            let left = &mut columns[0];
            left.label(RichText::new("Recent Workouts").strong().size(20.0));
            left.add_space(6.0);
            for workout in self.workouts.recent() {
                left.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(workout.kind.label()).strong());
                        ui.label(format!("{} min", workout.duration_min));
                        ui.label(format!("{} cal", workout.calories));
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.label(RichText::new(workout.date.to_string()).weak());
                            },
                        );
                    });
                });
            }

            let right = &mut columns[1];
            right.label(RichText::new("Current Goals").strong().size(20.0));
            right.add_space(6.0);
            for goal in self.goals.active().take(3) {
                right.group(|ui| {
                    ui.label(RichText::new(format!("{} Goal", goal.kind.tag())).strong());
                    ui.label(format!("Target: {}", goal.target));
                    ui.add(
                        ProgressBar::new((goal.percent() / 100.0) as f32)
                            .text(format!("{:.0}%", goal.percent())),
                    );
                    if ui.button("Complete").clicked() {
                        to_complete = Some(goal.id);
                    }
                });
            }
        });
        if let Some(id) = to_complete {
            self.goals.complete(id);
        }
    }

    fn show_workouts(&mut self, ui: &mut Ui, today: NaiveDate) {
        ui.label(RichText::new("Workout History").heading().strong());
        ui.add_space(10.0);

        let mut to_delete = None;
        for workout in self.workouts.all() {
            ui.group(|ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(workout.kind.label()).strong().size(18.0));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Delete").clicked() {
                            to_delete = Some(workout.id);
                        }
                    });
                });
                ui.horizontal(|ui| {
                    ui.label(format!("{} min", workout.duration_min));
                    ui.label(format!("{} cal", workout.calories));
                    ui.label(RichText::new(workout.date.to_string()).weak());
                });
            });
        }
        if self.workouts.all().is_empty() {
            ui.label(RichText::new("No workouts logged yet.").weak());
        }
        if let Some(id) = to_delete {
            self.workouts.remove(id);
        }

        ui.add_space(16.0);
        ui.separator();
        ui.add_space(8.0);
        ui.label(RichText::new("Add New Workout").strong().size(20.0));
        if let Some(error) = &self.workout_error {
            ui.colored_label(Color32::LIGHT_RED, error);
        }
        ui.add_space(6.0);
        egui::Grid::new("workout_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Workout Type");
                egui::ComboBox::from_id_source("workout_type")
                    .selected_text(
                        self.workout_draft
                            .kind
                            .map(WorkoutType::label)
                            .unwrap_or("Select Type"),
                    )
                    .show_ui(ui, |ui| {
                        for kind in WorkoutType::ALL {
                            ui.selectable_value(
                                &mut self.workout_draft.kind,
                                Some(kind),
                                kind.label(),
                            );
                        }
                    });
                ui.end_row();
                ui.label("Duration (minutes)");
                ui.text_edit_singleline(&mut self.workout_draft.duration);
                ui.end_row();
                ui.label("Calories Burned");
                ui.text_edit_singleline(&mut self.workout_draft.calories);
                ui.end_row();
                ui.label("Date");
                ui.add(DatePickerButton::new(&mut self.workout_draft.date).id_source("workout_date"));
                ui.end_row();
            });
        ui.add_space(8.0);
        if ui.button("Add Workout").clicked() {
            match self.workouts.add(&self.workout_draft) {
                Ok(_) => {
                    self.workout_draft = WorkoutDraft::new(today);
                    self.workout_error = None;
                }
                Err(e) => self.workout_error = Some(e.to_string()),
            }
        }
    }

    fn show_goals(&mut self, ui: &mut Ui, today: NaiveDate) {
        ui.label(RichText::new("Fitness Goals").heading().strong());
        ui.add_space(10.0);

        ui.label(RichText::new("Active Goals").strong().size(20.0));
        ui.add_space(6.0);
        let mut to_complete = None;
        let mut any_active = false;
        for goal in self.goals.active() {
            any_active = true;
            ui.group(|ui| {
                ui.label(RichText::new(format!("{} Goal", goal.kind.tag())).strong());
                ui.label(format!("Target: {} | Current: {}", goal.target, goal.current));
                ui.add(
                    ProgressBar::new((goal.percent() / 100.0) as f32)
                        .text(format!("{:.0}% Complete", goal.percent())),
                );
                ui.horizontal(|ui| {
                    if ui.button("Mark Complete").clicked() {
                        to_complete = Some(goal.id);
                    }
                    ui.label(RichText::new(format!("Due: {}", goal.deadline)).weak());
                });
            });
        }
        if !any_active {
            ui.label(RichText::new("No active goals.").weak());
        }
        if let Some(id) = to_complete {
            self.goals.complete(id);
        }

        ui.add_space(12.0);
        ui.label(RichText::new("Completed Goals").strong().size(20.0));
        ui.add_space(6.0);
        let mut any_finished = false;
        for goal in self.goals.finished() {
            any_finished = true;
            ui.group(|ui| {
                ui.label(RichText::new(format!("{} Goal ✓", goal.kind.tag())).strong());
                ui.label(format!("Target: {} achieved!", goal.target));
                ui.add(ProgressBar::new(1.0));
            });
        }
        if !any_finished {
            ui.label(RichText::new("Nothing completed yet.").weak());
        }

        ui.add_space(16.0);
        ui.separator();
        ui.add_space(8.0);
        ui.label(RichText::new("Set New Goal").strong().size(20.0));
        if let Some(error) = &self.goal_error {
            ui.colored_label(Color32::LIGHT_RED, error);
        }
        ui.add_space(6.0);
        egui::Grid::new("goal_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Goal Type");
                egui::ComboBox::from_id_source("goal_type")
                    .selected_text(self.goal_draft.kind.label())
                    .show_ui(ui, |ui| {
                        for kind in GoalType::ALL {
                            ui.selectable_value(&mut self.goal_draft.kind, kind, kind.label());
                        }
                    });
                ui.end_row();
                ui.label("Target Value");
                ui.add(
                    egui::TextEdit::singleline(&mut self.goal_draft.target)
                        .hint_text("e.g., 70 for weight, 5 for running distance"),
                );
                ui.end_row();
                ui.label("Deadline");
                ui.add(DatePickerButton::new(&mut self.goal_draft.deadline).id_source("goal_deadline"));
                ui.end_row();
            });
        ui.add_space(8.0);
        if ui.button("Set Goal").clicked() {
            match self.goals.add(&self.goal_draft, &self.progress) {
                Ok(_) => {
                    self.goal_draft = GoalDraft::new(today);
                    self.goal_error = None;
                }
                Err(e) => self.goal_error = Some(e.to_string()),
            }
        }
    }

    fn show_progress(&mut self, ui: &mut Ui, today: NaiveDate) {
        ui.label(RichText::new("Progress Tracking").heading().strong());
        ui.add_space(10.0);

        ui.columns(3, |columns| {
            metric_card(
                &mut columns[0],
                "Weight",
                "kg",
                "Enter current weight",
                &mut self.progress.weight,
                &mut self.weight_input,
            );
            metric_card(
                &mut columns[1],
                "Body Fat",
                "%",
                "Enter body fat %",
                &mut self.progress.body_fat,
                &mut self.body_fat_input,
            );
            metric_card(
                &mut columns[2],
                "Muscle Mass",
                "kg",
                "Enter muscle mass",
                &mut self.progress.muscle_mass,
                &mut self.muscle_mass_input,
            );
        });

        ui.add_space(16.0);
        ui.label(RichText::new("Weekly Workout Summary").strong().size(20.0));
        ui.add_space(6.0);
        let minutes = self.workouts.weekday_durations(today);
        let max = minutes.iter().copied().max().unwrap_or(0).max(1);
        for (label, value) in ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
            .iter()
            .zip(minutes)
        {
            ui.horizontal(|ui| {
                ui.label(RichText::new(*label).monospace());
                ui.add(ProgressBar::new(value as f32 / max as f32).text(format!("{value} min")));
            });
        }
    }
}

/// One body-metric card: current value plus an input that overwrites it.
/// No bounds checks; whatever parses as a number wins.
fn metric_card(
    ui: &mut Ui,
    title: &str,
    unit: &str,
    hint: &str,
    value: &mut f64,
    input: &mut String,
) {
    ui.group(|ui| {
        ui.with_layout(egui::Layout::top_down(egui::Align::Center), |ui| {
            ui.label(RichText::new(title).strong());
            ui.label(
                RichText::new(format!("{:.1} {unit}", value))
                    .size(26.0)
                    .strong(),
            );
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(input)
                        .hint_text(hint)
                        .desired_width(140.0),
                );
                if ui.button("Update").clicked() {
                    if let Ok(parsed) = input.trim().parse::<f64>() {
                        *value = parsed;
                        input.clear();
                    }
                }
            });
        });
    });
}
