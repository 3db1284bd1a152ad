use super::availability::is_free;
use super::types::{BadLabelPolicy, PlanError};
use super::Planner;
use crate::calendar;
use crate::model::{AssignmentRecord, Coverage, Roster, ShiftSpec, Student, StudentId};
use crate::parse::{self, ShiftWindow};
use std::collections::HashSet;
use std::fmt;

/// Stratégie du second passage : ordonne les candidats hors liste des
/// titulaires. Permet de brancher un autre solveur sans toucher au moteur.
pub trait FallbackStrategy: fmt::Debug {
    fn rank<'a>(
        &self,
        pool: Vec<&'a Student>,
        state: &super::AssignmentState,
    ) -> Vec<&'a Student>;
}

/// Les moins chargés d'abord ; à charge égale, ordre du trombinoscope.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeastLoaded;

impl FallbackStrategy for LeastLoaded {
    fn rank<'a>(
        &self,
        mut pool: Vec<&'a Student>,
        state: &super::AssignmentState,
    ) -> Vec<&'a Student> {
        // Tri stable : l'ordre d'entrée départage les ex aequo.
        pool.sort_by_key(|student| state.load_of(&student.id));
        pool
    }
}

pub(super) fn arrange_month(
    planner: &mut Planner,
    roster: &Roster,
    year: i32,
    month: u32,
) -> Result<Vec<AssignmentRecord>, PlanError> {
    let days = calendar::month_days(year, month)?;
    planner.state.register_students(roster.students.iter());

    let mut warned: HashSet<&str> = HashSet::new();
    let mut records = Vec::new();

    for day in &days {
        for shift in &roster.shifts {
            let window = match parse::parse_shift(&shift.label) {
                Ok(window) => window,
                Err(err) => match planner.options.bad_labels {
                    BadLabelPolicy::Fail => return Err(err.into()),
                    BadLabelPolicy::Skip => {
                        if warned.insert(shift.label.as_str()) {
                            tracing::warn!(label = %shift.label, error = %err, "skipping unreadable shift label");
                        }
                        continue;
                    }
                },
            };
            if window.weekday != day.weekday {
                continue;
            }

            let assigned = fill_shift(planner, roster, shift, &window);
            records.push(AssignmentRecord {
                date: day.date,
                weekday: day.weekday,
                label: shift.label.clone(),
                category: shift.category,
                assigned: Coverage::from_names(assigned),
            });
        }
    }

    Ok(records)
}

/// Remplit un créneau daté : d'abord les titulaires dans l'ordre mémorisé,
/// puis un recrutement hors liste. Chaque recrue rejoint la liste des
/// titulaires du créneau ; la liste ne rétrécit jamais.
fn fill_shift(
    planner: &mut Planner,
    roster: &Roster,
    shift: &ShiftSpec,
    window: &ShiftWindow,
) -> Vec<String> {
    let required = shift.required as usize;
    let mut names: Vec<String> = Vec::new();
    let mut taken: Vec<StudentId> = Vec::new();

    let preferred: Vec<StudentId> = planner
        .state
        .preferred(shift.category)
        .get(&shift.label)
        .cloned()
        .unwrap_or_default();

    for id in &preferred {
        if names.len() == required {
            break;
        }
        let Some(student) = roster.find_student_by_id(id) else {
            continue;
        };
        if taken.contains(id) {
            continue;
        }
        if is_free(roster.busy_for(id), window.weekday, window.start, window.end) {
            names.push(student.name.clone());
            taken.push(id.clone());
            planner.state.bump_load(id);
        }
    }

    if names.len() < required {
        let pool: Vec<&Student> = roster
            .students
            .iter()
            .filter(|student| !preferred.contains(&student.id))
            .collect();

        for student in planner.strategy.rank(pool, &planner.state) {
            if names.len() == required {
                break;
            }
            if taken.contains(&student.id) {
                continue;
            }
            if !is_free(
                roster.busy_for(&student.id),
                window.weekday,
                window.start,
                window.end,
            ) {
                continue;
            }
            names.push(student.name.clone());
            taken.push(student.id.clone());
            planner.state.bump_load(&student.id);

            let slot = planner
                .state
                .preferred_mut(shift.category)
                .entry(shift.label.clone())
                .or_default();
            if !slot.contains(&student.id) {
                slot.push(student.id.clone());
            }
        }
    }

    names
}
