#![forbid(unsafe_code)]
use chrono::{NaiveTime, Weekday};
use permanence::{
    arrange_month, is_free, parse_shift, sort_shifts, ArrangeOptions, BadLabelPolicy,
    BusyInterval, Category, Coverage, LabelError, PlanError, Planner, Roster, ShiftSpec, Student,
    StudentId,
};
use std::collections::HashMap;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn roster(students: Vec<Student>, shifts: Vec<ShiftSpec>) -> Roster {
    Roster {
        students,
        shifts,
        busy: HashMap::new(),
    }
}

#[test]
fn availability_half_open_semantics() {
    let busy = vec![BusyInterval::new(Weekday::Mon, t(9, 0), t(10, 0)).unwrap()];

    // adjacent, avant et après : libre
    assert!(is_free(&busy, Weekday::Mon, t(8, 0), t(9, 0)));
    assert!(is_free(&busy, Weekday::Mon, t(10, 0), t(11, 0)));
    // chevauchement partiel : occupé
    assert!(!is_free(&busy, Weekday::Mon, t(9, 30), t(10, 30)));
    // autre jour : libre
    assert!(is_free(&busy, Weekday::Tue, t(9, 0), t(10, 0)));
    // aucun cours : libre
    assert!(is_free(&[], Weekday::Mon, t(9, 0), t(10, 0)));
}

#[test]
fn parse_shift_label_variants() {
    let w = parse_shift("Mon (8:30-10:15)").unwrap();
    assert_eq!(w.weekday, Weekday::Mon);
    assert_eq!(w.start, t(8, 30));
    assert_eq!(w.end, t(10, 15));
    assert_eq!(w.time_range, "8:30-10:15");

    // parenthèses pleine chasse
    let w = parse_shift("Tue（12:00-14:00）").unwrap();
    assert_eq!(w.weekday, Weekday::Tue);
    assert_eq!(w.time_range, "12:00-14:00");

    assert!(matches!(
        parse_shift("Lundi (8:00-9:00)"),
        Err(LabelError::MissingWeekday(_))
    ));
    assert!(matches!(
        parse_shift("Mon 8:30-10:15"),
        Err(LabelError::MissingTimeRange(_))
    ));
    assert!(matches!(
        parse_shift("Mon (8h30-10h15)"),
        Err(LabelError::BadTimeRange { .. })
    ));
}

#[test]
fn required_count_never_exceeded() {
    let r = roster(
        vec![
            Student::new("s1", "Alice"),
            Student::new("s2", "Bob"),
            Student::new("s3", "Carol"),
        ],
        vec![ShiftSpec::new("Mon (8:30-10:15)", 2, Category::FrontDesk).unwrap()],
    );

    let mut planner = Planner::new();
    let records = planner.arrange_month(&r, 2025, 5).unwrap();

    // mai 2025 : quatre lundis
    assert_eq!(records.len(), 4);
    for record in &records {
        assert_eq!(record.assigned.names().len(), 2);
        assert_eq!(
            record.assigned,
            Coverage::Names(vec!["Alice".into(), "Bob".into()])
        );
    }
    assert_eq!(planner.state().load_of(&StudentId::new("s1")), 4);
    assert_eq!(planner.state().load_of(&StudentId::new("s3")), 0);
}

#[test]
fn load_counters_match_filled_slots() {
    let mut r = roster(
        vec![
            Student::new("s1", "Alice"),
            Student::new("s2", "Bob"),
            Student::new("s3", "Carol"),
        ],
        vec![
            ShiftSpec::new("Mon (08:00-10:00)", 1, Category::FrontDesk).unwrap(),
            ShiftSpec::new("Mon (10:00-12:00)", 2, Category::Stacks).unwrap(),
            ShiftSpec::new("Fri (14:00-16:00)", 1, Category::FrontDesk).unwrap(),
        ],
    );
    r.busy.insert(
        StudentId::new("s2"),
        vec![BusyInterval::new(Weekday::Fri, t(14, 0), t(16, 0)).unwrap()],
    );

    let mut planner = Planner::new();
    let records = planner.arrange_month(&r, 2025, 5).unwrap();

    let filled: usize = records.iter().map(|rec| rec.assigned.names().len()).sum();
    let total_load: u32 = planner.state().loads().values().sum();
    assert_eq!(total_load as usize, filled);

    // la charge d'un étudiant = nombre d'enregistrements qui portent son nom
    for (id, name) in [("s1", "Alice"), ("s2", "Bob"), ("s3", "Carol")] {
        let appearances = records
            .iter()
            .filter(|rec| rec.assigned.names().iter().any(|n| n == name))
            .count();
        assert_eq!(planner.state().load_of(&StudentId::new(id)) as usize, appearances);
    }
}

#[test]
fn substitute_never_evicts_original_titular() {
    let label = "Mon (9:00-11:00)";
    let students = vec![Student::new("a1", "Alice"), Student::new("b1", "Bob")];
    let shifts = vec![ShiftSpec::new(label, 1, Category::FrontDesk).unwrap()];

    let mut planner = Planner::new();

    // mois 1 : Alice libre, elle devient titulaire
    let free_month = roster(students.clone(), shifts.clone());
    let may = planner.arrange_month(&free_month, 2025, 5).unwrap();
    assert!(may
        .iter()
        .all(|rec| rec.assigned == Coverage::Names(vec!["Alice".into()])));

    // mois 2 : Alice a cours, Bob remplace chaque semaine
    let mut busy_month = roster(students.clone(), shifts.clone());
    busy_month.busy.insert(
        StudentId::new("a1"),
        vec![BusyInterval::new(Weekday::Mon, t(9, 0), t(11, 0)).unwrap()],
    );
    let june = planner.arrange_month(&busy_month, 2025, 6).unwrap();
    assert!(june
        .iter()
        .all(|rec| rec.assigned == Coverage::Names(vec!["Bob".into()])));

    // le remplaçant s'ajoute derrière la titulaire, il ne l'évince pas
    let preferred = planner.state().preferred(Category::FrontDesk);
    assert_eq!(
        preferred.get(label),
        Some(&vec![StudentId::new("a1"), StudentId::new("b1")])
    );

    // mois 3 : Alice de nouveau libre, elle reprend son créneau
    let july = planner.arrange_month(&free_month, 2025, 7).unwrap();
    assert!(july
        .iter()
        .all(|rec| rec.assigned == Coverage::Names(vec!["Alice".into()])));
}

#[test]
fn unfilled_shift_carries_explicit_marker() {
    let mut r = roster(
        vec![Student::new("s1", "Alice"), Student::new("s2", "Bob")],
        vec![ShiftSpec::new("Wed (10:00-12:00)", 2, Category::Stacks).unwrap()],
    );
    for id in ["s1", "s2"] {
        r.busy.insert(
            StudentId::new(id),
            vec![BusyInterval::new(Weekday::Wed, t(10, 0), t(12, 0)).unwrap()],
        );
    }

    let records = arrange_month(&r, 2025, 5).unwrap();

    // mai 2025 : quatre mercredis, tous émis, tous marqués
    assert_eq!(records.len(), 4);
    for record in &records {
        assert!(record.assigned.is_unfilled());
        assert_eq!(record.assigned.to_string(), "/");
    }
}

#[test]
fn unreadable_label_skipped_or_fatal_per_policy() {
    let r = roster(
        vec![Student::new("s1", "Alice")],
        vec![
            ShiftSpec::new("Staffroom 8-10", 1, Category::FrontDesk).unwrap(),
            ShiftSpec::new("Mon (08:00-09:00)", 1, Category::FrontDesk).unwrap(),
        ],
    );

    let records = arrange_month(&r, 2025, 5).unwrap();
    assert!(!records.is_empty());
    assert!(records.iter().all(|rec| rec.label == "Mon (08:00-09:00)"));

    let mut strict = Planner::with_options(ArrangeOptions {
        bad_labels: BadLabelPolicy::Fail,
    });
    let err = strict.arrange_month(&r, 2025, 5).unwrap_err();
    assert!(matches!(err, PlanError::Label(_)));
}

#[test]
fn missing_schedule_means_fully_free() {
    let mut r = roster(
        vec![Student::new("s1", "Alice"), Student::new("s2", "Bob")],
        vec![ShiftSpec::new("Mon (08:00-09:00)", 1, Category::FrontDesk).unwrap()],
    );
    // Alice a cours le lundi matin ; Bob n'a aucun fichier de cours
    r.busy.insert(
        StudentId::new("s1"),
        vec![BusyInterval::new(Weekday::Mon, t(8, 0), t(18, 0)).unwrap()],
    );

    let records = arrange_month(&r, 2025, 5).unwrap();
    assert!(records
        .iter()
        .all(|rec| rec.assigned == Coverage::Names(vec!["Bob".into()])));
}

#[test]
fn fallback_picks_least_loaded_then_roster_order() {
    let r = roster(
        vec![Student::new("s1", "Alice"), Student::new("s2", "Bob")],
        vec![
            ShiftSpec::new("Mon (08:00-09:00)", 1, Category::FrontDesk).unwrap(),
            ShiftSpec::new("Mon (09:00-10:00)", 1, Category::FrontDesk).unwrap(),
        ],
    );

    let mut planner = Planner::new();
    let records = planner.arrange_month(&r, 2025, 5).unwrap();

    // premier lundi : Alice prend le premier créneau, Bob (moins chargé)
    // prend le second
    assert_eq!(records[0].label, "Mon (08:00-09:00)");
    assert_eq!(records[0].assigned, Coverage::Names(vec!["Alice".into()]));
    assert_eq!(records[1].label, "Mon (09:00-10:00)");
    assert_eq!(records[1].assigned, Coverage::Names(vec!["Bob".into()]));

    // les titulaires tiennent ensuite tout le mois
    assert_eq!(planner.state().load_of(&StudentId::new("s1")), 4);
    assert_eq!(planner.state().load_of(&StudentId::new("s2")), 4);
}

#[test]
fn shift_ordering_is_canonical_and_idempotent() {
    let mut labels: Vec<String> = [
        "Wed (09:00-11:00)",
        "Mon (13:00-15:00)",
        "zzz",
        "Mon (08:30-10:15)",
        "Fri (08:00-10:00)",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    sort_shifts(&mut labels);
    let expected: Vec<String> = [
        "Mon (08:30-10:15)",
        "Mon (13:00-15:00)",
        "Wed (09:00-11:00)",
        "Fri (08:00-10:00)",
        "zzz",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    assert_eq!(labels, expected);

    sort_shifts(&mut labels);
    assert_eq!(labels, expected);
}

#[test]
fn invalid_month_is_an_error() {
    let r = roster(vec![], vec![]);
    assert!(matches!(
        arrange_month(&r, 2025, 13),
        Err(PlanError::Month(_))
    ));
}
