use crate::model::BusyInterval;
use chrono::{NaiveTime, Weekday};

/// Un étudiant est libre sur `[start, end)` sauf si un de ses cours du même
/// jour chevauche la fenêtre. Intervalles semi-ouverts : finir quand l'autre
/// commence n'est pas un chevauchement.
pub fn is_free(busy: &[BusyInterval], weekday: Weekday, start: NaiveTime, end: NaiveTime) -> bool {
    !busy
        .iter()
        .any(|b| b.weekday == weekday && overlaps(b.start, b.end, start, end))
}

pub(super) fn overlaps(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && b_start < a_end
}
