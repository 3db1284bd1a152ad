use crate::parse;

/// Rang de tri d'un libellé : (lundi=1..dimanche=7, plage horaire telle
/// qu'écrite). Les libellés illisibles passent en queue.
///
/// La plage est comparée comme chaîne : la convention des libellés est le
/// format 24h, de préférence zéro-paddé.
pub(crate) fn shift_sort_key(label: &str) -> (u32, String) {
    match parse::parse_shift(label) {
        Ok(window) => (window.weekday.number_from_monday(), window.time_range),
        Err(_) => (999, String::new()),
    }
}

/// Tri canonique des libellés : jour puis plage horaire, stable et
/// idempotent quel que soit l'ordre d'entrée.
pub fn sort_shifts(labels: &mut [String]) {
    labels.sort_by_key(|label| shift_sort_key(label));
}
