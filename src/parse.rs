use chrono::{NaiveTime, Weekday};
use thiserror::Error;

/// Fenêtre extraite d'un libellé de permanence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftWindow {
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Plage horaire telle qu'écrite dans le libellé ; sert de clé de tri.
    pub time_range: String,
}

/// Libellé de permanence inexploitable. L'appelant choisit la politique
/// (ignorer avec warning, ou échouer) ; le parseur ne décide pas.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("no weekday token in shift label `{0}`")]
    MissingWeekday(String),
    #[error("no parenthesized time range in shift label `{0}`")]
    MissingTimeRange(String),
    #[error("malformed time range `{range}` in shift label `{label}`")]
    BadTimeRange { label: String, range: String },
}

const WEEKDAY_TOKENS: [(&str, Weekday); 7] = [
    ("Mon", Weekday::Mon),
    ("Tue", Weekday::Tue),
    ("Wed", Weekday::Wed),
    ("Thu", Weekday::Thu),
    ("Fri", Weekday::Fri),
    ("Sat", Weekday::Sat),
    ("Sun", Weekday::Sun),
];

/// Extrait (jour, plage horaire) d'un libellé comme `Mon (8:30-10:15)`.
/// Accepte les parenthèses ASCII et pleine chasse.
pub fn parse_shift(label: &str) -> Result<ShiftWindow, LabelError> {
    let trimmed = label.trim();
    let (weekday, rest) = WEEKDAY_TOKENS
        .iter()
        .find_map(|(token, weekday)| trimmed.strip_prefix(token).map(|rest| (*weekday, rest)))
        .ok_or_else(|| LabelError::MissingWeekday(label.to_owned()))?;

    let rest = rest.trim_start();
    let inner = rest
        .strip_prefix('(')
        .or_else(|| rest.strip_prefix('（'))
        .ok_or_else(|| LabelError::MissingTimeRange(label.to_owned()))?;
    let inner = inner
        .strip_suffix(')')
        .or_else(|| inner.strip_suffix('）'))
        .ok_or_else(|| LabelError::MissingTimeRange(label.to_owned()))?;

    let range = inner.trim();
    let bad_range = || LabelError::BadTimeRange {
        label: label.to_owned(),
        range: range.to_owned(),
    };
    let (start_raw, end_raw) = range.split_once('-').ok_or_else(bad_range)?;
    let start = parse_clock(start_raw.trim()).ok_or_else(bad_range)?;
    let end = parse_clock(end_raw.trim()).ok_or_else(bad_range)?;

    Ok(ShiftWindow {
        weekday,
        start,
        end,
        time_range: range.to_owned(),
    })
}

fn parse_clock(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M").ok()
}
