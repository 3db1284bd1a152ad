use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

/// Jour calendaire d'un mois cible, jour de semaine déduit de la date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay {
    pub date: NaiveDate,
    pub weekday: Weekday,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no such calendar month: {year}-{month:02}")]
pub struct InvalidMonth {
    pub year: i32,
    pub month: u32,
}

/// Tous les jours du mois, strictement dans le mois, ordre croissant.
pub fn month_days(year: i32, month: u32) -> Result<Vec<MonthDay>, InvalidMonth> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(InvalidMonth { year, month })?;
    Ok(first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|date| MonthDay {
            date,
            weekday: date.weekday(),
        })
        .collect())
}

/// Semaine calendaire lundi→dimanche, éventuellement partielle en bord
/// de mois.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekBucket {
    pub days: Vec<MonthDay>,
}

impl WeekBucket {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.iter().any(|d| d.date == date)
    }
}

/// Regroupe les jours en semaines : une nouvelle semaine démarre à chaque
/// lundi rencontré. La première et la dernière peuvent être partielles.
pub fn group_into_weeks(days: &[MonthDay]) -> Vec<WeekBucket> {
    let mut sorted: Vec<MonthDay> = days.to_vec();
    sorted.sort_by_key(|d| d.date);

    let mut weeks = Vec::new();
    let mut current: Vec<MonthDay> = Vec::new();
    for day in sorted {
        if day.weekday == Weekday::Mon && !current.is_empty() {
            weeks.push(WeekBucket {
                days: std::mem::take(&mut current),
            });
        }
        current.push(day);
    }
    if !current.is_empty() {
        weeks.push(WeekBucket { days: current });
    }
    weeks
}

/// Libellé d'une semaine, du premier au dernier jour : `5.1-5.7`.
pub fn week_title(week: &WeekBucket) -> String {
    let (Some(first), Some(last)) = (week.days.first(), week.days.last()) else {
        return String::new();
    };
    let mut buf = itoa::Buffer::new();
    let mut out = String::new();
    out.push_str(buf.format(first.date.month()));
    out.push('.');
    out.push_str(buf.format(first.date.day()));
    out.push('-');
    out.push_str(buf.format(last.date.month()));
    out.push('.');
    out.push_str(buf.format(last.date.day()));
    out
}
