use crate::calendar::{self, WeekBucket};
use crate::model::{AssignmentRecord, Category, Coverage};
use crate::parse;
use crate::scheduler::{sort_shifts, PlanError};
use chrono::Weekday;

/// Ligne d'une feuille : un créneau avec une cellule par semaine, ou un
/// séparateur entre deux groupes de jours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetRow {
    Shift { label: String, cells: Vec<String> },
    Separator,
}

/// Feuille d'une catégorie : titre, une colonne par semaine, lignes de
/// créneaux groupées par jour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub title: String,
    pub week_titles: Vec<String>,
    pub rows: Vec<SheetRow>,
}

/// Rapport mensuel : une feuille par catégorie, accueil d'abord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthReport {
    pub year: i32,
    pub month: u32,
    pub sheets: Vec<Sheet>,
}

/// Valeur hebdomadaire d'un créneau récurrent : première occurrence
/// couverte de la semaine, par date croissante ; sinon le marqueur.
/// Une couverture réelle prime toujours sur un trou ponctuel.
///
/// `records` doit déjà être restreint à une catégorie si le même libellé
/// existe dans les deux.
pub fn resolve_week_coverage(
    records: &[AssignmentRecord],
    label: &str,
    week: &WeekBucket,
) -> Coverage {
    let mut hits: Vec<&AssignmentRecord> = records
        .iter()
        .filter(|r| r.label == label && week.contains(r.date))
        .collect();
    hits.sort_by_key(|r| r.date);
    hits.iter()
        .find(|r| !r.assigned.is_unfilled())
        .map(|r| r.assigned.clone())
        .unwrap_or(Coverage::Unfilled)
}

/// Construit le rapport mensuel à partir des affectations plates.
pub fn build_month_report(
    records: &[AssignmentRecord],
    year: i32,
    month: u32,
) -> Result<MonthReport, PlanError> {
    let days = calendar::month_days(year, month)?;
    let weeks = calendar::group_into_weeks(&days);
    let sheets = Category::ALL
        .iter()
        .map(|&category| build_sheet(records, category, &weeks, year, month))
        .collect();
    Ok(MonthReport {
        year,
        month,
        sheets,
    })
}

fn build_sheet(
    records: &[AssignmentRecord],
    category: Category,
    weeks: &[WeekBucket],
    year: i32,
    month: u32,
) -> Sheet {
    let in_category: Vec<AssignmentRecord> = records
        .iter()
        .filter(|r| r.category == category)
        .cloned()
        .collect();

    let mut labels: Vec<String> = Vec::new();
    for record in &in_category {
        if !labels.contains(&record.label) {
            labels.push(record.label.clone());
        }
    }
    sort_shifts(&mut labels);

    let week_titles: Vec<String> = weeks.iter().map(calendar::week_title).collect();

    let mut rows: Vec<SheetRow> = Vec::new();
    let mut last_weekday: Option<Weekday> = None;
    for label in labels {
        let weekday = parse::parse_shift(&label).ok().map(|w| w.weekday);
        if last_weekday.is_some() && weekday != last_weekday {
            rows.push(SheetRow::Separator);
        }
        last_weekday = weekday;

        let cells = weeks
            .iter()
            .map(|week| resolve_week_coverage(&in_category, &label, week).to_string())
            .collect();
        rows.push(SheetRow::Shift { label, cells });
    }

    let head = match category {
        Category::FrontDesk => "Front desk",
        Category::Stacks => "Stacks",
    };
    Sheet {
        name: category.as_str().to_owned(),
        title: format!("{head} duty roster ({year}-{month:02})"),
        week_titles,
        rows,
    }
}

/// Rendu texte d'une feuille : grille bordée, une colonne par semaine,
/// ligne vide entre deux jours.
pub fn render_sheet_text(sheet: &Sheet) -> String {
    let columns = sheet.week_titles.len() + 1;
    let mut widths = vec![0usize; columns];
    for (i, title) in sheet.week_titles.iter().enumerate() {
        widths[i + 1] = title.chars().count();
    }
    for row in &sheet.rows {
        if let SheetRow::Shift { label, cells } = row {
            widths[0] = widths[0].max(label.chars().count());
            for (i, cell) in cells.iter().enumerate() {
                widths[i + 1] = widths[i + 1].max(cell.chars().count());
            }
        }
    }

    let mut rule = String::from("+");
    for width in &widths {
        rule.push_str(&"-".repeat(width + 2));
        rule.push('+');
    }

    let mut out = String::new();
    out.push_str(&sheet.title);
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    let mut header: Vec<String> = vec![String::new()];
    header.extend(sheet.week_titles.iter().cloned());
    out.push_str(&format_row(&header, &widths));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for row in &sheet.rows {
        match row {
            SheetRow::Separator => out.push('\n'),
            SheetRow::Shift { label, cells } => {
                let mut line: Vec<String> = vec![label.clone()];
                line.extend(cells.iter().cloned());
                out.push_str(&format_row(&line, &widths));
                out.push('\n');
            }
        }
    }
    out.push_str(&rule);
    out.push('\n');
    out
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width.saturating_sub(cell.chars().count());
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(pad));
        line.push_str(" |");
    }
    line
}
