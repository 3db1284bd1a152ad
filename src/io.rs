use crate::model::AssignmentRecord;
use crate::report::{render_sheet_text, MonthReport, Sheet, SheetRow};
use anyhow::Context;
use csv::WriterBuilder;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Export JSON des affectations plates (jolie mise en forme).
pub fn export_records_json<P: AsRef<Path>>(
    path: P,
    records: &[AssignmentRecord],
) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(records)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV plat : header `date,weekday,shift,category,assigned`.
pub fn export_records_csv<P: AsRef<Path>>(
    path: P,
    records: &[AssignmentRecord],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "weekday", "shift", "category", "assigned"])?;
    for record in records {
        w.write_record([
            record.date.to_string().as_str(),
            record.weekday.to_string().as_str(),
            record.label.as_str(),
            record.category.as_str(),
            record.assigned.to_string().as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV d'une feuille : ligne de titre, en-têtes de semaines, une
/// ligne par créneau, ligne vide entre deux jours.
pub fn write_sheet_csv<P: AsRef<Path>>(path: P, sheet: &Sheet) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    w.write_record([sheet.title.as_str()])?;

    let mut header: Vec<String> = vec![String::new()];
    header.extend(sheet.week_titles.iter().cloned());
    w.write_record(&header)?;

    for row in &sheet.rows {
        match row {
            SheetRow::Separator => w.write_record([""])?,
            SheetRow::Shift { label, cells } => {
                let mut record: Vec<String> = vec![label.clone()];
                record.extend(cells.iter().cloned());
                w.write_record(&record)?;
            }
        }
    }
    w.flush()?;
    Ok(())
}

/// Destination du rapport mensuel.
pub trait ReportSink {
    fn write(&self, report: &MonthReport) -> anyhow::Result<()>;
}

/// Un fichier CSV par feuille, nommés `AAAA-MM-<feuille>.csv`.
pub struct CsvReportDir {
    dir: PathBuf,
}

impl CsvReportDir {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl ReportSink for CsvReportDir {
    fn write(&self, report: &MonthReport) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating report directory {}", self.dir.display()))?;
        for sheet in &report.sheets {
            let path = self
                .dir
                .join(format!("{}-{:02}-{}.csv", report.year, report.month, sheet.name));
            write_sheet_csv(&path, sheet)
                .with_context(|| format!("writing sheet {}", path.display()))?;
        }
        Ok(())
    }
}

/// Rapport texte unique (les deux feuilles), écrit de manière atomique.
pub struct TextReportFile {
    path: PathBuf,
}

impl TextReportFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ReportSink for TextReportFile {
    fn write(&self, report: &MonthReport) -> anyhow::Result<()> {
        let mut body = String::new();
        for (i, sheet) in report.sheets.iter().enumerate() {
            if i > 0 {
                body.push('\n');
            }
            body.push_str(&render_sheet_text(sheet));
        }

        let mut tmp = NamedTempFile::new_in(self.path.parent().unwrap_or_else(|| Path::new(".")))
            .with_context(|| "creating temp file")?;
        tmp.write_all(body.as_bytes())?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
