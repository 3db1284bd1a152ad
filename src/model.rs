use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Marqueur explicite "créneau non couvert" dans les rapports et exports.
pub const UNFILLED_MARK: &str = "/";

/// Identifiant fort pour Student
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(String);

impl StudentId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Étudiant inscrit au planning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "student_id")]
    pub id: StudentId,
    pub name: String,
}

impl Student {
    pub fn new<I: AsRef<str>, N: Into<String>>(id: I, name: N) -> Self {
        Self {
            id: StudentId::new(id),
            name: name.into(),
        }
    }
}

/// Créneau de cours d'un étudiant, récurrent chaque semaine
/// (intervalle semi-ouvert [start, end) sur un jour donné).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl BusyInterval {
    pub fn new(weekday: Weekday, start: NaiveTime, end: NaiveTime) -> Result<Self, String> {
        if end <= start {
            return Err("busy interval end must be after start".to_string());
        }
        Ok(Self {
            weekday,
            start,
            end,
        })
    }
}

/// Catégorie d'une permanence. Segmente la mémoire de préférence
/// et les feuilles du rapport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    FrontDesk,
    Stacks,
}

impl Category {
    /// Ordre de rendu des feuilles du rapport.
    pub const ALL: [Category; 2] = [Category::FrontDesk, Category::Stacks];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FrontDesk => "front-desk",
            Category::Stacks => "stacks",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permanence hebdomadaire récurrente. Le libellé (ex. `Mon (8:30-10:15)`)
/// est l'identité canonique du créneau : il sert de clé à la mémoire des
/// titulaires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSpec {
    pub label: String,
    #[serde(rename = "required_count")]
    pub required: u32,
    pub category: Category,
}

impl ShiftSpec {
    /// Crée une permanence en validant `required >= 1`.
    pub fn new<L: Into<String>>(label: L, required: u32, category: Category) -> Result<Self, String> {
        if required == 0 {
            return Err("required_count must be at least 1".to_string());
        }
        Ok(Self {
            label: label.into(),
            required,
            category,
        })
    }
}

/// Valeur d'affectation d'un créneau daté : des noms, ou le marqueur
/// explicite "non couvert". Jamais une liste vide — l'aval distingue ainsi
/// "pas de créneau ce jour" (pas d'enregistrement) de "créneau sans
/// personne" (enregistrement marqué).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coverage {
    Names(Vec<String>),
    Unfilled,
}

impl Coverage {
    /// Normalise une liste de noms : vide devient `Unfilled`.
    pub fn from_names(names: Vec<String>) -> Self {
        if names.is_empty() {
            Coverage::Unfilled
        } else {
            Coverage::Names(names)
        }
    }

    pub fn is_unfilled(&self) -> bool {
        matches!(self, Coverage::Unfilled)
    }

    pub fn names(&self) -> &[String] {
        match self {
            Coverage::Names(names) => names,
            Coverage::Unfilled => &[],
        }
    }
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coverage::Unfilled => f.write_str(UNFILLED_MARK),
            Coverage::Names(names) => f.write_str(&names.join(",")),
        }
    }
}

// Sur le fil, une couverture est la chaîne lue par les tableurs : noms
// séparés par des virgules, ou `/`.
impl Serialize for Coverage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Coverage {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() || raw == UNFILLED_MARK {
            return Ok(Coverage::Unfilled);
        }
        Ok(Coverage::Names(raw.split(',').map(str::to_owned).collect()))
    }
}

/// Une affectation datée, émise par le moteur pour chaque couple
/// (jour, permanence) dont le jour correspond. Immuable une fois émise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub date: NaiveDate,
    pub weekday: Weekday,
    #[serde(rename = "shift")]
    pub label: String,
    pub category: Category,
    pub assigned: Coverage,
}

/// Données d'entrée d'un mois de planification : trombinoscope, permanences
/// et emplois du temps déjà fusionnés par l'appelant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    pub students: Vec<Student>,
    pub shifts: Vec<ShiftSpec>,
    #[serde(default)]
    pub busy: HashMap<StudentId, Vec<BusyInterval>>,
}

impl Roster {
    pub fn find_student_by_id<'a>(&'a self, id: &StudentId) -> Option<&'a Student> {
        self.students.iter().find(|s| &s.id == id)
    }

    /// Emploi du temps d'un étudiant ; absent du fichier = aucun cours,
    /// donc entièrement libre.
    pub fn busy_for(&self, id: &StudentId) -> &[BusyInterval] {
        self.busy.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}
