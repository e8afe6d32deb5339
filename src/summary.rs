use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::anchor::AnchorTable;
use crate::extract::{extract_description, ExtractConfig};

pub const STUDENT_COLUMN: &str = "תלמידי כיתה";
pub const STRENGTHS_COLUMN: &str = "חוזקות";

/// Shown when every matching cell was status-only and nothing could be
/// extracted; callers must not drop the domain just because the text is thin.
pub const FALLBACK_DESCRIPTION: &str = "מגוון / לא פורט";

#[derive(Debug, Clone, Copy)]
pub struct Domain {
    pub key: &'static str,
    pub header: &'static str,
}

/// The nine anchor domains, keyed for the frontend and mapped to the exact
/// column headers the anchor export uses. Header matching is equality on the
/// trimmed header text.
pub const DOMAINS: [Domain; 9] = [
    Domain {
        key: "language",
        header: "שפה",
    },
    Domain {
        key: "math",
        header: "חשבון",
    },
    Domain {
        key: "english",
        header: "אנגלית",
    },
    Domain {
        key: "motivation",
        header: "מוטיבציה והרגלי למידה",
    },
    Domain {
        key: "emotional",
        header: "רגשי",
    },
    Domain {
        key: "behavioral",
        header: "התנהגותי",
    },
    Domain {
        key: "social",
        header: "חברתי",
    },
    Domain {
        key: "attention",
        header: "קשב וריכוז",
    },
    Domain {
        key: "sensory_motor",
        header: "חושי מוטורי מרחבי",
    },
];

pub fn domain_by_key(key: &str) -> Option<&'static Domain> {
    DOMAINS.iter().find(|d| d.key == key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    Difficulty,
    Strength,
}

impl SummaryKind {
    /// Substring matched against the raw status cell. The difficulty keyword
    /// also covers the "struggling a lot" label.
    pub fn keyword(self) -> &'static str {
        match self {
            SummaryKind::Difficulty => "מתקשה",
            SummaryKind::Strength => "כן",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SummaryKind::Difficulty => "difficulty",
            SummaryKind::Strength => "strength",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "difficulty" => Some(SummaryKind::Difficulty),
            "strength" => Some(SummaryKind::Strength),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainSummary {
    pub key: String,
    pub label: String,
    pub student_count: usize,
    pub students: Vec<String>,
    pub dominant: String,
    pub dominant_is_fallback: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDomainRow {
    pub key: String,
    pub label: String,
    pub status: String,
    pub is_difficulty: bool,
    pub is_strength: bool,
    pub description: Option<String>,
}

/// Distinct student names in row order. The anchor export is nominally one
/// row per student, but re-exports have been seen with duplicates.
pub fn distinct_students(table: &AnchorTable) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out: Vec<String> = Vec::new();
    for row in &table.rows {
        if seen.insert(row.student.as_str()) {
            out.push(row.student.clone());
        }
    }
    out
}

/// Most frequent value; ties resolve to the value seen first in row order so
/// the result is deterministic for a given upload.
pub fn most_frequent(values: &[String]) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();
    for v in values {
        let n = counts.entry(v.as_str()).or_insert(0);
        if *n == 0 {
            first_seen.push(v.as_str());
        }
        *n += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for v in first_seen {
        let n = counts[v];
        match best {
            Some((_, best_n)) if best_n >= n => {}
            _ => best = Some((v, n)),
        }
    }
    best.map(|(v, _)| v.to_string())
}

/// Per-domain rollup for one summary kind. Domains whose column is absent
/// from the upload, or with no matching rows, are omitted rather than
/// reported as zero.
pub fn domain_summaries(
    table: &AnchorTable,
    kind: SummaryKind,
    cfg: &ExtractConfig,
) -> Vec<DomainSummary> {
    let keyword = kind.keyword();
    let mut out: Vec<DomainSummary> = Vec::new();

    for domain in DOMAINS.iter() {
        let Some(col) = table.column_index(domain.header) else {
            continue;
        };

        let mut seen: HashSet<&str> = HashSet::new();
        let mut students: Vec<String> = Vec::new();
        let mut descriptions: Vec<String> = Vec::new();

        for row in &table.rows {
            let Some(cell) = row.cells.get(col).and_then(|c| c.as_deref()) else {
                continue;
            };
            if !cell.contains(keyword) {
                continue;
            }
            if seen.insert(row.student.as_str()) {
                students.push(row.student.clone());
            }
            if let Some(desc) = extract_description(cell, cfg) {
                descriptions.push(desc);
            }
        }

        if students.is_empty() {
            continue;
        }

        let (dominant, dominant_is_fallback) = match most_frequent(&descriptions) {
            Some(d) => (d, false),
            None => (FALLBACK_DESCRIPTION.to_string(), true),
        };

        out.push(DomainSummary {
            key: domain.key.to_string(),
            label: domain.header.to_string(),
            student_count: students.len(),
            students,
            dominant,
            dominant_is_fallback,
        });
    }

    out
}

/// Every present domain cell for one student, with the detected kinds and the
/// extracted description. Feeds the individual-plan view.
pub fn student_domain_rows(
    table: &AnchorTable,
    student: &str,
    cfg: &ExtractConfig,
) -> Vec<StudentDomainRow> {
    let Some(row) = table.rows.iter().find(|r| r.student == student) else {
        return Vec::new();
    };

    let mut out: Vec<StudentDomainRow> = Vec::new();
    for domain in DOMAINS.iter() {
        let Some(col) = table.column_index(domain.header) else {
            continue;
        };
        let Some(cell) = row.cells.get(col).cloned().flatten() else {
            continue;
        };
        out.push(StudentDomainRow {
            key: domain.key.to_string(),
            label: domain.header.to_string(),
            is_difficulty: cell.contains(SummaryKind::Difficulty.keyword()),
            is_strength: cell.contains(SummaryKind::Strength.keyword()),
            description: extract_description(&cell, cfg),
            status: cell,
        });
    }
    out
}

pub fn student_strengths(table: &AnchorTable, student: &str) -> Option<String> {
    let col = table.column_index(STRENGTHS_COLUMN)?;
    let row = table.rows.iter().find(|r| r.student == student)?;
    row.cells.get(col)?.clone()
}
