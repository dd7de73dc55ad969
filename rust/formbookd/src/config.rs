use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::pedagogy::{self, PedagogicalData};

/// School year rolls over in September.
const SCHOOL_YEAR_START_MONTH: u32 = 9;

/// Institution metadata printed in every form header.
///
/// The subject domain ("field") is deliberately not stored: it is derived from
/// `term` on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolConfig {
    pub school_name: String,
    pub teacher_name: String,
    pub academic_year: String,
    pub level: String,
    pub sub_level: String,
    pub term: String,
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self {
            school_name: "المؤسسة التربوية".to_string(),
            teacher_name: "الأستاذ(ة)".to_string(),
            academic_year: academic_year_for(Local::now().date_naive()),
            level: "أولى".to_string(),
            sub_level: "أ".to_string(),
            term: "الفصل الأول".to_string(),
        }
    }
}

impl SchoolConfig {
    pub fn field(&self) -> &'static str {
        pedagogy::field_label(&self.term)
    }

    pub fn pedagogical(&self) -> PedagogicalData {
        pedagogy::lookup(&self.level, &self.term)
    }

    /// e.g. "أولى إبتدائي (أ)"
    pub fn level_label(&self) -> String {
        format!("{} إبتدائي ({})", self.level, self.sub_level)
    }

    pub fn apply(&mut self, patch: ConfigPatch) {
        let ConfigPatch {
            school_name,
            teacher_name,
            academic_year,
            level,
            sub_level,
            term,
        } = patch;
        let slots = [
            (&mut self.school_name, school_name),
            (&mut self.teacher_name, teacher_name),
            (&mut self.academic_year, academic_year),
            (&mut self.level, level),
            (&mut self.sub_level, sub_level),
            (&mut self.term, term),
        ];
        for (slot, value) in slots {
            if let Some(v) = value {
                *slot = v;
            }
        }
    }

    pub fn view(&self) -> ConfigView<'_> {
        ConfigView {
            config: self,
            field: self.field(),
            level_label: self.level_label(),
        }
    }
}

/// Wire shape of the config: stored fields plus the derived ones.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigView<'a> {
    #[serde(flatten)]
    config: &'a SchoolConfig,
    field: &'static str,
    level_label: String,
}

/// Partial update. Unknown keys (including `field`) are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigPatch {
    pub school_name: Option<String>,
    pub teacher_name: Option<String>,
    pub academic_year: Option<String>,
    pub level: Option<String>,
    pub sub_level: Option<String>,
    pub term: Option<String>,
}

pub fn academic_year_for(date: NaiveDate) -> String {
    let start = if date.month() >= SCHOOL_YEAR_START_MONTH {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{}/{}", start, start + 1)
}
