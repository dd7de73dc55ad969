//! Fixed-layout page models for the printable forms.
//!
//! Every form has a fixed number of pre-printed lines. Rows past the roster
//! are emitted blank so the sheet lines up whatever the class size.

pub mod html;

use serde::Serialize;

use crate::catalog::DocumentKind;
use crate::config::SchoolConfig;
use crate::layout::{MarginSettings, Orientation};
use crate::roster::Student;
use crate::session::Session;

pub const ASSESSMENT_ROWS: usize = 40;
pub const PERFORMANCE_ROWS: usize = 40;
pub const ATTENDANCE_ROWS: usize = 35;

pub const EXEMPT_BANNER: &str = "معفـــــــــي";
pub const EXEMPT_REMARK: &str = "معفى";
pub const ATTENDANCE_EXEMPT_CODE: &str = "X";

const GRADE_LETTERS: [&str; 4] = ["أ", "ب", "ج", "د"];
const ASSESSMENT_GROUPS: [&str; 5] = ["المعيار 1", "المعيار 2", "المعيار 3", "المعيار 4", "الكفاءة"];
const GRADE_LEGEND: [&str; 4] = [
    "د= تملك محدود (3/0)",
    "ج= تملك جزئي (3/1)",
    "ب= تملك مقبول (3/2)",
    "أ= تملك أقصى (3/3)",
];
const MONTHS: [&str; 9] = [
    "سبتمبر", "أكتوبر", "نوفمبر", "ديسمبر", "جانفي", "فيفري", "مارس", "أفريل", "ماي",
];
const SESSIONS: [&str; 2] = ["أ1", "أ2"];
const SLOTS: [&str; 2] = ["ح", "م"];
const ATTENDANCE_LEGEND: [(&str, &str); 6] = [
    ("حاضر", "تترك فارغة"),
    ("غائب", "غ"),
    ("متأخر", "م"),
    ("بدون لباس", "ب"),
    ("مريض (شهادة)", "ض"),
    ("معفي", ATTENDANCE_EXEMPT_CODE),
];
const PERFORMANCE_INSTRUCTIONS: &str =
    "يتم تقييم التلميذ بشكل مستمر عن طريق رصد دائم للأداء من أول يوم في الفصل إلى حصة التقويم التحصيلي.";
const SEPARATOR_SUBTITLE: &str = "دفتر متابعة التقويم التربوي";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub kind: DocumentKind,
    pub orientation: Orientation,
    pub width_mm: u32,
    pub height_mm: u32,
    pub frame: PageFrame,
    /// Students that did not fit on the form's fixed lines.
    pub omitted_students: usize,
    pub body: PageBody,
}

/// Uniform padding and shift applied to every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFrame {
    pub padding_top_mm: u32,
    pub padding_bottom_mm: u32,
    pub padding_left_mm: u32,
    pub padding_right_mm: u32,
    pub offset_top_px: i32,
}

impl From<&MarginSettings> for PageFrame {
    fn from(m: &MarginSettings) -> Self {
        Self {
            padding_top_mm: m.top,
            padding_bottom_mm: m.bottom,
            padding_left_mm: m.left,
            padding_right_mm: m.right,
            offset_top_px: m.vertical_offset,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PageBody {
    Assessment(AssessmentSheet),
    Performance(PerformanceCard),
    Attendance(AttendanceRegister),
    Separator(SeparatorPage),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageHeader {
    pub school_name: String,
    pub level_label: String,
    pub teacher_name: String,
    pub academic_year: String,
    pub field: String,
    pub term: String,
}

impl From<&SchoolConfig> for PageHeader {
    fn from(c: &SchoolConfig) -> Self {
        Self {
            school_name: c.school_name.clone(),
            level_label: c.level_label(),
            teacher_name: c.teacher_name.clone(),
            academic_year: c.academic_year.clone(),
            field: c.field().to_string(),
            term: c.term.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnGroup {
    pub label: String,
    pub sub_columns: Vec<String>,
}

impl ColumnGroup {
    fn new(label: &str, sub_columns: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            sub_columns: sub_columns.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn span(&self) -> usize {
        self.sub_columns.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RowCells {
    /// One empty cell per tracked column, for manual completion.
    Blank { count: usize },
    /// Every grade cell collapsed into one.
    Merged { span: usize, label: String },
    /// The same code written in every cell.
    Coded { count: usize, code: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRow {
    pub student_id: Option<u32>,
    pub name: String,
    pub exempted: bool,
    pub cells: RowCells,
    /// `None` on forms without a remarks column.
    pub remark: Option<String>,
}

impl FormRow {
    fn blank(width: usize, with_remark: bool) -> Self {
        Self {
            student_id: None,
            name: String::new(),
            exempted: false,
            cells: RowCells::Blank { count: width },
            remark: with_remark.then(String::new),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSheet {
    pub title: String,
    pub header: PageHeader,
    pub competency: String,
    pub criteria: [String; 4],
    pub groups: Vec<ColumnGroup>,
    pub remarks_label: String,
    pub rows: Vec<FormRow>,
    pub legend: Vec<String>,
    pub signature_line: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceCard {
    pub title: String,
    pub header: PageHeader,
    pub instructions: String,
    pub groups: Vec<ColumnGroup>,
    pub score_label: String,
    pub remarks_label: String,
    pub rows: Vec<FormRow>,
    pub signature: SignatureSlot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureSlot {
    pub label: String,
    pub asset_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRegister {
    pub title: String,
    pub header: PageHeader,
    pub months: Vec<String>,
    pub sessions: Vec<String>,
    pub slots: Vec<String>,
    pub rows: Vec<FormRow>,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub label: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeparatorPage {
    pub term: String,
    pub subtitle: String,
    pub field: String,
    pub teacher_name: String,
    pub school_name: String,
    pub academic_year: String,
}

/// One page per printable document kind, in catalog order. Hidden or
/// unselected kinds produce nothing.
pub fn render_pages(session: &Session) -> Vec<Page> {
    session
        .catalog
        .print_order()
        .into_iter()
        .map(|kind| render_page(session, kind))
        .collect()
}

pub fn render_page(session: &Session, kind: DocumentKind) -> Page {
    let students = session.roster.students();
    let (body, capacity) = match kind {
        DocumentKind::Diagnostic | DocumentKind::Achievement => (
            PageBody::Assessment(assessment_sheet(kind, &session.config, students)),
            ASSESSMENT_ROWS,
        ),
        DocumentKind::Performance => (
            PageBody::Performance(performance_card(session)),
            PERFORMANCE_ROWS,
        ),
        DocumentKind::Attendance => (
            PageBody::Attendance(attendance_register(&session.config, students)),
            ATTENDANCE_ROWS,
        ),
        DocumentKind::Separator => (PageBody::Separator(separator_page(&session.config)), usize::MAX),
    };

    let omitted_students = students.len().saturating_sub(capacity);
    if omitted_students > 0 {
        tracing::warn!(
            kind = kind.as_str(),
            capacity,
            omitted_students,
            "roster exceeds form capacity"
        );
    }

    let orientation = kind.orientation();
    let size = orientation.page_size();
    Page {
        kind,
        orientation,
        width_mm: size.width_mm,
        height_mm: size.height_mm,
        frame: PageFrame::from(&session.margins),
        omitted_students,
        body,
    }
}

/// Exactly `capacity` rows: one per student, then blank lines.
fn padded_rows<F>(students: &[Student], capacity: usize, row_for: F) -> Vec<FormRow>
where
    F: Fn(Option<&Student>) -> FormRow,
{
    (0..capacity).map(|i| row_for(students.get(i))).collect()
}

fn merged_or_blank(student: Option<&Student>, width: usize) -> FormRow {
    let Some(s) = student else {
        return FormRow::blank(width, true);
    };
    let (cells, remark) = if s.is_exempted {
        (
            RowCells::Merged {
                span: width,
                label: EXEMPT_BANNER.to_string(),
            },
            EXEMPT_REMARK.to_string(),
        )
    } else {
        (RowCells::Blank { count: width }, String::new())
    };
    FormRow {
        student_id: Some(s.id),
        name: s.name.clone(),
        exempted: s.is_exempted,
        cells,
        remark: Some(remark),
    }
}

fn assessment_sheet(kind: DocumentKind, config: &SchoolConfig, students: &[Student]) -> AssessmentSheet {
    let groups: Vec<ColumnGroup> = ASSESSMENT_GROUPS
        .iter()
        .map(|label| ColumnGroup::new(label, &GRADE_LETTERS))
        .collect();
    let width: usize = groups.iter().map(ColumnGroup::span).sum();
    let data = config.pedagogical();
    let title = match kind {
        DocumentKind::Achievement => "تقويم التحصيلي للكفاءة الختامية",
        _ => "تقويم التشخيصي للكفاءة الختامية",
    };

    AssessmentSheet {
        title: title.to_string(),
        header: PageHeader::from(config),
        competency: data.kafaa,
        criteria: data.criteria,
        groups,
        remarks_label: "الملاحظة".to_string(),
        rows: padded_rows(students, ASSESSMENT_ROWS, |s| merged_or_blank(s, width)),
        legend: GRADE_LEGEND.iter().map(|s| s.to_string()).collect(),
        signature_line: "توقيع وختم الأستاذ: ..........................".to_string(),
    }
}

fn performance_card(session: &Session) -> PerformanceCard {
    let groups = vec![
        ColumnGroup::new(
            "الالتزام بالتعليمات",
            &["الحضور (1)", "اللباس (1)", "السلوك (3)"],
        ),
        ColumnGroup::new("الأداء الرياضي", &["المشاركة (3)", "التنسيق (2)"]),
    ];
    // The score column is merged together with the criteria for exempted rows.
    let width = groups.iter().map(ColumnGroup::span).sum::<usize>() + 1;

    PerformanceCard {
        title: "بطاقة تقييم أداء التلاميذ".to_string(),
        header: PageHeader::from(&session.config),
        instructions: PERFORMANCE_INSTRUCTIONS.to_string(),
        groups,
        score_label: "العلامة".to_string(),
        remarks_label: "الملاحظة".to_string(),
        rows: padded_rows(session.roster.students(), PERFORMANCE_ROWS, |s| {
            merged_or_blank(s, width)
        }),
        signature: SignatureSlot {
            label: "إمضاء الأستاذ:".to_string(),
            asset_id: session.signature.as_ref().map(|img| img.id.clone()),
        },
    }
}

fn attendance_register(config: &SchoolConfig, students: &[Student]) -> AttendanceRegister {
    let width = MONTHS.len() * SESSIONS.len() * SLOTS.len();
    let rows = padded_rows(students, ATTENDANCE_ROWS, |student| {
        let Some(s) = student else {
            return FormRow::blank(width, false);
        };
        let cells = if s.is_exempted {
            RowCells::Coded {
                count: width,
                code: ATTENDANCE_EXEMPT_CODE.to_string(),
            }
        } else {
            RowCells::Blank { count: width }
        };
        FormRow {
            student_id: Some(s.id),
            name: s.name.clone(),
            exempted: s.is_exempted,
            cells,
            remark: None,
        }
    });

    AttendanceRegister {
        title: "سجل المناداة وتتبع الغيابات".to_string(),
        header: PageHeader::from(config),
        months: MONTHS.iter().map(|s| s.to_string()).collect(),
        sessions: SESSIONS.iter().map(|s| s.to_string()).collect(),
        slots: SLOTS.iter().map(|s| s.to_string()).collect(),
        rows,
        legend: ATTENDANCE_LEGEND
            .iter()
            .map(|(label, code)| LegendEntry {
                label: label.to_string(),
                code: code.to_string(),
            })
            .collect(),
    }
}

fn separator_page(config: &SchoolConfig) -> SeparatorPage {
    SeparatorPage {
        term: config.term.clone(),
        subtitle: SEPARATOR_SUBTITLE.to_string(),
        field: config.field().to_string(),
        teacher_name: config.teacher_name.clone(),
        school_name: config.school_name.clone(),
        academic_year: config.academic_year.clone(),
    }
}
