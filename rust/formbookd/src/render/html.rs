use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::{
    AssessmentSheet, AttendanceRegister, FormRow, Page, PageBody, PageHeader, PerformanceCard,
    RowCells, SeparatorPage,
};
use crate::assets::SignatureImage;

const EMPTY_SELECTION: &str = "لم يتم اختيار أي وثيقة";
const SIGNATURE_PROMPT: &str = "انقر لإضافة الإمضاء";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// On-screen preview: interactive bits stay visible.
    Preview,
    /// What goes to the printer.
    Print,
}

impl RenderMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "preview" => Some(RenderMode::Preview),
            "print" => Some(RenderMode::Print),
            _ => None,
        }
    }
}

/// Full standalone document, one `section.page` per page.
pub fn print_document(pages: &[Page], signature: Option<&SignatureImage>, mode: RenderMode) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ar" dir="rtl" {
            head {
                meta charset="UTF-8";
                title { "دفتر متابعة التقويم التربوي" }
                style { (PreEscaped(CSS)) }
            }
            body class=(match mode { RenderMode::Preview => "preview", RenderMode::Print => "print" }) {
                @if pages.is_empty() {
                    @if mode == RenderMode::Preview {
                        div.empty-state { p { (EMPTY_SELECTION) } }
                    }
                } @else {
                    @for page in pages {
                        (render_page(page, signature, mode))
                    }
                }
            }
        }
    }
}

fn page_style(page: &Page) -> String {
    let f = &page.frame;
    format!(
        "width:{}mm;min-height:{}mm;padding:{}mm {}mm {}mm {}mm;margin-top:{}px;",
        page.width_mm,
        page.height_mm,
        f.padding_top_mm,
        f.padding_right_mm,
        f.padding_bottom_mm,
        f.padding_left_mm,
        f.offset_top_px,
    )
}

fn render_page(page: &Page, signature: Option<&SignatureImage>, mode: RenderMode) -> Markup {
    html! {
        section class={"page " (page.orientation.as_str())} data-kind=(page.kind.as_str()) style=(page_style(page)) {
            div.page-body {
                @match &page.body {
                    PageBody::Assessment(sheet) => (assessment(sheet)),
                    PageBody::Performance(card) => (performance(card, signature, mode)),
                    PageBody::Attendance(register) => (attendance(register)),
                    PageBody::Separator(sep) => (separator(sep)),
                }
            }
        }
    }
}

/// The attendance register leaves out field and term.
fn header_block(header: &PageHeader, with_field: bool) -> Markup {
    html! {
        div.header {
            div.header-col {
                div { "المؤسسة: " (header.school_name) }
                div { "المستوى: " (header.level_label) }
            }
            div.header-col {
                div { "الأستاذ(ة): " (header.teacher_name) }
                div { "السنة الدراسية: " (header.academic_year) }
            }
            @if with_field {
                div.header-col {
                    div { "الميدان: " (header.field) }
                    div { (header.term) }
                }
            }
        }
    }
}

fn row_cells(row: &FormRow) -> Markup {
    html! {
        @match &row.cells {
            RowCells::Blank { count } => {
                @for _ in 0..*count { td {} }
            }
            RowCells::Merged { span, label } => {
                td.exempt colspan=(span) { (label) }
            }
            RowCells::Coded { count, code } => {
                @for _ in 0..*count { td.code { (code) } }
            }
        }
    }
}

/// Padding rows keep an empty number cell.
fn numbered_row(row: &FormRow) -> Markup {
    html! {
        tr class=[row.exempted.then_some("exempted")] {
            td.num {
                @if let Some(id) = row.student_id { (id) }
            }
            td.name { (row.name) }
            (row_cells(row))
            @if let Some(remark) = &row.remark {
                td.remark { (remark) }
            }
        }
    }
}

fn assessment(sheet: &AssessmentSheet) -> Markup {
    html! {
        (header_block(&sheet.header, true))
        h2.title { (sheet.title) }
        div.competency {
            strong { "الكفاءة الختامية: " }
            (sheet.competency)
        }
        div.criteria {
            @for (i, pair) in sheet.criteria.chunks(2).enumerate() {
                ol.criteria-col start=(i * 2 + 1) {
                    @for c in pair { li { (c) } }
                }
            }
        }
        table.grid {
            thead {
                tr {
                    th rowspan="2" { "الرقم" }
                    th rowspan="2" { "الاسم واللقب" }
                    @for g in &sheet.groups {
                        th colspan=(g.span()) { (g.label) }
                    }
                    th rowspan="2" { (sheet.remarks_label) }
                }
                tr {
                    @for g in &sheet.groups {
                        @for sub in &g.sub_columns { th.sub { (sub) } }
                    }
                }
            }
            tbody {
                @for row in &sheet.rows {
                    (numbered_row(row))
                }
            }
        }
        div.legend {
            @for item in &sheet.legend { span { (item) } }
        }
        div.signature-line { (sheet.signature_line) }
    }
}

fn signature_box(card: &PerformanceCard, signature: Option<&SignatureImage>, mode: RenderMode) -> Markup {
    html! {
        div.signature {
            span.label { (card.signature.label) }
            @match (signature, mode) {
                (Some(img), _) => {
                    img.signature-image src=(img.data_uri()) alt="signature";
                }
                (None, RenderMode::Preview) => {
                    div.signature-drop data-action="signature" { (SIGNATURE_PROMPT) }
                }
                (None, RenderMode::Print) => {}
            }
        }
    }
}

fn performance(card: &PerformanceCard, signature: Option<&SignatureImage>, mode: RenderMode) -> Markup {
    html! {
        (header_block(&card.header, true))
        h2.title { (card.title) }
        p.instructions { (card.instructions) }
        table.grid {
            thead {
                tr {
                    th rowspan="2" { "الرقم" }
                    th rowspan="2" { "الاسم واللقب" }
                    @for g in &card.groups {
                        th colspan=(g.span()) { (g.label) }
                    }
                    th rowspan="2" { (card.score_label) }
                    th rowspan="2" { (card.remarks_label) }
                }
                tr {
                    @for g in &card.groups {
                        @for sub in &g.sub_columns { th.sub { (sub) } }
                    }
                }
            }
            tbody {
                @for row in &card.rows {
                    (numbered_row(row))
                }
            }
        }
        (signature_box(card, signature, mode))
    }
}

fn attendance(register: &AttendanceRegister) -> Markup {
    let per_month = register.sessions.len() * register.slots.len();
    html! {
        (header_block(&register.header, false))
        h2.title { (register.title) }
        table.grid.attendance {
            thead {
                tr {
                    th rowspan="3" { "الرقم" }
                    th rowspan="3" { "الاسم واللقب" }
                    @for m in &register.months {
                        th colspan=(per_month) { (m) }
                    }
                }
                tr {
                    @for _ in &register.months {
                        @for s in &register.sessions {
                            th colspan=(register.slots.len()) { (s) }
                        }
                    }
                }
                tr {
                    @for _ in &register.months {
                        @for _ in &register.sessions {
                            @for slot in &register.slots { th.sub { (slot) } }
                        }
                    }
                }
            }
            tbody {
                @for row in &register.rows {
                    (numbered_row(row))
                }
            }
        }
        div.legend {
            @for entry in &register.legend {
                span { (entry.label) ": " (entry.code) }
            }
        }
    }
}

fn separator(sep: &SeparatorPage) -> Markup {
    html! {
        div.separator {
            h1 { (sep.term) }
            h2 { (sep.subtitle) }
            div.field { "الميدان: " (sep.field) }
            div.meta {
                div { "الأستاذ(ة): " (sep.teacher_name) }
                div { "المؤسسة: " (sep.school_name) }
                div { "السنة الدراسية: " (sep.academic_year) }
            }
        }
    }
}

const CSS: &str = r#"
* { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: 'Amiri', 'Traditional Arabic', serif; font-size: 10pt; background: #e5e7eb; }
body.print { background: #fff; }
.page { background: #fff; margin: 0 auto 12px; overflow: hidden; page-break-after: always; }
.page:last-child { page-break-after: auto; }
.header { display: flex; justify-content: space-between; margin-bottom: 4mm; font-weight: bold; }
.title { text-align: center; margin: 2mm 0; font-size: 14pt; }
.competency { margin-bottom: 1mm; }
.criteria { display: grid; grid-template-columns: 1fr 1fr; column-gap: 6mm; margin: 0 6mm 2mm; font-size: 9pt; }
.criteria-col { padding-right: 5mm; }
table.grid { width: 100%; border-collapse: collapse; table-layout: fixed; }
table.grid th, table.grid td { border: 1px solid #000; height: 5.2mm; text-align: center; font-size: 8.5pt; }
table.grid td.name { text-align: right; padding-right: 1mm; width: 45mm; }
table.grid td.num { width: 8mm; }
table.grid tr.exempted td { color: #6b7280; }
table.grid td.exempt { font-weight: bold; letter-spacing: 2px; background: #f3f4f6; }
table.attendance th, table.attendance td { font-size: 7pt; height: 4.6mm; }
.legend { display: flex; gap: 6mm; justify-content: center; margin-top: 2mm; font-size: 8.5pt; }
.signature-line, .signature { margin-top: 4mm; text-align: left; font-weight: bold; }
.signature-image { max-height: 18mm; display: block; margin-top: 1mm; margin-left: 0; }
.signature-drop { border: 1px dashed #9ca3af; padding: 4mm; color: #6b7280; cursor: pointer; display: inline-block; }
.separator { display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 250mm; gap: 8mm; text-align: center; }
.separator h1 { font-size: 36pt; }
.empty-state { padding: 40px; text-align: center; color: #6b7280; }
@page { size: A4; margin: 0; }
@page landscape { size: A4 landscape; }
.page.landscape { page: landscape; }
@media print {
  body { background: #fff; }
  .page { margin: 0; box-shadow: none; }
  .signature-drop { display: none; }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DocumentKind;
    use crate::layout::MarginField;
    use crate::render::render_pages;
    use crate::session::{Action, Session};

    fn session() -> Session {
        let mut s = Session::default();
        s.dispatch(Action::ImportText("أمين بن علي\nسارة قاسمي".to_string()))
            .expect("import");
        s.dispatch(Action::ToggleExempt(2)).expect("toggle");
        s
    }

    #[test]
    fn one_section_per_page_in_rtl() {
        let s = session();
        let pages = render_pages(&s);
        let out = print_document(&pages, None, RenderMode::Print).into_string();
        assert!(out.contains(r#"dir="rtl""#));
        assert_eq!(out.matches("<section class=\"page ").count(), 2);
        assert!(out.contains("سارة قاسمي"));
        assert!(out.contains(r#"colspan="20""#));
        assert!(out.contains("padding:10mm 10mm 10mm 10mm;"));
    }

    #[test]
    fn empty_selection_notice_only_in_preview() {
        let mut s = session();
        s.dispatch(Action::ToggleDocument(DocumentKind::Diagnostic))
            .expect("toggle");
        s.dispatch(Action::ToggleDocument(DocumentKind::Achievement))
            .expect("toggle");
        let pages = render_pages(&s);
        assert!(pages.is_empty());
        let preview = print_document(&pages, None, RenderMode::Preview).into_string();
        assert!(preview.contains(EMPTY_SELECTION));
        let print = print_document(&pages, None, RenderMode::Print).into_string();
        assert!(!print.contains(EMPTY_SELECTION));
    }

    #[test]
    fn signature_prompt_is_preview_only() {
        let mut s = session();
        s.dispatch(Action::ToggleDocument(DocumentKind::Performance))
            .expect("toggle");
        let pages = render_pages(&s);

        let preview = print_document(&pages, None, RenderMode::Preview).into_string();
        assert!(preview.contains(SIGNATURE_PROMPT));
        let print = print_document(&pages, None, RenderMode::Print).into_string();
        assert!(!print.contains(SIGNATURE_PROMPT));

        let img = SignatureImage::from_bytes("s.png".to_string(), b"\x89PNG\r\n\x1a\n".to_vec());
        let print = print_document(&pages, Some(&img), RenderMode::Print).into_string();
        assert!(print.contains("data:image/png;base64,"));
        assert!(!print.contains(SIGNATURE_PROMPT));
    }

    fn only(s: &mut Session, kind: DocumentKind) {
        for k in [DocumentKind::Diagnostic, DocumentKind::Achievement] {
            s.dispatch(Action::ToggleDocument(k)).expect("deselect");
        }
        s.dispatch(Action::ToggleDocument(kind)).expect("select");
    }

    #[test]
    fn padding_rows_have_an_empty_number_cell() {
        let mut s = session();
        only(&mut s, DocumentKind::Diagnostic);
        let out = print_document(&render_pages(&s), None, RenderMode::Print).into_string();

        assert!(out.contains(r#"<tr><td class="num">1</td><td class="name">أمين بن علي</td>"#));
        assert!(out.contains(r#"<tr class="exempted"><td class="num">2</td>"#));
        assert!(!out.contains(r#"<td class="num">3</td>"#));
        assert!(!out.contains(r#"<td class="num">40</td>"#));
        assert_eq!(out.matches(r#"<td class="num"></td>"#).count(), 38);
    }

    #[test]
    fn criteria_box_is_two_columns_of_two() {
        let mut s = session();
        only(&mut s, DocumentKind::Diagnostic);
        let out = print_document(&render_pages(&s), None, RenderMode::Print).into_string();
        assert!(out.contains(r#"<div class="criteria"><ol class="criteria-col" start="1"><li>"#));
        assert!(out.contains(r#"<ol class="criteria-col" start="3">"#));
        assert_eq!(out.matches(r#"class="criteria-col""#).count(), 2);
        assert_eq!(out.matches("<li>").count(), 4);
    }

    #[test]
    fn attendance_register_marks_exempt_days_and_skips_field() {
        let mut s = session();
        only(&mut s, DocumentKind::Attendance);
        let out = print_document(&render_pages(&s), None, RenderMode::Print).into_string();
        assert!(out.contains(r#"<tr class="exempted"><td class="num">2</td>"#));
        assert_eq!(out.matches(r#"<td class="code">X</td>"#).count(), 36);
        assert!(out.contains("المؤسسة: "));
        assert!(out.contains("السنة الدراسية: "));
        assert!(!out.contains("الميدان: "));
    }

    #[test]
    fn vertical_offset_shifts_the_whole_page() {
        let mut s = session();
        s.dispatch(Action::NudgeMargin(MarginField::VerticalOffset, -2))
            .expect("nudge");
        let out = print_document(&render_pages(&s), None, RenderMode::Print).into_string();
        assert_eq!(out.matches("margin-top:-10px;").count(), 2);
        assert!(!out.contains("translateY"));
    }

    #[test]
    fn landscape_pages_are_marked() {
        let mut s = session();
        s.dispatch(Action::ToggleDocument(DocumentKind::Attendance))
            .expect("toggle");
        let pages = render_pages(&s);
        let out = print_document(&pages, None, RenderMode::Print).into_string();
        assert!(out.contains(r#"class="page landscape""#));
        assert!(out.contains("width:297mm;"));
    }
}
