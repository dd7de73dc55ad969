use serde::{Deserialize, Serialize};

use crate::layout::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Diagnostic,
    Achievement,
    Performance,
    Attendance,
    Separator,
}

impl DocumentKind {
    /// Canonical print order.
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::Diagnostic,
        DocumentKind::Achievement,
        DocumentKind::Performance,
        DocumentKind::Attendance,
        DocumentKind::Separator,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Diagnostic => "diagnostic",
            DocumentKind::Achievement => "achievement",
            DocumentKind::Performance => "performance",
            DocumentKind::Attendance => "attendance",
            DocumentKind::Separator => "separator",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == raw)
    }

    pub fn title(self) -> &'static str {
        match self {
            DocumentKind::Diagnostic => "تقويم تشخيصي",
            DocumentKind::Achievement => "تقويم تحصيلي",
            DocumentKind::Performance => "بطاقة تقييم الأداء",
            DocumentKind::Attendance => "سجل المناداة",
            DocumentKind::Separator => "ورقة فاصلة",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DocumentKind::Diagnostic => "يستخدم في بداية الفترة لتقييم المكتسبات القبلية",
            DocumentKind::Achievement => "يستخدم في نهاية الفترة لتقييم النتائج الختامية",
            DocumentKind::Performance => "متابعة مستمرة لأداء التلاميذ خلال الفصل",
            DocumentKind::Attendance => "متابعة الحضور والغياب بشكل أفقي مفصل",
            DocumentKind::Separator => "ورقة غلاف للفصل الدراسي الحالي",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            DocumentKind::Diagnostic => "ClipboardList",
            DocumentKind::Achievement => "Trophy",
            DocumentKind::Performance => "Activity",
            DocumentKind::Attendance => "CalendarDays",
            DocumentKind::Separator => "Layers",
        }
    }

    pub fn orientation(self) -> Orientation {
        match self {
            DocumentKind::Attendance => Orientation::Landscape,
            _ => Orientation::Portrait,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEntry {
    pub id: DocumentKind,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub selected: bool,
    pub visible: bool,
}

impl DocumentEntry {
    fn new(kind: DocumentKind, selected: bool) -> Self {
        Self {
            id: kind,
            title: kind.title(),
            description: kind.description(),
            icon: kind.icon(),
            selected,
            visible: true,
        }
    }

    pub fn printable(&self) -> bool {
        self.selected && self.visible
    }
}

/// Always holds every kind exactly once, in [`DocumentKind::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentCatalog {
    entries: Vec<DocumentEntry>,
}

impl Default for DocumentCatalog {
    fn default() -> Self {
        Self {
            entries: DocumentKind::ALL
                .into_iter()
                .map(|kind| {
                    let selected =
                        matches!(kind, DocumentKind::Diagnostic | DocumentKind::Achievement);
                    DocumentEntry::new(kind, selected)
                })
                .collect(),
        }
    }
}

impl DocumentCatalog {
    pub fn entries(&self) -> &[DocumentEntry] {
        &self.entries
    }

    pub fn entry(&self, kind: DocumentKind) -> Option<&DocumentEntry> {
        self.entries.iter().find(|e| e.id == kind)
    }

    fn entry_mut(&mut self, kind: DocumentKind) -> Option<&mut DocumentEntry> {
        self.entries.iter_mut().find(|e| e.id == kind)
    }

    pub fn toggle_selected(&mut self, kind: DocumentKind) -> bool {
        match self.entry_mut(kind) {
            Some(e) => {
                e.selected = !e.selected;
                e.selected
            }
            None => false,
        }
    }

    pub fn toggle_visible(&mut self, kind: DocumentKind) -> bool {
        match self.entry_mut(kind) {
            Some(e) => {
                e.visible = !e.visible;
                e.visible
            }
            None => false,
        }
    }

    /// Kinds that make it into preview and print, in canonical order.
    pub fn print_order(&self) -> Vec<DocumentKind> {
        self.entries
            .iter()
            .filter(|e| e.printable())
            .map(|e| e.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_the_two_assessments() {
        let catalog = DocumentCatalog::default();
        assert_eq!(
            catalog.print_order(),
            vec![DocumentKind::Diagnostic, DocumentKind::Achievement]
        );
        assert_eq!(
            catalog.entries().iter().map(|e| e.id).collect::<Vec<_>>(),
            DocumentKind::ALL.to_vec()
        );
    }

    #[test]
    fn deselecting_removes_exactly_one_page_and_keeps_order() {
        let mut catalog = DocumentCatalog::default();
        for kind in [
            DocumentKind::Performance,
            DocumentKind::Attendance,
            DocumentKind::Separator,
        ] {
            catalog.toggle_selected(kind);
        }
        assert_eq!(catalog.print_order(), DocumentKind::ALL.to_vec());

        assert!(!catalog.toggle_selected(DocumentKind::Performance));
        assert_eq!(
            catalog.print_order(),
            vec![
                DocumentKind::Diagnostic,
                DocumentKind::Achievement,
                DocumentKind::Attendance,
                DocumentKind::Separator,
            ]
        );
    }

    #[test]
    fn selection_order_does_not_change_print_order() {
        let mut catalog = DocumentCatalog::default();
        catalog.toggle_selected(DocumentKind::Diagnostic);
        catalog.toggle_selected(DocumentKind::Separator);
        catalog.toggle_selected(DocumentKind::Diagnostic);
        assert_eq!(
            catalog.print_order(),
            vec![
                DocumentKind::Diagnostic,
                DocumentKind::Achievement,
                DocumentKind::Separator,
            ]
        );
    }

    #[test]
    fn hidden_pages_are_not_printed_even_when_selected() {
        let mut catalog = DocumentCatalog::default();
        assert!(!catalog.toggle_visible(DocumentKind::Achievement));
        assert!(catalog
            .entry(DocumentKind::Achievement)
            .is_some_and(|e| e.selected));
        assert_eq!(catalog.print_order(), vec![DocumentKind::Diagnostic]);
    }

    #[test]
    fn only_attendance_is_landscape() {
        for kind in DocumentKind::ALL {
            let expected = if kind == DocumentKind::Attendance {
                Orientation::Landscape
            } else {
                Orientation::Portrait
            };
            assert_eq!(kind.orientation(), expected);
            assert_eq!(DocumentKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(DocumentKind::parse("cover"), None);
    }
}
