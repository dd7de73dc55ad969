//! Competency statements and evaluation criteria for primary-school physical
//! education, keyed by grade level and term.
//!
//! The table is static. Unknown keys resolve to a blank record so forms still
//! render, with empty cells where the text would go.

use serde::Serialize;

pub const LEVELS: [&str; 5] = ["أولى", "ثانية", "ثالثة", "رابعة", "خامسة"];
pub const TERMS: [&str; 3] = ["الفصل الأول", "الفصل الثاني", "الفصل الثالث"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PedagogicalData {
    pub kafaa: String,
    /// Positional: criterion 1..4.
    pub criteria: [String; 4],
}

struct Entry {
    level: &'static str,
    term: &'static str,
    kafaa: &'static str,
    criteria: [&'static str; 4],
}

const FIELDS: [(&str, &str); 3] = [
    ("الفصل الأول", "الحركات القاعدية"),
    ("الفصل الثاني", "الهيكلة والبناء"),
    ("الفصل الثالث", "الأنشطة الجماعية والتنافسية"),
];

static TABLE: &[Entry] = &[
    Entry {
        level: "أولى",
        term: "الفصل الأول",
        kafaa: "يتحكم في وضعيات جسمه وتنقلاته في الفضاء القريب في وضعيات لعب بسيطة",
        criteria: [
            "يتخذ وضعيات الوقوف والجلوس والانبطاح عند الإشارة",
            "يتنقل أماما وخلفا وجانبا دون اصطدام",
            "يحترم التعليمات وإشارات الانطلاق والتوقف",
            "يشارك زملاءه في اللعب دون عنف",
        ],
    },
    Entry {
        level: "أولى",
        term: "الفصل الثاني",
        kafaa: "ينجز حركات الجري والقفز والرمي بتوافق بسيط في وضعيات لعب فردية",
        criteria: [
            "يجري بتوافق الذراعين والرجلين",
            "يقفز بالارتقاء على رجل واحدة ويهبط متوازنا",
            "يرمي أداة خفيفة بيد واحدة نحو هدف قريب",
            "يتحكم في سرعته ويتوقف عند الإشارة",
        ],
    },
    Entry {
        level: "أولى",
        term: "الفصل الثالث",
        kafaa: "يشارك في ألعاب جماعية بسيطة ويحترم قواعدها لتحقيق هدف مشترك",
        criteria: [
            "يحترم قواعد اللعبة",
            "يأخذ مكانه الصحيح في فضاء اللعب",
            "يتواصل مع أفراد فريقه",
            "يتقبل الفوز والخسارة",
        ],
    },
    Entry {
        level: "ثانية",
        term: "الفصل الأول",
        kafaa: "يتحكم في توازنه أثناء التنقل والتوقف ويكيف حركاته مع الفضاء والأدوات",
        criteria: [
            "يحافظ على توازنه الثابت على رجل واحدة",
            "يتنقل فوق خط أو مقعد دون سقوط",
            "يغير اتجاه تنقله عند الإشارة",
            "يستعمل الأدوات بأمان",
        ],
    },
    Entry {
        level: "ثانية",
        term: "الفصل الثاني",
        kafaa: "يربط بين الجري والقفز والرمي في تسلسل حركي منسجم",
        criteria: [
            "يربط الجري بالقفز دون توقف",
            "يقفز فوق حاجز منخفض بارتقاء صحيح",
            "يرمي الكرة ويستقبلها بيدين",
            "ينجز التسلسل في الوقت المحدد",
        ],
    },
    Entry {
        level: "ثانية",
        term: "الفصل الثالث",
        kafaa: "يتعاون مع زملائه في ألعاب جماعية منظمة ويحترم دوره داخل الفريق",
        criteria: [
            "يحترم دوره في الفريق",
            "يمرر الكرة لزميله في الوقت المناسب",
            "يحترم الخصم والحكم",
            "يساهم في تحقيق هدف الفريق",
        ],
    },
    Entry {
        level: "ثالثة",
        term: "الفصل الأول",
        kafaa: "ينظم تنقلاته في الفضاء ويتحكم في الإيقاع والسرعة في وضعيات متنوعة",
        criteria: [
            "يتنقل وفق إيقاع محدد",
            "ينوع سرعة الجري حسب الإشارة",
            "يحافظ على المسافة مع زملائه",
            "يتحكم في التوقف المفاجئ",
        ],
    },
    Entry {
        level: "ثالثة",
        term: "الفصل الثاني",
        kafaa: "ينجز أعمالا حركية مركبة بدقة ويكيفها مع متطلبات الوضعية",
        criteria: [
            "يقفز طولا بارتقاء رجل واحدة",
            "يرمي بدقة نحو هدف على مسافة متوسطة",
            "ينجز دحرجة أمامية صحيحة",
            "يربط بين الحركات دون توقف",
        ],
    },
    Entry {
        level: "ثالثة",
        term: "الفصل الثالث",
        kafaa: "يوظف مهاراته الحركية في ألعاب جماعية تنافسية ويحترم قواعد اللعب النظيف",
        criteria: [
            "يطبق قواعد اللعبة التنافسية",
            "يتموقع للاستقبال والتمرير",
            "يدافع عن مرماه بالتعاون مع زملائه",
            "يتحلى بالروح الرياضية",
        ],
    },
    Entry {
        level: "رابعة",
        term: "الفصل الأول",
        kafaa: "يتحكم في جسمه في وضعيات توازن وتنقل معقدة ويقيم أداءه",
        criteria: [
            "يحافظ على توازنه في وضعيات غير مألوفة",
            "يتنقل بأشكال مختلفة في مسار معقد",
            "ينسق بين أجزاء جسمه أثناء الحركة",
            "يقيم أداءه ويصحح أخطاءه",
        ],
    },
    Entry {
        level: "رابعة",
        term: "الفصل الثاني",
        kafaa: "ينجز سلسلة حركية جمبازية بسيطة بانسجام وأمان",
        criteria: [
            "ينجز الدحرجة الأمامية والخلفية",
            "يحافظ على وضعية الشمعة",
            "يربط عناصر السلسلة بانسجام",
            "يحترم شروط الأمان",
        ],
    },
    Entry {
        level: "رابعة",
        term: "الفصل الثالث",
        kafaa: "يشارك بفعالية في لعبة جماعية منظمة ويبني خطة بسيطة مع فريقه",
        criteria: [
            "يحترم الخطة المتفق عليها",
            "يتحرك بدون كرة لخلق فرص",
            "ينسق مع زملائه في الدفاع والهجوم",
            "يتقبل قرارات الحكم",
        ],
    },
    Entry {
        level: "خامسة",
        term: "الفصل الأول",
        kafaa: "يوظف قدراته البدنية في وضعيات تتطلب السرعة والمداومة والتحكم",
        criteria: [
            "يجري مسافة محددة بإيقاع منتظم",
            "يستجيب بسرعة لإشارات الانطلاق",
            "يحافظ على مجهوده طيلة النشاط",
            "يسترجع أنفاسه بطريقة صحيحة",
        ],
    },
    Entry {
        level: "خامسة",
        term: "الفصل الثاني",
        kafaa: "ينجز أنشطة ألعاب القوى بتقنية صحيحة ويسعى لتحسين نتائجه",
        criteria: [
            "يطبق تقنية الانطلاق في السرعة",
            "يقفز طولا بتقنية صحيحة",
            "يرمي الجلة بحركة دفع سليمة",
            "يقارن نتائجه ويسعى لتحسينها",
        ],
    },
    Entry {
        level: "خامسة",
        term: "الفصل الثالث",
        kafaa: "يتحمل مسؤوليته داخل الفريق في مقابلة رياضية ويحترم قوانينها",
        criteria: [
            "يطبق قوانين الرياضة الجماعية",
            "يختار الحل المناسب في وضعية اللعب",
            "يساند زملاءه ويوجههم",
            "يحترم المنافس والحكم والجمهور",
        ],
    },
];

pub fn lookup(level: &str, term: &str) -> PedagogicalData {
    TABLE
        .iter()
        .find(|e| e.level == level && e.term == term)
        .map(|e| PedagogicalData {
            kafaa: e.kafaa.to_string(),
            criteria: e.criteria.map(str::to_string),
        })
        .unwrap_or_default()
}

/// Domain label printed in the "الميدان" slot; empty for unknown terms.
pub fn field_label(term: &str) -> &'static str {
    FIELDS
        .iter()
        .find(|(t, _)| *t == term)
        .map(|(_, label)| *label)
        .unwrap_or("")
}

pub fn levels() -> &'static [&'static str] {
    &LEVELS
}

pub fn terms() -> &'static [&'static str] {
    &TERMS
}
