use serde::{Deserialize, Serialize};

pub const A4_SHORT_MM: u32 = 210;
pub const A4_LONG_MM: u32 = 297;
pub const MARGIN_STEP_MM: u32 = 1;
pub const OFFSET_STEP_PX: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSize {
    pub width_mm: u32,
    pub height_mm: u32,
}

impl Orientation {
    pub fn page_size(self) -> PageSize {
        match self {
            Orientation::Portrait => PageSize {
                width_mm: A4_SHORT_MM,
                height_mm: A4_LONG_MM,
            },
            Orientation::Landscape => PageSize {
                width_mm: A4_LONG_MM,
                height_mm: A4_SHORT_MM,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarginField {
    Top,
    Bottom,
    Left,
    Right,
    VerticalOffset,
}

impl MarginField {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "top" => Some(MarginField::Top),
            "bottom" => Some(MarginField::Bottom),
            "left" => Some(MarginField::Left),
            "right" => Some(MarginField::Right),
            "verticalOffset" => Some(MarginField::VerticalOffset),
            _ => None,
        }
    }
}

/// Print margins in millimetres plus a global vertical shift in pixels,
/// applied identically to every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginSettings {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
    pub vertical_offset: i32,
}

impl Default for MarginSettings {
    fn default() -> Self {
        Self {
            top: 10,
            bottom: 10,
            left: 10,
            right: 10,
            vertical_offset: 0,
        }
    }
}

impl MarginSettings {
    /// Moves `field` by `steps` increments. Millimetre fields stop at 0; the
    /// offset may go negative.
    pub fn nudge(&mut self, field: MarginField, steps: i32) {
        let mm = |v: &mut u32| {
            *v = v.saturating_add_signed(steps.saturating_mul(MARGIN_STEP_MM as i32));
        };
        match field {
            MarginField::Top => mm(&mut self.top),
            MarginField::Bottom => mm(&mut self.bottom),
            MarginField::Left => mm(&mut self.left),
            MarginField::Right => mm(&mut self.right),
            MarginField::VerticalOffset => {
                self.vertical_offset = self
                    .vertical_offset
                    .saturating_add(steps.saturating_mul(OFFSET_STEP_PX));
            }
        }
    }
}
