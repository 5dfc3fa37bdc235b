//! Font queries: exact filtering and face scoring (made by FontLab https://www.fontlab.com/)

use serde::{Deserialize, Serialize};

use crate::font::FontDescriptor;

/// Widest weight difference that still earns any weight score.
const WEIGHT_RANGE: f32 = 900.0;
/// Stretch range on the ordinal 1-9 width-class scale.
const ORDINAL_STRETCH_RANGE: f32 = 8.0;
/// Stretch range on the percentage scale.
const PERCENT_STRETCH_RANGE: f32 = 150.0;
/// Largest stretch value still read as an ordinal width class.
const ORDINAL_STRETCH_MAX: i32 = 9;

/// Partial matching criteria; `None` means "don't care".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontQuery {
    pub family: Option<String>,
    pub style: Option<String>,
    pub weight: Option<i32>,
    pub stretch: Option<i32>,
    pub italic: Option<bool>,
}

impl FontQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_stretch(mut self, stretch: i32) -> Self {
        self.stretch = Some(stretch);
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    /// Check whether `font` satisfies every constrained field exactly.
    ///
    /// Family and style compare case-insensitively.
    pub fn matches(&self, font: &FontDescriptor) -> bool {
        if let Some(family) = &self.family {
            if !eq_ignore_case(&font.family, family) {
                return false;
            }
        }
        self.matches_face(font)
    }

    /// Like [`FontQuery::matches`] but ignoring the family.
    pub(crate) fn matches_face(&self, font: &FontDescriptor) -> bool {
        if let Some(style) = &self.style {
            if !eq_ignore_case(&font.style, style) {
                return false;
            }
        }
        if self.weight.is_some_and(|w| w != font.weight) {
            return false;
        }
        if self.stretch.is_some_and(|s| s != font.stretch) {
            return false;
        }
        if self.italic.is_some_and(|i| i != font.italic) {
            return false;
        }
        true
    }
}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Score in `[0, 1]` of how well `font` fits the face attributes of `query`.
///
/// Each constrained attribute contributes equally; the family is ignored.
/// A query that constrains nothing scores 0.0.
pub fn face_score(font: &FontDescriptor, query: &FontQuery) -> f32 {
    let mut total = 0.0;
    let mut count = 0u32;

    if let Some(style) = &query.style {
        count += 1;
        if eq_ignore_case(&font.style, style) {
            total += 1.0;
        }
    }
    if let Some(weight) = query.weight {
        count += 1;
        total += linear_falloff(font.weight, weight, WEIGHT_RANGE);
    }
    if let Some(stretch) = query.stretch {
        count += 1;
        let range = if font.stretch <= ORDINAL_STRETCH_MAX && stretch <= ORDINAL_STRETCH_MAX {
            ORDINAL_STRETCH_RANGE
        } else {
            PERCENT_STRETCH_RANGE
        };
        total += linear_falloff(font.stretch, stretch, range);
    }
    if let Some(italic) = query.italic {
        count += 1;
        if font.italic == italic {
            total += 1.0;
        }
    }

    if count == 0 {
        return 0.0;
    }
    total / count as f32
}

fn linear_falloff(actual: i32, wanted: i32, range: f32) -> f32 {
    let diff = (i64::from(actual) - i64::from(wanted)).abs() as f32;
    1.0 - (diff / range).min(1.0)
}
