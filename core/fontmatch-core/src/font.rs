//! Font identifiers, descriptors and match results (made by FontLab https://www.fontlab.com/)

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Opaque handle for one installed face, encoded as `<file-path>#<face-index>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontId(String);

impl FontId {
    /// Build the id for face `face_index` inside the file at `path`.
    pub fn new(path: impl AsRef<Path>, face_index: u32) -> Self {
        Self(format!("{}#{face_index}", path.as_ref().display()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into file path and face index.
    ///
    /// The path ends at the last `#`. An index that does not parse as a
    /// non-negative integer, or a missing `#`, yields face 0.
    pub fn parts(&self) -> (&str, u32) {
        match self.0.rfind('#') {
            Some(pos) => {
                let index = self.0[pos + 1..].parse().unwrap_or(0);
                (&self.0[..pos], index)
            }
            None => (&self.0, 0),
        }
    }

    pub fn path(&self) -> &str {
        self.parts().0
    }

    pub fn face_index(&self) -> u32 {
        self.parts().1
    }
}

impl From<String> for FontId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for FontId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for FontId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One concrete installed face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontDescriptor {
    pub id: FontId,
    pub family: String,
    pub style: String,
    pub weight: i32,
    pub stretch: i32,
    pub italic: bool,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            id: FontId::default(),
            family: String::new(),
            style: String::new(),
            weight: 400,
            stretch: 100,
            italic: false,
        }
    }
}

/// The face picked for a query, with how well family and face fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontMatch {
    pub font: FontDescriptor,
    pub family_score: f32,
    pub face_score: f32,
}
