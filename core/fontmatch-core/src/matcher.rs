//! Best-match selection over a catalog snapshot (made by FontLab https://www.fontlab.com/)
//!
//! Matching runs in two stages. The family is resolved first: a
//! case-insensitive exact name wins immediately, otherwise the family with the
//! highest [`family_similarity`] is kept. The face is then picked among that
//! family's faces: a face satisfying every constraint exactly short-circuits
//! with a face score of 1.0, otherwise every face is scored with
//! [`face_score`] under a fully defaulted query.
//!
//! Ties always go to the entry seen first, so results depend on catalog order
//! and nothing else.

use std::collections::HashSet;

use log::debug;

use crate::error::{Error, Result};
use crate::font::{FontDescriptor, FontMatch};
use crate::query::{eq_ignore_case, face_score, FontQuery};
use crate::similarity::{family_similarity, normalize};

/// Style assumed when the query leaves it open.
pub const DEFAULT_STYLE: &str = "Regular";
/// Weight assumed by the scored fallback when the query leaves it open.
pub const DEFAULT_WEIGHT: i32 = 400;
/// Stretch assumed by the scored fallback when the query leaves it open.
pub const DEFAULT_STRETCH: i32 = 100;

/// Resolve `query` to the closest face in `catalog`.
///
/// Fails with [`Error::InvalidArgument`] when the query has no family and
/// with [`Error::NoFontsFound`] when no catalog family resembles it at all.
pub fn match_font(catalog: &[FontDescriptor], query: &FontQuery) -> Result<FontMatch> {
    let requested = requested_family(query)?;
    if catalog.is_empty() {
        return Err(Error::NoFontsFound);
    }

    let (family_key, family_score) =
        resolve_family(catalog, requested).ok_or(Error::NoFontsFound)?;
    let faces: Vec<&FontDescriptor> = catalog
        .iter()
        .filter(|font| !font.family.is_empty() && normalize(&font.family) == family_key)
        .collect();
    debug!(
        "family {requested:?} resolved to key {family_key:?} (score {family_score:.3}, {} faces)",
        faces.len()
    );

    let mut query = query.clone();
    query
        .style
        .get_or_insert_with(|| DEFAULT_STYLE.to_string());

    if let Some(font) = faces.iter().find(|font| query.matches_face(font)) {
        debug!("exact face match: {}", font.id);
        return Ok(FontMatch {
            font: (*font).clone(),
            family_score,
            face_score: 1.0,
        });
    }

    query.weight.get_or_insert(DEFAULT_WEIGHT);
    query.stretch.get_or_insert(DEFAULT_STRETCH);
    query.italic.get_or_insert(false);

    let mut faces = faces.into_iter();
    let first = faces.next().ok_or(Error::NoFontsFound)?;
    let mut best = (first, face_score(first, &query));
    for font in faces {
        let score = face_score(font, &query);
        if score > best.1 {
            best = (font, score);
        }
    }
    debug!("scored face match: {} ({:.3})", best.0.id, best.1);

    Ok(FontMatch {
        font: best.0.clone(),
        family_score,
        face_score: best.1,
    })
}

/// Validate that the query names a family.
pub(crate) fn requested_family(query: &FontQuery) -> Result<&str> {
    match query.family.as_deref() {
        Some(family) if !family.trim().is_empty() => Ok(family),
        Some(_) => Err(Error::InvalidArgument(
            "FontQuery.family must not be blank".to_string(),
        )),
        None => Err(Error::InvalidArgument(
            "FontQuery.family must be set".to_string(),
        )),
    }
}

/// Pick the family closest to `requested`, returning its normalized key and score.
///
/// Only a positive similarity can win; families whose key is empty never do.
fn resolve_family(catalog: &[FontDescriptor], requested: &str) -> Option<(String, f32)> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut best: Option<(String, f32)> = None;
    let mut best_score = 0.0;

    for font in catalog {
        let family = font.family.as_str();
        if family.is_empty() || !seen.insert(family) {
            continue;
        }
        let key = normalize(family);
        if key.is_empty() {
            continue;
        }
        if eq_ignore_case(family, requested) {
            return Some((key, 1.0));
        }

        let score = family_similarity(family, requested);
        if score > best_score {
            best_score = score;
            best = Some((key, score));
        }
    }

    best
}
