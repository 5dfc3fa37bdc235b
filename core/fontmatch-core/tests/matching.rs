use std::sync::Arc;
use std::thread;

use fontmatch_core::{match_font, ErrorKind, FontDescriptor, FontId, FontQuery};

fn face(family: &str, style: &str, weight: i32, stretch: i32, italic: bool) -> FontDescriptor {
    FontDescriptor {
        id: FontId::new(format!("/fonts/{family}.ttc"), weight as u32),
        family: family.to_string(),
        style: style.to_string(),
        weight,
        stretch,
        italic,
    }
}

fn arial() -> Vec<FontDescriptor> {
    vec![
        face("Arial", "Regular", 400, 100, false),
        face("Arial", "Bold", 700, 100, false),
    ]
}

#[test]
fn weight_only_query_falls_back_to_scoring() {
    let query = FontQuery::new().with_family("arial").with_weight(700);
    let found = match_font(&arial(), &query).expect("match");

    assert_eq!(found.family_score, 1.0);
    // No face is both Regular and 700, so every face is scored against
    // Regular/700/100/upright. Regular keeps three of four attributes.
    assert_eq!(found.font.style, "Regular");
    let expected = (1.0 + (1.0 - 300.0 / 900.0) + 1.0 + 1.0) / 4.0;
    assert!((found.face_score - expected).abs() < 1e-6);
}

#[test]
fn weight_and_style_query_hits_bold_exactly() {
    let query = FontQuery::new()
        .with_family("Arial")
        .with_style("bold")
        .with_weight(700);
    let found = match_font(&arial(), &query).expect("match");

    assert_eq!(found.font.style, "Bold");
    assert_eq!(found.face_score, 1.0);
}

#[test]
fn typo_in_family_still_resolves() {
    let query = FontQuery::new().with_family("Ariel");
    let found = match_font(&arial(), &query).expect("match");

    assert_eq!(found.font.family, "Arial");
    assert!((found.family_score - 0.8).abs() < 1e-6);
    assert_eq!(found.font.style, "Regular");
}

#[test]
fn closest_family_wins_over_earlier_ones() {
    let mut catalog = vec![face("Courier New", "Regular", 400, 100, false)];
    catalog.extend(arial());
    catalog.push(face("Ariax", "Regular", 400, 100, false));

    let found = match_font(&catalog, &FontQuery::new().with_family("Arail")).expect("match");
    // "arail" is two edits from "arial" but three from "ariax".
    assert_eq!(found.font.family, "Arial");
    assert!((found.family_score - 0.6).abs() < 1e-6);
}

#[test]
fn punctuation_in_family_is_ignored() {
    let catalog = vec![
        face("Noto Sans", "Regular", 400, 100, false),
        face("Noto Serif", "Regular", 400, 100, false),
    ];
    let found = match_font(&catalog, &FontQuery::new().with_family("noto-sans")).expect("match");
    assert_eq!(found.font.family, "Noto Sans");
    assert_eq!(found.family_score, 1.0);
}

#[test]
fn family_faces_are_grouped_by_normalized_name() {
    let catalog = vec![
        face("Fira Code", "Regular", 400, 100, false),
        face("FiraCode", "Bold", 700, 100, false),
    ];
    let query = FontQuery::new().with_family("Fira Code").with_style("Bold");
    let found = match_font(&catalog, &query).expect("match");
    assert_eq!(found.font.family, "FiraCode");
    assert_eq!(found.face_score, 1.0);
}

#[test]
fn ordinal_stretch_catalog_scores_on_ordinal_range() {
    let catalog = vec![
        face("Roboto", "Condensed", 400, 3, false),
        face("Roboto", "Expanded", 400, 7, false),
    ];
    let query = FontQuery::new()
        .with_family("Roboto")
        .with_style("Regular")
        .with_stretch(4);
    let found = match_font(&catalog, &query).expect("match");
    assert_eq!(found.font.style, "Condensed");
    let expected = (0.0 + 1.0 + (1.0 - 1.0 / 8.0) + 1.0) / 4.0;
    assert!((found.face_score - expected).abs() < 1e-6);
}

#[test]
fn italic_preference_picks_italic_face() {
    let catalog = vec![
        face("Inter", "Regular", 400, 100, false),
        face("Inter", "Italic", 400, 100, true),
    ];
    let query = FontQuery::new().with_family("Inter").with_italic(true);
    let found = match_font(&catalog, &query).expect("match");
    // Regular/italic does not exist; Italic scores 3 of 4, Regular 3 of 4,
    // and the first face seen keeps the tie.
    assert_eq!(found.font.style, "Regular");

    let query = query.with_style("Italic");
    let found = match_font(&catalog, &query).expect("match");
    assert_eq!(found.font.style, "Italic");
    assert_eq!(found.face_score, 1.0);
}

#[test]
fn empty_catalog_fails_with_no_fonts_found() {
    let err = match_font(&[], &FontQuery::new().with_family("Arial")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoFontsFound);
}

#[test]
fn missing_family_fails_with_invalid_argument() {
    let err = match_font(&arial(), &FontQuery::new().with_style("Bold")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn repeated_matches_are_identical() {
    let catalog = arial();
    let query = FontQuery::new().with_family("Arl").with_weight(550);
    let first = match_font(&catalog, &query).expect("first");
    let second = match_font(&catalog, &query).expect("second");
    assert_eq!(first, second);
    assert_eq!(first.face_score.to_bits(), second.face_score.to_bits());
    assert_eq!(first.family_score.to_bits(), second.family_score.to_bits());
}

#[test]
fn concurrent_matches_share_one_snapshot() {
    let snapshot: Arc<[FontDescriptor]> = arial().into();
    let expected = match_font(&snapshot, &FontQuery::new().with_family("Arial").with_weight(700))
        .expect("baseline");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let snapshot = Arc::clone(&snapshot);
            thread::spawn(move || {
                match_font(&snapshot, &FontQuery::new().with_family("Arial").with_weight(700))
            })
        })
        .collect();

    for handle in handles {
        let found = handle.join().expect("thread").expect("match");
        assert_eq!(found, expected);
    }
}
