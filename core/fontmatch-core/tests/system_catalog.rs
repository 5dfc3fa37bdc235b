use fontmatch_core::{CatalogOptions, FontBackend, FontLibrary, FontQuery};

fn system_library() -> Option<FontLibrary<fontmatch_core::DirectoryBackend>> {
    FontLibrary::system(CatalogOptions::default()).ok()
}

#[test]
fn every_listed_id_points_at_a_loadable_file() {
    let library = match system_library() {
        Some(library) => library,
        None => return, // skip on hosts without font directories
    };
    let fonts = library.list_fonts().expect("list fonts");
    let first = match fonts.first() {
        Some(font) => font,
        None => return,
    };

    assert!(!first.family.is_empty());
    assert!(first.id.as_str().contains('#'));
    let bytes = library.load_font_data(&first.id).expect("load font data");
    assert!(!bytes.is_empty());
}

#[test]
fn installed_face_matches_itself_exactly() {
    let library = match system_library() {
        Some(library) => library,
        None => return, // skip on hosts without font directories
    };
    let fonts = library.list_fonts().expect("list fonts");
    let target = match fonts.first() {
        Some(font) => font.clone(),
        None => return,
    };

    let query = FontQuery::new()
        .with_family(target.family.to_ascii_uppercase())
        .with_style(target.style.clone())
        .with_weight(target.weight)
        .with_stretch(target.stretch)
        .with_italic(target.italic);
    let found = library.match_fonts(&query).expect("match");

    assert_eq!(found.family_score, 1.0);
    assert_eq!(found.face_score, 1.0);
    assert_eq!(found.font.style.to_lowercase(), target.style.to_lowercase());
    assert_eq!(found.font.weight, target.weight);
    assert_eq!(found.font.stretch, target.stretch);
    assert_eq!(found.font.italic, target.italic);
}

#[test]
fn refresh_keeps_enumeration_order_stable() {
    let library = match system_library() {
        Some(library) => library,
        None => return, // skip on hosts without font directories
    };
    let before = library.list_fonts().expect("list fonts");
    library.refresh_fonts().expect("refresh");
    let after = library.list_fonts().expect("list fonts");

    let ids = |fonts: &[fontmatch_core::FontDescriptor]| {
        fonts.iter().map(|f| f.id.clone()).collect::<Vec<_>>()
    };
    assert_eq!(ids(&before), ids(&after));
    assert_eq!(
        library.cache().backend().enumerate().expect("enumerate").len(),
        after.len()
    );
}

#[test]
fn extracted_attributes_agree_with_style_names() {
    let library = match system_library() {
        Some(library) => library,
        None => return, // skip on hosts without font directories
    };
    let fonts = library.list_fonts().expect("list fonts");

    for font in fonts.iter() {
        assert!(
            (0..=1000).contains(&font.weight),
            "{}: weight {}",
            font.id,
            font.weight
        );
        assert!(
            (50..=200).contains(&font.stretch),
            "{}: stretch {}",
            font.id,
            font.stretch
        );

        let style = font.style.to_lowercase();
        if style == "bold" {
            assert!(font.weight >= 600, "{}: bold at weight {}", font.id, font.weight);
        }
        if style.contains("italic") || style.contains("oblique") {
            assert!(font.italic, "{}: {} is not flagged italic", font.id, font.style);
        }
    }
}
