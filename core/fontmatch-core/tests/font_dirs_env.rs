use std::env;

use fontmatch_core::discovery::{system_font_roots, FONT_DIRS_ENV};
use fontmatch_core::{CatalogOptions, ErrorKind, FontLibrary, FontQuery};
use tempfile::tempdir;

// Single test so the environment is never mutated concurrently.
#[test]
fn font_dirs_override_replaces_platform_roots() {
    let tmp = tempdir().expect("tempdir");
    let font_dir = tmp.path().join("fonts");
    std::fs::create_dir_all(&font_dir).expect("mkdir");

    env::set_var(FONT_DIRS_ENV, font_dir.display().to_string());
    let roots = system_font_roots().expect("roots");
    assert_eq!(roots, vec![font_dir.clone()]);

    let library = FontLibrary::system(CatalogOptions::default()).expect("library");
    assert!(library.list_fonts().expect("list").is_empty());
    let err = library
        .match_fonts(&FontQuery::new().with_family("Arial"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoFontsFound);

    env::set_var(FONT_DIRS_ENV, tmp.path().join("missing").display().to_string());
    let err = system_font_roots().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BackendUnavailable);

    env::remove_var(FONT_DIRS_ENV);
}
