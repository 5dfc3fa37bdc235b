//! fontmatch-core: the forgiving matchmaker of installed fonts
//!
//! Ask for "Ariel Bold" and you get Arial Bold. This library resolves an
//! abstract font request (family, style, weight, stretch, italic) to the
//! single closest installed face, shrugging off typos, odd punctuation and
//! half-specified criteria instead of failing on the first mismatch.
//!
//! ## How a Match Happens
//!
//! **Family first**: every installed family name is compared to the request
//! on a normalized key (lower-case, letters and digits only). A
//! case-insensitive exact name wins on the spot; otherwise the closest name
//! by edit distance takes the crown.
//!
//! **Face second**: inside the winning family, a face that meets every
//! requested attribute exactly is returned straight away. Failing that,
//! each face is scored on style, weight, stretch and italic, and the best
//! average wins.
//!
//! ## A Sample Conversation
//!
//! ```rust
//! use fontmatch_core::{match_font, FontDescriptor, FontQuery};
//!
//! let catalog = vec![
//!     FontDescriptor {
//!         family: "Arial".into(),
//!         style: "Regular".into(),
//!         ..FontDescriptor::default()
//!     },
//!     FontDescriptor {
//!         family: "Arial".into(),
//!         style: "Bold".into(),
//!         weight: 700,
//!         ..FontDescriptor::default()
//!     },
//! ];
//!
//! let query = FontQuery::new().with_family("Ariel").with_style("Bold");
//! let found = match_font(&catalog, &query)?;
//!
//! assert_eq!(found.font.style, "Bold");
//! assert!(found.family_score < 1.0);
//! # Ok::<(), fontmatch_core::Error>(())
//! ```
//!
//! ## The Cast of Characters
//!
//! - [`FontQuery`]: what the caller is hoping for
//! - [`FontDescriptor`]: one installed face and its attributes
//! - [`FontMatch`]: the chosen face, with family and face scores
//! - [`FontBackend`]: where descriptors and font bytes come from
//! - [`FontLibrary`]: cached catalog plus the list/match/load surface
//!
//! The matcher itself is a pure function over a borrowed catalog slice, so
//! it is safe to call from many threads over one shared snapshot.
//!
//! ---
//!
//! Crafted with care at FontLab https://www.fontlab.com/

pub mod cache;
pub mod catalog;
pub mod discovery;
pub mod error;
pub mod font;
pub mod library;
pub mod matcher;
pub mod output;
pub mod query;
pub mod similarity;

pub use cache::{CatalogCache, Snapshot};
pub use catalog::{
    load_font_file, CatalogOptions, DirectoryBackend, FontBackend, MemoryBackend,
    UnavailableBackend,
};
pub use error::{Error, ErrorKind, Result};
pub use font::{FontDescriptor, FontId, FontMatch};
pub use library::FontLibrary;
pub use matcher::match_font;
pub use query::{face_score, FontQuery};
pub use similarity::{edit_distance, family_similarity, normalize};
