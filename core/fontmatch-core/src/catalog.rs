//! Catalog and file content providers (made by FontLab https://www.fontlab.com/)

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use read_fonts::tables::name::NameId;
use read_fonts::{FontRef, TableProvider};
use skrifa::attribute::Style;
use skrifa::{FontRef as SkrifaFontRef, MetadataProvider};

use crate::discovery::{system_font_roots, PathDiscovery};
use crate::error::{Error, Result};
use crate::font::{FontDescriptor, FontId};

/// Windows platform, en-US language id in the `name` table.
const WINDOWS_PLATFORM: u16 = 3;
const WINDOWS_EN_US: u16 = 0x0409;
const UNICODE_PLATFORM: u16 = 0;

/// Everything the matcher needs from a platform: list faces, load their bytes.
pub trait FontBackend: Send + Sync {
    /// List every installed face. Ids must be accepted by [`FontBackend::load`].
    fn enumerate(&self) -> Result<Vec<FontDescriptor>>;

    /// Load the bytes of the file holding the face `id`.
    fn load(&self, id: &FontId) -> Result<Vec<u8>>;
}

#[derive(Debug, Default, Clone)]
pub struct CatalogOptions {
    pub follow_symlinks: bool,
    pub jobs: Option<usize>,
}

/// Catalog built by walking font directories and parsing each file.
#[derive(Debug, Clone)]
pub struct DirectoryBackend {
    roots: Vec<PathBuf>,
    opts: CatalogOptions,
}

impl DirectoryBackend {
    pub fn new<I, P>(roots: I, opts: CatalogOptions) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            opts,
        }
    }

    /// Backend over the platform font directories.
    pub fn system(opts: CatalogOptions) -> Result<Self> {
        Ok(Self::new(system_font_roots()?, opts))
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn describe_all(&self, files: &[PathBuf]) -> Vec<FontDescriptor> {
        files
            .par_iter()
            .map(|path| describe_file(path))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }
}

impl FontBackend for DirectoryBackend {
    fn enumerate(&self) -> Result<Vec<FontDescriptor>> {
        let discovery =
            PathDiscovery::new(self.roots.iter().cloned()).follow_symlinks(self.opts.follow_symlinks);
        let files = discovery.discover()?;
        debug!("discovered {} font files", files.len());

        let fonts = if let Some(jobs) = self.opts.jobs {
            let pool = ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .map_err(|err| Error::system(format!("building thread pool: {err}")))?;
            pool.install(|| self.describe_all(&files))
        } else {
            self.describe_all(&files)
        };

        info!(
            "enumerated {} faces from {} files",
            fonts.len(),
            files.len()
        );
        Ok(fonts)
    }

    fn load(&self, id: &FontId) -> Result<Vec<u8>> {
        let (path, _) = id.parts();
        if path.is_empty() {
            return Err(Error::InvalidArgument("font id is empty".to_string()));
        }
        load_font_file(Path::new(path))
    }
}

/// Read a whole font file, rejecting missing and empty files.
pub fn load_font_file(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(Error::InvalidArgument(format!(
            "font file does not exist: {}",
            path.display()
        )));
    }

    let mut file = fs::File::open(path)
        .map_err(|err| Error::io(format!("opening font file {}", path.display()), err))?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(|err| Error::io(format!("reading font file {}", path.display()), err))?;

    if data.is_empty() {
        return Err(Error::system(format!(
            "font file is empty: {}",
            path.display()
        )));
    }
    Ok(data)
}

/// Describe every face in `path`; unreadable files yield nothing.
fn describe_file(path: &Path) -> Vec<FontDescriptor> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(err) => {
            warn!("skipping {}: {err}", path.display());
            return Vec::new();
        }
    };

    let mut faces = Vec::new();
    for (position, font) in FontRef::fonts(&data).enumerate() {
        let font = match font {
            Ok(font) => font,
            Err(err) => {
                warn!("skipping face {position} of {}: {err}", path.display());
                continue;
            }
        };
        let index = font.ttc_index().unwrap_or(0);
        match describe_face(path, &data, &font, index) {
            Some(descriptor) => faces.push(descriptor),
            None => debug!("face {index} of {} has no family name", path.display()),
        }
    }
    faces
}

fn describe_face(path: &Path, data: &[u8], font: &FontRef, index: u32) -> Option<FontDescriptor> {
    let family = best_name(
        font,
        &[NameId::TYPOGRAPHIC_FAMILY_NAME, NameId::FAMILY_NAME],
    )?;
    let style = best_name(
        font,
        &[NameId::TYPOGRAPHIC_SUBFAMILY_NAME, NameId::SUBFAMILY_NAME],
    )
    .unwrap_or_default();

    let mut descriptor = FontDescriptor {
        id: FontId::new(path, index),
        family,
        style,
        ..FontDescriptor::default()
    };

    let sfont = if font.ttc_index().is_some() {
        SkrifaFontRef::from_index(data, index)
    } else {
        SkrifaFontRef::new(data)
    };
    match sfont {
        Ok(sfont) => {
            let attrs = sfont.attributes();
            descriptor.weight = attrs.weight.value().round() as i32;
            descriptor.stretch = (attrs.stretch.ratio() * 100.0).round() as i32;
            descriptor.italic = !matches!(attrs.style, Style::Normal);
        }
        Err(err) => {
            debug!("no attributes for {}: {err}", descriptor.id);
            let style = descriptor.style.to_lowercase();
            descriptor.italic = style.contains("italic") || style.contains("oblique");
        }
    }

    Some(descriptor)
}

/// First non-blank Unicode name among `ids`, preferring English records.
fn best_name(font: &FontRef, ids: &[NameId]) -> Option<String> {
    let table = font.name().ok()?;
    let data = table.string_data();

    for id in ids {
        let mut best: Option<(u8, String)> = None;
        for record in table.name_record() {
            if record.name_id() != *id || !record.is_unicode() {
                continue;
            }
            let rank = match (record.platform_id(), record.language_id()) {
                (WINDOWS_PLATFORM, WINDOWS_EN_US) => 0,
                (UNICODE_PLATFORM, _) => 1,
                _ => 2,
            };
            if best.as_ref().is_some_and(|(top, _)| *top <= rank) {
                continue;
            }
            if let Ok(entry) = record.string(data) {
                let rendered = entry.to_string().trim().to_string();
                if !rendered.is_empty() {
                    best = Some((rank, rendered));
                }
            }
        }
        if let Some((_, name)) = best {
            return Some(name);
        }
    }
    None
}

/// Fixed catalog held in memory, with optional bytes per face.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    fonts: Vec<FontDescriptor>,
    data: HashMap<FontId, Vec<u8>>,
}

impl MemoryBackend {
    pub fn new(fonts: Vec<FontDescriptor>) -> Self {
        Self {
            fonts,
            data: HashMap::new(),
        }
    }

    pub fn with_data(mut self, id: FontId, bytes: Vec<u8>) -> Self {
        self.data.insert(id, bytes);
        self
    }
}

impl FontBackend for MemoryBackend {
    fn enumerate(&self) -> Result<Vec<FontDescriptor>> {
        Ok(self.fonts.clone())
    }

    fn load(&self, id: &FontId) -> Result<Vec<u8>> {
        if id.as_str().is_empty() {
            return Err(Error::InvalidArgument("font id is empty".to_string()));
        }
        match self.data.get(id) {
            Some(bytes) if !bytes.is_empty() => Ok(bytes.clone()),
            Some(_) => Err(Error::system(format!("font data is empty: {id}"))),
            None => Err(Error::InvalidArgument(format!("unknown font id: {id}"))),
        }
    }
}

/// Backend for builds without a usable font source.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableBackend;

impl FontBackend for UnavailableBackend {
    fn enumerate(&self) -> Result<Vec<FontDescriptor>> {
        Err(unavailable())
    }

    fn load(&self, _id: &FontId) -> Result<Vec<u8>> {
        Err(unavailable())
    }
}

fn unavailable() -> Error {
    Error::BackendUnavailable("no backend configured".to_string())
}
