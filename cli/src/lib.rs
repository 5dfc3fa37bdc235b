//! fontmatch CLI (made by FontLab https://www.fontlab.com/)

use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use log::LevelFilter;
use regex::Regex;

use fontmatch_core::discovery::system_font_roots;
use fontmatch_core::output::{write_json_pretty, write_ndjson};
use fontmatch_core::{
    CatalogOptions, DirectoryBackend, FontDescriptor, FontId, FontLibrary, FontMatch, FontQuery,
};

/// CLI entrypoint for fontmatch.
#[derive(Debug, Parser)]
#[command(
    name = "fontmatch",
    about = "Find the closest installed font (made by FontLab https://www.fontlab.com/)"
)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List installed faces, optionally filtered
    List(ListArgs),
    /// Resolve a family and attributes to the closest face
    Match(MatchArgs),
    /// Load the file behind a font id
    Load(LoadArgs),
}

#[derive(Debug, Args)]
struct SourceArgs {
    /// Font directories or files to scan (defaults to system fonts)
    #[arg(long = "path", short = 'p', value_hint = ValueHint::DirPath)]
    paths: Vec<PathBuf>,

    /// Read newline-delimited paths from STDIN
    #[arg(long = "stdin-paths", action = ArgAction::SetTrue)]
    stdin_paths: bool,

    /// Include common system font directories alongside explicit paths
    #[arg(long = "system-fonts", action = ArgAction::SetTrue)]
    system_fonts: bool,

    /// Follow symlinks while walking paths
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    follow_symlinks: bool,

    /// Number of threads used to parse font files
    #[arg(short = 'J', long = "jobs")]
    jobs: Option<usize>,
}

#[derive(Debug, Args)]
struct FaceArgs {
    /// Style name, compared case-insensitively (e.g. "Bold Italic")
    #[arg(short = 's', long = "style")]
    style: Option<String>,

    /// Numeric weight (100 thin .. 900 black)
    #[arg(short = 'w', long = "weight")]
    weight: Option<i32>,

    /// Stretch as a percentage (~50-200) or width class (1-9)
    #[arg(short = 'x', long = "stretch")]
    stretch: Option<i32>,

    /// Require or prefer italic faces
    #[arg(short = 'i', long = "italic", action = ArgAction::SetTrue, conflicts_with = "upright")]
    italic: bool,

    /// Require or prefer upright faces
    #[arg(long = "upright", action = ArgAction::SetTrue)]
    upright: bool,
}

impl FaceArgs {
    fn italic_choice(&self) -> Option<bool> {
        match (self.italic, self.upright) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Debug, Args)]
struct ListArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Only list faces of this family (case-insensitive)
    #[arg(short = 'f', long = "family")]
    family: Option<String>,

    #[command(flatten)]
    face: FaceArgs,

    /// Regex patterns that must match the family name
    #[arg(short = 'n', long = "name", value_hint = ValueHint::Other)]
    name_patterns: Vec<String>,

    /// Emit a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,

    /// Format output as padded columns
    #[arg(long = "columns", action = ArgAction::SetTrue)]
    columns: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct MatchArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Family to look for; typos are tolerated
    #[arg(short = 'f', long = "family")]
    family: String,

    #[command(flatten)]
    face: FaceArgs,

    /// Emit the match as JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct LoadArgs {
    /// Font id as printed by `list` or `match` (`<path>#<index>`)
    id: String,

    /// Write the bytes to this file instead of printing a summary
    #[arg(short = 'o', long = "output", value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::List(args) => run_list(args),
        Command::Match(args) => run_match(args),
        Command::Load(args) => run_load(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG, when set, overrides the -v level.
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn run_list(args: ListArgs) -> Result<()> {
    let library = open_library(&args.source)?;
    let query = list_query(&args);
    let patterns = compile_patterns(&args.name_patterns)?;

    let fonts = library.list_fonts()?;
    let selected = filter_fonts(&fonts, &query, &patterns);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let color = use_color(args.color, &handle);

    if args.ndjson {
        write_ndjson(&selected, &mut handle)?;
    } else if args.json {
        write_json_pretty(&selected, &mut handle)?;
    } else if args.columns {
        write_columns(&selected, &mut handle, color)?;
    } else {
        write_plain(&selected, &mut handle, color)?;
    }

    Ok(())
}

fn run_match(args: MatchArgs) -> Result<()> {
    let library = open_library(&args.source)?;
    let query = match_query(&args);
    let found = library.match_fonts(&query)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if args.json {
        write_json_pretty(std::slice::from_ref(&found), &mut handle)?;
    } else {
        let color = use_color(args.color, &handle);
        write_match(&found, &mut handle, color)?;
    }
    Ok(())
}

fn run_load(args: LoadArgs) -> Result<()> {
    let id = FontId::from(args.id);
    let library = FontLibrary::new(DirectoryBackend::new(
        Vec::<PathBuf>::new(),
        CatalogOptions::default(),
    ));
    let bytes = library.load_font_data(&id)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
        }
        None => {
            let (path, index) = id.parts();
            println!("{path}\tface {index}\t{} bytes", bytes.len());
        }
    }
    Ok(())
}

fn open_library(source: &SourceArgs) -> Result<FontLibrary<DirectoryBackend>> {
    let stdin = io::stdin();
    let roots = gather_paths(
        &source.paths,
        source.stdin_paths,
        source.system_fonts,
        stdin.lock(),
    )?;
    let opts = CatalogOptions {
        follow_symlinks: source.follow_symlinks,
        jobs: source.jobs,
    };
    Ok(FontLibrary::new(DirectoryBackend::new(roots, opts)))
}

fn use_color(choice: ColorChoice, out: &impl IsTerminal) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => out.is_terminal(),
    }
}

fn face_query(query: FontQuery, face: &FaceArgs) -> FontQuery {
    FontQuery {
        style: face.style.clone(),
        weight: face.weight,
        stretch: face.stretch,
        italic: face.italic_choice(),
        ..query
    }
}

fn list_query(args: &ListArgs) -> FontQuery {
    face_query(
        FontQuery {
            family: args.family.clone(),
            ..FontQuery::default()
        },
        &args.face,
    )
}

fn match_query(args: &MatchArgs) -> FontQuery {
    face_query(FontQuery::new().with_family(args.family.clone()), &args.face)
}

fn filter_fonts(fonts: &[FontDescriptor], query: &FontQuery, patterns: &[Regex]) -> Vec<FontDescriptor> {
    fonts
        .iter()
        .filter(|font| query.matches(font))
        .filter(|font| patterns.is_empty() || patterns.iter().any(|re| re.is_match(&font.family)))
        .cloned()
        .collect()
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("invalid regex: {p}")))
        .collect()
}

/// Resolve scan roots; with nothing explicit, fall back to system fonts.
fn gather_paths(
    raw_paths: &[PathBuf],
    read_stdin: bool,
    include_system: bool,
    mut stdin: impl BufRead,
) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    if read_stdin {
        paths.extend(read_paths_from(&mut stdin)?);
    }

    for path in raw_paths {
        if path == Path::new("-") {
            paths.extend(read_paths_from(&mut stdin)?);
        } else {
            paths.push(path.clone());
        }
    }

    if include_system || (raw_paths.is_empty() && !read_stdin) {
        paths.extend(system_font_roots()?);
    }

    if paths.is_empty() {
        return Err(anyhow!("no search paths provided"));
    }

    Ok(paths)
}

fn read_paths_from(reader: &mut impl BufRead) -> Result<Vec<PathBuf>> {
    let mut buf = String::new();
    let mut paths = Vec::new();

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }

        let trimmed = buf.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }

    Ok(paths)
}

fn write_plain(fonts: &[FontDescriptor], mut w: impl Write, color: bool) -> Result<()> {
    for font in fonts {
        let rendered = apply_color(font.id.as_str(), color, AnsiColor::Cyan);
        writeln!(w, "{rendered}")?;
    }
    Ok(())
}

fn write_columns(fonts: &[FontDescriptor], mut w: impl Write, color: bool) -> Result<()> {
    let rows: Vec<(String, String, String)> = fonts
        .iter()
        .map(|font| {
            let name = if font.style.is_empty() {
                font.family.clone()
            } else {
                format!("{} {}", font.family, font.style)
            };
            let attrs = format!(
                "wght:{:<4} wdth:{:<3}{}",
                font.weight,
                font.stretch,
                if font.italic { " italic" } else { "" },
            );
            (font.id.to_string(), name, attrs)
        })
        .collect();

    let id_width = rows
        .iter()
        .map(|r| r.0.chars().count())
        .max()
        .unwrap_or(0)
        .min(120);
    let name_width = rows
        .iter()
        .map(|r| r.1.chars().count())
        .max()
        .unwrap_or(0)
        .min(80);

    for (id, name, attrs) in rows {
        let padded_id = format!("{:<id_width$}", id);
        let padded_name = format!("{:<name_width$}", name);
        let rendered_id = apply_color(&padded_id, color, AnsiColor::Cyan);
        let rendered_name = apply_color(&padded_name, color, AnsiColor::Yellow);
        let rendered_attrs = apply_color(&attrs, color, AnsiColor::Green);

        writeln!(w, "{rendered_id}  {rendered_name}  {rendered_attrs}")?;
    }

    Ok(())
}

fn write_match(found: &FontMatch, mut w: impl Write, color: bool) -> Result<()> {
    let id = apply_color(found.font.id.as_str(), color, AnsiColor::Cyan);
    let scores = apply_color(
        &format!("{:.3}\t{:.3}", found.family_score, found.face_score),
        color,
        AnsiColor::Green,
    );
    writeln!(
        w,
        "{id}\t{}\t{}\t{scores}",
        found.font.family, found.font.style
    )?;
    Ok(())
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Cyan,
    Yellow,
    Green,
}

fn apply_color(text: &str, color: bool, code: AnsiColor) -> String {
    if !color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Cyan => "36",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
    };

    format!("\u{1b}[{}m{}\u{1b}[0m", code_str, text)
}
