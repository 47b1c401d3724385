//! typv CLI (made by FontLab https://www.fontlab.com/)

use std::env;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use regex::Regex;

use typv_core::listing::{list_fonts, ListOptions};
use typv_core::output::{write_json_pretty, write_ndjson, FontVariableReport};
use typv_core::query::Query;
use typv_core::tags::parse_axis_tags;
use typv_core::{FontFileFetcher, ListedFont, VariableDataFetcher, VariableDataResolver};

pub mod server;

/// CLI entrypoint for typv.
#[derive(Debug, Parser)]
#[command(
    name = "typv",
    about = "Cached variable-font axis and style lookups (made by FontLab https://www.fontlab.com/)"
)]
pub struct Cli {
    /// Log cache activity (debug level) to stderr
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show axes, named styles and STAT styles of variable fonts
    Vars(VarsArgs),
    /// Serve variable font data over HTTP from one shared cache
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
struct VarsArgs {
    /// Paths to scan (directories or files)
    #[arg(
        value_hint = ValueHint::AnyPath,
        required_unless_present_any = ["system_fonts", "stdin_paths"]
    )]
    paths: Vec<PathBuf>,

    /// Read newline-delimited paths from STDIN
    #[arg(long = "stdin-paths", action = ArgAction::SetTrue)]
    stdin_paths: bool,

    /// Include common system font directories automatically
    #[arg(long = "system-fonts", action = ArgAction::SetTrue)]
    system_fonts: bool,

    /// Require fonts to define these axis tags
    #[arg(short = 'a', long = "axes", value_delimiter = ',', value_hint = ValueHint::Other)]
    axes: Vec<String>,

    /// Regex patterns that must match the family, full or PostScript name
    #[arg(short = 'n', long = "name", value_hint = ValueHint::Other)]
    name_patterns: Vec<String>,

    /// Only include monospaced fonts
    #[arg(short = 'm', long = "monospace", action = ArgAction::SetTrue)]
    monospace: bool,

    /// Follow symlinks while walking paths
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    follow_symlinks: bool,

    /// Worker threads for reading fonts (default: all cores)
    #[arg(short = 'J', long = "jobs", value_parser = clap::value_parser!(u16).range(1..))]
    jobs: Option<u16>,

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
struct ServeArgs {
    /// Address to listen on
    #[arg(long = "bind", default_value = "127.0.0.1:8765")]
    bind: String,

    /// Worker threads for reading fonts (default: all cores)
    #[arg(short = 'J', long = "jobs", value_parser = clap::value_parser!(u16).range(1..))]
    jobs: Option<u16>,
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
    init_logger(cli.verbose);

    match cli.command {
        Command::Vars(args) => run_vars(args),
        Command::Serve(args) => run_serve(args),
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run_vars(args: VarsArgs) -> Result<()> {
    let stdin = io::stdin();
    let paths = gather_paths(
        &args.paths,
        args.stdin_paths,
        args.system_fonts,
        stdin.lock(),
    )?;
    let query = build_query(&args)?;
    let opts = ListOptions {
        follow_symlinks: args.follow_symlinks,
        jobs: args.jobs.map(usize::from),
    };
    let fetcher = match opts.jobs {
        Some(jobs) => FontFileFetcher::with_jobs(jobs)?,
        None => FontFileFetcher::new(),
    };
    let resolver = VariableDataResolver::new(fetcher);

    let reports = resolve_reports(&resolver, &paths, &query, &opts)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let use_color = match args.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => handle.is_terminal(),
    };

    if args.ndjson {
        write_ndjson(&reports, &mut handle)?;
    } else if args.json {
        write_json_pretty(&reports, &mut handle)?;
    } else if args.columns {
        write_columns(&reports, &mut handle, use_color)?;
    } else {
        write_plain(&reports, &mut handle, use_color)?;
    }

    Ok(())
}

fn run_serve(args: ServeArgs) -> Result<()> {
    let fetcher = match args.jobs {
        Some(jobs) => FontFileFetcher::with_jobs(usize::from(jobs))?,
        None => FontFileFetcher::new(),
    };

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?
        .block_on(server::serve(&args.bind, fetcher))
}

/// List fonts under `paths`, resolve variable data for the selected ones in
/// one batch, and pair each font with its data.
pub fn resolve_reports<F: VariableDataFetcher>(
    resolver: &VariableDataResolver<F>,
    paths: &[PathBuf],
    query: &Query,
    opts: &ListOptions,
) -> Result<Vec<FontVariableReport>> {
    let fonts: Vec<ListedFont> = list_fonts(paths, opts)?
        .into_iter()
        .filter(|font| query.matches_font(font))
        .collect();

    resolver
        .ensure(&fonts)
        .context("resolving variable font data")?;

    let mut reports = Vec::with_capacity(fonts.len());
    for font in fonts {
        let data = resolver.try_lookup(&font)?;
        if !query.needs_data() || query.matches_data(&data) {
            reports.push(FontVariableReport { font, data });
        }
    }
    Ok(reports)
}

fn build_query(args: &VarsArgs) -> Result<Query> {
    build_query_from_parts(&args.axes, &args.name_patterns, args.monospace)
}

/// Build a variable-font query from raw axis tags and name regexes.
pub fn build_query_from_parts(axes: &[String], names: &[String], monospace: bool) -> Result<Query> {
    let axes = parse_axis_tags(axes)?;
    let name_patterns = compile_patterns(names)?;

    Ok(Query::new()
        .with_axes(axes)
        .with_name_patterns(name_patterns)
        .require_variable(true)
        .require_monospace(monospace))
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("invalid regex: {p}")))
        .collect()
}

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

    if include_system {
        paths.extend(system_font_roots()?);
    }

    if paths.is_empty() {
        return Err(anyhow!("no font paths provided"));
    }

    Ok(paths)
}

fn read_paths_from(reader: &mut impl BufRead) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }
    Ok(paths)
}

fn system_font_roots() -> Result<Vec<PathBuf>> {
    if let Ok(raw) = env::var("TYPV_SYSTEM_FONT_DIRS") {
        return system_roots_from_override(&raw);
    }

    let mut candidates: Vec<PathBuf> = Vec::new();

    #[cfg(target_os = "macos")]
    {
        candidates.push(PathBuf::from("/System/Library/Fonts"));
        candidates.push(PathBuf::from("/Library/Fonts"));
        if let Some(home) = env::var_os("HOME") {
            candidates.push(PathBuf::from(home).join("Library/Fonts"));
        }
    }

    #[cfg(target_os = "linux")]
    {
        candidates.push(PathBuf::from("/usr/share/fonts"));
        candidates.push(PathBuf::from("/usr/local/share/fonts"));
        if let Some(home) = env::var_os("HOME") {
            candidates.push(PathBuf::from(home).join(".local/share/fonts"));
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(system_root) = env::var_os("SYSTEMROOT") {
            candidates.push(PathBuf::from(system_root).join("Fonts"));
        }
        if let Some(local_appdata) = env::var_os("LOCALAPPDATA") {
            candidates.push(PathBuf::from(local_appdata).join("Microsoft/Windows/Fonts"));
        }
    }

    candidates.retain(|p| p.exists());
    candidates.sort();
    candidates.dedup();

    if candidates.is_empty() {
        return Err(anyhow!("no system font directories found for this platform"));
    }

    Ok(candidates)
}

fn system_roots_from_override(raw: &str) -> Result<Vec<PathBuf>> {
    let mut overrides: Vec<PathBuf> = raw
        .split([':', ';'])
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .filter(|p| p.exists())
        .collect();

    overrides.sort();
    overrides.dedup();

    if overrides.is_empty() {
        Err(anyhow!("TYPV_SYSTEM_FONT_DIRS is set but no paths exist"))
    } else {
        Ok(overrides)
    }
}

fn write_plain(reports: &[FontVariableReport], mut w: impl Write, color: bool) -> Result<()> {
    for report in reports {
        let path = apply_color(&path_with_index(&report.font), color, AnsiColor::Cyan);
        let axes = apply_color(&axes_summary(report), color, AnsiColor::Green);
        writeln!(w, "{path}: {} [{axes}]", report.font.full_name)?;
    }
    Ok(())
}

fn write_columns(reports: &[FontVariableReport], mut w: impl Write, color: bool) -> Result<()> {
    let rows: Vec<(String, String, String)> = reports
        .iter()
        .map(|r| {
            let styles = format!(
                "{} axes, {} styles, {} stat",
                r.data.axes.len(),
                r.data.named_styles.len(),
                r.data.design_axes.len() + r.data.multi_axis_styles.len(),
            );
            (path_with_index(&r.font), r.font.full_name.clone(), styles)
        })
        .collect();

    let path_width = rows
        .iter()
        .map(|r| r.0.len())
        .max()
        .unwrap_or(0)
        .clamp(0, 120);
    let name_width = rows
        .iter()
        .map(|r| r.1.len())
        .max()
        .unwrap_or(0)
        .clamp(0, 80);

    for (path, name, styles) in rows {
        let padded_path = format!("{:<path_width$}", path);
        let padded_name = format!("{:<name_width$}", name);
        let rendered_path = apply_color(&padded_path, color, AnsiColor::Cyan);
        let rendered_name = apply_color(&padded_name, color, AnsiColor::Yellow);
        let rendered_styles = apply_color(&styles, color, AnsiColor::Green);

        writeln!(w, "{rendered_path}  {rendered_name}  {rendered_styles}")?;
    }

    Ok(())
}

fn axes_summary(report: &FontVariableReport) -> String {
    report
        .data
        .axes
        .iter()
        .map(|axis| {
            format!(
                "{} {}..{} ({})",
                axis.tag.trim_end(),
                axis.minimum,
                axis.maximum,
                axis.default
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
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

fn path_with_index(font: &ListedFont) -> String {
    let path = font
        .descriptor
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(no path)".to_string());
    match font.descriptor.index {
        Some(idx) => format!("{path}#{idx}"),
        None => path,
    }
}

#[cfg(test)]
mod tests;
