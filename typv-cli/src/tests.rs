use super::*;
use std::io::Cursor;
use std::sync::Arc;
use typv_core::{FontDescriptor, NamedStyle, VariableAxis, VariableFontData};

fn report(name: &str, index: Option<u32>) -> FontVariableReport {
    let mut descriptor = FontDescriptor::from_path(format!("/fonts/{name}.ttf"));
    descriptor.index = index;
    FontVariableReport {
        font: ListedFont {
            family: name.to_string(),
            full_name: format!("{name} Regular"),
            postscript_name: format!("{name}-Regular"),
            is_variable: true,
            descriptor,
            ..ListedFont::default()
        },
        data: Arc::new(VariableFontData {
            axes: vec![VariableAxis {
                tag: "wght".to_string(),
                minimum: 100.0,
                maximum: 900.0,
                default: 400.0,
                ..VariableAxis::default()
            }],
            named_styles: vec![NamedStyle::default()],
            ..VariableFontData::default()
        }),
    }
}

fn vars_args(cli: Cli) -> VarsArgs {
    match cli.command {
        Command::Vars(args) => args,
        Command::Serve(_) => panic!("expected vars subcommand"),
    }
}

#[test]
fn parses_vars_args_into_query() {
    let cli = Cli::try_parse_from([
        "typv", "-v", "vars", "-a", "wght,wdth", "-n", "Mono", "-m", "-J", "2", "--json", "/fonts",
    ])
    .expect("parse cli");
    assert!(cli.verbose);

    let args = vars_args(cli);
    assert_eq!(args.jobs, Some(2));
    assert!(args.json);

    let query = build_query(&args).expect("build query");
    let mut font = report("Recursive Mono", None).font;
    font.is_monospace = true;
    assert!(query.matches_font(&font));
    assert!(query.needs_data());

    font.is_variable = false;
    assert!(!query.matches_font(&font));
}

#[test]
fn json_and_ndjson_conflict() {
    let parse = Cli::try_parse_from(["typv", "vars", "--json", "--ndjson", "/fonts"]);
    assert!(parse.is_err());
}

#[test]
fn zero_jobs_is_rejected_by_the_parser() {
    let parse = Cli::try_parse_from(["typv", "vars", "-J", "0", "/fonts"]);
    assert!(parse.is_err());
}

#[test]
fn paths_are_required_without_stdin_or_system_fonts() {
    assert!(Cli::try_parse_from(["typv", "vars"]).is_err());
    assert!(Cli::try_parse_from(["typv", "vars", "--stdin-paths"]).is_ok());
}

#[test]
fn serve_has_a_default_bind_address() {
    let cli = Cli::try_parse_from(["typv", "serve"]).expect("parse cli");
    match cli.command {
        Command::Serve(args) => assert_eq!(args.bind, "127.0.0.1:8765"),
        Command::Vars(_) => panic!("expected serve subcommand"),
    }
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn invalid_regex_and_axis_tags_return_errors() {
    assert!(build_query_from_parts(&[], &["(".to_string()], false).is_err());
    assert!(build_query_from_parts(&["toolong".to_string()], &[], false).is_err());
}

#[test]
fn gathers_paths_from_stdin_and_dash() {
    let stdin = Cursor::new("/a\n\n  /b  \n");
    let paths = gather_paths(&[PathBuf::from("-"), PathBuf::from("/c")], false, false, stdin)
        .expect("paths");
    assert_eq!(
        paths,
        vec![PathBuf::from("/a"), PathBuf::from("/b"), PathBuf::from("/c")]
    );
}

#[test]
fn empty_path_list_is_an_error() {
    let err = gather_paths(&[], true, false, Cursor::new("")).expect_err("no paths");
    assert!(err.to_string().contains("no font paths"));
}

#[test]
fn system_root_override_keeps_existing_dirs_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let raw = format!("{}:/nonexistent/typv", dir.path().display());
    let roots = system_roots_from_override(&raw).expect("roots");
    assert_eq!(roots, vec![dir.path().to_path_buf()]);

    assert!(system_roots_from_override("/nonexistent/typv").is_err());
}

#[test]
fn plain_output_lists_axes() {
    let mut buf = Vec::new();
    write_plain(&[report("Inter", None)], &mut buf, false).expect("write");
    let text = String::from_utf8(buf).expect("utf8");
    assert_eq!(text, "/fonts/Inter.ttf: Inter Regular [wght 100..900 (400)]\n");
}

#[test]
fn columns_output_includes_face_index_and_counts() {
    let mut buf = Vec::new();
    write_columns(&[report("Family", Some(1)), report("B", None)], &mut buf, false)
        .expect("write");
    let text = String::from_utf8(buf).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("/fonts/Family.ttf#1"));
    assert!(lines[0].ends_with("1 axes, 1 styles, 0 stat"));
}

#[test]
fn color_wraps_text_in_ansi_codes() {
    assert_eq!(apply_color("x", true, AnsiColor::Cyan), "\u{1b}[36mx\u{1b}[0m");
    assert_eq!(apply_color("x", false, AnsiColor::Cyan), "x");
}

#[test]
fn resolve_reports_uses_one_batch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let resolver = VariableDataResolver::new(
        move |descriptors: &[FontDescriptor]| -> anyhow::Result<Vec<VariableFontData>> {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(descriptors.iter().map(|_| VariableFontData::default()).collect())
        },
    );

    let reports = resolve_reports(
        &resolver,
        &[dir.path().to_path_buf()],
        &Query::new(),
        &ListOptions::default(),
    )
    .expect("resolve");

    assert!(reports.is_empty());
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}
