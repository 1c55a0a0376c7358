use revgraph_layout::{DocumentGraph, GraphDocument, LayoutOptions, Margin};
use serde::Serialize;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Layout(revgraph_layout::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Layout(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<revgraph_layout::Error> for CliError {
    fn from(value: revgraph_layout::Error) -> Self {
        Self::Layout(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Validate,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    verbose: bool,
    config: Option<String>,
    vertical_gap: Option<f64>,
    column_gap: Option<f64>,
    column_width: Option<f64>,
    margin: Option<f64>,
    out: Option<String>,
}

#[derive(Serialize)]
struct ValidateOut {
    nodes: usize,
    edges: usize,
    root: Option<String>,
}

fn usage() -> &'static str {
    "revgraph\n\
\n\
USAGE:\n\
  revgraph [layout] [--pretty] [--config <options.json>] [--vertical-gap <n>] [--column-gap <n>] [--column-width <n>] [--margin <n>] [--out <path>] [--verbose] [<path>|-]\n\
  revgraph validate [--verbose] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the graph document is read from stdin.\n\
  - layout prints the layout dump as JSON; use --out to write a file.\n\
  - --config loads layout options from JSON; the other flags override it.\n\
  - validate checks the document and prints a short summary.\n\
"
}

fn parse_number(value: Option<&String>) -> Result<f64, CliError> {
    let Some(value) = value else {
        return Err(CliError::Usage(usage()));
    };
    value.parse::<f64>().map_err(|_| CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "validate" => args.command = Command::Validate,
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--vertical-gap" => args.vertical_gap = Some(parse_number(it.next())?),
            "--column-gap" => args.column_gap = Some(parse_number(it.next())?),
            "--column-width" => args.column_width = Some(parse_number(it.next())?),
            "--margin" => args.margin = Some(parse_number(it.next())?),
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool, out: Option<&str>) -> Result<(), CliError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    match out {
        None | Some("-") => print!("{text}"),
        Some(path) => std::fs::write(path, text)?,
    }
    Ok(())
}

fn layout_options(args: &Args) -> Result<LayoutOptions, CliError> {
    let mut options = match args.config.as_deref() {
        Some(path) => LayoutOptions::from_json(&std::fs::read_to_string(path)?)?,
        None => LayoutOptions::default(),
    };
    if let Some(v) = args.vertical_gap {
        options.vertical_gap = v;
    }
    if let Some(v) = args.column_gap {
        options.column_gap = v;
    }
    if let Some(v) = args.column_width {
        options.column_width = Some(v);
    }
    if let Some(v) = args.margin {
        options.margin = Margin::uniform(v);
    }
    Ok(options)
}

fn load_graph(args: &Args) -> Result<DocumentGraph, CliError> {
    let text = read_input(args.input.as_deref())?;
    let doc = GraphDocument::from_json(&text)?;
    tracing::debug!(nodes = doc.nodes.len(), "graph document loaded");
    Ok(doc.build()?)
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Validate => {
            let graph = load_graph(&args)?;
            let summary = ValidateOut {
                nodes: graph.graph.node_count(),
                edges: graph.graph.edges().len(),
                root: graph.graph.root().and_then(|id| graph.id(id)).map(str::to_string),
            };
            write_json(&summary, args.pretty, None)
        }
        Command::Layout => {
            let options = layout_options(&args)?;
            let graph = load_graph(&args)?;
            let layout = graph.layout(&options)?;
            if layout.is_empty() {
                tracing::warn!("graph document has no nodes");
            }
            write_json(&graph.dump(&layout), args.pretty, args.out.as_deref())
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    init_tracing(args.verbose);
    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
