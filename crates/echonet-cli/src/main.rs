use echonet::audit::audit;
use echonet::{Audit, GeneratorConfig, Graph, GraphDocument, PipelineStats, generate_seeded};
use serde::Serialize;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Map(echonet::Error),
    Json(serde_json::Error),
    Unsound,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Map(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Unsound => write!(f, "map violates connectivity, degree or crossing rules"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<echonet::Error> for CliError {
    fn from(value: echonet::Error) -> Self {
        Self::Map(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Generate,
    Audit,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    seed: Option<u64>,
    width: Option<f64>,
    height: Option<f64>,
    nodes: Option<usize>,
    config: Option<String>,
    pretty: bool,
    with_stats: bool,
    out: Option<String>,
}

#[derive(Serialize)]
struct GenerateOut<'a> {
    seed: u64,
    graph: &'a GraphDocument,
    stats: &'a PipelineStats,
    audit: &'a Audit,
}

fn usage() -> &'static str {
    "echonet-cli\n\
\n\
USAGE:\n\
  echonet-cli [generate] [--seed <n>] [--width <w>] [--height <h>] [--nodes <n>] [--config <path>] [--pretty] [--stats] [--out <path>]\n\
  echonet-cli audit [--width <w>] [--height <h>] [--config <path>] [--pretty] [<path>|-]\n\
\n\
NOTES:\n\
  - generate prints the map document to stdout by default; use --out to write a file.\n\
  - --stats wraps the document with the seed, per-stage statistics and the audit report.\n\
  - Without --seed a seed is derived from the clock and reported with --stats.\n\
  - --nodes fixes the number of non-hub nodes; --config reads a JSON generator config.\n\
  - audit reads a map document (stdin if <path> is omitted or '-') and exits with 3 when\n\
    the map is disconnected, over the degree cap or has crossing edges.\n\
  - Set ECHONET_LOG (e.g. ECHONET_LOG=debug) to see stage logs on stderr.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "generate" => args.command = Command::Generate,
            "audit" => args.command = Command::Audit,
            "--pretty" => args.pretty = true,
            "--stats" => args.with_stats = true,
            "--seed" => {
                let seed = next_value(&mut it)?;
                args.seed = Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--width" => {
                let w = next_value(&mut it)?;
                args.width = Some(w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--height" => {
                let h = next_value(&mut it)?;
                args.height = Some(h.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--nodes" => {
                let n = next_value(&mut it)?;
                args.nodes = Some(n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--config" => args.config = Some(next_value(&mut it)?.clone()),
            "--out" => args.out = Some(next_value(&mut it)?.clone()),
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if matches!(args.command, Command::Generate) && args.input.is_some() {
        return Err(CliError::Usage(usage()));
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

fn to_json(value: &impl Serialize, pretty: bool) -> Result<String, CliError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    Ok(text)
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn load_config(args: &Args) -> Result<GeneratorConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => GeneratorConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => GeneratorConfig::default(),
    };
    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }
    if let Some(n) = args.nodes {
        config.placement.node_count = Some(n);
    }
    config.validate()?;
    Ok(config)
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(&args)?;

    match args.command {
        Command::Generate => {
            let seed = args.seed.unwrap_or_else(clock_seed);
            tracing::info!(seed, "generating map");
            let generated = generate_seeded(&config, seed)?;
            let doc = generated.graph.to_document();
            let text = if args.with_stats {
                to_json(
                    &GenerateOut {
                        seed,
                        graph: &doc,
                        stats: &generated.stats,
                        audit: &generated.audit,
                    },
                    args.pretty,
                )?
            } else {
                to_json(&doc, args.pretty)?
            };
            write_text(&text, args.out.as_deref())
        }
        Command::Audit => {
            let text = read_input(args.input.as_deref())?;
            let doc: GraphDocument = serde_json::from_str(&text)?;
            let graph = Graph::from_document(&doc, config.width, config.height)?;
            let report = audit(&graph, &config);
            write_text(&to_json(&report, args.pretty)?, args.out.as_deref())?;
            if report.is_sound() {
                Ok(())
            } else {
                Err(CliError::Unsound)
            }
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("ECHONET_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
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
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    init_logging();

    match run(args) {
        Ok(()) => {}
        Err(CliError::Unsound) => {
            eprintln!("{}", CliError::Unsound);
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
