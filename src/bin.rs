use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use rand::{rngs::SmallRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use relgraph::{
    analysis::analyze,
    config::{Config, OutputFormat},
    drawing::RelationDrawing,
    example::{generate_example, ExampleKind},
    parser::parse_with_limits,
    relation::Relation,
};

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "relgraph",
    about = "Check the properties of a binary relation, compute its closures and draw it."
)]
struct Cli {
    /// TOML file with limits, layout and output settings.
    #[arg(long, value_name = "FILE", global = true, env = "RELGRAPH_CONFIG")]
    config: Option<PathBuf>,
    /// More log output on stderr (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report the properties and closures of a relation.
    Check {
        #[command(flatten)]
        input: InputArgs,
        /// Overrides the configured output format.
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Draw a relation as an SVG graph on a circular layout.
    Graph {
        #[command(flatten)]
        input: InputArgs,
        /// Emit Graphviz DOT instead of SVG.
        #[arg(long, action = ArgAction::SetTrue)]
        dot: bool,
        /// Write to this file instead of stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Print a random example relation.
    Example {
        #[arg(long, value_enum, default_value_t)]
        kind: ExampleKind,
        /// Seed for a reproducible example.
        #[arg(long, value_name = "N")]
        seed: Option<u64>,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Pairs such as "(1,2), (2,3)". Read from stdin when neither PAIRS nor --file is given.
    #[arg(value_name = "PAIRS", conflicts_with = "file")]
    pairs: Option<String>,
    /// Read the pairs from a file.
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,
}

impl InputArgs {
    fn read(&self) -> Result<String> {
        if let Some(pairs) = &self.pairs {
            return Ok(pairs.clone());
        }
        if let Some(file) = &self.file {
            return fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()));
        }
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read pairs from stdin")?;
        Ok(text)
    }

    fn relation(&self, config: &Config) -> Result<Relation> {
        let text = self.read()?;
        parse_with_limits(&text, &config.limits).context("could not parse the relation")
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "relgraph=debug",
        _ => "relgraph=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref()).with_context(|| {
        format!(
            "failed to load configuration from {}",
            cli.config
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )
    })?;

    match cli.command {
        Command::Check { input, format } => {
            let relation = input.relation(&config)?;
            let report = analyze(&relation);
            let out = match format.unwrap_or(config.output.format) {
                OutputFormat::Text => report.to_string(),
                OutputFormat::Json => {
                    serde_json::to_string_pretty(&report).context("failed to encode report")?
                }
            };
            println!("{out}");
        }
        Command::Graph { input, dot, output } => {
            let relation = input.relation(&config)?;
            let rendered = if dot {
                relation.dot()
            } else {
                RelationDrawing::new(&relation, config.layout).to_svg()
            };
            match output {
                Some(path) => {
                    fs::write(&path, rendered)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), "wrote graph");
                }
                None => io::stdout()
                    .write_all(rendered.as_bytes())
                    .context("failed to write graph to stdout")?,
            }
        }
        Command::Example { kind, seed } => {
            let mut rng = match seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_entropy(),
            };
            println!("{}", generate_example(kind, &mut rng));
        }
    }

    Ok(())
}
