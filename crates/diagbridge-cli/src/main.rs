mod console;
mod input;

use clap::{Parser, Subcommand};
use console::ConsoleReporter;
use diagbridge_common::{Source, SourceFile, SourcePosition};
use diagbridge_reporter::{BridgeConfig, Context, DelegatingReporter, ExternalPosition};
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "diagbridge")]
#[command(author, version, about = "Replay compiler diagnostics through the build-tool reporter bridge")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report a file of diagnostics against a source file
    Report {
        /// Source file the diagnostics point into
        source: PathBuf,

        /// JSON file of diagnostics
        diagnostics: PathBuf,

        /// Bridge configuration (diagbridge.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Append explanations
        #[arg(long)]
        explain: bool,

        /// Explain each distinct message only once
        #[arg(long)]
        explain_once: bool,

        /// Do not print the source line under each problem
        #[arg(long)]
        no_source: bool,

        /// Treat the source file as unresolvable
        #[arg(long)]
        unresolved: bool,
    },

    /// Print the translated position of an offset
    Position {
        /// Source file
        source: PathBuf,

        /// Offset into the source file
        offset: usize,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            source,
            diagnostics,
            config,
            explain,
            explain_once,
            no_source,
            unresolved,
        } => {
            let mut config = match config {
                Some(path) => BridgeConfig::from_file(&path).into_diagnostic()?,
                None => BridgeConfig::default(),
            };
            config.explain.enabled |= explain || explain_once;
            config.explain.once |= explain_once;
            config.render.show_source &= !no_source;

            let source = load_source(&source, unresolved)?;
            let diagnostics = input::load(&diagnostics, &source)?;
            tracing::info!(count = diagnostics.len(), "replaying diagnostics");

            let rendering = config.rendering();
            let policy = config.explain_policy();
            let ctx = Context::new(&rendering, policy.as_ref());

            let reporter = DelegatingReporter::new(ConsoleReporter::new(std::io::stdout()));
            for dia in &diagnostics {
                reporter.report(dia, &ctx)?;
            }
            reporter.print_summary();

            let console = reporter.delegate();
            tracing::debug!(
                errors = console.error_count(),
                warnings = console.warning_count(),
                infos = console.info_count(),
                "replay finished"
            );
            if console.error_count() > 0 {
                std::process::exit(1);
            }
        }

        Commands::Position { source, offset } => {
            let source = load_source(&source, false)?;
            let position = ExternalPosition::translate(&SourcePosition::new(source, offset));
            print_position(&position);
        }
    }

    Ok(())
}

fn load_source(path: &Path, unresolved: bool) -> Result<Arc<dyn Source>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e))?;
    let source = if unresolved {
        SourceFile::unresolved(path.display().to_string(), content)
    } else {
        SourceFile::new(path, content)
    };
    Ok(Arc::new(source))
}

fn print_position(position: &ExternalPosition) {
    fn show<T: std::fmt::Debug>(value: &Option<T>) -> String {
        value
            .as_ref()
            .map_or_else(|| "-".to_string(), |v| format!("{v:?}"))
    }

    println!("source_file:   {}", show(&position.source_file));
    println!("source_path:   {}", show(&position.source_path));
    println!("line:          {}", show(&position.line));
    println!("line_content:  {}", show(&position.line_content));
    println!("offset:        {}", show(&position.offset));
    println!("pointer:       {}", show(&position.pointer));
    println!("pointer_space: {}", show(&position.pointer_space));
}
