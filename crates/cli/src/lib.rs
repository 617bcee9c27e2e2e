use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use knowcode_context::{
    CodeContext, ContextKind, PatternTables, Position, RegionResolver, ResolverConfig, TextBuffer,
};
use std::io;
use std::path::PathBuf;

use crate::flags::RegionKindFlag;
use crate::report::InspectReport;

mod flags;
mod report;
mod source;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "knowcode")]
#[command(about = "Resolve a cursor position to the surrounding code region", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Language id (javascript, typescript, python, java); detected from the file extension by default
    #[arg(long, global = true)]
    language: Option<String>,

    /// Resolver config file (TOML)
    #[arg(long, global = true, env = "KNOWCODE_CONFIG")]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the code at a position (function, variable, class, import, comment)
    Context(PositionArgs),

    /// Find one kind of region at a position
    Region(RegionArgs),

    /// Context plus shape, signature and class members
    Inspect(PositionArgs),
}

#[derive(Args)]
struct PositionArgs {
    /// Source file (`-` reads stdin)
    file: PathBuf,

    /// Line number (0-based)
    #[arg(long)]
    line: usize,

    /// Column in UTF-16 code units (0-based)
    #[arg(long, default_value_t = 0)]
    column: usize,
}

impl PositionArgs {
    const fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

#[derive(Args)]
struct RegionArgs {
    /// Region kind to look for
    #[arg(value_enum)]
    kind: RegionKindFlag,

    #[command(flatten)]
    target: PositionArgs,
}

/// Loaded configuration and tables shared by every command
struct Session {
    config: ResolverConfig,
    tables: PatternTables,
    language: Option<String>,
    json: bool,
}

impl Session {
    fn new(cli: &Cli) -> Result<Self> {
        let config = source::load_config(cli.config.as_ref())?;
        let tables = PatternTables::from_config(&config).context("Failed to build pattern tables")?;
        Ok(Self {
            config,
            tables,
            language: cli.language.clone(),
            json: cli.json,
        })
    }

    fn resolver(&self) -> RegionResolver<'_> {
        RegionResolver::with_config(&self.tables, &self.config)
    }

    fn buffer(&self, args: &PositionArgs) -> Result<TextBuffer> {
        let text = source::read_source(&args.file)?;
        let language = source::resolve_language(self.language.as_deref(), &args.file, &self.config);
        log::debug!(
            "{}: {} lines, language {language}",
            args.file.display(),
            text.lines().count()
        );

        let buffer = TextBuffer::new(&text, language);
        if args.line >= buffer.line_count() {
            log::warn!(
                "line {} is past the end of a {}-line buffer",
                args.line,
                buffer.line_count()
            );
        }
        Ok(buffer)
    }
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let session = Session::new(&cli)?;

    match &cli.command {
        Commands::Context(args) => run_context(&session, args),
        Commands::Region(args) => run_region(&session, args),
        Commands::Inspect(args) => run_inspect(&session, args),
    }
}

fn run_context(session: &Session, args: &PositionArgs) -> Result<()> {
    let buffer = session.buffer(args)?;
    let context = session
        .resolver()
        .get_context_at_position(&buffer, args.position());

    if session.json {
        print_stdout(&report::to_json(&context)?)
    } else {
        print_stdout(&report::render_context(&context))
    }
}

fn run_region(session: &Session, args: &RegionArgs) -> Result<()> {
    let target = &args.target;
    let buffer = session.buffer(target)?;
    let resolver = session.resolver();
    let kind = args.kind.as_domain();
    let position = target.position();

    let region = match kind {
        ContextKind::Function => resolver.find_function_at_position(&buffer, position),
        ContextKind::Variable => resolver.find_variable_at_position(&buffer, position),
        ContextKind::Class => resolver.find_class_at_position(&buffer, position),
        ContextKind::Import | ContextKind::Comment | ContextKind::Unknown => None,
    };

    let context = region.map(|region| {
        let text = buffer.text(&region);
        let name = match kind {
            ContextKind::Function => resolver.extract_function_name(&text, &buffer),
            ContextKind::Variable => resolver.extract_variable_name(&text, &buffer),
            ContextKind::Class => resolver.extract_class_name(&text, &buffer),
            ContextKind::Import | ContextKind::Comment | ContextKind::Unknown => None,
        };
        CodeContext::new(kind, text, region).with_name(name)
    });

    if session.json {
        return print_stdout(&report::to_json(&context)?);
    }
    match context {
        Some(context) => print_stdout(&report::render_context(&context)),
        None => print_stdout(&report::render_missing(kind, position)),
    }
}

fn run_inspect(session: &Session, args: &PositionArgs) -> Result<()> {
    let buffer = session.buffer(args)?;
    let context = session
        .resolver()
        .get_context_at_position(&buffer, args.position());
    let report = InspectReport::build(&session.tables, context, buffer.language());

    if session.json {
        print_stdout(&report::to_json(&report)?)
    } else {
        print_stdout(&report::render_inspect(&report))
    }
}
