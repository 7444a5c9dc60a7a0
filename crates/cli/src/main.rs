use crate::{
    commands::{Cli, OutputFormat},
    error::CliError,
    output::RenderedFilter,
};
use clap::Parser;
use filter_engine::{FilterCompiler, SqlFilterCompiler};
use model::metadata::schema::Schema;
use planner::query::renderer::{Render, render_to_sql};
use std::{io, process::ExitCode};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let CliError::Compile(filter_err) = &err {
                debug!(status = filter_err.status_code(), "Filter rejected");
            }
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let schema = Schema::load(&cli.schema)?;
    let filter = filter_syntax::parse(&cli.filter)?;
    let mut out = io::stdout().lock();

    if cli.format == OutputFormat::Ast {
        return output::write_json(&mut out, &filter);
    }

    let compiler = SqlFilterCompiler::new(&schema, &cli.entity)?;
    let dialect = cli.dialect.dialect();
    debug!(entity = %compiler.entity().name, dialect = %dialect.name(), "Rendering filter");
    let node: Box<dyn Render> = if cli.select {
        Box::new(compiler.select(&filter)?)
    } else {
        Box::new(compiler.compile(&filter)?)
    };
    let (sql, params) = render_to_sql(node.as_ref(), dialect);
    let rendered = RenderedFilter { sql, params };

    match cli.format {
        OutputFormat::Json => output::write_json(&mut out, &rendered),
        _ => output::write_sql(&mut out, &rendered),
    }
}
