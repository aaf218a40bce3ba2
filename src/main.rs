use clap::Parser as ClapParser;
use goeval::{Config, EvalError, Evaluation, Evaluator, GoToolchain};
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const EXIT_DIAGNOSTIC: u8 = 1;
const EXIT_INTERNAL: u8 = 2;

#[derive(ClapParser)]
#[command(name = "goeval", version, about = "Run Go fragments without the boilerplate")]
struct Cli {
    /// File holding the fragment (stdin when omitted)
    #[arg(conflicts_with = "expr")]
    file: Option<PathBuf>,

    /// Evaluate the given code instead of reading a file
    #[arg(short, long)]
    expr: Option<String>,

    /// Print the result as a JSON object with `output` and `diagnostic`
    #[arg(long)]
    json: bool,

    /// Print the assembled program instead of running it
    #[arg(long, conflicts_with = "interactive")]
    emit: bool,

    /// Read fragments from stdin, each ended by a blank line
    #[arg(short, long, conflicts_with_all = ["file", "expr"])]
    interactive: bool,

    /// Build-and-run command, e.g. "go run -race"
    #[arg(long, value_name = "CMD")]
    go: Option<String>,

    /// Directory for temporary program files
    #[arg(long, value_name = "DIR")]
    tmp_dir: Option<PathBuf>,

    /// JSON file of extra `{"name": "import/path"}` entries
    #[arg(long, value_name = "FILE")]
    registry: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GOEVAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("goeval: {err}");
            ExitCode::from(EXIT_INTERNAL)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut config = Config::from_env()?;
    if let Some(command) = &cli.go {
        config = config.with_go_command(command)?;
    }
    if let Some(dir) = &cli.tmp_dir {
        config.temp_dir = dir.clone();
    }
    if let Some(path) = &cli.registry {
        config.registry_path = Some(path.clone());
    }
    tracing::debug!(?config, "configuration loaded");

    let evaluator = Evaluator::new(config.load_registry()?, GoToolchain::from_config(&config));

    if cli.interactive {
        return Ok(ExitCode::from(run_interactive_mode(&evaluator, cli.json)?));
    }

    let fragment = match (&cli.expr, &cli.file) {
        (Some(expr), _) => expr.clone(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    if cli.emit {
        return Ok(match evaluator.emit(&fragment) {
            Ok(src) => {
                print!("{src}");
                ExitCode::SUCCESS
            }
            Err(err) => ExitCode::from(report(Err(err), cli.json)?),
        });
    }

    Ok(ExitCode::from(report(evaluator.eval(&fragment), cli.json)?))
}

/// Evaluate blank-line separated fragments until stdin ends.
///
/// Returns the worst exit code any fragment produced.
fn run_interactive_mode(evaluator: &Evaluator<GoToolchain>, json: bool) -> io::Result<u8> {
    let stdin = io::stdin();
    let mut fragment = String::new();
    let mut worst = 0;
    prompt(&fragment)?;
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            if !fragment.trim().is_empty() {
                worst = worst.max(report(evaluator.eval(&fragment), json)?);
            }
            fragment.clear();
        } else {
            fragment.push_str(&line);
            fragment.push('\n');
        }
        prompt(&fragment)?;
    }
    if !fragment.trim().is_empty() {
        worst = worst.max(report(evaluator.eval(&fragment), json)?);
    }
    Ok(worst)
}

fn prompt(fragment: &str) -> io::Result<()> {
    eprint!("{}", if fragment.is_empty() { "> " } else { ". " });
    io::stderr().flush()
}

/// Print one result and pick the matching exit code.
fn report(result: Result<String, EvalError>, json: bool) -> io::Result<u8> {
    let code = exit_code(&result);
    let evaluation = Evaluation::from(result);
    if json {
        match serde_json::to_string(&evaluation) {
            Ok(text) => println!("{text}"),
            Err(err) => eprintln!("goeval: {err}"),
        }
    } else {
        print!("{}", evaluation.output);
        eprint!("{}", evaluation.diagnostic);
        if !evaluation.diagnostic.is_empty() && !evaluation.diagnostic.ends_with('\n') {
            eprintln!();
        }
    }
    io::stdout().flush()?;
    Ok(code)
}

fn exit_code(result: &Result<String, EvalError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(err) if err.is_internal() => EXIT_INTERNAL,
        Err(_) => EXIT_DIAGNOSTIC,
    }
}
