use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};
use memmap2::Mmap;

use rulox::ast_printer::AstPrinter;
use rulox::parser::Parser;
use rulox::scanner::{scan_tokens, Scanner};
use rulox::{Lox, LoxError};

/// Exit status for errors found before execution (lex, parse, resolve).
const EXIT_COMPILE_ERROR: i32 = 65;

/// Exit status for a runtime error.
const EXIT_RUNTIME_ERROR: i32 = 70;

#[derive(ClapParser, Debug)]
#[command(version, about = "Interpreter for a Lox dialect with Russian keywords", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: Option<PathBuf>,

        /// Print one JSON object per token instead of `TYPE lexeme literal`
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file as a single expression and prints its AST
    Parse { filename: Option<PathBuf> },

    /// Evaluates input from a file as a single expression and prints the result
    Evaluate { filename: Option<PathBuf> },

    /// Runs input from a file as a program
    Run { filename: Option<PathBuf> },

    /// Starts an interactive session
    Repl,
}

/// Reads a UTF‑8 source file through a read‑only memory map.
fn read_source(filename: &Path) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;

    let len = file
        .metadata()
        .context(format!("Failed to stat file {:?}", filename))?
        .len();

    // Zero‑length files cannot be mapped.
    if len == 0 {
        return Ok(String::new());
    }

    // SAFETY: the map is read‑only and copied out before it is dropped.
    let mmap = unsafe { Mmap::map(&file) }.context(format!("Failed to map file {:?}", filename))?;

    let text = std::str::from_utf8(&mmap)
        .context(format!("File {:?} is not valid UTF-8", filename))?
        .to_owned();

    info!("Read {} bytes from {:?}", text.len(), filename);

    Ok(text)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'rulox::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("rulox::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn report(errors: &[LoxError]) {
    for e in errors {
        debug!("Diagnostic: {}", e);
        eprintln!("{}", e);
    }
}

/// Exit code for a failed unit: runtime failures differ from static ones.
fn exit_code(errors: &[LoxError]) -> i32 {
    if errors.iter().any(LoxError::is_runtime) {
        EXIT_RUNTIME_ERROR
    } else {
        EXIT_COMPILE_ERROR
    }
}

fn no_input() -> ! {
    info!("No filepath provided");
    println!("No input filepath was provided. Exiting...");
    std::process::exit(0);
}

fn tokenize(source: &str, json: bool) -> Result<()> {
    let mut tokenized = true;

    for token in Scanner::new(source) {
        match token {
            Ok(token) if json => println!("{}", serde_json::to_string(&token)?),
            Ok(token) => println!("{}", token),
            Err(e) => {
                tokenized = false;
                eprintln!("{}", e);
            }
        }
    }

    if !tokenized {
        debug!("Tokenization failed, exiting with code {}", EXIT_COMPILE_ERROR);
        std::process::exit(EXIT_COMPILE_ERROR);
    }

    Ok(())
}

fn parse(source: &str) {
    let (tokens, lex_errors) = scan_tokens(source);
    report(&lex_errors);

    match Parser::new(tokens).parse_expression() {
        Ok(expr) if lex_errors.is_empty() => println!("{}", AstPrinter::print(&expr)),
        Ok(_) => std::process::exit(EXIT_COMPILE_ERROR),
        Err(errors) => {
            report(&errors);
            std::process::exit(EXIT_COMPILE_ERROR);
        }
    }
}

fn repl() -> Result<()> {
    let mut lox = Lox::stdout();
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "выход" || input == "exit" {
            break;
        }

        match lox.run_line(input) {
            Ok(Some(value)) => println!("{}", value),
            Ok(None) => {}
            Err(errors) => report(&errors),
        }
    }

    info!("REPL finished");
    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        // A silent logger still has to be installed.
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Commands::Tokenize { filename, json } => {
            let filename = filename.unwrap_or_else(|| no_input());
            tokenize(&read_source(&filename)?, json)?;
        }

        Commands::Parse { filename } => {
            let filename = filename.unwrap_or_else(|| no_input());
            parse(&read_source(&filename)?);
        }

        Commands::Evaluate { filename } => {
            let filename = filename.unwrap_or_else(|| no_input());
            let source = read_source(&filename)?;

            match Lox::stdout().evaluate(&source) {
                Ok(value) => println!("{}", value),
                Err(errors) => {
                    report(&errors);
                    std::process::exit(exit_code(&errors));
                }
            }
        }

        Commands::Run { filename } => {
            let filename = filename.unwrap_or_else(|| no_input());
            let source = read_source(&filename)?;

            if let Err(errors) = Lox::stdout().run(&source) {
                report(&errors);
                std::process::exit(exit_code(&errors));
            }

            info!("Program executed successfully");
        }

        Commands::Repl => repl()?,
    }

    Ok(())
}
