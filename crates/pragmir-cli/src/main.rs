use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use pragmir_core::Language;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pragmir")]
#[command(about = "Parse OpenMP/OpenACC directives and emit their canonical form")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read directive lines and emit each one's canonical rendering.
    Parse {
        /// Input file; stdin when omitted.
        input: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "c")]
        language: LanguageArg,

        #[arg(short, long)]
        verbose: bool,
    },

    /// Translate directives between host-language surface syntaxes.
    Convert {
        input: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "c")]
        from: LanguageArg,

        #[arg(long, value_enum, default_value = "fortran-free")]
        to: LanguageArg,
    },

    /// Dump the parsed IR of each directive as JSON.
    Dump {
        input: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "c")]
        language: LanguageArg,

        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LanguageArg {
    C,
    Cxx,
    FortranFree,
    FortranFixed,
}

impl From<LanguageArg> for Language {
    fn from(language: LanguageArg) -> Self {
        match language {
            LanguageArg::C => Language::C,
            LanguageArg::Cxx => Language::Cxx,
            LanguageArg::FortranFree => Language::FortranFree,
            LanguageArg::FortranFixed => Language::FortranFixed,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            input,
            language,
            verbose,
        } => cmd_parse(input, language.into(), verbose),
        Commands::Convert { input, from, to } => cmd_convert(input, from.into(), to.into()),
        Commands::Dump {
            input,
            language,
            pretty,
        } => cmd_dump(input, language.into(), pretty),
    }
}

fn read_input(input: Option<PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn directive_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn cmd_parse(input: Option<PathBuf>, language: Language, verbose: bool) -> Result<()> {
    let text = read_input(input)?;
    let mut failures = 0usize;
    let mut total = 0usize;

    for (line_no, line) in directive_lines(&text) {
        total += 1;
        match pragmir_parser::parse(line, language) {
            Ok(directive) => {
                if verbose {
                    println!(
                        "{} {} ({} clauses)",
                        "ok".bright_green().bold(),
                        directive.kind().name(),
                        directive.clause_count()
                    );
                }
                println!("{}", pragmir_emit::render(&directive));
            }
            Err(error) => {
                failures += 1;
                eprintln!("{} line {}: {}", "error:".bright_red().bold(), line_no, error);
            }
        }
    }

    if verbose {
        println!(
            "{} {}/{} directives parsed",
            "done:".bright_blue().bold(),
            total - failures,
            total
        );
    }
    if failures > 0 {
        anyhow::bail!("{failures} of {total} lines failed to parse");
    }
    Ok(())
}

fn cmd_convert(input: Option<PathBuf>, from: Language, to: Language) -> Result<()> {
    let text = read_input(input)?;
    let mut failures = 0usize;

    for (line_no, line) in directive_lines(&text) {
        match pragmir_emit::convert(line, from, to) {
            Ok(converted) => println!("{}", converted),
            Err(error) => {
                failures += 1;
                eprintln!("{} line {}: {}", "error:".bright_red().bold(), line_no, error);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} lines failed to convert");
    }
    Ok(())
}

fn cmd_dump(input: Option<PathBuf>, language: Language, pretty: bool) -> Result<()> {
    let text = read_input(input)?;

    for (line_no, line) in directive_lines(&text) {
        let directive = pragmir_parser::parse(line, language)
            .with_context(|| format!("line {line_no}"))?;
        let json = if pretty {
            serde_json::to_string_pretty(&directive)?
        } else {
            serde_json::to_string(&directive)?
        };
        println!("{}", json);
    }
    Ok(())
}
