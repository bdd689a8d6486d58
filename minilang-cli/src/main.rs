use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use minilang_core::{SAMPLE_PROGRAM, compile, machine, regenerate_source, translate_to_machine};

/// Command-line front end for the mini-language toolchain.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(long, global = true, help = "Print stage summaries to stderr")]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a program and emit lexemes, postfix and bytecode
    Compile {
        #[arg(short, long)]
        input: Option<String>,

        #[arg(short, long)]
        output: Option<String>,

        #[arg(
            long,
            value_name = "FORMAT",
            default_value = "all",
            help = "Output format: all, lexemes, postfix, bytecode"
        )]
        emit: String,
    },
    /// Translate postfix text to stack-machine code
    Machine {
        #[arg(short, long)]
        input: Option<String>,

        #[arg(short, long)]
        output: Option<String>,

        #[arg(long, help = "Keep variable names instead of slot indices")]
        keep_names: bool,
    },
    /// Rebuild mini-language source from postfix text
    Bnf {
        #[arg(short, long)]
        input: Option<String>,

        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the sample program
    Sample,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    execute(cli)
}

fn execute(cli: Cli) -> Result<()> {
    let verbose = cli.verbose;
    match cli.command {
        Command::Compile {
            input,
            output,
            emit,
        } => {
            let source = read_input(input.as_deref())?;
            let artifact = match compile(&source) {
                Ok(artifact) => artifact,
                Err(diagnostics) => {
                    for diagnostic in &diagnostics {
                        eprintln!("{}", diagnostic.render());
                    }
                    return Err(anyhow::anyhow!(
                        "validation failed with {} diagnostic(s)",
                        diagnostics.len()
                    ));
                }
            };
            if verbose {
                eprintln!(
                    "validated {} line(s), {} lexeme(s)",
                    source.split('\n').count(),
                    artifact.lexemes.len()
                );
            }

            let text = match emit.as_str() {
                "all" => serde_json::to_string_pretty(&artifact)?,
                "lexemes" => serde_json::to_string_pretty(&artifact.lexemes)?,
                "postfix" => artifact.postfix,
                "bytecode" => artifact.bytecode,
                other => return Err(anyhow::anyhow!("unsupported emit format: {other}")),
            };
            write_output(output.as_deref(), &text)?;
        }
        Command::Machine {
            input,
            output,
            keep_names,
        } => {
            let postfix = read_input(input.as_deref())?;
            let text = if keep_names {
                let instructions = machine::generate(&postfix);
                if verbose {
                    eprintln!("emitted {} instruction(s)", instructions.len());
                }
                machine::render(&instructions)
            } else {
                let program = translate_to_machine(&postfix);
                if verbose {
                    eprintln!(
                        "emitted {} instruction(s), {} variable slot(s)",
                        program.instructions.len(),
                        program.slots.len()
                    );
                }
                program.render()
            };
            write_output(output.as_deref(), &text)?;
        }
        Command::Bnf { input, output } => {
            let postfix = read_input(input.as_deref())?;
            let source =
                regenerate_source(&postfix).context("failed to translate postfix input")?;
            if verbose {
                eprintln!("regenerated {} line(s)", source.lines().count());
            }
            write_output(output.as_deref(), &source)?;
        }
        Command::Sample => write_output(None, SAMPLE_PROGRAM)?,
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read input file {path}"))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read standard input")?;
            Ok(buffer)
        }
    }
}

fn write_output(path: Option<&str>, text: &str) -> Result<()> {
    let Some(path) = path else {
        println!("{text}");
        return Ok(());
    };
    if let Some(parent) = PathBuf::from(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {parent:?}"))?;
        }
    }
    fs::write(path, text).with_context(|| format!("failed to write output file {path}"))?;
    Ok(())
}
