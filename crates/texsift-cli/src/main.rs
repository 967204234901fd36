use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use texsift_log::LogFilter;
use texsift_run::Compiler;
use texsift_term::{colors_enabled, TeeWriter};

#[derive(Parser)]
#[command(name = "texsift")]
#[command(version, about = "Condensing filter for TeX engine output", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a TeX engine and condense its terminal output
    Run {
        /// Engine binary, e.g. pdflatex
        #[arg(value_name = "ENGINE")]
        engine: String,
        /// Arguments passed through to the engine
        #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
        /// Mirror the filtered output into this file
        #[arg(long, value_name = "FILE", default_value = "texsift.out")]
        tee: PathBuf,
        /// Disable ANSI styling
        #[arg(long)]
        no_color: bool,
    },
    /// Filter an existing transcript or .log file
    Parse {
        /// Path to the transcript
        #[arg(value_name = "FILE")]
        path: PathBuf,
        /// Emit the chunk stream as JSON instead of styled text
        #[arg(long)]
        json: bool,
        /// Disable ANSI styling
        #[arg(long)]
        no_color: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            engine,
            args,
            tee,
            no_color,
        } => {
            let compiler = Compiler::new(&engine).with_args(args);
            if compiler.locate().is_err() {
                eprintln!("texsift: `{engine}` not found on PATH");
                std::process::exit(1);
            }
            let transcript = File::create(&tee)
                .with_context(|| format!("creating transcript file {}", tee.display()))?;
            let mut sink = TeeWriter::new(vec![
                Box::new(io::stdout()),
                Box::new(transcript),
            ]);
            let color = colors_enabled(no_color);
            let code = compiler.run(LogFilter::new(), &mut sink, color)?;
            std::process::exit(code);
        }
        Commands::Parse {
            path,
            json,
            no_color,
        } => {
            let file = File::open(&path)
                .with_context(|| format!("opening transcript {}", path.display()))?;
            let reader = BufReader::new(file);
            if json {
                let chunks = texsift_run::collect(reader, LogFilter::new())?;
                println!("{}", serde_json::to_string_pretty(&chunks)?);
            } else {
                let mut sink = TeeWriter::new(vec![Box::new(io::stdout())]);
                let color = colors_enabled(no_color);
                texsift_run::pump(reader, LogFilter::new(), &mut sink, color)?;
            }
            Ok(())
        }
    }
}
