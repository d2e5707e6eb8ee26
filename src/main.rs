use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::Parser;

use doxtract::config::JobConfig;
use doxtract::runner::{self, RunEvent};

/// Extract a transaction table from a .docx statement into .xlsx or .csv.
#[derive(Parser)]
#[command(name = "doxtract", version, about)]
struct Args {
    /// Input .docx document (overrides the config file)
    input: Option<PathBuf>,

    /// Output .xlsx or .csv file (overrides the config file)
    output: Option<PathBuf>,

    /// TOML configuration file describing the table layout
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Index of the table to process (overrides the config file)
    #[arg(long)]
    table_index: Option<usize>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let mut job = match &args.config {
        Some(path) => JobConfig::from_file(path)?,
        None => JobConfig::default(),
    };

    if let Some(input) = args.input {
        job.input.path = input;
    }
    if let Some(output) = args.output {
        job.output.path = output;
    }
    if let Some(table_index) = args.table_index {
        job.input.table_index = table_index;
    }

    job.validate()?;

    // The run happens on a worker thread; this loop only renders events.
    for event in runner::spawn(job) {
        match event {
            RunEvent::Log(line) => println!("{line}"),
            RunEvent::Finished(Ok(())) => return Ok(ExitCode::SUCCESS),
            RunEvent::Finished(Err(e)) => {
                eprintln!("{e}");
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    bail!("run ended without a result");
}
