use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use csvhandler_cli::{parse_default, CliError, ReadOptions, WriteOptions};
use csvhandler_row::CsvOptions;

/// csvhandler - Read and write CSV records by column name
#[derive(Parser, Debug)]
#[command(name = "csvhandler")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the records of a CSV file
    Read {
        /// Input file, `-` for stdin
        file: PathBuf,

        /// Columns to print, in order (default: all header columns)
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,

        /// Use this header instead of the first row
        #[arg(long, value_delimiter = ',')]
        header: Option<Vec<String>>,

        /// Print JSON lines
        #[arg(long)]
        json: bool,

        /// Field delimiter
        #[arg(long, default_value_t = ',')]
        delimiter: char,
    },

    /// Write JSON lines from stdin as CSV to stdout
    Write {
        /// Output columns, in order
        #[arg(long, value_delimiter = ',', required = true)]
        header: Vec<String>,

        /// Value for a column missing from a record
        #[arg(long = "default", value_name = "COLUMN=VALUE")]
        defaults: Vec<String>,

        /// Render a column in upper case
        #[arg(long)]
        upper: Vec<String>,

        /// Do not write the header line
        #[arg(long)]
        no_header_line: bool,

        /// Field delimiter
        #[arg(long, default_value_t = ',')]
        delimiter: char,
    },
}

fn open(file: &Path) -> Result<Box<dyn Read + Send>, CliError> {
    if file.as_os_str() == "-" {
        return Ok(Box::new(io::stdin()));
    }
    let handle = File::open(file).map_err(|source| CliError::Io {
        context: format!("cannot open {}", file.display()),
        source,
    })?;
    Ok(Box::new(handle))
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Read {
            file,
            columns,
            header,
            json,
            delimiter,
        } => {
            let options = ReadOptions {
                columns,
                header,
                json,
                csv: CsvOptions::default().with_delimiter(delimiter),
            };
            let stdout = io::stdout();
            let mut out = stdout.lock();
            csvhandler_cli::read(open(&file)?, &mut out, &options)?;
        }
        Command::Write {
            header,
            defaults,
            upper,
            no_header_line,
            delimiter,
        } => {
            let options = WriteOptions {
                header,
                defaults: defaults
                    .iter()
                    .map(|spec| parse_default(spec))
                    .collect::<Result<_, _>>()?,
                upper,
                header_line: !no_header_line,
                csv: CsvOptions::default().with_delimiter(delimiter),
            };
            let stdin = io::stdin();
            csvhandler_cli::write(stdin.lock(), &mut io::stdout(), &options)?;
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
