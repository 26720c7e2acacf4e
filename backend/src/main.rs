//! Matrixops CLI - integer matrix operations over CSV
//!
//! ```bash
//! matrixops serve                  # Start HTTP server (port 8080)
//! matrixops sum matrix.csv         # Sum every cell
//! matrixops invert matrix.csv      # Transpose
//! matrixops flatten matrix.csv     # One comma-separated line
//! matrixops multiply matrix.csv    # Product of every cell
//! matrixops echo matrix.csv        # Print the parsed grid
//! ```

use clap::{Args, Parser, Subcommand};
use matrixops::{parse_file, CsvOptions, Operation, ServerConfig};
use std::io::Write;
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "matrixops")]
#[command(about = "Transpose, flatten, sum and multiply integer matrices from CSV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Address to bind (overrides MATRIXOPS_HOST)
        #[arg(long)]
        host: Option<IpAddr>,

        /// Port to listen on (overrides MATRIXOPS_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the parsed grid
    Echo(FileArgs),

    /// Transpose the matrix
    Invert(FileArgs),

    /// Print every cell on one comma-separated line
    Flatten(FileArgs),

    /// Sum every cell
    Sum(FileArgs),

    /// Multiply every cell
    Multiply(FileArgs),
}

#[derive(Args)]
struct FileArgs {
    /// Input CSV file
    input: PathBuf,

    /// CSV delimiter
    #[arg(short, long, default_value = ",")]
    delimiter: char,

    /// Accept rows of differing lengths at the CSV layer
    #[arg(long)]
    flexible: bool,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { host, port } => cmd_serve(host, port).await,
        Commands::Echo(args) => cmd_run(Operation::Echo, &args),
        Commands::Invert(args) => cmd_run(Operation::Invert, &args),
        Commands::Flatten(args) => cmd_run(Operation::Flatten, &args),
        Commands::Sum(args) => cmd_run(Operation::Sum, &args),
        Commands::Multiply(args) => cmd_run(Operation::Multiply, &args),
    };

    if let Err(e) = result {
        eprintln!("error {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(host: Option<IpAddr>, port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ServerConfig::from_env()?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    matrixops::server::start_server(config).await?;
    Ok(())
}

fn cmd_run(op: Operation, args: &FileArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = CsvOptions {
        flexible: args.flexible,
        ..CsvOptions::with_delimiter(args.delimiter)?
    };

    let grid = parse_file(&args.input, &options)?;
    let output = op.apply(&grid)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
