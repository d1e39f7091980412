use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod input;
mod inspect;
mod reconstruct;
mod verify_redaction;


use reconstruct::OutputFormat;

/// Reconstruct and check Certificate Transparency precertificate TBS structures.
#[derive(Parser)]
#[command(name = "precert")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log debug detail to stderr.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Log errors only.
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the precertificate TBSCertificate of a certificate.
    Reconstruct {
        /// Certificate file, DER or PEM (use - for stdin).
        #[arg(default_value = "-")]
        input: String,
        /// Output file (default: stdout).
        #[arg(short, long)]
        output: Option<String>,
        /// Output encoding.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Der)]
        format: OutputFormat,
    },
    /// List TBSCertificate extensions and the reconstruction outcome.
    Inspect {
        /// Certificate file, DER or PEM (use - for stdin).
        #[arg(default_value = "-")]
        input: String,
    },
    /// Check only the redacted subjectAltName claim.
    VerifyRedaction {
        /// Certificate file, DER or PEM (use - for stdin).
        #[arg(default_value = "-")]
        input: String,
    },
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Reconstruct {
            input,
            output,
            format,
        } => reconstruct::run(input, output.as_deref(), *format),
        Commands::Inspect { input } => inspect::run(input),
        Commands::VerifyRedaction { input } => verify_redaction::run(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
