use clap::{Parser, ValueEnum};
use hrps::{PsCommand, RewriteConfig, SubstitutionMode};
use std::io::Write;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hrps")]
#[command(about = "ps with human-readable VSZ and RSS columns", long_about = None)]
struct Cli {
    /// Options passed to ps after its "u" flag, concatenated
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    ps_args: Vec<String>,

    /// Listing program to run
    #[arg(long = "ps", env = "HRPS_PS", default_value = "ps")]
    program: String,

    /// How formatted sizes are written back into each line
    #[arg(long, env = "HRPS_SUBSTITUTION", value_enum, default_value_t = Substitution::FirstMatch)]
    substitution: Substitution,

    /// Header name of the virtual size column
    #[arg(long, default_value = "VSZ")]
    vsz_column: String,

    /// Header name of the resident size column
    #[arg(long, default_value = "RSS")]
    rss_column: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Substitution {
    /// Replace the first matching text in the line (historical output)
    FirstMatch,
    /// Replace the field at the column position
    ByField,
}

impl From<Substitution> for SubstitutionMode {
    fn from(value: Substitution) -> Self {
        match value {
            Substitution::FirstMatch => SubstitutionMode::FirstMatch,
            Substitution::ByField => SubstitutionMode::ByField,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging, kept off stdout
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = RewriteConfig {
        vsz_column: cli.vsz_column,
        rss_column: cli.rss_column,
        substitution: cli.substitution.into(),
    };
    let lister = PsCommand::new(cli.program);

    let output = match hrps::run(&lister, cli.ps_args.as_slice(), config) {
        Ok(output) => output,
        Err(e) => {
            error!("hrps failed: {}", e);
            std::process::exit(1);
        }
    };

    debug!("Writing {} bytes", output.len());
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
