use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "clause-audit")]
#[command(about = "Clause-by-clause risk and ambiguity audit of a contract")]
#[command(version)]
pub struct CliConfig {
    /// Contract text file to audit
    pub input: String,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory audit records and exports are written to
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Classify at most this many clauses
    #[arg(long)]
    pub max_clauses: Option<usize>,

    /// Export formats (json, csv)
    #[arg(long, value_delimiter = ',')]
    pub formats: Option<Vec<String>>,

    /// Zip the exports into one archive
    #[arg(long)]
    pub bundle: bool,

    /// Disable every network-backed service
    #[arg(long)]
    pub offline: bool,

    /// Skip per-clause explanations
    #[arg(long)]
    pub no_explain: bool,

    /// Segment and classify without persisting anything
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long)]
    pub log_json: bool,
}
