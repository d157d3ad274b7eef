use clap::Parser;

use courtside_agent::Pricing;

/// Courtside — terminal chat for managed agent runtimes, with per-session
/// token/cost/time analytics.
#[derive(Parser, Debug)]
#[command(name = "courtside", version, about)]
pub struct Args {
    /// Agent identifier at the runtime.
    #[arg(long)]
    pub agent_id: String,

    /// Agent alias identifier.
    #[arg(long)]
    pub agent_alias_id: String,

    /// Runtime endpoint override.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Dollar cost per input token.
    #[arg(long, default_value_t = Pricing::DEFAULT_RATE)]
    pub input_rate: f64,

    /// Dollar cost per output token.
    #[arg(long, default_value_t = Pricing::DEFAULT_RATE)]
    pub output_rate: f64,

    /// Do not ask the runtime for trace records.
    #[arg(long)]
    pub no_trace: bool,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    pub fn pricing(&self) -> Pricing {
        Pricing {
            input_rate: self.input_rate,
            output_rate: self.output_rate,
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
