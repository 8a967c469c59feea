//! Command-line argument definitions

use clap::{ArgAction, Args};

use crate::output::OutputFormat;
use crate::stats::LoadPolicy;

/// Loading and classification arguments
#[derive(Args, Debug, Default)]
pub struct ClassifyArgs {
    /// Handling of a trailing partial record
    #[arg(long, value_enum, env = "AOMKF_LOAD_POLICY")]
    pub load_policy: Option<LoadPolicy>,

    /// Shorthand for --load-policy strict
    #[arg(long)]
    pub strict: bool,

    /// Require more than two frames between keyframes (constant-q rule)
    #[arg(long, value_name = "BOOL", action = ArgAction::Set, env = "AOMKF_Q_MODE")]
    pub q_mode: Option<bool>,
}

/// Output arguments
#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, env = "AOMKF_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Append a GOP summary
    #[arg(long)]
    pub summary: bool,

    /// Print the resolved configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}
