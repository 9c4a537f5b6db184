use clap::ValueEnum;
use oak_core::enums::ConflictStrategy;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Raw,
}

/// Conflict policy accepted by `oak import --policy`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PolicyArg {
    PreferExisting,
    PreferImported,
    Skip,
    Fail,
    Ask,
}

impl From<PolicyArg> for ConflictStrategy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::PreferExisting => Self::PreferExisting,
            PolicyArg::PreferImported => Self::PreferImported,
            PolicyArg::Skip => Self::Skip,
            PolicyArg::Fail => Self::Fail,
            PolicyArg::Ask => Self::Ask,
        }
    }
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub limit: Option<u32>,
    pub quiet: bool,
    pub verbose: bool,
    pub db: Option<String>,
}
