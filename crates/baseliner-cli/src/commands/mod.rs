//! CLI command implementations

pub mod check;
pub mod explain;
pub mod features;
pub mod init;

pub use check::CheckArgs;
pub use explain::ExplainArgs;
pub use features::FeaturesArgs;
pub use init::InitArgs;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze files for browser compatibility issues
    Check(CheckArgs),

    /// Show support details for a catalogued feature
    Explain(ExplainArgs),

    /// List the catalogued web-platform features
    Features(FeaturesArgs),

    /// Write a starter baseliner.toml in the current directory
    Init(InitArgs),
}
