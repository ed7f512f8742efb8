//! Subcommands of the `clouds` binary.

mod award;
mod bonus;
mod challenge;
mod create;
mod level;
mod status;

pub use award::Award;
pub use bonus::{Referral, Tutorial};
pub use challenge::ChallengeCmd;
pub use create::Create;
pub use level::{CompleteLevel, Levels};
pub use status::Status;

use clouds_content::Catalog;
use clouds_runtime::{ProgressionService, UserId};

/// Shared state handed to every subcommand.
pub struct Context {
    pub service: ProgressionService,
    pub catalog: Catalog,
    /// Print machine-readable JSON instead of styled text.
    pub json: bool,
}

/// `--user` argument shared by every subcommand.
#[derive(clap::Args, Clone, Debug)]
pub struct UserArg {
    /// User (angel sister) identifier
    #[arg(short, long, value_name = "USER")]
    pub user: String,
}

impl UserArg {
    pub fn id(&self) -> UserId {
        UserId::new(self.user.as_str())
    }
}
