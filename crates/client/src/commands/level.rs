use anyhow::Result;
use clap::Parser;
use clouds_core::LevelId;

use super::{Context, UserArg};
use crate::output;

/// List levels with their lock state
#[derive(Parser, Debug)]
pub struct Levels {
    #[command(flatten)]
    user: UserArg,
}

impl Levels {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let levels = ctx.service.levels(&self.user.id())?;
        output::print_levels(&levels, ctx.json)
    }
}

/// Mark a level complete and collect its points
#[derive(Parser, Debug)]
pub struct CompleteLevel {
    #[command(flatten)]
    user: UserArg,

    /// Level identifier (e.g. wellness_whirlwind)
    #[arg(value_name = "LEVEL")]
    level: String,

    /// Complete even if the level is still locked
    #[arg(long)]
    force: bool,
}

impl CompleteLevel {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let user = self.user.id();
        let level = LevelId::new(self.level);

        if !self.force {
            let stored = ctx.service.load_or_create(&user)?;
            if !ctx.service.engine().is_level_unlocked(&stored.record, &level)? {
                anyhow::bail!("level '{}' is still locked (use --force to override)", level);
            }
        }

        let applied = ctx.service.complete_level(&user, &level)?;
        output::print_applied(&user, &applied, ctx.json)
    }
}
