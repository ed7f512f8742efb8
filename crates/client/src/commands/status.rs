use anyhow::Result;
use clap::Parser;

use super::{Context, UserArg};
use crate::output;

/// Show faith points, filters and completed levels
#[derive(Parser, Debug)]
pub struct Status {
    #[command(flatten)]
    user: UserArg,
}

impl Status {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let user = self.user.id();
        let stored = ctx.service.load_or_create(&user)?;
        let meter = ctx.service.engine().faith_meter(&stored.record);

        output::print_status(&user, stored.version, &stored.record, &meter, ctx.json)?;

        if !ctx.json
            && let Some(next) = ctx.service.engine().next_reward(&stored.record)
        {
            println!(
                "Next filter: {} in {} points",
                next.rule.reward_id, next.points_needed
            );
        }

        Ok(())
    }
}
