use anyhow::Result;
use clap::Parser;

use super::{Context, UserArg};
use crate::output;

/// Create an empty progression record for a new user
#[derive(Parser, Debug)]
pub struct Create {
    #[command(flatten)]
    user: UserArg,
}

impl Create {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let user = self.user.id();
        let stored = ctx.service.create(&user)?;
        let meter = ctx.service.engine().faith_meter(&stored.record);
        output::print_status(&user, stored.version, &stored.record, &meter, ctx.json)
    }
}
