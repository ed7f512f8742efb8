use anyhow::Result;
use clap::Parser;

use super::{Context, UserArg};
use crate::output;

/// Redeem the referral bonus
#[derive(Parser, Debug)]
pub struct Referral {
    #[command(flatten)]
    user: UserArg,
}

impl Referral {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let user = self.user.id();
        let applied = ctx.service.redeem_referral(&user)?;
        output::print_applied(&user, &applied, ctx.json)
    }
}

/// Finish the tutorial (the bonus is paid once)
#[derive(Parser, Debug)]
pub struct Tutorial {
    #[command(flatten)]
    user: UserArg,
}

impl Tutorial {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let user = self.user.id();
        let applied = ctx.service.complete_tutorial(&user)?;
        output::print_applied(&user, &applied, ctx.json)
    }
}
