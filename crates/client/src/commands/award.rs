use anyhow::Result;
use clap::Parser;
use clouds_core::ContentKind;

use super::{Context, UserArg};
use crate::output;

/// Award faith points directly or for a piece of generated content
#[derive(Parser, Debug)]
pub struct Award {
    #[command(flatten)]
    user: UserArg,

    /// Raw number of points to award
    #[arg(
        short,
        long,
        allow_negative_numbers = true,
        required_unless_present = "content",
        conflicts_with = "content"
    )]
    points: Option<i64>,

    /// Content kind whose catalog award applies (meme, tweet, video_script)
    #[arg(short, long, value_parser = parse_content_kind)]
    content: Option<ContentKind>,
}

fn parse_content_kind(value: &str) -> Result<ContentKind, String> {
    value
        .parse()
        .map_err(|_| format!("unknown content kind '{value}'"))
}

impl Award {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let user = self.user.id();
        let applied = match (self.points, self.content) {
            (Some(points), _) => ctx.service.award_points(&user, points)?,
            (None, Some(kind)) => ctx.service.record_content(&user, kind)?,
            (None, None) => anyhow::bail!("either --points or --content is required"),
        };
        output::print_applied(&user, &applied, ctx.json)
    }
}
