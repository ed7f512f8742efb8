use anyhow::{Context as _, Result};
use clap::Parser;
use clouds_core::{Challenge, LevelId};
use console::style;

use super::{Context, UserArg};
use crate::output;

/// Play a quiz-style level challenge
///
/// Without answers the prompts are printed. With `--answers` the picks are
/// scored against the catalog script and the level is completed.
#[derive(Parser, Debug)]
pub struct ChallengeCmd {
    #[command(flatten)]
    user: UserArg,

    /// Level identifier (e.g. office_inferno)
    #[arg(value_name = "LEVEL")]
    level: String,

    /// Zero-based response index for each prompt, comma separated
    #[arg(short, long, value_delimiter = ',', conflicts_with = "correct")]
    answers: Vec<usize>,

    /// Number of correct answers, skipping the script
    #[arg(long)]
    correct: Option<u32>,
}

impl ChallengeCmd {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let user = self.user.id();
        let level = LevelId::new(self.level);

        let correct = match self.correct {
            Some(correct) => correct,
            None => {
                let challenge = ctx
                    .catalog
                    .challenge(&level)
                    .with_context(|| format!("no challenge script for level '{}'", level))?;
                if self.answers.is_empty() {
                    print_prompts(challenge);
                    return Ok(());
                }
                print_feedback(challenge, &self.answers)?;
                challenge.score(&self.answers)?
            }
        };

        let applied = ctx.service.complete_challenge(&user, &level, correct)?;
        output::print_applied(&user, &applied, ctx.json)
    }
}

fn print_prompts(challenge: &Challenge) {
    println!("{}", style(&challenge.title).bold().green());
    for (index, prompt) in challenge.prompts.iter().enumerate() {
        println!();
        println!("{} {}", style(format!("{}.", index + 1)).bold(), prompt.prompt);
        for (choice, response) in prompt.responses.iter().enumerate() {
            println!("   [{}] {}", choice, response.text);
        }
    }
}

fn print_feedback(challenge: &Challenge, answers: &[usize]) -> Result<()> {
    for (prompt, &choice) in answers.iter().enumerate() {
        let response = challenge.response(prompt, choice)?;
        let mark = if response.healthy {
            style("✓").green()
        } else {
            style("✗").red()
        };
        println!("{} {}", mark, response.feedback);
    }
    Ok(())
}
