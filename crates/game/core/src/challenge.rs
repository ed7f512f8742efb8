//! Quiz-style level challenges.
//!
//! A challenge is a fixed script of prompts, each offering a few responses of
//! which some are healthy. Scoring counts healthy picks; the count feeds
//! [`crate::ProgressionEngine::complete_challenge`].

use crate::error::{ErrorSeverity, ProgressionError};
use crate::state::LevelId;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChallengeResponse {
    pub text: String,
    pub healthy: bool,
    pub feedback: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChallengePrompt {
    pub prompt: String,
    pub responses: Vec<ChallengeResponse>,
}

/// Script for one quiz-style level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Challenge {
    pub level_id: LevelId,
    pub title: String,
    pub prompts: Vec<ChallengePrompt>,
}

impl Challenge {
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Looks up the response chosen for a prompt.
    pub fn response(
        &self,
        prompt: usize,
        choice: usize,
    ) -> Result<&ChallengeResponse, ChallengeError> {
        let entry = self
            .prompts
            .get(prompt)
            .ok_or(ChallengeError::PromptOutOfRange {
                prompt,
                available: self.prompts.len(),
            })?;
        entry
            .responses
            .get(choice)
            .ok_or(ChallengeError::ResponseOutOfRange {
                prompt,
                choice,
                available: entry.responses.len(),
            })
    }

    /// Counts healthy responses; `answers[i]` is the choice for prompt `i`.
    pub fn score(&self, answers: &[usize]) -> Result<u32, ChallengeError> {
        if answers.len() != self.prompts.len() {
            return Err(ChallengeError::AnswerCountMismatch {
                expected: self.prompts.len(),
                actual: answers.len(),
            });
        }

        let mut correct = 0;
        for (prompt, &choice) in answers.iter().enumerate() {
            if self.response(prompt, choice)?.healthy {
                correct += 1;
            }
        }
        Ok(correct)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChallengeError {
    #[error("expected {expected} answers, got {actual}")]
    AnswerCountMismatch { expected: usize, actual: usize },

    #[error("prompt {prompt} does not exist ({available} prompts)")]
    PromptOutOfRange { prompt: usize, available: usize },

    #[error("prompt {prompt} has no response {choice} ({available} responses)")]
    ResponseOutOfRange {
        prompt: usize,
        choice: usize,
        available: usize,
    },
}

impl ProgressionError for ChallengeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AnswerCountMismatch { .. } => "CHALLENGE_ANSWER_COUNT_MISMATCH",
            Self::PromptOutOfRange { .. } => "CHALLENGE_PROMPT_OUT_OF_RANGE",
            Self::ResponseOutOfRange { .. } => "CHALLENGE_RESPONSE_OUT_OF_RANGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(healthy: bool) -> ChallengeResponse {
        ChallengeResponse {
            text: String::new(),
            healthy,
            feedback: String::new(),
        }
    }

    fn challenge() -> Challenge {
        Challenge {
            level_id: LevelId::from("office_inferno"),
            title: "Office Inferno".into(),
            prompts: (0..3)
                .map(|_| ChallengePrompt {
                    prompt: String::new(),
                    responses: vec![response(false), response(true), response(false)],
                })
                .collect(),
        }
    }

    #[test]
    fn counts_healthy_answers() {
        assert_eq!(challenge().score(&[1, 1, 1]).unwrap(), 3);
        assert_eq!(challenge().score(&[0, 1, 2]).unwrap(), 1);
    }

    #[test]
    fn rejects_wrong_answer_count() {
        assert_eq!(
            challenge().score(&[1]),
            Err(ChallengeError::AnswerCountMismatch {
                expected: 3,
                actual: 1
            })
        );
    }

    #[test]
    fn rejects_missing_response() {
        assert!(matches!(
            challenge().score(&[1, 5, 1]),
            Err(ChallengeError::ResponseOutOfRange {
                prompt: 1,
                choice: 5,
                ..
            })
        ));
    }
}
