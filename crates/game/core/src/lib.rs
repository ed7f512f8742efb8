//! Deterministic progression rules for Queen of the Clouds.
//!
//! `clouds-core` defines the canonical rules (faith points, reward unlocks,
//! level gating) and exposes pure APIs reused by the runtime and offline
//! tools. All record changes flow through [`engine::ProgressionEngine`]; no
//! function in this crate performs I/O.
pub mod action;
pub mod challenge;
pub mod config;
pub mod engine;
pub mod error;
pub mod meter;
pub mod state;

pub use action::{
    ActionResult, Award, AwardPoints, CompleteChallenge, CompleteLevel, CompleteTutorial,
    ContentEvent, ContentKind, LevelCompletion, ProgressionAction, ProgressionTransition,
    RecordContent, RedeemReferral, TutorialCompletion,
};
pub use challenge::{Challenge, ChallengeError, ChallengePrompt, ChallengeResponse};
pub use config::{
    ChallengeScoring, ConfigError, ContentAwards, LevelDefinition, ProgressionConfig, RewardRule,
};
pub use engine::{EngineError, LevelStatus, Outcome, ProgressionEngine, TransitionPhase};
pub use error::{ErrorSeverity, ProgressionError};
pub use meter::{FaithMeter, NextReward};
pub use state::{LevelId, Points, ProgressionRecord, RewardId};
