//! Content-creation events.

use crate::action::award::{checked_amount, grant};
use crate::action::{Award, ProgressionTransition};
use crate::config::{ContentAwards, ProgressionConfig};
use crate::engine::EngineError;
use crate::state::ProgressionRecord;

/// Kind of generated content.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ContentKind {
    Meme,
    /// A batch of generated tweets.
    Tweet,
    VideoScript,
}

/// One content-creation action and the points it earns.
///
/// Produced by the calling context after the generation service returns;
/// never persisted by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentEvent {
    pub kind: ContentKind,
    pub points_awarded: i64,
}

impl ContentEvent {
    pub fn new(kind: ContentKind, points_awarded: i64) -> Self {
        Self {
            kind,
            points_awarded,
        }
    }

    /// The canonical event for `kind` under the given award table.
    pub fn for_kind(kind: ContentKind, awards: &ContentAwards) -> Self {
        let points = match kind {
            ContentKind::Meme => awards.meme,
            ContentKind::Tweet => awards.tweet_batch(),
            ContentKind::VideoScript => awards.video_script,
        };
        Self::new(kind, i64::from(points))
    }

    pub fn meme(awards: &ContentAwards) -> Self {
        Self::for_kind(ContentKind::Meme, awards)
    }

    pub fn tweet_batch(awards: &ContentAwards) -> Self {
        Self::for_kind(ContentKind::Tweet, awards)
    }

    pub fn video_script(awards: &ContentAwards) -> Self {
        Self::for_kind(ContentKind::VideoScript, awards)
    }
}

/// Awards the points carried by a [`ContentEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordContent {
    pub event: ContentEvent,
}

impl RecordContent {
    pub fn new(event: ContentEvent) -> Self {
        Self { event }
    }
}

impl ProgressionTransition for RecordContent {
    type Result = Award;

    fn pre_validate(
        &self,
        _record: &ProgressionRecord,
        _config: &ProgressionConfig,
    ) -> Result<(), EngineError> {
        checked_amount(self.event.points_awarded).map(|_| ())
    }

    fn apply(
        &self,
        record: &mut ProgressionRecord,
        config: &ProgressionConfig,
    ) -> Result<Award, EngineError> {
        let amount = checked_amount(self.event.points_awarded)?;
        Ok(grant(record, amount, config))
    }
}
