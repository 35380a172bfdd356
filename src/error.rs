use crate::permutation::Exclusions;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DrawError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no derangement exists on {n} element(s)")]
    ImpossibleConstraint { n: usize },

    #[error("permutation sizes differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("invalid permutation: {0}")]
    InvalidPermutation(String),

    #[error(
        "gave up after {attempts} candidate(s) with {accepted}/{d} rounds accepted \
         (n = {n}, exclusions: {})",
        describe_exclusions(.exclusions)
    )]
    SamplingExhausted {
        n: usize,
        d: usize,
        accepted: usize,
        attempts: u64,
        exclusions: Option<Exclusions>,
    },
}

fn describe_exclusions(exclusions: &Option<Exclusions>) -> String {
    match exclusions {
        Some(exclusions) => exclusions.to_string(),
        None => "none".to_string(),
    }
}

#[derive(Debug, Error)]
pub enum SantaError {
    #[error("participant names must not be empty")]
    EmptyName,

    #[error("participant '{0}' appears more than once")]
    DuplicateParticipant(String),

    #[error("unknown participant '{0}'")]
    UnknownParticipant(String),

    #[error("expected {expected} gift label(s), got {actual}")]
    LabelCountMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Draw(#[from] DrawError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse draw configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid draw configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{gifter}' maps to {path}, which already holds another participant's assignment")]
    PathCollision { gifter: String, path: PathBuf },
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error(transparent)]
    Compose(#[from] SantaError),

    #[error("notify {gifter}: {source}")]
    Notify {
        gifter: String,
        #[source]
        source: NotifyError,
    },
}
