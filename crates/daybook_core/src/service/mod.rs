//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the CLI decoupled from storage details.
//!
//! # Invariants
//! - Services never bypass repository validation.
//! - Every write returns the record as read back from storage.

use crate::calendar::DateError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod dashboard_service;
pub mod event_service;
pub mod ledger_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    Repo(RepoError),
    Date(DateError),
    /// Write succeeded but the read-back disagrees with it.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Date(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Date(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DateError> for ServiceError {
    fn from(value: DateError) -> Self {
        Self::Date(value)
    }
}
