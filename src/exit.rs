// src/exit.rs
//! Process exit codes for `hierank`.
//!
//! Provides a stable contract for scripts and automation.

use std::process::Termination;

use crate::error::RankError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum HierankExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (I/O, malformed experiment file).
    Error = 1,
    /// Input hierarchy file does not exist.
    InputNotFound = 2,
    /// Hierarchy has a cycle or a node with several parents.
    StructuralInvalid = 3,
    /// Ranking configuration rejected before solving.
    InvalidConfig = 4,
}

impl HierankExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Exit code for a failed run. Errors that are not a [`RankError`] map
    /// to [`HierankExit::Error`].
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<RankError>() {
            Some(RankError::InputNotFound { .. }) => Self::InputNotFound,
            Some(RankError::StructuralInvalid(_)) => Self::StructuralInvalid,
            Some(RankError::InvalidConfig(_)) => Self::InvalidConfig,
            Some(RankError::Io { .. } | RankError::ConfigFile { .. }) | None => Self::Error,
        }
    }
}

impl Termination for HierankExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

impl From<HierankExit> for std::process::ExitCode {
    fn from(code: HierankExit) -> Self {
        code.report()
    }
}
