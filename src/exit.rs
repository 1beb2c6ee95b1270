// src/exit.rs
//! Process exit codes for `bpmnscope`.
//!
//! Provides a stable contract for scripts and CI pipelines.

use std::process::{ExitCode, Termination};

use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum BpmnScopeExit {
    /// Every document analyzed and nothing crossed the failure threshold.
    Success = 0,
    /// Generic error (I/O, config, serialization).
    Error = 1,
    /// At least one document could not be parsed.
    ParseFailure = 2,
    /// At least one document reached the `--fail-on` severity.
    RiskThreshold = 3,
}

impl BpmnScopeExit {
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl Termination for BpmnScopeExit {
    fn report(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// Errors are reported on stderr and become [`BpmnScopeExit::Error`].
impl From<anyhow::Result<BpmnScopeExit>> for BpmnScopeExit {
    fn from(res: anyhow::Result<BpmnScopeExit>) -> Self {
        match res {
            Ok(code) => code,
            Err(e) => {
                eprintln!("{} {e:#}", "error:".red().bold());
                Self::Error
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_conversion() {
        let ok: anyhow::Result<BpmnScopeExit> = Ok(BpmnScopeExit::RiskThreshold);
        assert_eq!(BpmnScopeExit::from(ok), BpmnScopeExit::RiskThreshold);
        let failed: anyhow::Result<BpmnScopeExit> = Err(anyhow::anyhow!("config missing"));
        assert_eq!(BpmnScopeExit::from(failed), BpmnScopeExit::Error);
    }
}
