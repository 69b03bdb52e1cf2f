use serde::{Deserialize, Serialize};

use crate::time::Duration;

/// Best-case and worst-case execution time of each job.
///
/// These are inputs obtained from a timing analysis of the task's
/// code; LET communication decouples them from the visible data flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    pub bcet: Duration,
    pub wcet: Duration,
}

impl Execution {
    /// Construct a new execution-time bound, where `bcet <= wcet`.
    pub fn new(bcet: Duration, wcet: Duration) -> Result<Self, super::TaskError> {
        let ex = Execution { bcet, wcet };
        ex.validate()?;
        Ok(ex)
    }

    pub(super) fn validate(&self) -> Result<(), super::TaskError> {
        if self.bcet > self.wcet {
            Err(super::TaskError::ExecutionOrder {
                bcet: self.bcet,
                wcet: self.wcet,
            })
        } else {
            Ok(())
        }
    }
}
