use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// When a job's inputs and outputs become visible to other tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CommunicationPolicy {
    /// Read at start of execution, write at completion.
    Implicit,
    /// Logical execution time: read at release, write at the deadline.
    Let,
}

impl CommunicationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommunicationPolicy::Implicit => "implicit",
            CommunicationPolicy::Let => "LET",
        }
    }
}

impl FromStr for CommunicationPolicy {
    type Err = super::TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "implicit" => Ok(CommunicationPolicy::Implicit),
            "LET" => Ok(CommunicationPolicy::Let),
            other => Err(super::TaskError::UnknownCommunicationPolicy(other.to_owned())),
        }
    }
}

impl TryFrom<String> for CommunicationPolicy {
    type Error = super::TaskError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CommunicationPolicy> for String {
    fn from(policy: CommunicationPolicy) -> String {
        policy.as_str().to_owned()
    }
}

impl fmt::Display for CommunicationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
