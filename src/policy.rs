//! Policies for producers that run dry before the others

use alloc::string::{String, ToString};
use core::{fmt, str::FromStr};

use crate::error::ParsePolicyError;

/// How the merged sequence behaves once the active producer reports that it's out of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InequalityHandling {
    /// Rewind the exhausted producer and keep going. Once every producer was rewound at
    /// least once, the whole sequence is over for good.
    Reset,
    /// Skip exhausted producers, moving on to the next one that still has data. Every item of
    /// every producer is yielded exactly once.
    Relocate,
    /// Keep reporting more items; the exhausted producer gets asked for an item anyway and is
    /// expected to produce an empty value. Ends only once all producers are exhausted.
    PassNull,
    /// End the sequence as soon as any producer runs dry.
    StopEveryone,
}

impl InequalityHandling {
    /// All known policies
    pub const ALL: [Self; 4] = [
        Self::Reset,
        Self::Relocate,
        Self::PassNull,
        Self::StopEveryone,
    ];

    /// Canonical configuration name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reset => "RESET",
            Self::Relocate => "RELOCATE",
            Self::PassNull => "PASS_NULL",
            Self::StopEveryone => "STOP_EVERYONE",
        }
    }
}

impl fmt::Display for InequalityHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InequalityHandling {
    type Err = ParsePolicyError;

    /// Accepts `PASS_NULL`, `pass-null`, `PassNull` and so on
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        Ok(match normalized.as_str() {
            "reset" => Self::Reset,
            "relocate" => Self::Relocate,
            "passnull" => Self::PassNull,
            "stopeveryone" => Self::StopEveryone,
            _ => return Err(ParsePolicyError(s.to_string())),
        })
    }
}

/// Policy as it was configured, valid or not.
///
/// A [`RoundRobin`](crate::RoundRobin) only dispatches with [`PolicySetting::Valid`];
/// anything else makes [`has_next`](crate::RoundRobin::has_next) fail with
/// [`MergeError::InvalidPolicy`](crate::MergeError::InvalidPolicy).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PolicySetting {
    /// No policy was configured
    #[default]
    Unset,
    /// A raw configuration value that isn't a known policy
    Unrecognized(String),
    Valid(InequalityHandling),
}

impl PolicySetting {
    /// Parses a raw configuration value, keeping it around if it's not recognized
    pub fn from_name(name: &str) -> Self {
        match name.parse() {
            Ok(policy) => Self::Valid(policy),
            Err(ParsePolicyError(raw)) => Self::Unrecognized(raw),
        }
    }

    /// The valid policy, or the offending value for diagnostics
    pub fn validate(&self) -> Result<InequalityHandling, String> {
        match self {
            Self::Valid(policy) => Ok(*policy),
            Self::Unrecognized(raw) => Err(raw.clone()),
            Self::Unset => Err("<unset>".to_string()),
        }
    }
}

impl From<InequalityHandling> for PolicySetting {
    fn from(policy: InequalityHandling) -> Self {
        Self::Valid(policy)
    }
}
