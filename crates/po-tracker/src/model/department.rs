//! The fixed set of workflow stages an item passes through.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A departmental stage. The declaration order is the workflow order, and
/// the derived `Ord` reflects it: `Drafting < ... < Delivery`.
///
/// The set is fixed and domain-specific; stages are not user-configurable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Drafting,
    Purchasing,
    Production,
    Qc,
    Delivery,
}

impl Department {
    /// All stages in workflow order.
    pub const ALL: [Department; 5] = [
        Department::Drafting,
        Department::Purchasing,
        Department::Production,
        Department::Qc,
        Department::Delivery,
    ];

    /// The terminal stage: completing it triggers delivery creation.
    pub fn is_terminal(self) -> bool {
        matches!(self, Department::Delivery)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Department::Drafting => "drafting",
            Department::Purchasing => "purchasing",
            Department::Production => "production",
            Department::Qc => "qc",
            Department::Delivery => "delivery",
        }
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejection of a department tag outside the fixed enumeration.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown department: {0}")]
pub struct UnknownDepartment(pub String);

impl FromStr for Department {
    type Err = UnknownDepartment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drafting" => Ok(Department::Drafting),
            "purchasing" => Ok(Department::Purchasing),
            "production" => Ok(Department::Production),
            "qc" => Ok(Department::Qc),
            "delivery" => Ok(Department::Delivery),
            other => Err(UnknownDepartment(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_tag() {
        for dept in Department::ALL {
            assert_eq!(dept.as_str().parse::<Department>().unwrap(), dept);
        }
    }

    #[test]
    fn rejects_unknown_tag() {
        assert!("shipping".parse::<Department>().is_err());
    }

    #[test]
    fn delivery_is_the_only_terminal_stage() {
        let terminal: Vec<_> = Department::ALL
            .into_iter()
            .filter(|d| d.is_terminal())
            .collect();
        assert_eq!(terminal, vec![Department::Delivery]);
    }
}
