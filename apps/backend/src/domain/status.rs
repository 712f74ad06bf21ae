//! Request workflow statuses and the stage each one belongs to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    UserRequested,
    SupervisorApproved,
    SupervisorRejected,
    TechnicalManagerApproved,
    TechnicalManagerRejected,
    EngineerApproved,
    EngineerRejected,
    CustomerOfficerApproved,
    CustomerOfficerRejected,
    Approved,
    Rejected,
    Complete,
    OrderPlaced,
    OrderCancelled,
}

/// Approval stage whose note and decider columns a status change writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionStage {
    Supervisor,
    TechnicalManager,
    Engineer,
    CustomerOfficer,
}

/// Old spellings still found in long-lived databases, with their canonical form.
pub const LEGACY_SPELLINGS: [(&str, RequestStatus); 2] = [
    ("pending", RequestStatus::UserRequested),
    ("Engineer Approved", RequestStatus::EngineerApproved),
];

impl RequestStatus {
    pub const ALL: [RequestStatus; 14] = [
        RequestStatus::UserRequested,
        RequestStatus::SupervisorApproved,
        RequestStatus::SupervisorRejected,
        RequestStatus::TechnicalManagerApproved,
        RequestStatus::TechnicalManagerRejected,
        RequestStatus::EngineerApproved,
        RequestStatus::EngineerRejected,
        RequestStatus::CustomerOfficerApproved,
        RequestStatus::CustomerOfficerRejected,
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Complete,
        RequestStatus::OrderPlaced,
        RequestStatus::OrderCancelled,
    ];

    /// Canonical wire string, also the value stored in the `status` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            RequestStatus::UserRequested => "User Requested tire",
            RequestStatus::SupervisorApproved => "supervisor approved",
            RequestStatus::SupervisorRejected => "supervisor rejected",
            RequestStatus::TechnicalManagerApproved => "technical-manager approved",
            RequestStatus::TechnicalManagerRejected => "technical-manager rejected",
            RequestStatus::EngineerApproved => "engineer approved",
            RequestStatus::EngineerRejected => "engineer rejected",
            RequestStatus::CustomerOfficerApproved => "customer-officer approved",
            RequestStatus::CustomerOfficerRejected => "customer-officer rejected",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Complete => "complete",
            RequestStatus::OrderPlaced => "order placed",
            RequestStatus::OrderCancelled => "order cancelled",
        }
    }

    fn lookup(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == raw)
            .or_else(|| {
                LEGACY_SPELLINGS
                    .iter()
                    .find(|(legacy, _)| *legacy == raw)
                    .map(|(_, status)| *status)
            })
    }

    /// Parse client input. Unknown values are a validation error.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Self::lookup(raw).ok_or_else(|| {
            DomainError::validation(ValidationKind::InvalidStatus, "Invalid status")
        })
    }

    /// Parse a value read back from storage. Unknown values mean the row is corrupt.
    pub fn from_db(raw: &str) -> Result<Self, DomainError> {
        Self::lookup(raw).ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Unknown request status in storage: {raw}"),
            )
        })
    }

    pub fn decision_stage(self) -> Option<DecisionStage> {
        use RequestStatus::*;
        match self {
            SupervisorApproved | SupervisorRejected => Some(DecisionStage::Supervisor),
            TechnicalManagerApproved | TechnicalManagerRejected => {
                Some(DecisionStage::TechnicalManager)
            }
            EngineerApproved | EngineerRejected | Complete => Some(DecisionStage::Engineer),
            CustomerOfficerApproved | CustomerOfficerRejected | OrderPlaced | OrderCancelled => {
                Some(DecisionStage::CustomerOfficer)
            }
            UserRequested | Approved | Rejected => None,
        }
    }

    pub fn is_rejection(self) -> bool {
        matches!(
            self,
            RequestStatus::Rejected
                | RequestStatus::SupervisorRejected
                | RequestStatus::TechnicalManagerRejected
                | RequestStatus::EngineerRejected
                | RequestStatus::CustomerOfficerRejected
        )
    }

    /// Open requests block a new request for the same vehicle.
    pub fn is_open(self) -> bool {
        !(self.is_rejection()
            || matches!(
                self,
                RequestStatus::Complete | RequestStatus::OrderPlaced | RequestStatus::OrderCancelled
            ))
    }

    /// Fulfilled requests start the per-vehicle cooldown.
    pub fn counts_as_fulfilled(self) -> bool {
        matches!(self, RequestStatus::Complete | RequestStatus::OrderPlaced)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RequestStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RequestStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::lookup(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid status '{raw}'")))
    }
}

impl DecisionStage {
    pub fn as_str(self) -> &'static str {
        match self {
            DecisionStage::Supervisor => "supervisor",
            DecisionStage::TechnicalManager => "technical-manager",
            DecisionStage::Engineer => "engineer",
            DecisionStage::CustomerOfficer => "customer-officer",
        }
    }
}
