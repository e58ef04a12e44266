//! Status vocabularies shared by slots, applications and reservation
//! records.
//!
//! The booking service grows new status values without versioning the
//! API, so every enum here keeps unrecognized wire strings intact in an
//! `Other` variant instead of failing deserialization.

use serde::{Deserialize, Serialize};

// --- Slot status ---

/// Lifecycle of a bookable time slot as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotStatus {
    /// Open for applications.
    Available,
    /// At least one pending application exists; more may still be filed.
    HasApplications,
    /// Allocation finished, the slot is taken.
    Reserved,
    /// Any status string this client does not know about.
    Other(String),
}

/// Visual bucket for a grid cell. Unknown statuses render like
/// `Available` but stay non-clickable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Available,
    Pending,
    Reserved,
}

impl SlotStatus {
    pub fn from_wire(raw: String) -> Self {
        match raw.as_str() {
            "available" => Self::Available,
            "has_applications" => Self::HasApplications,
            "reserved" => Self::Reserved,
            _ => Self::Other(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => "available",
            Self::HasApplications => "has_applications",
            Self::Reserved => "reserved",
            Self::Other(raw) => raw,
        }
    }

    /// Text shown inside a grid cell. Unknown statuses display their
    /// raw wire string.
    pub fn label(&self) -> &str {
        match self {
            Self::Available => "Available",
            Self::HasApplications => "Has applicants",
            Self::Reserved => "Reserved",
            Self::Other(raw) => raw,
        }
    }

    pub fn style(&self) -> CellStyle {
        match self {
            Self::Available | Self::Other(_) => CellStyle::Available,
            Self::HasApplications => CellStyle::Pending,
            Self::Reserved => CellStyle::Reserved,
        }
    }

    /// Only `available` slots accept a new application.
    pub fn is_bookable(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl Serialize for SlotStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SlotStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Self::from_wire(String::deserialize(deserializer)?))
    }
}

// --- Application status ---

/// Lifecycle of a booking application.
///
/// `pending` is the only state a student can cancel from; everything
/// past `approved` is decided by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Completed,
    NoShow,
    Other(String),
}

impl ApplicationStatus {
    pub fn from_wire(raw: String) -> Self {
        match raw.as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            "cancelled" => Self::Cancelled,
            "completed" => Self::Completed,
            "no_show" => Self::NoShow,
            _ => Self::Other(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::NoShow => "no_show",
            Self::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Cancelled => "Cancelled",
            Self::Completed => "Completed",
            Self::NoShow => "No show",
            Self::Other(raw) => raw,
        }
    }

    /// A client may withdraw an application only while it is pending.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Rejected | Self::Cancelled | Self::Completed | Self::NoShow
        )
    }
}

impl Serialize for ApplicationStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApplicationStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Self::from_wire(String::deserialize(deserializer)?))
    }
}

// --- Reservation record status ---

/// Lifecycle of a confirmed reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStatus {
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
    Other(String),
}

impl RecordStatus {
    pub fn from_wire(raw: String) -> Self {
        match raw.as_str() {
            "confirmed" => Self::Confirmed,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            "no_show" => Self::NoShow,
            _ => Self::Other(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
            Self::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::NoShow => "No show",
            Self::Other(raw) => raw,
        }
    }
}

impl Serialize for RecordStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Self::from_wire(String::deserialize(deserializer)?))
    }
}
