//! Booking domain model and the rules every booking write goes through:
//! selection normalisation, the booking date window, conflict detection
//! and the status state machine.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RoombookError, RoombookResult};
use crate::models::slot::RoomSlot;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Canceled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Approved,
        BookingStatus::Rejected,
        BookingStatus::Canceled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Approved => "Approved",
            BookingStatus::Rejected => "Rejected",
            BookingStatus::Canceled => "Canceled",
        }
    }

    /// Whether a booking in this state still occupies its roomslots.
    pub fn holds_roomslots(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Approved)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Rejected | BookingStatus::Canceled)
    }

    /// Next state after `action`, or `InvalidTransition` when the action is
    /// not permitted from this state.
    pub fn apply(self, action: BookingAction) -> RoombookResult<BookingStatus> {
        if action.allowed_from().contains(&self) {
            Ok(action.target())
        } else {
            Err(RoombookError::InvalidTransition {
                from: self.as_str().to_lowercase(),
                action: action.verb().into(),
            })
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = RoombookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| RoombookError::Internal(format!("unknown booking status: {s}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Approve,
    Reject,
    Cancel,
}

impl BookingAction {
    pub fn allowed_from(self) -> &'static [BookingStatus] {
        match self {
            BookingAction::Approve | BookingAction::Reject => &[BookingStatus::Pending],
            BookingAction::Cancel => &[BookingStatus::Pending, BookingStatus::Approved],
        }
    }

    pub fn target(self) -> BookingStatus {
        match self {
            BookingAction::Approve => BookingStatus::Approved,
            BookingAction::Reject => BookingStatus::Rejected,
            BookingAction::Cancel => BookingStatus::Canceled,
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            BookingAction::Approve => "approve",
            BookingAction::Reject => "reject",
            BookingAction::Cancel => "cancel",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub booking_date: NaiveDate,
    pub status: BookingStatus,
    pub roomslots: Vec<RoomSlot>,
    pub requested_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Cancellation is only possible strictly before the booking date.
    pub fn ensure_cancellable(&self, today: NaiveDate) -> RoombookResult<()> {
        self.status.apply(BookingAction::Cancel)?;
        if self.booking_date <= today {
            return Err(RoombookError::InvalidTransition {
                from: format!("dated {} (on or before today)", self.booking_date),
                action: BookingAction::Cancel.verb().into(),
            });
        }
        Ok(())
    }
}

/// A non-empty, duplicate-free set of roomslots requested for one date.
///
/// Iteration order is stable (room id, then slot number).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSlotSelection(BTreeSet<RoomSlot>);

impl RoomSlotSelection {
    pub fn new(pairs: impl IntoIterator<Item = RoomSlot>) -> RoombookResult<Self> {
        let set: BTreeSet<RoomSlot> = pairs.into_iter().collect();
        if set.is_empty() {
            return Err(RoombookError::validation(
                "at least one room/slot must be selected",
            ));
        }
        Ok(Self(set))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoomSlot> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, roomslot: &RoomSlot) -> bool {
        self.0.contains(roomslot)
    }

    pub fn room_ids(&self) -> BTreeSet<Uuid> {
        self.0.iter().map(|rs| rs.room_id).collect()
    }

    pub fn to_vec(&self) -> Vec<RoomSlot> {
        self.0.iter().copied().collect()
    }

    /// Requested pairs that also appear in `held`, in selection order.
    pub fn conflicts_with(&self, held: impl IntoIterator<Item = RoomSlot>) -> Vec<RoomSlot> {
        let clashing: BTreeSet<RoomSlot> = held
            .into_iter()
            .filter(|rs| self.contains(rs))
            .collect();
        clashing.into_iter().collect()
    }

    /// Requested pairs absent from `bookable`, in selection order.
    pub fn missing_from(&self, bookable: impl IntoIterator<Item = RoomSlot>) -> Vec<RoomSlot> {
        let bookable: HashSet<RoomSlot> = bookable.into_iter().collect();
        self.0
            .iter()
            .filter(|rs| !bookable.contains(rs))
            .copied()
            .collect()
    }
}

/// Validated input for inserting a new booking.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub user_id: Uuid,
    pub booking_date: NaiveDate,
    pub roomslots: RoomSlotSelection,
}

impl CreateBooking {
    /// Collapse duplicate pairs and enforce the booking window: the date
    /// must be tomorrow or later relative to `today`.
    pub fn new(
        user_id: Uuid,
        booking_date: NaiveDate,
        pairs: impl IntoIterator<Item = RoomSlot>,
        today: NaiveDate,
    ) -> RoombookResult<Self> {
        if booking_date <= today {
            return Err(RoombookError::validation(format!(
                "booking date {booking_date} must be after {today}"
            )));
        }
        Ok(Self {
            user_id,
            booking_date,
            roomslots: RoomSlotSelection::new(pairs)?,
        })
    }
}

/// Render a list of roomslots for an error message.
pub fn describe_roomslots(roomslots: &[RoomSlot]) -> String {
    roomslots
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
