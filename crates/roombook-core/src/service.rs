//! Booking service: request validation, visibility rules and the status
//! state machine on top of a [`BookingRepository`].

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::error::{RoombookError, RoombookResult};
use crate::models::booking::{Booking, BookingAction, CreateBooking};
use crate::models::slot::RoomSlot;
use crate::models::user::UserRole;
use crate::repository::{BookingRepository, PaginatedResult, Pagination};

/// The authenticated caller of a booking operation.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    fn owns_or_moderates(&self, booking: &Booking) -> bool {
        booking.user_id == self.user_id || self.role.can_moderate_bookings()
    }

    fn require_moderator(&self) -> RoombookResult<()> {
        if self.role.can_moderate_bookings() {
            Ok(())
        } else {
            Err(RoombookError::AuthorizationDenied {
                reason: "booking moderation requires an elevated role".into(),
            })
        }
    }
}

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Booking service.
///
/// Generic over the repository implementation so that this crate has no
/// dependency on the database crate.
pub struct BookingService<B: BookingRepository> {
    repo: B,
    today: fn() -> NaiveDate,
}

impl<B: BookingRepository> BookingService<B> {
    pub fn new(repo: B) -> Self {
        Self {
            repo,
            today: utc_today,
        }
    }

    /// Use a fixed calendar instead of the current UTC date.
    pub fn with_today(repo: B, today: fn() -> NaiveDate) -> Self {
        Self { repo, today }
    }

    /// Request a booking for `booking_date`. Duplicate pairs are collapsed;
    /// the date must be tomorrow or later.
    pub async fn create(
        &self,
        actor: Actor,
        booking_date: NaiveDate,
        roomslots: Vec<RoomSlot>,
    ) -> RoombookResult<Booking> {
        let input = CreateBooking::new(actor.user_id, booking_date, roomslots, (self.today)())?;
        let booking = self.repo.create(input).await?;
        info!(
            booking_id = %booking.id,
            user_id = %booking.user_id,
            date = %booking.booking_date,
            roomslots = booking.roomslots.len(),
            "Booking requested"
        );
        Ok(booking)
    }

    /// Fetch a booking visible to `actor` (its owner or a moderator).
    pub async fn get(&self, actor: Actor, id: Uuid) -> RoombookResult<Booking> {
        let booking = self.repo.get_by_id(id).await?;
        if !actor.owns_or_moderates(&booking) {
            // Indistinguishable from a missing booking for other users.
            return Err(RoombookError::not_found("booking", id));
        }
        Ok(booking)
    }

    pub async fn history(
        &self,
        actor: Actor,
        pagination: Pagination,
    ) -> RoombookResult<PaginatedResult<Booking>> {
        self.repo.list_by_user(actor.user_id, pagination).await
    }

    pub async fn pending(
        &self,
        actor: Actor,
        pagination: Pagination,
    ) -> RoombookResult<PaginatedResult<Booking>> {
        actor.require_moderator()?;
        self.repo.list_pending(pagination).await
    }

    pub async fn approve(&self, actor: Actor, id: Uuid) -> RoombookResult<Booking> {
        actor.require_moderator()?;
        let booking = self.repo.get_by_id(id).await?;
        self.transition(booking, BookingAction::Approve).await
    }

    pub async fn reject(&self, actor: Actor, id: Uuid) -> RoombookResult<Booking> {
        actor.require_moderator()?;
        let booking = self.repo.get_by_id(id).await?;
        self.transition(booking, BookingAction::Reject).await
    }

    /// Cancel a Pending or Approved booking strictly before its date.
    pub async fn cancel(&self, actor: Actor, id: Uuid) -> RoombookResult<Booking> {
        let booking = self.repo.get_by_id(id).await?;
        if !actor.owns_or_moderates(&booking) {
            return Err(RoombookError::AuthorizationDenied {
                reason: "only the requester or a moderator may cancel a booking".into(),
            });
        }
        booking.ensure_cancellable((self.today)())?;
        self.transition(booking, BookingAction::Cancel).await
    }

    async fn transition(&self, booking: Booking, action: BookingAction) -> RoombookResult<Booking> {
        let next = booking.status.apply(action)?;

        // The stored status may have moved since the read above; the guarded
        // update only matches rows still in an allowed source state.
        let updated = self
            .repo
            .update_status(booking.id, action.allowed_from(), next)
            .await?
            .ok_or_else(|| RoombookError::InvalidTransition {
                from: "no longer in the state it was read in".into(),
                action: action.verb().into(),
            })?;

        info!(
            booking_id = %updated.id,
            from = %booking.status,
            to = %updated.status,
            "Booking status changed"
        );
        Ok(updated)
    }
}
