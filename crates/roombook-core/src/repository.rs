//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Implementations live in
//! `roombook-db`; the service layer is generic over these traits.

use uuid::Uuid;

use crate::error::{RoombookError, RoombookResult};
use crate::models::{
    booking::{Booking, BookingStatus, CreateBooking},
    campus::{Campus, CreateCampus, UpdateCampus},
    room::{CreateRoom, Room, UpdateRoom},
    slot::{RoomSlot, Slot},
    user::{CreateUser, UpdateUser, User},
};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// One-based page parameters for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
}

impl Pagination {
    /// Normalise raw page parameters: a page below 1 becomes 1, the page
    /// size must be at least 1 and is capped at [`MAX_PAGE_SIZE`]. A page
    /// whose row offset would not fit in an `i64` is rejected.
    pub fn new(page: u64, page_size: u64) -> RoombookResult<Self> {
        if page_size == 0 {
            return Err(RoombookError::validation("page size must be at least 1"));
        }
        let page = page.max(1);
        let page_size = page_size.min(MAX_PAGE_SIZE);

        let offset = (page - 1).checked_mul(page_size);
        if !offset.is_some_and(|o| o <= i64::MAX as u64) {
            return Err(RoombookError::validation(format!("page {page} is out of range")));
        }
        Ok(Self { page, page_size })
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, pagination: Pagination) -> Self {
        Self {
            items,
            total,
            page: pagination.page,
            page_size: pagination.page_size,
            total_pages: total.div_ceil(pagination.page_size),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

pub trait UserRepository: Send + Sync {
    /// Fails with `AlreadyExists` when the email is taken.
    fn create(&self, input: CreateUser) -> impl Future<Output = RoombookResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = RoombookResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = RoombookResult<User>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> impl Future<Output = RoombookResult<User>> + Send;
    /// Replace the stored password hash with a hash of `new_password`.
    fn set_password(
        &self,
        id: Uuid,
        new_password: &str,
    ) -> impl Future<Output = RoombookResult<()>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = RoombookResult<PaginatedResult<User>>> + Send;
}

// ---------------------------------------------------------------------------
// Campuses, rooms, slots
// ---------------------------------------------------------------------------

pub trait CampusRepository: Send + Sync {
    fn create(&self, input: CreateCampus) -> impl Future<Output = RoombookResult<Campus>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = RoombookResult<Campus>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateCampus,
    ) -> impl Future<Output = RoombookResult<Campus>> + Send;
    fn list(&self) -> impl Future<Output = RoombookResult<Vec<Campus>>> + Send;
}

pub trait RoomRepository: Send + Sync {
    /// Creates the room together with one roomslot per seeded slot.
    /// Fails with `NotFound` for an unknown campus and `AlreadyExists` when
    /// the code is taken within the campus.
    fn create(&self, input: CreateRoom) -> impl Future<Output = RoombookResult<Room>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = RoombookResult<Room>> + Send;
    fn get_by_code(
        &self,
        campus_id: Uuid,
        code: &str,
    ) -> impl Future<Output = RoombookResult<Room>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateRoom,
    ) -> impl Future<Output = RoombookResult<Room>> + Send;
    fn set_available(
        &self,
        id: Uuid,
        available: bool,
    ) -> impl Future<Output = RoombookResult<Room>> + Send;
    /// Ordered by room code.
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = RoombookResult<PaginatedResult<Room>>> + Send;
    fn list_by_campus(
        &self,
        campus_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = RoombookResult<PaginatedResult<Room>>> + Send;
    fn list_roomslots(&self, room_id: Uuid)
    -> impl Future<Output = RoombookResult<Vec<RoomSlot>>> + Send;
}

pub trait SlotRepository: Send + Sync {
    /// Ordered by slot number.
    fn list(&self) -> impl Future<Output = RoombookResult<Vec<Slot>>> + Send;
}

// ---------------------------------------------------------------------------
// Bookings
// ---------------------------------------------------------------------------

pub trait BookingRepository: Send + Sync {
    /// Atomically check the selection against the active bookings of the
    /// date and the bookable roomslots, then insert a Pending booking.
    ///
    /// Fails with `Conflict` when any requested pair is already held by a
    /// Pending/Approved booking on the same date, or does not name an
    /// existing roomslot of an available room. Nothing is written on failure.
    fn create(&self, input: CreateBooking) -> impl Future<Output = RoombookResult<Booking>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = RoombookResult<Booking>> + Send;
    /// Guarded status update: the row is changed only if its stored status is
    /// one of `from`. Returns `None` when the guard did not match.
    fn update_status(
        &self,
        id: Uuid,
        from: &[BookingStatus],
        to: BookingStatus,
    ) -> impl Future<Output = RoombookResult<Option<Booking>>> + Send;
    /// Bookings requested by `user_id`, newest date first.
    fn list_by_user(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = RoombookResult<PaginatedResult<Booking>>> + Send;
    /// Pending bookings, oldest date first.
    fn list_pending(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = RoombookResult<PaginatedResult<Booking>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_five_rows_make_three_pages() {
        let first = Pagination::new(1, 10).unwrap();
        let page: PaginatedResult<u32> = PaginatedResult::new((0..10).collect(), 25, first);
        assert_eq!(page.total_pages, 3);

        let last = Pagination::new(3, 10).unwrap();
        assert_eq!(last.offset(), 20);
        // 25 - 20 rows remain for the last page.
        assert_eq!(25 - last.offset(), 5);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let page: PaginatedResult<u32> = PaginatedResult::new(vec![], 0, Pagination::default());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn page_below_one_is_clamped() {
        let p = Pagination::new(0, 10).unwrap();
        assert_eq!(p.page, 1);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn page_size_is_validated_and_capped() {
        assert!(Pagination::new(1, 0).is_err());
        assert_eq!(Pagination::new(1, 10_000).unwrap().page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn huge_page_is_rejected_instead_of_overflowing() {
        let err = Pagination::new(u64::MAX, 10).unwrap_err();
        assert!(matches!(err, RoombookError::Validation { .. }));

        // The largest page whose offset still fits in an i64.
        let last = i64::MAX as u64 / 10 + 1;
        assert_eq!(Pagination::new(last, 10).unwrap().offset(), (last - 1) * 10);
        assert!(Pagination::new(last + 1, 10).is_err());
    }

    #[test]
    fn offset_saturates_for_hand_built_values() {
        let p = Pagination {
            page: u64::MAX,
            page_size: MAX_PAGE_SIZE,
        };
        assert_eq!(p.offset(), u64::MAX);
    }
}
