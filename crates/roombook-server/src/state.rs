//! Shared application state handed to every handler.

use std::sync::Arc;

use roombook_auth::{AuthConfig, AuthService};
use roombook_core::service::BookingService;
use roombook_db::repository::{
    SurrealBookingRepository, SurrealCampusRepository, SurrealRoomRepository,
    SurrealSlotRepository, SurrealUserRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

pub type UserRepo = SurrealUserRepository<Any>;
pub type CampusRepo = SurrealCampusRepository<Any>;
pub type RoomRepo = SurrealRoomRepository<Any>;
pub type SlotRepo = SurrealSlotRepository<Any>;
pub type BookingRepo = SurrealBookingRepository<Any>;

#[derive(Clone)]
pub struct AppState {
    users: UserRepo,
    campuses: CampusRepo,
    rooms: RoomRepo,
    slots: SlotRepo,
    bookings: Arc<BookingService<BookingRepo>>,
    auth: Arc<AuthService<UserRepo>>,
}

impl AppState {
    /// Build every repository over one connection. A single booking
    /// repository backs the booking service so that all requests share its
    /// per-date locks.
    pub fn new(db: Surreal<Any>, auth_config: AuthConfig) -> Self {
        let users = SurrealUserRepository::new(db.clone());
        Self {
            auth: Arc::new(AuthService::new(users.clone(), auth_config)),
            users,
            campuses: SurrealCampusRepository::new(db.clone()),
            rooms: SurrealRoomRepository::new(db.clone()),
            slots: SurrealSlotRepository::new(db.clone()),
            bookings: Arc::new(BookingService::new(SurrealBookingRepository::new(db))),
        }
    }

    pub fn user_repository(&self) -> &UserRepo {
        &self.users
    }

    pub fn campus_repository(&self) -> &CampusRepo {
        &self.campuses
    }

    pub fn room_repository(&self) -> &RoomRepo {
        &self.rooms
    }

    pub fn slot_repository(&self) -> &SlotRepo {
        &self.slots
    }

    pub fn booking_service(&self) -> &BookingService<BookingRepo> {
        &self.bookings
    }

    pub fn auth_service(&self) -> &AuthService<UserRepo> {
        &self.auth
    }

    pub fn auth_config(&self) -> &AuthConfig {
        self.auth.config()
    }
}
