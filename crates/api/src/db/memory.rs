//! In-memory store.
//!
//! Mirrors the `PostgreSQL` schema's constraints: unique emails, foreign
//! keys and cascading deletes. Every operation takes the table lock for its
//! whole duration, so check-and-insert sequences are atomic.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use hotel_booking_core::{Email, HotelId, ReservationId, RoomId, UserId};

use super::{
    HotelRepository, RepositoryError, ReservationRepository, RoomRepository, Store,
    UserRepository,
};
use crate::models::{Hotel, NewHotel, NewReservation, NewRoom, NewUser, Reservation, Room, User};

/// Per-table id counter, like a `SERIAL` column.
#[derive(Default)]
struct Sequence(i32);

impl Sequence {
    const fn next(&mut self) -> i32 {
        self.0 += 1;
        self.0
    }
}

#[derive(Default)]
struct Tables {
    hotel_ids: Sequence,
    room_ids: Sequence,
    reservation_ids: Sequence,
    user_ids: Sequence,
    hotels: BTreeMap<HotelId, Hotel>,
    rooms: BTreeMap<RoomId, Room>,
    reservations: BTreeMap<ReservationId, Reservation>,
    users: BTreeMap<UserId, (User, String)>,
}

impl Tables {
    fn check_reservation_refs(&self, new: &NewReservation) -> Result<(), RepositoryError> {
        if !self.rooms.contains_key(&new.room) {
            return Err(RepositoryError::MissingReference("room"));
        }
        if !self.users.contains_key(&new.client) {
            return Err(RepositoryError::MissingReference("client"));
        }
        Ok(())
    }

    fn cascade_room(&mut self, id: RoomId) {
        self.reservations.retain(|_, r| r.room != id);
    }
}

/// Process-local store; clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[async_trait]
impl HotelRepository for MemoryStore {
    async fn list_hotels(&self) -> Result<Vec<Hotel>, RepositoryError> {
        Ok(self.tables.read().await.hotels.values().cloned().collect())
    }

    async fn get_hotel(&self, id: HotelId) -> Result<Option<Hotel>, RepositoryError> {
        Ok(self.tables.read().await.hotels.get(&id).cloned())
    }

    async fn create_hotel(&self, new: &NewHotel) -> Result<Hotel, RepositoryError> {
        let mut tables = self.tables.write().await;
        let hotel = Hotel::from_new(HotelId::new(tables.hotel_ids.next()), new);
        tables.hotels.insert(hotel.id, hotel.clone());
        Ok(hotel)
    }

    async fn update_hotel(
        &self,
        id: HotelId,
        new: &NewHotel,
    ) -> Result<Option<Hotel>, RepositoryError> {
        let mut tables = self.tables.write().await;
        Ok(tables.hotels.get_mut(&id).map(|hotel| {
            *hotel = Hotel::from_new(id, new);
            hotel.clone()
        }))
    }

    async fn delete_hotel(&self, id: HotelId) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.hotels.remove(&id).is_none() {
            return Ok(false);
        }
        let rooms: Vec<RoomId> = tables
            .rooms
            .values()
            .filter(|room| room.hotel == id)
            .map(|room| room.id)
            .collect();
        for room in rooms {
            tables.rooms.remove(&room);
            tables.cascade_room(room);
        }
        Ok(true)
    }
}

#[async_trait]
impl RoomRepository for MemoryStore {
    async fn list_rooms(&self) -> Result<Vec<Room>, RepositoryError> {
        Ok(self.tables.read().await.rooms.values().cloned().collect())
    }

    async fn get_room(&self, id: RoomId) -> Result<Option<Room>, RepositoryError> {
        Ok(self.tables.read().await.rooms.get(&id).cloned())
    }

    async fn create_room(&self, new: &NewRoom) -> Result<Room, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.hotels.contains_key(&new.hotel) {
            return Err(RepositoryError::MissingReference("hotel"));
        }
        let room = Room::from_new(RoomId::new(tables.room_ids.next()), new);
        tables.rooms.insert(room.id, room.clone());
        Ok(room)
    }

    async fn update_room(
        &self,
        id: RoomId,
        new: &NewRoom,
    ) -> Result<Option<Room>, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.rooms.contains_key(&id) {
            return Ok(None);
        }
        if !tables.hotels.contains_key(&new.hotel) {
            return Err(RepositoryError::MissingReference("hotel"));
        }
        let room = Room::from_new(id, new);
        tables.rooms.insert(id, room.clone());
        Ok(Some(room))
    }

    async fn delete_room(&self, id: RoomId) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.rooms.remove(&id).is_none() {
            return Ok(false);
        }
        tables.cascade_room(id);
        Ok(true)
    }
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn list_reservations(&self) -> Result<Vec<Reservation>, RepositoryError> {
        Ok(self
            .tables
            .read()
            .await
            .reservations
            .values()
            .cloned()
            .collect())
    }

    async fn get_reservation(
        &self,
        id: ReservationId,
    ) -> Result<Option<Reservation>, RepositoryError> {
        Ok(self.tables.read().await.reservations.get(&id).cloned())
    }

    async fn create_reservation(
        &self,
        new: &NewReservation,
    ) -> Result<Reservation, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.check_reservation_refs(new)?;
        let reservation = Reservation {
            id: ReservationId::new(tables.reservation_ids.next()),
            room: new.room,
            client: new.client,
            check_in: new.check_in,
            check_out: new.check_out,
            status: new.status,
            created_at: Utc::now(),
        };
        tables
            .reservations
            .insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn update_reservation(
        &self,
        id: ReservationId,
        new: &NewReservation,
    ) -> Result<Option<Reservation>, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.reservations.contains_key(&id) {
            return Ok(None);
        }
        tables.check_reservation_refs(new)?;
        Ok(tables.reservations.get_mut(&id).map(|reservation| {
            reservation.room = new.room;
            reservation.check_in = new.check_in;
            reservation.check_out = new.check_out;
            reservation.status = new.status;
            reservation.clone()
        }))
    }

    async fn delete_reservation(&self, id: ReservationId) -> Result<bool, RepositoryError> {
        Ok(self
            .tables
            .write()
            .await
            .reservations
            .remove(&id)
            .is_some())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .get(&id)
            .map(|(user, _)| user.clone()))
    }

    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .get_password_hash(email)
            .await?
            .map(|(user, _)| user))
    }

    async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|(user, _)| &user.email == email)
            .cloned())
    }

    async fn create_user(&self, new: &NewUser) -> Result<User, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|(user, _)| user.email == new.email) {
            return Err(RepositoryError::Conflict("app_user_email_key".to_owned()));
        }
        let user = User {
            id: UserId::new(tables.user_ids.next()),
            email: new.email.clone(),
            first_name: new.first_name.to_string(),
            last_name: new.last_name.to_string(),
            created_at: Utc::now(),
        };
        tables
            .users
            .insert(user.id, (user.clone(), new.password_hash.clone()));
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.reservations.retain(|_, r| r.client != id);
        Ok(true)
    }
}
