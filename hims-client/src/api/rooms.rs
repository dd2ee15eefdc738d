//! Rooms

use super::{DeactivationEndpoint, ListSource, get_list, post_ignored};
use crate::{ClientResult, HttpClient};
use async_trait::async_trait;
use shared::models::{Room, RoomCreate, RoomDeactivation, RoomFilter, RoomUpdate};
use shared::query::{QueryParams, segment};
use std::sync::Arc;

const ROOMS: &str = "/api/infrastructure/rooms";

/// `/api/infrastructure/rooms`
pub struct RoomsApi<C> {
    http: Arc<C>,
}

impl<C: HttpClient> RoomsApi<C> {
    pub fn new(http: Arc<C>) -> Self {
        Self { http }
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}", ROOMS, segment(id))
    }

    pub async fn create(&self, payload: &RoomCreate) -> ClientResult<Room> {
        let created: Room = self.http.post(ROOMS, payload).await?;
        tracing::info!(id = %created.id, code = %created.code, "Room created");
        Ok(created)
    }

    pub async fn update(&self, id: &str, payload: &RoomUpdate) -> ClientResult<Room> {
        self.http.patch(&Self::item_path(id), payload).await
    }

    pub async fn deactivate(&self, id: &str, body: &RoomDeactivation) -> ClientResult<()> {
        let path = format!("{}/deactivate", Self::item_path(id));
        post_ignored(self.http.as_ref(), &path, body).await
    }

    /// Reactivation needs no reason
    pub async fn reactivate(&self, id: &str) -> ClientResult<Room> {
        let body = RoomUpdate {
            is_active: Some(true),
            ..RoomUpdate::default()
        };
        self.update(id, &body).await
    }
}

#[async_trait]
impl<C: HttpClient + 'static> ListSource for RoomsApi<C> {
    type Row = Room;
    type Filter = RoomFilter;

    async fn list(&self, filter: &RoomFilter) -> ClientResult<Vec<Room>> {
        let path = QueryParams::from_filter(filter).append_to(ROOMS);
        get_list(self.http.as_ref(), &path).await
    }

    async fn fetch(&self, id: &str) -> ClientResult<Room> {
        self.http.get(&Self::item_path(id)).await
    }
}

#[async_trait]
impl<C: HttpClient + 'static> DeactivationEndpoint for RoomsApi<C> {
    type Row = Room;
    const LABEL: &'static str = "Room";

    async fn post_deactivation(&self, id: &str, reason: &str, cascade: bool) -> ClientResult<()> {
        self.deactivate(id, &RoomDeactivation::soft(reason, cascade)).await
    }

    async fn post_reactivation(&self, id: &str) -> ClientResult<()> {
        self.reactivate(id).await.map(|_| ())
    }
}
