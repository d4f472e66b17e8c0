//! Read-only views over arts and users.

use std::sync::Arc;

use tamed_core::models::{Art, User};
use tamed_core::AppError;
use tamed_db::ViewStore;

#[derive(Clone)]
pub struct ViewService {
    store: Arc<dyn ViewStore>,
}

impl ViewService {
    pub fn new(store: Arc<dyn ViewStore>) -> Self {
        Self { store }
    }

    pub async fn view_art(&self, art_id: &str) -> Result<Art, AppError> {
        self.store
            .get_art(art_id)
            .await
            .map_err(|e| e.context("srv.view.art"))?
            .ok_or_else(|| AppError::NotFound(format!("Art '{}' not found!", art_id)))
    }

    pub async fn view_user(&self, user_name: &str) -> Result<User, AppError> {
        self.store
            .get_user(user_name)
            .await
            .map_err(|e| e.context("srv.view.user"))?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found!", user_name)))
    }
}
