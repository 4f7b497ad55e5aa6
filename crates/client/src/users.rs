//! Account and user-management endpoints.

use pdfshelf_core::{LoginRequest, LoginResponse, RegisterRequest, ReorderRequest, User, UserPayload};
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// `POST /api/login`. Does not persist the token; the session does.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status or a malformed body.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let builder = self.client.post(self.url("/api/login")).json(request);
        let response = self.send(builder).await?;
        let login: LoginResponse = Self::json(response, "login").await?;
        if login.token.is_empty() {
            return Err(ApiError::InvalidResponse("login response carried no token".to_owned()));
        }
        Ok(login)
    }

    /// `POST /api/register`
    ///
    /// # Errors
    /// Returns an error on transport failure or non-success status.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let builder = self.client.post(self.url("/api/register")).json(request);
        self.send(builder).await?;
        Ok(())
    }

    /// `GET /api/users/me`
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status or a malformed body.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let request = self.client.get(self.url("/api/users/me"));
        let response = self.send_authorized(request).await?;
        Self::json(response, "current user").await
    }

    /// `GET /api/users`
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status or a malformed body.
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let request = self.client.get(self.url("/api/users"));
        let response = self.send_authorized(request).await?;
        let users: Option<Vec<User>> = Self::json(response, "user list").await?;
        Ok(users.unwrap_or_default())
    }

    /// `POST /api/users`; returns the raw response body.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status or a malformed body.
    pub async fn create_user(&self, payload: &UserPayload) -> Result<Value, ApiError> {
        let request = self.client.post(self.url("/api/users")).json(payload);
        let response = self.send_authorized(request).await?;
        Self::json(response, "created user").await
    }

    /// `PUT /api/users/:id`; returns the raw response body.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status or a malformed body.
    pub async fn update_user(&self, id: u64, payload: &UserPayload) -> Result<Value, ApiError> {
        let request = self.client.put(self.url(&format!("/api/users/{id}"))).json(payload);
        let response = self.send_authorized(request).await?;
        Self::json(response, "updated user").await
    }

    /// `DELETE /api/users/:id`
    ///
    /// # Errors
    /// Returns an error on transport failure or non-success status.
    pub async fn delete_user(&self, id: u64) -> Result<(), ApiError> {
        let request = self.client.delete(self.url(&format!("/api/users/{id}")));
        self.send_authorized(request).await?;
        Ok(())
    }

    /// `PUT /api/users/reorder` with the full new order.
    ///
    /// # Errors
    /// Returns an error on transport failure or non-success status.
    pub async fn reorder_users(&self, users: &[User]) -> Result<(), ApiError> {
        let request =
            self.client.put(self.url("/api/users/reorder")).json(&ReorderRequest { users });
        self.send_authorized(request).await?;
        Ok(())
    }
}
