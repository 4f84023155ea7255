// Permission endpoints
//
// Role/permission lookups for the current user (consumed by the session
// layer), the navigation menu tree, and the admin-only role assignment
// operations.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Menu, Permission, Role};

impl ApiClient {
    /// Role codes held by the current user.
    ///
    /// `GET /permission/my-roles`
    pub async fn my_roles(&self) -> Result<Vec<String>, Error> {
        self.get("/permission/my-roles").await
    }

    /// Permission codes held by the current user.
    ///
    /// `GET /permission/my-permissions`
    pub async fn my_permissions(&self) -> Result<Vec<String>, Error> {
        self.get("/permission/my-permissions").await
    }

    /// Navigation menu tree for the current user.
    ///
    /// `GET /permission/menus`
    pub async fn menus(&self) -> Result<Vec<Menu>, Error> {
        self.get("/permission/menus").await
    }

    /// All roles known to the system (admin).
    ///
    /// `GET /permission/roles`
    pub async fn all_roles(&self) -> Result<Vec<Role>, Error> {
        self.get("/permission/roles").await
    }

    /// All permissions known to the system (admin).
    ///
    /// `GET /permission/all`
    pub async fn all_permissions(&self) -> Result<Vec<Permission>, Error> {
        self.get("/permission/all").await
    }

    /// Grant a role to a user (admin).
    ///
    /// `POST /permission/users/{userId}/roles/{roleId}`
    pub async fn add_user_role(&self, user_id: i64, role_id: i64) -> Result<(), Error> {
        debug!(user_id, role_id, "granting role");
        let _: Option<serde_json::Value> = self
            .post_empty(&format!("/permission/users/{user_id}/roles/{role_id}"))
            .await?;
        Ok(())
    }

    /// Revoke a role from a user (admin).
    ///
    /// `DELETE /permission/users/{userId}/roles/{roleId}`
    pub async fn remove_user_role(&self, user_id: i64, role_id: i64) -> Result<(), Error> {
        debug!(user_id, role_id, "revoking role");
        let _: Option<serde_json::Value> = self
            .delete(&format!("/permission/users/{user_id}/roles/{role_id}"))
            .await?;
        Ok(())
    }
}
