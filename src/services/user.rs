//! User service implementation
//!
//! Profile reads and updates, plus the profile and cover photo slots.

use tracing::{debug, info};
use crate::database::repositories::UserRepository;
use crate::models::user::{User, UserProfile, UpdateProfileRequest};
use crate::services::media::{MediaKind, MediaStore, Upload};
use crate::utils::errors::{ScholarHubError, Result};

/// Which image slot of a profile is being changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileImage {
    Photo,
    Cover,
}

impl ProfileImage {
    pub fn media_kind(&self) -> MediaKind {
        match self {
            ProfileImage::Photo => MediaKind::ProfilePhoto,
            ProfileImage::Cover => MediaKind::CoverPhoto,
        }
    }

    fn current<'a>(&self, user: &'a User) -> Option<&'a str> {
        match self {
            ProfileImage::Photo => user.profile_image.as_deref(),
            ProfileImage::Cover => user.cover_image.as_deref(),
        }
    }
}

/// User service for profile operations
#[derive(Clone, Debug)]
pub struct UserService {
    users: UserRepository,
    media: MediaStore,
    public_base_url: String,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(users: UserRepository, media: MediaStore, public_base_url: &str) -> Self {
        Self {
            users,
            media,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL for a stored media file
    pub fn media_url(&self, kind: MediaKind, file_name: &str) -> String {
        format!("{}{}", self.public_base_url, MediaStore::public_path(kind, file_name))
    }

    /// Profile view with absolute image URLs
    pub fn to_profile(&self, user: User) -> UserProfile {
        let photo = user
            .profile_image
            .as_deref()
            .map(|name| self.media_url(MediaKind::ProfilePhoto, name));
        let cover = user
            .cover_image
            .as_deref()
            .map(|name| self.media_url(MediaKind::CoverPhoto, name));
        UserProfile::from_user(user, photo, cover)
    }

    /// Load the profile of a user
    pub async fn get_profile(&self, user_id: i64) -> Result<UserProfile> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ScholarHubError::not_found("User not found"))?;
        Ok(self.to_profile(user))
    }

    /// Update the supplied profile fields
    pub async fn update_profile(&self, user_id: i64, request: UpdateProfileRequest) -> Result<UserProfile> {
        request.validate()?;
        let user = self.users.update_profile(user_id, request).await?;
        info!(user_id = user_id, "Profile updated");
        Ok(self.to_profile(user))
    }

    /// Store a new image for the slot and drop the one it replaces
    pub async fn upload_image(&self, user: &User, slot: ProfileImage, upload: &Upload) -> Result<UserProfile> {
        let users = self.users.clone();
        let user_id = user.id;

        let (file_name, updated) = self
            .media
            .replace(slot.media_kind(), user.uuid, slot.current(user), upload, |name| async move {
                match slot {
                    ProfileImage::Photo => users.set_profile_image(user_id, Some(&name)).await,
                    ProfileImage::Cover => users.set_cover_image(user_id, Some(&name)).await,
                }
            })
            .await?;

        debug!(user_id = user_id, file_name = %file_name, slot = ?slot, "Profile image stored");
        Ok(self.to_profile(updated))
    }

    /// Clear the slot and remove its file
    pub async fn delete_image(&self, user: &User, slot: ProfileImage) -> Result<UserProfile> {
        let current = slot
            .current(user)
            .ok_or_else(|| ScholarHubError::not_found("No image to delete"))?;

        let users = self.users.clone();
        let user_id = user.id;
        let updated = self
            .media
            .delete(slot.media_kind(), Some(current), || async move {
                match slot {
                    ProfileImage::Photo => users.set_profile_image(user_id, None).await,
                    ProfileImage::Cover => users.set_cover_image(user_id, None).await,
                }
            })
            .await?;

        info!(user_id = user_id, slot = ?slot, "Profile image deleted");
        Ok(self.to_profile(updated))
    }
}
