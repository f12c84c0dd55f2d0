//! Profile endpoints for the logged-in user

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use crate::handlers::JsonBody;
use crate::middleware::CurrentUser;
use crate::models::user::{UpdateProfileRequest, UserProfile};
use crate::services::media::Upload;
use crate::services::user::ProfileImage;
use crate::state::AppState;
use crate::services::media::non_empty_upload;
use crate::utils::errors::{ScholarHubError, Result};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub msg: String,
    pub data: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub msg: String,
    pub url: Option<String>,
}

/// First non-empty file part of a multipart body
async fn read_upload(multipart: &mut Multipart) -> Result<Upload> {
    while let Some(field) = multipart.next_field().await? {
        if let Some(file_name) = field.file_name().map(str::to_string) {
            let bytes = field.bytes().await?;
            if let Some(upload) = non_empty_upload(file_name, bytes.to_vec()) {
                return Ok(upload);
            }
        }
    }
    Err(ScholarHubError::validation("No file was uploaded"))
}

/// GET /profile
pub async fn get_profile(State(state): State<AppState>, CurrentUser(user): CurrentUser) -> Result<Json<UserProfile>> {
    Ok(Json(state.services.user_service.get_profile(user.id).await?))
}

/// PATCH /profile
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(request): JsonBody<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>> {
    let profile = state.services.user_service.update_profile(user.id, request).await?;
    Ok(Json(ProfileResponse {
        msg: "Profile updated".to_string(),
        data: profile,
    }))
}

async fn upload(state: AppState, user: CurrentUser, slot: ProfileImage, mut multipart: Multipart) -> Result<Json<ImageResponse>> {
    let upload = read_upload(&mut multipart).await?;
    let profile = state.services.user_service.upload_image(&user.0, slot, &upload).await?;
    let (msg, url) = match slot {
        ProfileImage::Photo => ("Profile photo updated", profile.profile_image_url),
        ProfileImage::Cover => ("Cover photo updated", profile.cover_image_url),
    };
    Ok(Json(ImageResponse {
        msg: msg.to_string(),
        url,
    }))
}

async fn delete(state: AppState, user: CurrentUser, slot: ProfileImage) -> Result<Json<ImageResponse>> {
    state.services.user_service.delete_image(&user.0, slot).await?;
    let msg = match slot {
        ProfileImage::Photo => "Profile photo deleted",
        ProfileImage::Cover => "Cover photo deleted",
    };
    Ok(Json(ImageResponse {
        msg: msg.to_string(),
        url: None,
    }))
}

/// POST /profile/photo
pub async fn upload_photo(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<Json<ImageResponse>> {
    upload(state, user, ProfileImage::Photo, multipart).await
}

/// POST /profile/cover
pub async fn upload_cover(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<Json<ImageResponse>> {
    upload(state, user, ProfileImage::Cover, multipart).await
}

/// DELETE /profile/photo
pub async fn delete_photo(State(state): State<AppState>, user: CurrentUser) -> Result<Json<ImageResponse>> {
    delete(state, user, ProfileImage::Photo).await
}

/// DELETE /profile/cover
pub async fn delete_cover(State(state): State<AppState>, user: CurrentUser) -> Result<Json<ImageResponse>> {
    delete(state, user, ProfileImage::Cover).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::Request;

    async fn multipart(body: &'static str) -> Multipart {
        let request = Request::builder()
            .header("content-type", "multipart/form-data; boundary=X")
            .body(Body::from(body.replace('\n', "\r\n")))
            .unwrap();
        Multipart::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_file_part_is_skipped() {
        let mut form = multipart(
            "--X\nContent-Disposition: form-data; name=\"photo\"; filename=\"\"\n\n\n\
             --X\nContent-Disposition: form-data; name=\"photo\"; filename=\"me.png\"\n\nface\n--X--\n",
        )
        .await;
        let upload = read_upload(&mut form).await.unwrap();
        assert_eq!(upload.original_name, "me.png");
        assert_eq!(upload.bytes, b"face");
    }

    #[tokio::test]
    async fn test_only_empty_parts_means_no_file() {
        let mut form = multipart("--X\nContent-Disposition: form-data; name=\"photo\"; filename=\"\"\n\n\n--X--\n").await;
        assert!(matches!(read_upload(&mut form).await, Err(ScholarHubError::Validation(_))));
    }
}
