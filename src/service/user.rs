use log::info;

use crate::{
    dto::{NewUserDto, UserDto},
    errors::ApiError,
    models::NewUser,
    state::AppState,
};

use super::crypto;

/// Canonical form under which emails are stored and looked up.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Registers an account from a submitted sign-up form.
pub async fn create(dto: NewUserDto, state: &AppState) -> Result<UserDto, ApiError> {
    let NewUserDto { form, provider } = dto;
    let new_user = form
        .submit(|form| NewUser {
            name: form.name.trim().to_string(),
            email: normalize_email(&form.email),
            password_hash: crypto::hash_password(&form.password),
            provider,
        })
        .map_err(|fields| ApiError::InvalidForm { fields })?;

    if state
        .users
        .find_user_by_email(&new_user.email)
        .await?
        .is_some()
    {
        return Err(ApiError::UserExists);
    }

    let user = state.users.create_user(new_user).await?;
    info!("user #{} registered (provider: {})", user.id, user.provider);
    Ok(UserDto::from(&user))
}
