use sqlx::PgPool;
use tracing::{error, info, warn};

use crate::auth::error::AuthError;
use crate::auth::password::Hasher;
use crate::auth::repo::User;
use crate::auth::validation::{SigninData, SignupData};

/// Create a new user record from validated signup input.
///
/// The existence probe only saves a hash for the common retry case; the
/// unique constraint behind `User::insert` stays authoritative, so a
/// concurrent signup that slips past the probe is still rejected.
pub async fn create_user(
    db: &PgPool,
    hasher: &Hasher,
    data: SignupData,
) -> Result<User, AuthError> {
    let taken = match User::exists_by_email(db, &data.email).await {
        Ok(taken) => taken,
        Err(e) => {
            error!(error = %e, "exists_by_email failed");
            return Err(e);
        }
    };
    if taken {
        warn!(email = %data.email, "signup with existing email");
        return Err(AuthError::DuplicateEmail);
    }

    let password_hash = hasher.hash(&data.password)?;

    let user = match User::insert(db, &data.name, &data.email, &password_hash, data.role).await {
        Ok(user) => user,
        Err(AuthError::DuplicateEmail) => {
            // Lost the race to a concurrent signup; same outcome as the probe.
            warn!(email = %data.email, "duplicate email rejected by constraint");
            return Err(AuthError::DuplicateEmail);
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err(e);
        }
    };

    info!(email = %user.email, role = user.role.as_str(), "new user created");
    Ok(user)
}

/// Verify credentials against the stored record without creating anything.
///
/// Unknown email and wrong password collapse into one `InvalidCredentials`
/// kind; a hashing-primitive failure stays distinct and is never reported as
/// bad credentials.
pub async fn authenticate_user(
    db: &PgPool,
    hasher: &Hasher,
    data: SigninData,
) -> Result<User, AuthError> {
    let user = match User::find_by_email(db, &data.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!(email = %data.email, "signin with unknown email");
            return Err(AuthError::InvalidCredentials);
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(e);
        }
    };

    if !hasher.verify(&data.password, &user.password_hash)? {
        warn!(email = %user.email, "signin with wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    info!(email = %user.email, "user authenticated");
    Ok(user)
}
