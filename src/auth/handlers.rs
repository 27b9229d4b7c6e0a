use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{AuthBody, MessageBody, PublicUser, SigninRequest, SignupRequest},
        error::AuthError,
        extractors::AuthUser,
        jwt::JwtKeys,
        repo::User,
        service,
        validation::{validate_signin, validate_signup},
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/signout", post(signout))
        .route("/me", get(get_me))
}

const TOKEN_COOKIE: &str = "token";

fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(TOKEN_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_max_age(time::Duration::minutes(15));
    cookie
}

#[instrument(skip(state, jar, payload))]
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<AuthBody>), AuthError> {
    let data = validate_signup(&payload)?;

    let user = service::create_user(&state.db, &state.hasher, data).await?;

    let token = JwtKeys::from_ref(&state).sign(&user)?;
    let jar = jar.add(session_cookie(token));

    info!(name = %user.name, email = %user.email, role = user.role.as_str(), "user signed up");

    Ok((
        StatusCode::CREATED,
        jar,
        Json(AuthBody {
            message: "User signed up successfully".into(),
            user: PublicUser::from(user),
        }),
    ))
}

#[instrument(skip(state, jar, payload))]
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<SigninRequest>,
) -> Result<(CookieJar, Json<AuthBody>), AuthError> {
    let data = validate_signin(&payload)?;

    let user = service::authenticate_user(&state.db, &state.hasher, data).await?;

    let token = JwtKeys::from_ref(&state).sign(&user)?;
    let jar = jar.add(session_cookie(token));

    info!(email = %user.email, "user signed in");

    Ok((
        jar,
        Json(AuthBody {
            message: "User signed in successfully".into(),
            user: PublicUser::from(user),
        }),
    ))
}

#[instrument(skip(jar))]
pub async fn signout(jar: CookieJar) -> (CookieJar, Json<MessageBody>) {
    let mut removal = Cookie::from(TOKEN_COOKIE);
    removal.set_path("/");
    let jar = jar.remove(removal);

    info!("user signed out");

    (
        jar,
        Json(MessageBody {
            message: "User signed out successfully".into(),
        }),
    )
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, AuthError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AuthError::Unauthorized)?;
    Ok(Json(PublicUser::from(user)))
}
