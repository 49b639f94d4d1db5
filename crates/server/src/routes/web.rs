//! Browser-facing routes. Reads are open; mutating routes sit behind
//! the session gate, which redirects to the login page instead of
//! returning a status code.
use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use uuid::Uuid;

use service::auth::domain::AuthUser;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::repository::AuthRepository;
use service::{acronyms, categories, users};

use super::auth::{auth_service, CurrentUser, ServerState};
use crate::errors::ApiError;
use crate::pages;
use crate::session::{logout_cookie, session_cookie, SessionStore};

async fn session_user(state: &ServerState, jar: &CookieJar) -> Option<AuthUser> {
    let sid = SessionStore::id_from_jar(jar)?;
    let user_id = state.sessions.get(&sid)?;
    let repo = SeaOrmAuthRepository { db: state.db.clone() };
    repo.find_user_by_id(user_id).await.ok().flatten()
}

/// Session gate: browser requests without a live session are sent to
/// the login page rather than rejected with a status code.
pub async fn require_session(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    match session_user(&state, &jar).await {
        Some(user) => {
            req.extensions_mut().insert(CurrentUser(user));
            next.run(req).await
        }
        None => Redirect::to("/login").into_response(),
    }
}

pub async fn index(State(state): State<ServerState>) -> Result<Html<String>, ApiError> {
    let list = acronyms::list_all(&state.db).await?;
    let view = if list.is_empty() { None } else { Some(list.as_slice()) };
    Ok(Html(pages::index(view)))
}

pub async fn acronym_detail(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, ApiError> {
    let acronym = acronyms::get(&state.db, id).await?;
    let creator = acronyms::creator_of(&state.db, id).await?;
    let cats = acronyms::categories_of(&state.db, id).await?;
    let cats_view = if cats.is_empty() { None } else { Some(cats.as_slice()) };
    Ok(Html(pages::acronym(&acronym, &creator, cats_view)))
}

pub async fn user_detail(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, ApiError> {
    let user = users::get(&state.db, id).await?;
    let authored = users::acronyms_of(&state.db, id).await?;
    let view = if authored.is_empty() { None } else { Some(authored.as_slice()) };
    Ok(Html(pages::user(&user, view)))
}

pub async fn users_list(State(state): State<ServerState>) -> Result<Html<String>, ApiError> {
    let list = users::list_all(&state.db).await?;
    let view = if list.is_empty() { None } else { Some(list.as_slice()) };
    Ok(Html(pages::all_users(view)))
}

pub async fn categories_list(State(state): State<ServerState>) -> Result<Html<String>, ApiError> {
    let list = categories::list_all(&state.db).await?;
    let view = if list.is_empty() { None } else { Some(list.as_slice()) };
    Ok(Html(pages::all_categories(view)))
}

pub async fn category_detail(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, ApiError> {
    let category = categories::get(&state.db, id).await?;
    let listed = categories::acronyms_of(&state.db, id).await?;
    let view = if listed.is_empty() { None } else { Some(listed.as_slice()) };
    Ok(Html(pages::category(&category, view)))
}

pub async fn login_form() -> Html<String> {
    Html(pages::login())
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub username: String,
    pub password: String,
}

/// `POST /login` — an invalid login is a normal outcome: back to the
/// form, no error surfaced.
pub async fn login_post(
    State(state): State<ServerState>,
    jar: CookieJar,
    Form(data): Form<LoginData>,
) -> Result<Response, ApiError> {
    let svc = auth_service(&state);
    match svc.verify_credentials(&data.username, &data.password).await? {
        Some(user) => {
            let sid = state.sessions.create(user.id);
            let jar = jar.add(session_cookie(
                sid,
                state.auth.secure_cookies,
                state.auth.session_ttl_hours,
            ));
            Ok((jar, Redirect::to("/")).into_response())
        }
        None => Ok(Redirect::to("/login").into_response()),
    }
}

pub async fn logout(State(state): State<ServerState>, jar: CookieJar) -> Response {
    if let Some(sid) = SessionStore::id_from_jar(&jar) {
        state.sessions.remove(&sid);
    }
    let jar = jar.add(logout_cookie(state.auth.secure_cookies));
    (jar, Redirect::to("/")).into_response()
}

pub async fn create_form() -> Html<String> {
    Html(pages::acronym_form(None))
}

/// Form field names match the browser form, not the JSON API.
#[derive(Debug, Deserialize)]
pub struct AcronymFormData {
    #[serde(rename = "acronymShort")]
    pub acronym_short: String,
    #[serde(rename = "acronymLong")]
    pub acronym_long: String,
}

pub async fn create_post(
    State(state): State<ServerState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(data): Form<AcronymFormData>,
) -> Result<Redirect, ApiError> {
    let created =
        acronyms::create(&state.db, &data.acronym_short, &data.acronym_long, user.id).await?;
    Ok(Redirect::to(&format!("/acronyms/{}", created.id)))
}

pub async fn edit_form(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, ApiError> {
    let acronym = acronyms::get(&state.db, id).await?;
    Ok(Html(pages::acronym_form(Some(&acronym))))
}

/// Saving an edit reassigns the acronym to the editing user.
pub async fn edit_post(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(data): Form<AcronymFormData>,
) -> Result<Redirect, ApiError> {
    let updated =
        acronyms::update(&state.db, id, &data.acronym_short, &data.acronym_long, user.id).await?;
    Ok(Redirect::to(&format!("/acronyms/{}", updated.id)))
}

pub async fn delete_post(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, ApiError> {
    acronyms::delete(&state.db, id).await?;
    Ok(Redirect::to("/"))
}
