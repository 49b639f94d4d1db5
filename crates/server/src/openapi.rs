use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct AcronymRequest {
    pub short: String,
    pub long: String,
}

#[derive(ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub username: String,
    pub password: String,
}

#[derive(ToSchema)]
pub struct CategoryRequest {
    pub name: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::acronyms::list,
        crate::routes::acronyms::get_one,
        crate::routes::acronyms::search,
        crate::routes::acronyms::get_creator,
        crate::routes::acronyms::get_categories,
        crate::routes::acronyms::create,
        crate::routes::acronyms::update,
        crate::routes::acronyms::delete,
        crate::routes::acronyms::attach_category,
        crate::routes::users::create,
        crate::routes::users::list,
        crate::routes::users::get_one,
        crate::routes::users::get_acronyms,
        crate::routes::users::login,
        crate::routes::categories::create,
        crate::routes::categories::list,
        crate::routes::categories::get_one,
        crate::routes::categories::get_acronyms,
    ),
    components(
        schemas(
            HealthResponse,
            AcronymRequest,
            CreateUserRequest,
            CategoryRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "acronyms"),
        (name = "users"),
        (name = "categories")
    )
)]
pub struct ApiDoc;
