use async_graphql::http::GraphiQLSource;
use axum::{
    extract::{Extension, State},
    response::{Html, IntoResponse, Json},
};

use super::schema::AppSchema;
use crate::auth::UserSession;

/// Execute a GraphQL request, exposing the resolved session (if any) to resolvers.
pub async fn graphql_handler(
    State(schema): State<AppSchema>,
    session: Option<Extension<UserSession>>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    let request = match session {
        Some(Extension(session)) => request.data(session),
        None => request,
    };

    Json(schema.execute(request).await)
}

/// GraphiQL explorer pointed at the GraphQL endpoint
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
