use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::graphql::{graphiql, graphql_handler};
use super::health::health_check;
use super::schema::build_schema;
use crate::auth::{cors_layer, security_headers_layer, session_middleware, AuthService};
use crate::services::AppointmentService;

pub fn create_routes(
    auth_service: AuthService,
    appointment_service: AppointmentService,
    enable_graphiql: bool,
) -> Router {
    let schema = build_schema(auth_service.clone(), appointment_service);

    let mut graphql = post(graphql_handler);
    if enable_graphiql {
        graphql = graphql.get(graphiql);
    }

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/graphql",
            graphql.route_layer(middleware::from_fn_with_state(
                auth_service,
                session_middleware,
            )),
        )
        .with_state(schema)
        .layer(security_headers_layer())
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
