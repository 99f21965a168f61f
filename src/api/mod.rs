// GraphQL API and HTTP routes

pub mod graphql;
pub mod health;
pub mod routes;
pub mod schema;
