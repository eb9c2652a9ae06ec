//! Server side of the search: GraphQL access, settings and export routes.

pub mod api;
pub mod config;
pub mod db_utils;
pub mod graphql_query_service;
pub mod server_extra;
