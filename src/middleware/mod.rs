/*
 * Responsibility
 * - Public interface of the middleware layer (re-export)
 * - http::apply(...) for transport concerns, tenant::apply(...) for tenant resolution
 */
pub mod http;
pub mod tenant;
