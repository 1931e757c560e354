/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";
pub const APP_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", APP_ROUTE_COMPONENT);

pub const EVENTS_ROUTE_COMPONENT: &str = "events";
pub const EVENTS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", EVENTS_ROUTE_COMPONENT);

/// Occurrence cap applied when a rule has no count of its own.
pub const DEFAULT_MAX_OCCURRENCES: u32 = 1000;

/// Years past "now" after which a walk is considered runaway.
pub const DEFAULT_SAFETY_HORIZON_YEARS: u32 = 100;

pub const DEFAULT_TIMEZONE: &str = "UTC";
