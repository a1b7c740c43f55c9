/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const APPOINTMENTS_ROUTE_COMPONENT: &str = "appointments";
pub const APPOINTMENTS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", APPOINTMENTS_ROUTE_COMPONENT);

pub const STAFF_ROUTE_COMPONENT: &str = "staff";
pub const STAFF_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", STAFF_ROUTE_COMPONENT);

pub const SLOTS_ROUTE_COMPONENT: &str = "slots";
pub const SERVICES_ROUTE_COMPONENT: &str = "services";

pub const USERS_ROUTE_COMPONENT: &str = "users";
pub const USERS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", USERS_ROUTE_COMPONENT);

/// Response header carrying the per-request trace id
pub const TRACE_ID_HEADER: &str = "x-trace-id";
