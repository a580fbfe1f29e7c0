pub mod constants;
pub mod crs;
pub mod geo;
pub mod map;
pub mod resolver;
pub mod viewport;
