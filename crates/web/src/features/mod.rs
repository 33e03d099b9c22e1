pub mod entries;
pub mod events;
pub mod meets;
pub mod rankings;
pub mod results;
pub mod swimmers;
