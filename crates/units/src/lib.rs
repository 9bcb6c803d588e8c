pub mod angle;
pub mod length;
pub mod mass;
pub mod time;

#[cfg(test)]
mod angle_test;

pub use angle::Angle;
pub use length::{Length, PARSEC_TO_AU};
pub use mass::{Mass, EARTH_MASS_KG, SOLAR_MASS_KG};
pub use time::{Time, DAYS_PER_WEEK, DAYS_PER_YEAR};
