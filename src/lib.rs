pub mod error;
pub mod farm {
    pub mod boundary;
    pub mod frame;
    pub mod turbine;
}
pub mod render;
pub mod rose {
    pub mod curve;
    pub mod sample;
}
pub mod units;
pub mod vars;

pub use error::{Error, Result};
pub use rose::sample::{sample_wind_rose, WindRose};
