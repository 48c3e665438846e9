pub mod commands;
pub mod errors;
pub mod events;
pub mod extra;
pub mod guest;
pub mod house;
pub mod pricing;
pub mod reservation;
pub mod value_objects;
pub mod verification;

pub use errors::*;
pub use events::*;
pub use extra::*;
pub use guest::*;
pub use house::*;
pub use pricing::PriceCoefficients;
pub use reservation::*;
pub use value_objects::*;
pub use verification::*;
