mod errors;
mod extras_service;
mod houses_service;
mod reservation_service;
mod usecases;
mod verification_service;

pub use errors::{CatalogError, ReservationError, UsecaseError, VerificationError};
pub use extras_service::{ExtrasDependencies, ExtrasService};
pub use houses_service::{HousesDependencies, HousesService};
pub use reservation_service::{ReservationDependencies, ReservationService};
pub use usecases::Usecases;
pub use verification_service::{
    MAX_ISSUE_ATTEMPTS, VerificationDependencies, VerificationService, verification_ttl,
};
