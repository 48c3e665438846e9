pub mod extra_repository;
pub mod guest_repository;
pub mod house_repository;
pub mod reservation_repository;
pub mod verification_repository;

// パブリックに型を再エクスポート
pub use extra_repository::ExtraRepository as PostgresExtraRepository;
pub use guest_repository::GuestRepository as PostgresGuestRepository;
pub use house_repository::HouseRepository as PostgresHouseRepository;
pub use reservation_repository::ReservationRepository as PostgresReservationRepository;
pub use verification_repository::VerificationRepository as PostgresVerificationRepository;
