pub mod chat_transport;
pub mod extra_repository;
pub mod guest_repository;
pub mod house_repository;
pub mod notifier;
pub mod reservation_query;
pub mod reservation_repository;
pub mod verification_issuer;
pub mod verification_repository;

pub use chat_transport::{
    CallbackAnswer, ChatTransport, InlineButton, OutboundMessage, OutboundPhoto, TransportError,
};
pub use extra_repository::ExtraRepository;
pub use guest_repository::GuestRepository;
pub use house_repository::HouseRepository;
pub use notifier::{NotifyError, ReservationNotifier};
pub use reservation_query::{QueryError, ReservationQuery};
pub use reservation_repository::ReservationRepository;
pub use verification_issuer::VerificationIssuer;
pub use verification_repository::VerificationRepository;
