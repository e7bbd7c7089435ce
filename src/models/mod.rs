pub mod activity;
pub mod car_rental;
pub mod hotel;
pub mod hotel_image;
pub mod proposal;
pub mod proposal_room;
pub mod receipt;
pub mod reference_counter;

pub use hotel::{HotelDto, HotelKind, HotelRequest};
pub use proposal::{ProposalDto, ProposalRequest};
pub use receipt::{ReceiptDto, ReceiptRequest};
