//! Blood request entity and its status enum.

pub mod model;
pub mod status;

pub use model::BloodRequest;
pub use status::RequestStatus;
