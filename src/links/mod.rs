mod service;
mod short_id;

pub use service::{LinkService, MAX_SHORT_ID_ATTEMPTS};
pub use short_id::{
    SHORT_ID_ALPHABET, SHORT_ID_LENGTH, generate_short_id, is_reserved, is_well_formed,
};
