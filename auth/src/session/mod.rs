pub mod codec;
pub mod errors;
pub mod payload;

pub use codec::SessionCodec;
pub use errors::SessionError;
pub use payload::SessionPayload;
