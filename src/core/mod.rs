// Core conversion: encode, decode with key splitting, session state, errors.
pub mod conversion;
pub mod decode;
pub mod encode;
pub mod error;
mod keyline;
pub mod session;
