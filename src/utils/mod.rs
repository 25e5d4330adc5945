pub mod jwks;
pub mod validate;

pub use jwks::JwksVerifier;
pub use validate::ValidatedJson;
