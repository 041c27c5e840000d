//! # jurist-auth
//!
//! Verification of identity-provider bearer tokens and resolution of the
//! caller into a [`Principal`].
//!
//! ## Modules
//!
//! - `jwt`: HS256 claims, decoding and (for tooling) encoding
//! - `principal`: the tagged lawyer/administrator caller
//! - `resolver`: token → principal, including e-mail verification sync

pub mod jwt;
pub mod principal;
pub mod resolver;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, UserType};
pub use principal::{Identity, Principal};
pub use resolver::PrincipalResolver;
