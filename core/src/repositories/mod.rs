pub mod user;

pub use user::{IdentityLookup, InMemoryIdentityLookup};
