//! Refresh path: exchanges a verified refresh token's claims for a new
//! access token.

mod coordinator;

#[cfg(test)]
mod tests;

pub use coordinator::RefreshCoordinator;
