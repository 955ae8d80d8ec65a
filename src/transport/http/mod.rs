pub mod router;
pub mod types;
pub mod handlers {
    pub mod auth;
    pub mod company;
    pub mod contact;
    pub mod country;
    pub mod health;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
