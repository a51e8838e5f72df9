pub mod categories;
pub mod client_errors;
pub mod newsletter;
pub mod products;
pub mod users;
