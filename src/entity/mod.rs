pub mod categories;
pub mod products;
pub mod users;

pub use categories::Entity as Categories;
pub use products::Entity as Products;
pub use users::Entity as Users;
