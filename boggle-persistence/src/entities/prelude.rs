pub use super::games::Entity as Games;
pub use super::users::Entity as Users;
pub use super::words::Entity as Words;
