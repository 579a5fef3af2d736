pub mod cart_line_items;
pub mod carts;
pub mod products;

pub use cart_line_items::Entity as CartLineItems;
pub use carts::Entity as Carts;
pub use products::Entity as Products;
