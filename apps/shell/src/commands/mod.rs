//! # Commands Module
//!
//! Everything the terminal front end can ask the shell to do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── Product list, product lookup
//! ├── product.rs  ◄─── Detail screen: variants, add to cart, back
//! ├── cart.rs     ◄─── Cart screen: stepper, typed qty, remove, checkout
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn list_products(catalog: &CatalogState) -> Vec<ProductCard>
//!
//! // Only needs the cart
//! fn get_cart(cart: &CartState) -> CartResponse
//!
//! // Needs catalog, cart and the screen stack
//! fn add_to_cart(catalog: &CatalogState, cart: &CartState, nav: &mut Navigator)
//! ```
//!
//! Commands return serializable response types and `AppResult`, and log
//! their arguments at `debug`.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod product;
