mod instance;
mod item;
mod packing;

#[doc(inline)]
pub use instance::Instance;
#[doc(inline)]
pub use instance::InvalidInstance;
#[doc(inline)]
pub use item::Coord;
#[doc(inline)]
pub use item::Item;
#[doc(inline)]
pub use packing::Packing;
