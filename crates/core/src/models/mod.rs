//! Entity records and the schemas used to create them.
//!
//! Each entity comes in two shapes:
//!
//! - the stored record (`Product`, `Booking`, ...) with its generated fields
//! - a `New*` insert schema that omits generated fields and carries defaults
//!
//! Insert schemas implement [`Schema`](crate::validation::Schema) so the API
//! can validate request bodies before they reach storage.

pub mod booking;
pub mod cart;
pub mod product;
pub mod sound_track;
pub mod user;

pub use booking::{Booking, BookingStatusUpdate, NewBooking};
pub use cart::{CartItem, CartLine, CartSummary, NewCartItem, SubtotalOverflow};
pub use product::{NewProduct, Product};
pub use sound_track::{NewSoundTrack, SoundTrack};
pub use user::{CreateUser, NewUser, User};
