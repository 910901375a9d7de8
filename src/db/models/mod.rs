//! Database models
//!
//! One file per table. Each file holds the entity struct plus its
//! create/update request payloads.

pub mod feedback;
pub mod menu_item;
pub mod order;
pub mod reservation;
pub mod serde_helpers;
pub mod user;

pub use feedback::{Feedback, FeedbackCreate};
pub use menu_item::{MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate, MenuQuery};
pub use order::{
    Order, OrderAddItem, OrderCreate, OrderLine, OrderLineInput, OrderRemoveItem, OrderStatus,
    OrderStatusUpdate, OrderType,
};
pub use reservation::{Reservation, ReservationCreate, ReservationStatus, ReservationStatusUpdate};
pub use user::{Role, User};
