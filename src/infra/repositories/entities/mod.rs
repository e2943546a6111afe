//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod admin_user;
pub mod booking;
pub mod celebrity;

#[allow(unused_imports)]
pub use admin_user::{ActiveModel as AdminUserActiveModel, Entity as AdminUserEntity};
#[allow(unused_imports)]
pub use booking::{ActiveModel as BookingActiveModel, Entity as BookingEntity};
#[allow(unused_imports)]
pub use celebrity::{ActiveModel as CelebrityActiveModel, Entity as CelebrityEntity};
