pub mod broadcast;
pub mod contacts;
pub mod pacing;
pub mod template;

pub use crate::domain::model::{
    BroadcastReport, Contact, DelayRange, SendEvent, SendMode, SendOutcome,
};
pub use crate::domain::ports::{MessagingClient, Pacer};
pub use crate::utils::error::Result;
