//! SMTP reply types.

mod reply;

pub use reply::{Reply, ReplyClass, ReplyCode};
