//! Admin panel model: the portfolio editor as plain state plus async actions.
//!
//! Independent of any UI toolkit. A front end renders [`AdminSession`]'s
//! state (visible items, open form, in-flight flags, notification) and calls
//! its actions in response to user input.

mod form;
mod notification;
mod session;

pub use form::PortfolioForm;
pub use notification::{Notification, NotificationKind, NOTIFICATION_TTL};
pub use session::AdminSession;
