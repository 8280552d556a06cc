//! Toast notifications for the Boutique storefront.
//!
//! A [`ToastQueue`] holds the messages currently on screen. Each message
//! with a duration expires on its own tokio timer; dismissing or evicting a
//! message cancels that timer.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use boutique_notify::{QueueConfig, ToastQueue, ToastRequest, Severity};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let toasts = ToastQueue::new(QueueConfig::default());
//!
//! let id = toasts.push(ToastRequest::new(Severity::Success, "Ajouté au panier"));
//! toasts.push(ToastRequest::new(Severity::Error, "Choisissez une taille").sticky());
//! assert_eq!(toasts.len(), 2);
//!
//! toasts.dismiss(id);
//! assert_eq!(toasts.len(), 1);
//! # }
//! ```

mod message;
mod queue;

pub use message::{Severity, ToastId, ToastMessage, ToastRequest};
pub use queue::{QueueConfig, ToastQueue, DEFAULT_CAPACITY, DEFAULT_DURATION};
