//! # Events Module
//!
//! Event-driven progress and lifecycle reporting.
//!
//! ## Design
//! The core library emits events through channels, allowing any UI
//! (CLI, GUI, web) to subscribe and display progress.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         match event {
//!             Event::Catalog(CatalogEvent::Progress(p)) => println!("Scored {}/{}", p.completed, p.total),
//!             Event::Marker(MarkerEvent::Found) => println!("Marker in view"),
//!             _ => {}
//!         }
//!     }
//! });
//!
//! matcher.match_candidate_with_events(&candidate, &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{EventChannel, EventReceiver, EventSender, null_sender};
pub use types::*;
