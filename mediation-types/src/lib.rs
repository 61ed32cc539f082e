//! Shared vocabulary for the Equativ mediation adapter
//!
//! This crate holds the types every other layer agrees on:
//!
//! - [`PlacementDescriptor`] - the validated form of the opaque
//!   `"<site id>/<page id>/<format id>[/<targeting>]"` placement string
//! - [`NormalizedEvent`] and [`ErrorKind`] - the outward event vocabulary
//!   delivered to the mediation host
//! - [`AdFormat`] and [`AdLifecycleState`] - which controller an event belongs
//!   to and where that controller currently is
//!
//! ```rust
//! use mediation_types::PlacementDescriptor;
//!
//! let placement: PlacementDescriptor = "123/456/789/sport=football".parse().unwrap();
//! assert_eq!(placement.site_id(), 123);
//! assert_eq!(placement.targeting(), Some("sport=football"));
//! ```

pub mod error;
pub mod event;
pub mod format;
pub mod placement;

pub use error::{PlacementError, Result};
pub use event::{ErrorKind, NormalizedEvent, Reward};
pub use format::{ActivityContext, AdFormat, AdLifecycleState, ViewId};
pub use placement::PlacementDescriptor;
