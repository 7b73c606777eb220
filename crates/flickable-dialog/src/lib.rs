//! Draggable modal dialog that is dismissed by flicking it off screen.
//!
//! The surface follows the finger and tilts while dragged. On release it
//! either snaps back to where it started or, past the dismiss threshold, is
//! spun away while the window fades out. A tap on the backdrop or the back
//! key cancels the dialog.
//!
//! ```ignore
//! let dialog = FlickableDialog::builder()
//!     .content(ContentDescriptor::new("confirm_delete"))
//!     .cancelable(true)
//!     .build_dialog()?;
//! dialog.set_on_flick(|direction| log::info!("flicked {direction}"));
//! dialog.show(host, &events, animations, runtime.frame_clock())?;
//! ```

mod config;
pub mod constants;
mod dialog;
mod direction;
mod dismissal;
mod gesture;
mod host;
mod listener;
mod outcome;
mod threshold;

pub use config::{ConfigError, ContentDescriptor, FlickableConfig, FlickableConfigBuilder};
pub use dialog::{DialogError, DialogPhase, FlickableDialog};
pub use direction::FlickDirection;
pub use dismissal::{backdrop_fade_in_request, backdrop_fade_out_request, DismissalCoordinator};
pub use gesture::{drag_rotation, DragUpdate, GestureState, GestureTracker};
pub use host::{Backdrop, ModalEvent, ModalHost, Surface, TouchEvent, TouchEventKind};
pub use listener::{DialogListeners, FlickableDialogListener};
pub use outcome::{return_request, throw_requests, OutcomeAnimator, ThrowPlan};
pub use threshold::{evaluate as evaluate_release, ReleaseOutcome};
