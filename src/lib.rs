//! Single-surface application shell serving a bundled web UI from a virtual
//! origin.
//!
//! Every resource load of the rendering surface passes through an
//! [`Interceptor`]. Loads under `https://appassets.androidplatform.net/` are
//! routed by longest path prefix to a [`handler::PathHandler`]; everything else
//! is declined and left to the surface's default network stack.
//!
//! ```no_run
//! use appassets_shell::{InterceptedRequest, Interceptor, Router, VirtualOrigin};
//! use appassets_shell::handler::EmbeddedAssetsHandler;
//!
//! let router = Router::builder(VirtualOrigin::appassets())
//!     .add_path_handler("/assets/", EmbeddedAssetsHandler::new())
//!     .build()?;
//! let interceptor = Interceptor::new(router);
//! let outcome = interceptor.should_intercept(&InterceptedRequest::get(
//!     "https://appassets.androidplatform.net/assets/index.html",
//! ));
//! assert!(!outcome.is_decline());
//! # Ok::<(), appassets_shell::error::BuildError>(())
//! ```

pub mod bundle;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod interceptor;
pub mod logger;
pub mod origin;
pub mod router;
pub mod server;
pub mod surface;

pub use interceptor::{InterceptedRequest, Interception, Interceptor};
pub use origin::{VirtualOrigin, INITIAL_URL};
pub use router::{Resolution, Router};
pub use surface::{BackNavigation, RenderingSurface, Shell};
