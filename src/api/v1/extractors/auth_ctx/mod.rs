/*!
 * Authentication context extractor
 *
 * Public API:
 * - AuthCtx, TokenSource
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::{AuthCtx, TokenSource};
