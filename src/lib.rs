//! newsreel — fetch an article feed once, page through it from memory.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌───────────┐ RawArticle ┌─────────────┐ Article ┌──────────┐ snapshot ┌──────────┐
//! │ source/   │ ─────────► │ normalize   │ ──────► │ store/   │ ───────► │ worker   │
//! │ (fetcher) │            │ (pure)      │         │ (cache)  │          │ (task)   │
//! └───────────┘            └─────────────┘         └──────────┘          └──────────┘
//! ```
//!
//! * **`source`** — the `ArticleSource` trait, the raw wire types and the
//!   HTTP implementation.
//! * **`normalize`** — raw record → [`Article`] with every fallback applied.
//! * **`store`** — one-time initialization, page windows, lookup by id and
//!   the loading/error state.
//! * **`worker`** — runs store operations on the runtime and streams
//!   snapshots back to the terminal reader.

pub mod article;
pub mod error;
pub mod normalize;
pub mod source;
pub mod store;
pub mod worker;

pub use article::Article;
pub use error::FetchError;
pub use source::{ArticleSource, HttpSource};
pub use store::{ArticleStore, LoadingState, StoreConfig, StoreSnapshot};
