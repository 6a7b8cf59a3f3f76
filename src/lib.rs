//! Figma to Tailwind (FTT) Library
//!
//! Extracts typography and color design tokens from a Figma file and folds
//! them into a `tailwind.config.js` theme extension.
//!
//! # Module Overview
//!
//! - [`document`] - Order-preserving document tree
//! - [`tokens`] - Tree search, typography/color extraction and assembly
//! - [`color`] - Hex encoding and nearest color names
//! - [`pipeline`] - One extraction run over a document
//! - [`session`] - Last-request-wins bookkeeping for repeated runs
//! - [`figma_client`] - Figma REST API client
//! - [`config`] - Configuration file support
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```
//! use ftt_lib::{run_json, PipelineOptions};
//!
//! # fn example() -> ftt_lib::Result<()> {
//! let raw = r#"{
//!     "styles": {"1:2": {"name": "Web/H1 / Title"}},
//!     "document": {
//!         "styles": {"text": "1:2"},
//!         "style": {"fontFamily": "Inter", "fontSize": 32, "lineHeightPx": 38.4}
//!     }
//! }"#;
//! let snapshot = run_json(raw, &PipelineOptions::default())?;
//! assert_eq!(snapshot.configuration.theme.extend.font_size["h1"][0], "32px");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod figma_client;
pub mod output;
pub mod pipeline;
pub mod resource;
pub mod session;
pub mod tokens;

pub use config::Config;
pub use document::DocumentNode;
pub use error::{ErrorCategory, ErrorPayload, FttError, Result};
pub use figma_client::{FigmaAuth, FigmaClient};
pub use output::{
    ErrorOutput, FttOutput, OutputFormat, SourceDescriptor, TokensOutput, FTT_OUTPUT_VERSION,
};
pub use pipeline::{run, run_json, PipelineOptions, Snapshot};
pub use resource::{parse_source, ParsedSource, SourceKind};
pub use session::{Completion, Session, SessionState, Ticket};
pub use tokens::{
    ColorCollisionPolicy, ColorToken, TextStyle, TokenConfiguration, TypographyToken,
};
