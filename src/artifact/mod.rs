//! Artifact materialization for querypipe.
//!
//! Splits the materializer's responsibilities into three independent pieces:
//! a persistence codec, a set of report renderers, and a metadata extractor,
//! composed by a directory-backed artifact store.

pub mod codec;
pub mod metadata;
pub mod report;
pub mod store;

pub use codec::ArtifactCodec;
pub use metadata::{extract_metadata, KEYWORD_VOCABULARY};
pub use store::{ArtifactStore, Visualization, VisualizationKind};
