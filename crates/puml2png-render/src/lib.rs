//! PlantUML server rendering for puml2png.
//!
//! This crate turns `.puml` source files into PNG artifacts by delegating
//! rendering to a PlantUML server:
//! - [`encoding`]: deflate + custom-base64 transport token encoding
//! - [`client`]: HTTP client with explicit status handling
//! - [`converter`]: read / validate / render / write orchestration
//!
//! # Example
//!
//! ```ignore
//! use puml2png_render::{PlantUmlClient, PlantUmlConverter};
//!
//! let client = PlantUmlClient::new("http://www.plantuml.com/plantuml");
//! let converter = PlantUmlConverter::new(client);
//! let ok = converter.process_file("docs/flow.puml".as_ref());
//! ```

mod client;
mod consts;
mod converter;
mod encoding;

pub use client::{PlantUmlClient, RenderError};
pub use consts::{DEFAULT_SERVER_URL, DEFAULT_TIMEOUT, PUML_EXTENSION};
pub use converter::{ConvertError, PlantUmlConverter, artifact_path};
pub use encoding::encode_diagram_source;
