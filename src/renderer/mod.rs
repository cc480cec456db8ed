//! Rendering collaborators
//!
//! The core never touches pixels. Sprites are resolved once through a
//! `ContentLoader`, and each frame the read-only draw pass issues sprite and
//! text calls against a `Renderer`.

pub mod content;
pub mod draw;

pub use content::{Content, ContentLoader, FixedSizeLoader, Sprite, TextureId};
pub use draw::{DrawCommand, RecordingRenderer, Renderer, Tint, draw};
