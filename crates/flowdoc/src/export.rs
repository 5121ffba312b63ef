//! Present stage: backends consuming a finished [`DrawList`].

pub mod svg;
pub mod text;

use flowdoc_core::draw::DrawList;

/// A backend that turns draw commands into an output artifact.
pub trait Exporter {
    fn export(&mut self, draw_list: &DrawList) -> Result<(), Error>;
}

#[derive(Debug)]
pub enum Error {
    Render(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
