//! One DOCX processing session: an opened package and its context.

use crate::container::OoxmlContainer;
use crate::context::DocxContext;
use crate::error::Result;
use crate::images::{pull_image_files, ImageMap};
use crate::options::ContextOptions;
use std::path::Path;

/// An opened DOCX package together with its assembled context.
///
/// The archive is released when the session is dropped.
#[derive(Debug)]
pub struct DocxSession {
    container: OoxmlContainer,
    context: DocxContext,
}

impl DocxSession {
    /// Open a DOCX file and assemble its context.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, &ContextOptions::default())
    }

    /// Open a DOCX file with explicit options.
    pub fn open_with(path: impl AsRef<Path>, options: &ContextOptions) -> Result<Self> {
        let container = OoxmlContainer::open(path)?;
        Self::from_container(container, options)
    }

    /// Create a session from the raw archive bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_bytes_with(data, &ContextOptions::default())
    }

    pub fn from_bytes_with(data: Vec<u8>, options: &ContextOptions) -> Result<Self> {
        let container = OoxmlContainer::from_bytes(data)?;
        Self::from_container(container, options)
    }

    /// Create a session from an already opened container.
    pub fn from_container(container: OoxmlContainer, options: &ContextOptions) -> Result<Self> {
        let context = DocxContext::collect_with(&container, options)?;
        Ok(Self { container, context })
    }

    pub fn context(&self) -> &DocxContext {
        &self.context
    }

    /// Mutable context, for advancing numbering counters during traversal.
    pub fn context_mut(&mut self) -> &mut DocxContext {
        &mut self.context
    }

    pub fn container(&self) -> &OoxmlContainer {
        &self.container
    }

    /// Extract images, optionally writing them to `image_directory`.
    pub fn pull_image_files(&self, image_directory: Option<&Path>) -> Result<ImageMap> {
        pull_image_files(&self.container, &self.context, image_directory)
    }

    /// End the session, keeping only the context.
    pub fn into_context(self) -> DocxContext {
        self.context
    }
}
