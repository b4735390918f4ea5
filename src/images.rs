//! Image extraction from the relationship graph.

use crate::container::OoxmlContainer;
use crate::context::DocxContext;
use crate::error::Result;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Image file name (directory stripped) mapped to its bytes.
pub type ImageMap = BTreeMap<String, Vec<u8>>;

/// Read every image relationship target from the package.
///
/// Images are keyed by base file name; when two different parts share a base
/// name the one read last wins. With `image_directory`, the directory (and its
/// parents) is created and every image is written into it, replacing files of
/// the same name.
///
/// # Example
///
/// ```no_run
/// use docx_context::{pull_image_files, DocxContext, OoxmlContainer};
///
/// let container = OoxmlContainer::open("document.docx")?;
/// let context = DocxContext::collect(&container)?;
/// let images = pull_image_files(&container, &context, Some("out/images".as_ref()))?;
/// println!("{} images", images.len());
/// # Ok::<(), docx_context::Error>(())
/// ```
pub fn pull_image_files(
    container: &OoxmlContainer,
    context: &DocxContext,
    image_directory: Option<&Path>,
) -> Result<ImageMap> {
    let mut images = ImageMap::new();
    let mut read_from: HashMap<String, String> = HashMap::new();

    for record in context.relationships_of_type("image") {
        if record.is_external() {
            log::debug!("skipping external image {}", record.target);
            continue;
        }
        let path = record.path();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        let data = container.read_binary(&path)?;

        if let Some(previous) = read_from.insert(name.clone(), path.clone()) {
            if previous != path {
                log::debug!("{} replaces {} as image {}", path, previous, name);
            }
        }
        images.insert(name, data);
    }

    if let Some(dir) = image_directory {
        fs::create_dir_all(dir)?;
        for (name, data) in &images {
            fs::write(dir.join(name), data)?;
        }
        log::debug!("wrote {} images to {}", images.len(), dir.display());
    }

    Ok(images)
}
