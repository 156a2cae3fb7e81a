use crate::error::SiteError;
use crate::view::View;
use crate::viewport::{Entry, Viewport, WatchOptions};

pub const LAZY_IMAGE_SELECTOR: &str = "img[data-src]";
pub const DEFERRED_SOURCE: &str = "data-src";

/// Moves `data-src` into `src` the first time an image becomes visible.
pub fn observe<P>(viewport: &P, images: Vec<P::Target>) -> Result<(), SiteError>
where
    P: Viewport,
    P::Target: View,
{
    if images.is_empty() {
        return Err(SiteError::MissingElement(LAZY_IMAGE_SELECTOR.to_string()));
    }

    let on_change = |entries: Vec<Entry<P::Target>>| -> Vec<P::Target> {
        entries
            .into_iter()
            .filter(|entry| entry.is_intersecting)
            .filter_map(|entry| {
                let source = entry.target.attribute(DEFERRED_SOURCE)?;
                entry.target.set_attribute("src", &source);
                entry.target.remove_attribute(DEFERRED_SOURCE);
                Some(entry.target)
            })
            .collect()
    };

    viewport.watch(images, WatchOptions::default(), Box::new(on_change))
}
