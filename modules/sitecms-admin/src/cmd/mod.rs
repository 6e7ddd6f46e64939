pub mod marquee;
pub mod nav;
pub mod services;

use anyhow::{bail, Result};

use sitecms_common::Orderable;
use sitecms_editor::{Collection, NestedCollection, Target};

/// Fail unless `target` addresses an item of `collection`.
pub(crate) fn require<D: Clone, I: Orderable + Clone>(
    collection: &Collection<D, I>,
    doc: &D,
    target: &Target,
) -> Result<()> {
    if collection.position(doc, target.clone()).is_none() {
        bail!("no {} entry at {target}", collection.name());
    }
    Ok(())
}

pub(crate) fn require_child<D: Clone, P: Orderable + Clone, C: Orderable + Clone>(
    nested: &NestedCollection<D, P, C>,
    doc: &D,
    parent: &Target,
    child: &Target,
) -> Result<()> {
    require(&nested.parent(), doc, parent)?;
    if child.resolve(nested.items(doc, parent.clone())).is_none() {
        bail!("no {} entry at {child} under {parent}", nested.name());
    }
    Ok(())
}
