//! CRUD one level down: sub-items owned by an item of a parent collection.

use std::fmt;

use sitecms_common::Orderable;

use crate::collection::{append, Collection, Target};

/// Lens onto the optional sub-collection of every item in `parent`.
///
/// Operations are addressed by a (parent, child) pair and only ever touch the
/// one matching parent.
pub struct NestedCollection<D, P, C> {
    name: &'static str,
    parent: Collection<D, P>,
    children: fn(&P) -> Option<&Vec<C>>,
    children_mut: fn(&mut P) -> &mut Option<Vec<C>>,
}

impl<D, P, C> Clone for NestedCollection<D, P, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D, P, C> Copy for NestedCollection<D, P, C> {}

impl<D, P, C> fmt::Debug for NestedCollection<D, P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedCollection")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .finish()
    }
}

impl<D, P, C> NestedCollection<D, P, C>
where
    D: Clone,
    P: Orderable + Clone,
    C: Orderable + Clone,
{
    pub fn new(
        name: &'static str,
        parent: Collection<D, P>,
        children: fn(&P) -> Option<&Vec<C>>,
        children_mut: fn(&mut P) -> &mut Option<Vec<C>>,
    ) -> Self {
        Self {
            name,
            parent,
            children,
            children_mut,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parent(&self) -> Collection<D, P> {
        self.parent
    }

    /// Sub-items of the addressed parent, empty when it has none yet.
    pub fn items<'a>(&self, doc: &'a D, parent: impl Into<Target>) -> &'a [C]
    where
        P: 'a,
        C: 'a,
    {
        self.parent
            .get(doc, parent)
            .and_then(|p| (self.children)(p))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Append `template` under the addressed parent, creating its
    /// sub-collection on first use.
    pub fn add(&self, doc: &D, parent: impl Into<Target>, template: C) -> D {
        let name = self.name;
        let children_mut = self.children_mut;
        self.parent.update(doc, parent, move |p| {
            let children = children_mut(p).get_or_insert_with(Vec::new);
            append(name, children, template);
        })
    }

    pub fn update(
        &self,
        doc: &D,
        parent: impl Into<Target>,
        child: impl Into<Target>,
        patch: impl FnOnce(&mut C),
    ) -> D {
        let child = child.into();
        let children_mut = self.children_mut;
        self.parent.update(doc, parent, move |p| {
            if let Some(children) = children_mut(p).as_mut() {
                if let Some(i) = child.resolve(children) {
                    patch(&mut children[i]);
                }
            }
        })
    }

    /// Drop one sub-item. An emptied sub-collection stays present (empty).
    pub fn remove(&self, doc: &D, parent: impl Into<Target>, child: impl Into<Target>) -> D {
        let child = child.into();
        let children_mut = self.children_mut;
        self.parent.update(doc, parent, move |p| {
            if let Some(children) = children_mut(p).as_mut() {
                if let Some(i) = child.resolve(children) {
                    children.remove(i);
                }
            }
        })
    }
}
