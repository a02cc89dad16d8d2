//! Traversal over the collection tree
//!
//! Iteration is depth-first in document order: an item is yielded before
//! its children, children before later siblings. This matches the order
//! the validator walks and the order paths appear in violation reports.
//!
//! Copyright (c) 2025 Satchel Team
//! Licensed under the Apache-2.0 license

use std::slice;

use crate::types::{Collection, Event, Item, Request, Script};

/// Depth-first iterator over every item in a tree
pub struct Items<'a> {
    stack: Vec<&'a Item>,
}

impl<'a> Items<'a> {
    pub(crate) fn new(roots: &'a [Item]) -> Self {
        let mut stack: Vec<&'a Item> = roots.iter().collect();
        stack.reverse();
        Self { stack }
    }
}

impl<'a> Iterator for Items<'a> {
    type Item = &'a crate::types::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.stack.pop()?;
        for child in item.children().iter().rev() {
            self.stack.push(child);
        }
        Some(item)
    }
}

/// Iterator over the request-bearing items of a tree
pub struct Requests<'a> {
    items: Items<'a>,
}

impl<'a> Iterator for Requests<'a> {
    type Item = (&'a crate::types::Item, &'a Request);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.items.next()?;
            if let Some(request) = &item.request {
                return Some((item, request));
            }
        }
    }
}

/// Iterator over every event hook in a collection
///
/// Collection-level hooks come first, then item hooks in tree order.
pub struct Events<'a> {
    pending: slice::Iter<'a, Event>,
    items: Items<'a>,
}

impl<'a> Iterator for Events<'a> {
    type Item = &'a Event;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.next() {
                return Some(event);
            }
            let item = self.items.next()?;
            if let Some(events) = &item.event {
                self.pending = events.iter();
            }
        }
    }
}

impl Collection {
    /// Iterate every item in the tree
    pub fn items(&self) -> Items<'_> {
        Items::new(&self.item)
    }

    /// Iterate the items that carry requests
    pub fn requests(&self) -> Requests<'_> {
        Requests { items: self.items() }
    }

    /// Iterate every event hook, collection-level ones first
    pub fn events(&self) -> Events<'_> {
        Events {
            pending: self.event.as_deref().unwrap_or(&[]).iter(),
            items: self.items(),
        }
    }

    /// Apply a rewrite to every script in the collection, including the
    /// collection-level hooks
    pub fn for_each_script_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Script),
    {
        if let Some(events) = &mut self.event {
            for event in events {
                f(&mut event.script);
            }
        }
        visit_item_scripts(&mut self.item, &mut f);
    }
}

impl Item {
    /// Iterate this item and its descendants
    pub fn walk(&self) -> Items<'_> {
        Items::new(slice::from_ref(self))
    }
}

fn visit_item_scripts<F>(items: &mut [Item], f: &mut F)
where
    F: FnMut(&mut Script),
{
    for item in items {
        if let Some(events) = &mut item.event {
            for event in events {
                f(&mut event.script);
            }
        }
        if let Some(children) = &mut item.item {
            visit_item_scripts(children, f);
        }
    }
}
