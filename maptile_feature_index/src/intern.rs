// Copyright 2025 the Maptile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shares one allocation per distinct source layer or bucket name.

use alloc::sync::Arc;

use hashbrown::HashSet;

#[derive(Clone, Debug, Default)]
pub(crate) struct NameInterner {
    names: HashSet<Arc<str>>,
}

impl NameInterner {
    /// Returns the shared copy of `name`, allocating it on first sight.
    pub(crate) fn intern(&mut self, name: &str) -> Arc<str> {
        if let Some(existing) = self.names.get(name) {
            return Arc::clone(existing);
        }
        let name: Arc<str> = Arc::from(name);
        self.names.insert(Arc::clone(&name));
        name
    }

    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }
}
