//! Instanced attribute registry.
//!
//! A layer declares each per-instance attribute once (name, floats per
//! instance, update function). The manager owns the CPU-side values,
//! tracks which attributes are stale, and recomputes only those.

use rustc_hash::FxHashMap;

/// Recomputes an attribute from the layer's props.
pub type AttributeUpdater<P> = fn(&P, &mut Attribute);

/// Declaration of one instanced attribute.
pub struct AttributeDescriptor<P> {
    /// Attribute name.
    pub name: &'static str,
    /// Floats per instance.
    pub size: usize,
    /// Fills the attribute's value buffer.
    pub update: AttributeUpdater<P>,
}

/// One instanced attribute: a dense `f32` buffer of `size` floats per
/// instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: &'static str,
    size: usize,
    value: Vec<f32>,
    needs_update: bool,
}

impl Attribute {
    /// Attribute name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Floats per instance.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Current values, `instance_count * size` long.
    pub fn value(&self) -> &[f32] {
        &self.value
    }

    /// Mutable values for update functions.
    pub fn value_mut(&mut self) -> &mut [f32] {
        &mut self.value
    }

    /// Per-instance slots of `size` floats, in instance order.
    pub fn slots_mut(&mut self) -> std::slice::ChunksExactMut<'_, f32> {
        self.value.chunks_exact_mut(self.size)
    }

    /// Instances the values cover.
    pub fn instance_count(&self) -> usize {
        self.value.len() / self.size
    }

    /// `true` if the next update will recompute this attribute.
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }
}

struct Entry<P> {
    attribute: Attribute,
    update: AttributeUpdater<P>,
}

/// Owns a layer's instanced attributes.
pub struct AttributeManager<P> {
    entries: Vec<Entry<P>>,
    by_name: FxHashMap<&'static str, usize>,
    instance_count: usize,
}

impl<P> Default for AttributeManager<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> AttributeManager<P> {
    /// Empty manager.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_name: FxHashMap::default(),
            instance_count: 0,
        }
    }

    /// Register instanced attributes. Re-registering a name replaces the
    /// previous declaration. New attributes start stale.
    pub fn add_instanced(
        &mut self,
        descriptors: impl IntoIterator<Item = AttributeDescriptor<P>>,
    ) {
        for desc in descriptors {
            let entry = Entry {
                attribute: Attribute {
                    name: desc.name,
                    size: desc.size.max(1),
                    value: Vec::new(),
                    needs_update: true,
                },
                update: desc.update,
            };
            if let Some(&index) = self.by_name.get(desc.name) {
                self.entries[index] = entry;
            } else {
                let _ = self.by_name.insert(desc.name, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Attribute by name.
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.by_name.get(name).map(|&i| &self.entries[i].attribute)
    }

    /// Instance count of the last update.
    pub fn instance_count(&self) -> usize {
        self.instance_count
    }

    /// Mark one attribute stale. Returns `false` for unknown names.
    pub fn invalidate(&mut self, name: &str) -> bool {
        match self.by_name.get(name) {
            Some(&i) => {
                self.entries[i].attribute.needs_update = true;
                true
            }
            None => false,
        }
    }

    /// Mark every attribute stale.
    pub fn invalidate_all(&mut self) {
        for entry in &mut self.entries {
            entry.attribute.needs_update = true;
        }
    }

    /// Recompute stale attributes for `instance_count` instances.
    ///
    /// A changed instance count makes every attribute stale. Each
    /// recomputed buffer is resized to exactly `instance_count * size`
    /// before its update function runs. Returns the recomputed names in
    /// registration order.
    pub fn update(&mut self, props: &P, instance_count: usize) -> Vec<&'static str> {
        if instance_count != self.instance_count {
            self.invalidate_all();
            self.instance_count = instance_count;
        }

        let mut updated = Vec::new();
        for entry in &mut self.entries {
            let attribute = &mut entry.attribute;
            if !attribute.needs_update {
                continue;
            }
            attribute.value.clear();
            attribute.value.resize(instance_count * attribute.size, 0.0);
            (entry.update)(props, attribute);
            attribute.needs_update = false;
            updated.push(attribute.name);
        }

        if !updated.is_empty() {
            log::debug!(
                "recomputed {} attribute(s) for {instance_count} instances: {updated:?}",
                updated.len()
            );
        }
        updated
    }
}
