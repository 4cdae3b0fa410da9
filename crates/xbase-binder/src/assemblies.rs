//! Assembly identities.
//!
//! `AssemblyId::CURRENT` is the module being compiled; referenced assemblies
//! are numbered in the order they appear in the compilation's reference list.

/// Identity of a compiled module or referenced assembly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssemblyId(pub u32);

impl AssemblyId {
    /// The module currently being compiled.
    pub const CURRENT: AssemblyId = AssemblyId(0);

    #[inline]
    pub const fn is_current(self) -> bool {
        self.0 == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssemblyInfo {
    pub name: String,
    /// Deprecated runtime kept only for source compatibility; its members lose
    /// every tie against members from other assemblies.
    pub is_legacy_runtime: bool,
}

/// The compilation's assemblies, in reference order.
#[derive(Clone, Debug)]
pub struct AssemblyTable {
    assemblies: Vec<AssemblyInfo>,
}

impl Default for AssemblyTable {
    fn default() -> Self {
        Self::new("<current>")
    }
}

impl AssemblyTable {
    pub fn new(current_name: &str) -> Self {
        Self {
            assemblies: vec![AssemblyInfo {
                name: current_name.to_string(),
                is_legacy_runtime: false,
            }],
        }
    }

    /// Append a referenced assembly. Order of calls is the reference order.
    pub fn add_reference(&mut self, name: &str, is_legacy_runtime: bool) -> AssemblyId {
        let id = AssemblyId(self.assemblies.len() as u32);
        self.assemblies.push(AssemblyInfo {
            name: name.to_string(),
            is_legacy_runtime,
        });
        id
    }

    pub fn get(&self, id: AssemblyId) -> Option<&AssemblyInfo> {
        self.assemblies.get(id.0 as usize)
    }

    pub fn name(&self, id: AssemblyId) -> &str {
        self.get(id).map_or("<unknown>", |info| info.name.as_str())
    }

    pub fn is_legacy_runtime(&self, id: AssemblyId) -> bool {
        self.get(id).is_some_and(|info| info.is_legacy_runtime)
    }

    /// Position in the reference list; the current module sorts first and
    /// unknown assemblies sort last.
    pub fn reference_order(&self, id: AssemblyId) -> usize {
        if self.get(id).is_some() {
            id.0 as usize
        } else {
            usize::MAX
        }
    }

    pub fn len(&self) -> usize {
        self.assemblies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assemblies.is_empty()
    }
}
