use crate::backend::{GraphicsBackend, ProgramId};
use crate::error::ProgramError;
use crate::material::Material;

use super::source::build_sources;
use super::{ProgramKey, ProgramParameters};

/// Opaque reference to a cached program.
///
/// Allocated monotonically and never reused, so a stale handle can not alias a
/// newer program.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ProgramHandle(u64);

/// A compiled program and the inputs it was built from.
#[derive(Debug)]
pub struct CompiledProgram {
    handle: ProgramHandle,
    key: ProgramKey,
    params: ProgramParameters,
    usage: u32,
    program: ProgramId,
    name: String,
}

impl CompiledProgram {
    #[inline]
    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    #[inline]
    pub fn key(&self) -> &ProgramKey {
        &self.key
    }

    #[inline]
    pub fn parameters(&self) -> &ProgramParameters {
        &self.params
    }

    /// Outstanding acquires. Always at least 1 while cached.
    #[inline]
    pub fn usage(&self) -> u32 {
        self.usage
    }

    #[inline]
    pub fn program(&self) -> ProgramId {
        self.program
    }

    /// Name of the material that triggered the compile.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Running totals since the cache was created.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct CacheStats {
    pub compiled: u64,
    pub reused: u64,
    pub destroyed: u64,
}

/// Reference-counted set of compiled programs.
///
/// A program is reused when both its key and its parameter snapshot match;
/// the key alone can collide across different parameter values. Every
/// successful [`ProgramCache::acquire`] must be paired with exactly one
/// [`ProgramCache::release`].
#[derive(Debug, Default)]
pub struct ProgramCache {
    programs: Vec<CompiledProgram>,
    next_handle: u64,
    stats: CacheStats,
}

impl ProgramCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached program for `key`/`params`, compiling it on a miss.
    ///
    /// Compile failures are returned as-is and leave the cache untouched.
    pub fn acquire(
        &mut self,
        gl: &mut dyn GraphicsBackend,
        material: &Material,
        params: &ProgramParameters,
        key: &ProgramKey,
    ) -> Result<ProgramHandle, ProgramError> {
        if let Some(entry) = self
            .programs
            .iter_mut()
            .find(|p| p.key == *key && p.params == *params)
        {
            entry.usage += 1;
            self.stats.reused += 1;
            log::trace!(
                "ProgramCache: reuse {:?} '{}' (usage {})",
                entry.handle,
                entry.name,
                entry.usage
            );
            return Ok(entry.handle);
        }

        if let Some(requested) = material.precision.filter(|p| *p != params.precision) {
            log::warn!(
                "ProgramCache: {} not supported, using {} instead (material '{}')",
                requested.as_str(),
                params.precision.as_str(),
                material.name
            );
        }

        let sources = build_sources(material, params);
        let program = gl
            .create_program(&sources.vertex, &sources.fragment)
            .map_err(|e| ProgramError::from_backend(e, &sources.vertex, &sources.fragment))?;

        let handle = ProgramHandle(self.next_handle);
        self.next_handle += 1;
        self.stats.compiled += 1;

        log::debug!(
            "ProgramCache: compiled {:?} '{}' family={} key_len={} (cached {})",
            handle,
            material.name,
            params.family.map_or("custom", |f| f.id()),
            key.len(),
            self.programs.len() + 1
        );

        self.programs.push(CompiledProgram {
            handle,
            key: key.clone(),
            params: params.clone(),
            usage: 1,
            program,
            name: material.name.clone(),
        });

        Ok(handle)
    }

    /// Drops one acquire of `handle`.
    ///
    /// Returns the backend program when this was the last user and it was
    /// destroyed.
    ///
    /// # Panics
    /// Panics if `handle` is not cached (already fully released or foreign).
    pub fn release(&mut self, gl: &mut dyn GraphicsBackend, handle: ProgramHandle) -> Option<ProgramId> {
        let index = self.index_of(handle);
        let Some(index) = index else {
            panic!("released {handle:?} which is not in the program cache");
        };

        let entry = &mut self.programs[index];
        assert!(entry.usage > 0, "{handle:?} cached with zero usage");
        entry.usage -= 1;
        if entry.usage > 0 {
            return None;
        }

        let entry = self.programs.swap_remove(index);
        gl.delete_program(entry.program);
        self.stats.destroyed += 1;
        log::debug!("ProgramCache: destroyed {:?} '{}'", entry.handle, entry.name);
        Some(entry.program)
    }

    /// Destroys every program regardless of usage. Returns the destroyed backend programs.
    pub fn clear(&mut self, gl: &mut dyn GraphicsBackend) -> Vec<ProgramId> {
        let destroyed: Vec<ProgramId> = self.programs.drain(..).map(|p| p.program).collect();
        for &program in &destroyed {
            gl.delete_program(program);
        }
        self.stats.destroyed += destroyed.len() as u64;
        if !destroyed.is_empty() {
            log::debug!("ProgramCache: cleared {} programs", destroyed.len());
        }
        destroyed
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn get(&self, handle: ProgramHandle) -> Option<&CompiledProgram> {
        self.programs.iter().find(|p| p.handle == handle)
    }

    #[inline]
    pub fn usage(&self, handle: ProgramHandle) -> Option<u32> {
        self.get(handle).map(CompiledProgram::usage)
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledProgram> {
        self.programs.iter()
    }

    fn index_of(&self, handle: ProgramHandle) -> Option<usize> {
        self.programs.iter().position(|p| p.handle == handle)
    }
}
