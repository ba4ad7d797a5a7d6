//! The per-transaction qualified brand registry.

use std::sync::Arc;

use crate::domain::{BrandCode, BrandLookup, ProgramId};

use super::{BrandInfo, BrandProgram};

/// Errors while building a registry from reference data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A qualified brand names a program that was not loaded
    #[error("unknown brand program {0}")]
    UnknownProgram(ProgramId),

    /// A qualified brand names a brand its program does not offer
    #[error("program {program} does not offer brand {brand}")]
    UnknownBrand { program: ProgramId, brand: BrandCode },

    /// Two programs share an id
    #[error("duplicate brand program {0}")]
    DuplicateProgram(ProgramId),
}

/// One (program, brand) pair registered for a transaction.
#[derive(Debug, Clone)]
pub struct QualifiedBrand {
    pub program: Arc<BrandProgram>,
    pub brand: Arc<BrandInfo>,
}

impl QualifiedBrand {
    pub fn new(program: Arc<BrandProgram>, brand: Arc<BrandInfo>) -> Self {
        Self { program, brand }
    }
}

/// Ordered, append-only list of qualified brands.
///
/// Markets refer to entries by index, so entries are never removed or
/// reordered once added.
#[derive(Debug, Clone, Default)]
pub struct BrandRegistry {
    entries: Vec<QualifiedBrand>,
}

impl BrandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its index.
    pub fn push(&mut self, entry: QualifiedBrand) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Register every brand of `program`, returning the new indices in order.
    pub fn qualify_program(&mut self, program: &Arc<BrandProgram>) -> Vec<usize> {
        program
            .brands
            .iter()
            .map(|brand| self.push(QualifiedBrand::new(program.clone(), brand.clone())))
            .collect()
    }

    /// Register one brand of a program known by id.
    pub fn qualify_by_code(
        &mut self,
        programs: &[Arc<BrandProgram>],
        program_id: &ProgramId,
        brand_code: &BrandCode,
    ) -> Result<usize, RegistryError> {
        let program = programs
            .iter()
            .find(|p| &p.id == program_id)
            .ok_or_else(|| RegistryError::UnknownProgram(program_id.clone()))?;
        let brand = program
            .brands
            .iter()
            .find(|b| &b.code == brand_code)
            .ok_or_else(|| RegistryError::UnknownBrand {
                program: program_id.clone(),
                brand: brand_code.clone(),
            })?;
        Ok(self.push(QualifiedBrand::new(program.clone(), brand.clone())))
    }

    pub fn get(&self, index: usize) -> Option<&QualifiedBrand> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QualifiedBrand> {
        self.entries.iter()
    }

    /// Index of the entry for a (program, brand) pair.
    pub fn index_of(&self, program_id: &ProgramId, brand_code: &BrandCode) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| &e.program.id == program_id && &e.brand.code == brand_code)
    }
}

impl BrandLookup for BrandRegistry {
    fn brand_code(&self, index: usize) -> Option<&BrandCode> {
        self.entries.get(index).map(|e| &e.brand.code)
    }
}

/// Check that program ids are unique.
pub fn ensure_unique_programs(programs: &[Arc<BrandProgram>]) -> Result<(), RegistryError> {
    let mut seen = std::collections::HashSet::new();
    for program in programs {
        if !seen.insert(&program.id) {
            return Err(RegistryError::DuplicateProgram(program.id.clone()));
        }
    }
    Ok(())
}
