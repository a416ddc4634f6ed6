//! Type reconciliation.
//!
//! Gives each bound name one type that is sound for every alternative:
//!
//! - No ascriptions: the lattice join of the positional types.
//! - Some ascriptions: the ascriptions are authoritative. Among them one must
//!   be a supertype of all the others; that one is the upper bound, and every
//!   unascribed alternative's type must sit below it.
//!
//! An ascription must also admit its own position: `x: Dog` where the
//! scrutinee holds an `Animal` is rejected even without other alternatives.

use disjoin_ir::{Name, Span, TypeId};
use disjoin_types::Lattice;
use rustc_hash::FxHashMap;

use crate::collect::{BindingEvidence, BindingSite};
use crate::error::{ImplicatedSite, MatchError};

/// Where a reconciled type came from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeOrigin {
    /// Computed by joining positional types.
    Inferred,
    /// Dictated by a type ascription.
    Ascribed,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct EnvEntry {
    pub name: Name,
    pub ty: TypeId,
    pub origin: TypeOrigin,
}

/// Bound names with their reconciled types.
///
/// Iteration order is first-occurrence order in the leftmost alternative.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BindingEnvironment {
    entries: Vec<EnvEntry>,
    index: FxHashMap<Name, usize>,
}

impl BindingEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new name. Returns `false` (and changes nothing) if the name
    /// is already present.
    pub(crate) fn insert(&mut self, name: Name, ty: TypeId, origin: TypeOrigin) -> bool {
        if self.index.contains_key(&name) {
            return false;
        }
        self.index.insert(name, self.entries.len());
        self.entries.push(EnvEntry { name, ty, origin });
        true
    }

    pub fn get(&self, name: Name) -> Option<TypeId> {
        self.entry(name).map(|e| e.ty)
    }

    pub fn entry(&self, name: Name) -> Option<&EnvEntry> {
        self.index.get(&name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: Name) -> bool {
        self.index.contains_key(&name)
    }

    /// Position of `name` in iteration order.
    pub fn position(&self, name: Name) -> Option<usize> {
        self.index.get(&name).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnvEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        self.entries.iter().map(|e| e.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a BindingEnvironment {
    type Item = &'a EnvEntry;
    type IntoIter = std::slice::Iter<'a, EnvEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Reconcile every canonical name in `evidence`.
///
/// `span` is the or-pattern's span for errors without a better location.
#[tracing::instrument(level = "debug", skip_all, fields(names = evidence.names.len()))]
pub fn reconcile<L: Lattice + ?Sized>(
    lattice: &L,
    evidence: &BindingEvidence,
    span: Span,
) -> Result<BindingEnvironment, MatchError> {
    let mut env = BindingEnvironment::new();
    for &name in &evidence.names {
        let sites = evidence.sites(name);
        if sites.len() != evidence.alternatives {
            return Err(MatchError::internal(
                format!(
                    "binding #{} has {} sites across {} alternatives",
                    name.raw(),
                    sites.len(),
                    evidence.alternatives
                ),
                span,
            ));
        }

        let (ty, origin) = reconcile_name(lattice, name, sites, span)?;
        tracing::trace!(name = name.raw(), ?ty, ?origin, "reconciled");
        if !env.insert(name, ty, origin) {
            return Err(MatchError::internal(
                format!("binding #{} certified twice", name.raw()),
                span,
            ));
        }
    }
    Ok(env)
}

fn reconcile_name<L: Lattice + ?Sized>(
    lattice: &L,
    name: Name,
    sites: &[BindingSite],
    span: Span,
) -> Result<(TypeId, TypeOrigin), MatchError> {
    // Each ascription must admit the value at its own position.
    for site in sites {
        if let Some(ascribed) = site.ascription {
            if !lattice.is_subtype(site.inferred, ascribed) {
                let here = implicate(site);
                return Err(MatchError::ascription_conflict(
                    name,
                    span,
                    here.clone(),
                    here,
                    ascribed,
                    site.inferred,
                ));
            }
        }
    }

    let ascribed: Vec<&BindingSite> = sites.iter().filter(|s| s.ascription.is_some()).collect();
    if ascribed.is_empty() {
        let types: Vec<TypeId> = sites.iter().map(|s| s.inferred).collect();
        return match lattice.join_all(&types) {
            Some(joined) => Ok((joined, TypeOrigin::Inferred)),
            None => Err(incompatible(name, sites, span)),
        };
    }

    let bound = upper_ascription(lattice, name, sites, &ascribed, span)?;
    let bound_ty = bound.effective_type();

    for site in sites.iter().filter(|s| s.ascription.is_none()) {
        if !lattice.is_subtype(site.inferred, bound_ty) {
            return Err(MatchError::ascription_conflict(
                name,
                span,
                implicate(bound),
                implicate(site),
                bound_ty,
                site.inferred,
            ));
        }
    }
    Ok((bound_ty, TypeOrigin::Ascribed))
}

/// The ascribed site whose type is above every other ascription.
///
/// When none exists, distinct ascriptions that still have a join conflict
/// with each other; ascriptions without a join are incompatible outright.
fn upper_ascription<'s, L: Lattice + ?Sized>(
    lattice: &L,
    name: Name,
    sites: &'s [BindingSite],
    ascribed: &[&'s BindingSite],
    span: Span,
) -> Result<&'s BindingSite, MatchError> {
    let is_upper = |candidate: &BindingSite| {
        ascribed
            .iter()
            .all(|other| lattice.is_subtype(other.effective_type(), candidate.effective_type()))
    };
    if let Some(&upper) = ascribed.iter().find(|c| is_upper(**c)) {
        return Ok(upper);
    }

    let types: Vec<TypeId> = ascribed.iter().map(|s| s.effective_type()).collect();
    if lattice.join_all(&types).is_none() {
        return Err(incompatible(name, sites, span));
    }

    // Some ascription is not below the leftmost one; report the first.
    let first = ascribed[0];
    let conflicting = ascribed
        .iter()
        .find(|s| !lattice.is_subtype(s.effective_type(), first.effective_type()))
        .copied()
        .unwrap_or(first);
    Err(MatchError::ascription_conflict(
        name,
        span,
        implicate(first),
        implicate(conflicting),
        first.effective_type(),
        conflicting.effective_type(),
    ))
}

fn implicate(site: &BindingSite) -> ImplicatedSite {
    ImplicatedSite::new(site.alternative, site.span)
}

fn incompatible(name: Name, sites: &[BindingSite], span: Span) -> MatchError {
    tracing::debug!(name = name.raw(), "no common supertype");
    let implicated = sites
        .iter()
        .map(|s| implicate(s).with_type(s.effective_type()))
        .collect();
    MatchError::incompatible_types(name, span, implicated)
}
