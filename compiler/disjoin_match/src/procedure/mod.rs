//! Decision procedures.
//!
//! A `DecisionProcedure` is a left-to-right scan over arms, one per
//! alternative. An arm accepts a value when all its checks pass; the first
//! accepting arm wins and its binding slots are projected out of the value.
//!
//! All paths are absolute from the root scrutinee, including those inside a
//! nested procedure, so a nested or-pattern runs against the same root value
//! as its parent.

use disjoin_ir::{Literal, Name, ScrutineePath, TypeId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::reconcile::BindingEnvironment;
use crate::stack::ensure_sufficient_stack;
use crate::Value;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecisionProcedure {
    pub arms: Vec<Arm>,
    /// Tag-indexed shortcut over `arms`, if one was built.
    pub dispatch: Option<TagDispatch>,
    /// Binding names in environment order; selections report bindings in
    /// this order.
    pub names: Vec<Name>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Arm {
    /// Index of the alternative this arm was compiled from.
    pub alternative: usize,
    /// Tests in pattern pre-order; an outer tag is tested before anything
    /// under it.
    pub checks: Vec<Check>,
    pub bindings: Vec<BindingSlot>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Check {
    /// The value at `path` is a variant with this tag.
    Tag { path: ScrutineePath, tag: Name },
    /// The value at `path` equals this literal.
    Literal { path: ScrutineePath, value: Literal },
    /// A nested or-pattern at `path` selects some alternative. Its bindings
    /// join the arm's own.
    FirstOf {
        path: ScrutineePath,
        procedure: Box<DecisionProcedure>,
    },
}

/// Where a binding's value comes from and how it is exposed.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BindingSlot {
    pub name: Name,
    pub path: ScrutineePath,
    /// Type this alternative gives the binding.
    pub native: TypeId,
    /// Reconciled type every alternative exposes.
    pub exposed: TypeId,
    pub conversion: Conversion,
}

/// Representation change from a slot's native type to its exposed type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Conversion {
    Identity,
    /// Native type is a strict subtype of the exposed type.
    Upcast,
}

impl Conversion {
    pub fn between(native: TypeId, exposed: TypeId) -> Self {
        if native == exposed {
            Conversion::Identity
        } else {
            Conversion::Upcast
        }
    }
}

/// Arms grouped by the tag they test at the or-pattern's root.
///
/// Arms that test no tag there go to `untagged` and are candidates for every
/// value. Candidates are always tried in ascending arm order, so dispatch
/// selects exactly what the linear scan would.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TagDispatch {
    pub path: ScrutineePath,
    pub by_tag: FxHashMap<Name, SmallVec<[usize; 2]>>,
    pub untagged: Vec<usize>,
}

/// Result of running a procedure.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Selection<'v> {
    pub alternative: usize,
    /// Bindings in environment order.
    pub bindings: Vec<BoundValue<'v>>,
}

impl<'v> Selection<'v> {
    pub fn get(&self, name: Name) -> Option<&BoundValue<'v>> {
        self.bindings.iter().find(|b| b.name == name)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoundValue<'v> {
    pub name: Name,
    pub value: &'v Value,
    /// Exposed (reconciled) type.
    pub ty: TypeId,
    pub native: TypeId,
    pub conversion: Conversion,
}

impl DecisionProcedure {
    /// Select the leftmost alternative that accepts `root`.
    pub fn select<'v>(&self, root: &'v Value) -> Option<Selection<'v>> {
        ensure_sufficient_stack(|| {
            let candidates = self.dispatch.as_ref().and_then(|d| d.candidates(root));
            match candidates {
                Some(candidates) => candidates
                    .into_iter()
                    .find_map(|i| self.try_arm(&self.arms[i], root)),
                None => self.arms.iter().find_map(|arm| self.try_arm(arm, root)),
            }
        })
    }

    /// Like `select`, ignoring any dispatch map.
    pub fn select_linear<'v>(&self, root: &'v Value) -> Option<Selection<'v>> {
        ensure_sufficient_stack(|| self.arms.iter().find_map(|arm| self.try_arm(arm, root)))
    }

    fn try_arm<'v>(&self, arm: &Arm, root: &'v Value) -> Option<Selection<'v>> {
        let mut bindings = Vec::with_capacity(self.names.len());
        for check in &arm.checks {
            match check {
                Check::Tag { path, tag } => {
                    if root.at_path(path)?.tag() != Some(*tag) {
                        return None;
                    }
                }
                Check::Literal { path, value } => {
                    if !root.at_path(path)?.matches_literal(value) {
                        return None;
                    }
                }
                Check::FirstOf { procedure, .. } => {
                    bindings.extend(procedure.select(root)?.bindings);
                }
            }
        }
        for slot in &arm.bindings {
            bindings.push(BoundValue {
                name: slot.name,
                value: root.at_path(&slot.path)?,
                ty: slot.exposed,
                native: slot.native,
                conversion: slot.conversion,
            });
        }
        bindings.sort_by_key(|b| {
            self.names
                .iter()
                .position(|n| *n == b.name)
                .unwrap_or(usize::MAX)
        });
        Some(Selection {
            alternative: arm.alternative,
            bindings,
        })
    }

    /// Path `name` is bound at. Every arm agrees, so the first one is asked.
    pub(crate) fn binding_path(&self, name: Name) -> Option<&ScrutineePath> {
        let arm = self.arms.first()?;
        if let Some(slot) = arm.bindings.iter().find(|slot| slot.name == name) {
            return Some(&slot.path);
        }
        arm.checks.iter().find_map(|check| match check {
            Check::FirstOf { procedure, .. } => {
                ensure_sufficient_stack(|| procedure.binding_path(name))
            }
            _ => None,
        })
    }

    /// Expose every slot, nested procedures included, at the types of `env`.
    pub(crate) fn retarget(&mut self, env: &BindingEnvironment) {
        for arm in &mut self.arms {
            for slot in &mut arm.bindings {
                if let Some(exposed) = env.get(slot.name) {
                    slot.exposed = exposed;
                    slot.conversion = Conversion::between(slot.native, exposed);
                }
            }
            for check in &mut arm.checks {
                if let Check::FirstOf { procedure, .. } = check {
                    ensure_sufficient_stack(|| procedure.retarget(env));
                }
            }
        }
    }
}

impl TagDispatch {
    /// Candidate arms for `root`, ascending. `None` when the value at the
    /// dispatch path is not a variant (every arm is then a candidate).
    fn candidates(&self, root: &Value) -> Option<Vec<usize>> {
        let tag = root.at_path(&self.path)?.tag()?;
        let tagged = self.by_tag.get(&tag).map_or(&[][..], |arms| arms.as_slice());
        Some(merge_sorted(tagged, &self.untagged))
    }
}

fn merge_sorted(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] <= b[j] {
            out.push(a[i]);
            i += 1;
        } else {
            out.push(b[j]);
            j += 1;
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
