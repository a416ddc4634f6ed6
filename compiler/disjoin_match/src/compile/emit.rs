//! Decision procedure emission.
//!
//! Runs after reconciliation, so every binding already has its exposed type.
//! Each alternative becomes one arm: its tag and literal tests in pre-order,
//! followed by the slots its bindings are read from.

use disjoin_ir::{MatchPattern, Name, PathInstruction, PatternKind, ScrutineePath, Span};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::collect::BindingEvidence;
use crate::error::MatchError;
use crate::procedure::{Arm, BindingSlot, Check, Conversion, DecisionProcedure, TagDispatch};
use crate::shape::tuple_index;
use crate::stack::ensure_sufficient_stack;
use crate::{BindingEnvironment, CompileOptions};

pub(super) fn emit(
    alternatives: &[MatchPattern],
    evidence: &BindingEvidence,
    env: &BindingEnvironment,
    base: &ScrutineePath,
    options: CompileOptions,
) -> Result<DecisionProcedure, MatchError> {
    let mut arms = Vec::with_capacity(alternatives.len());
    for (index, alternative) in alternatives.iter().enumerate() {
        let mut emitter = ArmEmitter {
            evidence,
            env,
            alternative: index,
            checks: Vec::new(),
            bindings: Vec::new(),
        };
        let mut path = base.clone();
        emitter.walk(alternative, &mut path)?;
        arms.push(Arm {
            alternative: index,
            checks: emitter.checks,
            bindings: emitter.bindings,
        });
    }

    let dispatch = if options.wants_dispatch(arms.len()) {
        build_dispatch(&arms, base)
    } else {
        None
    };
    if let Some(dispatch) = &dispatch {
        tracing::trace!(
            tags = dispatch.by_tag.len(),
            untagged = dispatch.untagged.len(),
            "tag dispatch"
        );
    }

    Ok(DecisionProcedure {
        arms,
        dispatch,
        names: env.names().collect(),
    })
}

struct ArmEmitter<'e> {
    evidence: &'e BindingEvidence,
    env: &'e BindingEnvironment,
    alternative: usize,
    checks: Vec<Check>,
    bindings: Vec<BindingSlot>,
}

impl ArmEmitter<'_> {
    fn walk(&mut self, pattern: &MatchPattern, path: &mut ScrutineePath) -> Result<(), MatchError> {
        ensure_sufficient_stack(|| match &pattern.kind {
            PatternKind::Wildcard => Ok(()),
            PatternKind::Binding { name, .. } => self.slot(*name, path, pattern.span),
            PatternKind::Literal(value) => {
                self.checks.push(Check::Literal {
                    path: path.clone(),
                    value: *value,
                });
                Ok(())
            }
            PatternKind::Variant { tag, inner } => {
                self.checks.push(Check::Tag {
                    path: path.clone(),
                    tag: *tag,
                });
                path.push(PathInstruction::Payload);
                let result = self.walk(inner, path);
                path.pop();
                result
            }
            PatternKind::Tuple(elements) => {
                for (i, element) in elements.iter().enumerate() {
                    path.push(PathInstruction::TupleIndex(tuple_index(i)));
                    let result = self.walk(element, path);
                    path.pop();
                    result?;
                }
                Ok(())
            }
            PatternKind::Record { fields, .. } => {
                for field in fields {
                    path.push(PathInstruction::Field(field.name));
                    let result = self.walk(&field.pattern, path);
                    path.pop();
                    result?;
                }
                Ok(())
            }
            PatternKind::Or(_) => {
                let Some(nested) = self.evidence.nested(self.alternative, path) else {
                    return Err(MatchError::internal(
                        format!("nested or-pattern at {path:?} was never compiled"),
                        pattern.span,
                    ));
                };
                let mut procedure = nested.procedure.clone();
                procedure.retarget(self.env);
                self.checks.push(Check::FirstOf {
                    path: path.clone(),
                    procedure: Box::new(procedure),
                });
                Ok(())
            }
        })
    }

    fn slot(&mut self, name: Name, path: &ScrutineePath, span: Span) -> Result<(), MatchError> {
        let Some(site) = self.evidence.site(name, self.alternative) else {
            return Err(MatchError::internal(
                format!(
                    "binding #{} has no site in alternative {}",
                    name.raw(),
                    self.alternative
                ),
                span,
            ));
        };
        let Some(exposed) = self.env.get(name) else {
            return Err(MatchError::internal(
                format!("binding #{} missing from the environment", name.raw()),
                span,
            ));
        };
        let native = site.effective_type();
        self.bindings.push(BindingSlot {
            name,
            path: path.clone(),
            native,
            exposed,
            conversion: Conversion::between(native, exposed),
        });
        Ok(())
    }
}

/// Group arms by the tag they test at `base`. `None` if no arm tests one.
fn build_dispatch(arms: &[Arm], base: &ScrutineePath) -> Option<TagDispatch> {
    let mut by_tag: FxHashMap<Name, SmallVec<[usize; 2]>> = FxHashMap::default();
    let mut untagged = Vec::new();
    for (index, arm) in arms.iter().enumerate() {
        let root_tag = arm.checks.iter().find_map(|check| match check {
            Check::Tag { path, tag } if path == base => Some(*tag),
            _ => None,
        });
        match root_tag {
            Some(tag) => by_tag.entry(tag).or_default().push(index),
            None => untagged.push(index),
        }
    }
    if by_tag.is_empty() {
        return None;
    }
    Some(TagDispatch {
        path: base.clone(),
        by_tag,
        untagged,
    })
}
