//! Recursive walker
//!
//! Kind dispatch over a pair of values. Children are walked depth-first in
//! index, declaration or key order; the first divergence is returned and
//! each enclosing frame prepends its segment as the recursion unwinds.

use super::visited::VisitedKey;
use super::Comparator;
use crate::errors::{Divergence, Reason, Result};
use crate::trace::{Segment, Side};
use crate::value::{Callable, Dynamic, Mapping, Record, Reference, Sequence, Value};

fn diverge(reason: Reason, depth: usize) -> Divergence {
    Divergence::new(reason).at_depth(depth)
}

fn absent(side: Side, depth: usize) -> Divergence {
    diverge(Reason::AbsenceMismatch { absent: side }, depth)
}

impl Comparator {
    /// Compare one pair of values.
    ///
    /// `addressable` is true when both values live inside shared storage
    /// (a reference target or a sequence element, or inline within such a value).
    pub(crate) fn walk(
        &mut self,
        x: &Value,
        y: &Value,
        addressable: bool,
        depth: usize,
    ) -> Result<()> {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let ty = match (x.type_of(), y.type_of()) {
            (None, None) => return Ok(()),
            (None, Some(_)) => return Err(absent(Side::X, depth)),
            (Some(_), None) => return Err(absent(Side::Y, depth)),
            (Some(tx), Some(ty_y)) if tx != ty_y => {
                return Err(diverge(
                    Reason::TypeMismatch {
                        x: tx.to_string(),
                        y: ty_y.to_string(),
                    },
                    depth,
                ));
            }
            (Some(ty), Some(_)) => ty,
        };

        if ty.kind().is_addressable_compound() {
            if let Some(key) = VisitedKey::for_pair(x, y, &ty, addressable) {
                if !self.visited.enter(key) {
                    self.stats.cycle_shortcuts += 1;
                    tracing::trace!(depth, ty = %ty, "pair already visited");
                    return Ok(());
                }
            }
        }

        match (x, y) {
            (Value::Array(a), Value::Array(b)) => {
                self.walk_items(a.items(), b.items(), addressable, depth)
            }
            (Value::Sequence(a), Value::Sequence(b)) => self.walk_sequence(a, b, depth),
            (Value::Record(a), Value::Record(b)) => self.walk_record(a, b, addressable, depth),
            (Value::Mapping(a), Value::Mapping(b)) => self.walk_mapping(a, b, depth),
            (Value::Reference(a), Value::Reference(b)) => self.walk_reference(a, b, depth),
            (Value::Dynamic(a), Value::Dynamic(b)) => self.walk_dynamic(a, b, depth),
            (Value::Callable(a), Value::Callable(b)) => walk_callable(a, b, depth),
            _ => compare_leaves(x, y, depth),
        }
    }

    fn walk_items(
        &mut self,
        xs: &[Value],
        ys: &[Value],
        addressable: bool,
        depth: usize,
    ) -> Result<()> {
        for (i, (x, y)) in xs.iter().zip(ys).enumerate() {
            self.walk(x, y, addressable, depth + 1)
                .map_err(|d| d.within(Segment::Index(i)))?;
        }
        Ok(())
    }

    fn walk_sequence(&mut self, a: &Sequence, b: &Sequence, depth: usize) -> Result<()> {
        let (sa, sb) = match (a.storage(), b.storage()) {
            (None, None) => return Ok(()),
            (None, Some(_)) => return Err(absent(Side::X, depth)),
            (Some(_), None) => return Err(absent(Side::Y, depth)),
            (Some(sa), Some(sb)) => (sa, sb),
        };
        let xs = sa.borrow();
        let ys = sb.borrow();
        if xs.len() != ys.len() {
            return Err(diverge(
                Reason::LengthMismatch {
                    x: xs.len(),
                    y: ys.len(),
                },
                depth,
            ));
        }
        if a.same_storage(b) {
            self.stats.identity_shortcuts += 1;
            return Ok(());
        }
        self.walk_items(&xs, &ys, true, depth)
    }

    fn walk_record(
        &mut self,
        a: &Record,
        b: &Record,
        addressable: bool,
        depth: usize,
    ) -> Result<()> {
        let (xf, yf) = (a.fields(), b.fields());
        for (i, field) in xf.iter().enumerate() {
            let segment = || Segment::Field(field.name.clone());
            match yf.get(i) {
                Some(other) if other.name == field.name => {
                    self.walk(&field.value, &other.value, addressable, depth + 1)
                        .map_err(|d| d.within(segment()))?;
                }
                _ => {
                    return Err(diverge(
                        Reason::KeyMissing {
                            missing_in: Side::Y,
                        },
                        depth + 1,
                    )
                    .within(segment()));
                }
            }
        }
        if let Some(extra) = yf.get(xf.len()) {
            return Err(diverge(
                Reason::KeyMissing {
                    missing_in: Side::X,
                },
                depth + 1,
            )
            .within(Segment::Field(extra.name.clone())));
        }
        Ok(())
    }

    fn walk_mapping(&mut self, a: &Mapping, b: &Mapping, depth: usize) -> Result<()> {
        let (ea, eb) = match (a.entries(), b.entries()) {
            (None, None) => return Ok(()),
            (None, Some(_)) => return Err(absent(Side::X, depth)),
            (Some(_), None) => return Err(absent(Side::Y, depth)),
            (Some(ea), Some(eb)) => (ea, eb),
        };
        let xs = ea.borrow();
        let ys = eb.borrow();
        if xs.len() != ys.len() {
            return Err(diverge(
                Reason::LengthMismatch {
                    x: xs.len(),
                    y: ys.len(),
                },
                depth,
            ));
        }
        if a.same_storage(b) {
            self.stats.identity_shortcuts += 1;
            return Ok(());
        }
        // Keys only present in `ys` are caught by the length check above.
        for (key, vx) in xs.iter() {
            let segment = || Segment::Key(key.to_string());
            let Some(vy) = ys.get(key) else {
                return Err(diverge(
                    Reason::KeyMissing {
                        missing_in: Side::Y,
                    },
                    depth + 1,
                )
                .within(segment()));
            };
            self.walk(vx, vy, false, depth + 1)
                .map_err(|d| d.within(segment()))?;
        }
        Ok(())
    }

    fn walk_reference(&mut self, a: &Reference, b: &Reference, depth: usize) -> Result<()> {
        match (a.target(), b.target()) {
            (None, None) => Ok(()),
            (Some(_), Some(_)) if a.same_target(b) => {
                self.stats.identity_shortcuts += 1;
                Ok(())
            }
            (Some(ta), Some(tb)) => {
                let vx = ta.borrow();
                let vy = tb.borrow();
                self.walk(&vx, &vy, true, depth + 1)
                    .map_err(|d| d.within(Segment::Pointer))
            }
            (None, Some(_)) => Err(absent(Side::X, depth + 1).within(Segment::Pointer)),
            (Some(_), None) => Err(absent(Side::Y, depth + 1).within(Segment::Pointer)),
        }
    }

    fn walk_dynamic(&mut self, a: &Dynamic, b: &Dynamic, depth: usize) -> Result<()> {
        match (a.inner(), b.inner()) {
            (None, None) => Ok(()),
            (None, Some(_)) => Err(absent(Side::X, depth)),
            (Some(_), None) => Err(absent(Side::Y, depth)),
            // The concrete types are re-derived here, so a type mismatch
            // hidden behind the wrapper surfaces one level down.
            (Some(ix), Some(iy)) => self
                .walk(ix, iy, false, depth + 1)
                .map_err(|d| d.within(Segment::Interface)),
        }
    }
}

fn walk_callable(a: &Callable, b: &Callable, depth: usize) -> Result<()> {
    match (a.is_nil(), b.is_nil()) {
        (true, true) => Ok(()),
        (true, false) => Err(absent(Side::X, depth)),
        (false, true) => Err(absent(Side::Y, depth)),
        (false, false) => Err(diverge(Reason::CallableDivergence, depth)),
    }
}

/// Compare two scalars of the same type.
///
/// Renderings are compared rather than the typed payloads, so two leaves
/// that print identically are equal. For the scalar kinds of this model
/// that only distinguishes `-0` from `0`.
fn compare_leaves(x: &Value, y: &Value, depth: usize) -> Result<()> {
    if x.is_nan() {
        return Err(diverge(Reason::NaN { side: Side::X }, depth));
    }
    if y.is_nan() {
        return Err(diverge(Reason::NaN { side: Side::Y }, depth));
    }
    let (rx, ry) = (x.to_string(), y.to_string());
    if rx != ry {
        return Err(diverge(Reason::ValueMismatch { x: rx, y: ry }, depth));
    }
    Ok(())
}
