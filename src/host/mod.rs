//! The boundary with the host runtime's object model.
//!
//! A host sparse matrix is a tagged object of class `"dgCMatrix"` with the
//! slots `i` (row indices), `p` (column pointers), `x` (values), `Dim` and
//! optionally `Dimnames`. Numeric slots are reference-counted buffers, so
//! attaching a view borrows them and re-wrapping a view shares them; neither
//! direction copies the numeric arrays.

use std::collections::BTreeMap;
use std::ops::Deref;

use ndarray::{ArcArray, Array1, ArrayView1, ArrayViewMut1, Ix1};

use crate::csc::{CscView, CscViewMut, DimNames};
use crate::error::{Result, SparseError};
use crate::params::{AttachParams, AttachValidParams, ParamGuard};

#[cfg(test)]
mod tests;

/// Class tag of the compressed sparse column matrices the host hands out.
pub const DGC_MATRIX: &str = "dgCMatrix";

/// A slot value, tagged with its host type.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Integer(ArcArray<i32, Ix1>),
    Double(ArcArray<f64, Ix1>),
    Character(Vec<String>),
    List(Vec<Slot>),
    Null,
}

impl Slot {
    pub fn type_name(&self) -> &'static str {
        match self {
            Slot::Integer(_) => "integer",
            Slot::Double(_) => "double",
            Slot::Character(_) => "character",
            Slot::List(_) => "list",
            Slot::Null => "NULL",
        }
    }

    fn labels(labels: &Option<Vec<String>>) -> Slot {
        match labels {
            Some(names) => Slot::Character(names.clone()),
            None => Slot::Null,
        }
    }
}

impl From<Vec<i32>> for Slot {
    fn from(values: Vec<i32>) -> Slot {
        Slot::Integer(Array1::from(values).into_shared())
    }
}

impl From<Vec<f64>> for Slot {
    fn from(values: Vec<f64>) -> Slot {
        Slot::Double(Array1::from(values).into_shared())
    }
}

impl From<&DimNames> for Slot {
    fn from(dimnames: &DimNames) -> Slot {
        Slot::List(vec![
            Slot::labels(&dimnames.rows),
            Slot::labels(&dimnames.cols),
        ])
    }
}

/// A host object: a class tag and a set of named slots.
#[derive(Debug, Clone, PartialEq)]
pub struct S4Object {
    class: String,
    slots: BTreeMap<String, Slot>,
}

impl S4Object {
    pub fn new(class: &str) -> S4Object {
        S4Object {
            class: class.to_string(),
            slots: BTreeMap::new(),
        }
    }

    /// Builds a `"dgCMatrix"` object from its parts. No validation is done
    /// here, that happens when a view is attached.
    pub fn dgcmatrix(
        i: Vec<i32>,
        p: Vec<i32>,
        x: Vec<f64>,
        dim: (usize, usize),
        dimnames: Option<DimNames>,
    ) -> S4Object {
        let mut obj = S4Object::new(DGC_MATRIX);
        obj.set_slot("i", i);
        obj.set_slot("p", p);
        obj.set_slot("x", x);
        obj.set_slot("Dim", vec![dim.0 as i32, dim.1 as i32]);
        let dimnames = match dimnames {
            Some(dimnames) => Slot::from(&dimnames),
            None => Slot::List(vec![Slot::Null, Slot::Null]),
        };
        obj.set_slot("Dimnames", dimnames);
        obj
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }

    pub fn set_slot<V: Into<Slot>>(&mut self, name: &str, value: V) {
        self.slots.insert(name.to_string(), value.into());
    }

    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(|k| k.as_str())
    }

    fn require(&self, name: &'static str) -> Result<&Slot> {
        self.slot(name).ok_or(SparseError::MissingSlot(name))
    }
}

fn integer_view<'a>(name: &'static str, slot: &'a Slot) -> Result<ArrayView1<'a, i32>> {
    match slot {
        Slot::Integer(values) => Ok(values.view()),
        other => Err(SparseError::SlotType {
            slot: name,
            expected: "integer",
            found: other.type_name(),
        }),
    }
}

fn double_view<'a>(name: &'static str, slot: &'a Slot) -> Result<ArrayView1<'a, f64>> {
    match slot {
        Slot::Double(values) => Ok(values.view()),
        other => Err(SparseError::SlotType {
            slot: name,
            expected: "double",
            found: other.type_name(),
        }),
    }
}

/// Mutable view over a double slot. A buffer shared with another object is
/// made unique first, so edits never reach a sibling.
fn double_view_mut<'a>(
    name: &'static str,
    slot: &'a mut Slot,
) -> Result<ArrayViewMut1<'a, f64>> {
    match slot {
        Slot::Double(values) => Ok(values.view_mut()),
        other => Err(SparseError::SlotType {
            slot: name,
            expected: "double",
            found: other.type_name(),
        }),
    }
}

fn dim_of(slot: &Slot) -> Result<(usize, usize)> {
    let dim = integer_view("Dim", slot)?;
    if dim.len() != 2 || dim[0] < 0 || dim[1] < 0 {
        return Err(SparseError::InvalidShape(format!(
            "Dim must hold two non-negative integers, got {}",
            dim
        )));
    }
    Ok((dim[0] as usize, dim[1] as usize))
}

fn labels_of(slot: &Slot) -> Result<Option<Vec<String>>> {
    match slot {
        Slot::Character(names) => Ok(Some(names.clone())),
        Slot::Null => Ok(None),
        other => Err(SparseError::SlotType {
            slot: "Dimnames",
            expected: "character",
            found: other.type_name(),
        }),
    }
}

fn dimnames_of(slot: Option<&Slot>) -> Result<Option<DimNames>> {
    let slot = match slot {
        None | Some(Slot::Null) => return Ok(None),
        Some(slot) => slot,
    };
    match slot {
        Slot::List(parts) if parts.len() == 2 => {
            let dimnames = DimNames::new(labels_of(&parts[0])?, labels_of(&parts[1])?);
            Ok(if dimnames.is_empty() { None } else { Some(dimnames) })
        }
        Slot::List(parts) => Err(SparseError::InvalidShape(format!(
            "Dimnames must hold two entries, got {}",
            parts.len()
        ))),
        other => Err(SparseError::SlotType {
            slot: "Dimnames",
            expected: "list",
            found: other.type_name(),
        }),
    }
}

fn check_class(obj: &S4Object) -> Result<()> {
    if obj.class() != DGC_MATRIX {
        return Err(SparseError::UnsupportedClass(obj.class().to_string()));
    }
    Ok(())
}

fn report(params: &AttachValidParams, verb: &str, shape: (usize, usize), nnz: usize) {
    if params.verbose() {
        println!(
            "{} {} {} x {} with {} stored entries (structure check: {})",
            verb,
            DGC_MATRIX,
            shape.0,
            shape.1,
            nnz,
            if params.check_structure() { "on" } else { "off" }
        );
    }
}

/// A read-only view attached to a host object, remembering where it came from
/// so it can be wrapped back up.
#[derive(Debug)]
pub struct Attached<'a> {
    source: &'a S4Object,
    view: CscView<'a, f64>,
}

impl<'a> Attached<'a> {
    pub fn view(&self) -> &CscView<'a, f64> {
        &self.view
    }

    pub fn into_view(self) -> CscView<'a, f64> {
        self.view
    }

    /// Wraps the view into a fresh `"dgCMatrix"` object whose `i`, `p` and `x`
    /// slots share the buffers of the source object. Only `Dim` and
    /// `Dimnames` are copied.
    pub fn detach(&self) -> S4Object {
        let mut obj = S4Object::new(DGC_MATRIX);
        for name in ["i", "p", "x"] {
            if let Some(slot) = self.source.slot(name) {
                obj.set_slot(name, slot.clone());
            }
        }
        let (nrows, ncols) = self.view.shape();
        obj.set_slot("Dim", vec![nrows as i32, ncols as i32]);
        let dimnames = match self.view.dimnames() {
            Some(dimnames) => Slot::from(dimnames),
            None => self
                .source
                .slot("Dimnames")
                .cloned()
                .unwrap_or(Slot::List(vec![Slot::Null, Slot::Null])),
        };
        obj.set_slot("Dimnames", dimnames);
        obj
    }
}

impl<'a> Deref for Attached<'a> {
    type Target = CscView<'a, f64>;

    fn deref(&self) -> &CscView<'a, f64> {
        &self.view
    }
}

/// Attaches a read-only view to a host `"dgCMatrix"` object. Slot types are
/// resolved here, once, and never again per access.
pub fn attach<'a>(obj: &'a S4Object, params: &AttachParams) -> Result<Attached<'a>> {
    let params = params.check_ref()?;
    check_class(obj)?;
    let i = integer_view("i", obj.require("i")?)?;
    let p = integer_view("p", obj.require("p")?)?;
    let x = double_view("x", obj.require("x")?)?;
    let (nrows, ncols) = dim_of(obj.require("Dim")?)?;
    let dimnames = dimnames_of(obj.slot("Dimnames"))?;

    let view = CscView::attach(x, i, p, nrows, ncols)?.with_owned_dimnames(dimnames);
    if params.check_structure() {
        view.validate()?;
    }
    report(params, "attached", view.shape(), view.n_nonzero());
    Ok(Attached { source: obj, view })
}

/// Attaches a view through which the stored values of a host object can be
/// edited in place. Edits are visible in `obj` once the view is dropped.
pub fn attach_mut<'a>(
    obj: &'a mut S4Object,
    params: &AttachParams,
) -> Result<CscViewMut<'a, f64>> {
    let params = params.check_ref()?;
    check_class(obj)?;
    let dimnames = dimnames_of(obj.slot("Dimnames"))?;
    let (nrows, ncols) = dim_of(obj.require("Dim")?)?;

    let (mut i, mut p, mut x) = (None, None, None);
    for (name, slot) in obj.slots.iter_mut() {
        match name.as_str() {
            "i" => i = Some(integer_view("i", slot)?),
            "p" => p = Some(integer_view("p", slot)?),
            "x" => x = Some(double_view_mut("x", slot)?),
            _ => {}
        }
    }
    let i = i.ok_or(SparseError::MissingSlot("i"))?;
    let p = p.ok_or(SparseError::MissingSlot("p"))?;
    let x = x.ok_or(SparseError::MissingSlot("x"))?;

    let view = CscViewMut::attach(x, i, p, nrows, ncols)?.with_owned_dimnames(dimnames);
    if params.check_structure() {
        view.validate()?;
    }
    report(params, "attached mutably", view.shape(), view.n_nonzero());
    Ok(view)
}
