//! Shared tensor handle with gradient storage

use super::BackwardOp;
use ndarray::Array1;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

type GradCell = Rc<RefCell<Option<Array1<f32>>>>;

struct TensorInner {
    data: RefCell<Array1<f32>>,
    grad: GradCell,
    requires_grad: bool,
    backward_op: RefCell<Option<Rc<dyn BackwardOp>>>,
    name: Option<String>,
}

/// A flat `f32` tensor participating in the autograd tape.
///
/// Cloning a `Tensor` clones the handle, not the storage: a parameter held by
/// a model and the same parameter held by an optimizer step see the same
/// values and the same gradient cell. Matrices are stored row-major and the
/// ops that need a shape take explicit dimensions.
#[derive(Clone)]
pub struct Tensor {
    inner: Rc<TensorInner>,
}

impl Tensor {
    /// Create a tensor from an ndarray
    pub fn new(data: Array1<f32>, requires_grad: bool) -> Self {
        Self {
            inner: Rc::new(TensorInner {
                data: RefCell::new(data),
                grad: Rc::new(RefCell::new(None)),
                requires_grad,
                backward_op: RefCell::new(None),
                name: None,
            }),
        }
    }

    /// Create a tensor from a vector
    pub fn from_vec(data: Vec<f32>, requires_grad: bool) -> Self {
        Self::new(Array1::from(data), requires_grad)
    }

    /// Create a zero-filled tensor
    pub fn zeros(len: usize, requires_grad: bool) -> Self {
        Self::new(Array1::zeros(len), requires_grad)
    }

    /// Create a scalar tensor
    pub fn scalar(value: f32, requires_grad: bool) -> Self {
        Self::from_vec(vec![value], requires_grad)
    }

    /// Create a named trainable parameter
    pub fn parameter(name: impl Into<String>, data: Vec<f32>) -> Self {
        Self {
            inner: Rc::new(TensorInner {
                data: RefCell::new(Array1::from(data)),
                grad: Rc::new(RefCell::new(None)),
                requires_grad: true,
                backward_op: RefCell::new(None),
                name: Some(name.into()),
            }),
        }
    }

    /// Parameter name, if this tensor was created with [`Tensor::parameter`]
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Borrow the tensor values
    pub fn data(&self) -> Ref<'_, Array1<f32>> {
        self.inner.data.borrow()
    }

    /// Mutably borrow the tensor values
    pub fn data_mut(&self) -> RefMut<'_, Array1<f32>> {
        self.inner.data.borrow_mut()
    }

    /// Copy the values out
    pub fn to_vec(&self) -> Vec<f32> {
        self.data().to_vec()
    }

    /// First element, the value of a scalar loss
    pub fn item(&self) -> f32 {
        self.data().first().copied().unwrap_or(f32::NAN)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Whether the tensor holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether gradients flow into this tensor
    pub fn requires_grad(&self) -> bool {
        self.inner.requires_grad
    }

    /// Current gradient, if any has been accumulated
    pub fn grad(&self) -> Option<Array1<f32>> {
        self.inner.grad.borrow().clone()
    }

    /// Replace the gradient
    pub fn set_grad(&self, grad: Array1<f32>) {
        *self.inner.grad.borrow_mut() = Some(grad);
    }

    /// Add to the gradient, initializing it on first use
    pub fn accumulate_grad(&self, grad: Array1<f32>) {
        let mut cell = self.inner.grad.borrow_mut();
        match cell.as_mut() {
            Some(existing) => *existing += &grad,
            None => *cell = Some(grad),
        }
    }

    /// Drop the gradient so that a parameter without a gradient path stays absent
    pub fn zero_grad(&self) {
        *self.inner.grad.borrow_mut() = None;
    }

    /// Shared gradient cell
    pub fn grad_cell(&self) -> GradCell {
        Rc::clone(&self.inner.grad)
    }

    /// Backward op that produced this tensor
    pub fn backward_op(&self) -> Option<Rc<dyn BackwardOp>> {
        self.inner.backward_op.borrow().clone()
    }

    /// Attach the op that produced this tensor
    pub fn set_backward_op(&self, op: Rc<dyn BackwardOp>) {
        *self.inner.backward_op.borrow_mut() = Some(op);
    }

    /// Copy of the values cut off from the tape
    pub fn detach(&self) -> Tensor {
        Tensor::new(self.data().clone(), false)
    }

    /// Identity of the underlying storage
    pub(crate) fn id(&self) -> usize {
        Rc::as_ptr(&self.inner) as *const () as usize
    }

    /// Whether two handles point at the same storage
    pub fn same_as(&self, other: &Tensor) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Largest element (NaN-propagating)
    pub fn max(&self) -> f32 {
        self.data().iter().copied().fold(f32::NEG_INFINITY, |acc, v| {
            if v.is_nan() || acc.is_nan() {
                f32::NAN
            } else {
                acc.max(v)
            }
        })
    }

    /// Smallest element (NaN-propagating)
    pub fn min(&self) -> f32 {
        self.data().iter().copied().fold(f32::INFINITY, |acc, v| {
            if v.is_nan() || acc.is_nan() {
                f32::NAN
            } else {
                acc.min(v)
            }
        })
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("name", &self.inner.name)
            .field("len", &self.len())
            .field("requires_grad", &self.inner.requires_grad)
            .field("has_grad", &self.inner.grad.borrow().is_some())
            .finish()
    }
}
