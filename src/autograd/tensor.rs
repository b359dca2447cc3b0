//! Shared parameter tensor
//!
//! Clones of a `Tensor` share storage, so an optimizer holding a clone
//! updates the same values the model reads.

use ndarray::Array1;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// One-dimensional parameter tensor with an optional gradient
#[derive(Debug, Clone)]
pub struct Tensor {
    data: Rc<RefCell<Array1<f32>>>,
    grad: Rc<RefCell<Option<Array1<f32>>>>,
    requires_grad: bool,
}

impl Tensor {
    /// Create a tensor from raw values
    pub fn from_vec(values: Vec<f32>, requires_grad: bool) -> Self {
        Self::from_array(Array1::from(values), requires_grad)
    }

    /// Create a tensor from an ndarray
    pub fn from_array(data: Array1<f32>, requires_grad: bool) -> Self {
        Self {
            data: Rc::new(RefCell::new(data)),
            grad: Rc::new(RefCell::new(None)),
            requires_grad,
        }
    }

    /// Create a zero-filled tensor
    pub fn zeros(len: usize, requires_grad: bool) -> Self {
        Self::from_array(Array1::zeros(len), requires_grad)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    /// Whether the tensor holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the values
    pub fn data(&self) -> Ref<'_, Array1<f32>> {
        self.data.borrow()
    }

    /// Mutably borrow the values
    pub fn data_mut(&self) -> RefMut<'_, Array1<f32>> {
        self.data.borrow_mut()
    }

    /// Copy the values out
    pub fn to_vec(&self) -> Vec<f32> {
        self.data.borrow().to_vec()
    }

    /// Current gradient, if one has been set
    pub fn grad(&self) -> Option<Array1<f32>> {
        self.grad.borrow().clone()
    }

    /// Set the gradient
    pub fn set_grad(&self, grad: Array1<f32>) {
        *self.grad.borrow_mut() = Some(grad);
    }

    /// Clear the gradient
    pub fn zero_grad(&self) {
        *self.grad.borrow_mut() = None;
    }

    /// Whether the tensor is trainable
    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    /// Mark the tensor as trainable or frozen
    pub fn set_requires_grad(&mut self, requires_grad: bool) {
        self.requires_grad = requires_grad;
    }

    /// Identity of the underlying storage, shared by all clones
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.data) as *const () as usize
    }

    /// Whether two handles refer to the same storage
    pub fn ptr_eq(&self, other: &Tensor) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}
