#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    rows: usize,
    cols: usize,
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {}", self.rows, self.cols)
    }
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(cols > 0, "Cannot have 0 columns!");
        assert!(rows > 0, "Cannot have 0 rows!");
        Self { rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn size(&self) -> usize {
        self.rows * self.cols
    }
}

/// A dense, host-side matrix of `f32` values.
#[derive(Clone, Debug)]
pub struct DenseMatrix {
    shape: Shape,
    buf: Vec<f32>,
}

impl Default for DenseMatrix {
    fn default() -> Self {
        Self::zeroed(Shape::new(1, 1))
    }
}

impl DenseMatrix {
    pub fn zeroed(shape: Shape) -> Self {
        Self { shape, buf: vec![0.0; shape.size()] }
    }

    pub fn from_slice(shape: Shape, buf: &[f32]) -> Self {
        let mut res = Self::zeroed(shape);
        res.load_from_slice(shape, buf);
        res
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn size(&self) -> usize {
        self.shape.size()
    }

    /// - If the provided `shape` matches the matrix's current shape, nothing is done.
    /// - If it doesn't, the matrix is reshaped into this shape, and its values are zeroed.
    pub(crate) fn reshape_if_needed(&mut self, shape: Shape) {
        if shape != self.shape {
            self.buf.clear();
            self.buf.resize(shape.size(), 0.0);
            self.shape = shape;
        }
    }

    pub fn load_from_slice(&mut self, shape: Shape, buf: &[f32]) {
        assert_eq!(shape.size(), buf.len(), "Must be exactly the same size!");
        self.reshape_if_needed(shape);
        self.buf.copy_from_slice(buf);
    }

    pub fn set_zero(&mut self) {
        for val in &mut self.buf {
            *val = 0.0;
        }
    }

    /// Writes the contents of this matrix into a buffer,
    /// returns number of values written.
    pub fn write_to_slice(&self, buf: &mut [f32]) -> usize {
        assert!(self.size() <= buf.len());
        buf[..self.size()].copy_from_slice(&self.buf);
        self.size()
    }

    pub fn values(&self) -> &[f32] {
        &self.buf
    }

    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.buf
    }
}

/// A block of values tracked by a trainer, with gradients allocated
/// only when the values are trainable. Frozen tensors carry no
/// gradient buffer and are skipped by the optimisers.
#[derive(Clone, Debug)]
pub struct Tensor {
    pub values: DenseMatrix,
    pub gradients: Option<DenseMatrix>,
}

impl Tensor {
    pub fn new(values: DenseMatrix, trainable: bool) -> Self {
        let gradients = trainable.then(|| DenseMatrix::zeroed(values.shape()));
        Self { values, gradients }
    }

    pub fn shape(&self) -> Shape {
        self.values.shape()
    }

    pub fn size(&self) -> usize {
        self.values.size()
    }

    pub fn trainable(&self) -> bool {
        self.gradients.is_some()
    }

    pub fn zero_grad(&mut self) {
        if let Some(grads) = self.gradients.as_mut() {
            grads.set_zero();
        }
    }
}
