use std::fmt::{Display, Formatter};
use std::iter::zip;
use std::ops::{Add, AddAssign, Sub, SubAssign, Neg, Mul, MulAssign, Index, IndexMut};

use auto_impl_ops::auto_ops;
use itertools::Itertools;
use log::trace;
use num_traits::{Zero, One};

use crate::{MatError, MatShape};

/// A dense matrix in row-major storage. The shape is fixed at construction,
/// the entries are mutable through indexing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mat<R> {
    data: Vec<R>,
    shape: (usize, usize),
}

impl<R> MatShape for Mat<R> {
    fn shape(&self) -> (usize, usize) {
        self.shape
    }
}

impl<R> Mat<R> {
    pub fn from_data<I>(shape: (usize, usize), data: I) -> Result<Self, MatError>
    where I: IntoIterator<Item = R> {
        let data = data.into_iter().collect_vec();
        let (m, n) = shape;

        if data.len() != m * n {
            return Err(MatError::InvalidConstruction(
                format!("shape ({m}, {n}) requires {} entries, got {}", m * n, data.len())
            ));
        }

        Ok(Self { data, shape })
    }

    /// Builds a matrix from nested rows, taking ownership of a fresh buffer.
    /// All rows must have equal length.
    pub fn from_rows(rows: Vec<Vec<R>>) -> Result<Self, MatError> {
        let m = rows.len();
        let n = rows.first().map_or(0, Vec::len);

        if let Some(bad) = rows.iter().find(|row| row.len() != n) {
            return Err(MatError::InvalidConstruction(
                format!("ragged rows: expected {n} entries per row, got {}", bad.len())
            ));
        }

        let data = rows.into_iter().flatten().collect();
        Ok(Self { data, shape: (m, n) })
    }

    pub fn filled(shape: (usize, usize), fill: R) -> Self
    where R: Clone {
        let (m, n) = shape;
        Self { data: vec![fill; m * n], shape }
    }

    pub fn zero(shape: (usize, usize)) -> Self
    where R: Clone + Zero {
        Self::filled(shape, R::zero())
    }

    pub fn is_zero(&self) -> bool
    where R: Zero {
        self.data.iter().all(|a| a.is_zero())
    }

    pub fn id(size: usize) -> Self
    where R: Clone + Zero + One {
        let mut mat = Self::zero((size, size));
        for i in 0..size {
            mat[(i, i)] = R::one();
        }
        mat
    }

    pub fn is_id(&self) -> bool
    where R: Zero + One + PartialEq {
        self.is_square() && self.iter().all(|(i, j, a)|
            i == j && a.is_one() ||
            i != j && a.is_zero()
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &R)> {
        let n = self.cols();
        self.data.iter().enumerate().map(move |(idx, a)|
            (idx / n, idx % n, a)
        )
    }

    pub fn get(&self, i: usize, j: usize) -> Result<&R, MatError> {
        let (m, n) = self.shape;
        if i < m && j < n {
            Ok(&self.data[i * n + j])
        } else {
            Err(MatError::OutOfBounds { index: (i, j), shape: self.shape })
        }
    }

    pub fn set(&mut self, i: usize, j: usize, value: R) -> Result<(), MatError> {
        let (m, n) = self.shape;
        if i < m && j < n {
            self.data[i * n + j] = value;
            Ok(())
        } else {
            Err(MatError::OutOfBounds { index: (i, j), shape: self.shape })
        }
    }

    /// A fresh `1 × cols` copy of the i-th row.
    pub fn row(&self, i: usize) -> Result<Self, MatError>
    where R: Clone {
        if i >= self.rows() {
            return Err(MatError::OutOfBounds { index: (i, 0), shape: self.shape });
        }
        let n = self.cols();
        let data = self.data[i * n .. (i + 1) * n].to_vec();
        Ok(Self { data, shape: (1, n) })
    }

    /// A fresh `rows × 1` copy of the j-th column.
    pub fn col(&self, j: usize) -> Result<Self, MatError>
    where R: Clone {
        if j >= self.cols() {
            return Err(MatError::OutOfBounds { index: (0, j), shape: self.shape });
        }
        let m = self.rows();
        let data = (0 .. m).map(|i| self[(i, j)].clone()).collect();
        Ok(Self { data, shape: (m, 1) })
    }

    pub fn transpose(&self) -> Self
    where R: Clone {
        let (m, n) = self.shape;
        let mut data = Vec::with_capacity(self.data.len());
        for r in 0 .. n {
            for c in 0 .. m {
                data.push(self[(c, r)].clone());
            }
        }
        Self { data, shape: (n, m) }
    }

    pub fn checked_add(&self, rhs: &Self) -> Result<Self, MatError>
    where R: Clone + for<'x> AddAssign<&'x R> {
        if self.shape != rhs.shape {
            return Err(MatError::DimensionMismatch { op: "add", lhs: self.shape, rhs: rhs.shape });
        }

        let mut sum = self.clone();
        for (a, b) in zip(sum.data.iter_mut(), rhs.data.iter()) {
            *a += b;
        }
        Ok(sum)
    }

    pub fn checked_mul(&self, rhs: &Self) -> Result<Self, MatError>
    where R: Clone + Zero, for<'x> &'x R: Mul<Output = R> {
        if self.cols() != rhs.rows() {
            return Err(MatError::DimensionMismatch { op: "mul", lhs: self.shape, rhs: rhs.shape });
        }

        trace!("mul: lhs {:?}, rhs {:?}", self.shape, rhs.shape);

        let (m, n) = (self.rows(), rhs.cols());
        let mut prod = Self::zero((m, n));

        for r in 0 .. m {
            for c in 0 .. n {
                let mut acc = R::zero();
                for k in 0 .. self.cols() {
                    acc = acc + &self[(r, k)] * &rhs[(k, c)];
                }
                prod[(r, c)] = acc;
            }
        }
        Ok(prod)
    }

    /// Always fails. Inversion is deliberately unsupported.
    pub fn inv(&self) -> Result<Self, MatError> {
        Err(MatError::NotImplemented("matrix inversion"))
    }
}

impl Mat<f64> {
    pub fn rand(shape: (usize, usize)) -> Self {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        let data = (0 .. shape.0 * shape.1).map(|_|
            rng.gen_range(-1.0 .. 1.0)
        ).collect();

        Self { data, shape }
    }
}

impl<R> Default for Mat<R>
where R: Clone + Zero {
    fn default() -> Self {
        Self::zero((0, 0))
    }
}

impl<R> Index<(usize, usize)> for Mat<R> {
    type Output = R;
    fn index(&self, index: (usize, usize)) -> &R {
        let (i, j) = index;
        let (m, n) = self.shape;
        assert!(i < m && j < n, "index ({i}, {j}) out of bounds for shape ({m}, {n})");
        &self.data[i * n + j]
    }
}

impl<R> IndexMut<(usize, usize)> for Mat<R> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut R {
        let (i, j) = index;
        let (m, n) = self.shape;
        assert!(i < m && j < n, "index ({i}, {j}) out of bounds for shape ({m}, {n})");
        &mut self.data[i * n + j]
    }
}

impl<R> Neg for Mat<R>
where R: Neg<Output = R> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        let data = self.data.into_iter().map(Neg::neg).collect();
        Self { data, shape: self.shape }
    }
}

impl<R> Neg for &Mat<R>
where R: Clone + Neg<Output = R> {
    type Output = Mat<R>;
    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

#[auto_ops]
impl<R> AddAssign<&Mat<R>> for Mat<R>
where R: Clone + for<'x> AddAssign<&'x R> {
    fn add_assign(&mut self, rhs: &Self) {
        if self.shape != rhs.shape {
            panic!("{}", MatError::DimensionMismatch { op: "add", lhs: self.shape, rhs: rhs.shape });
        }
        for (a, b) in zip(self.data.iter_mut(), rhs.data.iter()) {
            *a += b;
        }
    }
}

#[auto_ops]
impl<R> SubAssign<&Mat<R>> for Mat<R>
where R: Clone + for<'x> SubAssign<&'x R> {
    fn sub_assign(&mut self, rhs: &Self) {
        if self.shape != rhs.shape {
            panic!("{}", MatError::DimensionMismatch { op: "sub", lhs: self.shape, rhs: rhs.shape });
        }
        for (a, b) in zip(self.data.iter_mut(), rhs.data.iter()) {
            *a -= b;
        }
    }
}

#[auto_ops]
impl<'a, 'b, R> Mul<&'b Mat<R>> for &'a Mat<R>
where R: Clone + Zero, for<'x> &'x R: Mul<Output = R> {
    type Output = Mat<R>;
    fn mul(self, rhs: &'b Mat<R>) -> Self::Output {
        match self.checked_mul(rhs) {
            Ok(prod) => prod,
            Err(e) => panic!("{e}"),
        }
    }
}

#[auto_ops]
impl<R> MulAssign<&R> for Mat<R>
where R: Clone + for<'x> MulAssign<&'x R> {
    fn mul_assign(&mut self, rhs: &R) {
        for a in self.data.iter_mut() {
            *a *= rhs;
        }
    }
}

// `k * a` for the primitive scalar types, delegating to the `a * k` path.
macro_rules! impl_scalar_lmul {
    ($($t:ty),*) => ($(
        impl Mul<Mat<$t>> for $t {
            type Output = Mat<$t>;
            fn mul(self, rhs: Mat<$t>) -> Self::Output {
                rhs * self
            }
        }
        impl<'a> Mul<&'a Mat<$t>> for $t {
            type Output = Mat<$t>;
            fn mul(self, rhs: &'a Mat<$t>) -> Self::Output {
                rhs * self
            }
        }
    )*);
}

impl_scalar_lmul!(i32, i64, f32, f64);

/// Diagnostic rendering, one line per row. Not a parseable format.
impl<R> Display for Mat<R>
where R: Display {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (m, n) = self.shape;
        let body = (0 .. m).map(|i|
            self.data[i * n .. (i + 1) * n].iter().map(|a|
                format!("{a:>3}")
            ).join(" ")
        ).join("\n");
        write!(f, "{body}")
    }
}
