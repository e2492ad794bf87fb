//! Vectors and points in 3D space.

use crate::num::BFloat;
use std::{
    fmt,
    ops::{Add, Div, Index, Mul, Neg, Sub},
};

#[cfg(feature = "serialization")]
use serde::Serialize;

#[cfg(any(test, feature = "for-testing"))]
use approx::{AbsDiffEq, RelativeEq};

/// Denotes the x-, y- or z-dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dim3 {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Dim3 {
    /// Creates an array for iterating over the x-, y- and z-dimensions.
    pub fn slice() -> [Self; 3] {
        [Self::X, Self::Y, Self::Z]
    }

    /// Returns the number of the dimension.
    pub fn num(self) -> usize {
        self as usize
    }
}

use Dim3::{X, Y, Z};

/// Any quantity with one component per spatial dimension.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct In3D<T>([T; 3]);

impl<T> In3D<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self([x, y, z])
    }

    /// Creates a new 3D quantity by evaluating the given component
    /// constructor for each dimension.
    pub fn with_each_component<C>(create_component: C) -> Self
    where
        C: Fn(Dim3) -> T,
    {
        Self::new(
            create_component(X),
            create_component(Y),
            create_component(Z),
        )
    }

    fn map<U, M: Fn(&T) -> U>(&self, transform: M) -> In3D<U> {
        In3D::with_each_component(|dim| transform(&self[dim]))
    }

    fn zip_with<U, V, M: Fn(&T, &U) -> V>(&self, other: &In3D<U>, combine: M) -> In3D<V> {
        In3D::with_each_component(|dim| combine(&self[dim], &other[dim]))
    }
}

impl<T> Index<Dim3> for In3D<T> {
    type Output = T;
    fn index(&self, dim: Dim3) -> &Self::Output {
        &self.0[dim.num()]
    }
}

impl<'a, T> IntoIterator for &'a In3D<T> {
    type Item = &'a T;
    type IntoIter = ::std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: fmt::Display> fmt::Display for In3D<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self[X], self[Y], self[Z])
    }
}

#[cfg(any(test, feature = "for-testing"))]
impl<T> AbsDiffEq for In3D<T>
where
    T: AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        Dim3::slice()
            .into_iter()
            .all(|dim| self[dim].abs_diff_eq(&other[dim], epsilon))
    }
}

#[cfg(any(test, feature = "for-testing"))]
impl<T> RelativeEq for In3D<T>
where
    T: RelativeEq,
    T::Epsilon: Copy,
{
    fn default_max_relative() -> Self::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        Dim3::slice()
            .into_iter()
            .all(|dim| self[dim].relative_eq(&other[dim], epsilon, max_relative))
    }
}

/// Implements the traits shared by `Vec3` and `Point3` by forwarding to
/// the wrapped `In3D`.
macro_rules! impl_components_3d {
    ($T:ident) => {
        impl<F: BFloat> $T<F> {
            /// Creates a new instance given the three components.
            pub fn new(x: F, y: F, z: F) -> Self {
                Self(In3D::new(x, y, z))
            }

            /// Creates a new instance by evaluating the given component
            /// constructor for each dimension.
            pub fn with_each_component<C>(create_component: C) -> Self
            where
                C: Fn(Dim3) -> F,
            {
                Self(In3D::with_each_component(create_component))
            }

            /// Whether all the components are finite.
            pub fn is_finite(&self) -> bool {
                self.0.into_iter().all(|component| component.is_finite())
            }
        }

        impl<F: BFloat> Index<Dim3> for $T<F> {
            type Output = F;
            fn index(&self, dim: Dim3) -> &Self::Output {
                &self.0[dim]
            }
        }

        impl<'a, F: BFloat> IntoIterator for &'a $T<F> {
            type Item = &'a F;
            type IntoIter = ::std::slice::Iter<'a, F>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<F: BFloat + fmt::Display> fmt::Display for $T<F> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        #[cfg(any(test, feature = "for-testing"))]
        impl<F> AbsDiffEq for $T<F>
        where
            F: BFloat + AbsDiffEq,
            F::Epsilon: Copy,
        {
            type Epsilon = F::Epsilon;

            fn default_epsilon() -> Self::Epsilon {
                F::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                self.0.abs_diff_eq(&other.0, epsilon)
            }
        }

        #[cfg(any(test, feature = "for-testing"))]
        impl<F> RelativeEq for $T<F>
        where
            F: BFloat + RelativeEq,
            F::Epsilon: Copy,
        {
            fn default_max_relative() -> Self::Epsilon {
                F::default_max_relative()
            }

            fn relative_eq(
                &self,
                other: &Self,
                epsilon: Self::Epsilon,
                max_relative: Self::Epsilon,
            ) -> bool {
                self.0.relative_eq(&other.0, epsilon, max_relative)
            }
        }
    };
}

/// A 3D vector.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct Vec3<F>(In3D<F>);

impl_components_3d!(Vec3);

impl<F: BFloat> Vec3<F> {
    pub fn zero() -> Self {
        Self::new(F::zero(), F::zero(), F::zero())
    }

    /// Creates a new unit vector along the given dimension.
    pub fn unit(dim: Dim3) -> Self {
        Self::with_each_component(|d| if d == dim { F::one() } else { F::zero() })
    }

    /// Constructs a new point from the vector components.
    pub fn to_point3(&self) -> Point3<F> {
        Point3(self.0)
    }

    /// Computes the length of the vector.
    ///
    /// Uses `hypot`, so the result stays finite for any vector with finite
    /// components whose true length is representable.
    pub fn length(&self) -> F {
        self[X].hypot(self[Y]).hypot(self[Z])
    }

    pub fn is_zero(&self) -> bool {
        self.0.into_iter().all(|component| component.is_zero())
    }

    /// Computes the dot product of the vector with another vector.
    pub fn dot(&self, other: &Self) -> F {
        self[X] * other[X] + self[Y] * other[Y] + self[Z] * other[Z]
    }

    /// Computes the cross product of the vector with another vector.
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self[Y] * other[Z] - self[Z] * other[Y],
            self[Z] * other[X] - self[X] * other[Z],
            self[X] * other[Y] - self[Y] * other[X],
        )
    }

    /// Returns a unit length copy of the vector, or `None` if the vector
    /// has zero or non-finite length.
    pub fn normalized(&self) -> Option<Self> {
        let length = self.length();
        (length.is_finite() && length > F::zero()).then(|| self / length)
    }
}

impl<'a, F: BFloat> Add<&'a Vec3<F>> for &'a Vec3<F> {
    type Output = Vec3<F>;
    fn add(self, other: Self) -> Self::Output {
        Vec3(self.0.zip_with(&other.0, |&a, &b| a + b))
    }
}

impl<'a, F: BFloat> Sub<&'a Vec3<F>> for &'a Vec3<F> {
    type Output = Vec3<F>;
    fn sub(self, other: Self) -> Self::Output {
        Vec3(self.0.zip_with(&other.0, |&a, &b| a - b))
    }
}

impl<F: BFloat> Mul<F> for &Vec3<F> {
    type Output = Vec3<F>;
    fn mul(self, factor: F) -> Self::Output {
        Vec3(self.0.map(|&a| a * factor))
    }
}

impl<F: BFloat> Mul<F> for Vec3<F> {
    type Output = Self;
    fn mul(self, factor: F) -> Self::Output {
        &self * factor
    }
}

impl<F: BFloat> Div<F> for &Vec3<F> {
    type Output = Vec3<F>;
    fn div(self, divisor: F) -> Self::Output {
        Vec3(self.0.map(|&a| a / divisor))
    }
}

impl<F: BFloat> Neg for Vec3<F> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Vec3(self.0.map(|&a| -a))
    }
}

/// A 3D spatial coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct Point3<F>(In3D<F>);

impl_components_3d!(Point3);

impl<F: BFloat> Point3<F> {
    pub fn origin() -> Self {
        Self::new(F::zero(), F::zero(), F::zero())
    }

    /// Constructs a new vector from the point components.
    pub fn to_vec3(&self) -> Vec3<F> {
        Vec3(self.0)
    }

    /// Computes the Euclidean distance to the given point.
    pub fn distance_to(&self, other: &Self) -> F {
        (other - self).length()
    }
}

impl<'a, F: BFloat> Sub<&'a Point3<F>> for &'a Point3<F> {
    type Output = Vec3<F>;
    fn sub(self, other: &Point3<F>) -> Self::Output {
        Vec3(self.0.zip_with(&other.0, |&a, &b| a - b))
    }
}

impl<'a, F: BFloat> Add<&'a Vec3<F>> for &'a Point3<F> {
    type Output = Point3<F>;
    fn add(self, vector: &Vec3<F>) -> Self::Output {
        Point3(self.0.zip_with(&vector.0, |&a, &b| a + b))
    }
}

impl<'a, F: BFloat> Sub<&'a Vec3<F>> for &'a Point3<F> {
    type Output = Point3<F>;
    fn sub(self, vector: &Vec3<F>) -> Self::Output {
        Point3(self.0.zip_with(&vector.0, |&a, &b| a - b))
    }
}
