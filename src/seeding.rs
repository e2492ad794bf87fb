//! Generation of seed points for field line tracing.

pub mod manual;
pub mod ring;

#[cfg(feature = "random-seeding")]
pub mod shell;

use crate::{geometry::Point3, tracing::ftr};
use rayon::prelude::*;

/// Defines the properties of a 3D seed point generator.
pub trait Seeder3:
    IntoIterator<Item = Point3<ftr>> + IntoParallelIterator<Item = Point3<ftr>>
{
    /// Returns the number of seed points that will be produced by the seeder.
    fn number_of_points(&self) -> usize;

    /// Filters the seed points using the given predicate.
    fn retain_points<P>(&mut self, predicate: P)
    where
        P: FnMut(&Point3<ftr>) -> bool;
}

// Let a vector of points work as a seeder.
impl Seeder3 for Vec<Point3<ftr>> {
    fn number_of_points(&self) -> usize {
        self.len()
    }

    fn retain_points<P>(&mut self, predicate: P)
    where
        P: FnMut(&Point3<ftr>) -> bool,
    {
        self.retain(predicate);
    }
}

/// Implements the iterator and seeder traits for a seeder type holding
/// its points in a `seed_points` vector.
macro_rules! impl_seeder_for_point_list {
    ($seeder:ty) => {
        impl IntoIterator for $seeder {
            type Item = $crate::geometry::Point3<$crate::tracing::ftr>;
            type IntoIter = ::std::vec::IntoIter<Self::Item>;
            fn into_iter(self) -> Self::IntoIter {
                self.seed_points.into_iter()
            }
        }

        impl ::rayon::iter::IntoParallelIterator for $seeder {
            type Item = $crate::geometry::Point3<$crate::tracing::ftr>;
            type Iter = ::rayon::vec::IntoIter<Self::Item>;
            fn into_par_iter(self) -> Self::Iter {
                ::rayon::iter::IntoParallelIterator::into_par_iter(self.seed_points)
            }
        }

        impl $crate::seeding::Seeder3 for $seeder {
            fn number_of_points(&self) -> usize {
                self.seed_points.len()
            }

            fn retain_points<P>(&mut self, predicate: P)
            where
                P: FnMut(&$crate::geometry::Point3<$crate::tracing::ftr>) -> bool,
            {
                self.seed_points.retain(predicate);
            }
        }
    };
}
pub(crate) use impl_seeder_for_point_list;
