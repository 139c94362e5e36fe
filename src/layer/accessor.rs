//! Record accessors.
//!
//! An accessor maps a record to one value the layer needs (a position, a
//! color). Any `Fn(&D) -> T` is an accessor; the unit structs here are the
//! defaults that read [`LineDatum`] fields.

use std::sync::Arc;

use super::record::LineDatum;
use crate::util::color::Rgb;

/// 2D world coordinate.
pub type Position = [f64; 2];

/// Maps a record to a value of type `T`.
pub trait Accessor<D, T> {
    /// Read the value from `datum`.
    fn get(&self, datum: &D) -> T;
}

impl<D, T, F> Accessor<D, T> for F
where
    F: Fn(&D) -> T,
{
    fn get(&self, datum: &D) -> T {
        self(datum)
    }
}

/// Accessor held by layer props. Changes are detected by `Arc` identity.
pub type SharedAccessor<D, T> = Arc<dyn Accessor<D, T>>;

/// Wrap an accessor for use in props.
pub fn shared<D, T, A>(accessor: A) -> SharedAccessor<D, T>
where
    A: Accessor<D, T> + 'static,
{
    Arc::new(accessor)
}

/// Reads [`LineDatum::source_position`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SourcePositionField;

impl<D: LineDatum> Accessor<D, Position> for SourcePositionField {
    fn get(&self, datum: &D) -> Position {
        datum.source_position()
    }
}

/// Reads [`LineDatum::target_position`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetPositionField;

impl<D: LineDatum> Accessor<D, Position> for TargetPositionField {
    fn get(&self, datum: &D) -> Position {
        datum.target_position()
    }
}

/// Reads [`LineDatum::color`]. Records without a color yield `None`; the
/// layer substitutes its default color.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorField;

impl<D: LineDatum> Accessor<D, Option<Rgb>> for ColorField {
    fn get(&self, datum: &D) -> Option<Rgb> {
        datum.color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::record::LineRecord;

    #[test]
    fn default_accessors_read_fields() {
        let record = LineRecord::new([1.0, 2.0], [3.0, 4.0]).with_color([9.0, 8.0, 7.0]);
        assert_eq!(SourcePositionField.get(&record), [1.0, 2.0]);
        assert_eq!(TargetPositionField.get(&record), [3.0, 4.0]);
        assert_eq!(ColorField.get(&record), Some([9.0, 8.0, 7.0]));
    }

    #[test]
    fn missing_color_reads_as_none() {
        let record = LineRecord::new([0.0, 0.0], [1.0, 1.0]);
        assert_eq!(ColorField.get(&record), None);
    }

    #[test]
    fn closures_are_accessors() {
        let swap = |p: &(f64, f64)| [p.1, p.0];
        let accessor: SharedAccessor<(f64, f64), Position> = shared(swap);
        assert_eq!(accessor.get(&(1.0, 2.0)), [2.0, 1.0]);
    }
}
